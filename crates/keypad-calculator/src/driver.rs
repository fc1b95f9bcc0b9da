//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run on
//! both the bare session and the DOM-backed driver.
//!
//! ```rust
//! use keypad_calculator::driver::run_all_scenarios;
//! use keypad_calculator::prelude::*;
//!
//! run_all_scenarios(&mut CalculatorSession::new());
//! run_all_scenarios(&mut WasmDriver::new());
//! ```

use crate::core::session::{CalculatorSession, Render};
use crate::core::{Action, Operator, OperatorLabels};
use crate::wasm::WasmDriver;

/// Interface shared by everything that can be driven like a calculator
pub trait CalculatorDriver {
    /// Presses one control
    fn press(&mut self, action: Action) -> Render;

    /// Current live display text
    fn display(&self) -> String;

    /// Current expression trace text
    fn history(&self) -> String;

    /// Presses a sequence of controls and returns the last render
    fn press_all(&mut self, actions: &[Action]) -> Render {
        let mut render = Render::default();
        for action in actions {
            render = self.press(*action);
        }
        render
    }

    /// Resets the calculator
    fn clear(&mut self) {
        self.press(Action::clear());
    }
}

impl<L: OperatorLabels> CalculatorDriver for CalculatorSession<L> {
    fn press(&mut self, action: Action) -> Render {
        self.dispatch(action)
    }

    fn display(&self) -> String {
        CalculatorSession::display(self).to_string()
    }

    fn history(&self) -> String {
        self.expression_trace().to_string()
    }
}

impl CalculatorDriver for WasmDriver {
    /// Clicks the keypad button for `action`
    fn press(&mut self, action: Action) -> Render {
        let button = self
            .keypad()
            .find_button_for_action(&action)
            .map(|btn| btn.id.clone());
        match button.and_then(|id| self.click(&id)) {
            Some(render) => render,
            None => self.apply(action),
        }
    }

    fn display(&self) -> String {
        self.display_text().to_string()
    }

    fn history(&self) -> String {
        self.history_text().to_string()
    }
}

const ADD: Action = Action::operator(Operator::Add);
const SUBTRACT: Action = Action::operator(Operator::Subtract);
const MULTIPLY: Action = Action::operator(Operator::Multiply);
const DIVIDE: Action = Action::operator(Operator::Divide);
const MODULO: Action = Action::operator(Operator::Modulo);

/// `2 + 3 × 4 =` evaluates left to right
pub fn verify_left_to_right<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let render = driver.press_all(&[
        Action::digit(2),
        ADD,
        Action::digit(3),
        MULTIPLY,
        Action::digit(4),
        Action::equals(),
    ]);
    assert_eq!(render.display, "20");
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.history(), "5 × 4 =");
}

/// Decimal entry and the one-point rule
pub fn verify_decimal_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all(&[
        Action::digit(1),
        Action::digit(2),
        Action::decimal(),
        Action::decimal(),
        Action::digit(5),
    ]);
    assert_eq!(driver.display(), "12.5");

    driver.press_all(&[ADD, Action::digit(7), Action::equals()]);
    assert_eq!(driver.display(), "19.5");
    assert_eq!(driver.history(), "12.5 + 7 =");
}

/// Leading zeros collapse
pub fn verify_leading_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all(&[Action::digit(0), Action::digit(0), Action::digit(8)]);
    assert_eq!(driver.display(), "8");
}

/// Division by zero renders its error token
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all(&[Action::digit(5), DIVIDE, Action::digit(0), Action::equals()]);
    assert_eq!(driver.display(), "Error: Div by 0");
    assert_eq!(driver.history(), "5 ÷ 0 =");
}

/// Modulo and subtraction chain
pub fn verify_modulo_and_subtract<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all(&[
        Action::digit(1),
        Action::digit(7),
        MODULO,
        Action::digit(5),
        SUBTRACT,
        Action::digit(3),
        Action::equals(),
    ]);
    assert_eq!(driver.display(), "-1");
    assert_eq!(driver.history(), "2 - 3 =");
}

/// Clear resets both displays
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    driver.press_all(&[Action::digit(4), MULTIPLY, Action::digit(2)]);
    driver.clear();
    assert_eq!(driver.display(), "");
    assert_eq!(driver.history(), "");
}

/// Deleting past the first character leaves an empty display
pub fn verify_delete_to_empty<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_all(&[Action::digit(9), Action::delete(), Action::delete()]);
    assert_eq!(driver.display(), "");
}

/// An operator with nothing entered does nothing
pub fn verify_ignored_operator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let render = driver.press(ADD);
    assert_eq!(render.display, "");
    assert_eq!(render.history, None);
    assert_eq!(driver.history(), "");
    driver.press_all(&[Action::digit(3), Action::equals()]);
    assert_eq!(driver.display(), "3");
}

/// Runs every scenario
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_left_to_right(driver);
    verify_decimal_entry(driver);
    verify_leading_zero(driver);
    verify_division_by_zero(driver);
    verify_modulo_and_subtract(driver);
    verify_clear(driver);
    verify_delete_to_empty(driver);
    verify_ignored_operator(driver);
}
