//! Keypad layout and keyboard mapping
//!
//! Translates clicks on keypad controls and raw keyboard keys into
//! [`Action`]s, and supplies the operator labels the session prints in its
//! expression trace.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::dom::{DomElement, MockDom};
use crate::core::{Action, ActionKind, Operator, OperatorLabels};

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button dispatches
    pub action: Action,
    /// The DOM element ID for this button
    pub id: String,
    /// Text printed on the button
    pub label: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a button labelled with the action's own text
    #[must_use]
    pub fn new(action: Action, row: usize, col: usize) -> Self {
        let id = match action.kind {
            ActionKind::Digit => format!("btn-{}", action.value),
            ActionKind::Decimal => "btn-decimal".to_string(),
            ActionKind::Clear => "btn-clear".to_string(),
            ActionKind::Delete => "btn-delete".to_string(),
            ActionKind::Equals => "btn-equals".to_string(),
            ActionKind::Add => "btn-add".to_string(),
            ActionKind::Subtract => "btn-subtract".to_string(),
            ActionKind::Multiply => "btn-multiply".to_string(),
            ActionKind::Divide => "btn-divide".to_string(),
            ActionKind::Mod => "btn-mod".to_string(),
        };
        Self {
            action,
            id,
            label: action.value.to_string(),
            row,
            col,
        }
    }

    /// CSS class the markup uses to tell digit and point buttons apart
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self.action.kind {
            ActionKind::Digit => "number",
            ActionKind::Decimal => "decimal",
            ActionKind::Equals => "equals",
            ActionKind::Clear | ActionKind::Delete => "function",
            _ => "operator",
        }
    }

    /// Creates the button element
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let element = DomElement::new("button")
            .with_id(&self.id)
            .with_text(&self.label)
            .with_class(self.css_class())
            .with_attr("value", self.action.value);
        match self.action.kind {
            ActionKind::Digit | ActionKind::Decimal => element,
            kind => element.with_attr("data-action", kind.data_action()),
        }
    }
}

/// Keypad layout:
/// ```text
/// [ AC ] [ DEL ] [ % ] [ ÷ ]
/// [ 7  ] [ 8   ] [ 9 ] [ × ]
/// [ 4  ] [ 5   ] [ 6 ] [ - ]
/// [ 1  ] [ 2   ] [ 3 ] [ + ]
/// [ 0  ] [ .   ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            KeypadButtonDef::new(Action::clear(), 0, 0),
            KeypadButtonDef::new(Action::delete(), 0, 1),
            KeypadButtonDef::new(Action::operator(Operator::Modulo), 0, 2),
            KeypadButtonDef::new(Action::operator(Operator::Divide), 0, 3),
            KeypadButtonDef::new(Action::digit(7), 1, 0),
            KeypadButtonDef::new(Action::digit(8), 1, 1),
            KeypadButtonDef::new(Action::digit(9), 1, 2),
            KeypadButtonDef::new(Action::operator(Operator::Multiply), 1, 3),
            KeypadButtonDef::new(Action::digit(4), 2, 0),
            KeypadButtonDef::new(Action::digit(5), 2, 1),
            KeypadButtonDef::new(Action::digit(6), 2, 2),
            KeypadButtonDef::new(Action::operator(Operator::Subtract), 2, 3),
            KeypadButtonDef::new(Action::digit(1), 3, 0),
            KeypadButtonDef::new(Action::digit(2), 3, 1),
            KeypadButtonDef::new(Action::digit(3), 3, 2),
            KeypadButtonDef::new(Action::operator(Operator::Add), 3, 3),
            KeypadButtonDef::new(Action::digit(0), 4, 0),
            KeypadButtonDef::new(Action::decimal(), 4, 1),
            KeypadButtonDef::new(Action::equals(), 4, 2),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Creates the standard keypad with operator labels replaced
    #[must_use]
    pub fn with_labels(overrides: &BTreeMap<Operator, String>) -> Self {
        let mut keypad = Self::new();
        for button in &mut keypad.buttons {
            if let Some(label) = button.action.kind.operator().and_then(|op| overrides.get(&op)) {
                button.label.clone_from(label);
            }
        }
        keypad
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that dispatches `action`
    #[must_use]
    pub fn find_button_for_action(&self, action: &Action) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| match action.kind {
            ActionKind::Digit => b.action == *action,
            kind => b.action.kind == kind,
        })
    }

    /// Processes a click on a keypad element and returns its action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<Action> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Creates the empty keypad container
    #[must_use]
    pub fn container_element() -> DomElement {
        DomElement::new("div").with_id("calc-keypad").with_class("buttons")
    }

    /// Creates the keypad container with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.buttons
            .iter()
            .fold(Self::container_element(), |keypad, btn| {
                keypad.with_child(btn.to_element())
            })
    }

    /// Maps a keyboard key to an action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<Action> {
        match key {
            "0" => Some(Action::digit(0)),
            "1" => Some(Action::digit(1)),
            "2" => Some(Action::digit(2)),
            "3" => Some(Action::digit(3)),
            "4" => Some(Action::digit(4)),
            "5" => Some(Action::digit(5)),
            "6" => Some(Action::digit(6)),
            "7" => Some(Action::digit(7)),
            "8" => Some(Action::digit(8)),
            "9" => Some(Action::digit(9)),
            "." => Some(Action::decimal()),
            "+" => Some(Action::operator(Operator::Add)),
            "-" => Some(Action::operator(Operator::Subtract)),
            "*" | "×" => Some(Action::operator(Operator::Multiply)),
            "/" | "÷" => Some(Action::operator(Operator::Divide)),
            "%" => Some(Action::operator(Operator::Modulo)),
            "Enter" | "=" => Some(Action::equals()),
            "Backspace" => Some(Action::delete()),
            "Delete" | "Escape" => Some(Action::clear()),
            _ => None,
        }
    }
}

impl OperatorLabels for Keypad {
    fn label(&self, op: Operator) -> Cow<'_, str> {
        self.buttons
            .iter()
            .find(|b| b.action.kind == op.action_kind())
            .map_or(Cow::Borrowed(op.data_action()), |b| {
                Cow::Borrowed(b.label.as_str())
            })
    }
}

/// Extension trait for MockDom to add a keypad
pub trait MockDomKeypadExt {
    /// Registers the keypad container and every button
    fn add_keypad(&mut self, keypad: &Keypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &Keypad) {
        let container = Keypad::container_element();
        let container_id = container.id.clone();
        self.append_child("calculator", container);
        for btn in keypad.buttons() {
            self.append_child(&container_id, btn.to_element());
        }
    }
}
