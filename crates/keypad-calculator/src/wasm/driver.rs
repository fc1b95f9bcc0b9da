//! DOM-backed driver for one calculator instance
//!
//! Routes clicks and key presses through the keypad into the session, writes
//! the returned text into the mock displays and flashes the pressed button.

use tracing::debug;

use super::dom::{DomEvent, MockDom, CALCULATOR_ID, DISPLAY_CURRENT_ID, DISPLAY_HISTORY_ID};
use super::keypad::{Keypad, MockDomKeypadExt};
use crate::config::CalculatorConfig;
use crate::core::session::{CalculatorSession, Render};
use crate::core::Action;

/// CSS class a pressed button carries during its feedback window
pub const PRESSED_CLASS: &str = "active";
/// CSS class marking the instance that receives keyboard input
pub const ACTIVE_CALCULATOR_CLASS: &str = "active-calculator";

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingRelease {
    element_id: String,
    release_at_ms: u64,
}

/// One calculator instance: session, markup and press feedback
#[derive(Debug)]
pub struct WasmDriver {
    session: CalculatorSession<Keypad>,
    dom: MockDom,
    feedback_ms: u64,
    pending_releases: Vec<PendingRelease>,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a driver from a configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        let keypad = Keypad::with_labels(&config.operator_labels);
        let mut dom = MockDom::calculator();
        dom.add_keypad(&keypad);
        Self {
            session: CalculatorSession::with_config(keypad, config),
            dom,
            feedback_ms: config.press_feedback_ms,
            pending_releases: Vec::new(),
        }
    }

    /// Returns the session
    #[must_use]
    pub fn session(&self) -> &CalculatorSession<Keypad> {
        &self.session
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        self.session.labels()
    }

    /// Returns the mock document
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Handles a click on an element of this calculator.
    ///
    /// Returns `None` when the element is not a keypad button.
    pub fn click(&mut self, element_id: &str) -> Option<Render> {
        self.dom.dispatch_event(DomEvent::click(element_id));
        let action = self.keypad().handle_click(element_id)?;
        Some(self.apply(action))
    }

    /// Handles a key press and flashes the matching button.
    ///
    /// Returns `None` for keys the calculator does not map.
    pub fn press_key(&mut self, key: &str, now_ms: u64) -> Option<Render> {
        self.dom.dispatch_event(DomEvent::key_down(key));
        let Some(action) = Keypad::key_to_action(key) else {
            debug!(key, "unmapped key");
            return None;
        };
        let render = self.apply(action);
        self.flash(&action, now_ms);
        Some(render)
    }

    /// Clears the `active` class from buttons whose feedback window has passed
    pub fn release_feedback(&mut self, now_ms: u64) {
        let (expired, pending): (Vec<_>, Vec<_>) = self
            .pending_releases
            .drain(..)
            .partition(|p| p.release_at_ms <= now_ms);
        self.pending_releases = pending;
        for release in expired {
            self.dom.remove_class(&release.element_id, PRESSED_CLASS);
        }
    }

    /// Marks or unmarks this instance as the keyboard target
    pub fn set_active(&mut self, active: bool) {
        if active {
            self.dom.add_class(CALCULATOR_ID, ACTIVE_CALCULATOR_CLASS);
        } else {
            self.dom.remove_class(CALCULATOR_ID, ACTIVE_CALCULATOR_CLASS);
        }
    }

    /// Returns true if this instance is marked active
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.dom.has_class(CALCULATOR_ID, ACTIVE_CALCULATOR_CLASS)
    }

    /// Text of the live display field
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.dom.get_element_value(DISPLAY_CURRENT_ID).unwrap_or_default()
    }

    /// Text of the expression trace field
    #[must_use]
    pub fn history_text(&self) -> &str {
        self.dom.get_element_text(DISPLAY_HISTORY_ID).unwrap_or_default()
    }

    /// Returns true if the button is currently flashed
    #[must_use]
    pub fn is_pressed(&self, element_id: &str) -> bool {
        self.dom.has_class(element_id, PRESSED_CLASS)
    }

    pub(crate) fn apply(&mut self, action: Action) -> Render {
        let render = self.session.dispatch(action);
        self.dom.set_element_value(DISPLAY_CURRENT_ID, &render.display);
        if let Some(history) = &render.history {
            self.dom.set_element_text(DISPLAY_HISTORY_ID, history);
        }
        render
    }

    fn flash(&mut self, action: &Action, now_ms: u64) {
        let Some(element_id) = self
            .keypad()
            .find_button_for_action(action)
            .map(|btn| btn.id.clone())
        else {
            return;
        };
        self.dom.add_class(&element_id, PRESSED_CLASS);
        let release_at_ms = now_ms.saturating_add(self.feedback_ms);
        self.pending_releases.retain(|p| p.element_id != element_id);
        self.pending_releases.push(PendingRelease {
            element_id,
            release_at_ms,
        });
    }
}
