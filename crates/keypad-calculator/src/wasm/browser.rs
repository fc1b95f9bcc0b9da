//! Browser bindings
//!
//! JS owns the real elements: it forwards clicks and key presses here and
//! writes the returned `display` / `history` strings back into the page.

use wasm_bindgen::prelude::*;
use web_sys::console;

use crate::config::CalculatorConfig;
use crate::core::session::{CalculatorSession, Render};
use crate::wasm::keypad::Keypad;

/// One calculator instance exposed to JS
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    session: CalculatorSession<Keypad>,
    last: Render,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates a calculator with the stock configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_config(&CalculatorConfig::default())
    }

    /// Creates a calculator from a JSON configuration; invalid JSON falls
    /// back to the stock configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Self {
        Self::from_config(&CalculatorConfig::from_json_or_default(json))
    }

    /// Live display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.session.display().to_string()
    }

    /// Expression trace text
    #[wasm_bindgen(getter)]
    pub fn history(&self) -> String {
        self.session.expression_trace().to_string()
    }

    /// Handles a keypad button click by element ID.
    ///
    /// Returns false if the ID is not a keypad button.
    #[wasm_bindgen(js_name = handleButton)]
    pub fn handle_button(&mut self, button_id: &str) -> bool {
        match self.session.labels().handle_click(button_id) {
            Some(action) => {
                self.last = self.session.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Handles a keyboard key. Returns false for unmapped keys so JS can
    /// leave the event alone.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        match Keypad::key_to_action(key) {
            Some(action) => {
                self.last = self.session.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Element ID of the button to flash for a key, if any
    #[wasm_bindgen(js_name = buttonForKey)]
    pub fn button_for_key(&self, key: &str) -> Option<String> {
        let action = Keypad::key_to_action(key)?;
        self.session
            .labels()
            .find_button_for_action(&action)
            .map(|btn| btn.id.clone())
    }

    /// The last render as JSON: `{"display": "...", "history": "..." | null}`
    #[wasm_bindgen(js_name = renderJson)]
    pub fn render_json(&self) -> String {
        serde_json::to_string(&self.last).unwrap_or_else(|_| "{}".to_string())
    }
}

impl BrowserCalculator {
    fn from_config(config: &CalculatorConfig) -> Self {
        let keypad = Keypad::with_labels(&config.operator_labels);
        Self {
            session: CalculatorSession::with_config(keypad, config),
            last: Render::default(),
        }
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"keypad calculator initialized".into());
}
