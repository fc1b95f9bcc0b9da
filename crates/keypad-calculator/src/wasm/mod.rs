//! Presentation glue for the browser calculator
//!
//! The mock DOM front end is always compiled so it can be tested natively;
//! the real `wasm-bindgen` binding sits behind the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod driver;
mod keypad;
mod registry;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use dom::{
    DomElement, DomEvent, MockDom, CALCULATOR_ID, DISPLAY_CURRENT_ID, DISPLAY_HISTORY_ID,
};
pub use driver::{WasmDriver, ACTIVE_CALCULATOR_CLASS, PRESSED_CLASS};
pub use keypad::{Keypad, KeypadButtonDef, MockDomKeypadExt};
pub use registry::{SessionId, SessionRegistry};
