//! Keypad Calculator
//!
//! A four-function-plus-modulo calculator driven by keypad events. Operands
//! are kept as the text the user typed and operations chain strictly left to
//! right, so `2 + 3 × 4 =` shows `20`.
//!
//! - [`core::session`]: the entry state machine (`handle_action`)
//! - [`core::evaluator`]: pure arithmetic over operand text (`evaluate`)
//! - [`wasm`]: keypad layout, mock DOM driver, multi-instance routing and the
//!   optional `wasm-bindgen` binding
//! - [`driver`]: scenario checks shared by every front end
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut session = CalculatorSession::new();
//! for action in [
//!     Action::digit(2),
//!     Action::operator(Operator::Add),
//!     Action::digit(3),
//!     Action::operator(Operator::Multiply),
//!     Action::digit(4),
//! ] {
//!     session.dispatch(action);
//! }
//! let render = session.dispatch(Action::equals());
//! assert_eq!(render.display, "20");
//! assert_eq!(render.history.as_deref(), Some("5 × 4 ="));
//!
//! assert_eq!(evaluate("5", Operator::Divide, "0"), Err(CalcError::DivisionByZero));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;

/// Presentation layer; the mock DOM keeps it testable without a browser
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ConfigError, ErrorTokens};
    pub use crate::core::evaluator::{evaluate, evaluate_action, format_number, Evaluation};
    pub use crate::core::session::{CalculatorSession, Render};
    pub use crate::core::{
        Action, ActionKind, CalcError, CalcResult, EntryText, Operator, OperatorLabels,
        StandardLabels,
    };
    pub use crate::driver::CalculatorDriver;

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;

    pub use crate::wasm::{
        DomElement, DomEvent, Keypad, MockDom, SessionId, SessionRegistry, WasmDriver,
    };
}
