//! Operators, action kinds and the labels used to render them

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Binary operator awaiting its right-hand operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition
    Add,
    /// Subtraction
    Subtract,
    /// Multiplication
    Multiply,
    /// Division
    Divide,
    /// Truncating remainder
    #[serde(rename = "mod")]
    Modulo,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
    ];

    /// Returns the `data-action` name used by the keypad markup
    #[must_use]
    pub const fn data_action(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulo => "calculate-mod",
        }
    }

    /// Looks an operator up by its `data-action` name
    #[must_use]
    pub fn from_data_action(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.data_action() == name)
    }

    /// Returns the action kind that selects this operator
    #[must_use]
    pub const fn action_kind(&self) -> ActionKind {
        match self {
            Self::Add => ActionKind::Add,
            Self::Subtract => ActionKind::Subtract,
            Self::Multiply => ActionKind::Multiply,
            Self::Divide => ActionKind::Divide,
            Self::Modulo => ActionKind::Mod,
        }
    }
}

/// Kind of a discrete input action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// A digit 0-9
    Digit,
    /// The decimal point
    Decimal,
    /// Reset everything
    Clear,
    /// Remove the last typed character
    Delete,
    /// Complete the pending operation
    Equals,
    /// Choose addition
    Add,
    /// Choose subtraction
    Subtract,
    /// Choose multiplication
    Multiply,
    /// Choose division
    Divide,
    /// Choose modulo
    Mod,
}

impl ActionKind {
    /// Returns the operator this action selects, if it is arithmetic
    #[must_use]
    pub const fn operator(&self) -> Option<Operator> {
        match self {
            Self::Add => Some(Operator::Add),
            Self::Subtract => Some(Operator::Subtract),
            Self::Multiply => Some(Operator::Multiply),
            Self::Divide => Some(Operator::Divide),
            Self::Mod => Some(Operator::Modulo),
            Self::Digit | Self::Decimal | Self::Clear | Self::Delete | Self::Equals => None,
        }
    }

    /// Returns the `data-action` name of the control that emits this action
    #[must_use]
    pub const fn data_action(&self) -> &'static str {
        match self {
            Self::Digit => "number",
            Self::Decimal => "decimal",
            Self::Clear => "clear",
            Self::Delete => "delete",
            Self::Equals => "equals",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Mod => "calculate-mod",
        }
    }

    /// Parses a `data-action` name
    #[must_use]
    pub fn from_data_action(name: &str) -> Option<Self> {
        match name {
            "number" => Some(Self::Digit),
            "decimal" => Some(Self::Decimal),
            "clear" => Some(Self::Clear),
            "delete" => Some(Self::Delete),
            "equals" => Some(Self::Equals),
            other => Operator::from_data_action(other).map(|op| op.action_kind()),
        }
    }
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// A fully described input event: kind plus the text the control carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Action {
    /// What the action does
    pub kind: ActionKind,
    /// Control text (the digit for `Digit`, the label otherwise)
    pub value: &'static str,
}

impl Action {
    /// Creates an action
    #[must_use]
    pub const fn new(kind: ActionKind, value: &'static str) -> Self {
        Self { kind, value }
    }

    /// Digit action. `d` must be in `0..=9`; use [`Action::try_digit`] for
    /// values that are not known to be in range.
    #[must_use]
    pub const fn digit(d: u8) -> Self {
        debug_assert!(d <= 9, "digit out of range");
        let index = if d > 9 { 9 } else { d as usize };
        Self::new(ActionKind::Digit, DIGITS[index])
    }

    /// Digit action, or `None` when `d` is not a single digit
    #[must_use]
    pub const fn try_digit(d: u8) -> Option<Self> {
        if d > 9 {
            return None;
        }
        Some(Self::new(ActionKind::Digit, DIGITS[d as usize]))
    }

    /// Decimal point
    #[must_use]
    pub const fn decimal() -> Self {
        Self::new(ActionKind::Decimal, ".")
    }

    /// Clear
    #[must_use]
    pub const fn clear() -> Self {
        Self::new(ActionKind::Clear, "AC")
    }

    /// Delete
    #[must_use]
    pub const fn delete() -> Self {
        Self::new(ActionKind::Delete, "DEL")
    }

    /// Equals
    #[must_use]
    pub const fn equals() -> Self {
        Self::new(ActionKind::Equals, "=")
    }

    /// Operator selection, carrying the standard label
    #[must_use]
    pub const fn operator(op: Operator) -> Self {
        Self::new(op.action_kind(), StandardLabels::symbol(op))
    }
}

/// Resolves the display symbol for an operator.
///
/// Supplied by the presentation layer; the session only asks for labels when
/// it builds the expression trace.
pub trait OperatorLabels {
    /// Returns the label shown in the expression trace
    fn label(&self, op: Operator) -> Cow<'_, str>;
}

/// The labels printed on the standard keypad
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardLabels;

impl StandardLabels {
    /// Returns the standard symbol for an operator
    #[must_use]
    pub const fn symbol(op: Operator) -> &'static str {
        match op {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Modulo => "%",
        }
    }
}

impl OperatorLabels for StandardLabels {
    fn label(&self, op: Operator) -> Cow<'_, str> {
        Cow::Borrowed(Self::symbol(op))
    }
}
