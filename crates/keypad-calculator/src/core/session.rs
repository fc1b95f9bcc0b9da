//! Entry state machine
//!
//! A [`CalculatorSession`] consumes one `(ActionKind, value)` event at a time
//! and returns the text for the live display and, when it changed, the
//! expression trace. Operations chain strictly left to right: `2 + 3 × 4 =`
//! shows `20`.

use serde::Serialize;
use tracing::debug;

use crate::config::{CalculatorConfig, ErrorTokens};
use crate::core::evaluator::{evaluate, format_number};
use crate::core::{Action, ActionKind, EntryText, Operator, OperatorLabels, StandardLabels};

/// Text to push to the presentation layer after an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Render {
    /// Live entry display
    pub display: String,
    /// Expression trace; `None` leaves the secondary display as it was
    pub history: Option<String>,
}

impl Render {
    fn display_only(display: &str) -> Self {
        Self {
            display: display.to_string(),
            history: None,
        }
    }
}

/// Interaction state for one calculator instance
#[derive(Debug, Clone)]
pub struct CalculatorSession<L = StandardLabels> {
    entry: EntryText,
    pending_operator: Option<Operator>,
    pending_operand: Option<EntryText>,
    expression_trace: String,
    display: String,
    labels: L,
    tokens: ErrorTokens,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    /// Creates an empty session with the standard operator labels
    #[must_use]
    pub fn new() -> Self {
        Self::with_labels(StandardLabels)
    }
}

impl<L: OperatorLabels> CalculatorSession<L> {
    /// Creates an empty session that renders operators with `labels`
    #[must_use]
    pub fn with_labels(labels: L) -> Self {
        Self::with_config(labels, &CalculatorConfig::default())
    }

    /// Creates an empty session using the error tokens from `config`
    #[must_use]
    pub fn with_config(labels: L, config: &CalculatorConfig) -> Self {
        Self {
            entry: EntryText::new(),
            pending_operator: None,
            pending_operand: None,
            expression_trace: String::new(),
            display: String::new(),
            labels,
            tokens: config.error_tokens.clone(),
        }
    }

    /// The operand currently being typed
    #[must_use]
    pub fn entry(&self) -> &EntryText {
        &self.entry
    }

    /// The operator awaiting its right-hand operand
    #[must_use]
    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    /// The left-hand operand of the pending operation
    #[must_use]
    pub fn pending_operand(&self) -> Option<&EntryText> {
        self.pending_operand.as_ref()
    }

    /// The rendered in-progress or just-completed expression
    #[must_use]
    pub fn expression_trace(&self) -> &str {
        &self.expression_trace
    }

    /// The last live display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The operator labels in use
    #[must_use]
    pub fn labels(&self) -> &L {
        &self.labels
    }

    /// Dispatches a described action
    pub fn dispatch(&mut self, action: Action) -> Render {
        self.handle_action(action.kind, action.value)
    }

    /// Applies one action and returns the text to show
    pub fn handle_action(&mut self, kind: ActionKind, value: &str) -> Render {
        let render = match kind {
            ActionKind::Digit => self.enter_digit(value),
            ActionKind::Decimal => self.enter_decimal(),
            ActionKind::Clear => self.clear(),
            ActionKind::Delete => self.delete_last(),
            ActionKind::Equals => self.equals(),
            ActionKind::Add
            | ActionKind::Subtract
            | ActionKind::Multiply
            | ActionKind::Divide
            | ActionKind::Mod => match kind.operator() {
                Some(op) => self.choose_operator(op),
                None => self.unchanged(),
            },
        };
        self.display.clone_from(&render.display);
        render
    }

    fn unchanged(&self) -> Render {
        Render::display_only(&self.display)
    }

    fn enter_digit(&mut self, value: &str) -> Render {
        if value.len() != 1 || !value.bytes().all(|b| b.is_ascii_digit()) {
            debug!(value, "ignoring digit action without a single digit");
            return self.unchanged();
        }
        if self.entry.as_str() == "0" {
            self.entry.replace(value);
        } else {
            self.entry.push_str(value);
        }
        Render::display_only(self.entry.as_str())
    }

    fn enter_decimal(&mut self) -> Render {
        if self.entry.has_decimal_point() {
            debug!(entry = %self.entry, "ignoring second decimal point");
            return self.unchanged();
        }
        self.entry.push_str(".");
        Render::display_only(self.entry.as_str())
    }

    fn clear(&mut self) -> Render {
        self.entry.clear();
        self.pending_operator = None;
        self.pending_operand = None;
        self.expression_trace.clear();
        debug!("session cleared");
        Render {
            display: String::new(),
            history: Some(String::new()),
        }
    }

    fn delete_last(&mut self) -> Render {
        self.entry.pop();
        Render::display_only(self.entry.as_str())
    }

    fn choose_operator(&mut self, op: Operator) -> Render {
        if self.entry.is_empty() && self.pending_operand.is_none() {
            debug!(?op, "ignoring operator with nothing to operate on");
            return self.unchanged();
        }

        if !self.entry.is_empty() {
            let operand = match (self.pending_operand.take(), self.pending_operator) {
                (Some(prev), Some(pending)) => self.evaluate_to_entry(&prev, pending),
                _ => self.entry.clone(),
            };
            debug!(%operand, ?op, "operand committed");
            self.pending_operand = Some(operand);
            self.entry.clear();
        } else {
            debug!(?op, "operator replaced");
        }
        self.pending_operator = Some(op);

        let operand = self
            .pending_operand
            .as_ref()
            .map(EntryText::to_string)
            .unwrap_or_default();
        self.expression_trace = format!("{operand} {}", self.labels.label(op));
        Render {
            display: operand,
            history: Some(self.expression_trace.clone()),
        }
    }

    fn equals(&mut self) -> Render {
        let (Some(operand), Some(op)) = (self.pending_operand.as_ref(), self.pending_operator)
        else {
            debug!("ignoring equals without a pending operation");
            return self.unchanged();
        };
        if self.entry.is_empty() {
            debug!("ignoring equals without a second operand");
            return self.unchanged();
        }

        let trace = format!("{operand} {} {} =", self.labels.label(op), self.entry);
        let result = self.evaluate_to_entry(operand, op);
        debug!(%trace, %result, "evaluated");

        self.expression_trace = trace;
        self.entry = result;
        self.pending_operand = None;
        self.pending_operator = None;
        Render {
            display: self.entry.to_string(),
            history: Some(self.expression_trace.clone()),
        }
    }

    fn evaluate_to_entry(&self, prev: &EntryText, op: Operator) -> EntryText {
        match evaluate(prev.as_str(), op, self.entry.as_str()) {
            Ok(value) => EntryText::from(format_number(value)),
            Err(err) => {
                debug!(%err, "evaluation failed");
                EntryText::from(self.tokens.token_for(&err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn press_all(session: &mut CalculatorSession, actions: &[Action]) -> Render {
        actions
            .iter()
            .fold(Render::default(), |_, action| session.dispatch(*action))
    }

    fn typed(session: &mut CalculatorSession, text: &str) -> Render {
        let mut render = Render::default();
        for ch in text.chars() {
            render = match ch {
                '.' => session.dispatch(Action::decimal()),
                d => session.dispatch(Action::digit(d.to_digit(10).unwrap() as u8)),
            };
        }
        render
    }

    // ===== Construction =====

    #[test]
    fn test_new_session_is_empty() {
        let session = CalculatorSession::new();
        assert!(session.entry().is_empty());
        assert_eq!(session.pending_operator(), None);
        assert_eq!(session.pending_operand(), None);
        assert_eq!(session.expression_trace(), "");
        assert_eq!(session.display(), "");
    }

    #[test]
    fn test_default_matches_new() {
        let session = CalculatorSession::default();
        assert!(session.entry().is_empty());
    }

    // ===== Digit / Decimal =====

    #[test]
    fn test_digits_append() {
        let mut session = CalculatorSession::new();
        let render = typed(&mut session, "123");
        assert_eq!(render.display, "123");
        assert_eq!(render.history, None);
    }

    #[test]
    fn test_zero_on_empty_becomes_zero() {
        let mut session = CalculatorSession::new();
        let render = session.dispatch(Action::digit(0));
        assert_eq!(render.display, "0");
        assert_eq!(session.entry().as_str(), "0");
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "0");
        let render = session.dispatch(Action::digit(7));
        assert_eq!(render.display, "7");
    }

    #[test]
    fn test_repeated_zero_stays_single() {
        let mut session = CalculatorSession::new();
        assert_eq!(typed(&mut session, "000").display, "0");
    }

    #[test]
    fn test_decimal_after_zero_keeps_zero() {
        let mut session = CalculatorSession::new();
        assert_eq!(typed(&mut session, "0.5").display, "0.5");
    }

    #[test]
    fn test_decimal_on_empty() {
        let mut session = CalculatorSession::new();
        assert_eq!(session.dispatch(Action::decimal()).display, ".");
    }

    #[test]
    fn test_second_decimal_ignored() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "1.2");
        let render = session.dispatch(Action::decimal());
        assert_eq!(render.display, "1.2");
        assert_eq!(session.entry().as_str(), "1.2");
    }

    #[test]
    fn test_invalid_digit_value_ignored() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "4");
        let render = session.handle_action(ActionKind::Digit, "x");
        assert_eq!(render.display, "4");
        let render = session.handle_action(ActionKind::Digit, "12");
        assert_eq!(render.display, "4");
        assert_eq!(session.entry().as_str(), "4");
    }

    // ===== Clear / Delete =====

    #[test]
    fn test_clear_resets_everything() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "8");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "3");
        let render = session.dispatch(Action::clear());
        assert_eq!(
            render,
            Render {
                display: String::new(),
                history: Some(String::new()),
            }
        );
        assert!(session.entry().is_empty());
        assert_eq!(session.pending_operator(), None);
        assert_eq!(session.pending_operand(), None);
        assert_eq!(session.expression_trace(), "");
    }

    #[test]
    fn test_delete_to_empty() {
        let mut session = CalculatorSession::new();
        let render = press_all(
            &mut session,
            &[Action::digit(9), Action::delete(), Action::delete()],
        );
        assert_eq!(render.display, "");
        assert!(session.entry().is_empty());
    }

    #[test]
    fn test_delete_keeps_history() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "12");
        let render = session.dispatch(Action::delete());
        assert_eq!(render.display, "1");
        assert_eq!(render.history, None);
    }

    // ===== Operators =====

    #[test]
    fn test_operator_without_operand_ignored() {
        let mut session = CalculatorSession::new();
        let render = session.dispatch(Action::operator(Operator::Add));
        assert_eq!(render, Render::default());
        assert_eq!(session.pending_operator(), None);
        assert_eq!(session.pending_operand(), None);
    }

    #[test]
    fn test_first_operator_commits_entry() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "12.5");
        let render = session.dispatch(Action::operator(Operator::Add));
        assert_eq!(render.display, "12.5");
        assert_eq!(render.history.as_deref(), Some("12.5 +"));
        assert_eq!(session.pending_operand().map(EntryText::as_str), Some("12.5"));
        assert_eq!(session.pending_operator(), Some(Operator::Add));
        assert!(session.entry().is_empty());
    }

    #[test]
    fn test_trailing_point_kept_in_trace() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "3.");
        let render = session.dispatch(Action::operator(Operator::Multiply));
        assert_eq!(render.history.as_deref(), Some("3. ×"));
    }

    #[test]
    fn test_operator_switch_before_second_operand() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "6");
        session.dispatch(Action::operator(Operator::Add));
        let render = session.dispatch(Action::operator(Operator::Divide));
        assert_eq!(session.pending_operator(), Some(Operator::Divide));
        assert_eq!(session.pending_operand().map(EntryText::as_str), Some("6"));
        assert_eq!(render.history.as_deref(), Some("6 ÷"));
    }

    #[test]
    fn test_chained_operator_collapses_left_to_right() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "2");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "3");
        let render = session.dispatch(Action::operator(Operator::Multiply));
        assert_eq!(render.display, "5");
        assert_eq!(render.history.as_deref(), Some("5 ×"));
    }

    // ===== Equals =====

    #[test]
    fn test_no_precedence() {
        let mut session = CalculatorSession::new();
        let render = press_all(
            &mut session,
            &[
                Action::digit(2),
                Action::operator(Operator::Add),
                Action::digit(3),
                Action::operator(Operator::Multiply),
                Action::digit(4),
                Action::equals(),
            ],
        );
        assert_eq!(render.display, "20");
        assert_eq!(render.history.as_deref(), Some("5 × 4 ="));
    }

    #[test]
    fn test_decimal_addition() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "12.5");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "7");
        let render = session.dispatch(Action::equals());
        assert_eq!(render.display, "19.5");
        assert_eq!(render.history.as_deref(), Some("12.5 + 7 ="));
    }

    #[test]
    fn test_equals_clears_pending_and_keeps_result() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "9");
        session.dispatch(Action::operator(Operator::Subtract));
        typed(&mut session, "4");
        session.dispatch(Action::equals());
        assert_eq!(session.entry().as_str(), "5");
        assert_eq!(session.pending_operand(), None);
        assert_eq!(session.pending_operator(), None);
    }

    #[test]
    fn test_result_chains_into_next_operator() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "9");
        session.dispatch(Action::operator(Operator::Subtract));
        typed(&mut session, "4");
        session.dispatch(Action::equals());
        session.dispatch(Action::operator(Operator::Multiply));
        typed(&mut session, "3");
        assert_eq!(session.dispatch(Action::equals()).display, "15");
    }

    #[test]
    fn test_digits_after_result_append() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "2");
        session.dispatch(Action::operator(Operator::Multiply));
        typed(&mut session, "3");
        session.dispatch(Action::equals());
        assert_eq!(typed(&mut session, "1").display, "61");
    }

    #[test]
    fn test_equals_without_operator_ignored() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "5");
        let render = session.dispatch(Action::equals());
        assert_eq!(render.display, "5");
        assert_eq!(render.history, None);
        assert_eq!(session.entry().as_str(), "5");
    }

    #[test]
    fn test_equals_without_second_operand_ignored() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "5");
        session.dispatch(Action::operator(Operator::Add));
        let render = session.dispatch(Action::equals());
        assert_eq!(render.display, "5");
        assert_eq!(session.pending_operator(), Some(Operator::Add));
    }

    #[test]
    fn test_repeated_equals_is_noop() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "5");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "5");
        session.dispatch(Action::equals());
        let render = session.dispatch(Action::equals());
        assert_eq!(render.display, "10");
        assert_eq!(render.history, None);
        assert_eq!(session.expression_trace(), "5 + 5 =");
    }

    #[test]
    fn test_float_artifacts_visible() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "0.1");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "0.2");
        assert_eq!(
            session.dispatch(Action::equals()).display,
            "0.30000000000000004"
        );
    }

    #[test]
    fn test_modulo() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "17");
        session.dispatch(Action::operator(Operator::Modulo));
        typed(&mut session, "5");
        let render = session.dispatch(Action::equals());
        assert_eq!(render.display, "2");
        assert_eq!(render.history.as_deref(), Some("17 % 5 ="));
    }

    // ===== Errors =====

    #[test]
    fn test_division_by_zero_token() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "5");
        session.dispatch(Action::operator(Operator::Divide));
        typed(&mut session, "0");
        let render = session.dispatch(Action::equals());
        assert_eq!(render.display, "Error: Div by 0");
        assert_eq!(render.history.as_deref(), Some("5 ÷ 0 ="));
    }

    #[test]
    fn test_parse_error_token() {
        let mut session = CalculatorSession::new();
        session.dispatch(Action::decimal());
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "1");
        assert_eq!(session.dispatch(Action::equals()).display, "Error");
    }

    #[test]
    fn test_error_token_poisons_further_arithmetic() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "5");
        session.dispatch(Action::operator(Operator::Divide));
        typed(&mut session, "0");
        let render = session.dispatch(Action::operator(Operator::Add));
        assert_eq!(render.display, "Error: Div by 0");
        assert_eq!(render.history.as_deref(), Some("Error: Div by 0 +"));
        typed(&mut session, "1");
        assert_eq!(session.dispatch(Action::equals()).display, "Error");
    }

    #[test]
    fn test_clear_recovers_from_error() {
        let mut session = CalculatorSession::new();
        typed(&mut session, "5");
        session.dispatch(Action::operator(Operator::Divide));
        typed(&mut session, "0");
        session.dispatch(Action::equals());
        session.dispatch(Action::clear());
        typed(&mut session, "2");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "2");
        assert_eq!(session.dispatch(Action::equals()).display, "4");
    }

    #[test]
    fn test_custom_tokens_from_config() {
        let mut config = CalculatorConfig::default();
        config.error_tokens.division_by_zero = "undefined".to_string();
        let mut session = CalculatorSession::with_config(StandardLabels, &config);
        session.dispatch(Action::digit(1));
        session.dispatch(Action::operator(Operator::Divide));
        session.dispatch(Action::digit(0));
        assert_eq!(session.dispatch(Action::equals()).display, "undefined");
    }

    // ===== Exponent results =====

    fn session_showing_1e21() -> CalculatorSession {
        let mut session = CalculatorSession::new();
        typed(&mut session, "10000000");
        session.dispatch(Action::operator(Operator::Multiply));
        typed(&mut session, "10000000");
        session.dispatch(Action::operator(Operator::Multiply));
        typed(&mut session, "10000000");
        assert_eq!(session.dispatch(Action::equals()).display, "1e+21");
        session
    }

    #[test]
    fn test_point_after_exponent_result_still_evaluates() {
        let mut session = session_showing_1e21();
        assert_eq!(session.dispatch(Action::decimal()).display, "1e+21.");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "1");
        let render = session.dispatch(Action::equals());
        assert_eq!(render.history.as_deref(), Some("1e+21. + 1 ="));
        assert_eq!(render.display, "1e+21");
    }

    #[test]
    fn test_truncated_exponent_reads_mantissa() {
        let mut session = session_showing_1e21();
        session.dispatch(Action::delete());
        assert_eq!(session.dispatch(Action::delete()).display, "1e+");
        session.dispatch(Action::operator(Operator::Add));
        typed(&mut session, "1");
        let render = session.dispatch(Action::equals());
        assert_eq!(render.history.as_deref(), Some("1e+ + 1 ="));
        assert_eq!(render.display, "2");
    }

    // ===== Labels =====

    struct WordLabels;

    impl OperatorLabels for WordLabels {
        fn label(&self, op: Operator) -> Cow<'_, str> {
            Cow::Owned(op.data_action().to_uppercase())
        }
    }

    #[test]
    fn test_custom_labels_in_trace() {
        let mut session = CalculatorSession::with_labels(WordLabels);
        session.dispatch(Action::digit(4));
        session.dispatch(Action::operator(Operator::Multiply));
        session.dispatch(Action::digit(2));
        let render = session.dispatch(Action::equals());
        assert_eq!(render.history.as_deref(), Some("4 MULTIPLY 2 ="));
    }
}
