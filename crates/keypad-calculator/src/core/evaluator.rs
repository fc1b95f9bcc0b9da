//! Pure arithmetic over operand text
//!
//! `evaluate(prev, op, current)` parses both operands, applies one binary
//! operator with plain `f64` semantics and returns the value. Nothing here
//! holds state; the same inputs always give the same output.

use tracing::trace;

use crate::core::{CalcError, CalcResult, EntryText, Operator};

/// Outcome of evaluating an operator given by name
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The operator was known and produced a value
    Number(f64),
    /// The operator name was not recognised; the current operand passes through
    Unchanged(String),
}

impl Evaluation {
    /// Renders the outcome as operand text
    #[must_use]
    pub fn to_entry(&self) -> EntryText {
        match self {
            Self::Number(value) => EntryText::from(format_number(*value)),
            Self::Unchanged(text) => EntryText::from(text.as_str()),
        }
    }
}

/// Parses operand text as a locale-free decimal number.
///
/// Reads the longest numeric prefix after leading whitespace, so trailing
/// text is ignored: `"1e+21."` reads as `1e21`, `"1e+"` as `1` and
/// `"Infinity5"` as infinity. `"12."` and `".5"` are accepted. Text with no
/// numeric prefix is a [`CalcError::Parse`].
pub fn parse_operand(text: &str) -> CalcResult<f64> {
    numeric_prefix(text.trim_start())
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .filter(|value| !value.is_nan())
        .ok_or_else(|| CalcError::parse(text))
}

/// Normalized form of the leading number in `text`: optional sign, then
/// `Infinity` or digits with at most one point, then an optional exponent.
fn numeric_prefix(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    let sign = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            "-"
        }
        Some(b'+') => {
            pos += 1;
            ""
        }
        _ => "",
    };
    if text[pos..].starts_with("Infinity") {
        return Some(format!("{sign}inf"));
    }

    let int_len = digits_from(pos);
    let int_part = &text[pos..pos + int_len];
    pos += int_len;

    let mut frac_part = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_len = digits_from(pos + 1);
        frac_part = &text[pos + 1..pos + 1 + frac_len];
        pos += 1 + frac_len;
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut number = format!(
        "{sign}{}.{}",
        if int_part.is_empty() { "0" } else { int_part },
        if frac_part.is_empty() { "0" } else { frac_part },
    );

    // An exponent counts only when at least one digit follows it
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_sign = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                "-"
            }
            Some(b'+') => {
                exp_pos += 1;
                ""
            }
            _ => "",
        };
        let exp_len = digits_from(exp_pos);
        if exp_len > 0 {
            number.push('e');
            number.push_str(exp_sign);
            number.push_str(&text[exp_pos..exp_pos + exp_len]);
        }
    }
    Some(number)
}

/// Evaluates `prev op current`
pub fn evaluate(prev: &str, op: Operator, current: &str) -> CalcResult<f64> {
    let lhs = parse_operand(prev)?;
    let rhs = parse_operand(current)?;
    apply(lhs, op, rhs)
}

/// Evaluates an operator given by its `data-action` name.
///
/// Operands are parsed first, so bad operand text is reported even when the
/// name is unknown. An unknown name returns `current` unchanged.
pub fn evaluate_action(prev: &str, action: &str, current: &str) -> CalcResult<Evaluation> {
    let lhs = parse_operand(prev)?;
    let rhs = parse_operand(current)?;
    match Operator::from_data_action(action) {
        Some(op) => apply(lhs, op, rhs).map(Evaluation::Number),
        None => {
            trace!(action, "unknown operator, passing operand through");
            Ok(Evaluation::Unchanged(current.to_string()))
        }
    }
}

fn apply(lhs: f64, op: Operator, rhs: f64) -> CalcResult<f64> {
    let value = match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => {
            if rhs == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            lhs / rhs
        }
        // Truncating remainder; a zero divisor gives NaN
        Operator::Modulo => lhs % rhs,
    };
    trace!(lhs, rhs, ?op, value, "evaluated");
    Ok(value)
}

/// Formats a result the way a browser stringifies a double.
///
/// Shortest round-trip digits, no trailing `.0`, `-0` shown as `0`, and
/// exponent notation below `1e-6` or from `1e21` up.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{value}");
    }

    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}
