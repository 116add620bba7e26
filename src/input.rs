//! Pending input module.
//!
//! `InputLine` is the text a user is typing before it becomes a stack
//! value. It only ever holds something that is, or can grow into, a
//! decimal literal: digits, at most one decimal point and an optional
//! leading minus sign.

use std::fmt;

use crate::error::Result;
use crate::numeric::{parse_value, CalcValue};

/// The pending numeric input of a calculator session.
///
/// # Examples
///
/// ```rust
/// use upncalc::InputLine;
///
/// let mut input = InputLine::new();
/// for c in "12.5".chars() {
///     input.push_char(c);
/// }
/// input.toggle_sign();
/// assert_eq!(input.as_str(), "-12.5");
///
/// let value = input.take().unwrap().unwrap();
/// assert_eq!(value.to_string(), "-12.5");
/// assert!(input.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputLine {
    text: String,
}

impl InputLine {
    /// Create an empty input line.
    pub fn new() -> Self {
        Self::default()
    }

    /// The text typed so far.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether nothing has been typed.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether `c` may be appended to the current text.
    ///
    /// Only digits and a decimal point are accepted. A decimal point is
    /// refused when there is already one, or when no digit precedes it.
    pub fn accepts(&self, c: char) -> bool {
        match c {
            '0'..='9' => true,
            '.' => !self.text.contains('.') && !self.digits().is_empty(),
            _ => false,
        }
    }

    /// Append a character if it is accepted; returns whether it was.
    ///
    /// A redundant leading zero is dropped (`07` becomes `7`), while
    /// `0` and `0.5` are kept.
    pub fn push_char(&mut self, c: char) -> bool {
        if !self.accepts(c) {
            return false;
        }
        self.text.push(c);
        self.remove_leading_zero();
        true
    }

    /// Remove the last character.
    pub fn backspace(&mut self) -> Option<char> {
        let removed = self.text.pop();
        if self.text == "-" {
            self.text.clear();
        }
        removed
    }

    /// Negate the typed value.
    ///
    /// Does nothing while the line is empty or holds only zeros.
    pub fn toggle_sign(&mut self) {
        if self.text.is_empty() {
            return;
        }
        if let Some(rest) = self.text.strip_prefix('-') {
            self.text = rest.to_string();
        } else if self.digits().chars().any(|c| ('1'..='9').contains(&c)) {
            self.text.insert(0, '-');
        }
    }

    /// Replace the text with the representation of `value`.
    pub fn set_value(&mut self, value: CalcValue) {
        self.text = value.to_string();
    }

    /// Discard the typed text.
    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Parse the typed text and clear the line.
    ///
    /// Returns `Ok(None)` when nothing was typed. On a parse error the
    /// text is kept so the user can correct it.
    pub fn take(&mut self) -> Result<Option<CalcValue>> {
        if self.text.is_empty() {
            return Ok(None);
        }
        let value = parse_value(&self.text)?;
        self.text.clear();
        Ok(Some(value))
    }

    /// The text without its sign.
    fn digits(&self) -> &str {
        self.text.strip_prefix('-').unwrap_or(&self.text)
    }

    fn remove_leading_zero(&mut self) {
        let negative = self.text.starts_with('-');
        let digits = self.digits();
        if digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.") {
            let trimmed = digits[1..].to_string();
            self.text = if negative {
                format!("-{}", trimmed)
            } else {
                trimmed
            };
        }
    }
}

impl fmt::Display for InputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputLine {
        let mut input = InputLine::new();
        for c in text.chars() {
            input.push_char(c);
        }
        input
    }

    #[test]
    fn test_only_digits_and_point() {
        let mut input = InputLine::new();
        assert!(!input.push_char('a'));
        assert!(!input.push_char('-'));
        assert!(input.push_char('4'));
        assert_eq!(input.as_str(), "4");
    }

    #[test]
    fn test_single_decimal_point() {
        let input = typed("1.2.3");
        assert_eq!(input.as_str(), "1.23");
    }

    #[test]
    fn test_no_leading_decimal_point() {
        let mut input = InputLine::new();
        assert!(!input.push_char('.'));
        assert!(input.is_empty());
    }

    #[test]
    fn test_leading_zero_removed() {
        assert_eq!(typed("07").as_str(), "7");
        assert_eq!(typed("007").as_str(), "7");
        assert_eq!(typed("0").as_str(), "0");
        assert_eq!(typed("0.05").as_str(), "0.05");
    }

    #[test]
    fn test_toggle_sign() {
        let mut input = typed("5");
        input.toggle_sign();
        assert_eq!(input.as_str(), "-5");
        input.toggle_sign();
        assert_eq!(input.as_str(), "5");

        let mut zero = typed("0.0");
        zero.toggle_sign();
        assert_eq!(zero.as_str(), "0.0");

        let mut empty = InputLine::new();
        empty.toggle_sign();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_negative_leading_zero() {
        let mut input = typed("5");
        input.toggle_sign();
        input.backspace();
        assert!(input.is_empty());

        let mut input = typed("0.5");
        input.toggle_sign();
        assert_eq!(input.as_str(), "-0.5");
    }

    #[test]
    fn test_take() {
        let mut input = typed("3.");
        assert_eq!(input.take().unwrap(), Some(CalcValue::from(3)));
        assert!(input.is_empty());
        assert_eq!(input.take().unwrap(), None);
    }

    #[test]
    fn test_set_value() {
        let mut input = typed("12");
        input.set_value(CalcValue::new(-25, 1));
        assert_eq!(input.as_str(), "-2.5");
        assert_eq!(input.to_string(), "-2.5");
    }
}
