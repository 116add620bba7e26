//! Calculator engine module.
//!
//! Provides `CalculatorEngine`, the operand stack of an RPN calculator.
//! It applies operators to the top of the stack and keeps a single-level
//! undo snapshot taken before every mutating call.

use crate::config::EngineConfig;
use crate::error::{CalcError, Result};
use crate::numeric::{normalize, CalcValue};
use crate::operator::{BinaryOperator, UnaryOperator};
use crate::snapshot::StackSnapshot;

/// The RPN calculator engine.
///
/// The engine owns:
/// 1. The operand stack (bottom to top, top = last pushed)
/// 2. At most one undo snapshot
/// 3. The precision configuration for approximate operations
///
/// A failed operation never changes the stack and never replaces the
/// undo snapshot.
///
/// # Examples
///
/// ```rust
/// use upncalc::*;
///
/// let mut engine = CalculatorEngine::new();
/// engine.push(CalcValue::from(3));
/// engine.push(CalcValue::from(4));
///
/// let sum = engine.apply_binary(BinaryOperator::Add).unwrap();
/// assert_eq!(sum, CalcValue::from(7));
/// assert_eq!(engine.len(), 1);
///
/// engine.undo();
/// assert_eq!(engine.peek_all(), &[CalcValue::from(3), CalcValue::from(4)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    /// Operand stack, bottom to top.
    stack: Vec<CalcValue>,

    /// Stack contents before the last mutating call.
    snapshot: Option<StackSnapshot>,

    /// Precision policy.
    config: EngineConfig,
}

impl CalculatorEngine {
    /// Create an empty engine with the default configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upncalc::CalculatorEngine;
    ///
    /// let engine = CalculatorEngine::new();
    /// assert!(engine.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty engine with a validated configuration.
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` - a scale is larger than the decimal type supports
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            stack: Vec::new(),
            snapshot: None,
            config,
        })
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Push a value onto the top of the stack.
    ///
    /// The value is normalized first. Always succeeds and can be undone.
    pub fn push(&mut self, value: CalcValue) {
        self.capture("push");
        self.stack.push(normalize(value));
    }

    /// Remove and return the top value.
    ///
    /// Returns `None` on an empty stack; nothing changes in that case and
    /// the undo snapshot is kept. A successful pop can be undone.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upncalc::{CalcValue, CalculatorEngine};
    ///
    /// let mut engine = CalculatorEngine::new();
    /// assert_eq!(engine.pop(), None);
    ///
    /// engine.push(CalcValue::from(5));
    /// assert_eq!(engine.pop(), Some(CalcValue::from(5)));
    /// engine.undo();
    /// assert_eq!(engine.peek(), Some(CalcValue::from(5)));
    /// ```
    pub fn pop(&mut self) -> Option<CalcValue> {
        if self.stack.is_empty() {
            return None;
        }
        self.capture("pop");
        self.stack.pop()
    }

    /// Remove the top value ("CE"). Same contract as [`pop`](Self::pop).
    pub fn clear_top(&mut self) -> Option<CalcValue> {
        self.pop()
    }

    /// Empty the stack ("C").
    ///
    /// Clearing is not undoable: the undo snapshot is discarded as well.
    pub fn clear_all(&mut self) {
        self.stack.clear();
        self.snapshot = None;
    }

    /// The top value, without removing it.
    pub fn peek(&self) -> Option<CalcValue> {
        self.stack.last().copied()
    }

    /// The whole stack, bottom to top, for display.
    pub fn peek_all(&self) -> &[CalcValue] {
        &self.stack
    }

    /// Number of values on the stack.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the stack is empty.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Apply a binary operator to the top two values.
    ///
    /// With `b` on top and `a` below it, both are replaced by `a op b`,
    /// which is also returned.
    ///
    /// # Errors
    ///
    /// * `InsufficientOperands` - fewer than two values on the stack
    /// * `DivisionByZero` - dividing by zero; both operands stay on the stack
    /// * `Overflow` - the result is outside the decimal range
    /// * `Inexact` - an exact result needs more than 28 digits
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upncalc::*;
    ///
    /// let mut engine = CalculatorEngine::new();
    /// engine.push(CalcValue::from(2));
    /// engine.push(CalcValue::ZERO);
    ///
    /// let err = engine.apply_binary(BinaryOperator::Divide).unwrap_err();
    /// assert!(matches!(err, CalcError::DivisionByZero { .. }));
    /// assert_eq!(engine.peek_all(), &[CalcValue::from(2), CalcValue::ZERO]);
    /// ```
    pub fn apply_binary(&mut self, op: BinaryOperator) -> Result<CalcValue> {
        self.require(op.symbol(), 2)?;
        let len = self.stack.len();
        let (a, b) = (self.stack[len - 2], self.stack[len - 1]);
        let result = op.apply(a, b, &self.config)?;

        self.capture(op.symbol());
        self.stack.truncate(len - 2);
        self.stack.push(result);
        Ok(result)
    }

    /// Apply a unary operator to the top value.
    ///
    /// The top value is replaced by the result, which is also returned.
    ///
    /// # Errors
    ///
    /// * `InsufficientOperands` - the stack is empty
    /// * `InvalidOperand` - square root of a negative value; the stack is unchanged
    /// * `DivisionByZero` - reciprocal of zero; the stack is unchanged
    /// * `Overflow` - the result is outside the decimal range
    /// * `Inexact` - an exact result needs more than 28 digits
    pub fn apply_unary(&mut self, op: UnaryOperator) -> Result<CalcValue> {
        self.require(op.symbol(), 1)?;
        let len = self.stack.len();
        let result = op.apply(self.stack[len - 1], &self.config)?;

        self.capture(op.symbol());
        self.stack[len - 1] = result;
        Ok(result)
    }

    /// Add the top two values.
    pub fn add(&mut self) -> Result<CalcValue> {
        self.apply_binary(BinaryOperator::Add)
    }

    /// Subtract the top value from the one below it.
    pub fn subtract(&mut self) -> Result<CalcValue> {
        self.apply_binary(BinaryOperator::Subtract)
    }

    /// Multiply the top two values.
    pub fn multiply(&mut self) -> Result<CalcValue> {
        self.apply_binary(BinaryOperator::Multiply)
    }

    /// Divide the second value by the top value.
    pub fn divide(&mut self) -> Result<CalcValue> {
        self.apply_binary(BinaryOperator::Divide)
    }

    /// Square the top value.
    pub fn square(&mut self) -> Result<CalcValue> {
        self.apply_unary(UnaryOperator::Square)
    }

    /// Replace the top value by its square root.
    pub fn square_root(&mut self) -> Result<CalcValue> {
        self.apply_unary(UnaryOperator::SquareRoot)
    }

    /// Replace the top value by its reciprocal.
    pub fn reciprocal(&mut self) -> Result<CalcValue> {
        self.apply_unary(UnaryOperator::Reciprocal)
    }

    /// The constant π at the configured precision.
    ///
    /// Does not touch the stack; the caller decides whether to push it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upncalc::CalculatorEngine;
    ///
    /// let engine = CalculatorEngine::new();
    /// assert_eq!(engine.pi().to_string(), "3.1415926535897932");
    /// assert!(engine.is_empty());
    /// ```
    pub fn pi(&self) -> CalcValue {
        self.config.pi().pi()
    }

    /// Restore the stack saved before the last mutating call.
    ///
    /// The snapshot is consumed, so a second consecutive undo does nothing.
    /// Returns whether a snapshot was restored.
    pub fn undo(&mut self) -> bool {
        match self.snapshot.take() {
            Some(snapshot) => {
                self.stack = snapshot.into_values();
                true
            }
            None => false,
        }
    }

    /// Whether an undo snapshot is pending.
    pub fn can_undo(&self) -> bool {
        self.snapshot.is_some()
    }

    /// The pending undo snapshot, if any.
    pub fn snapshot(&self) -> Option<&StackSnapshot> {
        self.snapshot.as_ref()
    }

    /// Save the current stack, replacing any previous snapshot.
    fn capture(&mut self, operation: &str) {
        self.snapshot = Some(StackSnapshot::new(operation, self.stack.clone()));
    }

    /// Check that `required` operands are available for `operation`.
    fn require(&self, operation: &'static str, required: usize) -> Result<()> {
        let available = self.stack.len();
        if available < required {
            return Err(CalcError::InsufficientOperands {
                operation,
                required,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Rounding;
    use std::str::FromStr;

    fn d(s: &str) -> CalcValue {
        CalcValue::from_str(s).unwrap()
    }

    fn engine_with(values: &[&str]) -> CalculatorEngine {
        let mut engine = CalculatorEngine::new();
        for v in values {
            engine.push(d(v));
        }
        engine
    }

    #[test]
    fn test_push_and_peek_all() {
        let engine = engine_with(&["1", "2", "3"]);
        assert_eq!(engine.peek_all(), &[d("1"), d("2"), d("3")]);
        assert_eq!(engine.peek(), Some(d("3")));
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn test_push_normalizes() {
        let engine = engine_with(&["2.500"]);
        assert_eq!(engine.peek().unwrap().to_string(), "2.5");
    }

    #[test]
    fn test_operand_order() {
        let mut engine = engine_with(&["10", "4"]);
        assert_eq!(engine.subtract().unwrap(), d("6"));

        let mut engine = engine_with(&["10", "4"]);
        assert_eq!(engine.divide().unwrap(), d("2.5"));
    }

    #[test]
    fn test_binary_keeps_lower_values() {
        let mut engine = engine_with(&["1", "2", "3"]);
        engine.multiply().unwrap();
        assert_eq!(engine.peek_all(), &[d("1"), d("6")]);
    }

    #[test]
    fn test_insufficient_operands() {
        let mut engine = engine_with(&["1"]);
        let err = engine.add().unwrap_err();
        assert_eq!(
            err,
            CalcError::InsufficientOperands {
                operation: "+",
                required: 2,
                available: 1,
            }
        );
        assert_eq!(engine.peek_all(), &[d("1")]);

        let mut empty = CalculatorEngine::new();
        assert!(matches!(
            empty.square(),
            Err(CalcError::InsufficientOperands { required: 1, available: 0, .. })
        ));
    }

    #[test]
    fn test_failed_operation_keeps_snapshot() {
        let mut engine = engine_with(&["2", "0"]);
        let before = engine.snapshot().cloned();
        assert!(engine.divide().is_err());
        assert_eq!(engine.snapshot().cloned(), before);

        // Undo still reverts the last successful push.
        assert!(engine.undo());
        assert_eq!(engine.peek_all(), &[d("2")]);
    }

    #[test]
    fn test_square_root_negative_unchanged() {
        let mut engine = engine_with(&["-9"]);
        assert!(matches!(
            engine.square_root(),
            Err(CalcError::InvalidOperand { .. })
        ));
        assert_eq!(engine.peek_all(), &[d("-9")]);
    }

    #[test]
    fn test_reciprocal_of_zero_unchanged() {
        let mut engine = engine_with(&["0"]);
        assert!(matches!(
            engine.reciprocal(),
            Err(CalcError::DivisionByZero { operation: "1/x" })
        ));
        assert_eq!(engine.peek_all(), &[d("0")]);
    }

    #[test]
    fn test_undo_is_single_level() {
        let mut engine = engine_with(&["3", "4"]);
        engine.add().unwrap();
        assert!(engine.undo());
        assert_eq!(engine.peek_all(), &[d("3"), d("4")]);

        // Snapshot consumed: a second undo changes nothing.
        assert!(!engine.undo());
        assert_eq!(engine.peek_all(), &[d("3"), d("4")]);
    }

    #[test]
    fn test_undo_without_snapshot() {
        let mut engine = CalculatorEngine::new();
        assert!(!engine.can_undo());
        assert!(!engine.undo());
        assert!(engine.is_empty());
    }

    #[test]
    fn test_pop_empty_keeps_snapshot() {
        let mut engine = engine_with(&["1"]);
        engine.pop();
        assert_eq!(engine.pop(), None);
        assert_eq!(engine.snapshot().unwrap().operation, "pop");
        engine.undo();
        assert_eq!(engine.peek_all(), &[d("1")]);
    }

    #[test]
    fn test_clear_all_is_not_undoable() {
        let mut engine = engine_with(&["1", "2"]);
        engine.clear_all();
        assert!(engine.is_empty());
        assert!(!engine.undo());
        assert!(engine.is_empty());
    }

    #[test]
    fn test_snapshot_records_operation() {
        let mut engine = engine_with(&["16"]);
        engine.square_root().unwrap();
        let snapshot = engine.snapshot().unwrap();
        assert_eq!(snapshot.operation, "√");
        assert_eq!(snapshot.values, vec![d("16")]);
    }

    #[test]
    fn test_with_config() {
        let config = EngineConfig {
            division_scale: 2,
            sqrt_scale: 3,
            pi_scale: 2,
            rounding: Rounding::HalfUp,
        };
        let mut engine = CalculatorEngine::with_config(config).unwrap();
        assert_eq!(engine.pi(), d("3.14"));

        engine.push(d("2"));
        engine.push(d("3"));
        assert_eq!(engine.divide().unwrap(), d("0.67"));

        engine.push(d("2"));
        assert_eq!(engine.square_root().unwrap(), d("1.414"));
    }

    #[test]
    fn test_with_invalid_config() {
        let config = EngineConfig {
            division_scale: 30,
            ..EngineConfig::default()
        };
        assert!(CalculatorEngine::with_config(config).is_err());
    }

    #[test]
    fn test_engine_usable_after_error() {
        let mut engine = engine_with(&["5", "0"]);
        assert!(engine.divide().is_err());
        assert_eq!(engine.add().unwrap(), d("5"));
    }
}
