//! Calculator operators.
//!
//! Operators are pure functions of their operands: they compute a result
//! or report why they cannot, and never touch a stack. The engine decides
//! when to pop and push.

use std::fmt;
use std::str::FromStr;

use crate::config::EngineConfig;
use crate::error::{CalcError, Result};
use crate::numeric::{exact, normalize, CalcValue};

/// Operators that consume the top two stack values.
///
/// With `a` second-from-top and `b` on top, the result is `a op b`.
///
/// # Examples
///
/// ```rust
/// use upncalc::{BinaryOperator, CalcValue, EngineConfig};
///
/// let config = EngineConfig::default();
/// let a = CalcValue::from(7);
/// let b = CalcValue::from(2);
/// let result = BinaryOperator::Divide.apply(a, b, &config).unwrap();
/// assert_eq!(result.to_string(), "3.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `a + b`, exact.
    Add,
    /// `a - b`, exact.
    Subtract,
    /// `a * b`, exact.
    Multiply,
    /// `a / b`, rounded to the config's division precision.
    Divide,
}

impl BinaryOperator {
    /// Every binary operator, in keypad order.
    pub const ALL: [BinaryOperator; 4] = [
        BinaryOperator::Add,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
    ];

    /// Keypad symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }

    /// Compute `a op b`.
    ///
    /// Addition, subtraction and multiplication are exact; division is
    /// rounded with the config's division precision.
    ///
    /// # Errors
    ///
    /// * `DivisionByZero` - dividing by zero
    /// * `Overflow` - the result is outside the decimal range
    /// * `Inexact` - an exact result needs more than 28 digits
    pub fn apply(self, a: CalcValue, b: CalcValue, config: &EngineConfig) -> Result<CalcValue> {
        let operation = self.symbol();
        match self {
            BinaryOperator::Add => exact::add(operation, a, b),
            BinaryOperator::Subtract => exact::sub(operation, a, b),
            BinaryOperator::Multiply => exact::mul(operation, a, b),
            BinaryOperator::Divide => {
                if b.is_zero() {
                    return Err(CalcError::DivisionByZero { operation });
                }
                config
                    .division()
                    .divide(a, b)
                    .ok_or(CalcError::Overflow { operation })
            }
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "+" => Ok(BinaryOperator::Add),
            "-" => Ok(BinaryOperator::Subtract),
            "*" | "x" | "×" => Ok(BinaryOperator::Multiply),
            "/" | "÷" => Ok(BinaryOperator::Divide),
            other => Err(CalcError::InvalidInput(format!("unknown operator '{}'", other))),
        }
    }
}

/// Operators that replace the top stack value.
///
/// # Examples
///
/// ```rust
/// use upncalc::{CalcValue, EngineConfig, UnaryOperator};
///
/// let config = EngineConfig::default();
/// let result = UnaryOperator::Square.apply(CalcValue::from(5), &config).unwrap();
/// assert_eq!(result.to_string(), "25");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `a * a`, exact.
    Square,
    /// Square root, rounded to the config's square-root precision.
    SquareRoot,
    /// `1 / a`, rounded like division.
    Reciprocal,
    /// Sign change, exact.
    Negate,
}

impl UnaryOperator {
    /// Every unary operator, in keypad order.
    pub const ALL: [UnaryOperator; 4] = [
        UnaryOperator::Square,
        UnaryOperator::SquareRoot,
        UnaryOperator::Reciprocal,
        UnaryOperator::Negate,
    ];

    /// Keypad symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::Square => "x²",
            UnaryOperator::SquareRoot => "√",
            UnaryOperator::Reciprocal => "1/x",
            UnaryOperator::Negate => "±",
        }
    }

    /// Compute the operator on `a`.
    ///
    /// # Errors
    ///
    /// * `InvalidOperand` - square root of a negative number
    /// * `DivisionByZero` - reciprocal of zero
    /// * `Overflow` - the result is outside the decimal range
    /// * `Inexact` - the square needs more than 28 digits
    pub fn apply(self, a: CalcValue, config: &EngineConfig) -> Result<CalcValue> {
        let operation = self.symbol();
        let overflow = CalcError::Overflow { operation };
        match self {
            UnaryOperator::Square => exact::mul(operation, a, a),
            UnaryOperator::SquareRoot => {
                if a.is_sign_negative() && !a.is_zero() {
                    return Err(CalcError::InvalidOperand {
                        operation,
                        value: a,
                    });
                }
                config.sqrt().sqrt(a).ok_or(overflow)
            }
            UnaryOperator::Reciprocal => {
                if a.is_zero() {
                    return Err(CalcError::DivisionByZero { operation });
                }
                config.division().divide(CalcValue::ONE, a).ok_or(overflow)
            }
            UnaryOperator::Negate => Ok(normalize(-a)),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for UnaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "x²" | "sqr" => Ok(UnaryOperator::Square),
            "√" | "sqrt" => Ok(UnaryOperator::SquareRoot),
            "1/x" | "inv" => Ok(UnaryOperator::Reciprocal),
            "±" | "+/-" | "neg" => Ok(UnaryOperator::Negate),
            other => Err(CalcError::InvalidInput(format!("unknown operator '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> CalcValue {
        CalcValue::from_str(s).unwrap()
    }

    #[test]
    fn test_exact_arithmetic() {
        let config = EngineConfig::default();
        assert_eq!(
            BinaryOperator::Add.apply(d("0.1"), d("0.2"), &config).unwrap(),
            d("0.3")
        );
        assert_eq!(
            BinaryOperator::Subtract.apply(d("3"), d("4"), &config).unwrap(),
            d("-1")
        );
        assert_eq!(
            BinaryOperator::Multiply.apply(d("1.5"), d("1.5"), &config).unwrap(),
            d("2.25")
        );
    }

    #[test]
    fn test_results_are_normalized() {
        let config = EngineConfig::default();
        let product = BinaryOperator::Multiply
            .apply(d("2.50"), d("2.0"), &config)
            .unwrap();
        assert_eq!(product.to_string(), "5");
    }

    #[test]
    fn test_divide_by_zero() {
        let config = EngineConfig::default();
        let err = BinaryOperator::Divide.apply(d("2"), d("0.00"), &config).unwrap_err();
        assert_eq!(err, CalcError::DivisionByZero { operation: "/" });
    }

    #[test]
    fn test_overflow() {
        let config = EngineConfig::default();
        let err = BinaryOperator::Multiply
            .apply(CalcValue::MAX, d("2"), &config)
            .unwrap_err();
        assert_eq!(err, CalcError::Overflow { operation: "*" });
    }

    #[test]
    fn test_rounded_results_are_refused() {
        let config = EngineConfig::default();
        assert_eq!(
            BinaryOperator::Add.apply(d("10000000000000000000000000000"), d("0.1"), &config),
            Err(CalcError::Inexact { operation: "+" })
        );
        assert_eq!(
            BinaryOperator::Multiply.apply(d("0.0000000000000001"), d("0.0000000000000001"), &config),
            Err(CalcError::Inexact { operation: "*" })
        );
        assert_eq!(
            UnaryOperator::Square.apply(d("0.000000000000003"), &config),
            Err(CalcError::Inexact { operation: "x²" })
        );
    }

    #[test]
    fn test_square_root_of_negative() {
        let config = EngineConfig::default();
        let err = UnaryOperator::SquareRoot.apply(d("-4"), &config).unwrap_err();
        assert!(matches!(err, CalcError::InvalidOperand { operation: "√", .. }));
    }

    #[test]
    fn test_reciprocal() {
        let config = EngineConfig::default();
        assert_eq!(
            UnaryOperator::Reciprocal.apply(d("4"), &config).unwrap(),
            d("0.25")
        );
        assert_eq!(
            UnaryOperator::Reciprocal.apply(d("3"), &config).unwrap().to_string(),
            "0.3333333333333333"
        );
        assert!(matches!(
            UnaryOperator::Reciprocal.apply(d("0"), &config),
            Err(CalcError::DivisionByZero { .. })
        ));
    }

    #[test]
    fn test_negate() {
        let config = EngineConfig::default();
        assert_eq!(UnaryOperator::Negate.apply(d("5"), &config).unwrap(), d("-5"));
        assert_eq!(
            UnaryOperator::Negate.apply(d("0"), &config).unwrap().to_string(),
            "0"
        );
    }

    #[test]
    fn test_parse_operators() {
        for op in BinaryOperator::ALL {
            assert_eq!(op.symbol().parse::<BinaryOperator>().unwrap(), op);
        }
        for op in UnaryOperator::ALL {
            assert_eq!(op.symbol().parse::<UnaryOperator>().unwrap(), op);
        }
        assert!("%".parse::<BinaryOperator>().is_err());
        assert_eq!("sqrt".parse::<UnaryOperator>().unwrap(), UnaryOperator::SquareRoot);
    }
}
