//! Decimal values and the precision policy for approximate results.
//!
//! Stack values are `rust_decimal::Decimal`: exact base-10 numbers with a
//! 96-bit mantissa and up to 28 fractional digits. Addition, subtraction,
//! multiplication, squaring and negation are exact or they fail: a result
//! the library would have to round (more than 28 fractional or significant
//! digits) is checked against exact rational arithmetic by [`exact`] and
//! refused. Division, reciprocal and square root cannot always be exact,
//! so their results are rounded to a fixed number of fractional digits
//! with an explicit rounding mode (see [`Precision`]).
//!
//! Every value the engine stores is normalized: trailing fractional zeros
//! are stripped and negative zero becomes zero. `2`, `2.0` and `2.00`
//! display identically and compare equal.

use num_bigint::BigInt;
use num_rational::BigRational;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CalcError, Result};

/// The exact decimal type held on the operand stack.
pub type CalcValue = Decimal;

/// Largest number of fractional digits a `CalcValue` can carry.
pub const MAX_SCALE: u32 = 28;

/// Fractional digits used for approximate results unless configured otherwise.
pub const DEFAULT_SCALE: u32 = 16;

/// Rounding mode applied when a result has to be cut to a fixed scale.
///
/// # Examples
///
/// ```rust
/// use upncalc::numeric::{Precision, Rounding};
/// use std::str::FromStr;
///
/// let value = rust_decimal::Decimal::from_str("2.5").unwrap();
/// assert_eq!(Precision::new(0, Rounding::HalfUp).round(value).to_string(), "3");
/// assert_eq!(Precision::new(0, Rounding::HalfEven).round(value).to_string(), "2");
/// assert_eq!(Precision::new(0, Rounding::Down).round(value).to_string(), "2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Ties round away from zero (`0.5` → `1`, `-0.5` → `-1`).
    #[default]
    HalfUp,
    /// Ties round to the even neighbour (banker's rounding).
    HalfEven,
    /// Truncate toward zero.
    Down,
}

impl Rounding {
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Rounding::HalfEven => RoundingStrategy::MidpointNearestEven,
            Rounding::Down => RoundingStrategy::ToZero,
        }
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rounding::HalfUp => "half-up",
            Rounding::HalfEven => "half-even",
            Rounding::Down => "down",
        };
        f.write_str(name)
    }
}

/// A fixed number of fractional digits paired with a rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precision {
    scale: u32,
    rounding: Rounding,
}

impl Precision {
    /// Create a precision policy.
    ///
    /// Scales above [`MAX_SCALE`] are clamped to it.
    pub fn new(scale: u32, rounding: Rounding) -> Self {
        Self {
            scale: scale.min(MAX_SCALE),
            rounding,
        }
    }

    /// Number of fractional digits kept.
    pub fn scale(self) -> u32 {
        self.scale
    }

    /// Rounding mode used to cut extra digits.
    pub fn rounding(self) -> Rounding {
        self.rounding
    }

    /// Round `value` to this precision and normalize it.
    pub fn round(self, value: CalcValue) -> CalcValue {
        normalize(value.round_dp_with_strategy(self.scale, self.rounding.strategy()))
    }

    /// Divide `dividend` by `divisor`, rounding the quotient to this precision.
    ///
    /// The divisor must already be known to be non-zero; a `None` return
    /// therefore means the quotient is out of range.
    pub fn divide(self, dividend: CalcValue, divisor: CalcValue) -> Option<CalcValue> {
        dividend.checked_div(divisor).map(|q| self.round(q))
    }

    /// Square root of a non-negative `value`, rounded to this precision.
    ///
    /// Returns `None` for negative input.
    pub fn sqrt(self, value: CalcValue) -> Option<CalcValue> {
        value.sqrt().map(|root| self.round(root))
    }

    /// π rounded to this precision.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use upncalc::numeric::{Precision, Rounding};
    ///
    /// let pi = Precision::new(4, Rounding::HalfUp).pi();
    /// assert_eq!(pi.to_string(), "3.1416");
    /// ```
    pub fn pi(self) -> CalcValue {
        self.round(Decimal::PI)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::new(DEFAULT_SCALE, Rounding::default())
    }
}

/// Strip trailing fractional zeros and turn `-0` into `0`.
///
/// # Examples
///
/// ```rust
/// use upncalc::numeric::normalize;
/// use std::str::FromStr;
///
/// let value = rust_decimal::Decimal::from_str("2.500").unwrap();
/// assert_eq!(normalize(value).to_string(), "2.5");
/// ```
pub fn normalize(value: CalcValue) -> CalcValue {
    value.normalize()
}

/// The exact rational value of `value`.
fn to_ratio(value: CalcValue) -> BigRational {
    BigRational::new(
        BigInt::from(value.mantissa()),
        BigInt::from(10u32).pow(value.scale()),
    )
}

/// Accept a computed `result` only if it equals `expected` exactly.
///
/// `result` is what `Decimal`'s checked arithmetic returned for
/// `operation`, `expected` the same operation carried out on
/// [`BigRational`]s. `None` means the library overflowed.
///
/// # Errors
///
/// * `Overflow` - `result` is `None`
/// * `Inexact` - the library rounded the result
fn verify(
    operation: &'static str,
    result: Option<CalcValue>,
    expected: BigRational,
) -> Result<CalcValue> {
    let value = result.ok_or(CalcError::Overflow { operation })?;
    if to_ratio(value) != expected {
        return Err(CalcError::Inexact { operation });
    }
    Ok(normalize(value))
}

/// Exact arithmetic on stack values.
///
/// # Examples
///
/// ```rust
/// use upncalc::numeric::exact;
/// use upncalc::CalcError;
/// use std::str::FromStr;
///
/// let tiny = rust_decimal::Decimal::from_str("0.0000000000000001").unwrap();
/// assert_eq!(
///     exact::mul("*", tiny, tiny),
///     Err(CalcError::Inexact { operation: "*" })
/// );
/// ```
pub mod exact {
    use super::{to_ratio, verify, CalcValue};
    use crate::error::Result;

    /// `a + b`, or an error if it cannot be represented exactly.
    pub fn add(operation: &'static str, a: CalcValue, b: CalcValue) -> Result<CalcValue> {
        verify(operation, a.checked_add(b), to_ratio(a) + to_ratio(b))
    }

    /// `a - b`, or an error if it cannot be represented exactly.
    pub fn sub(operation: &'static str, a: CalcValue, b: CalcValue) -> Result<CalcValue> {
        verify(operation, a.checked_sub(b), to_ratio(a) - to_ratio(b))
    }

    /// `a * b`, or an error if it cannot be represented exactly.
    pub fn mul(operation: &'static str, a: CalcValue, b: CalcValue) -> Result<CalcValue> {
        verify(operation, a.checked_mul(b), to_ratio(a) * to_ratio(b))
    }
}

/// Parse a decimal literal such as `42`, `-0.5` or `3.`.
///
/// Literals with more digits than a `CalcValue` can hold are rejected
/// rather than silently rounded.
///
/// # Examples
///
/// ```rust
/// use upncalc::numeric::parse_value;
///
/// assert_eq!(parse_value("-0.50").unwrap().to_string(), "-0.5");
/// assert!(parse_value("1.2.3").is_err());
/// ```
pub fn parse_value(text: &str) -> Result<CalcValue> {
    let trimmed = text.trim();
    let literal = trimmed.strip_suffix('.').unwrap_or(trimmed);
    let is_numeric = !literal.is_empty()
        && literal
            .strip_prefix('-')
            .unwrap_or(literal)
            .chars()
            .any(|c| c.is_ascii_digit());
    if !is_numeric {
        return Err(CalcError::InvalidInput(text.to_string()));
    }
    Decimal::from_str_exact(literal)
        .map(normalize)
        .map_err(|_| CalcError::InvalidInput(text.to_string()))
}
