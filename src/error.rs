//! Error types for calculator operations.
//!
//! Every failure the engine or the session can report is a variant of
//! `CalcError`. None of them is fatal: after any error the engine is left
//! exactly as it was before the failing call.

use crate::numeric::CalcValue;
use thiserror::Error;

/// Describe how many operands were found on the stack.
fn format_available(available: &usize) -> String {
    match available {
        0 => String::from("the stack is empty"),
        1 => String::from("only 1 value on the stack"),
        n => format!("only {} values on the stack", n),
    }
}

/// Errors that can occur while operating the calculator.
///
/// # Examples
///
/// ```rust
/// use upncalc::CalcError;
///
/// let err = CalcError::DivisionByZero { operation: "/" };
/// println!("{}", err); // "Division by zero in /"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// An operator was invoked with fewer values on the stack than it consumes.
    ///
    /// The stack is left unmodified.
    #[error("{operation} needs {required} operand(s), {}", format_available(.available))]
    InsufficientOperands {
        operation: &'static str,
        required: usize,
        available: usize,
    },

    /// Division or reciprocal with a zero divisor.
    ///
    /// The operands are not consumed.
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// The operand lies outside the operator's domain
    /// (square root of a negative number).
    #[error("Invalid operand {value} for {operation}")]
    InvalidOperand {
        operation: &'static str,
        value: CalcValue,
    },

    /// The result does not fit the decimal range.
    #[error("Result of {operation} is out of range")]
    Overflow { operation: &'static str },

    /// An exact operator whose result would need more digits than a
    /// `CalcValue` holds, so it could only be returned rounded.
    #[error("Result of {operation} cannot be represented exactly")]
    Inexact { operation: &'static str },

    /// Pending input text that is not a decimal number.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration that could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CalcError>;
