//! # upncalc - Reverse-Polish-Notation Calculator Engine
//!
//! A stack-based calculator core that provides:
//! - **Exact** decimal arithmetic (no binary floating-point error)
//! - **Explicit** precision and rounding for division, reciprocal and square root
//! - **Single-level undo** via a snapshot taken before every stack change
//! - **Recoverable errors** that never consume operands
//!
//! ## Core Concepts
//!
//! ### Operand Stack
//!
//! Values are pushed one at a time; operators act on the top of the stack:
//!
//! ```text
//! push 3, push 4, [+]  →  [7]
//! ```
//!
//! 1. **Binary operators** consume the top two values (`a` below, `b` on top)
//!    and push `a op b`
//! 2. **Unary operators** replace the top value
//! 3. **Undo** restores the stack as it was before the last change
//!
//! ### Precision
//!
//! `+`, `-`, `*` and squaring are exact, or fail with `Inexact` when the
//! result would need more than 28 digits. Division, reciprocal and square
//! root are rounded to 16 fractional digits, half-up, unless an
//! [`EngineConfig`] says otherwise. Every stored value is normalized, so
//! `2.50` is kept as `2.5`.
//!
//! ## Example
//!
//! ```rust
//! use upncalc::*;
//!
//! let mut engine = CalculatorEngine::new();
//! engine.push(CalcValue::from(5));
//!
//! let squared = engine.apply_unary(UnaryOperator::Square).unwrap();
//! assert_eq!(squared, CalcValue::from(25));
//!
//! engine.undo();
//! assert_eq!(engine.peek_all(), &[CalcValue::from(5)]);
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The calculator engine (operand stack + undo)
//! - [`operator`] - Binary and unary operators
//! - [`numeric`] - Decimal values, rounding and normalization
//! - [`snapshot`] - The undo snapshot
//! - [`config`] - Precision configuration
//! - [`input`] - Pending numeric input
//! - [`session`] - Command-driven adapter for front-ends
//! - [`error`] - Error types

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod numeric;
pub mod operator;
pub mod session;
pub mod snapshot;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use engine::CalculatorEngine;
pub use error::CalcError;
pub use input::InputLine;
pub use operator::{BinaryOperator, UnaryOperator};
pub use session::{Command, Session};
pub use snapshot::StackSnapshot;

// Re-export numeric types
pub use numeric::{CalcValue, Precision, Rounding};
