//! Undo snapshot module.
//!
//! Contains the `StackSnapshot` type: a copy of the operand stack taken
//! immediately before a mutating engine call, together with the name of
//! the operation that took it.

use serde::{Deserialize, Serialize};

use crate::numeric::CalcValue;

/// A saved copy of the operand stack.
///
/// The engine holds at most one snapshot. Restoring it brings back the
/// exact values and order that existed before the last mutating call.
///
/// # Examples
///
/// ```rust
/// use upncalc::{CalcValue, StackSnapshot};
///
/// let snapshot = StackSnapshot::new("+", vec![CalcValue::from(3), CalcValue::from(4)]);
/// assert_eq!(snapshot.operation, "+");
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSnapshot {
    /// Operation that captured the snapshot (`push`, `pop`, `+`, `√`, ...).
    pub operation: String,

    /// Stack contents, bottom to top.
    pub values: Vec<CalcValue>,
}

impl StackSnapshot {
    /// Create a snapshot from the stack contents.
    pub fn new(operation: impl Into<String>, values: Vec<CalcValue>) -> Self {
        Self {
            operation: operation.into(),
            values,
        }
    }

    /// Number of values saved.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the saved stack was empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Give back the saved values, consuming the snapshot.
    pub fn into_values(self) -> Vec<CalcValue> {
        self.values
    }
}
