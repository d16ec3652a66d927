//! Gate operator kinds and their truth semantics.

use serde::{Deserialize, Serialize};

/// The operator of a non-leaf circuit node.
///
/// The counting gates carry their threshold: `GreaterThan(k)` is true
/// when more than `k` arguments are true, `LessThan(k)` when fewer
/// than `k` are.
///
/// # Arity
///
/// | Operator | Arguments |
/// |----------|-----------|
/// | `Not` | exactly 1 |
/// | `If` | exactly 3 (condition, then, else) |
/// | `And`, `Or`, `GreaterThan`, `LessThan` | at least 1 |
///
/// Construction through [`CircuitNode`](crate::CircuitNode) enforces
/// these shapes, so downstream code can rely on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateOp {
    /// Negation of the single argument.
    Not,
    /// True iff every argument is true.
    And,
    /// True iff any argument is true.
    Or,
    /// Selects the second or third argument by the first.
    If,
    /// True iff more than `k` arguments are true.
    GreaterThan(usize),
    /// True iff fewer than `k` arguments are true.
    LessThan(usize),
}

impl GateOp {
    /// Returns `true` if `arity` arguments are a legal shape for this
    /// operator.
    ///
    /// # Example
    ///
    /// ```
    /// use breaker_circuit::GateOp;
    ///
    /// assert!(GateOp::If.arity_ok(3));
    /// assert!(!GateOp::If.arity_ok(2));
    /// assert!(GateOp::And.arity_ok(1));
    /// assert!(!GateOp::And.arity_ok(0));
    /// ```
    #[must_use]
    pub fn arity_ok(&self, arity: usize) -> bool {
        match self {
            Self::Not => arity == 1,
            Self::If => arity == 3,
            Self::And | Self::Or | Self::GreaterThan(_) | Self::LessThan(_) => arity >= 1,
        }
    }

    /// Describes the expected argument count, for error messages.
    #[must_use]
    pub fn arity_hint(&self) -> &'static str {
        match self {
            Self::Not => "exactly 1",
            Self::If => "exactly 3",
            Self::And | Self::Or | Self::GreaterThan(_) | Self::LessThan(_) => "at least 1",
        }
    }

    /// Applies the operator's truth table to fully known arguments.
    ///
    /// This is the sequential reference semantics, used by the test
    /// oracle and useful to embedders that already hold every value.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` violates [`arity_ok`](Self::arity_ok).
    ///
    /// # Example
    ///
    /// ```
    /// use breaker_circuit::GateOp;
    ///
    /// assert!(GateOp::And.apply(&[true, true]));
    /// assert!(!GateOp::And.apply(&[true, false]));
    /// assert!(GateOp::GreaterThan(1).apply(&[true, true, false]));
    /// assert!(GateOp::If.apply(&[false, false, true]));
    /// ```
    #[must_use]
    pub fn apply(&self, values: &[bool]) -> bool {
        assert!(
            self.arity_ok(values.len()),
            "gate {self} expects {} argument(s), found {}",
            self.arity_hint(),
            values.len()
        );
        let trues = values.iter().filter(|v| **v).count();
        match self {
            Self::Not => !values[0],
            Self::And => trues == values.len(),
            Self::Or => trues > 0,
            Self::If => {
                if values[0] {
                    values[1]
                } else {
                    values[2]
                }
            }
            Self::GreaterThan(k) => trues > *k,
            Self::LessThan(k) => trues < *k,
        }
    }
}

impl std::fmt::Display for GateOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Not => write!(f, "not"),
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
            Self::If => write!(f, "if"),
            Self::GreaterThan(k) => write!(f, "gt({k})"),
            Self::LessThan(k) => write!(f, "lt({k})"),
        }
    }
}
