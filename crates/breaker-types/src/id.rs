//! Identifier types.
//!
//! Identifiers are UUID-based so that embedders can correlate log
//! lines and registry entries across task boundaries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one submitted circuit evaluation.
///
/// A fresh `SolveId` is minted each time a circuit is accepted by the
/// solver. It identifies the root worker in the solver's registry and
/// tags the tracing output for that evaluation.
///
/// # Example
///
/// ```
/// use breaker_types::SolveId;
///
/// let a = SolveId::new();
/// let b = SolveId::new();
/// assert_ne!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolveId(Uuid);

impl SolveId {
    /// Creates a new random identifier (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SolveId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolveId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
