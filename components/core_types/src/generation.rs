//! Generation membership of an object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The partition an object currently lives in.
///
/// Objects are allocated young and may only ever move to old. The ordering
/// follows that direction: `Young < Old`.
///
/// # Examples
///
/// ```
/// use core_types::Generation;
///
/// assert!(Generation::Young.is_young());
/// assert!(Generation::Old.is_old());
/// assert_eq!(Generation::Old.to_string(), "old");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generation {
    /// Newly allocated objects, collected by minor collections
    Young,
    /// Promoted objects, collected only by full collections
    Old,
}

impl Generation {
    /// Returns true for the young generation.
    pub fn is_young(self) -> bool {
        matches!(self, Generation::Young)
    }

    /// Returns true for the old generation.
    pub fn is_old(self) -> bool {
        matches!(self, Generation::Old)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Young => f.write_str("young"),
            Generation::Old => f.write_str("old"),
        }
    }
}
