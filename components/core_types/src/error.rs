//! Heap error types.
//!
//! Only two things can fail: mutating an object that no longer exists, and
//! building a collector from a nonsensical configuration. Every other
//! operation given a stale handle degrades to a no-op.

use crate::ObjectId;
use thiserror::Error;

/// Errors raised by heap operations.
///
/// # Examples
///
/// ```
/// use core_types::{HeapError, ObjectId};
///
/// let error = HeapError::InvalidTarget(ObjectId::new(4));
/// assert_eq!(
///     error.to_string(),
///     "cannot set a field on freed or non-existent object #4"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The parent of a field write was freed or never existed.
    #[error("cannot set a field on freed or non-existent object {0}")]
    InvalidTarget(ObjectId),

    /// A collector configuration value is out of range.
    #[error("invalid collector configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for heap operations
pub type HeapResult<T> = std::result::Result<T, HeapError>;
