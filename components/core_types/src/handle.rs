//! Object identifiers and reference handles.
//!
//! Objects are never addressed by pointer. Every object record is owned by
//! its store and named from the outside by an [`ObjectId`] wrapped in a
//! [`Handle`]. A handle is a lookup key: it can outlive the object it names,
//! in which case every heap operation treats it as absent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of an object record.
///
/// Identifiers are assigned by a store in strictly increasing order starting
/// at 1 and are never reused, even after the object is freed.
///
/// # Examples
///
/// ```
/// use core_types::ObjectId;
///
/// let id = ObjectId::new(3);
/// assert_eq!(id.get(), 3);
/// assert_eq!(format!("{}", id), "#3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Creates an identifier from its raw value.
    pub const fn new(raw: u64) -> Self {
        ObjectId(raw)
    }

    /// Returns the raw identifier value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<ObjectId> for u64 {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// Opaque reference to an object record.
///
/// Handles are `Copy` and carry no ownership; the store that issued them owns
/// the record. Comparing two handles compares the objects they name.
///
/// # Examples
///
/// ```
/// use core_types::{Handle, ObjectId};
///
/// let a = Handle::new(ObjectId::new(1));
/// let b = a;
/// assert_eq!(a, b);
/// assert_eq!(b.id(), ObjectId::new(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    id: ObjectId,
}

impl Handle {
    /// Creates a handle naming the object with the given identifier.
    pub const fn new(id: ObjectId) -> Self {
        Handle { id }
    }

    /// Returns the identifier of the named object.
    pub const fn id(self) -> ObjectId {
        self.id
    }
}

impl From<ObjectId> for Handle {
    fn from(id: ObjectId) -> Self {
        Handle::new(id)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.id, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_ordering() {
        assert!(ObjectId::new(1) < ObjectId::new(2));
        assert_eq!(ObjectId::new(5).max(ObjectId::new(4)), ObjectId::new(5));
    }

    #[test]
    fn test_object_id_into_u64() {
        let raw: u64 = ObjectId::new(42).into();
        assert_eq!(raw, 42);
    }

    #[test]
    fn test_handle_from_id() {
        let handle: Handle = ObjectId::new(9).into();
        assert_eq!(handle.id().get(), 9);
        assert_eq!(handle.to_string(), "#9");
    }
}
