//! Unit tests for ObjectId and Handle

use core_types::{Handle, ObjectId};
use std::collections::{BTreeSet, HashSet};

#[cfg(test)]
mod object_id_tests {
    use super::*;

    #[test]
    fn test_object_id_roundtrips_raw_value() {
        assert_eq!(ObjectId::new(17).get(), 17);
    }

    #[test]
    fn test_object_id_display_uses_hash_prefix() {
        assert_eq!(ObjectId::new(3).to_string(), "#3");
    }

    #[test]
    fn test_object_ids_sort_ascending() {
        let ids: BTreeSet<ObjectId> = [5, 1, 3].into_iter().map(ObjectId::new).collect();
        let raw: Vec<u64> = ids.into_iter().map(ObjectId::get).collect();
        assert_eq!(raw, vec![1, 3, 5]);
    }

    #[test]
    fn test_object_id_serializes_as_number() {
        let json = serde_json::to_string(&ObjectId::new(8)).unwrap();
        assert_eq!(json, "8");
    }
}

#[cfg(test)]
mod handle_tests {
    use super::*;

    #[test]
    fn test_handle_is_copy() {
        let a = Handle::new(ObjectId::new(1));
        let b = a;
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_handles_to_same_object_are_equal() {
        let a = Handle::new(ObjectId::new(2));
        let b = Handle::from(ObjectId::new(2));
        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_handles_to_different_objects_differ() {
        assert_ne!(Handle::new(ObjectId::new(1)), Handle::new(ObjectId::new(2)));
    }
}
