//! Unit tests for HeapError

use core_types::{HeapError, HeapResult, ObjectId};

#[cfg(test)]
mod heap_error_tests {
    use super::*;

    fn fail_on_missing(id: u64) -> HeapResult<()> {
        Err(HeapError::InvalidTarget(ObjectId::new(id)))
    }

    #[test]
    fn test_invalid_target_carries_id() {
        let err = fail_on_missing(6).unwrap_err();
        assert!(matches!(err, HeapError::InvalidTarget(id) if id == ObjectId::new(6)));
    }

    #[test]
    fn test_invalid_target_display() {
        let err = HeapError::InvalidTarget(ObjectId::new(6));
        assert_eq!(
            err.to_string(),
            "cannot set a field on freed or non-existent object #6"
        );
    }

    #[test]
    fn test_heap_error_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(HeapError::InvalidConfig("bad".to_string()));
        assert_eq!(err.to_string(), "invalid collector configuration: bad");
    }
}
