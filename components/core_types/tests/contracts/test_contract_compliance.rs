//! Contract compliance tests for core_types
//!
//! These tests verify that the exported types keep the shape the collectors
//! depend on.

use core_types::{Generation, Handle, HeapError, HeapResult, ObjectId};

#[cfg(test)]
mod handle_contract_tests {
    use super::*;

    /// Contract: Handle is Copy + Eq + Hash + Ord and exposes its id
    #[test]
    fn test_handle_traits() {
        fn assert_traits<T: Copy + Eq + std::hash::Hash + Ord + std::fmt::Debug>() {}
        assert_traits::<Handle>();
        assert_traits::<ObjectId>();
        let _: ObjectId = Handle::new(ObjectId::new(1)).id();
    }
}

#[cfg(test)]
mod generation_contract_tests {
    use super::*;

    /// Contract: Generation has exactly the young and old variants
    #[test]
    fn test_generation_variants() {
        for generation in [Generation::Young, Generation::Old] {
            match generation {
                Generation::Young | Generation::Old => {}
            }
        }
    }
}

#[cfg(test)]
mod error_contract_tests {
    use super::*;

    /// Contract: HeapError is Send + Sync + 'static so it can cross `?` into boxed errors
    #[test]
    fn test_heap_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<HeapError>();
    }

    #[test]
    fn test_heap_result_alias() {
        let ok: HeapResult<u8> = Ok(1);
        assert_eq!(ok, Ok(1));
    }
}
