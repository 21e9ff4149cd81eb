//! Unit tests for Generation

use core_types::Generation;

#[cfg(test)]
mod generation_tests {
    use super::*;

    #[test]
    fn test_young_precedes_old() {
        assert!(Generation::Young < Generation::Old);
    }

    #[test]
    fn test_predicates() {
        assert!(Generation::Young.is_young());
        assert!(!Generation::Young.is_old());
        assert!(Generation::Old.is_old());
        assert!(!Generation::Old.is_young());
    }

    #[test]
    fn test_display_and_serde_names_match() {
        assert_eq!(Generation::Young.to_string(), "young");
        assert_eq!(serde_json::to_string(&Generation::Old).unwrap(), "\"old\"");
        let parsed: Generation = serde_json::from_str("\"young\"").unwrap();
        assert_eq!(parsed, Generation::Young);
    }
}
