//! Collector configuration.

use core_types::{HeapError, HeapResult};
use serde::{Deserialize, Serialize};

/// Default number of minor collections an object must survive to be promoted.
pub const DEFAULT_PROMOTION_AGE: u32 = 2;

/// Default number of minor collections between full collections.
pub const DEFAULT_FULL_GC_INTERVAL: u64 = 8;

/// Tuning knobs for [`GenerationalGc`](crate::GenerationalGc).
///
/// Missing keys in a serialized config fall back to the defaults.
///
/// # Example
///
/// ```
/// use memory_manager::GcConfig;
///
/// let config: GcConfig = serde_json::from_str(r#"{ "full_gc_interval": 4 }"#).unwrap();
/// assert_eq!(config.promotion_age, 2);
/// assert_eq!(config.full_gc_interval, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcConfig {
    /// Survived minor collections required for promotion
    pub promotion_age: u32,
    /// A full collection follows every this many minor collections
    pub full_gc_interval: u64,
    /// After clearing the card table, re-record old objects that still
    /// reference young objects. Off by default: a cleared card is forgotten,
    /// so a young object reachable only through an old object is freed by
    /// the next minor collection.
    pub retain_live_cards: bool,
}

impl GcConfig {
    /// Returns a copy with a different promotion age.
    pub fn with_promotion_age(mut self, promotion_age: u32) -> Self {
        self.promotion_age = promotion_age;
        self
    }

    /// Returns a copy with a different full-collection interval.
    pub fn with_full_gc_interval(mut self, full_gc_interval: u64) -> Self {
        self.full_gc_interval = full_gc_interval;
        self
    }

    /// Returns a copy with card retention switched on or off.
    pub fn with_retain_live_cards(mut self, retain_live_cards: bool) -> Self {
        self.retain_live_cards = retain_live_cards;
        self
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// [`HeapError::InvalidConfig`] if the promotion age or the full-collection
    /// interval is zero.
    pub fn validate(&self) -> HeapResult<()> {
        if self.promotion_age == 0 {
            return Err(HeapError::InvalidConfig(
                "promotion_age must be at least 1".to_string(),
            ));
        }
        if self.full_gc_interval == 0 {
            return Err(HeapError::InvalidConfig(
                "full_gc_interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GcConfig {
    fn default() -> Self {
        GcConfig {
            promotion_age: DEFAULT_PROMOTION_AGE,
            full_gc_interval: DEFAULT_FULL_GC_INTERVAL,
            retain_live_cards: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GcConfig::default();
        assert_eq!(config.promotion_age, 2);
        assert_eq!(config.full_gc_interval, 8);
        assert!(!config.retain_live_cards);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retain_live_cards_from_json() {
        let config: GcConfig = serde_json::from_str(r#"{ "retain_live_cards": true }"#).unwrap();
        assert!(config.retain_live_cards);
        assert_eq!(config.promotion_age, 2);
    }

    #[test]
    fn test_zero_promotion_age_rejected() {
        let config = GcConfig::default().with_promotion_age(0);
        assert!(matches!(config.validate(), Err(HeapError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = GcConfig::default().with_full_gc_interval(0);
        assert!(matches!(config.validate(), Err(HeapError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = GcConfig::default().with_promotion_age(3);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GcConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
