//! Collection scheduling.
//!
//! Every collection request runs a minor collection. Every
//! `full_gc_interval`-th minor collection (counting all of them, including
//! ones requested directly) is followed by a full collection, which bounds
//! how much garbage the old generation can accumulate.

use serde::Serialize;
use tracing::debug;

/// What a collection request should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionPlan {
    /// A minor collection only
    MinorOnly,
    /// A minor collection followed by a full collection
    MinorThenFull,
}

/// Fixed-cadence scheduler for minor and full collections.
///
/// # Example
///
/// ```
/// use memory_manager::{CollectionPlan, CollectionScheduler};
///
/// let mut scheduler = CollectionScheduler::new(3);
/// let plans: Vec<CollectionPlan> = (0..6).map(|_| scheduler.record_minor()).collect();
/// assert_eq!(plans[2], CollectionPlan::MinorThenFull);
/// assert_eq!(plans[5], CollectionPlan::MinorThenFull);
/// assert_eq!(plans[0], CollectionPlan::MinorOnly);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionScheduler {
    /// Full collection every this many minor collections
    full_gc_interval: u64,
    /// Minor collections completed so far
    minor_count: u64,
}

impl CollectionScheduler {
    /// Creates a scheduler escalating every `full_gc_interval` minor collections.
    ///
    /// An interval of zero never escalates; [`GcConfig::validate`](crate::GcConfig::validate)
    /// rejects it before a collector is built.
    pub fn new(full_gc_interval: u64) -> Self {
        CollectionScheduler {
            full_gc_interval,
            minor_count: 0,
        }
    }

    /// Returns the number of minor collections recorded.
    pub fn minor_count(&self) -> u64 {
        self.minor_count
    }

    /// Returns the configured full-collection interval.
    pub fn full_gc_interval(&self) -> u64 {
        self.full_gc_interval
    }

    /// Records a finished minor collection and decides what follows it.
    pub fn record_minor(&mut self) -> CollectionPlan {
        self.minor_count += 1;
        let plan = self.plan_for(self.minor_count);
        if plan == CollectionPlan::MinorThenFull {
            debug!(
                target: "memory_manager::gc",
                minor_count = self.minor_count,
                "scheduling full collection"
            );
        }
        plan
    }

    /// Returns the plan for the given 1-based minor collection count.
    pub fn plan_for(&self, minor_count: u64) -> CollectionPlan {
        if self.full_gc_interval != 0 && minor_count != 0 && minor_count % self.full_gc_interval == 0 {
            CollectionPlan::MinorThenFull
        } else {
            CollectionPlan::MinorOnly
        }
    }
}
