//! Collector statistics.

use serde::Serialize;

/// Running totals kept by [`GenerationalGc`](crate::GenerationalGc).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GcStats {
    /// Minor collections run (directly or through the scheduler)
    pub minor_collections: u64,
    /// Full collections run (directly or through the scheduler)
    pub full_collections: u64,
    /// Objects allocated since the heap was created
    pub objects_allocated: u64,
    /// Objects freed by any collection
    pub objects_freed: u64,
    /// Objects moved from the young to the old generation
    pub objects_promoted: u64,
    /// Field writes that installed an old-to-young edge
    pub barrier_hits: u64,
}

impl GcStats {
    /// Returns the number of objects allocated and not yet freed.
    pub fn live_objects(&self) -> u64 {
        self.objects_allocated.saturating_sub(self.objects_freed)
    }
}
