//! Memory Manager - generational mark-and-sweep heap simulation
//!
//! This component provides:
//! - An object store split into young and old generations
//! - A mutator API for allocation, field writes and root registration
//! - A card-table write barrier tracking old-to-young edges
//! - Minor (young-only) and full collections with age-based promotion
//! - A fixed-cadence scheduler escalating to full collections
//! - Non-generational mark-sweep and reference-counting baselines
//!
//! Objects are addressed by [`Handle`](core_types::Handle)s, never by
//! pointer, so the object graph may contain cycles.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod baseline;
pub mod collector;
pub mod config;
pub mod gc;
pub mod heap;
mod marker;
pub mod object;
pub mod repr;
pub mod scheduler;
mod snapshot;
pub mod stats;
pub mod sweeper;
pub mod write_barrier;

// Re-export main types
pub use baseline::{MarkSweepGc, RefCountGc};
pub use collector::Collector;
pub use config::GcConfig;
pub use gc::{GcCycle, GenerationalGc};
pub use heap::ObjectStore;
pub use object::ObjectRecord;
pub use repr::Repr;
pub use scheduler::{CollectionPlan, CollectionScheduler};
pub use stats::GcStats;
pub use sweeper::SweepReport;
pub use write_barrier::{write_barrier, CardTable};

pub use core_types::{Generation, Handle, HeapError, HeapResult, ObjectId};
