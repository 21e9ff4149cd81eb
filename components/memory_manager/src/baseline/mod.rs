//! Comparison baselines.
//!
//! Two simpler collectors built from the same object store and handles as
//! [`GenerationalGc`](crate::GenerationalGc):
//!
//! - [`MarkSweepGc`]: a single generation, full mark and sweep on every request.
//! - [`RefCountGc`]: eager reference counting with no graph marking. It cannot
//!   reclaim cycles once their roots are dropped.

mod mark_sweep;
mod ref_count;

pub use mark_sweep::MarkSweepGc;
pub use ref_count::RefCountGc;
