//! Common interface over the collectors in this crate.
//!
//! Driver code (scenario scripts, comparisons) is written once against
//! [`Collector`] and runs unchanged on the generational collector and on the
//! comparison baselines.

use core_types::{Handle, HeapResult};

use crate::baseline::{MarkSweepGc, RefCountGc};
use crate::gc::GenerationalGc;
use crate::repr::Repr;

/// A heap with a mutator API and some way of reclaiming garbage.
pub trait Collector<T> {
    /// Short, stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Allocates a new object.
    fn allocate(&mut self, value: T) -> Handle;

    /// Installs (`Some`) or removes (`None`) a named field on `parent`.
    fn set_field(&mut self, parent: Handle, name: &str, child: Option<Handle>) -> HeapResult<()>;

    /// Registers a root; no-op on stale handles.
    fn add_root(&mut self, handle: Handle);

    /// Unregisters a root; no-op on stale handles and non-roots.
    fn remove_root(&mut self, handle: Handle);

    /// Runs whatever collection the collector does on request.
    fn collect(&mut self);

    /// Runs a young-generation-only collection where the collector has one.
    fn collect_young(&mut self) {
        self.collect();
    }

    /// One-line summary of the collector's counters.
    fn counters(&self) -> String {
        format!("live={}", self.live_count())
    }

    /// Returns true if the object is still live.
    fn contains(&self, handle: Handle) -> bool;

    /// Returns the number of live objects.
    fn live_count(&self) -> usize;

    /// Renders the collector's diagnostic dump.
    fn snapshot(&self) -> String
    where
        T: Repr;
}

impl<T> Collector<T> for GenerationalGc<T> {
    fn name(&self) -> &'static str {
        "generational"
    }

    fn allocate(&mut self, value: T) -> Handle {
        GenerationalGc::allocate(self, value)
    }

    fn set_field(&mut self, parent: Handle, name: &str, child: Option<Handle>) -> HeapResult<()> {
        GenerationalGc::set_field(self, parent, name, child)
    }

    fn add_root(&mut self, handle: Handle) {
        GenerationalGc::add_root(self, handle)
    }

    fn remove_root(&mut self, handle: Handle) {
        GenerationalGc::remove_root(self, handle)
    }

    fn collect(&mut self) {
        self.gc();
    }

    fn collect_young(&mut self) {
        self.minor_gc();
    }

    fn counters(&self) -> String {
        format!(
            "minor_gc_count={}, young={}, old={}",
            self.minor_count(),
            self.young_len(),
            self.old_len()
        )
    }

    fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_some()
    }

    fn live_count(&self) -> usize {
        self.len()
    }

    fn snapshot(&self) -> String
    where
        T: Repr,
    {
        GenerationalGc::snapshot(self)
    }
}

impl<T> Collector<T> for MarkSweepGc<T> {
    fn name(&self) -> &'static str {
        "mark-sweep"
    }

    fn allocate(&mut self, value: T) -> Handle {
        MarkSweepGc::allocate(self, value)
    }

    fn set_field(&mut self, parent: Handle, name: &str, child: Option<Handle>) -> HeapResult<()> {
        MarkSweepGc::set_field(self, parent, name, child)
    }

    fn add_root(&mut self, handle: Handle) {
        MarkSweepGc::add_root(self, handle)
    }

    fn remove_root(&mut self, handle: Handle) {
        MarkSweepGc::remove_root(self, handle)
    }

    fn collect(&mut self) {
        self.gc();
    }

    fn counters(&self) -> String {
        format!("gc_count={}, size={}", self.collections(), self.len())
    }

    fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_some()
    }

    fn live_count(&self) -> usize {
        self.len()
    }

    fn snapshot(&self) -> String
    where
        T: Repr,
    {
        MarkSweepGc::snapshot(self)
    }
}

impl<T> Collector<T> for RefCountGc<T> {
    fn name(&self) -> &'static str {
        "ref-count"
    }

    fn allocate(&mut self, value: T) -> Handle {
        RefCountGc::allocate(self, value)
    }

    fn set_field(&mut self, parent: Handle, name: &str, child: Option<Handle>) -> HeapResult<()> {
        RefCountGc::set_field(self, parent, name, child)
    }

    fn add_root(&mut self, handle: Handle) {
        RefCountGc::add_root(self, handle)
    }

    fn remove_root(&mut self, handle: Handle) {
        RefCountGc::remove_root(self, handle)
    }

    /// Reclamation is eager; there is nothing to do on request.
    fn collect(&mut self) {}

    fn counters(&self) -> String {
        format!("size={}, freed={}", self.len(), self.freed_count())
    }

    fn contains(&self, handle: Handle) -> bool {
        self.resolve(handle).is_some()
    }

    fn live_count(&self) -> usize {
        self.len()
    }

    fn snapshot(&self) -> String
    where
        T: Repr,
    {
        RefCountGc::snapshot(self)
    }
}
