//! Non-generational mark-and-sweep collector.

use std::collections::BTreeSet;

use core_types::{Handle, HeapError, HeapResult, ObjectId};
use tracing::debug;

use crate::heap::ObjectStore;
use crate::marker::{self, MarkScope};
use crate::object::ObjectRecord;
use crate::repr::Repr;
use crate::snapshot::{join_lines, ObjectLine, RootList};
use crate::sweeper::{self, SweepReport};

/// Single-generation mark-and-sweep heap.
///
/// Every object stays in the young partition of the store and is never
/// promoted. Each [`gc`](MarkSweepGc::gc) call marks from all roots and
/// sweeps the whole heap. There is no write barrier.
///
/// # Example
///
/// ```
/// use memory_manager::MarkSweepGc;
///
/// let mut heap = MarkSweepGc::new();
/// let a = heap.allocate("A");
/// let b = heap.allocate("B");
/// heap.add_root(a);
/// heap.gc();
///
/// assert!(heap.resolve(a).is_some());
/// assert!(heap.resolve(b).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct MarkSweepGc<T> {
    store: ObjectStore<T>,
    roots: BTreeSet<ObjectId>,
    collections: u64,
}

impl<T> MarkSweepGc<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        MarkSweepGc {
            store: ObjectStore::new(),
            roots: BTreeSet::new(),
            collections: 0,
        }
    }

    /// Allocates a new object.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.store.allocate(value)
    }

    /// Installs (`Some`) or removes (`None`) a named field on `parent`.
    ///
    /// # Errors
    ///
    /// [`HeapError::InvalidTarget`] if `parent` was freed or never existed.
    pub fn set_field(&mut self, parent: Handle, name: &str, child: Option<Handle>) -> HeapResult<()> {
        let record = self
            .store
            .get_mut(parent.id())
            .ok_or(HeapError::InvalidTarget(parent.id()))?;
        match child {
            Some(child) => {
                record.set_field(name, child);
            }
            None => {
                record.remove_field(name);
            }
        }
        Ok(())
    }

    /// Registers a root; no-op on stale handles.
    pub fn add_root(&mut self, handle: Handle) {
        if self.store.contains(handle.id()) {
            self.roots.insert(handle.id());
        }
    }

    /// Unregisters a root; no-op on stale handles.
    pub fn remove_root(&mut self, handle: Handle) {
        if self.store.contains(handle.id()) {
            self.roots.remove(&handle.id());
        }
    }

    /// Marks from every root and frees everything unmarked.
    pub fn gc(&mut self) -> SweepReport {
        let seeds = marker::full_seeds(&self.store, &self.roots);
        marker::mark(&mut self.store, seeds, MarkScope::Full);
        let report = sweeper::sweep_full(&mut self.store);
        self.collections += 1;

        debug!(
            target: "memory_manager::gc",
            collection = self.collections,
            freed = report.freed_count(),
            live = self.store.len(),
            "mark-sweep collection complete"
        );
        report
    }

    /// Resolves a handle, returning `None` if the object was freed.
    pub fn resolve(&self, handle: Handle) -> Option<&ObjectRecord<T>> {
        self.store.resolve(handle)
    }

    /// Returns true if `handle` is currently a root.
    pub fn is_root(&self, handle: Handle) -> bool {
        self.roots.contains(&handle.id())
    }

    /// Returns the number of collections run.
    pub fn collections(&self) -> u64 {
        self.collections
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl<T: Repr> MarkSweepGc<T> {
    /// Renders `HEAP size=<N>, ROOTS=[...]` followed by one line per object.
    pub fn snapshot(&self) -> String {
        let header = format!(
            "HEAP size={}, ROOTS={}",
            self.store.len(),
            RootList(&self.roots)
        );
        join_lines(
            header,
            self.store.iter().map(|record| ObjectLine(record).to_string()),
        )
    }
}

impl<T> Default for MarkSweepGc<T> {
    fn default() -> Self {
        Self::new()
    }
}
