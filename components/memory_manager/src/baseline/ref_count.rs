//! Reference-counting collector.
//!
//! Counts incoming references (field edges plus root registrations) per
//! object and frees an object the moment its count drops to zero, cascading
//! into its former children. No marking ever happens, so a cycle whose roots
//! are all dropped keeps itself alive.

use std::collections::{BTreeMap, BTreeSet};

use core_types::{Handle, HeapError, HeapResult, ObjectId};
use tracing::trace;

use crate::heap::ObjectStore;
use crate::object::ObjectRecord;
use crate::repr::{Repr, ReprOf};
use crate::snapshot::{flag, join_lines, QuotedFieldList, RootList};

/// Eager reference-counting heap.
///
/// # Example
///
/// ```
/// use memory_manager::RefCountGc;
///
/// let mut heap = RefCountGc::new();
/// let root = heap.allocate("root");
/// let child = heap.allocate("child");
/// heap.add_root(root);
/// heap.set_field(root, "child", Some(child)).unwrap();
/// assert_eq!(heap.ref_count(child), Some(1));
///
/// heap.remove_root(root);
/// assert!(heap.resolve(root).is_none());
/// assert!(heap.resolve(child).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RefCountGc<T> {
    store: ObjectStore<T>,
    roots: BTreeSet<ObjectId>,
    /// Incoming reference count per live object
    counts: BTreeMap<ObjectId, usize>,
    freed: u64,
}

impl<T> RefCountGc<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        RefCountGc {
            store: ObjectStore::new(),
            roots: BTreeSet::new(),
            counts: BTreeMap::new(),
            freed: 0,
        }
    }

    /// Allocates a new object with a count of zero.
    ///
    /// The object is not freed until a reference to it is dropped.
    pub fn allocate(&mut self, value: T) -> Handle {
        let handle = self.store.allocate(value);
        self.counts.insert(handle.id(), 0);
        handle
    }

    /// Installs (`Some`) or removes (`None`) a named field on `parent`.
    ///
    /// The new child is counted before the old one is released, so replacing
    /// a field with an object reachable only through that field is safe.
    /// Writing the child already in the slot changes nothing.
    ///
    /// # Errors
    ///
    /// [`HeapError::InvalidTarget`] if `parent` was freed or never existed.
    pub fn set_field(&mut self, parent: Handle, name: &str, child: Option<Handle>) -> HeapResult<()> {
        let previous = self
            .store
            .resolve(parent)
            .ok_or(HeapError::InvalidTarget(parent.id()))?
            .field(name);
        if previous == child {
            return Ok(());
        }

        if let Some(child) = child {
            self.incref(child);
        }
        if let Some(record) = self.store.get_mut(parent.id()) {
            match child {
                Some(child) => {
                    record.set_field(name, child);
                }
                None => {
                    record.remove_field(name);
                }
            }
        }
        if let Some(previous) = previous {
            self.decref(previous);
        }
        Ok(())
    }

    /// Registers a root, counting it as a reference.
    ///
    /// No-op on stale handles and objects that are already roots.
    pub fn add_root(&mut self, handle: Handle) {
        if !self.store.contains(handle.id()) || !self.roots.insert(handle.id()) {
            return;
        }
        self.incref(handle);
    }

    /// Unregisters a root and drops its reference, possibly freeing it.
    ///
    /// No-op on stale handles and non-roots.
    pub fn remove_root(&mut self, handle: Handle) {
        if !self.store.contains(handle.id()) || !self.roots.remove(&handle.id()) {
            return;
        }
        self.decref(handle);
    }

    fn incref(&mut self, handle: Handle) {
        if let Some(count) = self.counts.get_mut(&handle.id()) {
            *count += 1;
        }
    }

    /// Drops one reference and frees every object whose count reaches zero.
    fn decref(&mut self, handle: Handle) {
        let mut pending = vec![handle.id()];

        while let Some(id) = pending.pop() {
            let Some(count) = self.counts.get_mut(&id) else {
                continue;
            };
            *count = count.saturating_sub(1);
            if *count > 0 {
                continue;
            }

            self.counts.remove(&id);
            let children: Vec<ObjectId> = self
                .store
                .get(id)
                .map(|record| record.targets().map(|target| target.id()).collect())
                .unwrap_or_default();
            if self.store.free(id).is_some() {
                self.freed += 1;
                trace!(
                    target: "memory_manager::gc",
                    id = id.get(),
                    children = children.len(),
                    "reference count reached zero"
                );
            }
            // Children are released in field order
            pending.extend(children.into_iter().rev());
        }
    }

    /// Returns the reference count of a live object.
    pub fn ref_count(&self, handle: Handle) -> Option<usize> {
        self.counts.get(&handle.id()).copied()
    }

    /// Resolves a handle, returning `None` if the object was freed.
    pub fn resolve(&self, handle: Handle) -> Option<&ObjectRecord<T>> {
        self.store.resolve(handle)
    }

    /// Returns true if `handle` is currently a root.
    pub fn is_root(&self, handle: Handle) -> bool {
        self.roots.contains(&handle.id())
    }

    /// Returns the number of objects freed so far.
    pub fn freed_count(&self) -> u64 {
        self.freed
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

impl<T: Repr> RefCountGc<T> {
    /// Renders `HEAP size=<N>, ROOTS=[...]` followed by one line per object,
    /// each showing its reference count:
    ///
    /// ```text
    /// _Obj #1 (val='A', rc=1), fields=['child -> #2'], freed=False
    /// ```
    pub fn snapshot(&self) -> String {
        let header = format!(
            "HEAP size={}, ROOTS={}",
            self.store.len(),
            RootList(&self.roots)
        );
        let lines = self.store.iter().map(|record| {
            format!(
                "_Obj {} (val={}, rc={}), fields={}, freed={}",
                record.id(),
                ReprOf(record.value()),
                self.counts.get(&record.id()).copied().unwrap_or(0),
                QuotedFieldList(record),
                flag(record.is_freed())
            )
        });
        join_lines(header, lines)
    }
}

impl<T> Default for RefCountGc<T> {
    fn default() -> Self {
        Self::new()
    }
}
