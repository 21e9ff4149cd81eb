//! Object store partitioned into young and old generations.
//!
//! The store owns every live [`ObjectRecord`]. Records are keyed by an
//! identifier drawn from a per-store counter, so independent stores never
//! share state. Freed records are removed from their partition; a handle to a
//! freed object simply stops resolving.

use std::collections::BTreeMap;

use core_types::{Generation, Handle, ObjectId};

use crate::object::ObjectRecord;

/// Arena of object records split by generation.
///
/// Both partitions are ordered by identifier, which gives ascending-id
/// iteration for diagnostics without extra sorting.
///
/// # Example
///
/// ```
/// use memory_manager::GenerationalGc;
///
/// let mut gc = GenerationalGc::new();
/// let a = gc.allocate("A");
///
/// let store = gc.store();
/// assert_eq!(store.young_len(), 1);
/// assert_eq!(store.resolve(a).map(|obj| *obj.value()), Some("A"));
/// ```
#[derive(Debug, Clone)]
pub struct ObjectStore<T> {
    /// Next identifier to hand out (identifiers start at 1)
    next_id: u64,
    /// Young generation partition
    young: BTreeMap<ObjectId, ObjectRecord<T>>,
    /// Old generation partition
    old: BTreeMap<ObjectId, ObjectRecord<T>>,
}

impl<T> ObjectStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        ObjectStore {
            next_id: 1,
            young: BTreeMap::new(),
            old: BTreeMap::new(),
        }
    }

    /// Allocates a fresh young object holding `value`.
    ///
    /// Never fails; the identifier is never reused.
    pub(crate) fn allocate(&mut self, value: T) -> Handle {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;
        self.young.insert(id, ObjectRecord::new(id, value));
        Handle::new(id)
    }

    /// Resolves a handle to its record.
    ///
    /// # Returns
    ///
    /// The record, or `None` if the object was freed.
    pub fn resolve(&self, handle: Handle) -> Option<&ObjectRecord<T>> {
        self.get(handle.id())
    }

    /// Looks up a live record by identifier.
    pub fn get(&self, id: ObjectId) -> Option<&ObjectRecord<T>> {
        self.young.get(&id).or_else(|| self.old.get(&id))
    }

    pub(crate) fn get_mut(&mut self, id: ObjectId) -> Option<&mut ObjectRecord<T>> {
        match self.young.get_mut(&id) {
            Some(record) => Some(record),
            None => self.old.get_mut(&id),
        }
    }

    /// Returns the generation of a live object.
    pub fn generation_of(&self, id: ObjectId) -> Option<Generation> {
        if self.young.contains_key(&id) {
            Some(Generation::Young)
        } else if self.old.contains_key(&id) {
            Some(Generation::Old)
        } else {
            None
        }
    }

    /// Returns true if the object is live in either partition.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.young.contains_key(&id) || self.old.contains_key(&id)
    }

    /// Returns true if the object is live and young.
    pub fn is_young(&self, id: ObjectId) -> bool {
        self.young.contains_key(&id)
    }

    /// Returns true if the object is live and old.
    pub fn is_old(&self, id: ObjectId) -> bool {
        self.old.contains_key(&id)
    }

    /// Returns a snapshot of young identifiers, safe to hold across mutation.
    pub fn young_ids(&self) -> Vec<ObjectId> {
        self.young.keys().copied().collect()
    }

    /// Returns a snapshot of old identifiers, safe to hold across mutation.
    pub fn old_ids(&self) -> Vec<ObjectId> {
        self.old.keys().copied().collect()
    }

    /// Iterates over all live records in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectRecord<T>> + '_ {
        let mut young = self.young.values().peekable();
        let mut old = self.old.values().peekable();
        std::iter::from_fn(move || {
            let take_young = match (young.peek(), old.peek()) {
                (Some(y), Some(o)) => y.id() < o.id(),
                (Some(_), None) => true,
                (None, _) => false,
            };
            if take_young {
                young.next()
            } else {
                old.next()
            }
        })
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.young.len() + self.old.len()
    }

    /// Returns true if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.young.is_empty() && self.old.is_empty()
    }

    /// Returns the number of live young objects.
    pub fn young_len(&self) -> usize {
        self.young.len()
    }

    /// Returns the number of live old objects.
    pub fn old_len(&self) -> usize {
        self.old.len()
    }

    /// Moves a young object into the old partition, resetting its age.
    ///
    /// # Returns
    ///
    /// True if the object was young and is now old.
    pub(crate) fn promote(&mut self, id: ObjectId) -> bool {
        match self.young.remove(&id) {
            Some(mut record) => {
                record.tenure();
                self.old.insert(id, record);
                true
            }
            None => false,
        }
    }

    /// Frees an object in whichever partition holds it.
    ///
    /// Fields are cleared before the record leaves its partition. Freeing an
    /// identifier that is no longer live is a no-op.
    ///
    /// # Returns
    ///
    /// The reclaimed record, or `None` if there was nothing to free.
    pub(crate) fn free(&mut self, id: ObjectId) -> Option<ObjectRecord<T>> {
        let partition = if self.young.contains_key(&id) {
            &mut self.young
        } else if self.old.contains_key(&id) {
            &mut self.old
        } else {
            return None;
        };

        if let Some(record) = partition.get_mut(&id) {
            record.release();
        }
        partition.remove(&id)
    }
}

impl<T> Default for ObjectStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
