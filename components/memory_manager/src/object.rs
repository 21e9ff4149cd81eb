//! Object records owned by the object store.
//!
//! A record carries the caller's payload, its outgoing edges, and the
//! bookkeeping the collectors need: mark bit, freed flag, generation and age.
//! Edges are stored as [`Handle`]s, never as owning pointers, so the graph may
//! contain cycles.

use core_types::{Generation, Handle, ObjectId};
use indexmap::IndexMap;

/// A single heap object.
///
/// Records are created by [`ObjectStore::allocate`](crate::heap::ObjectStore::allocate)
/// and can only be changed by the collectors in this crate. Callers read them
/// through [`ObjectStore::resolve`](crate::heap::ObjectStore::resolve).
#[derive(Debug, Clone)]
pub struct ObjectRecord<T> {
    id: ObjectId,
    value: T,
    /// Named outgoing edges, kept in first-insertion order
    fields: IndexMap<String, Handle>,
    marked: bool,
    freed: bool,
    generation: Generation,
    age: u32,
}

impl<T> ObjectRecord<T> {
    /// Creates a fresh young record with age 0.
    pub(crate) fn new(id: ObjectId, value: T) -> Self {
        ObjectRecord {
            id,
            value,
            fields: IndexMap::new(),
            marked: false,
            freed: false,
            generation: Generation::Young,
            age: 0,
        }
    }

    /// Returns the object's identifier.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns the payload.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns whether the collector has marked this object in the current pass.
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Returns whether the object has been freed.
    pub fn is_freed(&self) -> bool {
        self.freed
    }

    /// Returns the generation the object lives in.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the number of minor collections survived while young.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Returns the target of the named field, if set.
    pub fn field(&self, name: &str) -> Option<Handle> {
        self.fields.get(name).copied()
    }

    /// Iterates over `(name, target)` pairs in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Handle)> + '_ {
        self.fields.iter().map(|(name, target)| (name.as_str(), *target))
    }

    /// Iterates over field targets only.
    pub fn targets(&self) -> impl Iterator<Item = Handle> + '_ {
        self.fields.values().copied()
    }

    /// Returns the number of outgoing edges.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Installs or overwrites a field, returning the previous target.
    ///
    /// Overwriting keeps the field's original position.
    pub(crate) fn set_field(&mut self, name: &str, target: Handle) -> Option<Handle> {
        match self.fields.get_mut(name) {
            Some(slot) => Some(std::mem::replace(slot, target)),
            None => {
                self.fields.insert(name.to_string(), target);
                None
            }
        }
    }

    /// Removes a field, returning its target if it was set.
    pub(crate) fn remove_field(&mut self, name: &str) -> Option<Handle> {
        self.fields.shift_remove(name)
    }

    pub(crate) fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    /// Records one more survived minor collection and returns the new age.
    pub(crate) fn grow_older(&mut self) -> u32 {
        self.age = self.age.saturating_add(1);
        self.age
    }

    /// Moves the record to the old generation and resets its age.
    pub(crate) fn tenure(&mut self) {
        self.generation = Generation::Old;
        self.age = 0;
    }

    /// Marks the record freed and detaches its outgoing edges.
    ///
    /// Returns the former targets so cascading consumers can follow them.
    pub(crate) fn release(&mut self) -> Vec<Handle> {
        self.freed = true;
        self.marked = false;
        self.fields.drain(..).map(|(_, target)| target).collect()
    }
}
