//! Write barrier implementation for generational GC
//!
//! A minor collection never scans the old generation, so it would miss a
//! young object that is only reachable through an old one. The write barrier
//! closes that gap: whenever a field write makes an old object point at a
//! young object, the old object's identifier is recorded in the card table,
//! and the next minor collection treats that object's young referents as
//! extra roots.

use std::collections::BTreeSet;

use core_types::{Handle, ObjectId};
use tracing::trace;

use crate::heap::ObjectStore;

/// Card table tracking old objects that may reference young objects.
///
/// This is a conservative over-approximation: an entry may outlive the edge
/// that caused it. Entries are only ever used to add marking work, never to
/// prove an object dead.
///
/// # Example
///
/// ```
/// use memory_manager::CardTable;
/// use core_types::ObjectId;
///
/// let mut cards = CardTable::new();
/// assert!(cards.record(ObjectId::new(3)));
/// assert!(!cards.record(ObjectId::new(3)));
/// assert_eq!(cards.len(), 1);
///
/// cards.clear();
/// assert!(cards.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardTable {
    /// Dirty old-object identifiers, ordered for deterministic scanning
    cards: BTreeSet<ObjectId>,
}

impl CardTable {
    /// Creates an empty card table.
    pub fn new() -> Self {
        CardTable {
            cards: BTreeSet::new(),
        }
    }

    /// Marks the card of an old object dirty.
    ///
    /// # Returns
    ///
    /// True if the entry was not already present.
    pub fn record(&mut self, old_obj: ObjectId) -> bool {
        self.cards.insert(old_obj)
    }

    /// Returns true if the object's card is dirty.
    pub fn contains(&self, obj: ObjectId) -> bool {
        self.cards.contains(&obj)
    }

    /// Returns the number of dirty cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if no card is dirty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterates over dirty cards in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.cards.iter().copied()
    }

    /// Returns the dirty cards as a vector, safe to hold across mutation.
    pub fn to_vec(&self) -> Vec<ObjectId> {
        self.cards.iter().copied().collect()
    }

    /// Clears every dirty card.
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

/// Write barrier for a freshly installed edge `parent -> child`.
///
/// Must be called after every field write that installs a child, not only the
/// first one. Removing an edge never calls the barrier.
///
/// # Arguments
///
/// * `store` - The object store holding both ends of the edge
/// * `card_table` - Card table receiving old-to-young entries
/// * `parent` - The object whose field was written
/// * `child` - The object now referenced by that field
///
/// # Returns
///
/// True if the edge crosses from the old to the young generation.
pub fn write_barrier<T>(
    store: &ObjectStore<T>,
    card_table: &mut CardTable,
    parent: ObjectId,
    child: Handle,
) -> bool {
    if !(store.is_old(parent) && store.is_young(child.id())) {
        return false;
    }

    let newly_dirty = card_table.record(parent);
    trace!(
        target: "memory_manager::gc",
        parent = parent.get(),
        child = child.id().get(),
        newly_dirty,
        "write barrier recorded old-to-young edge"
    );
    true
}

/// Re-records old objects that still reference young objects.
///
/// Run after the card table is cleared at the end of a minor collection, over
/// the previously carded objects and the objects promoted by that collection.
/// Candidates that are no longer old, or whose fields no longer reach a young
/// object, are dropped.
///
/// # Returns
///
/// The number of cards recorded.
pub(crate) fn rescan_cards<T, I>(store: &ObjectStore<T>, card_table: &mut CardTable, candidates: I) -> usize
where
    I: IntoIterator<Item = ObjectId>,
{
    let mut recorded = 0;
    for id in candidates {
        if !store.is_old(id) {
            continue;
        }
        let Some(record) = store.get(id) else {
            continue;
        };
        if record.targets().any(|target| store.is_young(target.id())) && card_table.record(id) {
            recorded += 1;
        }
    }
    recorded
}
