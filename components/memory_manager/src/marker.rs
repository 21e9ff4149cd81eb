//! Reachability marking.
//!
//! Two traversal modes share one depth-first walk over field edges:
//!
//! - **Full**: follows every edge regardless of generation.
//! - **Young-restricted**: only marks young objects and stops at old ones.
//!
//! Both are idempotent through the mark bit, which also terminates cycles.
//! The walk keeps an explicit work stack, so graph depth is bounded by heap
//! size rather than by the native stack.

use std::collections::BTreeSet;

use core_types::ObjectId;

use crate::heap::ObjectStore;
use crate::write_barrier::CardTable;

/// Which objects a marking pass may visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkScope {
    /// Visit both generations
    Full,
    /// Visit only the young generation
    YoungOnly,
}

/// Marks everything reachable from `seeds` within `scope`.
///
/// # Returns
///
/// The number of objects newly marked by this call.
pub(crate) fn mark<T, I>(store: &mut ObjectStore<T>, seeds: I, scope: MarkScope) -> usize
where
    I: IntoIterator<Item = ObjectId>,
{
    let mut stack: Vec<ObjectId> = seeds.into_iter().collect();
    let mut newly_marked = 0;

    while let Some(id) = stack.pop() {
        if scope == MarkScope::YoungOnly && !store.is_young(id) {
            continue;
        }
        let Some(record) = store.get_mut(id) else {
            // Dangling edge to a freed object
            continue;
        };
        if record.is_marked() {
            continue;
        }
        record.set_marked(true);
        newly_marked += 1;
        stack.extend(record.targets().map(|target| target.id()));
    }

    newly_marked
}

/// Seeds for a full collection: every root that is still live.
pub(crate) fn full_seeds<T>(store: &ObjectStore<T>, roots: &BTreeSet<ObjectId>) -> Vec<ObjectId> {
    roots.iter().copied().filter(|id| store.contains(*id)).collect()
}

/// Seeds for a minor collection.
///
/// Two sources: every root whose object is young, and every young field
/// target of every carded object that is still old. Stale cards are skipped
/// but never removed here.
pub(crate) fn young_seeds<T>(
    store: &ObjectStore<T>,
    roots: &BTreeSet<ObjectId>,
    card_table: &CardTable,
) -> Vec<ObjectId> {
    let mut seeds: Vec<ObjectId> = roots
        .iter()
        .copied()
        .filter(|id| store.is_young(*id))
        .collect();

    for carded in card_table.iter() {
        if !store.is_old(carded) {
            continue;
        }
        if let Some(parent) = store.get(carded) {
            seeds.extend(
                parent
                    .targets()
                    .map(|target| target.id())
                    .filter(|id| store.is_young(*id)),
            );
        }
    }

    seeds
}
