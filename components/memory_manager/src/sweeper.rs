//! Sweeping and promotion.
//!
//! Runs after marking. Every object the sweep looks at leaves with its mark
//! bit cleared or is freed.

use core_types::ObjectId;
use serde::Serialize;

use crate::heap::ObjectStore;

/// What a single sweep did to the heap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Objects freed by this sweep, in ascending identifier order
    pub freed: Vec<ObjectId>,
    /// Objects promoted to the old generation by this sweep
    pub promoted: Vec<ObjectId>,
    /// Objects that survived (including promoted ones)
    pub survivors: usize,
}

impl SweepReport {
    /// Returns the number of objects freed.
    pub fn freed_count(&self) -> usize {
        self.freed.len()
    }

    /// Returns the number of objects promoted.
    pub fn promoted_count(&self) -> usize {
        self.promoted.len()
    }
}

/// Sweeps the young generation after a young-restricted mark.
///
/// Marked objects are unmarked and aged; those reaching `promotion_age` move
/// to the old generation with their age reset. Unmarked objects are freed.
pub(crate) fn sweep_young<T>(store: &mut ObjectStore<T>, promotion_age: u32) -> SweepReport {
    let mut report = SweepReport::default();

    for id in store.young_ids() {
        let Some(record) = store.get_mut(id) else {
            continue;
        };
        if record.is_marked() {
            record.set_marked(false);
            let age = record.grow_older();
            report.survivors += 1;
            if age >= promotion_age && store.promote(id) {
                report.promoted.push(id);
            }
        } else if store.free(id).is_some() {
            report.freed.push(id);
        }
    }

    report
}

/// Sweeps both generations after a full mark.
///
/// Ages are left untouched; a full collection neither ages nor promotes.
pub(crate) fn sweep_full<T>(store: &mut ObjectStore<T>) -> SweepReport {
    let mut report = SweepReport::default();
    let mut ids = store.young_ids();
    ids.extend(store.old_ids());
    ids.sort_unstable();

    for id in ids {
        let Some(record) = store.get_mut(id) else {
            continue;
        };
        if record.is_marked() {
            record.set_marked(false);
            report.survivors += 1;
        } else if store.free(id).is_some() {
            report.freed.push(id);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::{mark, MarkScope};
    use core_types::Generation;

    #[test]
    fn test_sweep_young_frees_unmarked() {
        let mut store = ObjectStore::new();
        let live = store.allocate("live");
        let dead = store.allocate("dead");
        mark(&mut store, [live.id()], MarkScope::YoungOnly);

        let report = sweep_young(&mut store, 2);
        assert_eq!(report.freed, vec![dead.id()]);
        assert_eq!(report.survivors, 1);
        assert!(store.resolve(dead).is_none());

        let survivor = store.resolve(live).unwrap();
        assert!(!survivor.is_marked());
        assert_eq!(survivor.age(), 1);
    }

    #[test]
    fn test_sweep_young_promotes_at_threshold() {
        let mut store = ObjectStore::new();
        let obj = store.allocate(());

        mark(&mut store, [obj.id()], MarkScope::YoungOnly);
        assert!(sweep_young(&mut store, 2).promoted.is_empty());

        mark(&mut store, [obj.id()], MarkScope::YoungOnly);
        let report = sweep_young(&mut store, 2);
        assert_eq!(report.promoted, vec![obj.id()]);

        let record = store.resolve(obj).unwrap();
        assert_eq!(record.generation(), Generation::Old);
        assert_eq!(record.age(), 0);
    }

    #[test]
    fn test_sweep_young_leaves_old_alone() {
        let mut store = ObjectStore::new();
        let old = store.allocate(());
        store.promote(old.id());

        let report = sweep_young(&mut store, 2);
        assert!(report.freed.is_empty());
        assert!(store.resolve(old).is_some());
    }

    #[test]
    fn test_sweep_full_covers_both_generations() {
        let mut store = ObjectStore::new();
        let young_live = store.allocate(());
        let young_dead = store.allocate(());
        let old_live = store.allocate(());
        let old_dead = store.allocate(());
        store.promote(old_live.id());
        store.promote(old_dead.id());

        mark(&mut store, [young_live.id(), old_live.id()], MarkScope::Full);
        let report = sweep_full(&mut store);

        assert_eq!(report.freed, vec![young_dead.id(), old_dead.id()]);
        assert_eq!(report.survivors, 2);
        assert!(store.iter().all(|record| !record.is_marked()));
    }
}
