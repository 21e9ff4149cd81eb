//! Generational mark-and-sweep collector.
//!
//! This module ties the pieces together:
//! - Mutator API: allocation, field writes, root registration
//! - Write barrier on every installed edge
//! - Minor collection: young-restricted mark, age, promote, free
//! - Full collection: mark from all roots, free across both generations
//! - Scheduler: a full collection after every Nth minor collection

use std::collections::BTreeSet;

use core_types::{Generation, Handle, HeapError, HeapResult, ObjectId};
use serde::Serialize;
use tracing::debug;

use crate::config::GcConfig;
use crate::heap::ObjectStore;
use crate::marker::{self, MarkScope};
use crate::object::ObjectRecord;
use crate::repr::Repr;
use crate::scheduler::{CollectionPlan, CollectionScheduler};
use crate::snapshot::{join_lines, ObjectLine, RootList};
use crate::stats::GcStats;
use crate::sweeper::{self, SweepReport};
use crate::write_barrier::{self, CardTable};

/// Result of one scheduled collection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GcCycle {
    /// What the scheduler decided to run
    pub plan: CollectionPlan,
    /// The minor collection that always runs
    pub minor: SweepReport,
    /// The full collection, when the cadence called for one
    pub full: Option<SweepReport>,
}

impl GcCycle {
    /// Returns true if this request included a full collection.
    pub fn ran_full(&self) -> bool {
        self.full.is_some()
    }
}

/// Two-generation heap with a card-table write barrier.
///
/// Objects are allocated young. A minor collection only traverses the young
/// generation, seeded from young roots and from the young referents of carded
/// old objects. Objects surviving `promotion_age` minor collections move to
/// the old generation, which only a full collection reclaims.
///
/// # Example
///
/// ```
/// use memory_manager::GenerationalGc;
///
/// let mut gc = GenerationalGc::new();
/// let a = gc.allocate("A");
/// let b = gc.allocate("B");
/// let orphan = gc.allocate("orphan");
///
/// gc.add_root(a);
/// gc.set_field(a, "next", Some(b)).unwrap();
/// gc.gc();
///
/// assert!(gc.resolve(a).is_some());
/// assert!(gc.resolve(b).is_some());
/// assert!(gc.resolve(orphan).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct GenerationalGc<T> {
    /// All live objects, split by generation
    store: ObjectStore<T>,
    /// Root identifiers, independent of generation
    roots: BTreeSet<ObjectId>,
    /// Old objects suspected of referencing young objects
    card_table: CardTable,
    /// Minor/full cadence and the minor collection counter
    scheduler: CollectionScheduler,
    config: GcConfig,
    stats: GcStats,
}

impl<T> GenerationalGc<T> {
    /// Creates an empty heap with the default configuration.
    pub fn new() -> Self {
        Self::build(GcConfig::default())
    }

    /// Creates an empty heap with a custom configuration.
    ///
    /// # Errors
    ///
    /// [`HeapError::InvalidConfig`] if the configuration does not validate.
    pub fn with_config(config: GcConfig) -> HeapResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GcConfig) -> Self {
        GenerationalGc {
            store: ObjectStore::new(),
            roots: BTreeSet::new(),
            card_table: CardTable::new(),
            scheduler: CollectionScheduler::new(config.full_gc_interval),
            config,
            stats: GcStats::default(),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    /// Allocates a new young object with age 0.
    ///
    /// Never fails.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.stats.objects_allocated += 1;
        self.store.allocate(value)
    }

    /// Installs, overwrites or removes a named field on `parent`.
    ///
    /// `Some(child)` installs the edge and runs the write barrier; `None`
    /// removes the edge if present. The child may itself be stale, in which
    /// case the edge is kept but never followed.
    ///
    /// # Errors
    ///
    /// [`HeapError::InvalidTarget`] if `parent` was freed or never existed.
    /// The heap is left untouched.
    pub fn set_field(&mut self, parent: Handle, name: &str, child: Option<Handle>) -> HeapResult<()> {
        let parent_id = parent.id();
        let record = self
            .store
            .get_mut(parent_id)
            .ok_or(HeapError::InvalidTarget(parent_id))?;

        match child {
            None => {
                record.remove_field(name);
            }
            Some(child) => {
                record.set_field(name, child);
                if write_barrier::write_barrier(&self.store, &mut self.card_table, parent_id, child) {
                    self.stats.barrier_hits += 1;
                }
            }
        }
        Ok(())
    }

    /// Registers `handle` as a root. No-op if the object is gone.
    pub fn add_root(&mut self, handle: Handle) {
        if self.store.contains(handle.id()) {
            self.roots.insert(handle.id());
        }
    }

    /// Unregisters `handle` as a root. No-op if the object is gone or not a root.
    pub fn remove_root(&mut self, handle: Handle) {
        if self.store.contains(handle.id()) {
            self.roots.remove(&handle.id());
        }
    }

    /// Returns true if `handle` is currently a root.
    pub fn is_root(&self, handle: Handle) -> bool {
        self.roots.contains(&handle.id())
    }

    /// Iterates over root identifiers in ascending order.
    pub fn roots(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.roots.iter().copied()
    }

    /// Runs one collection request: a minor collection, followed by a full
    /// collection when the minor counter hits a multiple of the interval.
    pub fn gc(&mut self) -> GcCycle {
        let (minor, plan) = self.run_minor();
        let full = match plan {
            CollectionPlan::MinorOnly => None,
            CollectionPlan::MinorThenFull => Some(self.full_gc()),
        };
        GcCycle { plan, minor, full }
    }

    /// Collects the young generation only.
    ///
    /// Counts toward the full-collection cadence but never triggers a full
    /// collection itself. The card table is empty afterwards unless
    /// [`GcConfig::retain_live_cards`] is set.
    pub fn minor_gc(&mut self) -> SweepReport {
        self.run_minor().0
    }

    fn run_minor(&mut self) -> (SweepReport, CollectionPlan) {
        debug!(
            target: "memory_manager::gc",
            roots = self.roots.len(),
            young = self.store.young_len(),
            old = self.store.old_len(),
            cards = self.card_table.len(),
            "minor collection starting"
        );

        let seeds = marker::young_seeds(&self.store, &self.roots, &self.card_table);
        marker::mark(&mut self.store, seeds, MarkScope::YoungOnly);
        let report = sweeper::sweep_young(&mut self.store, self.config.promotion_age);

        let carded = self.card_table.to_vec();
        self.card_table.clear();
        let retained = if self.config.retain_live_cards {
            let candidates = carded.into_iter().chain(report.promoted.iter().copied());
            write_barrier::rescan_cards(&self.store, &mut self.card_table, candidates)
        } else {
            0
        };

        let plan = self.scheduler.record_minor();
        self.stats.minor_collections += 1;
        self.stats.objects_freed += report.freed_count() as u64;
        self.stats.objects_promoted += report.promoted_count() as u64;

        debug!(
            target: "memory_manager::gc",
            minor_count = self.scheduler.minor_count(),
            freed = report.freed_count(),
            promoted = report.promoted_count(),
            retained_cards = retained,
            young = self.store.young_len(),
            old = self.store.old_len(),
            "minor collection complete"
        );

        (report, plan)
    }

    /// Collects both generations, marking from every root.
    ///
    /// Neither ages nor promotes.
    pub fn full_gc(&mut self) -> SweepReport {
        debug!(
            target: "memory_manager::gc",
            roots = self.roots.len(),
            young = self.store.young_len(),
            old = self.store.old_len(),
            "full collection starting"
        );

        let seeds = marker::full_seeds(&self.store, &self.roots);
        marker::mark(&mut self.store, seeds, MarkScope::Full);
        let report = sweeper::sweep_full(&mut self.store);

        self.stats.full_collections += 1;
        self.stats.objects_freed += report.freed_count() as u64;

        debug!(
            target: "memory_manager::gc",
            freed = report.freed_count(),
            young = self.store.young_len(),
            old = self.store.old_len(),
            "full collection complete"
        );

        report
    }

    /// Resolves a handle, returning `None` if the object was freed.
    pub fn resolve(&self, handle: Handle) -> Option<&ObjectRecord<T>> {
        self.store.resolve(handle)
    }

    /// Returns the generation of a live object.
    pub fn generation_of(&self, handle: Handle) -> Option<Generation> {
        self.store.generation_of(handle.id())
    }

    /// Returns the age of a live object.
    pub fn age_of(&self, handle: Handle) -> Option<u32> {
        self.store.resolve(handle).map(ObjectRecord::age)
    }

    /// Read-only access to the object store.
    pub fn store(&self) -> &ObjectStore<T> {
        &self.store
    }

    /// Read-only access to the card table.
    pub fn card_table(&self) -> &CardTable {
        &self.card_table
    }

    /// Returns the number of minor collections run so far.
    pub fn minor_count(&self) -> u64 {
        self.scheduler.minor_count()
    }

    /// Returns running statistics.
    pub fn stats(&self) -> &GcStats {
        &self.stats
    }

    /// Returns the number of live objects.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if no objects are live.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the number of live young objects.
    pub fn young_len(&self) -> usize {
        self.store.young_len()
    }

    /// Returns the number of live old objects.
    pub fn old_len(&self) -> usize {
        self.store.old_len()
    }
}

impl<T: Repr> GenerationalGc<T> {
    /// Renders the heap as diagnostic text.
    ///
    /// The first line is `HEAP total=<T>, young=<Y>, old=<O>, ROOTS=[...]`,
    /// followed by one line per live object in ascending identifier order.
    pub fn snapshot(&self) -> String {
        let header = format!(
            "HEAP total={}, young={}, old={}, ROOTS={}",
            self.store.len(),
            self.store.young_len(),
            self.store.old_len(),
            RootList(&self.roots)
        );
        join_lines(
            header,
            self.store.iter().map(|record| ObjectLine(record).to_string()),
        )
    }
}

impl<T> Default for GenerationalGc<T> {
    fn default() -> Self {
        Self::new()
    }
}
