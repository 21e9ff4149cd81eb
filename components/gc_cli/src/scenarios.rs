//! Scripted heap scenarios.
//!
//! Each scenario drives a [`Collector`] through a fixed sequence of mutator
//! calls and collections, capturing a labelled snapshot after each step. The
//! scripts only use the common collector interface, so any collector can run
//! any scenario and the transcripts can be compared side by side.

use std::fmt;

use memory_manager::{Collector, Handle, HeapResult};
use tracing::info;

type Heap = dyn Collector<&'static str>;
type Script = fn(&mut Heap, &mut Transcript) -> HeapResult<()>;

/// A named scenario from the catalogue.
#[derive(Clone, Copy)]
pub struct Scenario {
    name: &'static str,
    summary: &'static str,
    script: Script,
}

impl Scenario {
    /// Every scenario, in listing order.
    pub fn all() -> &'static [Scenario] {
        CATALOGUE
    }

    /// Looks up a scenario by name.
    pub fn find(name: &str) -> Option<Scenario> {
        CATALOGUE.iter().copied().find(|scenario| scenario.name == name)
    }

    /// Scenario name as accepted on the command line.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// One-line description.
    pub fn summary(&self) -> &'static str {
        self.summary
    }

    /// Runs the script against `heap`, returning the captured transcript.
    pub fn run(&self, heap: &mut Heap) -> HeapResult<Transcript> {
        info!(scenario = self.name, collector = heap.name(), "running scenario");
        let mut transcript = Transcript::new(self.name, heap.name());
        (self.script)(heap, &mut transcript)?;
        Ok(transcript)
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

/// One labelled step of a scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// What just happened
    pub label: String,
    /// Heap dump (or a one-line summary) after the step
    pub body: String,
}

/// Output of a scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    scenario: &'static str,
    collector: &'static str,
    steps: Vec<Step>,
}

impl Transcript {
    fn new(scenario: &'static str, collector: &'static str) -> Self {
        Transcript {
            scenario,
            collector,
            steps: Vec::new(),
        }
    }

    /// Captured steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Body of the last step with this label.
    pub fn step(&self, label: &str) -> Option<&str> {
        self.steps
            .iter()
            .rev()
            .find(|step| step.label == label)
            .map(|step| step.body.as_str())
    }

    fn note(&mut self, label: impl Into<String>, body: impl Into<String>) {
        self.steps.push(Step {
            label: label.into(),
            body: body.into(),
        });
    }

    fn capture(&mut self, label: impl Into<String>, heap: &Heap) {
        self.note(label, heap.snapshot());
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ({}) ===", self.scenario, self.collector)?;
        for step in &self.steps {
            writeln!(f)?;
            writeln!(f, "-- {} --", step.label)?;
            writeln!(f, "{}", step.body)?;
        }
        Ok(())
    }
}

const CATALOGUE: &[Scenario] = &[
    Scenario {
        name: "basic-allocation",
        summary: "Build a small tree, drop one branch, collect three times",
        script: basic_allocation,
    },
    Scenario {
        name: "circular-references",
        summary: "A rooted cycle survives while an orphan cycle is reclaimed",
        script: circular_references,
    },
    Scenario {
        name: "promotion",
        summary: "One rooted object ages through three collections",
        script: promotion,
    },
    Scenario {
        name: "old-to-young",
        summary: "An old object keeps a young object alive through the card table",
        script: old_to_young,
    },
    Scenario {
        name: "full-gc-trigger",
        summary: "Ten collection requests with fresh garbage before each",
        script: full_gc_trigger,
    },
    Scenario {
        name: "root-management",
        summary: "Dropping a root makes its object collectable",
        script: root_management,
    },
    Scenario {
        name: "acyclic-chain",
        summary: "A chain hanging off a root is reclaimed once the root goes",
        script: acyclic_chain,
    },
    Scenario {
        name: "cycle-leak",
        summary: "A two-object cycle after its roots are dropped",
        script: cycle_leak,
    },
];

fn basic_allocation(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let a = heap.allocate("Node A");
    let b = heap.allocate("Node B");
    let c = heap.allocate("Node C");
    let d = heap.allocate("Node D");
    t.capture("after allocation", heap);

    heap.set_field(a, "left", Some(b))?;
    heap.set_field(a, "right", Some(d))?;
    heap.set_field(b, "child", Some(c))?;
    t.capture("after linking fields", heap);

    heap.add_root(a);
    t.capture("after rooting A", heap);

    heap.collect();
    t.capture("after first collection", heap);

    heap.set_field(a, "right", None)?;
    t.capture("after dropping A.right", heap);

    heap.collect();
    t.capture("after second collection", heap);

    heap.collect();
    t.capture("after third collection", heap);
    Ok(())
}

fn ring(heap: &mut Heap, names: [&'static str; 3]) -> HeapResult<[Handle; 3]> {
    let nodes = names.map(|name| heap.allocate(name));
    for (n, node) in nodes.iter().enumerate() {
        heap.set_field(*node, "next", Some(nodes[(n + 1) % nodes.len()]))?;
    }
    Ok(nodes)
}

fn circular_references(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let [a, ..] = ring(heap, ["A", "B", "C"])?;
    heap.add_root(a);
    t.capture("rooted cycle A -> B -> C -> A", heap);

    ring(heap, ["X", "Y", "Z"])?;
    t.capture("orphan cycle X -> Y -> Z -> X", heap);

    heap.collect();
    t.capture("after collection", heap);
    Ok(())
}

fn promotion(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let persistent = heap.allocate("Persistent");
    heap.add_root(persistent);
    t.capture("initial", heap);

    for request in 1..=3 {
        heap.collect();
        t.capture(format!("after collection #{}", request), heap);
    }
    Ok(())
}

fn old_to_young(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let old = heap.allocate("Old Object");
    heap.add_root(old);
    heap.collect();
    heap.collect();
    t.capture("after ageing the root", heap);

    let young = heap.allocate("Young Object");
    t.capture("after allocating an unlinked object", heap);

    heap.set_field(old, "ref", Some(young))?;
    t.capture("after linking root -> new object", heap);

    heap.collect_young();
    t.capture("after young collection", heap);
    Ok(())
}

fn full_gc_trigger(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let root = heap.allocate("Root");
    heap.add_root(root);

    for request in 1..=10 {
        heap.allocate("Temp");
        heap.collect();
        t.note(format!("collection #{}", request), heap.counters());
    }
    t.capture("final heap", heap);
    Ok(())
}

fn root_management(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let a = heap.allocate("A");
    let b = heap.allocate("B");
    heap.add_root(a);
    heap.add_root(b);
    t.capture("two roots", heap);

    heap.collect();
    t.capture("after collection", heap);

    heap.remove_root(b);
    t.capture("after removing root B", heap);

    heap.collect();
    t.capture("after second collection", heap);
    Ok(())
}

fn acyclic_chain(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let holder = heap.allocate("root-holder");
    heap.add_root(holder);
    let a = heap.allocate("A");
    let b = heap.allocate("B");
    heap.set_field(holder, "child", Some(a))?;
    heap.set_field(a, "child", Some(b))?;
    t.capture("before removing root", heap);

    heap.remove_root(holder);
    heap.collect();
    t.capture("after removing root", heap);
    Ok(())
}

fn cycle_leak(heap: &mut Heap, t: &mut Transcript) -> HeapResult<()> {
    let a = heap.allocate("A");
    let b = heap.allocate("B");
    heap.set_field(a, "peer", Some(b))?;
    heap.set_field(b, "peer", Some(a))?;
    heap.add_root(a);
    heap.add_root(b);
    t.capture("while rooted", heap);

    heap.remove_root(a);
    heap.remove_root(b);
    heap.collect();
    t.capture("after removing roots", heap);

    for node in [a, b] {
        if heap.contains(node) {
            heap.set_field(node, "peer", None)?;
        }
    }
    heap.collect();
    t.capture("after breaking the cycle", heap);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_manager::{GenerationalGc, MarkSweepGc, RefCountGc};

    #[test]
    fn test_catalogue_names_unique() {
        let mut names: Vec<&str> = Scenario::all().iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Scenario::all().len());
    }

    #[test]
    fn test_find_unknown() {
        assert!(Scenario::find("no-such-scenario").is_none());
        assert_eq!(Scenario::find("promotion").map(|s| s.name()), Some("promotion"));
    }

    #[test]
    fn test_every_scenario_runs_on_every_collector() {
        for scenario in Scenario::all() {
            let mut generational: GenerationalGc<&'static str> = GenerationalGc::new();
            let mut mark_sweep: MarkSweepGc<&'static str> = MarkSweepGc::new();
            let mut ref_count: RefCountGc<&'static str> = RefCountGc::new();
            let heaps: [&mut Heap; 3] = [&mut generational, &mut mark_sweep, &mut ref_count];
            for heap in heaps {
                let transcript = scenario.run(heap).unwrap();
                assert!(!transcript.steps().is_empty(), "{}", scenario.name());
            }
        }
    }

    #[test]
    fn test_transcript_display() {
        let mut heap: GenerationalGc<&'static str> = GenerationalGc::new();
        let transcript = Scenario::find("promotion").unwrap().run(&mut heap).unwrap();
        let text = transcript.to_string();
        assert!(text.starts_with("=== promotion (generational) ===\n"));
        assert!(text.contains("-- after collection #2 --\nHEAP total=1, young=0, old=1, ROOTS=[1]\n"));
    }

    #[test]
    fn test_step_lookup() {
        let mut heap: GenerationalGc<&'static str> = GenerationalGc::new();
        let transcript = Scenario::find("old-to-young").unwrap().run(&mut heap).unwrap();
        assert_eq!(
            transcript.step("after young collection"),
            Some(
                "HEAP total=2, young=1, old=1, ROOTS=[1]\n\
                 _Obj #1 (val='Old Object', marked=False, freed=False, fields=[ref -> #2])\n\
                 _Obj #2 (val='Young Object', marked=False, freed=False, fields=[])"
            )
        );
        assert_eq!(transcript.step("no such step"), None);
        assert_eq!(heap.minor_count(), 3);
    }

    #[test]
    fn test_full_gc_trigger_reports_counters() {
        let mut heap: GenerationalGc<&'static str> = GenerationalGc::new();
        let transcript = Scenario::find("full-gc-trigger").unwrap().run(&mut heap).unwrap();
        assert_eq!(
            transcript.step("collection #1"),
            Some("minor_gc_count=1, young=1, old=0")
        );
        assert_eq!(
            transcript.step("collection #8"),
            Some("minor_gc_count=8, young=0, old=1")
        );
    }
}
