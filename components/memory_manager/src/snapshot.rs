//! Diagnostic heap dumps.
//!
//! The text form is the only structural dump the collectors expose, and it is
//! compared line for line against reference output, so the layout here is
//! fixed:
//!
//! ```text
//! HEAP total=3, young=2, old=1, ROOTS=[1]
//! _Obj #1 (val='A', marked=False, freed=False, fields=[next -> #2])
//! ```
//!
//! Booleans are written `False`/`True` and payloads go through
//! [`Repr`](crate::repr::Repr) to match that reference output.

use std::collections::BTreeSet;
use std::fmt;

use core_types::ObjectId;

use crate::object::ObjectRecord;
use crate::repr::{Repr, ReprOf};

/// Renders a flag the way reference dumps spell it.
pub(crate) fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

/// Sorted root identifiers, e.g. `[1, 4]`.
pub(crate) struct RootList<'a>(pub &'a BTreeSet<ObjectId>);

impl fmt::Display for RootList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", id.get())?;
        }
        f.write_str("]")
    }
}

/// Outgoing edges in insertion order, e.g. `[left -> #2, right -> #4]`.
pub(crate) struct FieldList<'a, T>(pub &'a ObjectRecord<T>);

impl<T> fmt::Display for FieldList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (name, target)) in self.0.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} -> {}", name, target)?;
        }
        f.write_str("]")
    }
}

/// Outgoing edges as a list of quoted strings, e.g. `['child -> #2']`.
pub(crate) struct QuotedFieldList<'a, T>(pub &'a ObjectRecord<T>);

impl<T> fmt::Display for QuotedFieldList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, (name, target)) in self.0.fields().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let edge = format!("{} -> {}", name, target);
            write!(f, "{}", ReprOf(edge.as_str()))?;
        }
        f.write_str("]")
    }
}

/// One object line of a mark-based collector dump.
pub(crate) struct ObjectLine<'a, T>(pub &'a ObjectRecord<T>);

impl<T: Repr> fmt::Display for ObjectLine<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.0;
        write!(
            f,
            "_Obj {} (val={}, marked={}, freed={}, fields={})",
            record.id(),
            ReprOf(record.value()),
            flag(record.is_marked()),
            flag(record.is_freed()),
            FieldList(record)
        )
    }
}

/// Joins a header and the rendered object lines with newlines.
pub(crate) fn join_lines<I>(header: String, lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = header;
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    out
}
