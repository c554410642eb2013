//! A single node in the netlist, and the argument form its inputs take.
use crate::primitive::Primitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A stable, non-negative integer identifying a net within its netlist.
/// Used to generate wire names and to resolve [`NetInput::Wire`]
/// references.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct InstId(pub u64);

impl std::fmt::Display for InstId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for InstId {
    fn from(v: u64) -> Self {
        InstId(v)
    }
}

/// The argument form of a primitive: either a reference to a previously
/// materialised output wire of another net, or an inlined sub-expression
/// tree. A `Tree`'s root primitive may be anything; the printer renders it
/// bare when [`Primitive::is_inlinable`] holds, and parenthesised otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetInput {
    Wire(InstId, usize),
    Tree(Primitive, Vec<NetInput>),
}

/// One node in the netlist: an instance id, the primitive it instantiates,
/// its input edges, a de-duplicated set of user-chosen name-hint
/// substrings, and (for `Custom` only) the positional names of its output
/// ports.
///
/// Name hints are stored in a [`BTreeSet`] rather than the unordered
/// container elaboration happens to accumulate them into, so that
/// lexicographic ordering (required for deterministic output) is an
/// invariant of the type rather than something every reader has to
/// remember to restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Net {
    pub id: InstId,
    pub prim: Primitive,
    pub inputs: Vec<NetInput>,
    #[serde(default)]
    pub name_hints: BTreeSet<String>,
    #[serde(default)]
    pub output_names: Option<Vec<String>>,
}

impl Net {
    pub fn new(id: impl Into<InstId>, prim: Primitive, inputs: Vec<NetInput>) -> Self {
        Self {
            id: id.into(),
            prim,
            inputs,
            name_hints: BTreeSet::new(),
            output_names: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.name_hints.insert(hint.into());
        self
    }

    pub fn with_output_names(mut self, names: Vec<String>) -> Self {
        self.output_names = Some(names);
        self
    }
}
