//! Signed tag templates over rule-local participant slots.

use std::sync::Arc;

use dramaturge_foundation::{Entity, Tag};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A signed tag requirement scoped to one rule participant slot.
///
/// `slot` and every entry of `binds` are *local* indices into the owning
/// rule's participant list, not entity ids; they are resolved to concrete
/// ids only at application time, against the entities the current
/// assignment selected.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pattern {
    /// True: the tag must be present. False: the tag must be absent.
    pub sign: bool,
    /// Local participant slot the requirement applies to.
    pub slot: usize,
    /// Tag name of the template.
    pub name: Arc<str>,
    /// Local participant slots the tag is parameterized by.
    pub binds: Vec<usize>,
}

impl Pattern {
    /// Creates a required-present pattern (`+tag`).
    #[must_use]
    pub fn require(slot: usize, name: impl Into<Arc<str>>) -> Self {
        Self {
            sign: true,
            slot,
            name: name.into(),
            binds: Vec::new(),
        }
    }

    /// Creates a required-absent pattern (`-tag`).
    #[must_use]
    pub fn forbid(slot: usize, name: impl Into<Arc<str>>) -> Self {
        Self {
            sign: false,
            slot,
            name: name.into(),
            binds: Vec::new(),
        }
    }

    /// Sets the local bind slots (`+hold(thing)`).
    #[must_use]
    pub fn with_binds(mut self, binds: Vec<usize>) -> Self {
        self.binds = binds;
        self
    }

    /// Resolves the template against the rule-local entity tuple, replacing
    /// each local bind slot with that entity's id.
    #[must_use]
    pub fn resolve(&self, locals: &[Entity]) -> Tag {
        Tag::with_binds(
            self.name.clone(),
            self.binds.iter().map(|&b| locals[b].id).collect(),
        )
    }

    /// Largest local index mentioned by this pattern, used for rule
    /// construction validation.
    #[must_use]
    pub fn max_slot(&self) -> usize {
        self.binds.iter().copied().fold(self.slot, usize::max)
    }
}
