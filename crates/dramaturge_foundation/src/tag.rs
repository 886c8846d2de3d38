//! Tags: named, optionally entity-parameterized boolean facts.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Marker character for transient/event names.
///
/// A tag whose name ends in this character (e.g. `hurt!`) records "this just
/// happened" rather than a persistent fact: it survives until the start of
/// the next forward simulation step, where it is stripped before
/// postconditions are applied. A rule whose name contains this character is
/// an *action* rule (actor-driven, participant slot 0 is the actor).
pub const EVENT_MARKER: char = '!';

/// A named fact that may hold on an entity, optionally parameterized by
/// other entities.
///
/// `binds` carries the ids of the entities the fact refers to, in order —
/// `hold(sword)` on a dwarf becomes a `hold` tag whose single bind is the
/// sword's id. Two tags are equal iff they have the same name and the same
/// bind tuple.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tag {
    /// Tag name, shared cheaply between snapshots.
    pub name: Arc<str>,
    /// Ids of the entities this fact is parameterized by.
    pub binds: Vec<EntityId>,
}

impl Tag {
    /// Creates an unparameterized tag.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            binds: Vec::new(),
        }
    }

    /// Creates a tag parameterized by the given entity ids.
    #[must_use]
    pub fn with_binds(name: impl Into<Arc<str>>, binds: Vec<EntityId>) -> Self {
        Self {
            name: name.into(),
            binds,
        }
    }

    /// Returns true if this is a transient event tag (`hurt!`).
    #[must_use]
    pub fn is_event(&self) -> bool {
        self.name.ends_with(EVENT_MARKER)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.binds.is_empty() {
            write!(f, "(")?;
            for (i, b) in self.binds.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{b}")?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({self})")
    }
}
