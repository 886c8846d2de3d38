//! Entity identity and immutable entity snapshots.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tag::Tag;

/// Stable entity identity key.
///
/// Distinct from an entity's position in any positional assignment: a rule
/// application may permute entities freely, but two entities are the "same"
/// iff they share an id. Anonymous pools synthesized by a search strategy
/// number their entities `0..n-1`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({})", self.0)
    }
}

/// An immutable snapshot of one entity's state.
///
/// Entities are never mutated in place: every rule application produces a
/// fresh pool of snapshots. Tag sets are persistent (`im::HashSet`), so a
/// snapshot clone shares structure with its ancestor and costs O(1).
///
/// `notags` records facts asserted-false. It is populated only during
/// backward regression, where it accumulates "must not hold" constraints
/// along a chain; forward simulation always produces entities with an empty
/// `notags`.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    /// Stable identity key.
    pub id: EntityId,
    /// Human-readable name (a placeholder for anonymous pool entities).
    pub name: Arc<str>,
    /// Currently-true parameterized facts.
    pub tags: im::HashSet<Tag>,
    /// Facts asserted-false during backward regression.
    pub notags: im::HashSet<Tag>,
}

impl Entity {
    /// Creates an entity with no tags.
    #[must_use]
    pub fn new(id: EntityId, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
            tags: im::HashSet::new(),
            notags: im::HashSet::new(),
        }
    }

    /// Creates an anonymous entity for a synthesized root pool.
    #[must_use]
    pub fn anonymous(index: u32) -> Self {
        Self::new(EntityId(index), format!("e{index}"))
    }

    /// Returns a copy of this entity with the tag added.
    #[must_use]
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Returns a copy of this entity with the fact asserted-false.
    #[must_use]
    pub fn with_notag(mut self, tag: Tag) -> Self {
        self.notags.insert(tag);
        self
    }

    /// Returns true if any tag with the given name is present.
    #[must_use]
    pub fn has_tag_named(&self, name: &str) -> bool {
        self.tags.iter().any(|t| &*t.name == name)
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<String> = self.tags.iter().map(|t| format!("+{t}")).collect();
        tags.extend(self.notags.iter().map(|t| format!("-{t}")));
        tags.sort();
        write!(f, "{}#{} {}", self.name, self.id, tags.join(" "))
    }
}
