//! Resolution of name-based parser records into index-based engine forms.
//!
//! The textual rule/entity language and its parser live outside this crate;
//! what arrives here are structured records keyed by entity *names*. This
//! module is the dedicated two-pass conversion to the engine's index-based
//! [`Rule`]/[`Pattern`]/[`Tag`] forms — names are never resolved at match
//! time.

use std::collections::HashSet;
use std::sync::Arc;

use dramaturge_foundation::{Entity, EntityId, Error, Result, Tag};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pattern::Pattern;
use crate::rule::Rule;

/// One parsed pattern: a signed tag requirement on a named entity.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternRecord {
    /// Name of the participant the requirement applies to.
    pub entity: String,
    /// True for `+tag`, false for `-tag`.
    pub sign: bool,
    /// Tag name.
    pub tag: String,
    /// Participant names the tag is parameterized by.
    pub binds: Vec<String>,
}

impl PatternRecord {
    /// Creates a required-present record.
    #[must_use]
    pub fn require(entity: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            sign: true,
            tag: tag.into(),
            binds: Vec::new(),
        }
    }

    /// Creates a required-absent record.
    #[must_use]
    pub fn forbid(entity: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            sign: false,
            tag: tag.into(),
            binds: Vec::new(),
        }
    }

    /// Sets the bind names.
    #[must_use]
    pub fn with_binds(mut self, binds: Vec<String>) -> Self {
        self.binds = binds;
        self
    }
}

/// One parsed rule: name, description template, and signed patterns keyed by
/// participant name.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RuleRecord {
    /// Rule name.
    pub name: String,
    /// Description template with `{participant}` placeholders.
    pub description: String,
    /// Preconditions.
    pub pre: Vec<PatternRecord>,
    /// Postconditions.
    pub post: Vec<PatternRecord>,
}

impl RuleRecord {
    /// Creates an empty rule record.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    /// Sets the preconditions.
    #[must_use]
    pub fn with_pre(mut self, pre: Vec<PatternRecord>) -> Self {
        self.pre = pre;
        self
    }

    /// Sets the postconditions.
    #[must_use]
    pub fn with_post(mut self, post: Vec<PatternRecord>) -> Self {
        self.post = post;
        self
    }
}

/// One parsed tag on an entity record.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TagRecord {
    /// Tag name.
    pub tag: String,
    /// Names of the entity records the tag is parameterized by.
    pub binds: Vec<String>,
}

/// One parsed standalone entity with its stable index and initial tags.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityRecord {
    /// Entity name.
    pub name: String,
    /// Stable identity index.
    pub index: u32,
    /// Initial tags, with binds naming other records.
    pub tags: Vec<TagRecord>,
}

/// Resolves one rule record into an index-based [`Rule`].
///
/// The participant list is the deduplicated union of every entity name
/// mentioned across pre+post patterns, in first-appearance order; pattern
/// entity and bind names become local indices into it.
///
/// # Errors
/// Returns [`Error::UnknownParticipant`] if a bind names an entity no
/// pattern mentions.
pub fn resolve_rule(record: &RuleRecord) -> Result<Rule> {
    let mut participants: Vec<Arc<str>> = Vec::new();
    for pattern in record.pre.iter().chain(&record.post) {
        if !participants.iter().any(|p| **p == *pattern.entity) {
            participants.push(pattern.entity.as_str().into());
        }
    }

    let slot_of = |name: &str| -> Result<usize> {
        participants
            .iter()
            .position(|p| **p == *name)
            .ok_or_else(|| Error::unknown_participant(&record.name, name))
    };

    let resolve_patterns = |records: &[PatternRecord]| -> Result<Vec<Pattern>> {
        records
            .iter()
            .map(|p| {
                Ok(Pattern {
                    sign: p.sign,
                    slot: slot_of(&p.entity)?,
                    name: p.tag.as_str().into(),
                    binds: p.binds.iter().map(|b| slot_of(b)).collect::<Result<_>>()?,
                })
            })
            .collect()
    };

    let pre = resolve_patterns(&record.pre)?;
    let post = resolve_patterns(&record.post)?;
    Rule::new(
        record.name.as_str(),
        record.description.as_str(),
        participants,
        pre,
        post,
    )
}

/// Resolves a batch of rule records.
///
/// # Errors
/// Fails on the first record that does not resolve.
pub fn resolve_rules(records: &[RuleRecord]) -> Result<Vec<Rule>> {
    records.iter().map(resolve_rule).collect()
}

/// Resolves standalone entity records into [`Entity`] values, mapping each
/// tag's bind names to the referenced records' stable indices.
///
/// # Errors
/// Returns [`Error::DuplicateEntity`] if two records share a name, or
/// [`Error::UnknownEntity`] if a bind names a record that does not exist.
pub fn resolve_entities(records: &[EntityRecord]) -> Result<Vec<Entity>> {
    let mut names: HashSet<&str> = HashSet::with_capacity(records.len());
    for record in records {
        if !names.insert(&record.name) {
            return Err(Error::duplicate_entity(&record.name));
        }
    }

    let id_of = |name: &str| -> Result<EntityId> {
        records
            .iter()
            .find(|r| r.name == name)
            .map(|r| EntityId(r.index))
            .ok_or_else(|| Error::unknown_entity(name))
    };

    records
        .iter()
        .map(|record| {
            let mut entity = Entity::new(EntityId(record.index), record.name.as_str());
            for tag in &record.tags {
                let binds = tag
                    .binds
                    .iter()
                    .map(|b| id_of(b))
                    .collect::<Result<Vec<_>>>()?;
                entity = entity.with_tag(Tag::with_binds(tag.tag.as_str(), binds));
            }
            Ok(entity)
        })
        .collect()
}
