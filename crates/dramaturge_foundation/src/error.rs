//! Error types for the Dramaturge system.
//!
//! Uses `thiserror` for ergonomic error definition. Note that most planner
//! "failures" are not errors at all: an inapplicable forward step, a
//! contradictory regression, and a chain that fails replay are all normal
//! search outcomes expressed as `Ok(None)` / `Ok(false)`. The variants here
//! signal caller misuse or malformed input records.

use thiserror::Error;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Dramaturge operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Pool or assignment smaller than a rule's participant count.
    #[error("not enough entities for rule '{rule}': needs {expected}, got {actual}")]
    ArityMismatch {
        /// The rule being applied.
        rule: String,
        /// The rule's participant count.
        expected: usize,
        /// Entities actually supplied.
        actual: usize,
    },

    /// Assignment index outside the entity pool.
    #[error("assignment index out of bounds: {index} (pool size {length})")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The pool size.
        length: usize,
    },

    /// A pattern references a participant slot the rule does not have.
    #[error("pattern slot out of range in rule '{rule}': index {index}, arity {arity}")]
    SlotOutOfRange {
        /// The rule being constructed.
        rule: String,
        /// The offending local index.
        index: usize,
        /// The rule's participant count.
        arity: usize,
    },

    /// A bind name in a rule record does not name any participant.
    #[error("unknown participant '{name}' in rule '{rule}'")]
    UnknownParticipant {
        /// The rule being resolved.
        rule: String,
        /// The unresolvable name.
        name: String,
    },

    /// An entity record's tag bind references a name with no record.
    #[error("unknown entity '{name}'")]
    UnknownEntity {
        /// The unresolvable name.
        name: String,
    },

    /// Two entity records share a name.
    #[error("duplicate entity '{name}'")]
    DuplicateEntity {
        /// The colliding name.
        name: String,
    },

    /// A search was configured with fewer anonymous entities than the root
    /// rule's participant count.
    #[error("entity pool too small: root rule needs {needed}, pool has {actual}")]
    PoolTooSmall {
        /// The root rule's participant count.
        needed: usize,
        /// The configured pool size.
        actual: usize,
    },
}

impl Error {
    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(rule: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            rule: rule.into(),
            expected,
            actual,
        }
    }

    /// Creates an index out of bounds error.
    #[must_use]
    pub fn index_out_of_bounds(index: usize, length: usize) -> Self {
        Self::IndexOutOfBounds { index, length }
    }

    /// Creates a slot out of range error.
    #[must_use]
    pub fn slot_out_of_range(rule: impl Into<String>, index: usize, arity: usize) -> Self {
        Self::SlotOutOfRange {
            rule: rule.into(),
            index,
            arity,
        }
    }

    /// Creates an unknown participant error.
    #[must_use]
    pub fn unknown_participant(rule: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownParticipant {
            rule: rule.into(),
            name: name.into(),
        }
    }

    /// Creates an unknown entity error.
    #[must_use]
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }

    /// Creates a duplicate entity error.
    #[must_use]
    pub fn duplicate_entity(name: impl Into<String>) -> Self {
        Self::DuplicateEntity { name: name.into() }
    }

    /// Creates a pool too small error.
    #[must_use]
    pub fn pool_too_small(needed: usize, actual: usize) -> Self {
        Self::PoolTooSmall { needed, actual }
    }
}
