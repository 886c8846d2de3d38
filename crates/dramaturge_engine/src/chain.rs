//! Candidate rule chains and forward-replay validation.

use std::sync::Arc;

use dramaturge_foundation::{Entity, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::assign::Assignment;
use crate::rule::Rule;

/// One rule application inside a chain: a rule plus the assignment that
/// binds its participant slots to pool positions.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainStep {
    /// The rule being applied.
    pub rule: Arc<Rule>,
    /// Pool positions bound to the rule's participant slots.
    pub assignment: Assignment,
}

impl ChainStep {
    /// Creates a chain step.
    #[must_use]
    pub fn new(rule: Arc<Rule>, assignment: Assignment) -> Self {
        Self { rule, assignment }
    }
}

/// A synthesized start state plus the ordered rule applications leading to
/// the target.
///
/// Steps are stored goal-first: the root/target rule is the first-inserted
/// element at index 0, and each backward regression appends the
/// temporally-earlier application after it. Chronological replay therefore
/// iterates the list in reverse — see [`Chain::chronological`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Chain {
    /// The synthesized start pool.
    pub entities: Vec<Entity>,
    /// Rule applications, goal-first.
    pub steps: Vec<ChainStep>,
}

impl Chain {
    /// Number of rule applications in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True if the chain holds no applications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The target application the chain was grown from.
    #[must_use]
    pub fn root(&self) -> Option<&ChainStep> {
        self.steps.first()
    }

    /// The most recently regressed application — temporally the first to
    /// fire.
    #[must_use]
    pub fn newest(&self) -> Option<&ChainStep> {
        self.steps.last()
    }

    /// Steps in the order the simulation would fire them.
    pub fn chronological(&self) -> impl Iterator<Item = &ChainStep> {
        self.steps.iter().rev()
    }

    /// Replays this chain from its own start state.
    ///
    /// # Errors
    /// Propagates arity errors from malformed steps.
    pub fn is_valid(&self) -> Result<bool> {
        check_chain(&self.entities, &self.steps)
    }
}

/// Replays `steps` chronologically from `entities` via forward application.
///
/// Returns `Ok(false)` if the pool is empty or any step turns out to be
/// inapplicable. Backward regression only enforces per-entity tag-name
/// uniqueness locally; contradictions that span entities or steps only
/// surface under forward re-simulation, so every candidate chain a search
/// strategy emits must pass this check first.
///
/// # Errors
/// Propagates arity errors from malformed steps — never from ordinary
/// planning dead ends.
pub fn check_chain(entities: &[Entity], steps: &[ChainStep]) -> Result<bool> {
    if entities.is_empty() {
        return Ok(false);
    }
    let mut pool = entities.to_vec();
    for step in steps.iter().rev() {
        match step.rule.forward(&pool, &step.assignment)? {
            Some(next) => pool = next,
            None => return Ok(false),
        }
    }
    Ok(true)
}
