//! Backward-chaining search strategies for Dramaturge.
//!
//! This crate provides:
//! - [`ExhaustiveSearch`] - Depth-bounded DFS over every rule/permutation move
//! - [`GreedySearch`] - Best-first enumeration over a priority frontier
//! - [`Strategy`] / [`search`] - A single dispatching entry point
//!
//! Both strategies share one contract: construction takes the rule library,
//! the target ("root") rule, the anonymous pool size, and a maximum chain
//! length; iteration lazily yields validated [`Chain`]s. The space is finite
//! in principle but intractably large in practice — callers are expected to
//! truncate consumption (`take`, or filter then `take`) rather than exhaust
//! it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod exhaustive;
mod greedy;
pub mod permute;

use std::sync::Arc;

use dramaturge_engine::{Chain, Rule};
use dramaturge_foundation::Result;

pub use exhaustive::ExhaustiveSearch;
pub use greedy::{GreedySearch, Scorer};

/// Which search strategy to run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Strategy {
    /// Depth-first enumeration of every combination.
    Exhaustive,
    /// Best-first enumeration over a priority frontier.
    Greedy,
}

/// A running search of either strategy.
pub enum Search {
    /// An exhaustive search.
    Exhaustive(ExhaustiveSearch),
    /// A greedy search.
    Greedy(GreedySearch),
}

impl Search {
    /// Number of chains emitted so far.
    #[must_use]
    pub fn expanded(&self) -> usize {
        match self {
            Self::Exhaustive(s) => s.expanded(),
            Self::Greedy(s) => s.expanded(),
        }
    }

    /// Number of backward regression attempts so far.
    #[must_use]
    pub fn regressions(&self) -> usize {
        match self {
            Self::Exhaustive(s) => s.regressions(),
            Self::Greedy(s) => s.regressions(),
        }
    }
}

impl Iterator for Search {
    type Item = Chain;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Exhaustive(s) => s.next(),
            Self::Greedy(s) => s.next(),
        }
    }
}

/// Starts a search for chains reaching `root`, over `num_entities` anonymous
/// entities, never exceeding `max_depth` applications.
///
/// # Errors
/// Returns [`dramaturge_foundation::Error::PoolTooSmall`] if the pool cannot
/// cover the root rule's participants.
pub fn search(
    strategy: Strategy,
    rules: Vec<Arc<Rule>>,
    root: Arc<Rule>,
    num_entities: usize,
    max_depth: usize,
) -> Result<Search> {
    match strategy {
        Strategy::Exhaustive => Ok(Search::Exhaustive(ExhaustiveSearch::new(
            rules,
            root,
            num_entities,
            max_depth,
        )?)),
        Strategy::Greedy => Ok(Search::Greedy(GreedySearch::new(
            rules,
            root,
            num_entities,
            max_depth,
        )?)),
    }
}
