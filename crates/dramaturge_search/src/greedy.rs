//! Greedy best-first enumeration of backward-chaining plans.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

use dramaturge_engine::{Assignment, Chain, ChainStep, Rule, check_chain};
use dramaturge_foundation::{Entity, Error, Result};

use crate::permute::Permutations;

/// Scoring function for frontier entries: lower scores pop first.
///
/// Receives the regressed pool the entry grew from and the candidate steps
/// (newest last). The default scorer is a constant placeholder — root 0,
/// every successor 1 — kept deliberately dumb until a real heuristic is
/// settled; the frontier machinery does not depend on what the score means.
pub type Scorer = Box<dyn Fn(&[Entity], &[ChainStep]) -> i64>;

/// A frontier entry whose newest step has not yet been regressed into its
/// stored pool. Ordered by `(score, seq)` so equal scores pop in insertion
/// order.
struct FrontierEntry {
    score: i64,
    seq: u64,
    entities: Vec<Entity>,
    steps: Vec<ChainStep>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.score, self.seq).cmp(&(other.score, other.seq))
    }
}

/// Best-first enumeration over a priority frontier, surfacing shallow and
/// cheap chains before deep ones.
///
/// The moves are the same as [`ExhaustiveSearch`]'s; only the order
/// differs. Regression of an entry's newest step is deferred to pop time,
/// so pushing successors costs no rule applications — each pull pops
/// entries until one regresses and replays cleanly, pushes that entry's
/// successors, and emits it.
///
/// [`ExhaustiveSearch`]: crate::ExhaustiveSearch
pub struct GreedySearch {
    rules: Vec<Arc<Rule>>,
    max_depth: usize,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
    scorer: Scorer,
    seq: u64,
    expanded: usize,
    regressions: usize,
}

impl GreedySearch {
    /// Seeds the frontier with the root entry: score 0, an anonymous pool
    /// of `num_entities`, and the root rule bound to the identity
    /// assignment.
    ///
    /// # Errors
    /// Returns [`Error::PoolTooSmall`] if the pool cannot cover the root
    /// rule's participants.
    pub fn new(
        rules: Vec<Arc<Rule>>,
        root: Arc<Rule>,
        num_entities: usize,
        max_depth: usize,
    ) -> Result<Self> {
        if num_entities < root.arity() {
            return Err(Error::pool_too_small(root.arity(), num_entities));
        }

        #[allow(clippy::cast_possible_truncation)]
        let pool: Vec<Entity> = (0..num_entities).map(|i| Entity::anonymous(i as u32)).collect();
        let steps = vec![ChainStep::new(root.clone(), Assignment::identity(root.arity()))];

        let mut frontier = BinaryHeap::new();
        frontier.push(Reverse(FrontierEntry {
            score: 0,
            seq: 0,
            entities: pool,
            steps,
        }));

        Ok(Self {
            rules,
            max_depth,
            frontier,
            scorer: Box::new(|_, _| 1),
            seq: 0,
            expanded: 0,
            regressions: 0,
        })
    }

    /// Replaces the frontier scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: impl Fn(&[Entity], &[ChainStep]) -> i64 + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    /// Number of chains emitted so far.
    #[must_use]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of backward regression attempts so far.
    #[must_use]
    pub fn regressions(&self) -> usize {
        self.regressions
    }
}

impl Iterator for GreedySearch {
    type Item = Chain;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Reverse(entry) = self.frontier.pop()?;
            let FrontierEntry {
                entities, steps, ..
            } = entry;
            let Some(newest) = steps.last() else {
                continue;
            };

            self.regressions += 1;
            // Assignments come from right-sized permutations, so the error
            // arm cannot trigger; both it and a contradiction discard the
            // entry.
            let Ok(Some(regressed)) = newest.rule.backward(&entities, &newest.assignment) else {
                continue;
            };
            if !matches!(check_chain(&regressed, &steps), Ok(true)) {
                continue;
            }

            self.expanded += 1;

            if steps.len() < self.max_depth {
                for rule in &self.rules {
                    for perm in Permutations::new(regressed.len(), rule.arity()) {
                        // Action rules keep the distinguished actor in slot 0.
                        if rule.is_action() && perm.first() != Some(&0) {
                            continue;
                        }
                        let mut child_steps = steps.clone();
                        child_steps.push(ChainStep::new(rule.clone(), Assignment::new(perm)));
                        let score = (self.scorer)(&regressed, &child_steps);
                        self.seq += 1;
                        self.frontier.push(Reverse(FrontierEntry {
                            score,
                            seq: self.seq,
                            entities: regressed.clone(),
                            steps: child_steps,
                        }));
                    }
                }
            }

            return Some(Chain {
                entities: regressed,
                steps,
            });
        }
    }
}
