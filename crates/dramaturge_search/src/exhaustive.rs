//! Exhaustive depth-bounded enumeration of backward-chaining plans.

use std::sync::Arc;

use dramaturge_engine::{Assignment, Chain, ChainStep, Rule, check_chain};
use dramaturge_foundation::{Entity, Error, Result};

use crate::permute::Permutations;

/// One search node: a pool fully regressed through the newest step of its
/// chain, i.e. the state before that step fires.
struct Node {
    entities: Vec<Entity>,
    steps: Vec<ChainStep>,
}

/// Depth-first enumeration of every rule/permutation combination, lazily
/// produced in preorder.
///
/// Each pull pops one node off an explicit stack, expands it (one backward
/// regression attempt per rule per qualifying permutation, each survivor
/// chain-validated), pushes the children, and emits the node as a [`Chain`].
/// Nothing is buffered beyond the stack: stopping iteration abandons the
/// remainder of the tree unexplored.
pub struct ExhaustiveSearch {
    rules: Vec<Arc<Rule>>,
    max_depth: usize,
    stack: Vec<Node>,
    expanded: usize,
    regressions: usize,
}

impl ExhaustiveSearch {
    /// Seeds the search: an anonymous pool of `num_entities`, with the root
    /// rule bound to the identity assignment, regressed and validated.
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
        let assignment = Assignment::identity(root.arity());
        let steps = vec![ChainStep::new(root.clone(), assignment.clone())];

        let mut search = Self {
            rules,
            max_depth,
            stack: Vec::new(),
            expanded: 0,
            regressions: 0,
        };
        search.regressions += 1;
        if let Some(regressed) = root.backward(&pool, &assignment)? {
            if check_chain(&regressed, &steps)? {
                search.stack.push(Node {
                    entities: regressed,
                    steps,
                });
            }
        }
        Ok(search)
    }

    /// Number of nodes emitted so far.
    #[must_use]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Number of backward regression attempts so far. Laziness shows up
    /// here: pulling one chain costs one node expansion, not the tree.
    #[must_use]
    pub fn regressions(&self) -> usize {
        self.regressions
    }

    /// Generates the validated children of a node, in rule/permutation
    /// order. Returns the children together with the number of regression
    /// attempts spent.
    fn successors(&self, node: &Node) -> (Vec<Node>, usize) {
        let mut children = Vec::new();
        let mut attempts = 0;

        for rule in &self.rules {
            for perm in Permutations::new(node.entities.len(), rule.arity()) {
                // Action rules keep the distinguished actor in slot 0.
                if rule.is_action() && perm.first() != Some(&0) {
                    continue;
                }
                let assignment = Assignment::new(perm);
                attempts += 1;
                // Arity is fixed by the permutation length, so the error arm
                // cannot trigger here; both it and a contradictory
                // regression prune the branch.
                let Ok(Some(regressed)) = rule.backward(&node.entities, &assignment) else {
                    continue;
                };
                let mut steps = node.steps.clone();
                steps.push(ChainStep::new(rule.clone(), assignment));
                if matches!(check_chain(&regressed, &steps), Ok(true)) {
                    children.push(Node {
                        entities: regressed,
                        steps,
                    });
                }
            }
        }
        (children, attempts)
    }
}

impl Iterator for ExhaustiveSearch {
    type Item = Chain;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.expanded += 1;

        if node.steps.len() < self.max_depth {
            let (mut children, attempts) = self.successors(&node);
            self.regressions += attempts;
            // Reversed so the first child generated is the next popped:
            // depth-first preorder.
            children.reverse();
            self.stack.extend(children);
        }

        Some(Chain {
            entities: node.entities,
            steps: node.steps,
        })
    }
}
