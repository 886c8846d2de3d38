//! Rules and their forward/backward application semantics.

use std::collections::HashSet;
use std::sync::Arc;

use dramaturge_foundation::{EVENT_MARKER, Entity, Error, Result, Tag};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::assign::Assignment;
use crate::matcher;
use crate::pattern::Pattern;

/// A named precondition → postcondition transformation over a fixed number
/// of participant slots.
///
/// Participants are the deduplicated, first-appearance-ordered entity names
/// mentioned across the rule's patterns; every pattern's local indices point
/// into that list. A rule whose name contains [`EVENT_MARKER`] is an
/// *action* rule: by search-strategy convention its slot 0 (the actor) is
/// only ever bound to the distinguished pool entity at index 0.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    name: Arc<str>,
    description: Arc<str>,
    participants: Vec<Arc<str>>,
    pre: Vec<Pattern>,
    post: Vec<Pattern>,
    is_action: bool,
}

impl Rule {
    /// Creates a rule, validating that every pattern's slot and bind indices
    /// fall inside the participant list.
    ///
    /// # Errors
    /// Returns [`Error::SlotOutOfRange`] if any pattern references a local
    /// index `>= participants.len()`.
    pub fn new(
        name: impl Into<Arc<str>>,
        description: impl Into<Arc<str>>,
        participants: Vec<Arc<str>>,
        pre: Vec<Pattern>,
        post: Vec<Pattern>,
    ) -> Result<Self> {
        let name = name.into();
        let arity = participants.len();
        for pattern in pre.iter().chain(&post) {
            let max = pattern.max_slot();
            if max >= arity {
                return Err(Error::slot_out_of_range(&*name, max, arity));
            }
        }
        let is_action = name.contains(EVENT_MARKER);
        Ok(Self {
            name,
            description: description.into(),
            participants,
            pre,
            post,
            is_action,
        })
    }

    /// Rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description template, with `{participant}` placeholders.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Participant names, in local slot order.
    #[must_use]
    pub fn participants(&self) -> &[Arc<str>] {
        &self.participants
    }

    /// Number of participant slots.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.participants.len()
    }

    /// True if this is an actor-driven action rule.
    #[must_use]
    pub fn is_action(&self) -> bool {
        self.is_action
    }

    /// Preconditions, in declaration order.
    #[must_use]
    pub fn pre(&self) -> &[Pattern] {
        &self.pre
    }

    /// Postconditions, in declaration order.
    #[must_use]
    pub fn post(&self) -> &[Pattern] {
        &self.post
    }

    /// Resolves the rule-local entity tuple via the assignment.
    fn locals(&self, pool: &[Entity], assignment: &Assignment) -> Result<Vec<Entity>> {
        if assignment.len() < self.arity() || pool.len() < self.arity() {
            return Err(Error::arity_mismatch(
                &*self.name,
                self.arity(),
                assignment.len().min(pool.len()),
            ));
        }
        assignment.select(pool, self.arity())
    }

    /// Applies the rule forwards, as the simulation would.
    ///
    /// Checks preconditions against the selected entities and, if the rule
    /// is applicable, produces a new pool reflecting the postconditions.
    /// Event tags are visible to this step's preconditions but stripped from
    /// the produced state. Returns `Ok(None)` when a precondition fails —
    /// a normal "not applicable" outcome with no partial effects.
    ///
    /// # Errors
    /// Returns an error if the assignment or pool is smaller than the rule's
    /// participant count.
    pub fn forward(&self, pool: &[Entity], assignment: &Assignment) -> Result<Option<Vec<Entity>>> {
        let locals = self.locals(pool, assignment)?;

        if !self.pre.iter().all(|p| matcher::pattern_match(p, &locals)) {
            return Ok(None);
        }

        let mut working: Vec<im::HashSet<Tag>> = locals
            .iter()
            .map(|e| e.tags.iter().filter(|t| !t.is_event()).cloned().collect())
            .collect();

        for pattern in &self.post {
            let tag = pattern.resolve(&locals);
            if pattern.sign {
                working[pattern.slot].insert(tag);
            } else {
                // A negative postcondition clears the name outright,
                // whatever the binds.
                let kept: im::HashSet<Tag> = working[pattern.slot]
                    .iter()
                    .filter(|t| t.name != tag.name)
                    .cloned()
                    .collect();
                working[pattern.slot] = kept;
            }
        }

        let updated = locals
            .iter()
            .zip(working)
            .map(|(e, tags)| Entity {
                id: e.id,
                name: e.name.clone(),
                tags,
                notags: im::HashSet::new(),
            })
            .collect();
        Ok(Some(assignment.splice(pool, updated)))
    }

    /// Applies the rule backwards, regressing a goal state into a state the
    /// planner must still explain.
    ///
    /// The produced entities satisfy the rule's preconditions and no longer
    /// assert its postconditions: positive postconditions are discarded from
    /// `tags`, negative ones from `notags`; then positive preconditions are
    /// added to `tags` and negative ones to `notags`, where they persist so
    /// downstream regression keeps accumulating exclusion constraints.
    ///
    /// Returns `Ok(None)` when the regression is contradictory: some entity
    /// would end up with two tags sharing a name but differing binds (e.g.
    /// holding two things at once under a single-hold convention). This is a
    /// normal, expected search dead end.
    ///
    /// # Errors
    /// Returns an error if the assignment or pool is smaller than the rule's
    /// participant count.
    pub fn backward(
        &self,
        pool: &[Entity],
        assignment: &Assignment,
    ) -> Result<Option<Vec<Entity>>> {
        let locals = self.locals(pool, assignment)?;

        let mut tags: Vec<im::HashSet<Tag>> = locals.iter().map(|e| e.tags.clone()).collect();
        let mut notags: Vec<im::HashSet<Tag>> = locals.iter().map(|e| e.notags.clone()).collect();

        for pattern in &self.post {
            let tag = pattern.resolve(&locals);
            if pattern.sign {
                tags[pattern.slot].remove(&tag);
            } else {
                notags[pattern.slot].remove(&tag);
            }
        }

        for pattern in &self.pre {
            let tag = pattern.resolve(&locals);
            if pattern.sign {
                tags[pattern.slot].insert(tag);
            } else {
                notags[pattern.slot].insert(tag);
            }
        }

        // The sets already deduplicate identical tags, so two entries
        // sharing a name necessarily differ in binds: one repeated name is
        // a contradiction.
        for set in &tags {
            let mut seen = HashSet::with_capacity(set.len());
            for tag in set {
                if !seen.insert(&*tag.name) {
                    return Ok(None);
                }
            }
        }

        let updated = locals
            .iter()
            .zip(tags.into_iter().zip(notags))
            .map(|(e, (tags, notags))| Entity {
                id: e.id,
                name: e.name.clone(),
                tags,
                notags,
            })
            .collect();
        Ok(Some(assignment.splice(pool, updated)))
    }

    /// Renders the description template for a concrete application,
    /// substituting each `{participant}` placeholder with the bound
    /// entity's name.
    ///
    /// # Errors
    /// Returns an error if the assignment or pool is smaller than the rule's
    /// participant count.
    pub fn describe(&self, pool: &[Entity], assignment: &Assignment) -> Result<String> {
        let locals = self.locals(pool, assignment)?;
        let mut text = self.description.to_string();
        for (name, entity) in self.participants.iter().zip(&locals) {
            text = text.replace(&format!("{{{name}}}"), &entity.name);
        }
        Ok(text)
    }
}
