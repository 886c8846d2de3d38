//! The weak positional tag-matching calculus.
//!
//! Matching is deliberately weak on binds: only the positions supplied by
//! the shorter bind tuple are compared, so an unparameterized `-hold`
//! pattern matches (and can forbid) a `hold(sword)` tag. This is what makes
//! partial binding patterns expressive enough for the rule language.

use dramaturge_foundation::{Entity, Tag};

use crate::pattern::Pattern;

/// Returns true if the entity carries a tag matching the template: same
/// name, and bind ids equal on every position both tuples supply.
#[must_use]
pub fn tag_match(entity: &Entity, template: &Tag) -> bool {
    entity.tags.iter().any(|t| {
        t.name == template.name
            && t.binds
                .iter()
                .zip(template.binds.iter())
                .all(|(have, want)| have == want)
    })
}

/// Returns true if the rule-local entity tuple satisfies the pattern,
/// honoring its sign: a negated pattern is satisfied exactly when no
/// matching tag is present.
#[must_use]
pub fn pattern_match(pattern: &Pattern, locals: &[Entity]) -> bool {
    tag_match(&locals[pattern.slot], &pattern.resolve(locals)) == pattern.sign
}
