//! Shared fixtures: the dwarf/weapon rule library, built through record
//! resolution the way parser output arrives.

use std::sync::Arc;

use dramaturge_engine::Rule;
use dramaturge_engine::resolve::{PatternRecord, RuleRecord, resolve_rules};

/// `weapon-hit!`, `pick-up`, `drop` — in that order.
pub fn library_records() -> Vec<RuleRecord> {
    vec![
        RuleRecord::new("weapon-hit!", "{dwarf} hits {thing} with {weapon}")
            .with_pre(vec![
                PatternRecord::require("dwarf", "dwarf"),
                PatternRecord::require("dwarf", "hold").with_binds(vec!["weapon".into()]),
                PatternRecord::require("weapon", "weapon"),
            ])
            .with_post(vec![PatternRecord::require("thing", "hurt!")]),
        RuleRecord::new("pick-up", "{dwarf} picks up {thing}")
            .with_pre(vec![
                PatternRecord::require("dwarf", "dwarf"),
                PatternRecord::forbid("dwarf", "hold"),
                PatternRecord::require("thing", "holdable"),
            ])
            .with_post(vec![
                PatternRecord::require("dwarf", "hold").with_binds(vec!["thing".into()]),
            ]),
        RuleRecord::new("drop", "{dwarf} drops {thing}")
            .with_pre(vec![
                PatternRecord::require("dwarf", "dwarf"),
                PatternRecord::require("dwarf", "hold").with_binds(vec!["thing".into()]),
                PatternRecord::require("thing", "holdable"),
            ])
            .with_post(vec![PatternRecord::forbid("dwarf", "hold")]),
    ]
}

pub fn library() -> Vec<Arc<Rule>> {
    resolve_rules(&library_records())
        .unwrap()
        .into_iter()
        .map(Arc::new)
        .collect()
}
