//! Chain validation: replay order, dead-end detection, and the two-rule
//! dwarf scenario.

use std::sync::Arc;

use dramaturge_engine::resolve::{PatternRecord, RuleRecord, resolve_rule};
use dramaturge_engine::{Assignment, Chain, ChainStep, Rule, check_chain};
use dramaturge_foundation::{Entity, EntityId, Tag};

use crate::common::library;

/// The compact two-rule variant: `hit!` takes only a dwarf and a weapon.
fn two_rule_library() -> (Arc<Rule>, Arc<Rule>) {
    let pick_up = resolve_rule(
        &RuleRecord::new("pick-up", "{dwarf} picks up {thing}")
            .with_pre(vec![
                PatternRecord::require("dwarf", "dwarf"),
                PatternRecord::forbid("dwarf", "hold"),
                PatternRecord::require("thing", "holdable"),
            ])
            .with_post(vec![
                PatternRecord::require("dwarf", "hold").with_binds(vec!["thing".into()]),
            ]),
    )
    .unwrap();
    let hit = resolve_rule(
        &RuleRecord::new("hit!", "{dwarf} swings {weapon}")
            .with_pre(vec![
                PatternRecord::require("dwarf", "dwarf"),
                PatternRecord::require("dwarf", "hold").with_binds(vec!["weapon".into()]),
                PatternRecord::require("weapon", "weapon"),
            ])
            .with_post(vec![PatternRecord::require("weapon", "hurt!")]),
    )
    .unwrap();
    (Arc::new(pick_up), Arc::new(hit))
}

#[test]
fn two_rule_scenario_regresses_and_replays() {
    let (pick_up, hit) = two_rule_library();
    let pool: Vec<Entity> = (0..3).map(Entity::anonymous).collect();

    // Regress hit (weapon bound to entity 2), then pick-up of the same.
    let pool = hit
        .backward(&pool, &Assignment::new(vec![0, 2]))
        .unwrap()
        .expect("hit regresses");
    let pool = pick_up
        .backward(&pool, &Assignment::new(vec![0, 2]))
        .unwrap()
        .expect("pick-up regresses");

    // Entity 0: a dwarf with a free hand.
    assert!(pool[0].has_tag_named("dwarf"));
    assert!(!pool[0].has_tag_named("hold"));
    assert!(pool[0].notags.contains(&Tag::new("hold")));
    // Entity 2: the thing to be picked up and swung.
    assert!(pool[2].has_tag_named("holdable"));
    assert!(pool[2].has_tag_named("weapon"));

    // Forward replay: pick-up then hit.
    let pool = pick_up
        .forward(&pool, &Assignment::new(vec![0, 2]))
        .unwrap()
        .expect("pick-up applies");
    assert!(pool[0].tags.contains(&Tag::with_binds("hold", vec![EntityId(2)])));
    let pool = hit
        .forward(&pool, &Assignment::new(vec![0, 2]))
        .unwrap()
        .expect("hit applies");
    assert!(pool[2].has_tag_named("hurt!"));
}

#[test]
fn check_chain_validates_the_scenario() {
    let (pick_up, hit) = two_rule_library();
    let pool: Vec<Entity> = (0..3).map(Entity::anonymous).collect();

    let steps = vec![
        ChainStep::new(hit.clone(), Assignment::new(vec![0, 2])),
        ChainStep::new(pick_up.clone(), Assignment::new(vec![0, 2])),
    ];
    let pool = hit
        .backward(&pool, &Assignment::new(vec![0, 2]))
        .unwrap()
        .unwrap();
    let pool = pick_up
        .backward(&pool, &Assignment::new(vec![0, 2]))
        .unwrap()
        .unwrap();

    let chain = Chain {
        entities: pool,
        steps,
    };
    assert!(chain.is_valid().unwrap());
}

#[test]
fn replay_catches_contradictions_regression_misses() {
    // Regressing pick-up of a *different* thing under an occupied hand is
    // locally consistent (tag names stay unique) but cannot replay: the
    // `-hold` precondition fails once simulated forward.
    let rules = library();
    let hit = rules[0].clone();
    let pick_up = rules[1].clone();

    let pool: Vec<Entity> = (0..3).map(Entity::anonymous).collect();
    let pool = hit
        .backward(&pool, &Assignment::new(vec![0, 1, 2]))
        .unwrap()
        .expect("hit regresses");

    let steps = vec![
        ChainStep::new(hit, Assignment::new(vec![0, 1, 2])),
        ChainStep::new(pick_up.clone(), Assignment::new(vec![0, 2])),
    ];
    let regressed = pick_up
        .backward(&pool, &Assignment::new(vec![0, 2]))
        .unwrap()
        .expect("locally consistent");

    assert!(!check_chain(&regressed, &steps).unwrap());
}

#[test]
fn empty_pool_never_validates() {
    assert!(!check_chain(&[], &[]).unwrap());
}
