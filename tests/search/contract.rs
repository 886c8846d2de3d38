//! The shared strategy contract: both strategies behave identically at the
//! surface, whatever their internal order.

use std::collections::HashSet;

use dramaturge_search::{Strategy, search};

use crate::common::library;

#[test]
fn both_strategies_reject_undersized_pools() {
    let (rules, root) = library();
    assert!(search(Strategy::Exhaustive, rules.clone(), root.clone(), 2, 3).is_err());
    assert!(search(Strategy::Greedy, rules, root, 2, 3).is_err());
}

#[test]
fn both_strategies_start_from_the_regressed_root() {
    let (rules, root) = library();
    for strategy in [Strategy::Exhaustive, Strategy::Greedy] {
        let mut s = search(strategy, rules.clone(), root.clone(), 3, 3).unwrap();
        let first = s.next().expect("root chain");
        assert_eq!(first.len(), 1);
        assert_eq!(first.root().unwrap().rule.name(), "weapon-hit!");
        assert!(first.entities[0].has_tag_named("dwarf"));
    }
}

#[test]
fn both_strategies_emit_only_replayable_chains() {
    let (rules, root) = library();
    for strategy in [Strategy::Exhaustive, Strategy::Greedy] {
        let s = search(strategy, rules.clone(), root.clone(), 3, 2).unwrap();
        for chain in s.take(20) {
            assert!(chain.is_valid().unwrap());
            assert!(chain.len() <= 2);
        }
    }
}

#[test]
fn strategies_agree_on_the_depth_two_frontier() {
    // Same moves, different order: the sets of depth-2 chains must match.
    let (rules, root) = library();

    let signature = |strategy| -> HashSet<String> {
        search(strategy, rules.clone(), root.clone(), 3, 2)
            .unwrap()
            .filter(|c| c.len() == 2)
            .map(|c| {
                c.chronological()
                    .map(|s| format!("{}{:?}", s.rule.name(), s.assignment.indices()))
                    .collect::<Vec<_>>()
                    .join(" -> ")
            })
            .collect()
    };

    let exhaustive = signature(Strategy::Exhaustive);
    let greedy = signature(Strategy::Greedy);
    assert_eq!(exhaustive, greedy);
    assert!(!exhaustive.is_empty());
}

#[test]
fn anonymous_root_pool_is_numbered() {
    let (rules, root) = library();
    let mut s = search(Strategy::Greedy, rules, root, 4, 1).unwrap();
    let first = s.next().expect("root chain");
    assert_eq!(first.entities.len(), 4);
    for (i, entity) in first.entities.iter().enumerate() {
        assert_eq!(u32::try_from(i).unwrap(), entity.id.0);
    }
}
