//! Record resolution: the parser-facing conversion surface.

use dramaturge_engine::resolve::{
    EntityRecord, PatternRecord, RuleRecord, TagRecord, resolve_entities, resolve_rule,
};
use dramaturge_foundation::{EntityId, Tag};

use crate::common::{library, library_records};

#[test]
fn fixture_library_resolves() {
    let rules = library();
    assert_eq!(rules.len(), 3);

    let hit = &rules[0];
    assert!(hit.is_action());
    assert_eq!(hit.arity(), 3);
    let names: Vec<&str> = hit.participants().iter().map(|p| &**p).collect();
    assert_eq!(names, ["dwarf", "weapon", "thing"]);

    assert!(!rules[1].is_action());
    assert_eq!(rules[1].arity(), 2);
}

#[test]
fn resolution_is_stable_across_reruns() {
    // Two passes over the same records produce identical rules.
    let records = library_records();
    let once = resolve_rule(&records[0]).unwrap();
    let twice = resolve_rule(&records[0]).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn standalone_pool_resolves_with_cross_references() {
    let records = vec![
        EntityRecord {
            name: "Urist".into(),
            index: 0,
            tags: vec![
                TagRecord {
                    tag: "dwarf".into(),
                    binds: vec![],
                },
                TagRecord {
                    tag: "hold".into(),
                    binds: vec!["Sword".into()],
                },
            ],
        },
        EntityRecord {
            name: "Sword".into(),
            index: 1,
            tags: vec![TagRecord {
                tag: "weapon".into(),
                binds: vec![],
            }],
        },
    ];

    let pool = resolve_entities(&records).unwrap();
    assert_eq!(pool.len(), 2);
    assert_eq!(&*pool[0].name, "Urist");
    assert!(pool[0].tags.contains(&Tag::with_binds("hold", vec![EntityId(1)])));
}

#[test]
fn resolved_pool_drives_the_engine() {
    use dramaturge_engine::Assignment;

    let records = vec![
        EntityRecord {
            name: "Urist".into(),
            index: 0,
            tags: vec![TagRecord {
                tag: "dwarf".into(),
                binds: vec![],
            }],
        },
        EntityRecord {
            name: "Sock".into(),
            index: 1,
            tags: vec![TagRecord {
                tag: "holdable".into(),
                binds: vec![],
            }],
        },
    ];
    let pool = resolve_entities(&records).unwrap();

    let rules = library();
    let out = rules[1]
        .forward(&pool, &Assignment::identity(2))
        .unwrap()
        .expect("pick-up applies to the parsed pool");
    assert!(out[0].tags.contains(&Tag::with_binds("hold", vec![EntityId(1)])));

    let described = rules[1].describe(&pool, &Assignment::identity(2)).unwrap();
    assert_eq!(described, "Urist picks up Sock");
}

#[test]
fn bad_records_surface_named_errors() {
    let broken = RuleRecord::new("broken", "").with_pre(vec![
        PatternRecord::require("dwarf", "hold").with_binds(vec!["nobody".into()]),
    ]);
    let err = resolve_rule(&broken).unwrap_err();
    assert!(format!("{err}").contains("nobody"));
}
