use super::*;
use crate::model::step::HighlightShape;

fn rect(l: i32, t: i32, r: i32, b: i32) -> PixelRect {
    PixelRect::new(l, t, r, b)
}

// root
// ├── header [tag=title]
// │   └── menu [tag=dup, id=2]
// ├── body
// │   ├── card [tag=dup, id=2]
// │   └── hidden [tag=ghost, hidden]
// └── footer [id=9, zero height]
fn sample_tree() -> UiNode {
    UiNode::new(rect(0, 0, 400, 800)).with_children(vec![
        UiNode::new(rect(0, 0, 400, 60))
            .with_tag("title")
            .with_children(vec![UiNode::new(rect(10, 10, 50, 50)).with_tag("dup").with_id(2)]),
        UiNode::new(rect(0, 60, 400, 700)).with_children(vec![
            UiNode::new(rect(20, 100, 380, 300)).with_tag("dup").with_id(2),
            UiNode::new(rect(20, 320, 380, 400)).with_tag("ghost").hidden(),
        ]),
        UiNode::new(rect(0, 700, 400, 700)).with_id(9),
    ])
}

#[test]
fn pre_order_visits_parents_before_children_in_sibling_order() {
    let tree = sample_tree();
    let order: Vec<PixelRect> = tree.pre_order().map(|n| n.bounds).collect();
    assert_eq!(
        order,
        vec![
            rect(0, 0, 400, 800),
            rect(0, 0, 400, 60),
            rect(10, 10, 50, 50),
            rect(0, 60, 400, 700),
            rect(20, 100, 380, 300),
            rect(20, 320, 380, 400),
            rect(0, 700, 400, 700),
        ]
    );
}

#[test]
fn find_by_tag_returns_all_matches_earliest_first() {
    let tree = sample_tree();
    let found = find_by_tag(&tree, "dup");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].bounds, rect(10, 10, 50, 50));
    assert_eq!(found[1].bounds, rect(20, 100, 380, 300));
    assert!(find_by_tag(&tree, "nope").is_empty());
}

#[test]
fn find_by_id_returns_first_pre_order_match() {
    let tree = sample_tree();
    assert_eq!(find_by_id(&tree, 2).unwrap().bounds, rect(10, 10, 50, 50));
    assert!(find_by_id(&tree, 1234).is_none());
}

#[test]
fn tag_resolution_skips_invisible_candidates() {
    let mut tree = sample_tree();
    tree.children[0].children[0].visible = false;
    tree.children[0].children[0].shown = false;

    let targets = resolve_all(&tree, &[Step::with_tag("dup", "second one wins")]);
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].rect, rect(20, 100, 380, 300));
}

#[test]
fn resolve_all_preserves_step_order_and_drops_unusable_targets() {
    let tree = sample_tree();
    let steps = vec![
        Step::with_id(2, "first"),
        Step::with_tag("ghost", "hidden target"),
        Step::with_tag("missing", "absent target"),
        Step::with_id(9, "zero area"),
        Step::with_tag("title", "title bar").shape(HighlightShape::Circle),
    ];

    let targets = resolve_all(&tree, &steps);
    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].text, "first");
    assert_eq!(targets[0].step_index, 0);
    assert_eq!(targets[1].text, "title bar");
    assert_eq!(targets[1].step_index, 4);
    assert_eq!(targets[1].shape, HighlightShape::Circle);
}

#[test]
fn resolve_each_reports_the_reason_for_every_drop() {
    let tree = sample_tree();
    let steps = vec![
        Step::with_tag("ghost", "a"),
        Step::with_tag("missing", "b"),
        Step::with_id(9, "c"),
        Step::with_tag("title", "d"),
    ];
    let outcomes = resolve_each(&tree, &steps);
    assert_eq!(outcomes[0], StepResolution::NotFound);
    assert_eq!(outcomes[1], StepResolution::NotFound);
    assert_eq!(outcomes[2], StepResolution::EmptyBounds(rect(0, 700, 400, 700)));
    assert_eq!(outcomes[3].target().unwrap().rect, rect(0, 0, 400, 60));
}

#[test]
fn id_match_that_is_not_shown_is_dropped() {
    let tree = UiNode::new(rect(0, 0, 100, 100)).with_children(vec![
        UiNode::new(rect(0, 0, 50, 50)).with_id(5).hidden(),
    ]);
    let outcomes = resolve_each(&tree, &[Step::with_id(5, "x")]);
    assert_eq!(outcomes, vec![StepResolution::NotShown]);
    assert!(resolve_all(&tree, &[Step::with_id(5, "x")]).is_empty());
}

#[test]
fn empty_step_list_resolves_to_nothing() {
    assert!(resolve_all(&sample_tree(), &[]).is_empty());
}

#[test]
fn tree_snapshot_deserializes_with_visibility_defaults() {
    let json = r#"{
        "bounds": {"left": 0, "top": 0, "right": 10, "bottom": 10},
        "children": [ { "tag": "x", "bounds": {"left": 1, "top": 1, "right": 2, "bottom": 2} } ]
    }"#;
    let tree: UiNode = serde_json::from_str(json).unwrap();
    assert!(tree.visible && tree.shown);
    assert_eq!(tree.children[0].tag.as_deref(), Some("x"));
}
