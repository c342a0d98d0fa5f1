//! Tests for tag sequence operations.

use super::*;
use proptest::prelude::*;

fn field(tags: Vec<Tag>) -> Field {
    Field::with_tags(FieldId::from("subjects"), tags)
}

#[test]
fn test_append_and_insert_preserve_order() {
    let mut f = field(vec![]);
    f.append(Tag::literal("a"));
    f.append(Tag::literal("c"));
    f.insert_at(1, Tag::literal("b")).unwrap();
    f.insert_at(0, Tag::literal("start")).unwrap();
    f.insert_at(4, Tag::literal("end")).unwrap();

    let texts: Vec<_> = f
        .tags()
        .iter()
        .map(|t| match t {
            Tag::Literal { text } => text.as_str(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(texts, vec!["start", "a", "b", "c", "end"]);
}

#[test]
fn test_insert_past_end_fails() {
    let mut f = field(vec![Tag::literal("a")]);
    let err = f.insert_at(2, Tag::literal("x")).unwrap_err();
    assert_eq!(err, FlipflopError::IndexOutOfRange { index: 2, len: 1 });
    assert_eq!(f.len(), 1);
}

#[test]
fn test_remove_at() {
    let mut f = field(vec![Tag::literal("a"), Tag::category("weather")]);
    assert_eq!(f.remove_at(1).unwrap(), Tag::category("weather"));
    assert_eq!(f.tags(), &[Tag::literal("a")]);

    let err = f.remove_at(1).unwrap_err();
    assert_eq!(err, FlipflopError::IndexOutOfRange { index: 1, len: 1 });
}

#[test]
fn test_remove_from_empty_fails() {
    let mut f = field(vec![]);
    assert!(matches!(
        f.remove_at(0),
        Err(FlipflopError::IndexOutOfRange { index: 0, len: 0 })
    ));
}

#[test]
fn test_replace_at_returns_previous() {
    let mut f = field(vec![Tag::category("weather"), Tag::literal("b")]);
    let old = f.replace_at(0, Tag::snippet("weather//rainy")).unwrap();
    assert_eq!(old, Tag::category("weather"));
    assert_eq!(f.tags()[0], Tag::snippet("weather//rainy"));
    assert!(f.replace_at(2, Tag::literal("x")).is_err());
}

#[test]
fn test_move_tag() {
    let mut f = field(vec![Tag::literal("a"), Tag::literal("b"), Tag::literal("c")]);
    f.move_tag(0, 2).unwrap();
    assert_eq!(
        f.tags(),
        &[Tag::literal("b"), Tag::literal("c"), Tag::literal("a")]
    );
    f.move_tag(2, 0).unwrap();
    assert_eq!(
        f.tags(),
        &[Tag::literal("a"), Tag::literal("b"), Tag::literal("c")]
    );
    assert!(f.move_tag(0, 3).is_err());
    assert!(f.move_tag(3, 0).is_err());
}

#[test]
fn test_toggle_adds_then_removes() {
    let id = ItemId::from("weather//sunny");
    let mut f = field(vec![Tag::literal("a")]);

    assert_eq!(f.toggle_snippet_ref(&id), Toggle::Added(1));
    assert_eq!(f.tags()[1], Tag::snippet(id.clone()));

    assert_eq!(f.toggle_snippet_ref(&id), Toggle::Removed(1));
    assert_eq!(f.tags(), &[Tag::literal("a")]);
}

#[test]
fn test_toggle_removes_first_occurrence_only() {
    let id = ItemId::from("weather//sunny");
    let mut f = field(vec![
        Tag::snippet(id.clone()),
        Tag::literal("between"),
        Tag::snippet(id.clone()),
    ]);

    assert_eq!(f.toggle_snippet_ref(&id), Toggle::Removed(0));
    assert_eq!(f.tags(), &[Tag::literal("between"), Tag::snippet(id)]);
}

#[test]
fn test_toggle_ignores_other_tag_kinds() {
    let id = ItemId::from("weather");
    let mut f = field(vec![Tag::category("weather"), Tag::literal("weather")]);
    assert_eq!(f.toggle_snippet_ref(&id), Toggle::Added(2));
}

#[test]
fn test_literals_from_text() {
    let tags = literals_from_text("a tall man, standing. , looking left,");
    assert_eq!(
        tags,
        vec![
            Tag::literal("a tall man"),
            Tag::literal("standing"),
            Tag::literal("looking left"),
        ]
    );
    assert!(literals_from_text(" ,. ").is_empty());

    let mut f = field(vec![]);
    assert_eq!(f.append_text("one, two"), 2);
    assert_eq!(f.len(), 2);
}

#[test]
fn test_random_positions() {
    let f = field(vec![
        Tag::literal("a"),
        Tag::category("weather"),
        Tag::snippet("x"),
        Tag::subcategory("subjects", "Human"),
    ]);
    assert_eq!(f.random_positions(), vec![1, 3]);
    assert!(!f.is_fully_resolved());
    assert!(field(vec![Tag::literal("a")]).is_fully_resolved());
}

#[test]
fn test_random_scope() {
    assert_eq!(Tag::category("weather").random_scope(), Some(("weather", None)));
    assert_eq!(
        Tag::subcategory("subjects", "Human").random_scope(),
        Some(("subjects", Some("Human")))
    );
    assert_eq!(Tag::literal("x").random_scope(), None);
}

#[test]
fn test_tag_serialization_has_kind_discriminator() {
    let json = serde_json::to_value(Tag::subcategory("subjects", "Human")).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"kind": "subcategory_random", "category": "subjects", "subcategory": "Human"})
    );

    let json = serde_json::to_value(Tag::snippet("weather//rainy")).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "snippet_ref", "item_id": "weather//rainy"}));

    let parsed: Tag = serde_json::from_str(r#"{"kind": "literal", "text": "hi"}"#).unwrap();
    assert_eq!(parsed, Tag::literal("hi"));

    assert!(serde_json::from_str::<Tag>(r#"{"kind": "color", "text": "hi"}"#).is_err());
}

fn arb_tag() -> impl Strategy<Value = Tag> {
    prop_oneof![
        "[a-z]{1,6}".prop_map(Tag::literal),
        "[a-c]".prop_map(|s| Tag::snippet(s.as_str())),
        "[a-z]{1,4}".prop_map(Tag::category),
    ]
}

proptest! {
    #[test]
    fn prop_toggle_twice_tracks_first_occurrence(
        tags in proptest::collection::vec(arb_tag(), 0..12),
        id in "[a-d]",
    ) {
        let id = ItemId::from(id.as_str());
        let original = field(tags);
        let mut toggled = original.clone();

        let first = toggled.toggle_snippet_ref(&id);
        let second = toggled.toggle_snippet_ref(&id);

        let target = Tag::snippet(id.clone());
        let positions: Vec<usize> = original
            .tags()
            .iter()
            .enumerate()
            .filter(|(_, tag)| **tag == target)
            .map(|(i, _)| i)
            .collect();
        let without = |skip: &[usize]| -> Vec<Tag> {
            original
                .tags()
                .iter()
                .enumerate()
                .filter(|(i, _)| !skip.contains(i))
                .map(|(_, tag)| tag.clone())
                .collect()
        };

        match positions.as_slice() {
            [] => {
                prop_assert_eq!(first, Toggle::Added(original.len()));
                prop_assert_eq!(second, Toggle::Removed(original.len()));
                prop_assert_eq!(&toggled, &original);
            }
            [only] => {
                // The ref moves to the end.
                prop_assert_eq!(first, Toggle::Removed(*only));
                prop_assert_eq!(second, Toggle::Added(original.len() - 1));
                let mut expected = without(&[*only]);
                expected.push(target);
                prop_assert_eq!(toggled.tags(), expected.as_slice());
            }
            [a, b, ..] => {
                prop_assert_eq!(first, Toggle::Removed(*a));
                prop_assert_eq!(second, Toggle::Removed(*b - 1));
                let expected = without(&[*a, *b]);
                prop_assert_eq!(toggled.tags(), expected.as_slice());
            }
        }
    }

    #[test]
    fn prop_insert_then_remove_is_identity(
        tags in proptest::collection::vec(arb_tag(), 0..12),
        position in 0usize..13,
        tag in arb_tag(),
    ) {
        let original = field(tags);
        let mut f = original.clone();
        let index = position.min(f.len());
        f.insert_at(index, tag.clone()).unwrap();
        prop_assert_eq!(f.remove_at(index).unwrap(), tag);
        prop_assert_eq!(f, original);
    }
}
