use std::collections::BTreeSet;
use std::str::FromStr;

use quizbook_core::{group_by_category, move_card, Card, CardId, Collection, Placement};

fn card(id: &str, major: &str, minor: &str) -> Card {
    Card::new(CardId::from_str(id).unwrap(), "Q", "A", major, minor)
}

fn ids(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.id.as_str()).collect()
}

fn id_set(cards: &[Card]) -> BTreeSet<String> {
    cards.iter().map(|c| c.id.to_string()).collect()
}

/// A mixed collection with interleaved buckets and empty category names
fn mixed() -> Vec<Card> {
    vec![
        card("1", "A", "x"),
        card("2", "B", "y"),
        card("3", "A", "x"),
        card("4", "", ""),
        card("5", "A", "z"),
        card("6", "B", "y"),
        card("7", "", ""),
    ]
}

#[test]
fn grouping_contains_every_card_once() {
    let cards = mixed();
    let index = group_by_category(&cards);

    assert_eq!(index.len(), cards.len());
    for c in &cards {
        let bucket = index.bucket(&c.major_category, &c.minor_category).unwrap();
        assert_eq!(bucket.iter().filter(|b| b.id == c.id).count(), 1);
    }
}

#[test]
fn grouping_preserves_relative_order() {
    let cards = mixed();
    let index = group_by_category(&cards);

    for (_, _, bucket) in index.iter() {
        let positions: Vec<usize> = bucket
            .iter()
            .map(|b| cards.iter().position(|c| c.id == b.id).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn grouping_key_order_scenario() {
    let cards = vec![
        card("1", "A", "x"),
        card("2", "A", "y"),
        card("3", "B", "z"),
    ];
    let index = group_by_category(&cards);

    assert_eq!(index.majors().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(index.minors("A").collect::<Vec<_>>(), vec!["x", "y"]);
}

#[test]
fn move_scenario_into_front_of_other_bucket() {
    let cards = vec![
        card("1", "A", "x"),
        card("2", "A", "x"),
        card("3", "B", "y"),
    ];

    let moved = move_card(
        &cards,
        &CardId::from_str("3").unwrap(),
        "A",
        "x",
        0,
        Placement::Trailing,
    )
    .unwrap();

    assert_eq!(moved[0].category_key(), ("A", "x"));
    let bucket = group_by_category(&moved);
    assert_eq!(ids(bucket.bucket("A", "x").unwrap()), vec!["3", "1", "2"]);
    assert!(bucket.bucket("B", "y").is_none());
}

#[test]
fn every_move_is_a_permutation_with_updated_categories() {
    let cards = mixed();
    let targets = [("A", "x"), ("B", "y"), ("", ""), ("C", "new")];

    for placement in [Placement::Trailing, Placement::InPlace] {
        for c in &cards {
            for (major, minor) in targets {
                for index in 0..4 {
                    let moved = move_card(&cards, &c.id, major, minor, index, placement).unwrap();

                    assert_eq!(moved.len(), cards.len());
                    assert_eq!(id_set(&moved), id_set(&cards));

                    let after = moved.iter().find(|m| m.id == c.id).unwrap();
                    assert_eq!(after.category_key(), (major, minor));

                    let changed = moved
                        .iter()
                        .filter(|m| {
                            let before = cards.iter().find(|o| o.id == m.id).unwrap();
                            before.category_key() != m.category_key()
                        })
                        .count();
                    assert!(changed <= 1);
                }
            }
        }
    }
}

#[test]
fn move_lands_at_requested_bucket_position() {
    let cards = mixed();
    let id = CardId::from_str("2").unwrap();

    for index in 0..=2 {
        let moved = move_card(&cards, &id, "A", "x", index, Placement::InPlace).unwrap();
        let index_view = group_by_category(&moved);
        let bucket = index_view.bucket("A", "x").unwrap();
        assert_eq!(bucket[index].id, id);
    }
}

#[test]
fn moving_to_current_position_keeps_bucket_contents() {
    let cards = mixed();
    let before = group_by_category(&cards);

    for placement in [Placement::Trailing, Placement::InPlace] {
        for c in &cards {
            let bucket = before.bucket(&c.major_category, &c.minor_category).unwrap();
            let index = bucket.iter().position(|b| b.id == c.id).unwrap();

            let moved = move_card(
                &cards,
                &c.id,
                &c.major_category,
                &c.minor_category,
                index,
                placement,
            )
            .unwrap();
            let after = group_by_category(&moved);

            for (major, minor, cards_before) in before.iter() {
                assert_eq!(
                    ids(after.bucket(major, minor).unwrap()),
                    ids(cards_before)
                );
            }
        }
    }
}

#[test]
fn trailing_placement_reorders_categories() {
    let cards = mixed();
    let moved = move_card(
        &cards,
        &CardId::from_str("7").unwrap(),
        "A",
        "x",
        0,
        Placement::Trailing,
    )
    .unwrap();

    assert_eq!(ids(&moved), vec!["2", "4", "5", "6", "7", "1", "3"]);
    let majors: Vec<String> = group_by_category(&moved)
        .majors()
        .map(str::to_string)
        .collect();
    assert_eq!(majors, vec!["B", "", "A"]);
}

#[test]
fn in_place_placement_keeps_category_order() {
    let cards = mixed();
    let moved = move_card(
        &cards,
        &CardId::from_str("7").unwrap(),
        "A",
        "x",
        0,
        Placement::InPlace,
    )
    .unwrap();

    assert_eq!(ids(&moved), vec!["7", "1", "3", "2", "4", "5", "6"]);
    let majors: Vec<String> = group_by_category(&moved)
        .majors()
        .map(str::to_string)
        .collect();
    assert_eq!(majors, vec!["A", "B", ""]);
}

#[test]
fn in_place_move_to_current_position_keeps_category_order() {
    let majors = |cards: &[Card]| -> Vec<String> {
        group_by_category(cards)
            .majors()
            .map(str::to_string)
            .collect()
    };
    let lone = vec![card("1", "A", "x"), card("2", "B", "y")];

    for cards in [mixed(), lone] {
        let before = group_by_category(&cards);
        for c in &cards {
            let bucket = before.bucket(&c.major_category, &c.minor_category).unwrap();
            let index = bucket.iter().position(|b| b.id == c.id).unwrap();

            let moved = move_card(
                &cards,
                &c.id,
                &c.major_category,
                &c.minor_category,
                index,
                Placement::InPlace,
            )
            .unwrap();

            assert_eq!(majors(&moved), majors(&cards));
        }
    }
}

#[test]
fn missing_card_fails_without_changes() {
    let mut collection = Collection::from_cards(mixed());
    let before = collection.clone();

    let result = collection.move_card(
        &CardId::from_str("404").unwrap(),
        "A",
        "x",
        0,
        Placement::Trailing,
    );

    assert!(result.is_err());
    assert_eq!(collection, before);
}
