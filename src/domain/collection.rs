use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::{
    domain::{
        card::{Card, CardDraft, CardId, CardPatch},
        category::{group_by_category, major_categories, CategoryIndex},
        reorder::{move_card, Placement},
    },
    error::{QuizbookError, Result},
};

/// Built-in starter cards as `(question, answer, major, minor)`
const SAMPLE_CARDS: &[(&str, &str, &str, &str)] = &[
    (
        "Why use spices when preparing ingredients?",
        "To remove odors, add a firm aroma and bring out color.",
        "Spice basics",
        "Preparation",
    ),
    (
        "Which spice form suits preparation best?",
        "Powders for even aroma; whole spices for removing odors and marinating.",
        "Spice basics",
        "Preparation",
    ),
    (
        "Why add spices during cooking?",
        "To draw out aroma, heat and color slowly.",
        "Spice basics",
        "Cooking",
    ),
    (
        "Why add spices as a finish?",
        "To add aroma, heat and color instantly.",
        "Spice basics",
        "Finishing",
    ),
    (
        "What is the dried to fresh herb ratio?",
        "Dried : fresh = 1 : 3.",
        "Spice basics",
        "Handling herbs",
    ),
    (
        "What is harissa?",
        "A paste of seed spices, chili, garlic and olive oil.",
        "World cuisine",
        "North Africa & Middle East",
    ),
    (
        "Which Italian dish is known for basil?",
        "Caprese",
        "World cuisine",
        "Italy",
    ),
    (
        "Describe risotto alla milanese.",
        "Milan-style risotto made with saffron and parmesan.",
        "World cuisine",
        "Italy",
    ),
    (
        "Which herb goes into saltimbocca?",
        "Sage",
        "World cuisine",
        "Italy",
    ),
    (
        "Describe bouillabaisse.",
        "A Provencal fish stew scented with tomato and saffron.",
        "World cuisine",
        "France",
    ),
    (
        "Which spice defines Hungarian goulash?",
        "Paprika",
        "World cuisine",
        "Eastern Europe",
    ),
    (
        "What is Moroccan mint tea?",
        "Gunpowder green tea, fresh mint and plenty of sugar steeped in boiling water.",
        "Drinks",
        "Tea",
    ),
];

/// The ordered card collection owned by a single session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    cards: Vec<Card>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already ordered sequence, e.g. one loaded from storage.
    ///
    /// Ids must be unique; a later card repeating an earlier id is dropped.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut seen = HashSet::with_capacity(cards.len());
        let total = cards.len();
        let cards: Vec<Card> = cards
            .into_iter()
            .filter(|c| seen.insert(c.id.clone()))
            .collect();
        if cards.len() < total {
            warn!(dropped = total - cards.len(), "dropped cards with duplicate ids");
        }
        Self { cards }
    }

    /// Starter collection used on first run
    pub fn sample() -> Self {
        let now = Utc::now();
        let cards = SAMPLE_CARDS
            .iter()
            .enumerate()
            .map(|(i, (prompt, response, major, minor))| {
                let mut card = Card::new(
                    CardId((i + 1).to_string()),
                    *prompt,
                    *response,
                    *major,
                    *minor,
                );
                card.created_at = Some(now);
                card.updated_at = Some(now);
                card
            })
            .collect();
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    fn position(&self, id: &CardId) -> Result<usize> {
        self.cards
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| QuizbookError::CardNotFound(id.to_string()))
    }

    /// Appends a new card built from `draft`.
    ///
    /// Omitted categories are inherited from the last card in the
    /// collection, or left empty when there is none.
    pub fn add(&mut self, draft: CardDraft) -> Result<&Card> {
        draft.validate()?;

        let last = self.cards.last();
        let major = draft
            .major_category
            .filter(|m| !m.is_empty())
            .or_else(|| last.map(|c| c.major_category.clone()))
            .unwrap_or_default();
        let minor = draft
            .minor_category
            .filter(|m| !m.is_empty())
            .or_else(|| last.map(|c| c.minor_category.clone()))
            .unwrap_or_default();

        let mut id = CardId::generate();
        while self.get(&id).is_some() {
            id = CardId::generate();
        }

        let card = Card::new(id, draft.prompt, draft.response, major, minor).with_timestamps();
        debug!(
            card = %card.id,
            major = %card.major_category,
            minor = %card.minor_category,
            "added card"
        );
        self.cards.push(card);

        let index = self.cards.len() - 1;
        Ok(&self.cards[index])
    }

    /// Overwrites fields of an existing card in place
    pub fn edit(&mut self, id: &CardId, patch: CardPatch) -> Result<&Card> {
        let pos = self.position(id)?;
        self.cards[pos].apply(patch)?;
        debug!(card = %id, "edited card");
        Ok(&self.cards[pos])
    }

    /// Removes a card and returns it
    pub fn delete(&mut self, id: &CardId) -> Result<Card> {
        let pos = self.position(id)?;
        debug!(card = %id, "deleted card");
        Ok(self.cards.remove(pos))
    }

    /// Relocates a card to a bucket and position, see [`move_card`]
    pub fn move_card(
        &mut self,
        id: &CardId,
        major: &str,
        minor: &str,
        index: usize,
        placement: Placement,
    ) -> Result<()> {
        self.cards = move_card(&self.cards, id, major, minor, index, placement)?;
        Ok(())
    }

    /// Fills omitted move targets from the card's current categories
    pub fn move_target(
        &self,
        id: &CardId,
        major: Option<String>,
        minor: Option<String>,
    ) -> Result<(String, String)> {
        let card = self
            .get(id)
            .ok_or_else(|| QuizbookError::CardNotFound(id.to_string()))?;
        Ok((
            major.unwrap_or_else(|| card.major_category.clone()),
            minor.unwrap_or_else(|| card.minor_category.clone()),
        ))
    }

    pub fn grouped(&self) -> CategoryIndex {
        group_by_category(&self.cards)
    }

    pub fn major_categories(&self) -> Vec<String> {
        major_categories(&self.cards)
    }

    /// Case-insensitive match over question, answer and categories
    pub fn search(&self, query: &str) -> Vec<&Card> {
        let query_lower = query.to_lowercase();
        self.cards
            .iter()
            .filter(|c| {
                [
                    &c.prompt,
                    &c.response,
                    &c.major_category,
                    &c.minor_category,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&query_lower))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_collection() {
        let collection = Collection::sample();
        assert_eq!(collection.len(), SAMPLE_CARDS.len());
        assert_eq!(
            collection.major_categories(),
            vec!["Spice basics", "World cuisine", "Drinks"]
        );
        assert!(collection.cards().iter().all(|c| c.created_at.is_some()));
    }

    #[test]
    fn test_add_inherits_last_categories() {
        let mut collection = Collection::new();
        collection
            .add(CardDraft::new("Q1", "A1").with_category("World cuisine", "Italy"))
            .unwrap();
        let added = collection.add(CardDraft::new("Q2", "A2")).unwrap();

        assert_eq!(added.category_key(), ("World cuisine", "Italy"));
        assert!(added.created_at.is_some());
        assert_eq!(collection.cards()[1].prompt, "Q2");
    }

    #[test]
    fn test_add_to_empty_collection_without_category() {
        let mut collection = Collection::new();
        let added = collection.add(CardDraft::new("Q", "A")).unwrap();
        assert_eq!(added.category_key(), ("", ""));
    }

    #[test]
    fn test_add_only_minor_given() {
        let mut collection = Collection::new();
        collection
            .add(CardDraft::new("Q1", "A1").with_category("Drinks", "Tea"))
            .unwrap();
        let draft = CardDraft {
            minor_category: Some("Coffee".to_string()),
            ..CardDraft::new("Q2", "A2")
        };
        let added = collection.add(draft).unwrap();

        assert_eq!(added.category_key(), ("Drinks", "Coffee"));
    }

    #[test]
    fn test_add_rejects_missing_answer() {
        let mut collection = Collection::new();
        assert!(collection.add(CardDraft::new("Q", "")).is_err());
        assert!(collection.is_empty());
    }

    #[test]
    fn test_edit_and_delete() {
        let mut collection = Collection::sample();
        let id = collection.cards()[0].id.clone();

        let edited = collection
            .edit(
                &id,
                CardPatch {
                    response: Some("Updated".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(edited.response, "Updated");
        assert_eq!(edited.id, id);

        let removed = collection.delete(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(collection.get(&id).is_none());
        assert!(matches!(
            collection.delete(&id),
            Err(QuizbookError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_move_card_replaces_sequence() {
        let mut collection = Collection::sample();
        let id = collection.cards()[0].id.clone();

        collection
            .move_card(&id, "Drinks", "Tea", 0, Placement::Trailing)
            .unwrap();

        let moved = collection.get(&id).unwrap();
        assert_eq!(moved.category_key(), ("Drinks", "Tea"));
        assert_eq!(collection.len(), SAMPLE_CARDS.len());
        assert_eq!(
            collection.grouped().bucket("Drinks", "Tea").unwrap()[0].id,
            id
        );
    }

    #[test]
    fn test_failed_move_leaves_collection_untouched() {
        let mut collection = Collection::sample();
        let before = collection.clone();
        let missing = CardId("missing".to_string());

        assert!(collection
            .move_card(&missing, "Drinks", "Tea", 0, Placement::InPlace)
            .is_err());
        assert_eq!(collection, before);
    }

    #[test]
    fn test_move_target_defaults_to_current_category() {
        let collection = Collection::sample();
        let id = CardId("7".to_string());

        assert_eq!(
            collection.move_target(&id, None, None).unwrap(),
            ("World cuisine".to_string(), "Italy".to_string())
        );
        assert_eq!(
            collection
                .move_target(&id, None, Some("France".to_string()))
                .unwrap(),
            ("World cuisine".to_string(), "France".to_string())
        );
        assert_eq!(
            collection
                .move_target(&id, Some(String::new()), Some(String::new()))
                .unwrap(),
            (String::new(), String::new())
        );
        assert!(matches!(
            collection.move_target(&CardId("missing".to_string()), None, None),
            Err(QuizbookError::CardNotFound(_))
        ));
    }

    #[test]
    fn test_from_cards_drops_duplicate_ids() {
        let id = CardId("1".to_string());
        let cards = vec![
            Card::new(id.clone(), "first", "A", "", ""),
            Card::new(CardId("2".to_string()), "Q", "A", "", ""),
            Card::new(id.clone(), "second", "A", "", ""),
        ];

        let collection = Collection::from_cards(cards);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(&id).unwrap().prompt, "first");
    }

    #[test]
    fn test_search() {
        let collection = Collection::sample();
        assert_eq!(collection.search("SAFFRON").len(), 2);
        assert_eq!(collection.search("drinks").len(), 1);
        assert!(collection.search("nothing like this").is_empty());
    }
}
