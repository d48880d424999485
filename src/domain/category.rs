//! Two-level category projection of a card sequence.
//!
//! The index is computed on read and never stored. Major keys keep the
//! order in which they first appear, minor keys keep their first
//! appearance within the major, and cards keep their input order inside
//! each bucket.

use crate::domain::card::Card;

/// Cards sharing one `(major, minor)` key
#[derive(Debug, Clone, PartialEq)]
pub struct MinorGroup {
    pub name: String,
    pub cards: Vec<Card>,
}

/// All minor buckets under one major category
#[derive(Debug, Clone, PartialEq)]
pub struct MajorGroup {
    pub name: String,
    pub minors: Vec<MinorGroup>,
}

impl MajorGroup {
    pub fn minor(&self, name: &str) -> Option<&MinorGroup> {
        self.minors.iter().find(|m| m.name == name)
    }

    pub fn card_count(&self) -> usize {
        self.minors.iter().map(|m| m.cards.len()).sum()
    }
}

/// Ordered `major -> minor -> cards` mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    majors: Vec<MajorGroup>,
}

impl CategoryIndex {
    /// Major category names in display order
    pub fn majors(&self) -> impl Iterator<Item = &str> {
        self.majors.iter().map(|g| g.name.as_str())
    }

    /// Minor category names under `major`, empty when the major is unknown
    pub fn minors<'a>(&'a self, major: &str) -> impl Iterator<Item = &'a str> {
        self.major(major)
            .into_iter()
            .flat_map(|g| g.minors.iter().map(|m| m.name.as_str()))
    }

    pub fn major(&self, name: &str) -> Option<&MajorGroup> {
        self.majors.iter().find(|g| g.name == name)
    }

    pub fn bucket(&self, major: &str, minor: &str) -> Option<&[Card]> {
        self.major(major)
            .and_then(|g| g.minor(minor))
            .map(|m| m.cards.as_slice())
    }

    pub fn groups(&self) -> &[MajorGroup] {
        &self.majors
    }

    /// Iterates buckets as `(major, minor, cards)` in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[Card])> {
        self.majors.iter().flat_map(|g| {
            g.minors
                .iter()
                .map(move |m| (g.name.as_str(), m.name.as_str(), m.cards.as_slice()))
        })
    }

    /// Total number of cards across all buckets
    pub fn len(&self) -> usize {
        self.majors.iter().map(MajorGroup::card_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.majors.iter().map(|g| g.minors.len()).sum()
    }

    fn push(&mut self, card: &Card) {
        let major_pos = match self
            .majors
            .iter()
            .position(|g| g.name == card.major_category)
        {
            Some(pos) => pos,
            None => {
                self.majors.push(MajorGroup {
                    name: card.major_category.clone(),
                    minors: Vec::new(),
                });
                self.majors.len() - 1
            }
        };

        let minors = &mut self.majors[major_pos].minors;
        match minors.iter_mut().find(|m| m.name == card.minor_category) {
            Some(bucket) => bucket.cards.push(card.clone()),
            None => minors.push(MinorGroup {
                name: card.minor_category.clone(),
                cards: vec![card.clone()],
            }),
        }
    }
}

/// Groups cards into a fresh [`CategoryIndex`] in a single pass.
///
/// Empty strings are valid keys and form their own buckets.
pub fn group_by_category(cards: &[Card]) -> CategoryIndex {
    let mut index = CategoryIndex::default();
    for card in cards {
        index.push(card);
    }
    index
}

/// Major category names in first-occurrence order
pub fn major_categories(cards: &[Card]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for card in cards {
        if !names.iter().any(|n| *n == card.major_category) {
            names.push(card.major_category.clone());
        }
    }
    names
}
