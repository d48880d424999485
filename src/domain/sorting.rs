use crate::domain::card::Card;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// Fields available for sorting cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Created,
    Updated,
    Question,
    Category,
}

/// Sort order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(SortField::Created),
            "updated" => Ok(SortField::Updated),
            "question" => Ok(SortField::Question),
            "category" => Ok(SortField::Category),
            _ => Err(format!(
                "Invalid sort field '{}'. Valid fields: created, updated, question, category",
                s
            )),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(format!(
                "Invalid sort order '{}'. Valid orders: asc, desc",
                s
            )),
        }
    }
}

/// Sorts cards in place by the given field and direction.
///
/// The sort is stable, so cards comparing equal keep their relative order.
/// Cards without the requested timestamp always sort last.
///
/// # Examples
/// ```
/// use quizbook_core::domain::card::{Card, CardId};
/// use quizbook_core::domain::sorting::{sort_cards, SortField, SortOrder};
///
/// let mut cards = vec![
///     Card::new(CardId::generate(), "b", "1", "", ""),
///     Card::new(CardId::generate(), "A", "2", "", ""),
/// ];
///
/// sort_cards(&mut cards, SortField::Question, SortOrder::Ascending);
/// assert_eq!(cards[0].prompt, "A");
/// ```
pub fn sort_cards(cards: &mut [Card], field: SortField, order: SortOrder) {
    cards.sort_by(|a, b| match field {
        SortField::Created => compare_option_dates(a.created_at, b.created_at, order),
        SortField::Updated => compare_option_dates(a.updated_at, b.updated_at, order),
        SortField::Question => apply_order(
            a.prompt.to_lowercase().cmp(&b.prompt.to_lowercase()),
            order,
        ),
        SortField::Category => apply_order(
            (&a.major_category, &a.minor_category).cmp(&(&b.major_category, &b.minor_category)),
            order,
        ),
    });
}

fn apply_order(cmp: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => cmp,
        SortOrder::Descending => cmp.reverse(),
    }
}

/// Compare Option<DateTime> with None always sorting to end
fn compare_option_dates(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    order: SortOrder,
) -> Ordering {
    match (a, b) {
        (Some(a_date), Some(b_date)) => apply_order(a_date.cmp(&b_date), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
