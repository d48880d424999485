use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

use crate::{
    domain::card::{Card, CardId},
    error::{QuizbookError, Result},
};

/// Where the rebuilt target bucket lands in the flat sequence after a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Every other card first, then the target bucket.
    ///
    /// A cross-category move therefore pushes the target category to the
    /// end of the category order.
    #[default]
    Trailing,
    /// The target bucket is rebuilt where its first card sat, so category
    /// order is unchanged. A new bucket is appended.
    InPlace,
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trailing" => Ok(Placement::Trailing),
            "in-place" | "inplace" => Ok(Placement::InPlace),
            _ => Err(format!(
                "Invalid placement '{}'. Valid placements: trailing, in-place",
                s
            )),
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trailing => write!(f, "trailing"),
            Self::InPlace => write!(f, "in-place"),
        }
    }
}

/// Moves a card into `(target_major, target_minor)` at `target_index`.
///
/// `target_index` counts positions within the target bucket after the
/// moved card has been taken out. An index past the end appends.
///
/// Returns a new sequence holding the same cards, with only the moved
/// card's categories changed.
///
/// # Errors
/// Returns [`QuizbookError::CardNotFound`] when `moved_id` is not in
/// `cards`; the input is left untouched.
///
/// # Examples
/// ```
/// use quizbook_core::domain::card::{Card, CardId};
/// use quizbook_core::domain::reorder::{move_card, Placement};
/// use std::str::FromStr;
///
/// let id = |s: &str| CardId::from_str(s).unwrap();
/// let cards = vec![
///     Card::new(id("1"), "Q1", "A1", "A", "x"),
///     Card::new(id("2"), "Q2", "A2", "A", "x"),
///     Card::new(id("3"), "Q3", "A3", "B", "y"),
/// ];
///
/// let moved = move_card(&cards, &id("3"), "A", "x", 0, Placement::Trailing).unwrap();
/// let order: Vec<&str> = moved.iter().map(|c| c.id.as_str()).collect();
/// assert_eq!(order, vec!["3", "1", "2"]);
/// ```
pub fn move_card(
    cards: &[Card],
    moved_id: &CardId,
    target_major: &str,
    target_minor: &str,
    target_index: usize,
    placement: Placement,
) -> Result<Vec<Card>> {
    let source_pos = cards
        .iter()
        .position(|c| &c.id == moved_id)
        .ok_or_else(|| QuizbookError::CardNotFound(moved_id.to_string()))?;

    let mut moved = cards[source_pos].clone();
    let rest = cards
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != source_pos)
        .map(|(_, c)| c);

    let (mut bucket, others): (Vec<Card>, Vec<Card>) = rest
        .cloned()
        .partition(|c| c.in_category(target_major, target_minor));

    // Remembered before the bucket grows, for in-place recombination.
    let anchor = first_bucket_position(cards, source_pos, target_major, target_minor);

    moved.set_category(target_major, target_minor);
    let at = target_index.min(bucket.len());
    bucket.insert(at, moved);

    debug!(
        card = %moved_id,
        major = target_major,
        minor = target_minor,
        index = at,
        %placement,
        "moved card"
    );

    Ok(match placement {
        Placement::Trailing => others.into_iter().chain(bucket).collect(),
        Placement::InPlace => {
            let split = anchor.unwrap_or(others.len());
            let mut result = Vec::with_capacity(cards.len());
            let mut others = others.into_iter();
            result.extend(others.by_ref().take(split));
            result.extend(bucket);
            result.extend(others);
            result
        }
    })
}

/// Number of non-bucket cards preceding the first card of the original
/// target bucket, i.e. the offset in `others` where the bucket starts.
///
/// The moved card counts as a bucket member when it already belonged to
/// the bucket. `None` means the bucket did not exist before the move.
fn first_bucket_position(
    cards: &[Card],
    source_pos: usize,
    major: &str,
    minor: &str,
) -> Option<usize> {
    let mut preceding = 0;
    for (i, card) in cards.iter().enumerate() {
        if card.in_category(major, minor) {
            return Some(preceding);
        }
        if i != source_pos {
            preceding += 1;
        }
    }
    None
}
