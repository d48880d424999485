use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::error::{QuizbookError, Result};

/// Unique identifier for a card (e.g., 1718000000000a1b2c3d4e)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub(crate) String);

impl CardId {
    const SUFFIX_LEN: usize = 9;

    /// Generates a fresh timestamp-derived identifier.
    ///
    /// The random suffix keeps ids unique when several cards are created
    /// within the same millisecond.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", millis, &suffix[..Self::SUFFIX_LEN]))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CardId {
    type Err = QuizbookError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(QuizbookError::InvalidCardId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question/answer card tagged with a two-level category.
///
/// The serialized shape matches the records kept by the local store, so
/// collections written before timestamps were tracked still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "answer")]
    pub response: String,
    #[serde(rename = "majorCategory", default)]
    pub major_category: String,
    #[serde(rename = "minorCategory", default)]
    pub minor_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Creates a card without timestamps.
    pub fn new(
        id: CardId,
        prompt: impl Into<String>,
        response: impl Into<String>,
        major_category: impl Into<String>,
        minor_category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            response: response.into(),
            major_category: major_category.into(),
            minor_category: minor_category.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Stamps both timestamps with the current time
    pub fn with_timestamps(mut self) -> Self {
        let now = Utc::now();
        self.created_at = Some(now);
        self.updated_at = Some(now);
        self
    }

    /// Returns the `(major, minor)` bucket key
    pub fn category_key(&self) -> (&str, &str) {
        (&self.major_category, &self.minor_category)
    }

    /// Checks whether the card belongs to the given bucket
    pub fn in_category(&self, major: &str, minor: &str) -> bool {
        self.major_category == major && self.minor_category == minor
    }

    /// Overwrites both category fields
    pub fn set_category(&mut self, major: impl Into<String>, minor: impl Into<String>) {
        self.major_category = major.into();
        self.minor_category = minor.into();
        self.touch();
    }

    /// Applies an edit in place, keeping the id, and stamps `updated_at`.
    ///
    /// The patch is rejected as a whole when it would blank out the
    /// question or the answer.
    pub fn apply(&mut self, patch: CardPatch) -> Result<()> {
        if let Some(prompt) = &patch.prompt {
            ensure_filled("question", prompt)?;
        }
        if let Some(response) = &patch.response {
            ensure_filled("answer", response)?;
        }

        if let Some(prompt) = patch.prompt {
            self.prompt = prompt;
        }
        if let Some(response) = patch.response {
            self.response = response;
        }
        if let Some(major) = patch.major_category {
            self.major_category = major;
        }
        if let Some(minor) = patch.minor_category {
            self.minor_category = minor;
        }
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Refreshes `updated_at` on cards that track timestamps
    pub(crate) fn touch(&mut self) {
        if self.updated_at.is_some() || self.created_at.is_some() {
            self.updated_at = Some(Utc::now());
        }
    }
}

/// Form data for creating a card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub prompt: String,
    pub response: String,
    pub major_category: Option<String>,
    pub minor_category: Option<String>,
}

impl CardDraft {
    pub fn new(prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
            major_category: None,
            minor_category: None,
        }
    }

    pub fn with_category(mut self, major: impl Into<String>, minor: impl Into<String>) -> Self {
        self.major_category = Some(major.into());
        self.minor_category = Some(minor.into());
        self
    }

    /// Both question and answer must be present
    pub fn validate(&self) -> Result<()> {
        ensure_filled("question", &self.prompt)?;
        ensure_filled("answer", &self.response)
    }
}

/// Partial update for an existing card
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPatch {
    pub prompt: Option<String>,
    pub response: Option<String>,
    pub major_category: Option<String>,
    pub minor_category: Option<String>,
}

impl CardPatch {
    pub fn is_empty(&self) -> bool {
        self.prompt.is_none()
            && self.response.is_none()
            && self.major_category.is_none()
            && self.minor_category.is_none()
    }
}

fn ensure_filled(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QuizbookError::EmptyField(field));
    }
    Ok(())
}
