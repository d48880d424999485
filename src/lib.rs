//! # Quizbook Core
//!
//! Core domain logic and persistence for a question/answer flashcard book.
//!
//! Cards are kept in one ordered sequence and grouped on read into a
//! two-level `major -> minor` category view. Reordering moves a card into
//! a category bucket at a given position. Storage backends only mirror
//! the in-memory sequence owned by a [`Session`].

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use domain::{
    card::{Card, CardDraft, CardId, CardPatch},
    category::{group_by_category, CategoryIndex},
    collection::Collection,
    reorder::{move_card, Placement},
};
pub use error::{QuizbookError, Result};
pub use session::{LoadOutcome, Session};
pub use storage::Storage;
