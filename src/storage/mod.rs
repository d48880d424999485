use crate::{domain::Card, error::Result};
use async_trait::async_trait;

pub mod file_storage;

#[cfg(feature = "sqlite-storage")]
pub mod sqlite_storage;

pub use file_storage::FileStorage;

#[cfg(feature = "sqlite-storage")]
pub use sqlite_storage::SqliteStorage;

/// Directory holding a quizbook's data and config under a project root
pub const DATA_DIR: &str = ".quizbook";

/// Storage trait mirroring the in-memory card sequence.
///
/// Backends persist the whole ordered sequence; order is part of the data.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Initializes the storage backend
    async fn initialize(&self) -> Result<()>;

    /// Checks if the storage has been initialized
    async fn is_initialized(&self) -> bool;

    /// Loads all cards in stored order.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet, as opposed to
    /// an explicitly stored empty collection.
    async fn load_cards(&self) -> Result<Option<Vec<Card>>>;

    /// Replaces the stored sequence with `cards`
    async fn save_cards(&self, cards: &[Card]) -> Result<()>;

    /// Removes every stored card
    async fn clear(&self) -> Result<()>;
}
