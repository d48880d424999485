use crate::{
    domain::Card,
    error::{QuizbookError, Result},
    storage::{Storage, DATA_DIR},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// File-based storage keeping the whole sequence in one JSON array
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const CARDS_FILE: &'static str = "cards.json";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(DATA_DIR),
        }
    }

    /// Directory holding the data files and config
    pub fn data_dir(&self) -> &Path {
        &self.root_path
    }

    fn cards_file(&self) -> PathBuf {
        self.root_path.join(Self::CARDS_FILE)
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.root_path).await?;

        let gitignore_path = self.root_path.join(".gitignore");
        if !gitignore_path.exists() {
            fs::write(gitignore_path, "# Local caches\n*.db\n*.db-*\n").await?;
        }

        info!(path = %self.root_path.display(), "initialized file storage");
        Ok(())
    }

    async fn is_initialized(&self) -> bool {
        self.root_path.exists()
    }

    async fn load_cards(&self) -> Result<Option<Vec<Card>>> {
        let file_path = self.cards_file();

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        let cards: Vec<Card> = serde_json::from_str(&contents)?;
        debug!(count = cards.len(), "loaded cards");

        Ok(Some(cards))
    }

    async fn save_cards(&self, cards: &[Card]) -> Result<()> {
        if !self.is_initialized().await {
            return Err(QuizbookError::NotInitialized);
        }

        let json = serde_json::to_string_pretty(cards)?;
        // Write-then-rename so a crash never leaves a truncated file behind.
        let tmp_path = self.root_path.join(format!("{}.tmp", Self::CARDS_FILE));
        fs::write(&tmp_path, json).await?;
        fs::rename(&tmp_path, self.cards_file()).await?;

        debug!(count = cards.len(), "saved cards");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let file_path = self.cards_file();
        if file_path.exists() {
            fs::remove_file(file_path).await?;
        }
        Ok(())
    }
}
