//! Application controller owning the in-memory collection.
//!
//! Every mutation is applied to memory first and then mirrored to the
//! storage backend. The in-memory collection stays the source of truth
//! even when persisting fails; the failure is logged and returned.

use tracing::{info, warn};

use crate::{
    config::CollectionConfig,
    domain::{Card, CardDraft, CardId, CardPatch, CategoryIndex, Collection, Placement},
    error::{QuizbookError, Result},
    storage::Storage,
};

/// How the collection was obtained when the session opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Cards were read from storage
    Loaded,
    /// Nothing was stored; the starter cards were seeded and saved
    Seeded,
    /// Nothing was stored and seeding is disabled
    Empty,
    /// Stored data could not be parsed; the starter cards are used
    /// in memory until the next mutation overwrites the store
    Recovered,
}

pub struct Session {
    storage: Box<dyn Storage>,
    collection: Collection,
    config: CollectionConfig,
    outcome: LoadOutcome,
}

impl Session {
    /// Loads the collection from `storage`.
    ///
    /// # Errors
    /// - [`QuizbookError::NotInitialized`] when the backend was never initialized.
    /// - Any storage error other than unparseable data.
    pub async fn open(storage: Box<dyn Storage>, config: CollectionConfig) -> Result<Self> {
        if !storage.is_initialized().await {
            return Err(QuizbookError::NotInitialized);
        }

        let fallback = |config: &CollectionConfig| {
            if config.seed_sample {
                Collection::sample()
            } else {
                Collection::new()
            }
        };

        let (collection, outcome) = match storage.load_cards().await {
            Ok(Some(cards)) => (Collection::from_cards(cards), LoadOutcome::Loaded),
            Ok(None) if config.seed_sample => {
                let collection = Collection::sample();
                storage.save_cards(collection.cards()).await?;
                info!(count = collection.len(), "seeded starter cards");
                (collection, LoadOutcome::Seeded)
            }
            Ok(None) => (Collection::new(), LoadOutcome::Empty),
            Err(QuizbookError::SerializationError(err)) => {
                warn!(error = %err, "stored cards are unreadable, using starter cards");
                (fallback(&config), LoadOutcome::Recovered)
            }
            Err(err) => return Err(err),
        };

        info!(count = collection.len(), ?outcome, "opened session");
        Ok(Self {
            storage,
            collection,
            config,
            outcome,
        })
    }

    pub fn outcome(&self) -> LoadOutcome {
        self.outcome
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn cards(&self) -> &[Card] {
        self.collection.cards()
    }

    pub fn grouped(&self) -> CategoryIndex {
        self.collection.grouped()
    }

    pub fn placement(&self) -> Placement {
        self.config.placement
    }

    pub async fn add(&mut self, draft: CardDraft) -> Result<Card> {
        let card = self.collection.add(draft)?.clone();
        self.persist().await?;
        Ok(card)
    }

    pub async fn edit(&mut self, id: &CardId, patch: CardPatch) -> Result<Card> {
        let card = self.collection.edit(id, patch)?.clone();
        self.persist().await?;
        Ok(card)
    }

    pub async fn delete(&mut self, id: &CardId) -> Result<Card> {
        let card = self.collection.delete(id)?;
        self.persist().await?;
        Ok(card)
    }

    /// Moves a card using the configured [`Placement`]
    pub async fn move_card(
        &mut self,
        id: &CardId,
        major: &str,
        minor: &str,
        index: usize,
    ) -> Result<()> {
        self.collection
            .move_card(id, major, minor, index, self.config.placement)?;
        self.persist().await
    }

    async fn persist(&self) -> Result<()> {
        if let Err(err) = self.storage.save_cards(self.collection.cards()).await {
            warn!(error = %err, "failed to persist cards; in-memory changes kept");
            return Err(err);
        }
        Ok(())
    }
}
