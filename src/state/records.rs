// Artwork record store
// The whole collection lives as one JSON array under a single local-storage key

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use super::models::{Artwork, ArtworkId, ArtworkPatch, NewArtwork};
use super::seed::demo_catalog;
use super::storage::{LocalStorage, StorageError};
use crate::config::LatencyProfile;

#[derive(Debug, Error)]
pub enum RecordStoreError {
    #[error("Artwork {0} not found")]
    NotFound(ArtworkId),
    #[error("Malformed artwork storage: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("Price must be a finite number, got {0}")]
    InvalidPrice(f64),
    #[error("Failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type RecordResult<T> = Result<T, RecordStoreError>;

// JSON has no NaN or infinity; serde_json would write them as null
fn check_price(price: f64) -> RecordResult<()> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(RecordStoreError::InvalidPrice(price))
    }
}

/// Source of artwork records for the state container
#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Every record, in persisted order
    async fn list_all(&self) -> RecordResult<Vec<Artwork>>;

    async fn get_one(&self, id: ArtworkId) -> RecordResult<Artwork>;

    /// Store a new record; the id is assigned here, never by the caller
    async fn insert(&self, artwork: NewArtwork) -> RecordResult<Artwork>;

    async fn update(&self, id: ArtworkId, patch: ArtworkPatch) -> RecordResult<Artwork>;
}

pub struct RecordStore {
    storage: LocalStorage,
    key: String,
    latency: LatencyProfile,
    // Serializes read-modify-write cycles on the collection
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(storage: LocalStorage, key: impl Into<String>, latency: LatencyProfile) -> Self {
        RecordStore {
            storage,
            key: key.into(),
            latency,
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Write the demo catalogue if nothing has been stored yet.
    /// Returns whether anything was written.
    pub async fn seed_if_empty(&self) -> RecordResult<bool> {
        let _guard = self.write_lock.lock().await;
        if self.storage.get_item(&self.key)?.is_some() {
            return Ok(false);
        }

        let catalog = demo_catalog();
        log::info!("Seeding {} demo artworks under {}", catalog.len(), self.key);
        self.write_all(&catalog)?;
        Ok(true)
    }

    /// Replace unreadable storage with an empty collection.
    /// Returns whether a reset happened.
    pub async fn reset_if_malformed(&self) -> RecordResult<bool> {
        let _guard = self.write_lock.lock().await;
        match self.read_all() {
            Err(RecordStoreError::Malformed(e)) => {
                log::warn!("Discarding malformed artwork storage under {}: {}", self.key, e);
                self.write_all(&[])?;
                Ok(true)
            }
            Err(e) => Err(e),
            Ok(_) => Ok(false),
        }
    }

    fn read_all(&self) -> RecordResult<Vec<Artwork>> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(RecordStoreError::Malformed),
            None => Ok(Vec::new()),
        }
    }

    fn write_all(&self, artworks: &[Artwork]) -> RecordResult<()> {
        let raw = serde_json::to_string(artworks).map_err(RecordStoreError::Encode)?;
        self.storage.set_item(&self.key, &raw)?;
        Ok(())
    }
}

async fn simulate_latency(delay: std::time::Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Next id: one past the current maximum, or 1 for an empty collection
pub fn next_id(artworks: &[Artwork]) -> ArtworkId {
    artworks.iter().map(|a| a.id).max().map_or(1, |max| max + 1)
}

#[async_trait]
impl ArtworkSource for RecordStore {
    async fn list_all(&self) -> RecordResult<Vec<Artwork>> {
        simulate_latency(self.latency.list()).await;
        self.read_all()
    }

    async fn get_one(&self, id: ArtworkId) -> RecordResult<Artwork> {
        simulate_latency(self.latency.get()).await;
        self.read_all()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(RecordStoreError::NotFound(id))
    }

    async fn insert(&self, artwork: NewArtwork) -> RecordResult<Artwork> {
        check_price(artwork.price)?;
        simulate_latency(self.latency.insert()).await;
        let _guard = self.write_lock.lock().await;

        let mut artworks = self.read_all()?;
        let created = artwork.into_artwork(next_id(&artworks));
        artworks.push(created.clone());
        self.write_all(&artworks)?;

        log::debug!("Inserted artwork {} ({})", created.id, created.title);
        Ok(created)
    }

    async fn update(&self, id: ArtworkId, patch: ArtworkPatch) -> RecordResult<Artwork> {
        if let Some(price) = patch.price {
            check_price(price)?;
        }
        simulate_latency(self.latency.update()).await;
        let _guard = self.write_lock.lock().await;

        let mut artworks = self.read_all()?;
        let artwork = artworks
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(RecordStoreError::NotFound(id))?;
        artwork.apply(&patch);
        let updated = artwork.clone();
        self.write_all(&artworks)?;

        log::debug!("Updated artwork {}", id);
        Ok(updated)
    }
}
