// Artwork state container
// Holds the loaded catalogue, the favorites side-table and the loading/error flags

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use super::models::{Artwork, ArtworkId, ArtworkPatch, NewArtwork};
use super::records::{ArtworkSource, RecordResult, RecordStoreError};
use super::storage::LocalStorage;

/// Shared loading flag; `begin` hands out a guard that clears it on drop,
/// so the flag resets even when an in-flight future is abandoned.
#[derive(Clone, Default)]
struct LoadingFlag(Arc<AtomicBool>);

struct LoadingGuard(Arc<AtomicBool>);

impl LoadingFlag {
    fn begin(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(Arc::clone(&self.0))
    }

    fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct ArtStore<S> {
    source: S,
    storage: LocalStorage,
    favorites_key: String,
    artworks: Vec<Artwork>,
    favorites: Vec<ArtworkId>,
    loading: LoadingFlag,
    error: Option<String>,
    revision: watch::Sender<u64>,
}

impl<S: ArtworkSource> ArtStore<S> {
    pub fn new(source: S, storage: LocalStorage, favorites_key: impl Into<String>) -> Self {
        let (revision, _) = watch::channel(0);
        ArtStore {
            source,
            storage,
            favorites_key: favorites_key.into(),
            artworks: Vec::new(),
            favorites: Vec::new(),
            loading: LoadingFlag::default(),
            error: None,
            revision,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // ==================== STATE ====================

    pub fn artworks(&self) -> &[Artwork] {
        &self.artworks
    }

    pub fn favorites(&self) -> &[ArtworkId] {
        &self.favorites
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Receiver that observes a new revision after every change to the
    /// artwork list or the favorites
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    fn notify(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn record_error(&mut self, err: &RecordStoreError) {
        self.error = Some(err.to_string());
    }

    // ==================== DERIVED VIEWS ====================

    pub fn featured(&self) -> Vec<&Artwork> {
        self.artworks.iter().filter(|a| a.featured).collect()
    }

    pub fn total(&self) -> usize {
        self.artworks.len()
    }

    /// Exact, case-sensitive genre match
    pub fn by_genre(&self, genre: &str) -> Vec<&Artwork> {
        self.artworks.iter().filter(|a| a.genre == genre).collect()
    }

    /// Favorite records in catalogue order
    pub fn favorite_artworks(&self) -> Vec<&Artwork> {
        self.artworks
            .iter()
            .filter(|a| self.favorites.contains(&a.id))
            .collect()
    }

    pub fn is_favorite(&self, id: ArtworkId) -> bool {
        self.favorites.contains(&id)
    }

    // ==================== ACTIONS ====================

    /// Reload the whole catalogue. Failures are kept in `error()`, not returned.
    pub async fn fetch_all(&mut self) {
        let _loading = self.loading.begin();
        self.error = None;

        match self.source.list_all().await {
            Ok(artworks) => {
                log::info!("Fetched {} artworks", artworks.len());
                self.artworks = artworks;
                self.notify();
            }
            Err(e) => {
                log::error!("Failed to fetch artworks: {}", e);
                self.record_error(&e);
            }
        }
    }

    /// Load a single record, replacing the in-memory copy or appending it
    pub async fn fetch_one(&mut self, id: ArtworkId) -> RecordResult<Artwork> {
        let _loading = self.loading.begin();

        match self.source.get_one(id).await {
            Ok(artwork) => {
                self.upsert(artwork.clone());
                Ok(artwork)
            }
            Err(e) => {
                log::error!("Failed to fetch artwork {}: {}", id, e);
                self.record_error(&e);
                Err(e)
            }
        }
    }

    pub async fn add(&mut self, artwork: NewArtwork) -> RecordResult<Artwork> {
        let _loading = self.loading.begin();

        match self.source.insert(artwork).await {
            Ok(created) => {
                log::info!("Added artwork {} ({})", created.id, created.title);
                self.artworks.push(created.clone());
                self.notify();
                Ok(created)
            }
            Err(e) => {
                log::error!("Failed to add artwork: {}", e);
                self.record_error(&e);
                Err(e)
            }
        }
    }

    pub async fn update(&mut self, id: ArtworkId, patch: ArtworkPatch) -> RecordResult<Artwork> {
        let _loading = self.loading.begin();

        match self.source.update(id, patch).await {
            Ok(updated) => {
                self.upsert(updated.clone());
                Ok(updated)
            }
            Err(e) => {
                log::error!("Failed to update artwork {}: {}", id, e);
                self.record_error(&e);
                Err(e)
            }
        }
    }

    fn upsert(&mut self, artwork: Artwork) {
        match self.artworks.iter_mut().find(|a| a.id == artwork.id) {
            Some(existing) => *existing = artwork,
            None => self.artworks.push(artwork),
        }
        self.notify();
    }

    /// Add `id` to the favorites, or remove it if already there, then
    /// persist the full set
    pub fn toggle_favorite(&mut self, id: ArtworkId) -> RecordResult<()> {
        let mut favorites = self.favorites.clone();
        match favorites.iter().position(|&f| f == id) {
            Some(index) => {
                favorites.remove(index);
            }
            None => favorites.push(id),
        }

        let raw = serde_json::to_string(&favorites).map_err(RecordStoreError::Encode)?;
        self.storage.set_item(&self.favorites_key, &raw)?;

        self.favorites = favorites;
        self.notify();
        Ok(())
    }

    /// Restore favorites saved by an earlier session. Nothing stored is a no-op;
    /// an unreadable entry is logged and leaves no favorites.
    pub fn load_favorites(&mut self) -> RecordResult<()> {
        let Some(raw) = self.storage.get_item(&self.favorites_key)? else {
            return Ok(());
        };

        match serde_json::from_str::<Vec<ArtworkId>>(&raw) {
            Ok(mut favorites) => {
                // A hand-edited entry may repeat ids
                let mut seen = Vec::with_capacity(favorites.len());
                favorites.retain(|id| {
                    let fresh = !seen.contains(id);
                    seen.push(*id);
                    fresh
                });
                self.favorites = favorites;
                self.notify();
            }
            Err(e) => {
                log::warn!("Ignoring malformed favorites under {}: {}", self.favorites_key, e);
                if !self.favorites.is_empty() {
                    self.favorites.clear();
                    self.notify();
                }
            }
        }
        Ok(())
    }
}
