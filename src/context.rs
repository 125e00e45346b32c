// Application context
// Owns every store; built once by the entry point and handed to the commands

use std::path::Path;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::{AppConfig, ConfigError};
use crate::gallery::FilterView;
use crate::state::{
    init_db, init_in_memory, ArtStore, DbConnection, DbError, LocalStorage, RecordStore,
    RecordStoreError, SessionStore, StorageError,
};
use crate::videos::VideoLibrary;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Record store error: {0}")]
    Records(#[from] RecordStoreError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

pub struct AppContext {
    pub config: AppConfig,
    pub storage: LocalStorage,
    pub art: Mutex<ArtStore<RecordStore>>,
    pub session: Mutex<SessionStore>,
    pub search: Mutex<FilterView>,
    pub videos: Mutex<VideoLibrary>,
}

impl AppContext {
    pub fn new(config: AppConfig, db: DbConnection) -> Self {
        let storage = LocalStorage::new(db);
        let records = RecordStore::new(storage.clone(), config.keys.artworks.clone(), config.latency);
        let art = ArtStore::new(records, storage.clone(), config.keys.favorites.clone());
        let session = SessionStore::new(storage.clone(), &config.keys, config.email_domain.clone());
        let videos = VideoLibrary::new(config.video_delay());

        AppContext {
            config,
            storage,
            art: Mutex::new(art),
            session: Mutex::new(session),
            search: Mutex::new(FilterView::default()),
            videos: Mutex::new(videos),
        }
    }

    /// Open the on-disk database under `data_dir` (or the configured path)
    pub fn open(config: AppConfig, data_dir: &Path) -> AppResult<Self> {
        let db_path = config.resolve_db_path(data_dir);
        let db = init_db(&db_path)?;
        log::info!("Using storage at {}", db_path.display());
        Ok(Self::new(config, db))
    }

    /// Context over a throwaway in-memory database
    pub fn in_memory(config: AppConfig) -> AppResult<Self> {
        Ok(Self::new(config, init_in_memory()?))
    }

    /// Startup sequence: seed the catalogue, restore favorites and the
    /// session, then load the artworks
    pub async fn start(&self) -> AppResult<()> {
        let mut art = self.art.lock().await;

        if self.config.seed_catalog {
            art.source().seed_if_empty().await?;
        }
        art.load_favorites()?;
        self.session.lock().await.load_user()?;

        art.fetch_all().await;
        if let Some(err) = art.error() {
            log::warn!("Gallery started without artworks: {}", err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_start_seeds_and_loads() {
        let config = AppConfig {
            seed_catalog: true,
            ..AppConfig::instant()
        };
        let ctx = AppContext::in_memory(config).unwrap();
        ctx.start().await.unwrap();

        let art = ctx.art.lock().await;
        assert_eq!(art.total(), 6);
        assert_eq!(art.featured().len(), 3);
        assert_eq!(ctx.session.lock().await.user_name(), "Guest");
    }

    #[tokio::test]
    async fn test_start_without_seed() {
        let ctx = AppContext::in_memory(AppConfig::instant()).unwrap();
        ctx.start().await.unwrap();
        assert_eq!(ctx.art.lock().await.total(), 0);
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let temp_dir = TempDir::new().unwrap();

        {
            let ctx = AppContext::open(AppConfig::instant(), temp_dir.path()).unwrap();
            ctx.start().await.unwrap();
            let mut art = ctx.art.lock().await;
            art.add(crate::state::NewArtwork {
                title: "Water Lilies".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
            art.toggle_favorite(1).unwrap();
            ctx.session.lock().await.login("alice", "x").unwrap();
        }

        let ctx = AppContext::open(AppConfig::instant(), temp_dir.path()).unwrap();
        ctx.start().await.unwrap();

        let art = ctx.art.lock().await;
        assert_eq!(art.total(), 1);
        assert_eq!(art.favorites(), &[1]);
        assert_eq!(art.favorite_artworks()[0].title, "Water Lilies");

        let session = ctx.session.lock().await;
        assert!(session.is_authenticated());
        assert_eq!(session.user_name(), "User");
    }
}
