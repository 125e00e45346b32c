// State management module
// Local-storage persistence, the artwork record store and the state containers

pub mod art_store;
pub mod db;
pub mod models;
pub mod records;
pub mod seed;
pub mod session;
pub mod storage;

pub use art_store::ArtStore;
pub use db::{init_db, init_in_memory, DbConnection, DbError};
pub use models::{Artwork, ArtworkId, ArtworkPatch, NewArtwork, User};
pub use records::{ArtworkSource, RecordResult, RecordStore, RecordStoreError};
pub use session::{Role, SessionSnapshot, SessionStore};
pub use storage::{get_app_data_dir, LocalStorage, StorageError};
