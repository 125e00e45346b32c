// ArtVue - Art gallery catalogue
// Module declarations

pub mod commands;
pub mod config;
pub mod context;
pub mod gallery;
pub mod state;
pub mod videos;

pub use config::AppConfig;
pub use context::{AppContext, AppError, AppResult};

/// Boot the gallery: logging, configuration, storage and the startup
/// sequence, all on a single-threaded runtime.
pub fn run() -> AppResult<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let data_dir = state::get_app_data_dir()?;
    let config = AppConfig::load_from_dir(&data_dir)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let ctx = AppContext::open(config, &data_dir)?;
        ctx.start().await?;

        let art = ctx.art.lock().await;
        let session = ctx.session.lock().await;
        log::info!(
            "ArtVue ready: {} artworks ({} featured), {} favorites, signed in as {}",
            art.total(),
            art.featured().len(),
            art.favorites().len(),
            session.user_name()
        );
        Ok::<(), AppError>(())
    })
}
