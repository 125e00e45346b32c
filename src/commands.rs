// UI-facing commands
// String ids and raw form input come in; serializable values or a message come out

use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::gallery::{self, ArtworkDraft, GalleryFilter};
use crate::state::{Artwork, ArtworkId, ArtworkPatch, SessionSnapshot};
use crate::videos::Video;

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<E: std::fmt::Display> From<E> for CommandError {
    fn from(error: E) -> Self {
        CommandError {
            message: error.to_string(),
        }
    }
}

type CommandResult<T> = Result<T, CommandError>;

fn parse_id(id: &str) -> CommandResult<ArtworkId> {
    id.trim().parse().map_err(|_| CommandError {
        message: format!("Invalid artwork id: {}", id),
    })
}

fn owned(artworks: Vec<&Artwork>) -> Vec<Artwork> {
    artworks.into_iter().cloned().collect()
}

// ==================== ARTWORK COMMANDS ====================

/// Reload the catalogue from storage
pub async fn fetch_artworks(ctx: &AppContext) -> CommandResult<Vec<Artwork>> {
    let mut art = ctx.art.lock().await;
    art.fetch_all().await;

    match art.error() {
        Some(message) => Err(CommandError {
            message: message.to_string(),
        }),
        None => Ok(art.artworks().to_vec()),
    }
}

pub async fn get_artwork(ctx: &AppContext, id: String) -> CommandResult<Artwork> {
    let id = parse_id(&id)?;
    let artwork = ctx.art.lock().await.fetch_one(id).await?;
    Ok(artwork)
}

pub async fn add_artwork(ctx: &AppContext, input: ArtworkDraft) -> CommandResult<Artwork> {
    let new_artwork = input.into_new_artwork()?;
    let artwork = ctx.art.lock().await.add(new_artwork).await?;
    Ok(artwork)
}

#[derive(Debug, Deserialize)]
pub struct UpdateArtworkInput {
    pub id: String,
    pub patch: ArtworkPatch,
}

pub async fn update_artwork(ctx: &AppContext, input: UpdateArtworkInput) -> CommandResult<Artwork> {
    let id = parse_id(&input.id)?;
    let artwork = ctx.art.lock().await.update(id, input.patch).await?;
    Ok(artwork)
}

pub async fn featured_artworks(ctx: &AppContext) -> CommandResult<Vec<Artwork>> {
    Ok(owned(ctx.art.lock().await.featured()))
}

pub async fn artworks_by_genre(ctx: &AppContext, genre: String) -> CommandResult<Vec<Artwork>> {
    Ok(owned(ctx.art.lock().await.by_genre(&genre)))
}

/// Update the search box and return the matching artworks
pub async fn search_artworks(ctx: &AppContext, query: String) -> CommandResult<Vec<Artwork>> {
    let mut search = ctx.search.lock().await;
    search.set_query(query);

    let art = ctx.art.lock().await;
    Ok(owned(search.apply(art.artworks())))
}

/// Artworks matching the last search, re-evaluated against the current list
pub async fn search_results(ctx: &AppContext) -> CommandResult<Vec<Artwork>> {
    let search = ctx.search.lock().await;
    let art = ctx.art.lock().await;
    Ok(owned(search.apply(art.artworks())))
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub artworks: Vec<Artwork>,
    pub total: usize,
    pub genres: Vec<String>,
    pub years: Vec<i32>,
}

/// Apply the filter bar and return the visible artworks with the option lists
pub async fn filter_gallery(ctx: &AppContext, filter: GalleryFilter) -> CommandResult<GalleryView> {
    let art = ctx.art.lock().await;
    let all = art.artworks();

    Ok(GalleryView {
        artworks: owned(filter.apply(all)),
        total: art.total(),
        genres: gallery::genre_options(all),
        years: gallery::year_options(all),
    })
}

// ==================== FAVORITE COMMANDS ====================

/// Toggle a favorite and return the updated id list
pub async fn toggle_favorite(ctx: &AppContext, id: String) -> CommandResult<Vec<ArtworkId>> {
    let id = parse_id(&id)?;
    let mut art = ctx.art.lock().await;
    art.toggle_favorite(id)?;
    Ok(art.favorites().to_vec())
}

pub async fn list_favorites(ctx: &AppContext) -> CommandResult<Vec<Artwork>> {
    Ok(owned(ctx.art.lock().await.favorite_artworks()))
}

// ==================== SESSION COMMANDS ====================

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// `false` when the credentials were rejected
pub async fn login(ctx: &AppContext, input: LoginInput) -> CommandResult<bool> {
    let accepted = ctx
        .session
        .lock()
        .await
        .login(&input.username, &input.password)?;
    Ok(accepted)
}

pub async fn logout(ctx: &AppContext) -> CommandResult<()> {
    ctx.session.lock().await.logout()?;
    Ok(())
}

pub async fn current_session(ctx: &AppContext) -> CommandResult<SessionSnapshot> {
    Ok(ctx.session.lock().await.snapshot())
}

// ==================== VIDEO COMMANDS ====================

/// Load the demo videos on first use and return those matching `query`
pub async fn list_videos(ctx: &AppContext, query: Option<String>) -> CommandResult<Vec<Video>> {
    let mut videos = ctx.videos.lock().await;
    if videos.is_loading() {
        videos.load().await;
    }
    if let Some(query) = query {
        videos.set_query(query);
    }
    Ok(videos.filtered().into_iter().cloned().collect())
}

pub async fn like_video(ctx: &AppContext) -> CommandResult<u64> {
    let mut videos = ctx.videos.lock().await;
    videos.add_like();
    Ok(videos.total_likes())
}
