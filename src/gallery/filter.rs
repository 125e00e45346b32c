// Free-text and filter-bar filtering over the loaded catalogue
// Views are recomputed from scratch on every call

use serde::{Deserialize, Serialize};

use crate::state::Artwork;

fn matches_query(artwork: &Artwork, query: &str) -> bool {
    artwork.title.to_lowercase().contains(query)
        || artwork.artist.to_lowercase().contains(query)
        || artwork.genre.to_lowercase().contains(query)
}

/// Records whose title, artist or genre contains `query`, ignoring case.
/// A blank query keeps everything.
pub fn filter_artworks<'a>(artworks: &'a [Artwork], query: &str) -> Vec<&'a Artwork> {
    if query.trim().is_empty() {
        return artworks.iter().collect();
    }

    let query = query.to_lowercase();
    artworks
        .iter()
        .filter(|a| matches_query(a, &query))
        .collect()
}

/// Search box state bound to the gallery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterView {
    query: String,
}

impl FilterView {
    pub fn new(query: impl Into<String>) -> Self {
        FilterView {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        log::debug!("Search query set to {:?}", self.query);
    }

    pub fn apply<'a>(&self, artworks: &'a [Artwork]) -> Vec<&'a Artwork> {
        filter_artworks(artworks, &self.query)
    }
}

/// Combined criteria of the gallery filter bar
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryFilter {
    pub search: String,
    /// Exact genre; empty means any
    pub genre: String,
    pub year: Option<i32>,
    pub featured_only: bool,
}

impl GalleryFilter {
    pub fn reset(&mut self) {
        *self = GalleryFilter::default();
    }

    pub fn is_active(&self) -> bool {
        *self != GalleryFilter::default()
    }

    pub fn apply<'a>(&self, artworks: &'a [Artwork]) -> Vec<&'a Artwork> {
        filter_artworks(artworks, &self.search)
            .into_iter()
            .filter(|a| self.genre.is_empty() || a.genre == self.genre)
            .filter(|a| self.year.map_or(true, |year| a.year == year))
            .filter(|a| !self.featured_only || a.featured)
            .collect()
    }
}

/// Distinct genres, in first-seen order
pub fn genre_options(artworks: &[Artwork]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for artwork in artworks {
        if !artwork.genre.is_empty() && !genres.contains(&artwork.genre) {
            genres.push(artwork.genre.clone());
        }
    }
    genres
}

/// Distinct years, in first-seen order
pub fn year_options(artworks: &[Artwork]) -> Vec<i32> {
    let mut years = Vec::new();
    for artwork in artworks {
        if !years.contains(&artwork.year) {
            years.push(artwork.year);
        }
    }
    years
}
