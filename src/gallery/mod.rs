// Gallery presentation helpers
// Search filtering and artwork form validation

pub mod filter;
pub mod validation;

pub use filter::{filter_artworks, genre_options, year_options, FilterView, GalleryFilter};
pub use validation::{ArtworkDraft, FieldError, ValidationErrors, MIN_TITLE_LEN, MIN_YEAR};
