// Artwork form validation
// Applied where user input enters the app; the record store only guards prices

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::NewArtwork;

pub const MIN_TITLE_LEN: usize = 3;
pub const MIN_YEAR: i32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn messages(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.message).collect()
    }

    pub fn for_field(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }
}

/// Raw contents of the "add artwork" form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkDraft {
    pub title: String,
    pub artist: String,
    pub year: Option<i32>,
    pub genre: String,
    pub description: String,
    pub image: String,
    pub price: f64,
}

impl ArtworkDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        let mut push = |field, message| errors.push(FieldError { field, message });

        let title = self.title.trim();
        if title.is_empty() {
            push("title", "Title is required");
        } else if title.chars().count() < MIN_TITLE_LEN {
            push("title", "Title must be at least 3 characters");
        }

        if self.artist.trim().is_empty() {
            push("artist", "Artist is required");
        }

        match self.year {
            None => push("year", "Year is required"),
            Some(year) if !(MIN_YEAR..=Utc::now().year()).contains(&year) => {
                push("year", "Enter a valid year")
            }
            Some(_) => {}
        }

        if self.genre.trim().is_empty() {
            push("genre", "Genre is required");
        }

        if !self.price.is_finite() {
            push("price", "Enter a valid price");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Validate and convert into a record ready for insertion
    pub fn into_new_artwork(self) -> Result<NewArtwork, ValidationErrors> {
        self.validate()?;
        Ok(NewArtwork {
            title: self.title.trim().to_string(),
            artist: self.artist.trim().to_string(),
            year: self.year.unwrap_or_default(),
            genre: self.genre,
            description: self.description,
            image: self.image,
            price: self.price,
        })
    }
}
