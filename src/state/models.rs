// Data models for the gallery
use serde::{Deserialize, Deserializer, Serialize};

pub type ArtworkId = u64;

/// A catalogue entry as persisted under the artworks key.
///
/// Every field but `id` falls back to its default when missing, so records
/// inserted with only a few fields read back cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: ArtworkId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub price: f64,
}

// serde_json writes a non-finite price as null
fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

impl Artwork {
    /// Shallow-merge `patch` over this record. The id never changes.
    pub fn apply(&mut self, patch: &ArtworkPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(artist) = &patch.artist {
            self.artist = artist.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(image) = &patch.image {
            self.image = image.clone();
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

/// Caller-supplied fields for a new artwork. The store assigns the id and
/// always starts the record out as not featured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewArtwork {
    pub title: String,
    pub artist: String,
    pub year: i32,
    pub genre: String,
    pub description: String,
    pub image: String,
    pub price: f64,
}

impl NewArtwork {
    pub fn into_artwork(self, id: ArtworkId) -> Artwork {
        Artwork {
            id,
            title: self.title,
            artist: self.artist,
            year: self.year,
            genre: self.genre,
            description: self.description,
            image: self.image,
            featured: false,
            price: self.price,
        }
    }
}

/// Partial update; `None` keeps the existing value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub featured: Option<bool>,
    pub price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_parses_with_defaults() {
        let artwork: Artwork = serde_json::from_str(r#"{"id":1,"title":"A"}"#).unwrap();
        assert_eq!(artwork.id, 1);
        assert_eq!(artwork.title, "A");
        assert_eq!(artwork.artist, "");
        assert!(!artwork.featured);
        assert_eq!(artwork.price, 0.0);
    }

    #[test]
    fn test_apply_patch_keeps_unset_fields() {
        let mut artwork = NewArtwork {
            title: "Guernica".to_string(),
            artist: "Pablo Picasso".to_string(),
            year: 1937,
            genre: "Cubism".to_string(),
            ..Default::default()
        }
        .into_artwork(5);

        artwork.apply(&ArtworkPatch {
            featured: Some(true),
            price: Some(200_000_000.0),
            ..Default::default()
        });

        assert_eq!(artwork.id, 5);
        assert_eq!(artwork.title, "Guernica");
        assert_eq!(artwork.year, 1937);
        assert!(artwork.featured);
        assert_eq!(artwork.price, 200_000_000.0);
    }

    #[test]
    fn test_new_artwork_is_never_featured() {
        let artwork = NewArtwork::default().into_artwork(9);
        assert_eq!(artwork.id, 9);
        assert!(!artwork.featured);
    }
}
