/// Catalog track types
use super::TrackId;
use serde::{Deserialize, Serialize};

/// A playable remix as supplied by the catalog
///
/// Read-only on the client; the player keeps copies in its queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Catalog identifier
    pub id: TrackId,
    /// Display title
    pub title: String,
    /// Remixing artist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Artwork URL on the media CDN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// Streamable audio URL on the media CDN
    pub audio_url: String,
    /// Genre tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    /// Duration in seconds, when the catalog knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Track {
    /// Create a track with only the required fields
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            cover_image_url: None,
            audio_url: audio_url.into(),
            genre: None,
            duration: None,
        }
    }

    /// Set the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the cover image URL
    pub fn with_cover(mut self, url: impl Into<String>) -> Self {
        self.cover_image_url = Some(url.into());
        self
    }

    /// Set the genre
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the catalog duration in seconds
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }
}

/// One completed listen, as reported to the history service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenRecord {
    /// Track that was listened to
    pub track_id: TrackId,
    /// Listened duration in milliseconds
    pub duration_ms: u64,
}

impl ListenRecord {
    /// Build a record from a duration already in milliseconds
    pub fn new(track_id: impl Into<TrackId>, duration_ms: u64) -> Self {
        Self {
            track_id: track_id.into(),
            duration_ms,
        }
    }

    /// Build a record from a media duration in seconds
    pub fn from_seconds(track_id: TrackId, seconds: f64) -> Self {
        let duration_ms = if seconds.is_finite() && seconds > 0.0 {
            (seconds * 1000.0).round() as u64
        } else {
            0
        };
        Self {
            track_id,
            duration_ms,
        }
    }
}
