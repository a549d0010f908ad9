//! Collaborator traits
//!
//! The player core never talks to the network itself. These traits describe
//! the remote collaborators it depends on so that HTTP clients, in-memory
//! fakes, or anything else can be plugged in.

use crate::error::Result;
use crate::types::{ListenRecord, Track, TrackId};
use async_trait::async_trait;

/// Source of playable tracks
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetch the full list of remixes
    async fn fetch_tracks(&self) -> Result<Vec<Track>>;
}

/// Server-side like relation between the current user and tracks
#[async_trait]
pub trait LikesService: Send + Sync {
    /// Fetch every track id the current user has liked
    async fn fetch_likes(&self) -> Result<Vec<TrackId>>;

    /// Toggle the like on a track
    ///
    /// Returns the state after the toggle as decided by the server
    /// (`true` = now liked).
    async fn toggle_like(&self, track_id: &TrackId) -> Result<bool>;
}

/// Listening history sink
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// Record one completed listen
    async fn record_listen(&self, record: &ListenRecord) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct MemoryHistory {
        records: Mutex<Vec<ListenRecord>>,
    }

    #[async_trait]
    impl HistoryService for MemoryHistory {
        async fn record_listen(&self, record: &ListenRecord) -> Result<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn history_service_is_object_safe() {
        let history = Arc::new(MemoryHistory {
            records: Mutex::new(Vec::new()),
        });
        let service: Arc<dyn HistoryService> = history.clone();

        service
            .record_listen(&ListenRecord::from_seconds(TrackId::new("r1"), 2.0))
            .await
            .unwrap();

        assert_eq!(history.records.lock().unwrap().len(), 1);
        assert_eq!(history.records.lock().unwrap()[0].duration_ms, 2000);
    }
}
