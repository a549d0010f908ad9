//! Listening history endpoint.

use crate::client::{send, RemixServerClient};
use crate::error::Result;
use async_trait::async_trait;
use remix_core::{HistoryService, ListenRecord};
use tracing::debug;

impl RemixServerClient {
    /// Record one listen. The response body is ignored.
    pub async fn post_history(&self, record: &ListenRecord) -> Result<()> {
        debug!(
            track_id = %record.track_id,
            duration_ms = record.duration_ms,
            "Posting listen"
        );

        send(self.post("/api/history").await.json(record)).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryService for RemixServerClient {
    async fn record_listen(&self, record: &ListenRecord) -> remix_core::Result<()> {
        Ok(self.post_history(record).await?)
    }
}
