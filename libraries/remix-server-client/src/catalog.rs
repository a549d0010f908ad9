//! Remix catalog endpoint.

use crate::client::{decode, send, RemixServerClient};
use crate::error::Result;
use async_trait::async_trait;
use remix_core::{CatalogService, Track};
use tracing::debug;

impl RemixServerClient {
    /// Fetch every remix in the catalog.
    pub async fn get_remixes(&self) -> Result<Vec<Track>> {
        debug!(url = %self.url(), "Fetching remixes");

        let response = send(self.get("/api/remixes").await).await?;
        let tracks: Vec<Track> = decode(response, "remix list").await?;

        debug!(tracks = tracks.len(), "Fetched remixes");
        Ok(tracks)
    }
}

#[async_trait]
impl CatalogService for RemixServerClient {
    async fn fetch_tracks(&self) -> remix_core::Result<Vec<Track>> {
        Ok(self.get_remixes().await?)
    }
}
