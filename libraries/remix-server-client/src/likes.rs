//! Like endpoints.

use crate::client::{decode, send, RemixServerClient};
use crate::error::Result;
use crate::types::{LikesResponse, ToggleLikeRequest, ToggleLikeResponse};
use async_trait::async_trait;
use remix_core::{LikesService, TrackId};
use tracing::debug;

impl RemixServerClient {
    /// Fetch the ids of every track the current user likes.
    pub async fn get_likes(&self) -> Result<Vec<TrackId>> {
        let response = send(self.get("/api/likes").await).await?;
        let body: LikesResponse = decode(response, "likes").await?;

        debug!(likes = body.likes.len(), "Fetched likes");
        Ok(body.likes)
    }

    /// Toggle the like on `track_id`; returns the server's resulting state.
    pub async fn post_toggle_like(&self, track_id: &TrackId) -> Result<bool> {
        debug!(track_id = %track_id, "Toggling like");

        let request = self
            .post("/api/likes")
            .await
            .json(&ToggleLikeRequest { track_id });
        let response = send(request).await?;
        let body: ToggleLikeResponse = decode(response, "like toggle").await?;

        Ok(body.liked)
    }
}

#[async_trait]
impl LikesService for RemixServerClient {
    async fn fetch_likes(&self) -> remix_core::Result<Vec<TrackId>> {
        Ok(self.get_likes().await?)
    }

    async fn toggle_like(&self, track_id: &TrackId) -> remix_core::Result<bool> {
        Ok(self.post_toggle_like(track_id).await?)
    }
}
