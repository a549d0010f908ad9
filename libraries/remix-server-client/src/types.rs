//! Wire types for the remix server API.

use remix_core::TrackId;
use serde::{Deserialize, Serialize};

/// Response of `GET /api/likes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikesResponse {
    pub likes: Vec<TrackId>,
}

/// Body of `POST /api/likes`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest<'a> {
    pub track_id: &'a TrackId,
}

/// Response of `POST /api/likes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleLikeResponse {
    pub liked: bool,
}
