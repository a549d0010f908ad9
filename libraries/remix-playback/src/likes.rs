//! Like/favorite set
//!
//! Local cache of the server-side like relation. Toggles are applied
//! optimistically; every server answer force-sets the entry to the value
//! the server reports, provided no newer toggle for the same track has
//! happened in the meantime.

use remix_core::TrackId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Receipt for an optimistic toggle
///
/// Hand it back to [`LikedSet::reconcile`] together with the server's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeTicket {
    pub track_id: TrackId,
    pub version: u64,
    /// Local state right after the optimistic flip
    pub liked: bool,
}

/// Set of liked track ids
#[derive(Debug, Clone, Default)]
pub struct LikedSet {
    liked: HashSet<TrackId>,

    /// Latest toggle version per track
    versions: HashMap<TrackId, u64>,
}

impl LikedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set with a fresh server listing
    pub fn replace_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = TrackId>,
    {
        self.liked = ids.into_iter().collect();
    }

    /// Flip membership locally and return a ticket for reconciliation
    pub fn toggle(&mut self, track_id: &TrackId) -> LikeTicket {
        let liked = if self.liked.remove(track_id) {
            false
        } else {
            self.liked.insert(track_id.clone());
            true
        };

        let version = self.versions.entry(track_id.clone()).or_insert(0);
        *version += 1;

        LikeTicket {
            track_id: track_id.clone(),
            version: *version,
            liked,
        }
    }

    /// Apply the server's answer for a toggle
    ///
    /// Returns false when a newer toggle superseded the ticket; its answer
    /// will arrive separately.
    pub fn reconcile(&mut self, ticket: &LikeTicket, liked: bool) -> bool {
        let latest = self.versions.get(&ticket.track_id).copied().unwrap_or(0);
        if ticket.version != latest {
            return false;
        }
        self.set(&ticket.track_id, liked);
        true
    }

    /// Force membership of one track
    pub fn set(&mut self, track_id: &TrackId, liked: bool) {
        if liked {
            self.liked.insert(track_id.clone());
        } else {
            self.liked.remove(track_id);
        }
    }

    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.liked.contains(track_id)
    }

    pub fn len(&self) -> usize {
        self.liked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackId> {
        self.liked.iter()
    }

    /// Liked ids in sorted order
    pub fn to_sorted_vec(&self) -> Vec<TrackId> {
        let mut ids: Vec<TrackId> = self.liked.iter().cloned().collect();
        ids.sort();
        ids
    }
}
