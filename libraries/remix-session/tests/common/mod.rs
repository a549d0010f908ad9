//! Fakes for session tests

#![allow(dead_code)]

use async_trait::async_trait;
use remix_core::{
    CatalogService, HistoryService, LikesService, ListenRecord, RemixError, Track, TrackId,
};
use remix_playback::{MediaOutput, PlayError, PlayerConfig, PlayerController, SourceGeneration};
use remix_session::{PlayerSession, Services};
use std::sync::{Arc, Mutex};

/// Output that accepts everything
#[derive(Debug, Default)]
pub struct SilentOutput {
    pub src: Option<String>,
}

impl MediaOutput for SilentOutput {
    fn set_source(&mut self, url: &str, _generation: SourceGeneration) {
        self.src = Some(url.to_string());
    }

    fn play(&mut self) -> Result<(), PlayError> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn set_current_time(&mut self, _seconds: f64) {}

    fn set_native_loop(&mut self, _enabled: bool) {}

    fn set_volume(&mut self, _gain: f32) {}
}

/// In-memory stand-in for the remix server
#[derive(Default)]
pub struct FakeBackend {
    pub tracks: Vec<Track>,
    pub liked: Mutex<Vec<TrackId>>,
    pub listens: Mutex<Vec<ListenRecord>>,
    pub toggles: Mutex<Vec<TrackId>>,

    /// Fixed answer for every toggle instead of flipping `liked`
    pub like_answer: Option<bool>,
    pub fail_likes: bool,
    pub fail_history: bool,
}

impl FakeBackend {
    pub fn listens(&self) -> Vec<ListenRecord> {
        self.listens.lock().unwrap().clone()
    }

    pub fn toggle_count(&self) -> usize {
        self.toggles.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogService for FakeBackend {
    async fn fetch_tracks(&self) -> remix_core::Result<Vec<Track>> {
        Ok(self.tracks.clone())
    }
}

#[async_trait]
impl LikesService for FakeBackend {
    async fn fetch_likes(&self) -> remix_core::Result<Vec<TrackId>> {
        if self.fail_likes {
            return Err(RemixError::network("connection reset"));
        }
        Ok(self.liked.lock().unwrap().clone())
    }

    async fn toggle_like(&self, track_id: &TrackId) -> remix_core::Result<bool> {
        self.toggles.lock().unwrap().push(track_id.clone());
        if self.fail_likes {
            return Err(RemixError::network("connection reset"));
        }
        if let Some(answer) = self.like_answer {
            return Ok(answer);
        }

        let mut liked = self.liked.lock().unwrap();
        if let Some(pos) = liked.iter().position(|id| id == track_id) {
            liked.remove(pos);
            Ok(false)
        } else {
            liked.push(track_id.clone());
            Ok(true)
        }
    }
}

#[async_trait]
impl HistoryService for FakeBackend {
    async fn record_listen(&self, record: &ListenRecord) -> remix_core::Result<()> {
        if self.fail_history {
            return Err(RemixError::network("history offline"));
        }
        self.listens.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id, format!("Remix {}", id), format!("https://cdn.test/{}.mp3", id))
}

pub fn session_with(backend: Arc<FakeBackend>) -> PlayerSession<SilentOutput> {
    let controller =
        PlayerController::with_seed(SilentOutput::default(), PlayerConfig::default(), 99);
    PlayerSession::with_controller(controller, Services::from_backend(backend))
}
