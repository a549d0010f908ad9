//! Shared fixtures for playback integration tests

#![allow(dead_code)]

use remix_core::Track;
use remix_playback::{
    MediaEvent, MediaOutput, PlayError, PlayerConfig, PlayerController, PlayerEvent,
    SourceGeneration,
};

/// Output that remembers what it was told, like an `<audio>` element would
#[derive(Debug, Default)]
pub struct FakeAudioElement {
    pub src: Option<String>,
    pub generation: SourceGeneration,
    pub paused: bool,
    pub current_time: f64,
    pub native_loop: bool,
    pub volume: f32,
    pub play_calls: usize,
    pub analyser_connections: usize,
}

impl MediaOutput for FakeAudioElement {
    fn set_source(&mut self, url: &str, generation: SourceGeneration) {
        self.src = Some(url.to_string());
        self.generation = generation;
        self.current_time = 0.0;
    }

    fn play(&mut self) -> Result<(), PlayError> {
        self.play_calls += 1;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn set_native_loop(&mut self, enabled: bool) {
        self.native_loop = enabled;
    }

    fn set_volume(&mut self, gain: f32) {
        self.volume = gain;
    }

    fn connect_analyser(&mut self) {
        self.analyser_connections += 1;
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id, format!("Remix {}", id), format!("https://cdn.test/{}.mp3", id))
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn numbered_tracks(count: usize) -> Vec<Track> {
    (0..count).map(|i| track(&format!("t{}", i))).collect()
}

pub fn player() -> PlayerController<FakeAudioElement> {
    PlayerController::with_seed(FakeAudioElement::default(), PlayerConfig::default(), 1234)
}

pub fn player_with(config: PlayerConfig) -> PlayerController<FakeAudioElement> {
    PlayerController::with_seed(FakeAudioElement::default(), config, 1234)
}

/// Report metadata and play the current track through to its end
pub fn finish_current(player: &mut PlayerController<FakeAudioElement>, duration: f64) {
    let generation = player.generation();
    player.handle_media_event(MediaEvent::loaded_metadata(generation, duration));
    player.handle_media_event(MediaEvent::time_update(generation, duration));
    player.handle_media_event(MediaEvent::ended(generation));
}

pub fn current_id(player: &PlayerController<FakeAudioElement>) -> String {
    player
        .current_track()
        .map(|t| t.id.to_string())
        .unwrap_or_default()
}

pub fn listen_count(events: &[PlayerEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PlayerEvent::ListenRecorded { .. }))
        .count()
}
