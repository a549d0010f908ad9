//! Core types for playback management

use remix_core::Track;
use serde::{Deserialize, Serialize};

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded yet
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track, or parked at the end of the queue
    Paused,
}

/// Loop mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Stop when the playback order runs out
    #[default]
    Off,

    /// Wrap around to the start of the playback order
    Queue,

    /// Repeat the current track indefinitely
    Track,
}

impl LoopMode {
    /// Next mode in the button cycle: off → queue → track → off
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            LoopMode::Off => LoopMode::Queue,
            LoopMode::Queue => LoopMode::Track,
            LoopMode::Track => LoopMode::Off,
        }
    }
}

/// Direction of a transport step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Forward in playback order
    Next,

    /// Backward in playback order
    Previous,
}

/// Mode flags that alter how "next" is computed
///
/// Independent of queue contents; they persist across track changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeFlags {
    /// Shuffle active
    pub shuffle: bool,

    /// Loop mode
    pub loop_mode: LoopMode,
}

/// How single-track looping is carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackLoopStrategy {
    /// Native loop attribute stays off; the controller restarts the track on
    /// every `Ended` and counts each repeat exactly once
    #[default]
    Controller,

    /// Native loop attribute mirrors `LoopMode::Track`; repeats are inferred
    /// from the time series crossing from near-end to near-start
    Native,
}

/// Configuration for the player controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Initial loop mode (default: Off)
    pub loop_mode: LoopMode,

    /// "Previous" restarts the current track past this position (default: 3s)
    pub restart_threshold_secs: f64,

    /// Single-track loop implementation (default: Controller)
    pub track_loop: TrackLoopStrategy,

    /// Native strategy: a sample this close to the end counts as "near end"
    pub loop_end_window_secs: f64,

    /// Native strategy: a sample below this position counts as "near start"
    pub loop_start_window_secs: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            loop_mode: LoopMode::Off,
            restart_threshold_secs: 3.0,
            track_loop: TrackLoopStrategy::Controller,
            loop_end_window_secs: 1.0,
            loop_start_window_secs: 0.5,
        }
    }
}

/// Read-only view of the player for a UI layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub track: Option<Track>,
    pub current_index: Option<usize>,
    pub queue_length: usize,
    pub state: PlaybackState,
    pub current_time: f64,
    pub duration: f64,
    pub shuffle: bool,
    pub loop_mode: LoopMode,
    pub volume: u8,
    pub muted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 80);
        assert_eq!(config.loop_mode, LoopMode::Off);
        assert_eq!(config.restart_threshold_secs, 3.0);
        assert_eq!(config.track_loop, TrackLoopStrategy::Controller);
        assert_eq!(config.loop_end_window_secs, 1.0);
        assert_eq!(config.loop_start_window_secs, 0.5);
    }

    #[test]
    fn loop_mode_cycles_in_three_steps() {
        let mut mode = LoopMode::Off;
        mode = mode.next();
        assert_eq!(mode, LoopMode::Queue);
        mode = mode.next();
        assert_eq!(mode, LoopMode::Track);
        mode = mode.next();
        assert_eq!(mode, LoopMode::Off);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: PlayerConfig =
            serde_json::from_str(r#"{ "volume": 40, "track_loop": "native" }"#).unwrap();
        assert_eq!(config.volume, 40);
        assert_eq!(config.track_loop, TrackLoopStrategy::Native);
        assert_eq!(config.restart_threshold_secs, 3.0);
    }
}
