//! Ram Remix Hub - Playback Core
//!
//! Platform-agnostic queue and transport state machine for the remix player.
//!
//! This crate provides:
//! - Queue manager with logical (playback-order) navigation
//! - Shuffle as a pinned Fisher-Yates permutation over queue indices
//! - Loop modes (Off, Queue, Track)
//! - Transport control (play/pause/next/previous/seek/volume)
//! - Listen tracking for the history collaborator
//! - Optimistic like set with server reconciliation
//!
//! # Architecture
//!
//! `remix-playback` performs no I/O:
//! - The audio element is reached through the [`MediaOutput`] trait
//! - Output events come back through [`PlayerController::handle_media_event`]
//! - Remote side effects leave as [`PlayerEvent`]s for the host to dispatch
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use remix_core::Track;
//! use remix_playback::{
//!     LoopMode, MediaEvent, MediaOutput, PlayError, PlayerConfig, PlayerController,
//!     SourceGeneration,
//! };
//!
//! // Output that ignores every command
//! struct Silent;
//!
//! impl MediaOutput for Silent {
//!     fn set_source(&mut self, _url: &str, _generation: SourceGeneration) {}
//!     fn play(&mut self) -> Result<(), PlayError> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn set_current_time(&mut self, _seconds: f64) {}
//!     fn set_native_loop(&mut self, _enabled: bool) {}
//!     fn set_volume(&mut self, _gain: f32) {}
//! }
//!
//! let mut player = PlayerController::new(Silent, PlayerConfig::default());
//! let tracks = vec![
//!     Track::new("a", "First", "https://cdn.example.com/a.mp3"),
//!     Track::new("b", "Second", "https://cdn.example.com/b.mp3"),
//! ];
//!
//! player.play_queue(tracks, 0).unwrap();
//! player.set_loop_mode(LoopMode::Queue);
//!
//! // The output reports the end of the first track
//! player.handle_media_event(MediaEvent::ended(player.generation()));
//! assert_eq!(player.current_track().unwrap().title, "Second");
//!
//! // Queue loop wraps back to the start
//! player.next_track();
//! assert_eq!(player.current_index(), Some(0));
//! ```

mod controller;
mod error;
mod events;
mod history;
mod likes;
mod output;
mod queue;
mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use controller::PlayerController;
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use history::ListenTracker;
pub use likes::{LikeTicket, LikedSet};
pub use output::{MediaEvent, MediaEventKind, MediaOutput, PlayError, SourceGeneration};
pub use queue::{Advance, Queue};
pub use shuffle::{identity_order, pinned_permutation};
pub use types::{
    Direction, LoopMode, ModeFlags, PlaybackState, PlayerConfig, PlayerSnapshot,
    TrackLoopStrategy,
};
pub use volume::Volume;
