//! Platform-agnostic media output
//!
//! Abstracts the single audio element the player drives (an HTML `<audio>`
//! element in a browser host, a decoder/sink pair elsewhere) and the events
//! it reports back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag for one source load
///
/// Bumped every time the controller swaps the output's source. Events from
/// an older source carry an older generation and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SourceGeneration(u64);

impl SourceGeneration {
    /// Generation after this one
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Raw counter value
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SourceGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a play request was refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayError {
    /// The request was aborted, usually because the source changed
    Aborted,

    /// The request was interrupted by a later load or pause
    Interrupted(String),

    /// Anything else (autoplay policy, decode failure, ...)
    Failed(String),
}

impl PlayError {
    /// Classify a rejection from its error name and message
    pub fn classify(name: &str, message: &str) -> Self {
        if name == "AbortError" {
            PlayError::Aborted
        } else if message.to_ascii_lowercase().contains("interrupted") {
            PlayError::Interrupted(message.to_string())
        } else {
            PlayError::Failed(format!("{name}: {message}"))
        }
    }

    /// Expected races from swapping sources mid-request
    pub fn is_benign(&self) -> bool {
        match self {
            PlayError::Aborted | PlayError::Interrupted(_) => true,
            PlayError::Failed(message) => message.to_ascii_lowercase().contains("interrupted"),
        }
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::Aborted => write!(f, "play request aborted"),
            PlayError::Interrupted(message) | PlayError::Failed(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for PlayError {}

/// The one audio output the player owns
///
/// All methods are best effort; the controller never relies on them
/// failing loudly. Only `play` reports refusal because hosts commonly
/// reject it (autoplay policies, aborted loads).
pub trait MediaOutput: Send {
    /// Swap the source; the host starts loading immediately
    fn set_source(&mut self, url: &str, generation: SourceGeneration);

    /// Start or resume playback of the current source
    fn play(&mut self) -> Result<(), PlayError>;

    /// Pause playback
    fn pause(&mut self);

    /// Write the playback position in seconds
    fn set_current_time(&mut self, seconds: f64);

    /// Set the output's native single-track loop attribute
    fn set_native_loop(&mut self, enabled: bool);

    /// Set linear output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32);

    /// Attach the spectrum analyser graph
    ///
    /// Called at most once per controller; media APIs refuse a second
    /// source node on the same element.
    fn connect_analyser(&mut self) {}
}

/// What the output reported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MediaEventKind {
    /// Duration became known (seconds)
    LoadedMetadata {
        /// Media duration in seconds
        duration: f64,
    },

    /// Periodic position tick (seconds); spacing is not guaranteed
    TimeUpdate {
        /// Playback position in seconds
        current_time: f64,
    },

    /// Reached the end of the source (never fires while native loop is on)
    Ended,

    /// A play request was rejected after the fact
    PlayRejected(PlayError),
}

/// Event from the media output, tagged with the source it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEvent {
    pub generation: SourceGeneration,
    pub kind: MediaEventKind,
}

impl MediaEvent {
    pub fn new(generation: SourceGeneration, kind: MediaEventKind) -> Self {
        Self { generation, kind }
    }

    pub fn loaded_metadata(generation: SourceGeneration, duration: f64) -> Self {
        Self::new(generation, MediaEventKind::LoadedMetadata { duration })
    }

    pub fn time_update(generation: SourceGeneration, current_time: f64) -> Self {
        Self::new(generation, MediaEventKind::TimeUpdate { current_time })
    }

    pub fn ended(generation: SourceGeneration) -> Self {
        Self::new(generation, MediaEventKind::Ended)
    }
}

/// Output double for unit tests
///
/// Records every call so tests can assert on the exact command stream.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingOutput {
    pub calls: Vec<OutputCall>,
    pub reject_next_play: Option<PlayError>,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OutputCall {
    SetSource(String, SourceGeneration),
    Play,
    Pause,
    SetCurrentTime(f64),
    SetNativeLoop(bool),
    SetVolume(f32),
    ConnectAnalyser,
}

#[cfg(test)]
impl RecordingOutput {
    pub fn count(&self, call: &OutputCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn last_source(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            OutputCall::SetSource(url, _) => Some(url.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
impl MediaOutput for RecordingOutput {
    fn set_source(&mut self, url: &str, generation: SourceGeneration) {
        self.calls
            .push(OutputCall::SetSource(url.to_string(), generation));
    }

    fn play(&mut self) -> Result<(), PlayError> {
        self.calls.push(OutputCall::Play);
        match self.reject_next_play.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn pause(&mut self) {
        self.calls.push(OutputCall::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.calls.push(OutputCall::SetCurrentTime(seconds));
    }

    fn set_native_loop(&mut self, enabled: bool) {
        self.calls.push(OutputCall::SetNativeLoop(enabled));
    }

    fn set_volume(&mut self, gain: f32) {
        self.calls.push(OutputCall::SetVolume(gain));
    }

    fn connect_analyser(&mut self) {
        self.calls.push(OutputCall::ConnectAnalyser);
    }
}
