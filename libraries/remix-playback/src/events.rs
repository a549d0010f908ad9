//! Player Events
//!
//! Event-based communication for UI synchronization and side effects.
//! The controller queues events as it changes state; the host drains them
//! after every call and re-renders, and forwards `ListenRecorded` to the
//! history collaborator.

use crate::types::{LoopMode, PlaybackState};
use remix_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transport state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new source was loaded
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// Raw queue index of the new track
        index: usize,
    },

    /// Queue was replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle flag changed
    ShuffleChanged {
        /// Whether shuffle is now active
        enabled: bool,
    },

    /// Loop mode changed
    LoopModeChanged {
        /// The new loop mode
        mode: LoopMode,
    },

    /// Position or duration changed
    PositionChanged {
        /// Current position in seconds
        current_time: f64,
        /// Track duration in seconds (0 while unknown)
        duration: f64,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// A listen should be reported to the history collaborator
    ListenRecorded {
        /// Track that was listened to
        track_id: TrackId,
        /// Track duration in milliseconds
        duration_ms: u64,
    },
}

impl PlayerEvent {
    /// Whether this event asks for a remote side effect
    pub fn is_side_effect(&self) -> bool {
        matches!(self, PlayerEvent::ListenRecorded { .. })
    }
}
