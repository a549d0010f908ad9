//! Queue manager
//!
//! Holds the tracks eligible for playback, a pointer into them, and the
//! optional shuffle permutation. Navigation always happens in *logical*
//! positions (indices into the playback order), while `current_index`
//! stays a raw queue index so toggling shuffle never moves playback.

use crate::shuffle::{identity_order, pinned_permutation};
use crate::types::{Direction, LoopMode, ModeFlags};
use rand::Rng;
use remix_core::Track;

/// Outcome of a transport step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to a neighbouring position in playback order
    Moved(usize),

    /// Wrapped around the ends of playback order (loop mode `Queue`)
    Wrapped(usize),

    /// Ran off the end of playback order with looping off
    EndOfQueue,

    /// Stepped back from the first position with looping off
    RestartCurrent,
}

impl Advance {
    /// Queue index the step lands on, if it changes track
    pub fn target(self) -> Option<usize> {
        match self {
            Advance::Moved(index) | Advance::Wrapped(index) => Some(index),
            Advance::EndOfQueue | Advance::RestartCurrent => None,
        }
    }
}

/// Playback queue
///
/// Structure:
/// ```text
/// tracks:       [A, B, C, D]      raw queue
/// permutation:  [2, 0, 3, 1]      visiting order while shuffled
/// current:      2 (C)             raw index, logical position 0
/// ```
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,

    /// Raw queue index of the current track
    current_index: usize,

    /// Shuffle order, generated once when shuffle is turned on
    permutation: Option<Vec<usize>>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale
    ///
    /// Discards any shuffle permutation; callers must re-enable shuffle.
    /// `start_index` is clamped into the new queue.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) {
        self.current_index = start_index.min(tracks.len().saturating_sub(1));
        self.tracks = tracks;
        self.permutation = None;
    }

    /// Drop every track
    pub fn clear(&mut self) {
        self.set_queue(Vec::new(), 0);
    }

    /// Generate a shuffle permutation with the current track pinned first
    pub fn enable_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.permutation = Some(pinned_permutation(
            self.tracks.len(),
            self.current_index,
            rng,
        ));
    }

    /// Discard the shuffle permutation
    pub fn disable_shuffle(&mut self) {
        self.permutation = None;
    }

    /// Current shuffle permutation, if one was generated
    pub fn permutation(&self) -> Option<&[usize]> {
        self.permutation.as_deref()
    }

    /// Playback order in effect
    ///
    /// The permutation is used only while shuffle is on *and* it still
    /// matches the queue length; anything else falls back to identity.
    pub fn compute_order(&self, shuffle: bool) -> Vec<usize> {
        match &self.permutation {
            Some(order) if shuffle && order.len() == self.tracks.len() => order.clone(),
            _ => identity_order(self.tracks.len()),
        }
    }

    /// Logical position of the current track within playback order
    pub fn logical_position(&self, shuffle: bool) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        self.compute_order(shuffle)
            .iter()
            .position(|&index| index == self.current_index)
    }

    /// Where a step in `direction` would land, without moving
    pub fn peek(&self, direction: Direction, flags: ModeFlags) -> Advance {
        let order = self.compute_order(flags.shuffle);
        if order.is_empty() {
            return match direction {
                Direction::Next => Advance::EndOfQueue,
                Direction::Previous => Advance::RestartCurrent,
            };
        }

        let last = order.len() - 1;
        let position = order
            .iter()
            .position(|&index| index == self.current_index)
            .unwrap_or(0);
        let wraps = flags.loop_mode == LoopMode::Queue;

        match direction {
            Direction::Next if position >= last => {
                if wraps {
                    Advance::Wrapped(order[0])
                } else {
                    Advance::EndOfQueue
                }
            }
            Direction::Next => Advance::Moved(order[position + 1]),
            Direction::Previous if position == 0 => {
                if wraps {
                    Advance::Wrapped(order[last])
                } else {
                    Advance::RestartCurrent
                }
            }
            Direction::Previous => Advance::Moved(order[position - 1]),
        }
    }

    /// Take one step in `direction`
    ///
    /// Moves `current_index` when the step lands on another track; end of
    /// order and restart leave it untouched.
    pub fn advance(&mut self, direction: Direction, flags: ModeFlags) -> Advance {
        let step = self.peek(direction, flags);
        if let Some(index) = step.target() {
            self.current_index = index;
        }
        step
    }

    /// Select an arbitrary queue index
    ///
    /// Returns false (and changes nothing) when out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current_index = index;
            true
        } else {
            false
        }
    }

    /// Raw queue index of the current track
    pub fn current_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }

    /// Current track
    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    /// Track at raw queue index
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in raw queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Total number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
