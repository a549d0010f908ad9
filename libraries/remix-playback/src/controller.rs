//! Player controller - transport orchestration
//!
//! Coordinates queue, mode flags, listen tracking, volume, and the single
//! media output. Every public method is synchronous and infallible from
//! the UI's point of view; side-channel failures are logged, never raised.

use crate::{
    error::{PlaybackError, Result},
    events::PlayerEvent,
    history::ListenTracker,
    output::{MediaEvent, MediaEventKind, MediaOutput, PlayError, SourceGeneration},
    queue::{Advance, Queue},
    types::{
        Direction, LoopMode, ModeFlags, PlaybackState, PlayerConfig, PlayerSnapshot,
        TrackLoopStrategy,
    },
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use remix_core::{ListenRecord, Track};
use tracing::{debug, warn};

/// Central transport controller
///
/// Owns the one media output for its lifetime. Construct one per player;
/// there is no global instance, so independent controllers (for example in
/// parallel tests) never interfere.
pub struct PlayerController<O: MediaOutput> {
    output: O,
    config: PlayerConfig,

    // Transport
    state: PlaybackState,
    queue: Queue,
    flags: ModeFlags,
    generation: SourceGeneration,

    // Mirrored from the output
    current_time: f64,
    duration: f64,

    volume: Volume,
    listens: ListenTracker,
    analyser_connected: bool,
    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl<O: MediaOutput> PlayerController<O> {
    /// Create a controller driving `output`
    pub fn new(output: O, config: PlayerConfig) -> Self {
        Self::with_rng(output, config, StdRng::from_entropy())
    }

    /// Create a controller with a deterministic shuffle seed
    pub fn with_seed(output: O, config: PlayerConfig, seed: u64) -> Self {
        Self::with_rng(output, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(output: O, config: PlayerConfig, rng: StdRng) -> Self {
        let mut controller = Self {
            output,
            state: PlaybackState::Stopped,
            queue: Queue::new(),
            flags: ModeFlags {
                shuffle: false,
                loop_mode: config.loop_mode,
            },
            generation: SourceGeneration::default(),
            current_time: 0.0,
            duration: 0.0,
            volume: Volume::new(config.volume),
            listens: ListenTracker::new(config.loop_end_window_secs, config.loop_start_window_secs),
            analyser_connected: false,
            rng,
            pending_events: Vec::new(),
            config,
        };

        controller.sync_native_loop();
        let gain = controller.volume.gain();
        controller.output.set_volume(gain);
        controller
    }

    // ===== Playback Control =====

    /// Play a single track, replacing the queue
    pub fn play(&mut self, track: Track) {
        self.load_queue(vec![track], 0);
    }

    /// Play `tracks` starting at `index`, replacing the queue
    ///
    /// Shuffle is always off afterwards.
    pub fn play_queue(&mut self, tracks: Vec<Track>, index: usize) -> Result<()> {
        if tracks.is_empty() {
            return Err(PlaybackError::QueueEmpty);
        }
        if index >= tracks.len() {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: tracks.len(),
            });
        }
        self.load_queue(tracks, index);
        Ok(())
    }

    fn load_queue(&mut self, tracks: Vec<Track>, index: usize) {
        self.queue.set_queue(tracks, index);
        if self.flags.shuffle {
            self.flags.shuffle = false;
            self.emit(PlayerEvent::ShuffleChanged { enabled: false });
        }
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });

        self.set_state(PlaybackState::Playing);
        self.load_current();
    }

    /// Flip between playing and paused
    pub fn toggle_play(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.output.pause();
            self.set_state(PlaybackState::Paused);
        }
    }

    /// Resume (or restart after the end of the queue)
    pub fn resume(&mut self) {
        if self.state == PlaybackState::Playing || self.queue.current().is_none() {
            return;
        }
        self.set_state(PlaybackState::Playing);
        self.start_output();
    }

    /// Skip to the next track in playback order
    pub fn next_track(&mut self) {
        self.step(Direction::Next);
    }

    /// Go to the previous track
    ///
    /// Past the restart threshold (3s by default) this restarts the current
    /// track instead of moving back.
    pub fn prev_track(&mut self) {
        if self.queue.is_empty() {
            return;
        }
        if self.current_time > self.config.restart_threshold_secs {
            self.restart_current();
            return;
        }
        self.step(Direction::Previous);
    }

    /// Jump to a raw queue index
    pub fn skip_to(&mut self, index: usize) -> Result<()> {
        if !self.queue.jump_to(index) {
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.queue.len(),
            });
        }
        self.set_state(PlaybackState::Playing);
        self.load_current();
        Ok(())
    }

    fn step(&mut self, direction: Direction) {
        if self.queue.is_empty() {
            return;
        }

        match self.queue.advance(direction, self.flags) {
            Advance::Moved(_) | Advance::Wrapped(_) => {
                self.set_state(PlaybackState::Playing);
                self.load_current();
            }
            Advance::EndOfQueue => self.park_at_end(),
            Advance::RestartCurrent => self.restart_current(),
        }
    }

    /// End of playback order with looping off: stay on the last track,
    /// paused at 0
    fn park_at_end(&mut self) {
        debug!("Reached end of queue");
        if self.state == PlaybackState::Playing {
            self.output.pause();
        }
        self.set_state(PlaybackState::Paused);
        self.write_position(0.0);
    }

    fn restart_current(&mut self) {
        self.write_position(0.0);
    }

    /// Swap the output to the current queue track
    ///
    /// Bookkeeping for the new load is replaced before the source changes,
    /// so nothing from the previous source can be attributed to it.
    fn load_current(&mut self) {
        let Some(track) = self.queue.current() else {
            return;
        };
        let track_id = track.id.clone();
        let url = track.audio_url.clone();
        let index = self.queue.current_index().unwrap_or(0);

        self.generation = self.generation.next();
        self.current_time = 0.0;
        self.duration = 0.0;
        self.listens.reset();

        debug!(track_id = %track_id, generation = %self.generation, "Loading track");
        self.output.set_source(&url, self.generation);
        self.emit(PlayerEvent::TrackChanged { track_id, index });
        self.emit_position();

        if self.state == PlaybackState::Playing {
            self.start_output();
        }
    }

    fn start_output(&mut self) {
        if !self.analyser_connected {
            self.output.connect_analyser();
            self.analyser_connected = true;
        }
        if let Err(err) = self.output.play() {
            self.handle_play_error(&err);
        }
    }

    fn handle_play_error(&self, err: &PlayError) {
        if err.is_benign() {
            debug!(error = %err, "Play request superseded");
        } else {
            warn!(error = %err, generation = %self.generation, "Playback failed to start");
        }
    }

    // ===== Seek =====

    /// Seek to `seconds`, written through to the output immediately
    pub fn seek(&mut self, seconds: f64) {
        if self.queue.current().is_none() {
            return;
        }
        if !seconds.is_finite() {
            warn!(seconds, "Ignoring non-finite seek");
            return;
        }
        let mut target = seconds.max(0.0);
        if self.duration > 0.0 {
            target = target.min(self.duration);
        }
        self.write_position(target);
    }

    /// Seek to a fraction of the known duration
    pub fn seek_percent(&mut self, fraction: f64) {
        if self.duration > 0.0 && fraction.is_finite() {
            self.seek(self.duration * fraction.clamp(0.0, 1.0));
        }
    }

    fn write_position(&mut self, seconds: f64) {
        self.output.set_current_time(seconds);
        self.current_time = seconds;
        self.emit_position();
    }

    // ===== Shuffle & Loop =====

    /// Turn shuffle on or off
    pub fn toggle_shuffle(&mut self) {
        self.set_shuffle(!self.flags.shuffle);
    }

    /// Set shuffle explicitly
    ///
    /// Turning it on pins the current track first in a fresh permutation;
    /// turning it off never moves playback.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if self.flags.shuffle == enabled {
            return;
        }
        if enabled {
            self.queue.enable_shuffle(&mut self.rng);
        } else {
            self.queue.disable_shuffle();
        }
        self.flags.shuffle = enabled;
        self.emit(PlayerEvent::ShuffleChanged { enabled });
    }

    /// Advance the loop mode one step: off → queue → track → off
    pub fn cycle_loop_mode(&mut self) {
        self.set_loop_mode(self.flags.loop_mode.next());
    }

    /// Set loop mode explicitly
    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        if self.flags.loop_mode == mode {
            return;
        }
        self.flags.loop_mode = mode;
        self.listens.forget_sample();
        self.sync_native_loop();
        self.emit(PlayerEvent::LoopModeChanged { mode });
    }

    fn sync_native_loop(&mut self) {
        let native = match self.config.track_loop {
            TrackLoopStrategy::Controller => false,
            TrackLoopStrategy::Native => self.flags.loop_mode == LoopMode::Track,
        };
        self.output.set_native_loop(native);
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Mute audio
    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    /// Unmute audio
    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        self.output.set_volume(self.volume.gain());
        self.emit(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Media Events =====

    /// React to an event from the media output
    ///
    /// Events tagged with an older source generation are dropped.
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if event.generation != self.generation {
            debug!(
                event_generation = %event.generation,
                current_generation = %self.generation,
                "Dropping media event from previous source"
            );
            return;
        }

        match event.kind {
            MediaEventKind::LoadedMetadata { duration } => self.on_loaded_metadata(duration),
            MediaEventKind::TimeUpdate { current_time } => self.on_time_update(current_time),
            MediaEventKind::Ended => self.on_ended(),
            MediaEventKind::PlayRejected(err) => self.handle_play_error(&err),
        }
    }

    fn on_loaded_metadata(&mut self, duration: f64) {
        if !(duration.is_finite() && duration > 0.0) {
            return;
        }
        self.duration = duration;
        self.emit_position();

        let Some(track_id) = self.queue.current().map(|t| t.id.clone()) else {
            return;
        };
        if let Some(record) = self.listens.on_duration(&track_id, duration) {
            self.emit_listen(record);
        }
    }

    fn on_time_update(&mut self, current_time: f64) {
        if !current_time.is_finite() {
            return;
        }

        if self.config.track_loop == TrackLoopStrategy::Native
            && self.flags.loop_mode == LoopMode::Track
        {
            if let Some(track_id) = self.queue.current().map(|t| t.id.clone()) {
                if let Some(record) =
                    self.listens
                        .on_time_update(&track_id, current_time, self.duration)
                {
                    self.emit_listen(record);
                }
            }
        }

        self.current_time = current_time;
        self.emit_position();
    }

    fn on_ended(&mut self) {
        if self.flags.loop_mode != LoopMode::Track {
            self.step(Direction::Next);
            return;
        }

        // Single-track loop handled here rather than by the output
        self.write_position(0.0);
        if self.state == PlaybackState::Playing {
            self.start_output();
        }
        if let Some(track_id) = self.queue.current().map(|t| t.id.clone()) {
            if let Some(record) = self.listens.on_loop_restart(&track_id, self.duration) {
                self.emit_listen(record);
            }
        }
    }

    // ===== State Queries =====

    /// Get current transport state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Whether the transport is playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Raw queue index of the current track
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Queue in raw order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Playback order in effect (raw indices)
    pub fn playback_order(&self) -> Vec<usize> {
        self.queue.compute_order(self.flags.shuffle)
    }

    /// Current mode flags
    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    pub fn is_shuffle(&self) -> bool {
        self.flags.shuffle
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.flags.loop_mode
    }

    /// Position in seconds
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Duration in seconds (0 while unknown)
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Generation of the source currently loaded
    pub fn generation(&self) -> SourceGeneration {
        self.generation
    }

    /// Whether "next" would land on another track
    pub fn has_next(&self) -> bool {
        self.queue.peek(Direction::Next, self.flags).target().is_some()
    }

    /// Whether "previous" would land on another track
    pub fn has_previous(&self) -> bool {
        self.current_time <= self.config.restart_threshold_secs
            && self
                .queue
                .peek(Direction::Previous, self.flags)
                .target()
                .is_some()
    }

    /// Borrow the media output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutably borrow the media output
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Serializable view for the UI
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            track: self.queue.current().cloned(),
            current_index: self.queue.current_index(),
            queue_length: self.queue.len(),
            state: self.state,
            current_time: self.current_time,
            duration: self.duration,
            shuffle: self.flags.shuffle,
            loop_mode: self.flags.loop_mode,
            volume: self.volume.level(),
            muted: self.volume.is_muted(),
        }
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            self.state = state;
            self.emit(PlayerEvent::StateChanged { state });
        }
    }

    fn emit_position(&mut self) {
        self.emit(PlayerEvent::PositionChanged {
            current_time: self.current_time,
            duration: self.duration,
        });
    }

    fn emit_listen(&mut self, record: ListenRecord) {
        debug!(track_id = %record.track_id, duration_ms = record.duration_ms, "Listen recorded");
        self.emit(PlayerEvent::ListenRecorded {
            track_id: record.track_id,
            duration_ms: record.duration_ms,
        });
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }
}
