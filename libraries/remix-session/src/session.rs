//! Player session
//!
//! Owns one [`PlayerController`] and one [`LikedSet`] and turns their side
//! effects into fire-and-forget calls on the remote services. All state is
//! mutated on the task that owns the session; background tasks only talk
//! to the network and report like answers back over a channel.

use crate::services::Services;
use remix_core::{ListenRecord, Track, TrackId};
use remix_playback::{
    LikeTicket, LikedSet, MediaEvent, MediaOutput, PlayerConfig, PlayerController, PlayerEvent,
    PlayerSnapshot,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Server answer to a like toggle, delivered back to the session
#[derive(Debug)]
struct LikeResolution {
    ticket: LikeTicket,
    result: remix_core::Result<bool>,
}

/// Async front end for a player
///
/// Methods that touch the network in the background spawn tokio tasks, so
/// they must be called from within a tokio runtime.
pub struct PlayerSession<O: MediaOutput> {
    controller: PlayerController<O>,
    likes: LikedSet,
    services: Services,

    resolutions_tx: mpsc::UnboundedSender<LikeResolution>,
    resolutions_rx: mpsc::UnboundedReceiver<LikeResolution>,

    // In-flight history and like requests
    writes: Vec<JoinHandle<()>>,

    // UI events flushed from the controller
    events: Vec<PlayerEvent>,
}

impl<O: MediaOutput> PlayerSession<O> {
    pub fn new(output: O, config: PlayerConfig, services: Services) -> Self {
        Self::with_controller(PlayerController::new(output, config), services)
    }

    /// Wrap an existing controller (e.g. one built with a fixed seed)
    pub fn with_controller(controller: PlayerController<O>, services: Services) -> Self {
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            likes: LikedSet::new(),
            services,
            resolutions_tx,
            resolutions_rx,
            writes: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Load the liked set from the server
    ///
    /// Failure leaves the set as it was.
    pub async fn mount(&mut self) {
        match self.services.likes.fetch_likes().await {
            Ok(ids) => {
                self.likes.replace_all(ids);
                info!(likes = self.likes.len(), "Loaded liked tracks");
            }
            Err(e) => warn!(error = %e, "Failed to load liked tracks"),
        }
    }

    /// Fetch the remix catalog
    pub async fn load_catalog(&self) -> remix_core::Result<Vec<Track>> {
        let tracks = self.services.catalog.fetch_tracks().await?;
        info!(tracks = tracks.len(), "Loaded catalog");
        Ok(tracks)
    }

    // ===== Transport =====

    pub fn play(&mut self, track: Track) {
        self.controller.play(track);
        self.flush();
    }

    pub fn play_queue(&mut self, tracks: Vec<Track>, index: usize) -> remix_playback::Result<()> {
        let result = self.controller.play_queue(tracks, index);
        self.flush();
        result
    }

    pub fn toggle_play(&mut self) {
        self.controller.toggle_play();
        self.flush();
    }

    pub fn pause(&mut self) {
        self.controller.pause();
        self.flush();
    }

    pub fn resume(&mut self) {
        self.controller.resume();
        self.flush();
    }

    pub fn next_track(&mut self) {
        self.controller.next_track();
        self.flush();
    }

    pub fn prev_track(&mut self) {
        self.controller.prev_track();
        self.flush();
    }

    pub fn skip_to(&mut self, index: usize) -> remix_playback::Result<()> {
        let result = self.controller.skip_to(index);
        self.flush();
        result
    }

    pub fn seek(&mut self, seconds: f64) {
        self.controller.seek(seconds);
        self.flush();
    }

    pub fn seek_percent(&mut self, fraction: f64) {
        self.controller.seek_percent(fraction);
        self.flush();
    }

    pub fn toggle_shuffle(&mut self) {
        self.controller.toggle_shuffle();
        self.flush();
    }

    pub fn cycle_loop_mode(&mut self) {
        self.controller.cycle_loop_mode();
        self.flush();
    }

    pub fn set_volume(&mut self, level: u8) {
        self.controller.set_volume(level);
        self.flush();
    }

    pub fn toggle_mute(&mut self) {
        self.controller.toggle_mute();
        self.flush();
    }

    /// Forward a media element event to the controller
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        self.controller.handle_media_event(event);
        self.flush();
    }

    fn flush(&mut self) {
        self.writes.retain(|handle| !handle.is_finished());

        for event in self.controller.drain_events() {
            if let PlayerEvent::ListenRecorded {
                track_id,
                duration_ms,
            } = &event
            {
                self.spawn_history(ListenRecord::new(track_id.clone(), *duration_ms));
            }
            self.events.push(event);
        }
    }

    fn spawn_history(&mut self, record: ListenRecord) {
        let history = Arc::clone(&self.services.history);
        self.writes.push(tokio::spawn(async move {
            if let Err(e) = history.record_listen(&record).await {
                warn!(track_id = %record.track_id, error = %e, "Failed to record listen");
            }
        }));
    }

    // ===== Likes =====

    /// Flip the like on `track_id` and tell the server
    ///
    /// Returns the optimistic state. The server's answer is applied later by
    /// [`process_pending`](Self::process_pending) or
    /// [`next_message`](Self::next_message).
    pub fn toggle_like(&mut self, track_id: &TrackId) -> bool {
        self.writes.retain(|handle| !handle.is_finished());

        let ticket = self.likes.toggle(track_id);
        let liked = ticket.liked;

        let likes = Arc::clone(&self.services.likes);
        let tx = self.resolutions_tx.clone();
        self.writes.push(tokio::spawn(async move {
            let result = likes.toggle_like(&ticket.track_id).await;
            if tx.send(LikeResolution { ticket, result }).is_err() {
                debug!("Session dropped before like answer arrived");
            }
        }));

        liked
    }

    pub fn is_liked(&self, track_id: &TrackId) -> bool {
        self.likes.contains(track_id)
    }

    pub fn liked(&self) -> &LikedSet {
        &self.likes
    }

    /// Apply every like answer that has already arrived
    ///
    /// Returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(resolution) = self.resolutions_rx.try_recv() {
            self.apply_like(resolution);
            applied += 1;
        }
        applied
    }

    /// Wait for the next like answer and apply it
    pub async fn next_message(&mut self) {
        if let Some(resolution) = self.resolutions_rx.recv().await {
            self.apply_like(resolution);
        }
    }

    fn apply_like(&mut self, resolution: LikeResolution) {
        let LikeResolution { ticket, result } = resolution;
        match result {
            Ok(liked) => {
                if !self.likes.reconcile(&ticket, liked) {
                    debug!(
                        track_id = %ticket.track_id,
                        version = ticket.version,
                        "Ignoring superseded like answer"
                    );
                } else if liked != ticket.liked {
                    info!(track_id = %ticket.track_id, liked, "Server disagreed with like toggle");
                }
            }
            Err(e) => warn!(track_id = %ticket.track_id, error = %e, "Failed to toggle like"),
        }
    }

    /// Wait for all in-flight requests, then apply their like answers
    pub async fn settle(&mut self) {
        for handle in std::mem::take(&mut self.writes) {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background request task failed");
            }
        }
        self.process_pending();
    }

    // ===== State =====

    pub fn controller(&self) -> &PlayerController<O> {
        &self.controller
    }

    /// Mutably borrow the media output
    pub fn output_mut(&mut self) -> &mut O {
        self.controller.output_mut()
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.controller.snapshot()
    }

    /// Drain UI events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }
}
