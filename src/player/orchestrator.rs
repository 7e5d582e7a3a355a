use std::sync::Arc;

use flume::{Receiver, Sender};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::event::events::{PlayerEvent, StreamTicket};
use crate::player::config::PlayerConfig;
use crate::player::error::{InitError, JoinError};
use crate::player::presence;
use crate::player::queue::TrackQueue;
use crate::player::sources::SourceRegistry;
use crate::player::state::PlayerState;
use crate::player::track::{ResolvedTrack, TrackInfo, TrackRef};
use crate::player::traits::{ChannelProvider, PlaybackSink, PresenceReporter, RoomConnection};

struct CurrentTrack {
    info: TrackInfo,
    generation: u64,
}

pub struct Player {
    config: PlayerConfig,
    queue: TrackQueue,
    sources: SourceRegistry,
    channel: Arc<dyn ChannelProvider>,
    presence: Arc<dyn PresenceReporter>,
    event_tx: Sender<PlayerEvent>,
    event_rx: Receiver<PlayerEvent>,

    state: PlayerState,
    connection: Option<Arc<dyn RoomConnection>>,
    sink: Option<Arc<dyn PlaybackSink>>,
    current: Option<CurrentTrack>,
    listener_count: usize,
    paused_since: Option<Instant>,
    // Monotone tag on every stream; events carrying an older tag are stale
    generation: u64,
    consecutive_failures: u32,
}

#[derive(Clone)]
pub struct PlayerHandle {
    tx: Sender<PlayerEvent>,
}

impl PlayerHandle {
    pub fn skip(&self, reason: impl Into<String>) {
        let _ = self.tx.send(PlayerEvent::Skip {
            reason: reason.into(),
        });
    }

    pub fn membership_changed(&self) {
        let _ = self.tx.send(PlayerEvent::MembershipChanged);
    }

    pub fn enqueue(&self, reference: TrackRef) {
        let _ = self.tx.send(PlayerEvent::Enqueue(reference));
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(PlayerEvent::Shutdown);
    }
}

impl Player {
    pub fn new(
        config: PlayerConfig,
        sources: SourceRegistry,
        channel: Arc<dyn ChannelProvider>,
        presence: Arc<dyn PresenceReporter>,
    ) -> (Self, PlayerHandle) {
        let (event_tx, event_rx) = flume::unbounded();
        let queue = TrackQueue::new(config.shuffle);
        let player = Self {
            config,
            queue,
            sources,
            channel,
            presence,
            event_tx: event_tx.clone(),
            event_rx,
            state: PlayerState::Idle,
            connection: None,
            sink: None,
            current: None,
            listener_count: 0,
            paused_since: None,
            generation: 0,
            consecutive_failures: 0,
        };
        (player, PlayerHandle { tx: event_tx })
    }

    pub fn handle(&self) -> PlayerHandle {
        PlayerHandle {
            tx: self.event_tx.clone(),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn listener_count(&self) -> usize {
        self.listener_count
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.info.title.as_str())
    }

    pub fn queue_mut(&mut self) -> &mut TrackQueue {
        &mut self.queue
    }

    pub async fn initialize(&mut self) -> Result<(), InitError> {
        if self.config.destination.is_empty() {
            return Err(InitError::Configuration);
        }
        self.state = PlayerState::Connecting;

        let connection = match self.channel.join(&self.config.destination).await {
            Ok(connection) => connection,
            Err(err) => {
                self.state = PlayerState::Idle;
                return Err(match err {
                    JoinError::NotJoinable => {
                        InitError::Permission(self.config.destination.clone())
                    }
                    other => InitError::Lookup(self.config.destination.clone(), other),
                });
            }
        };

        self.sink = Some(connection.sink());
        self.listener_count = connection.member_count().saturating_sub(1);
        self.connection = Some(connection);

        info!(
            destination = self.config.destination.as_str(),
            listeners = self.listener_count,
            "player_connected"
        );
        self.presence.update(presence::IDLE_TEXT);
        self.advance();
        Ok(())
    }

    pub async fn run(mut self) {
        while let Ok(event) = self.event_rx.recv_async().await {
            if !self.handle_event(event) {
                break;
            }
        }
    }

    fn handle_event(&mut self, event: PlayerEvent) -> bool {
        match event {
            PlayerEvent::SinkStarted { generation } => self.on_started(generation),
            PlayerEvent::SinkFinished { generation } => self.on_finished(generation),
            PlayerEvent::SinkErrored {
                generation,
                message,
            } => self.on_errored(generation, &message),
            PlayerEvent::Resolved {
                generation,
                outcome,
            } => self.on_resolved(generation, outcome),
            PlayerEvent::MembershipChanged => self.recompute_listeners(),
            PlayerEvent::Skip { reason } => self.skip(&reason),
            PlayerEvent::Enqueue(reference) => self.on_enqueue(reference),
            PlayerEvent::RetryAdvance { generation } => {
                if !self.is_stale(generation) {
                    self.consecutive_failures = 0;
                    self.advance();
                }
            }
            PlayerEvent::Shutdown => {
                self.teardown();
                return false;
            }
        }
        true
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation != self.generation
    }

    // Dequeue the next reference and kick off its resolution. The resolver
    // may block on the network indefinitely, so it runs on its own task and
    // posts a Resolved event back; membership changes keep flowing meanwhile.
    fn advance(&mut self) {
        self.destroy_current();
        self.generation += 1;

        let Some(reference) = self.queue.next() else {
            self.state = PlayerState::Idle;
            info!("queue_empty_waiting");
            self.presence.update(presence::IDLE_TEXT);
            return;
        };

        self.state = PlayerState::Advancing;
        let Some(source) = self.sources.get(&reference) else {
            warn!(
                reference = reference.as_str(),
                scheme = reference.scheme(),
                "no_source_for_reference"
            );
            self.record_failure();
            return;
        };

        let generation = self.generation;
        let event_tx = self.event_tx.clone();
        debug!(reference = reference.as_str(), generation, "resolving_track");
        tokio::spawn(async move {
            let outcome = source.resolve(&reference).await;
            let _ = event_tx.send(PlayerEvent::Resolved {
                generation,
                outcome,
            });
        });
    }

    fn on_resolved(&mut self, generation: u64, outcome: Option<ResolvedTrack>) {
        if self.is_stale(generation) {
            debug!(generation, current = self.generation, "stale_resolution_discarded");
            return;
        }
        match outcome {
            Some(resolved) => self.install(resolved, generation),
            None => {
                debug!(generation, "track_resolved_to_no_stream");
                self.record_failure();
            }
        }
    }

    fn install(&mut self, resolved: ResolvedTrack, generation: u64) {
        let ResolvedTrack { stream, info } = resolved;
        let Some(sink) = self.sink.clone() else {
            warn!("resolved_track_with_no_sink");
            return;
        };
        info!(
            title = info.title.as_str(),
            source = info.source.as_str(),
            generation,
            "track_installed"
        );
        self.current = Some(CurrentTrack { info, generation });
        self.state = PlayerState::Playing;
        sink.play(stream, StreamTicket::new(generation, self.event_tx.clone()));
    }

    fn on_started(&mut self, generation: u64) {
        if self.is_stale(generation) {
            debug!(generation, "stale_start_ignored");
            return;
        }
        self.consecutive_failures = 0;
        let title = match &self.current {
            Some(current) => current.info.title.clone(),
            None => return,
        };
        info!(title = title.as_str(), "playback_started");
        if self.listener_count == 0 && self.config.pause_on_empty {
            self.pause();
        } else {
            self.presence.update(&presence::playing(&title));
        }
    }

    fn on_finished(&mut self, generation: u64) {
        if self.is_stale(generation) {
            debug!(generation, "stale_finish_ignored");
            return;
        }
        if let Some(current) = &self.current {
            info!(title = current.info.title.as_str(), "playback_finished");
        }
        self.advance();
    }

    // Sink errors are never fatal: log and move on to the next track
    fn on_errored(&mut self, generation: u64, message: &str) {
        if self.is_stale(generation) {
            debug!(generation, "stale_error_ignored");
            return;
        }
        warn!(error = message, "sink_error");
        self.record_failure();
    }

    fn record_failure(&mut self) {
        self.consecutive_failures += 1;
        if self.consecutive_failures >= self.config.max_advance_failures {
            let cooldown = self.config.advance_cooldown;
            warn!(
                failures = self.consecutive_failures,
                cooldown_secs = cooldown.as_secs(),
                "advance_cooldown_armed"
            );
            let event_tx = self.event_tx.clone();
            let generation = self.generation;
            tokio::spawn(async move {
                tokio::time::sleep(cooldown).await;
                let _ = event_tx.send(PlayerEvent::RetryAdvance { generation });
            });
        } else {
            self.advance();
        }
    }

    // Count = live members minus the player's own joined identity. Always
    // recomputed from the connection, never adjusted incrementally.
    fn recompute_listeners(&mut self) {
        let Some(connection) = &self.connection else {
            return;
        };
        let members = connection.member_count();
        self.listener_count = members.saturating_sub(1);
        debug!(
            members,
            listeners = self.listener_count,
            "listeners_recomputed"
        );
        if self.listener_count == 0 {
            if self.config.pause_on_empty {
                self.pause();
            }
        } else {
            self.resume();
        }
    }

    fn pause(&mut self) {
        if self.paused_since.is_some() {
            return;
        }
        let Some(current) = &self.current else {
            return;
        };
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        self.paused_since = Some(Instant::now());
        self.state = PlayerState::Paused;
        info!(title = current.info.title.as_str(), "playback_paused");
        self.presence.update(&presence::paused(&current.info.title));
    }

    fn resume(&mut self) {
        let Some(since) = self.paused_since else {
            return;
        };
        if since.elapsed() > self.config.stream_max_age {
            self.paused_since = None;
            info!(
                paused_secs = since.elapsed().as_secs(),
                "paused_stream_stale"
            );
            self.skip("stream went stale while paused");
            return;
        }
        let Some(current) = &self.current else {
            self.paused_since = None;
            return;
        };
        if let Some(sink) = &self.sink {
            sink.resume();
        }
        self.paused_since = None;
        self.state = PlayerState::Playing;
        info!(title = current.info.title.as_str(), "playback_resumed");
        self.presence.update(&presence::playing(&current.info.title));
    }

    fn skip(&mut self, reason: &str) {
        if let Some(current) = &self.current {
            info!(
                title = current.info.title.as_str(),
                reason, "playback_skipped"
            );
        } else {
            debug!(reason, "skip_with_no_current_track");
        }
        self.paused_since = None;
        self.advance();
    }

    fn destroy_current(&mut self) {
        if let Some(current) = self.current.take() {
            debug!(
                title = current.info.title.as_str(),
                generation = current.generation,
                "stream_destroyed"
            );
            if let Some(sink) = &self.sink {
                sink.destroy();
            }
            // The pause clock belongs to the destroyed stream; the policy
            // re-evaluates once the replacement starts
            self.paused_since = None;
        }
    }

    fn on_enqueue(&mut self, reference: TrackRef) {
        debug!(reference = reference.as_str(), "track_enqueued");
        self.queue.enqueue(reference);
        if self.state == PlayerState::Idle && self.connection.is_some() {
            self.advance();
        }
    }

    fn teardown(&mut self) {
        self.destroy_current();
        self.presence.update(presence::IDLE_TEXT);
        self.state = PlayerState::Idle;
        self.paused_since = None;
        info!("player_shutdown");
    }
}
