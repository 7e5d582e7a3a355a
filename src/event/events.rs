use std::fmt;

use flume::Sender;

use crate::player::track::{ResolvedTrack, TrackRef};

#[derive(Debug)]
pub enum PlayerEvent {
    // Sink lifecycle, tagged with the generation of the stream it refers to
    SinkStarted { generation: u64 },
    SinkFinished { generation: u64 },
    SinkErrored { generation: u64, message: String },

    // Resolver completion for an advance attempt
    Resolved {
        generation: u64,
        outcome: Option<ResolvedTrack>,
    },

    // External inputs
    MembershipChanged,
    Skip { reason: String },
    Enqueue(TrackRef),
    Shutdown,

    // Internal: fired when the failure cooldown elapses; stale if the
    // generation moved on in the meantime
    RetryAdvance { generation: u64 },
}

#[derive(Clone)]
pub struct StreamTicket {
    generation: u64,
    events: Sender<PlayerEvent>,
}

impl fmt::Debug for StreamTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamTicket")
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl StreamTicket {
    pub(crate) fn new(generation: u64, events: Sender<PlayerEvent>) -> Self {
        Self { generation, events }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn started(&self) {
        let _ = self.events.send(PlayerEvent::SinkStarted {
            generation: self.generation,
        });
    }

    pub fn finished(&self) {
        let _ = self.events.send(PlayerEvent::SinkFinished {
            generation: self.generation,
        });
    }

    pub fn errored(&self, message: impl Into<String>) {
        let _ = self.events.send(PlayerEvent::SinkErrored {
            generation: self.generation,
            message: message.into(),
        });
    }
}
