use std::sync::Arc;

use async_trait::async_trait;

use crate::event::events::StreamTicket;
use crate::player::error::JoinError;
use crate::player::track::{ResolvedTrack, StreamHandle, TrackRef};

#[async_trait]
pub trait ChannelProvider: Send + Sync {
    async fn join(&self, destination: &str) -> Result<Arc<dyn RoomConnection>, JoinError>;
}

pub trait RoomConnection: Send + Sync {
    // Live membership of the destination, the player itself included
    fn member_count(&self) -> usize;

    fn sink(&self) -> Arc<dyn PlaybackSink>;
}

pub trait PlaybackSink: Send + Sync {
    fn play(&self, stream: StreamHandle, ticket: StreamTicket);

    // Pause and resume are no-ops when already in that state
    fn pause(&self);
    fn resume(&self);

    // Release the attached stream and any open handles behind it
    fn destroy(&self);
}

#[async_trait]
pub trait TrackSource: Send + Sync {
    // None is the "no stream" signal, not an error
    async fn resolve(&self, reference: &TrackRef) -> Option<ResolvedTrack>;
}

// Fire-and-forget status display; must not block the caller
pub trait PresenceReporter: Send + Sync {
    fn update(&self, text: &str);
}
