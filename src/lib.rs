pub mod event;
pub mod player;

pub use event::events::{PlayerEvent, StreamTicket};
pub use player::config::PlayerConfig;
pub use player::error::{InitError, JoinError};
pub use player::orchestrator::{Player, PlayerHandle};
pub use player::queue::TrackQueue;
pub use player::sources::SourceRegistry;
pub use player::state::PlayerState;
pub use player::track::{ResolvedTrack, StreamHandle, TrackInfo, TrackRef};
pub use player::traits::{
    ChannelProvider, PlaybackSink, PresenceReporter, RoomConnection, TrackSource,
};
