#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    // Not connected yet, or connected with nothing left to play
    Idle,
    Connecting,
    Playing,
    Paused,
    // Transient: waiting on the resolver for the next track
    Advancing,
}
