use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("destination not found")]
    NotFound,

    #[error("destination not joinable")]
    NotJoinable,

    #[error("destination lookup failed: {0}")]
    Lookup(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("no playback destination configured")]
    Configuration,

    #[error("not permitted to join destination `{0}`")]
    Permission(String),

    #[error("destination `{0}` could not be resolved: {1}")]
    Lookup(String, JoinError),
}
