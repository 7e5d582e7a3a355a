pub mod config;
pub mod error;
pub mod orchestrator;
pub mod presence;
pub mod queue;
pub mod sources;
pub mod state;
pub mod track;
pub mod traits;
