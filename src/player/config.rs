use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub destination: String,
    pub pause_on_empty: bool,
    pub shuffle: bool,
    pub stream_max_age: Duration,
    pub max_advance_failures: u32,
    pub advance_cooldown: Duration,
    // Opaque, handed to the host when it constructs track sources
    pub credentials: HashMap<String, String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            destination: String::new(),
            pause_on_empty: true,
            shuffle: false,
            stream_max_age: Duration::from_secs(2 * 60 * 60),
            max_advance_failures: 5,
            advance_cooldown: Duration::from_secs(30),
            credentials: HashMap::new(),
        }
    }
}
