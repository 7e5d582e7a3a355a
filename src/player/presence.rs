pub const PLAYING_GLYPH: &str = "►";
pub const PAUSED_GLYPH: &str = "❙ ❙";
pub const IDLE_TEXT: &str = "nothing to play";

pub fn playing(title: &str) -> String {
    format!("{PLAYING_GLYPH} {title}")
}

pub fn paused(title: &str) -> String {
    format!("{PAUSED_GLYPH} {title}")
}
