//! Spoken wage announcements through an external TTS command.
//!
//! The dashboard only constructs the announcement text and locale; playback
//! is delegated to whichever synthesizer is installed. A machine without one
//! degrades to showing the text, it never errors the view.

use std::process::Command;

use crate::error::AppError;

/// Locale tag handed to the synthesizer.
pub const SPEECH_LANG: &str = "en-IN";

/// Synthesizers tried in order; the first one that accepts the text wins.
const TTS_COMMANDS: &[&str] = &["espeak-ng", "espeak", "say", "flite"];

/// Build the announcement for a district's average daily wage.
pub fn wage_announcement(district: &str, wage: f64) -> String {
    format!("{district} average daily wage {} rupees", wage.round() as i64)
}

/// Speak `text` via the first available TTS command.
pub fn speak(text: &str, lang: &str) -> Result<(), AppError> {
    for &cmd in TTS_COMMANDS {
        let status = match cmd {
            "say" => Command::new(cmd).arg(text).status(),
            "flite" => Command::new(cmd).args(["-t", text]).status(),
            _ => Command::new(cmd).args(["-v", lang, text]).status(),
        };
        if let Ok(status) = status {
            if status.success() {
                return Ok(());
            }
        }
    }
    Err(AppError::data(format!(
        "No speech backend available (tried {}).",
        TTS_COMMANDS.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcement_rounds_to_whole_rupees() {
        assert_eq!(
            wage_announcement("Bansur", 245.4),
            "Bansur average daily wage 245 rupees"
        );
        assert_eq!(
            wage_announcement("Thanjavur", 199.5),
            "Thanjavur average daily wage 200 rupees"
        );
    }
}
