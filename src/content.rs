//! Status content: the two sequences the loop rotates through.
//!
//! Defaults to the "Celebration" lyric lines and eight party emojis.
//! Either list can be replaced from the `[content]` config section.

use serde::Deserialize;

use crate::types::ConfigError;

/// The pair of sequences the loop cycles through.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Content {
    /// Emoji names, without colons.
    pub emojis: Vec<String>,
    pub lines: Vec<String>,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            emojis: DEFAULT_EMOJIS.iter().map(|s| s.to_string()).collect(),
            lines: DEFAULT_LINES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Content {
    pub fn new(emojis: Vec<String>, lines: Vec<String>) -> Self {
        Self { emojis, lines }
    }

    /// Reject empty sequences.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.emojis.is_empty() {
            return Err(ConfigError::EmptySequence("emojis".into()));
        }
        if self.lines.is_empty() {
            return Err(ConfigError::EmptySequence("lines".into()));
        }
        Ok(())
    }
}

/// Lyric lines, in order.
pub const DEFAULT_LINES: &[&str] = &[
    "There's a party goin' on right here",
    "A celebration to last throughout the years",
    "So bring your good times and your laughter too",
    "We gonna celebrate your party with you",
    "Come on now, celebration",
    "Let's all celebrate and have a good time",
    "Celebration",
    "We gonna celebrate and have a good time",
    "Yahoo!",
    "Celebration",
    "Yahoo!",
    "This is your celebration",
    "Celebrate good times, come on!",
    "(Let's celebrate)",
    "Celebrate good times, come on!",
    "(Let's celebrate)",
    "There's a party goin' on right here",
    "A celebration to last throughout the years",
    "So bring your good times and your laughter too",
    "We gonna celebrate your party with you",
    "Come on now, celebration",
    "Let's all celebrate and have a good time",
    "Celebration",
    "We gonna celebrate and have a good time",
    "It's time to come together",
    "It's up to you, what's your pleasure?",
    "Everyone around the world come on!",
    "Yahoo!",
    "It's a celebration",
    "Yahoo!",
    "Celebrate good times, come on!",
    "(It's a celebration)",
    "Celebrate good times, come on!",
    "(Let's celebrate)",
    "There's a party goin' on right here",
    "A dedication to last throughout the years",
    "So bring your good times and your laughter too",
    "We gonna celebrate and party with you",
    "Come on now, celebration",
    "Let's all celebrate and have a good time, yeah yeah",
    "Celebration",
    "We gonna celebrate and have a good time",
    "It's time to come together",
    "It's up to you, what's your pleasure?",
    "Everyone around the world come on!",
    "Yahoo!",
    "It's a celebration",
    "Yahoo!",
    "It's a celebration",
    "Celebrate good times, come on!",
    "(Let's celebrate come on now)",
    "Celebrate good times, come on!",
    "(Let's celebrate)",
    "We're gonna have a good time tonight",
    "Let's celebrate, it's all right",
    "We're gonna have a good time tonight",
    "Let's celebrate, it's all right, baby",
    "We're gonna have a good time tonight",
    "(Celebration)",
    "Let's celebrate, it's all right",
    "We're gonna have a good time tonight",
    "(Celebration)",
    "Let's celebrate, it's all right",
    "Yahoo!",
    "Yahoo!",
    "Celebrate good times, come on!",
    "(Let's celebrate)",
    "Celebrate good times, come on!",
    "(It's a celebration)",
    "Celebrate good times, come on!",
    "(Let's celebrate)",
    "(Come on and celebrate tonight)",
    "Celebrate good times, come on!",
    "('Cause everything's gonna be alright, let's celebrate)",
    "Celebrate good times, come on!",
    "(Let's celebrate)",
    "Celebrate good times, come on!",
];

/// Emoji names, without colons.
pub const DEFAULT_EMOJIS: &[&str] = &[
    "tada",
    "partyparrot",
    "man_dancing",
    "dancer",
    "mirror_ball",
    "partying_face",
    "clinking_glasses",
    "champagne",
];
