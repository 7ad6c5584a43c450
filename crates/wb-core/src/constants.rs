/// Cycle length assumed when history holds fewer than two records (days).
pub const DEFAULT_CYCLE_DAYS: i64 = 28;

/// Reply used when neither the knowledge base nor any fallback rule matches.
pub const GENERIC_FALLBACK: &str = "I'm primarily focused on health and wellness topics, but I'm always happy to chat about anything that's on your mind. Could you tell me more about what you'd like to know?";

/// First message of every chat transcript.
pub const GREETING: &str = "Hi there! I'm ChatBuddy, your AI companion for health and wellness. How can I help you today?";

/// Characters of content shown in a knowledge-base preview.
pub const PREVIEW_CHARS: usize = 120;

/// Mood scale bounds (inclusive) and the neutral default.
pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 5;
pub const DEFAULT_MOOD: u8 = 3;

/// Session player volume on a fresh start (0-100).
pub const DEFAULT_VOLUME: u8 = 70;
