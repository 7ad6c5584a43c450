//! Audio session catalog and a second-granularity player state machine.
//!
//! Playback is simulated: the caller drives `tick()` once per second.
//! Nothing here produces sound.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_VOLUME;
use crate::error::{CoreError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Focus,
    Relax,
    Sleep,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Focus, Category::Relax, Category::Sleep];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Focus => "focus",
            Category::Relax => "relax",
            Category::Sleep => "sleep",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == key)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AudioTrack {
    pub id: u32,
    pub title: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub duration_secs: u32,
    pub frequency: &'static str,
}

pub static CATALOG: &[AudioTrack] = &[
    AudioTrack {
        id: 1,
        title: "Deep Focus",
        category: Category::Focus,
        description: "Alpha waves (8-12Hz) to enhance focus and concentration",
        duration_secs: 1800,
        frequency: "10Hz Alpha Waves",
    },
    AudioTrack {
        id: 2,
        title: "Flow State",
        category: Category::Focus,
        description: "Beta waves (12-30Hz) to promote productivity and alertness",
        duration_secs: 3600,
        frequency: "15Hz Beta Waves",
    },
    AudioTrack {
        id: 3,
        title: "Deep Relaxation",
        category: Category::Relax,
        description: "Theta waves (4-8Hz) for relaxation and creativity",
        duration_secs: 1200,
        frequency: "6Hz Theta Waves",
    },
    AudioTrack {
        id: 4,
        title: "Stress Relief",
        category: Category::Relax,
        description: "Alpha-theta blend for anxiety reduction",
        duration_secs: 900,
        frequency: "8-6Hz Alpha-Theta Waves",
    },
    AudioTrack {
        id: 5,
        title: "Deep Sleep",
        category: Category::Sleep,
        description: "Delta waves (0.5-4Hz) for deep sleep induction",
        duration_secs: 2700,
        frequency: "2Hz Delta Waves",
    },
    AudioTrack {
        id: 6,
        title: "Lucid Dreams",
        category: Category::Sleep,
        description: "Theta-delta blend for lucid dreaming",
        duration_secs: 3600,
        frequency: "4-2Hz Theta-Delta Waves",
    },
];

pub fn tracks_in(category: Category) -> Vec<&'static AudioTrack> {
    CATALOG.iter().filter(|t| t.category == category).collect()
}

pub fn track_by_id(id: u32) -> Option<&'static AudioTrack> {
    CATALOG.iter().find(|t| t.id == id)
}

/// `m:ss`, minutes unpadded.
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionPlayer {
    current: Option<&'static AudioTrack>,
    playing: bool,
    elapsed: u32,
    volume: u8,
}

impl Default for SessionPlayer {
    fn default() -> Self {
        Self {
            current: None,
            playing: false,
            elapsed: 0,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl SessionPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting the current track toggles play/pause; any other track
    /// starts from zero.
    pub fn select(&mut self, track: &'static AudioTrack) {
        if self.current.is_some_and(|t| t.id == track.id) {
            self.toggle();
            return;
        }
        self.current = Some(track);
        self.elapsed = 0;
        self.playing = true;
    }

    /// Play/pause. No-op without a track.
    pub fn toggle(&mut self) {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
    }

    /// Advance one second. Reaching the end stops playback and rewinds.
    pub fn tick(&mut self) {
        let Some(track) = self.current else {
            return;
        };
        if !self.playing {
            return;
        }
        if self.elapsed >= track.duration_secs {
            self.playing = false;
            self.elapsed = 0;
        } else {
            self.elapsed += 1;
        }
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn current(&self) -> Option<&'static AudioTrack> {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Fraction of the current track played, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match self.current {
            Some(t) if t.duration_secs > 0 => {
                (self.elapsed as f64 / t.duration_secs as f64).min(1.0)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: u32) -> &'static AudioTrack {
        track_by_id(id).unwrap()
    }

    #[test]
    fn test_catalog_by_category() {
        for c in Category::ALL {
            assert_eq!(tracks_in(c).len(), 2, "category {c}");
        }
        let titles: Vec<_> = tracks_in(Category::Sleep).iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Deep Sleep", "Lucid Dreams"]);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(65), "1:05");
        assert_eq!(format_time(3600), "60:00");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Relax".parse::<Category>().unwrap(), Category::Relax);
        assert!("party".parse::<Category>().is_err());
    }

    #[test]
    fn test_select_plays_from_zero() {
        let mut p = SessionPlayer::new();
        p.select(track(1));
        p.tick();
        p.tick();
        assert_eq!(p.elapsed(), 2);

        p.select(track(2));
        assert!(p.is_playing());
        assert_eq!(p.elapsed(), 0);
        assert_eq!(p.current().unwrap().title, "Flow State");
    }

    #[test]
    fn test_reselect_toggles_pause() {
        let mut p = SessionPlayer::new();
        p.select(track(4));
        p.tick();
        p.select(track(4));
        assert!(!p.is_playing());
        p.tick();
        assert_eq!(p.elapsed(), 1, "paused player must not advance");
        p.select(track(4));
        assert!(p.is_playing());
    }

    #[test]
    fn test_tick_past_end_stops_and_rewinds() {
        let mut p = SessionPlayer::new();
        p.select(track(4));
        for _ in 0..900 {
            p.tick();
        }
        assert_eq!(p.elapsed(), 900);
        assert!((p.progress() - 1.0).abs() < f64::EPSILON);
        p.tick();
        assert!(!p.is_playing());
        assert_eq!(p.elapsed(), 0);
    }

    #[test]
    fn test_toggle_without_track_is_noop() {
        let mut p = SessionPlayer::new();
        p.toggle();
        assert!(!p.is_playing());
        assert_eq!(p.progress(), 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let mut p = SessionPlayer::new();
        assert_eq!(p.volume(), 70);
        p.set_volume(250);
        assert_eq!(p.volume(), 100);
        p.set_volume(0);
        assert_eq!(p.volume(), 0);
    }
}
