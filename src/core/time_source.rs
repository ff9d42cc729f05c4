//! Playback time capability.
//!
//! The annotation core only needs "what time is it" and "go to time T".
//! Two backends provide it: a local media element ([`MediaClock`]) and an
//! embedded third-party player that becomes available asynchronously
//! ([`super::EmbeddedPlayer`]). [`PlaybackSource`] switches between them.

use tracing::debug;

use super::frames::{frame_duration, StepDirection};
use super::player::EmbeddedPlayer;

/// Current-time and seek capability of a playback backend.
pub trait TimeSource {
    /// Playback position in seconds, `None` when no source is ready.
    fn current_time(&self) -> Option<f64>;

    /// Move the playhead. Call [`TimeSource::seek`] instead, which clamps.
    fn set_position(&mut self, seconds: f64);

    /// Seek to `target_seconds`, clamped to `>= 0`. Non-finite targets are ignored.
    fn seek(&mut self, target_seconds: f64) {
        if target_seconds.is_finite() {
            self.set_position(target_seconds.max(0.0));
        }
    }

    /// Seek relative to the current position.
    fn jump(&mut self, delta_seconds: f64) {
        if let Some(now) = self.current_time() {
            self.seek(now + delta_seconds);
        }
    }

    /// Move by one frame (`1 / fps` seconds).
    fn step_frame(&mut self, direction: StepDirection, fps: f64) {
        self.jump(direction.sign() * frame_duration(fps));
    }
}

/// Playback state of a local media file.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaClock {
    loaded: bool,
    position: f64,
    playing: bool,
}

impl MediaClock {
    /// A loaded media element at position 0.
    pub fn new() -> Self {
        Self {
            loaded: true,
            position: 0.0,
            playing: false,
        }
    }

    /// No media element; reports no time.
    pub fn unloaded() -> Self {
        Self {
            loaded: false,
            ..Self::new()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle_play(&mut self) {
        if self.loaded {
            self.playing = !self.playing;
        }
    }

    /// Advance the playhead by wall time while playing.
    pub fn advance(&mut self, elapsed_seconds: f64) {
        if self.loaded && self.playing {
            self.set_position(self.position + elapsed_seconds.max(0.0));
        }
    }
}

impl Default for MediaClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MediaClock {
    fn current_time(&self) -> Option<f64> {
        self.loaded.then_some(self.position)
    }

    fn set_position(&mut self, seconds: f64) {
        if !self.loaded {
            return;
        }
        self.position = seconds.max(0.0);
    }
}

/// Embedded-player slot: the video id requested and the player once it is ready.
pub struct EmbeddedSlot {
    video_id: String,
    player: Option<Box<dyn EmbeddedPlayer>>,
}

impl EmbeddedSlot {
    pub fn is_ready(&self) -> bool {
        self.player.is_some()
    }
}

impl std::fmt::Debug for EmbeddedSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedSlot")
            .field("video_id", &self.video_id)
            .field("ready", &self.is_ready())
            .finish()
    }
}

/// The active playback backend, if any.
#[derive(Debug, Default)]
pub enum PlaybackSource {
    #[default]
    None,
    Media(MediaClock),
    Embedded(EmbeddedSlot),
}

impl PlaybackSource {
    /// Switch to a local media element, tearing down any embedded player.
    pub fn load_media(&mut self, clock: MediaClock) {
        if let PlaybackSource::Embedded(slot) = self {
            if let Some(mut player) = slot.player.take() {
                player.destroy();
            }
        }
        *self = PlaybackSource::Media(clock);
    }

    /// Switch to an embedded video. An already-ready player is reused.
    pub fn load_embedded(&mut self, video_id: &str) {
        if let PlaybackSource::Embedded(slot) = self {
            if let Some(player) = slot.player.as_mut() {
                player.load_video_by_id(video_id);
            }
            slot.video_id = video_id.to_string();
            return;
        }
        *self = PlaybackSource::Embedded(EmbeddedSlot {
            video_id: video_id.to_string(),
            player: None,
        });
    }

    /// Hand over a player that finished loading. Ignored unless an embedded
    /// source is still selected.
    pub fn attach_player(&mut self, mut player: Box<dyn EmbeddedPlayer>) -> bool {
        match self {
            PlaybackSource::Embedded(slot) => {
                player.load_video_by_id(&slot.video_id);
                debug!(video_id = %slot.video_id, "Embedded player attached");
                slot.player = Some(player);
                true
            }
            _ => {
                player.destroy();
                false
            }
        }
    }

    pub fn has_source(&self) -> bool {
        !matches!(self, PlaybackSource::None)
    }

    pub fn media_mut(&mut self) -> Option<&mut MediaClock> {
        match self {
            PlaybackSource::Media(clock) => Some(clock),
            _ => None,
        }
    }
}

impl TimeSource for PlaybackSource {
    fn current_time(&self) -> Option<f64> {
        match self {
            PlaybackSource::None => None,
            PlaybackSource::Media(clock) => clock.current_time(),
            PlaybackSource::Embedded(slot) => slot
                .player
                .as_ref()
                .map(|player| player.current_time())
                .filter(|time| time.is_finite()),
        }
    }

    fn set_position(&mut self, seconds: f64) {
        match self {
            PlaybackSource::None => {}
            PlaybackSource::Media(clock) => clock.set_position(seconds),
            PlaybackSource::Embedded(slot) => {
                if let Some(player) = slot.player.as_mut() {
                    player.seek_to(seconds, true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct PlayerLog {
        time: f64,
        loaded: Vec<String>,
        destroyed: bool,
    }

    struct FakePlayer(Arc<Mutex<PlayerLog>>);

    impl EmbeddedPlayer for FakePlayer {
        fn current_time(&self) -> f64 {
            self.0.lock().unwrap().time
        }

        fn seek_to(&mut self, seconds: f64, _allow_seek_ahead: bool) {
            self.0.lock().unwrap().time = seconds;
        }

        fn load_video_by_id(&mut self, video_id: &str) {
            self.0.lock().unwrap().loaded.push(video_id.to_string());
        }

        fn destroy(&mut self) {
            self.0.lock().unwrap().destroyed = true;
        }
    }

    #[test]
    fn test_seek_clamps_to_zero() {
        let mut clock = MediaClock::new();
        clock.seek(3.0);
        clock.jump(-5.0);
        assert_eq!(clock.current_time(), Some(0.0));
        clock.seek(f64::NAN);
        assert_eq!(clock.current_time(), Some(0.0));
    }

    #[test]
    fn test_step_frame() {
        let mut clock = MediaClock::new();
        clock.seek(1.0);
        clock.step_frame(StepDirection::Forward, 25.0);
        assert!((clock.current_time().unwrap() - 1.04).abs() < 1e-9);
        clock.step_frame(StepDirection::Backward, 25.0);
        clock.step_frame(StepDirection::Backward, 25.0);
        assert!((clock.current_time().unwrap() - 0.96).abs() < 1e-9);
    }

    #[test]
    fn test_unloaded_clock_reports_nothing() {
        let mut clock = MediaClock::unloaded();
        clock.seek(4.0);
        clock.toggle_play();
        assert_eq!(clock.current_time(), None);
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_advance_only_while_playing() {
        let mut clock = MediaClock::new();
        clock.advance(2.0);
        assert_eq!(clock.current_time(), Some(0.0));
        clock.toggle_play();
        clock.advance(2.0);
        assert_eq!(clock.current_time(), Some(2.0));
    }

    #[test]
    fn test_embedded_source_waits_for_player() {
        let log = Arc::new(Mutex::new(PlayerLog::default()));
        let mut source = PlaybackSource::default();
        assert_eq!(source.current_time(), None);

        source.load_embedded("abc123");
        assert!(source.has_source());
        assert_eq!(source.current_time(), None);
        source.seek(10.0);

        assert!(source.attach_player(Box::new(FakePlayer(log.clone()))));
        source.seek(10.0);
        source.jump(-15.0);
        assert_eq!(source.current_time(), Some(0.0));
        assert_eq!(log.lock().unwrap().loaded, vec!["abc123".to_string()]);

        source.load_embedded("xyz789");
        assert_eq!(log.lock().unwrap().loaded.len(), 2);

        source.load_media(MediaClock::new());
        assert!(log.lock().unwrap().destroyed);
    }

    #[test]
    fn test_late_player_is_discarded() {
        let log = Arc::new(Mutex::new(PlayerLog::default()));
        let mut source = PlaybackSource::Media(MediaClock::new());
        assert!(!source.attach_player(Box::new(FakePlayer(log.clone()))));
        assert!(log.lock().unwrap().destroyed);
    }
}
