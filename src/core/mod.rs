mod frames;
mod player;
mod time_source;
mod video_source;

pub use frames::{frame_duration, frame_index, StepDirection};
pub use player::{player_readiness, EmbeddedPlayer, PendingPlayer, ReadyNotifier};
pub use time_source::{EmbeddedSlot, MediaClock, PlaybackSource, TimeSource};
pub use video_source::{parse_youtube_id, VideoSource};
