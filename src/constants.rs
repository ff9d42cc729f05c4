//! Shared constants: playback defaults, storage names and user-facing messages.

/// Frame rate assumed for frame stepping when the source does not report one.
pub const DEFAULT_FPS: f64 = 30.0;
/// Seconds moved by the Left/Right seek keys.
pub const DEFAULT_SEEK_STEP_SECONDS: f64 = 5.0;

pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8787";
pub const DEFAULT_USER_ID: &str = "local";

pub const APP_DIR_NAME: &str = "ball-scout";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const METADATA_FILE_NAME: &str = "metadata.json";
pub const CYCLES_FILE_NAME: &str = "cycles.json";

/// Environment variable holding the scouting API base URL.
pub const SCOUTING_API_URL_ENV: &str = "SCOUTING_APP_URL";

pub const MSG_EMPTY_VIDEO_URL: &str = "Add a YouTube URL to load.";
pub const MSG_UNSUPPORTED_VIDEO_URL: &str = "Only YouTube links are supported.";
pub const MSG_UNSUPPORTED_VIDEO_FILE: &str = "Choose a local video file to load.";
pub const MSG_NAME_REQUIRED: &str = "Name is required.";
pub const MSG_EVENT_CODE_REQUIRED: &str = "Event code is required.";
pub const MSG_MATCH_NUMBER_REQUIRED: &str = "Match number is required.";
pub const MSG_TEAM_NUMBER_INVALID: &str = "Team number must be a number.";
pub const MSG_SAVE_FAILED: &str = "Unable to save metadata. Try again.";
