//! Match details attached to a saved session.

use serde::{Deserialize, Serialize};

use crate::constants::{
    MSG_EVENT_CODE_REQUIRED, MSG_MATCH_NUMBER_REQUIRED, MSG_NAME_REQUIRED,
    MSG_TEAM_NUMBER_INVALID,
};
use crate::error::{FormErrors, Result, ScoutError};

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataForm {
    pub user_name: String,
    pub event_code: String,
    pub match_number: String,
    pub team_number: String,
}

/// Validated metadata written alongside a session's cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetadata {
    pub user_name: String,
    pub event_code: String,
    pub match_number: String,
    pub team_number: u32,
    pub video_url: String,
    pub user_id: String,
    /// Average rate at save time
    pub bps: f64,
}

impl MetadataForm {
    /// Check every field, reporting all failures together.
    pub fn validate(&self) -> std::result::Result<u32, FormErrors> {
        let mut errors = FormErrors::default();
        if self.user_name.trim().is_empty() {
            errors.push("userName", MSG_NAME_REQUIRED);
        }
        if self.event_code.trim().is_empty() {
            errors.push("eventCode", MSG_EVENT_CODE_REQUIRED);
        }
        if self.match_number.trim().is_empty() {
            errors.push("matchNumber", MSG_MATCH_NUMBER_REQUIRED);
        }
        let team_number = parse_team_number(&self.team_number);
        if team_number.is_none() {
            errors.push("teamNumber", MSG_TEAM_NUMBER_INVALID);
        }
        match team_number {
            Some(team_number) if errors.is_empty() => Ok(team_number),
            _ => Err(errors),
        }
    }

    /// Validate and combine with the loaded video and the current rate.
    pub fn into_metadata(
        self,
        video_url: &str,
        user_id: impl Into<String>,
        bps: f64,
    ) -> Result<SessionMetadata> {
        let team_number = self.validate().map_err(ScoutError::InvalidForm)?;
        Ok(SessionMetadata {
            user_name: self.user_name,
            event_code: self.event_code,
            match_number: self.match_number,
            team_number,
            video_url: video_url.trim().to_string(),
            user_id: user_id.into(),
            bps,
        })
    }
}

/// Digits only; no sign, no whitespace.
fn parse_team_number(value: &str) -> Option<u32> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok()
}
