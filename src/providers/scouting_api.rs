//! Client for the remote scouting API.
//!
//! Every response is an envelope `{ "data": T }`. A non-success status or a
//! body without `data` fails the call.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ScoutError};
use crate::match_card::MatchCardData;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
}

/// Events of the active season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResponse {
    pub year: i32,
    pub events: Vec<Event>,
}

/// Per-team card data for both alliances of a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamsInMatchResponse {
    pub red: Vec<MatchCardData>,
    pub blue: Vec<MatchCardData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldImage {
    pub team_number: u32,
    pub team_name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScoutingApi {
    base_url: Url,
    client: reqwest::Client,
}

impl ScoutingApi {
    /// `base_url` gains a trailing `/` so relative paths extend it.
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::MissingBaseUrl);
        }
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{}/", trimmed)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| ScoutError::Config(format!("Invalid scouting API URL {}: {}", trimmed, err)))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// Build from an optional configured URL.
    pub fn from_base_url(base_url: Option<&str>) -> Result<Self> {
        Self::new(base_url.ok_or(ScoutError::MissingBaseUrl)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        self.base_url
            .join(relative)
            .map_err(|err| ScoutError::Config(format!("Invalid scouting API path {}: {}", path, err)))
    }

    /// GET `path` and unwrap the `data` envelope.
    pub async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url_for(path)?;
        debug!(%url, "Scouting API request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoutError::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }
        let mut payload: Value = response.json().await?;
        let data = payload
            .as_object_mut()
            .and_then(|object| object.remove("data"))
            .ok_or(ScoutError::MissingData)?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn events(&self) -> Result<EventResponse> {
        self.fetch("/events").await
    }

    pub async fn teams_in_match(&self, event_id: &str, match_number: &str) -> Result<TeamsInMatchResponse> {
        let path = format!(
            "/teams?eventId={}&matchNumber={}",
            urlencoding::encode(event_id),
            urlencoding::encode(match_number)
        );
        self.fetch(&path).await
    }

    /// Robot photos, one `teamNumbers` parameter per team.
    pub async fn robot_images(&self, team_numbers: &[u32]) -> Result<Vec<FieldImage>> {
        let query = team_numbers
            .iter()
            .map(|team| format!("teamNumbers={}", team))
            .collect::<Vec<_>>()
            .join("&");
        self.fetch(&format!("/robot-images?{}", query)).await
    }
}
