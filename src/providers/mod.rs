pub mod scouting_api;

pub use scouting_api::{Event, EventResponse, FieldImage, ScoutingApi, TeamsInMatchResponse};
