//! Ball Scout
//!
//! Video scouting for robotics matches: mark shots against a playing video,
//! group them into timed cycles, derive shooting rates and save sessions for
//! later comparison on a match card.

pub mod annotate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod hotkeys;
pub mod match_card;
pub mod providers;
pub mod server;
pub mod state;
pub mod store;
pub mod utils;
