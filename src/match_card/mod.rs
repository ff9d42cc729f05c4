//! Alliance comparison card for a single match.

mod alliance;
mod categories;
mod table;

pub use alliance::{generate_alliance_teams, Alliance, AllianceTeam};
pub use categories::{CardField, Category, CategoryKind, GENERAL_CATEGORIES};
pub use table::{alliance_total, format_number, format_value, CardValue, MatchCardData, MatchCardTable};
