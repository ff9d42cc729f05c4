//! Deterministic placeholder alliances for offline match cards.

use std::fmt;

use serde::Serialize;

const MODULUS: u64 = 2_147_483_647;
const MULTIPLIER: u64 = 48_271;
const TEAMS_PER_ALLIANCE: usize = 3;

const TEAM_POOL: [u32; 35] = [
    33, 67, 118, 125, 148, 167, 171, 195, 217, 233, 254, 359, 441, 469, 494, 610, 716, 971, 1258,
    1318, 1477, 1678, 2056, 2337, 2468, 2549, 2992, 3476, 3847, 4911, 5436, 6328, 6940, 7056, 8708,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alliance {
    Red,
    Blue,
}

impl Alliance {
    pub fn as_str(self) -> &'static str {
        match self {
            Alliance::Red => "red",
            Alliance::Blue => "blue",
        }
    }
}

impl fmt::Display for Alliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllianceTeam {
    pub number: u32,
    pub name: String,
}

/// Polynomial hash over UTF-16 code units, reduced mod 2^31 - 1.
fn hash_seed(input: &str) -> u64 {
    input
        .encode_utf16()
        .fold(0, |hash, unit| (hash * 31 + u64::from(unit)) % MODULUS)
}

/// Three distinct teams from a fixed pool, stable for the same inputs.
pub fn generate_alliance_teams(event_id: &str, match_number: u32, alliance: Alliance) -> Vec<AllianceTeam> {
    let seed = match hash_seed(&format!("{}-{}-{}", event_id, match_number, alliance)) {
        0 => 1,
        seed => seed,
    };
    let mut teams: Vec<AllianceTeam> = Vec::with_capacity(TEAMS_PER_ALLIANCE);
    let mut cursor = seed;
    while teams.len() < TEAMS_PER_ALLIANCE {
        cursor = (cursor * MULTIPLIER) % MODULUS;
        let number = TEAM_POOL[(cursor % TEAM_POOL.len() as u64) as usize];
        if teams.iter().any(|team| team.number == number) {
            continue;
        }
        teams.push(AllianceTeam {
            number,
            name: format!("Team {}", number),
        });
    }
    teams
}
