//! Rows of the general match card.

/// How a category's values are typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Number,
    Boolean,
}

/// Field of [`super::MatchCardData`] a row reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardField {
    Matches,
    AvgShootingSeconds,
    MaxShootingSeconds,
    AvgFeedingSeconds,
    LatestBps,
    MaxBps,
    Trench,
    Bump,
    HalfFieldFromNeutral,
    HalfFieldFromOpponent,
    FullField,
    L3Climbs,
    L2Climbs,
    L1Climbs,
}

impl CardField {
    /// JSON key used by the scouting API.
    pub fn data_key(self) -> &'static str {
        match self {
            CardField::Matches => "matches",
            CardField::AvgShootingSeconds => "avgShootingSeconds",
            CardField::MaxShootingSeconds => "maxShootingSeconds",
            CardField::AvgFeedingSeconds => "avgFeedingSeconds",
            CardField::LatestBps => "latestBPS",
            CardField::MaxBps => "maxBPS",
            CardField::Trench => "trench",
            CardField::Bump => "bump",
            CardField::HalfFieldFromNeutral => "halfFieldFromNeutral",
            CardField::HalfFieldFromOpponent => "halfFieldFromOpponent",
            CardField::FullField => "fullField",
            CardField::L3Climbs => "L3Climbs",
            CardField::L2Climbs => "L2Climbs",
            CardField::L1Climbs => "L1Climbs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub label: &'static str,
    pub field: CardField,
    pub kind: CategoryKind,
    /// Whether the alliance total column sums this row
    pub show_total: bool,
}

const fn number(label: &'static str, field: CardField, show_total: bool) -> Category {
    Category {
        label,
        field,
        kind: CategoryKind::Number,
        show_total,
    }
}

const fn boolean(label: &'static str, field: CardField) -> Category {
    Category {
        label,
        field,
        kind: CategoryKind::Boolean,
        show_total: false,
    }
}

/// Display order of the general match card.
pub const GENERAL_CATEGORIES: [Category; 14] = [
    number("Matches", CardField::Matches, false),
    number("Average Fuel Scored", CardField::AvgShootingSeconds, true),
    number("Max Fuel Scored", CardField::MaxShootingSeconds, true),
    number("Average Fuel Fed", CardField::AvgFeedingSeconds, true),
    number("Latest BPS", CardField::LatestBps, false),
    number("Max BPS", CardField::MaxBps, false),
    boolean("Trench", CardField::Trench),
    boolean("Bump", CardField::Bump),
    boolean("Feed (Half Field from Neutral)", CardField::HalfFieldFromNeutral),
    boolean("Feed (Half Field from Opponent)", CardField::HalfFieldFromOpponent),
    boolean("Feed (Full Field)", CardField::FullField),
    number("L3 Count", CardField::L3Climbs, true),
    number("L2 Count", CardField::L2Climbs, true),
    number("L1 Count", CardField::L1Climbs, true),
];
