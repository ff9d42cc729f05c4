//! Side-by-side alliance comparison table.

use serde::{Deserialize, Serialize};

use super::categories::{CardField, Category, GENERAL_CATEGORIES};

const MISSING: &str = "-";
const TOTAL_HEADER: &str = "Total";

/// Aggregated scouting numbers for one team.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCardData {
    pub team: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_shooting_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_shooting_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_feeding_seconds: Option<f64>,
    #[serde(default, rename = "latestBPS", skip_serializing_if = "Option::is_none")]
    pub latest_bps: Option<f64>,
    #[serde(default, rename = "maxBPS", skip_serializing_if = "Option::is_none")]
    pub max_bps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trench: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bump: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_field_from_neutral: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub half_field_from_opponent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_field: Option<bool>,
    #[serde(default, rename = "L3Climbs", skip_serializing_if = "Option::is_none")]
    pub l3_climbs: Option<f64>,
    #[serde(default, rename = "L2Climbs", skip_serializing_if = "Option::is_none")]
    pub l2_climbs: Option<f64>,
    #[serde(default, rename = "L1Climbs", skip_serializing_if = "Option::is_none")]
    pub l1_climbs: Option<f64>,
}

/// A single cell value read from [`MatchCardData`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardValue {
    Number(f64),
    Flag(bool),
}

impl MatchCardData {
    /// A team with no scouting data yet.
    pub fn empty(team: u32) -> Self {
        Self {
            team,
            ..Self::default()
        }
    }

    pub fn value(&self, field: CardField) -> Option<CardValue> {
        let number = |value: Option<f64>| value.map(CardValue::Number);
        let flag = |value: Option<bool>| value.map(CardValue::Flag);
        match field {
            CardField::Matches => number(self.matches),
            CardField::AvgShootingSeconds => number(self.avg_shooting_seconds),
            CardField::MaxShootingSeconds => number(self.max_shooting_seconds),
            CardField::AvgFeedingSeconds => number(self.avg_feeding_seconds),
            CardField::LatestBps => number(self.latest_bps),
            CardField::MaxBps => number(self.max_bps),
            CardField::Trench => flag(self.trench),
            CardField::Bump => flag(self.bump),
            CardField::HalfFieldFromNeutral => flag(self.half_field_from_neutral),
            CardField::HalfFieldFromOpponent => flag(self.half_field_from_opponent),
            CardField::FullField => flag(self.full_field),
            CardField::L3Climbs => number(self.l3_climbs),
            CardField::L2Climbs => number(self.l2_climbs),
            CardField::L1Climbs => number(self.l1_climbs),
        }
    }
}

/// Integers print as-is, other numbers with two decimals.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

pub fn format_value(value: Option<CardValue>) -> String {
    match value {
        Some(CardValue::Flag(true)) => "Yes".to_string(),
        Some(CardValue::Flag(false)) => "No".to_string(),
        Some(CardValue::Number(number)) => format_number(number),
        None => MISSING.to_string(),
    }
}

/// Sum of the numeric values in a row, `None` when there are none.
pub fn alliance_total(teams: &[MatchCardData], field: CardField) -> Option<f64> {
    let values: Vec<f64> = teams
        .iter()
        .filter_map(|team| match team.value(field) {
            Some(CardValue::Number(number)) => Some(number),
            _ => None,
        })
        .collect();
    (!values.is_empty()).then(|| values.iter().sum())
}

fn total_cell(teams: &[MatchCardData], category: &Category) -> String {
    if !category.show_total {
        return MISSING.to_string();
    }
    alliance_total(teams, category.field)
        .map(format_number)
        .unwrap_or_else(|| MISSING.to_string())
}

/// Rendered card: red teams, red total, label, blue total, blue teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchCardTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MatchCardTable {
    pub fn build(red: &[MatchCardData], blue: &[MatchCardData]) -> Self {
        Self::with_categories(red, blue, &GENERAL_CATEGORIES)
    }

    pub fn with_categories(red: &[MatchCardData], blue: &[MatchCardData], categories: &[Category]) -> Self {
        let team_header = |team: &MatchCardData| team.team.to_string();
        let mut header: Vec<String> = red.iter().map(team_header).collect();
        header.push(TOTAL_HEADER.to_string());
        header.push(String::new());
        header.push(TOTAL_HEADER.to_string());
        header.extend(blue.iter().map(team_header));

        let rows = categories
            .iter()
            .map(|category| {
                let mut row: Vec<String> = red
                    .iter()
                    .map(|team| format_value(team.value(category.field)))
                    .collect();
                row.push(total_cell(red, category));
                row.push(category.label.to_string());
                row.push(total_cell(blue, category));
                row.extend(blue.iter().map(|team| format_value(team.value(category.field))));
                row
            })
            .collect();

        Self { header, rows }
    }

    /// Plain-text rendering with padded columns.
    pub fn render(&self) -> String {
        let columns = self.header.len();
        let mut widths = vec![0usize; columns];
        for line in std::iter::once(&self.header).chain(self.rows.iter()) {
            for (width, cell) in widths.iter_mut().zip(line.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let render_line = |line: &Vec<String>| {
            line.iter()
                .zip(widths.iter())
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };
        let mut output = render_line(&self.header);
        output.push('\n');
        output.push_str(&"-".repeat(output.trim_end().chars().count()));
        for row in &self.rows {
            output.push('\n');
            output.push_str(&render_line(row));
        }
        output.push('\n');
        output
    }
}
