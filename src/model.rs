// src/model.rs
use serde::{Deserialize, Serialize};

/// Opponent sentinel for a scheduled week without a match.
pub const BYE: &str = "BYE";
/// Opponent sentinel when the schedule has no entry for the team/week.
pub const UNKNOWN: &str = "Unknown";
/// Team name carried by a totals record until the extractor assigns one.
pub const TEAM_PLACEHOLDER: &str = "TEAM";

/// One player's line from a standings page.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub team: String,
    pub opponent: String,
    pub sanction_rating: String,
    pub games_played: u32,
    pub games_won: u32,
    pub ppd: f64,
    pub mpr: f64,
    pub hat_tricks: u32,
    pub high_score: u32,
    pub high_checkout: u32,
}

/// Aggregate "Team Totals" line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub games_played: u32,
    pub games_won: u32,
    pub ppd: f64,
    pub mpr: f64,
}

impl Default for TeamRecord {
    fn default() -> Self {
        Self {
            name: TEAM_PLACEHOLDER.to_string(),
            games_played: 0,
            games_won: 0,
            ppd: 0.0,
            mpr: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScheduleEntry {
    pub week: u32,
    pub date: String,
    pub home_team: String,
    /// May be the [`BYE`] sentinel.
    pub away_team: String,
}

impl MatchScheduleEntry {
    pub fn new(week: u32, date: impl Into<String>, home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            week,
            date: date.into(),
            home_team: home.into(),
            away_team: away.into(),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.away_team.eq_ignore_ascii_case(BYE) || self.home_team.eq_ignore_ascii_case(BYE)
    }
}

/// Everything extracted from one week's standings document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStatsBundle {
    pub week: u32,
    pub players: Vec<PlayerRecord>,
    pub teams: Vec<TeamRecord>,
}

impl WeeklyStatsBundle {
    pub fn is_empty(&self) -> bool {
        self.players.is_empty() && self.teams.is_empty()
    }
}
