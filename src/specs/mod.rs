// src/specs/mod.rs
//! # Document "specs"
//!
//! Each spec knows how to read one kind of league document and nothing else:
//!
//! - `section` – find the player-statistics block inside a standings page.
//! - `standings_table` – read players from `<table>` markup (primary strategy).
//! - `standings_lines` – read players line by line when no table qualifies.
//! - `schedule` – read week/matchup lines from schedule text, or build the
//!   static schedule.
//! - `links` – find per-week standings links on the season index page.
//!
//! ## What does **not** live here
//! - Fetching, caching, files: `source`, `file`.
//! - Opponent lookup and bundling: `opponents`, `pipeline`.
//!
//! ## Conventions
//! - Specs are pure functions over `&str`. They never fail: a missing section,
//!   an unrecognized table, a short row or an unparsable number is skipped or
//!   defaulted, and the caller sees fewer (or zero) records.
//! - Team names come out as found on the page; the pipeline canonicalizes them.
//! - Test against inline fixtures; keep selectors tolerant of case, whitespace
//!   and harmless markup noise.

pub mod links;
pub mod schedule;
pub mod section;
pub mod standings_lines;
pub mod standings_table;

use crate::core::sanitize::{parse_average, parse_count};
use crate::model::PlayerRecord;

/// Fill a player from the stat columns that follow the rating, in page order:
/// games, wins, PPD, MPR, hat tricks, high score, high checkout.
/// Missing columns stay zero.
pub(crate) fn player_record<S: AsRef<str>>(
    name: &str,
    rating: &str,
    team: &str,
    stats: &[S],
) -> PlayerRecord {
    fn stat<S: AsRef<str>>(stats: &[S], i: usize) -> &str {
        stats.get(i).map(|s| s.as_ref()).unwrap_or("")
    }

    PlayerRecord {
        name: name.to_string(),
        team: team.to_string(),
        opponent: String::new(),
        sanction_rating: rating.to_string(),
        games_played: parse_count(stat(stats, 0)),
        games_won: parse_count(stat(stats, 1)),
        ppd: parse_average(stat(stats, 2)),
        mpr: parse_average(stat(stats, 3)),
        hat_tricks: parse_count(stat(stats, 4)),
        high_score: parse_count(stat(stats, 5)),
        high_checkout: parse_count(stat(stats, 6)),
    }
}

/// Names that mark header/summary rows rather than players.
pub(crate) fn is_sentinel_name(name: &str) -> bool {
    use crate::config::consts::{COMBINED_SENTINEL, HEADER_SENTINEL, TOTALS_SENTINEL};

    name.is_empty()
        || name == HEADER_SENTINEL
        || name == COMBINED_SENTINEL
        || name.contains(TOTALS_SENTINEL)
        || name.to_lowercase().contains("player")
}
