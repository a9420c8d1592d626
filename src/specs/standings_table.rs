// src/specs/standings_table.rs
//! Primary strategy: read players from `<table>` markup inside the
//! statistics section.
//!
//! A table qualifies when its first row has a "Player" header and a "PPD"
//! header. Rows are read positionally:
//!
//! ```text
//! Player | SancPd | Games | Wins | PPD | MPR | Hat | HstTon | HstOut
//! ```
//!
//! Short rows that look like a team name switch the team context for the rows
//! below them. When no table yields a player, a last-resort pass picks rows
//! containing a few common first names anywhere in the section.

use tracing::{debug, info};

use crate::config::consts::{
    HEADER_SENTINEL, KNOWN_FIRST_NAMES, MAX_TEAM_ROW_CELLS, MIN_PLAYER_FIELDS, TOTALS_SENTINEL,
};
use crate::core::html::{self, block_text, cell_texts, td_texts};
use crate::core::sanitize::{parse_average, parse_count};
use crate::model::{PlayerRecord, TeamRecord};
use crate::teams;

use super::standings_lines::is_team_name_line;
use super::{is_sentinel_name, player_record};

/// Does the header row mark a player statistics table?
fn is_stats_header(headers: &[String]) -> bool {
    headers.iter().any(|h| h.contains(HEADER_SENTINEL)) && headers.iter().any(|h| h.contains("PPD"))
}

/// Team named in a header cell, if any header mentions a known venue family:
/// the member when the header names one, the family otherwise.
fn team_from_headers(headers: &[String]) -> Option<String> {
    let h = headers.iter().find(|h| teams::names_family(h))?;
    teams::resolve_family(h)
        .or_else(|| teams::family_stem(h))
        .map(str::to_string)
}

/// Positional player row. `cells[0]` is the name, `cells[1]` the rating.
fn player_from_cells(cells: &[String], team: &str) -> PlayerRecord {
    let name = cells.first().map(String::as_str).unwrap_or("");
    let rating = cells.get(1).map(String::as_str).unwrap_or("");
    let stats = cells.get(2..).unwrap_or(&[]);
    player_record(name, rating, team, stats)
}

/// "Team Totals" row: the non-empty cells after the label are
/// games, wins, PPD, MPR.
fn totals_from_cells(cells: &[String], team: &str) -> Option<TeamRecord> {
    let vals: Vec<&str> = cells
        .iter()
        .skip(1)
        .map(|c| c.as_str())
        .filter(|c| !c.is_empty())
        .collect();
    if vals.len() < 4 {
        return None;
    }

    let mut t = TeamRecord {
        games_played: parse_count(vals[0]),
        games_won: parse_count(vals[1]),
        ppd: parse_average(vals[2]),
        mpr: parse_average(vals[3]),
        ..TeamRecord::default()
    };
    if !team.is_empty() {
        t.name = team.to_string();
    }
    Some(t)
}

/// Read players (and team totals rows) from every qualifying table.
pub fn extract(section: &str) -> (Vec<PlayerRecord>, Vec<TeamRecord>) {
    extract_with_default_team(section, "")
}

pub fn extract_with_default_team(section: &str, default_team: &str) -> (Vec<PlayerRecord>, Vec<TeamRecord>) {
    let mut players = Vec::new();
    let mut team_rows = Vec::new();

    for (i, table) in html::blocks(section, &["table"]).enumerate() {
        let mut rows = html::blocks(table, &["tr"]);

        let Some(header_row) = rows.next() else { continue };
        let headers = cell_texts(header_row);
        if !is_stats_header(&headers) {
            debug!(table = i, "not a player stats table");
            continue;
        }
        debug!(table = i, ?headers, "found player stats table");

        let mut team = default_team.to_string();
        if let Some(t) = team_from_headers(&headers) {
            debug!(team = %t, "using team name from header");
            team = t;
        }

        for row in rows {
            let cells = td_texts(row);

            if cells.len() <= MAX_TEAM_ROW_CELLS {
                let text = block_text(row);
                if is_team_name_line(&text) {
                    debug!(team = %text, "found team name row");
                    team = text;
                }
                continue;
            }

            if cells[0].contains(TOTALS_SENTINEL) {
                if let Some(t) = totals_from_cells(&cells, &team) {
                    debug!(team = %t.name, ppd = t.ppd, "added team totals from table");
                    team_rows.push(t);
                }
                continue;
            }

            if cells.len() < MIN_PLAYER_FIELDS || is_sentinel_name(&cells[0]) {
                continue;
            }

            let p = player_from_cells(&cells, &team);
            debug!(player = %p.name, team = %p.team, games = p.games_played, ppd = p.ppd, "added player from table");
            players.push(p);
        }
    }

    if players.is_empty() {
        debug!("no players from tables, trying first-name row scan");
        players = scan_known_names(section, default_team);
        if !players.is_empty() {
            info!(count = players.len(), "recovered players from first-name row scan");
        }
    }

    (players, team_rows)
}

/// Last resort: any row mentioning one of [`KNOWN_FIRST_NAMES`] with enough
/// cells is read positionally under the default team. Imprecise on purpose.
fn scan_known_names(section: &str, default_team: &str) -> Vec<PlayerRecord> {
    let mut out = Vec::new();

    for row in html::blocks(section, &["tr"]) {
        let text = block_text(row);
        let lc = text.to_lowercase();
        if text.is_empty() || lc.contains("player") || lc.contains("team totals") {
            continue;
        }
        if !KNOWN_FIRST_NAMES.iter().any(|n| text.contains(n)) {
            continue;
        }

        let cells = td_texts(row);
        if cells.len() >= MIN_PLAYER_FIELDS {
            let p = player_from_cells(&cells, default_team);
            debug!(player = %p.name, games = p.games_played, ppd = p.ppd, "added player from direct row scan");
            out.push(p);
        }
    }

    out
}
