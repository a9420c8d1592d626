// src/specs/standings_lines.rs
//! Line-oriented fallback for standings sections that carry no usable table
//! (preformatted text, or tables without recognizable headers).
//!
//! Each line is reduced to visible text and classified, in order, as a team
//! line, a totals line, a header/rule line, or a candidate player line.

use tracing::debug;

use crate::config::consts::{
    HEADER_SENTINEL, MIN_PLAYER_FIELDS, RULE_SENTINEL, TEAM_LABEL, TEAM_LINE_STOPLIST,
    TOTALS_SENTINEL,
};
use crate::core::html::strip_tags;
use crate::core::sanitize::{has_numeric, normalize_entities, normalize_ws, parse_average, parse_count, strip_punctuation};
use crate::model::{PlayerRecord, TeamRecord};
use crate::teams;

use super::{is_sentinel_name, player_record};

/// Venues fielding several numbered teams; a line naming one is always a team line.
const MULTI_UNIT_VENUES: &[&str] = &["BRIDGE INN"];

/// Does this line hold just a team name?
pub fn is_team_name_line(line: &str) -> bool {
    let line = line.trim();

    let len = line.chars().count();
    if !(3..=40).contains(&len) {
        return false;
    }

    let upper = line.to_uppercase();
    if MULTI_UNIT_VENUES.iter().any(|v| upper.contains(v)) {
        return true;
    }

    // At most one digit, and only a team designation (1 or 2)
    let mut digits = line.chars().filter(|c| c.is_ascii_digit());
    match (digits.next(), digits.next()) {
        (None, _) => {}
        (Some('1' | '2'), None) => {}
        _ => return false,
    }

    line.chars().any(|c| c.is_ascii_uppercase())
        && !TEAM_LINE_STOPLIST.iter().any(|w| line.contains(w))
}

/// Team name from a team line: label removed, venue member resolved,
/// punctuation dropped.
pub fn extract_team_name(line: &str) -> String {
    let name = line.trim().replacen(TEAM_LABEL, "", 1);

    if let Some(fixed) = teams::resolve_family(&name) {
        return fixed.to_string();
    }

    normalize_ws(&strip_punctuation(&name))
}

/// Short all-caps skill tier such as "A", "AA", "BBB".
fn is_rating_token(s: &str) -> bool {
    (1..=3).contains(&s.len()) && s.chars().all(|c| c.is_ascii_uppercase())
}

/// A stat value, or a dash standing in for one.
fn looks_numeric(s: &str) -> bool {
    has_numeric(s) || (!s.is_empty() && s.chars().all(|c| c == '-'))
}

/// Parse a whitespace-separated player line.
///
/// The rating column anchors the layout: the first short all-caps token
/// (from the second field on) that is followed by a numeric field. Everything
/// before it is the name. Without an anchor, the name is the first field and
/// the rating the second.
pub fn parse_player_line(line: &str) -> Option<PlayerRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_PLAYER_FIELDS {
        return None;
    }

    let anchor = (1..fields.len()).find(|&i| {
        is_rating_token(fields[i]) && fields.get(i + 1).is_some_and(|f| looks_numeric(f))
    });

    let (name, rating, stats) = match anchor {
        Some(i) => (fields[..i].join(" "), fields[i], &fields[i + 1..]),
        None => (fields[0].to_string(), fields[1], &fields[2..]),
    };

    if is_sentinel_name(&name) {
        return None;
    }
    // Prose that happens to have seven words
    if !stats.iter().take(7).any(|f| has_numeric(f)) {
        return None;
    }

    Some(player_record(&name, rating, "", stats))
}

/// Parse the fields after the totals sentinel: games, wins, PPD, MPR.
/// The returned record carries the placeholder team name.
pub fn parse_team_totals_line(line: &str) -> Option<TeamRecord> {
    let at = line.find(TOTALS_SENTINEL)?;
    let rest = line[at + TOTALS_SENTINEL.len()..]
        .trim_start()
        .trim_start_matches(':');

    let f: Vec<&str> = rest.split_whitespace().collect();
    if f.len() < 4 {
        return None;
    }

    Some(TeamRecord {
        games_played: parse_count(f[0]),
        games_won: parse_count(f[1]),
        ppd: parse_average(f[2]),
        mpr: parse_average(f[3]),
        ..TeamRecord::default()
    })
}

/// Walk the section line by line.
pub fn extract(section: &str) -> (Vec<PlayerRecord>, Vec<TeamRecord>) {
    let mut players = Vec::new();
    let mut teams_out = Vec::new();
    let mut team = String::new();

    for raw in section.lines() {
        let line = strip_tags(normalize_entities(raw));
        if line.is_empty() {
            continue;
        }

        if is_team_name_line(&line) {
            team = extract_team_name(&line);
            debug!(team = %team, "found team");
            continue;
        }

        if line.contains(TOTALS_SENTINEL) {
            if let Some(mut t) = parse_team_totals_line(&line) {
                if !team.is_empty() {
                    t.name = team.clone();
                }
                debug!(team = %t.name, ppd = t.ppd, "added team totals");
                teams_out.push(t);
            }
            continue;
        }

        if line.contains(HEADER_SENTINEL) || line.contains(RULE_SENTINEL) {
            continue;
        }

        if let Some(mut p) = parse_player_line(&line) {
            p.team = team.clone();
            debug!(player = %p.name, team = %p.team, ppd = p.ppd, "added player");
            players.push(p);
        }
    }

    (players, teams_out)
}
