// src/specs/schedule.rs
//! Match schedule: week headers and matchup lines from a schedule document's
//! text, or a fixed pairing when the document is unavailable.
//!
//! ```text
//! Week 3 - Sep 22, 2024
//!   THE HUTCH vs CAPITALIZE      GRAND AVE @ HARBOR HILLS
//!   REDHEADS BYE                 SPEARS N BEERS vs SIR JAMES PUB 2
//! ```
//!
//! Team names are upper-case words; the separators (`vs`, `vs.`, `@`, `at`)
//! are lower-case, which is what stops a name from swallowing them. Names are
//! kept as printed; the resolver canonicalizes them.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::consts::{DEFAULT_ROSTER, DEFAULT_SEASON, DEFAULT_WEEKS};
use crate::model::{BYE, MatchScheduleEntry};

/// One upper-case team name: words joined by single spaces. Later words may be
/// a lone digit ("SIR JAMES PUB 2").
macro_rules! team {
    () => {
        r"[A-Z&'][A-Z0-9&'.]*(?: (?:[A-Z&'][A-Z0-9&'.]*|[1-9]))*"
    };
}

static RE_WEEK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:week)\s*(\d+)\s*-\s*(\w+\s*\d+\s*,\s*\d{4})").expect("week header regex")
});
static RE_BYE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!("(", team!(), r")\s*\b(?:BYE|[Bb]ye)\b")).expect("bye regex")
});
static RE_MATCHUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!("(", team!(), r")\s*(?:vs\.?|@|at)\s*(", team!(), ")")).expect("matchup regex")
});

/// Line-by-line reader that carries the current week/date context.
#[derive(Clone, Debug, Default)]
pub struct ScheduleScanner {
    week: u32,
    date: String,
}

impl ScheduleScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start inside a known week, as if its header had been read.
    pub fn at_week(week: u32, date: impl Into<String>) -> Self {
        Self { week, date: date.into() }
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Feed one line. A week header updates the context and yields nothing.
    /// Otherwise every matchup and every BYE on the line is yielded, in the
    /// order they appear. Lines before the first header yield nothing.
    pub fn parse_line(&mut self, line: &str) -> Vec<MatchScheduleEntry> {
        let line = line.trim();

        if let Some(c) = RE_WEEK.captures(line) {
            if let Ok(week) = c[1].parse::<u32>() {
                self.week = week;
                self.date = c[2].to_string();
                debug!(week, date = %self.date, "found week header");
                return Vec::new();
            }
        }

        if self.week == 0 {
            return Vec::new();
        }

        let mut hits: Vec<(usize, &str, &str)> = Vec::new();
        let mut gap_start = 0;

        for c in RE_MATCHUP.captures_iter(line) {
            let span = c.get(0).map_or(0..0, |m| m.range());
            // byes only count in the text between matchups
            push_byes(&line[gap_start..span.start], gap_start, &mut hits);
            gap_start = span.end;

            let (home, away) = (c.get(1), c.get(2));
            if let (Some(home), Some(away)) = (home, away) {
                hits.push((span.start, home.as_str().trim(), away.as_str().trim()));
            }
        }
        push_byes(&line[gap_start..], gap_start, &mut hits);
        hits.sort_by_key(|(at, _, _)| *at);

        hits.into_iter()
            .map(|(_, home, away)| {
                if home.eq_ignore_ascii_case(BYE) || away.eq_ignore_ascii_case(BYE) {
                    debug!(week = self.week, home, away, "bye");
                } else {
                    debug!(week = self.week, home, away, "found matchup");
                }
                MatchScheduleEntry::new(self.week, &self.date, home, away)
            })
            .collect()
    }
}

/// BYE hits in `gap`, positioned relative to the whole line.
fn push_byes<'a>(gap: &'a str, offset: usize, hits: &mut Vec<(usize, &'a str, &'a str)>) {
    for c in RE_BYE.captures_iter(gap) {
        if let Some(team) = c.get(1) {
            hits.push((offset + team.start(), team.as_str().trim(), BYE));
        }
    }
}

/// Entries from schedule text, in document order.
pub fn from_text(text: &str) -> Vec<MatchScheduleEntry> {
    let mut scanner = ScheduleScanner::new();
    let entries: Vec<_> = text.lines().flat_map(|l| scanner.parse_line(l)).collect();
    info!(count = entries.len(), "extracted schedule entries from text");
    entries
}

/// Consecutive roster pairs play each other every week. Even weeks put the
/// first of each pair at home, odd weeks the second. An odd team out gets no
/// entry.
pub fn static_schedule(roster: &[&str], weeks: u32, season: &str) -> Vec<MatchScheduleEntry> {
    let mut out = Vec::with_capacity(weeks as usize * (roster.len() / 2));

    for week in 1..=weeks {
        let date = format!("Week {week}, {season}");
        for pair in roster.chunks_exact(2) {
            let (home, away) = if week % 2 == 0 { (pair[0], pair[1]) } else { (pair[1], pair[0]) };
            out.push(MatchScheduleEntry::new(week, date.as_str(), home, away));
        }
    }

    out
}

/// The built-in league roster over the default season length.
pub fn default_static_schedule() -> Vec<MatchScheduleEntry> {
    static_schedule(DEFAULT_ROSTER, DEFAULT_WEEKS, DEFAULT_SEASON)
}

/// Document entries, or the built-in schedule when the text yields none.
pub fn from_text_or_static(text: &str) -> Vec<MatchScheduleEntry> {
    let entries = from_text(text);
    if entries.is_empty() {
        warn!("no schedule entries found in document, using static schedule");
        return default_static_schedule();
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matchup_under_week_context() {
        let mut s = ScheduleScanner::at_week(3, "");
        let e = s.parse_line("THE HUTCH vs CAPITALIZE");
        assert_eq!(e, vec![MatchScheduleEntry::new(3, "", "THE HUTCH", "CAPITALIZE")]);
    }

    #[test]
    fn bye_line_under_week_context() {
        let mut s = ScheduleScanner::at_week(5, "");
        let e = s.parse_line("REDHEADS BYE");
        assert_eq!(e.len(), 1);
        assert_eq!((e[0].week, e[0].home_team.as_str(), e[0].away_team.as_str()), (5, "REDHEADS", "BYE"));
        assert!(e[0].is_bye());
    }

    #[test]
    fn matchups_and_byes_share_a_line() {
        let mut s = ScheduleScanner::at_week(5, "");
        let e = s.parse_line("GRAND AVE @ HARBOR HILLS      REDHEADS BYE");
        let pairs: Vec<_> = e.iter().map(|m| (m.home_team.as_str(), m.away_team.as_str())).collect();
        assert_eq!(pairs, vec![("GRAND AVE", "HARBOR HILLS"), ("REDHEADS", "BYE")]);

        let e = s.parse_line("REDHEADS BYE    THE HUTCH vs CAPITALIZE");
        let pairs: Vec<_> = e.iter().map(|m| (m.home_team.as_str(), m.away_team.as_str())).collect();
        assert_eq!(pairs, vec![("REDHEADS", "BYE"), ("THE HUTCH", "CAPITALIZE")]);
    }

    #[test]
    fn bye_inside_a_name_is_not_a_bye() {
        let mut s = ScheduleScanner::at_week(5, "");
        let e = s.parse_line("GOODBYE PUB vs REDHEADS");
        assert_eq!(e, vec![MatchScheduleEntry::new(5, "", "GOODBYE PUB", "REDHEADS")]);
    }

    #[test]
    fn header_sets_week_and_date() {
        let mut s = ScheduleScanner::new();
        assert!(s.parse_line("Week 12 - Nov 17, 2024").is_empty());
        assert_eq!(s.week(), 12);
        assert_eq!(s.date(), "Nov 17, 2024");
    }

    #[test]
    fn lines_before_first_header_are_ignored() {
        let mut s = ScheduleScanner::new();
        assert!(s.parse_line("THE HUTCH vs CAPITALIZE").is_empty());
        assert!(s.parse_line("REDHEADS BYE").is_empty());
    }

    #[test]
    fn every_separator_and_several_per_line() {
        let mut s = ScheduleScanner::at_week(1, "Sep 8, 2024");
        let e = s.parse_line("THE HUTCH vs. CAPITALIZE    GRAND AVE @ HARBOR HILLS   SIR JAMES PUB 2 at SPEARS N BEERS");
        let pairs: Vec<_> = e.iter().map(|m| (m.home_team.as_str(), m.away_team.as_str())).collect();
        assert_eq!(
            pairs,
            vec![
                ("THE HUTCH", "CAPITALIZE"),
                ("GRAND AVE", "HARBOR HILLS"),
                ("SIR JAMES PUB 2", "SPEARS N BEERS"),
            ]
        );
        assert!(e.iter().all(|m| m.date == "Sep 8, 2024"));
    }

    #[test]
    fn apostrophes_and_ampersands_stay_in_names() {
        let mut s = ScheduleScanner::at_week(2, "");
        let e = s.parse_line("SPEARS N' BEERS vs R&R");
        assert_eq!(e[0].home_team, "SPEARS N' BEERS");
        assert_eq!(e[0].away_team, "R&R");
    }

    #[test]
    fn bye_as_matchup_side_is_kept_raw() {
        let mut s = ScheduleScanner::at_week(4, "");
        let e = s.parse_line("REDHEADS vs BYE");
        assert_eq!(e[0].away_team, "BYE");
        assert!(e[0].is_bye());
    }

    #[test]
    fn from_text_walks_weeks() {
        let text = "\
FALL 2024 SUNDAY LEAGUE
Week 1 - Sep 8, 2024
  THE HUTCH vs CAPITALIZE
  REDHEADS Bye
Week 2 - Sep 15, 2024
  CAPITALIZE @ REDHEADS
";
        let e = from_text(text);
        assert_eq!(e.len(), 3);
        assert_eq!((e[0].week, e[0].date.as_str()), (1, "Sep 8, 2024"));
        assert_eq!((e[1].home_team.as_str(), e[1].away_team.as_str()), ("REDHEADS", "BYE"));
        assert_eq!((e[2].week, e[2].home_team.as_str()), (2, "CAPITALIZE"));
    }

    #[test]
    fn static_pairs_alternate_home_by_parity() {
        let e = static_schedule(&["A", "B", "C", "D", "E"], 2, "2024");
        assert_eq!(e.len(), 4);
        assert_eq!((e[0].week, e[0].home_team.as_str(), e[0].away_team.as_str()), (1, "B", "A"));
        assert_eq!((e[1].home_team.as_str(), e[1].away_team.as_str()), ("D", "C"));
        assert_eq!((e[2].week, e[2].home_team.as_str(), e[2].away_team.as_str()), (2, "A", "B"));
        assert_eq!(e[2].date, "Week 2, 2024");
        assert!(e.iter().all(|m| m.home_team != "E" && m.away_team != "E"));
    }

    #[test]
    fn default_static_covers_the_season() {
        let e = default_static_schedule();
        assert_eq!(e.len(), 26 * 4);
        assert_eq!(e.last().map(|m| m.week), Some(26));
    }

    #[test]
    fn empty_document_falls_back() {
        assert_eq!(from_text_or_static("no schedule here"), default_static_schedule());
    }
}
