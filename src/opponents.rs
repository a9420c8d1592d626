// src/opponents.rs
//! Opponent lookup: which team a given team faced in a given week.

use crate::model::{BYE, MatchScheduleEntry, UNKNOWN};
use crate::teams::canonicalize;

/// Opponent of `team` in `week`.
///
/// Entries are scanned in order and the first one for `week` that involves the
/// team decides. Returns [`BYE`] when the other side is a bye, the other
/// side's name as printed in the schedule otherwise, and [`UNKNOWN`] when no
/// entry matches.
pub fn resolve(team: &str, week: u32, entries: &[MatchScheduleEntry]) -> String {
    let team = canonicalize(team);

    for e in entries.iter().filter(|e| e.week == week) {
        let home = canonicalize(&e.home_team);
        let away = canonicalize(&e.away_team);

        if team == home {
            return if away == BYE { BYE.to_string() } else { e.away_team.clone() };
        }
        if team == away {
            return if home == BYE { BYE.to_string() } else { e.home_team.clone() };
        }
    }

    UNKNOWN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(week: u32, home: &str, away: &str) -> MatchScheduleEntry {
        MatchScheduleEntry::new(week, "", home, away)
    }

    #[test]
    fn bye_on_either_side() {
        let s = [entry(5, "REDHEADS", "BYE"), entry(6, "bye", "REDHEADS")];
        assert_eq!(resolve("REDHEADS", 5, &s), "BYE");
        assert_eq!(resolve("Redheads", 6, &s), "BYE");
    }

    #[test]
    fn no_entries_is_unknown() {
        assert_eq!(resolve("UNKNOWN TEAM", 9, &[]), "Unknown");
    }

    #[test]
    fn returns_raw_opposing_name() {
        let s = [entry(2, "harbor hills 2", "Sir James Pub Dos")];
        assert_eq!(resolve("HARBOR HILLS TOO", 2, &s), "Sir James Pub Dos");
        assert_eq!(resolve("SIR JAMES PUB 2", 2, &s), "harbor hills 2");
    }

    #[test]
    fn week_must_match() {
        let s = [entry(1, "THE HUTCH", "CAPITALIZE")];
        assert_eq!(resolve("THE HUTCH", 2, &s), "Unknown");
    }

    #[test]
    fn skips_other_matchups_in_the_same_week() {
        let s = [entry(3, "GRAND AVE", "REDHEADS"), entry(3, "THE HUTCH", "CAPITALIZE")];
        assert_eq!(resolve("CAPITALIZE", 3, &s), "THE HUTCH");
    }

    #[test]
    fn first_matching_entry_wins() {
        let s = [entry(4, "THE HUTCH", "CAPITALIZE"), entry(4, "GRAND AVE", "THE HUTCH")];
        assert_eq!(resolve("THE HUTCH", 4, &s), "CAPITALIZE");

        let reversed = [s[1].clone(), s[0].clone()];
        assert_eq!(resolve("THE HUTCH", 4, &reversed), "GRAND AVE");
    }
}
