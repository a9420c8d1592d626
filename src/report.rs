// src/report.rs
//! Console table for one week: players grouped by team (teams sorted by name),
//! best PPD first within a team.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::model::{PlayerRecord, WeeklyStatsBundle};

const RULE_WIDTH: usize = 78;

fn header_line(out: &mut String) {
    let _ = writeln!(
        out,
        "{:<26} | {:<6} | {:<15} | {:<5} | {:<4} | {:<6} | {:<5} | {:<3} | {:<6} | {:<6}",
        "Player", "SancPd", "Opponent", "Games", "Wins", "PPD", "MPR", "Hat", "HstTon", "HstOut"
    );
    let widths = [26, 6, 15, 5, 4, 6, 5, 3, 6, 6];
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", dashes.join(" | "));
}

fn player_line(out: &mut String, p: &PlayerRecord) {
    let _ = writeln!(
        out,
        "{:<26} | {:<6} | {:<15} | {:>5} | {:>4} | {:>6.2} | {:>5.2} | {:>3} | {:>6} | {:>6}",
        p.name, p.sanction_rating, p.opponent, p.games_played, p.games_won,
        p.ppd, p.mpr, p.hat_tricks, p.high_score, p.high_checkout
    );
}

/// Players grouped by team name, each group sorted by PPD descending.
pub fn group_by_team(players: &[PlayerRecord]) -> BTreeMap<&str, Vec<&PlayerRecord>> {
    let mut groups: BTreeMap<&str, Vec<&PlayerRecord>> = BTreeMap::new();
    for p in players {
        groups.entry(p.team.as_str()).or_default().push(p);
    }
    for g in groups.values_mut() {
        g.sort_by(|a, b| b.ppd.total_cmp(&a.ppd));
    }
    groups
}

pub fn render_week(bundle: &WeeklyStatsBundle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=========== PLAYER STATISTICS FOR WEEK {} ===========", bundle.week);
    header_line(&mut out);

    for (team, players) in group_by_team(&bundle.players) {
        if !team.is_empty() {
            let _ = writeln!(out, "\n{team}");
        }
        for p in players {
            player_line(&mut out, p);
        }
    }

    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

pub fn print_week(bundle: &WeeklyStatsBundle) {
    print!("{}", render_week(bundle));
}
