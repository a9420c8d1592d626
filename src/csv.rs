// src/csv.rs
use std::io::{self, Write};

use crate::model::{PlayerRecord, WeeklyStatsBundle};

pub const PLAYER_HEADERS: [&str; 12] = [
    "Week",
    "Player",
    "Team",
    "Opponent",
    "SancPd",
    "GamesPlayed",
    "GamesWon",
    "PPD",
    "MPR",
    "HatTricks",
    "HighScore",
    "HighCheckout",
];

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        let cell = cell.as_ref();
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// One output row, averages to two decimals.
pub fn player_row(week: u32, p: &PlayerRecord) -> Vec<String> {
    vec![
        week.to_string(),
        p.name.clone(),
        p.team.clone(),
        p.opponent.clone(),
        p.sanction_rating.clone(),
        p.games_played.to_string(),
        p.games_won.to_string(),
        format!("{:.2}", p.ppd),
        format!("{:.2}", p.mpr),
        p.hat_tricks.to_string(),
        p.high_score.to_string(),
        p.high_checkout.to_string(),
    ]
}

/// Write a bundle's players, header first if asked.
pub fn write_bundle<W: Write>(mut w: W, bundle: &WeeklyStatsBundle, include_headers: bool, sep: char) -> io::Result<()> {
    if include_headers {
        write_row(&mut w, &PLAYER_HEADERS, sep)?;
    }
    for p in &bundle.players {
        write_row(&mut w, &player_row(bundle.week, p), sep)?;
    }
    Ok(())
}

/// Whole bundle as one export string.
pub fn to_export_string(bundle: &WeeklyStatsBundle, include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_bundle(&mut buf, bundle, include_headers, sep);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
