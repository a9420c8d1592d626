// src/config/consts.rs

// Standings section
pub const SECTION_START_MARKER: &str = "Combined X01/Cricket games, sorted by Team + PPD:";
pub const ALT_SECTION_MARKERS: &[&str] = &[
    "All X01 games, sorted by PPD:",
    "X01/Cricket games, sorted by Team",
    "Combined X01/Cricket games",
    "X01 games, sorted by PPD",
];
pub const SECTION_END_MARKER: &str = "Most Improved Players for week";

// Row/line sentinels
pub const HEADER_SENTINEL: &str = "Player";
pub const TOTALS_SENTINEL: &str = "Team Totals";
pub const COMBINED_SENTINEL: &str = "Combined";
pub const RULE_SENTINEL: &str = "-----";
pub const TEAM_LABEL: &str = "Team:";

/// Column-header words that never appear in a team-name line.
pub const TEAM_LINE_STOPLIST: &[&str] = &["Player", "Team Totals", "PPD", "MPR", "Wins", "Games"];

/// First names used as a last-resort signal that a table row holds player data.
pub const KNOWN_FIRST_NAMES: &[&str] = &["MITCH", "STEVE", "JOHN", "MIKE"];

/// Player rows need at least this many cells/fields.
pub const MIN_PLAYER_FIELDS: usize = 7;
/// Rows with at most this many cells may be team-name rows.
pub const MAX_TEAM_ROW_CELLS: usize = 3;

/// Players pinned to a team regardless of where the page lists them.
pub const PLAYER_TEAM_OVERRIDES: &[(&str, &str)] = &[("STEVE WHEELOCK", "BRIDGE INN 2")];

// Static schedule fallback
pub const DEFAULT_ROSTER: &[&str] = &[
    "THE HUTCH",
    "CAPITALIZE",
    "GRAND AVE",
    "HARBOR HILLS",
    "HARBOR HILLS TOO",
    "HILLS HAS EYES",
    "REDHEADS",
    "SIR JAMES PUB DOS",
    "SPEARS N BEERS",
];
pub const DEFAULT_WEEKS: u32 = 26;
pub const DEFAULT_SEASON: &str = "2024";

// Net config
pub const DEFAULT_INDEX_URL: &str =
    "https://macdleagues.com/DartStandings/FALL2024standings/FALL2024%2024SUN1OZCounty.html";
pub const DEFAULT_SCHEDULE_URL: &str =
    "https://macdleagues.com/DartSchedules/FALL2024Schedules/FALL2024%2024SUN1.pdf";
pub const DEFAULT_SEASON_TAG: &str = "Fall2024";
pub const WEEK_LINK_NEEDLE: &str = "Wk";
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("dart_scrape/", env!("CARGO_PKG_VERSION"));

// Export
pub const DEFAULT_OUT_DIR: &str = ".";
pub const CSV_SUBDIR: &str = "csv";
pub const HTML_SUBDIR: &str = "html";
pub const PDF_SUBDIR: &str = "pdf";
/// Cache key of the schedule text under the HTML cache directory.
pub const SCHEDULE_CACHE_KEY: &str = "schedule.txt";
