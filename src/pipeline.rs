// src/pipeline.rs
//! Sequencing: section → table → (line fallback) → canonical teams →
//! roster overrides → opponents. Documents come from a [`DocumentSource`];
//! weeks are processed one after another, in link order.

use tracing::{debug, info, warn};

use crate::config::consts::{PLAYER_TEAM_OVERRIDES, SCHEDULE_CACHE_KEY};
use crate::config::options::{PageSelector, ScrapeOptions};
use crate::error::Result;
use crate::model::{BYE, MatchScheduleEntry, PlayerRecord, TeamRecord, UNKNOWN, WeeklyStatsBundle};
use crate::opponents;
use crate::progress::Progress;
use crate::source::DocumentSource;
use crate::specs::links::{self, LinkFilter};
use crate::specs::{schedule, section, standings_lines, standings_table};
use crate::teams::canonicalize;

/// Players and team totals from one standings document.
///
/// Never fails: a document without a statistics section yields two empty
/// lists.
pub fn extract_stats(document: &str) -> (Vec<PlayerRecord>, Vec<TeamRecord>) {
    let section = section::locate(document);
    if section.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let (mut players, mut teams) = standings_table::extract(section);
    if players.is_empty() {
        info!("table extraction found no players, trying line-by-line parsing");
        let (line_players, line_teams) = standings_lines::extract(section);
        players = line_players;
        teams.extend(line_teams);
    }

    for p in &mut players {
        if !p.team.is_empty() {
            p.team = canonicalize(&p.team);
        }
    }
    for t in &mut teams {
        t.name = canonicalize(&t.name);
    }
    apply_overrides(&mut players, PLAYER_TEAM_OVERRIDES);

    info!(players = players.len(), teams = teams.len(), "extracted standings");
    (players, teams)
}

/// Pin listed players to a team wherever the page put them.
pub fn apply_overrides(players: &mut [PlayerRecord], overrides: &[(&str, &str)]) {
    for p in players.iter_mut() {
        let upper = p.name.to_uppercase();
        if let Some((_, team)) = overrides.iter().find(|(name, _)| *name == upper) {
            if p.team != *team {
                debug!(player = %p.name, from = %p.team, to = team, "team override");
                p.team = team.to_string();
            }
        }
    }
}

/// One week's bundle with every player's opponent filled in.
pub fn build_bundle(week: u32, document: &str, schedule: &[MatchScheduleEntry]) -> WeeklyStatsBundle {
    let (mut players, teams) = extract_stats(document);

    for p in &mut players {
        let opp = opponents::resolve(&p.team, week, schedule);
        p.opponent = if opp == BYE || opp == UNKNOWN { opp } else { canonicalize(&opp) };
    }

    WeeklyStatsBundle { week, players, teams }
}

/// Standings run over one document source and one schedule.
pub struct Pipeline<S> {
    source: S,
    schedule: Vec<MatchScheduleEntry>,
}

impl<S: DocumentSource> Pipeline<S> {
    /// Starts with the built-in static schedule.
    pub fn new(source: S) -> Self {
        Self { source, schedule: schedule::default_static_schedule() }
    }

    pub fn with_schedule(mut self, schedule: Vec<MatchScheduleEntry>) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn schedule(&self) -> &[MatchScheduleEntry] {
        &self.schedule
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Read the schedule document at `location`. Any failure, or a document
    /// with no recognizable matchups, leaves the static schedule in place.
    pub fn load_schedule(&mut self, location: &str) -> &[MatchScheduleEntry] {
        match self.source.fetch_as(location, SCHEDULE_CACHE_KEY) {
            Ok(text) => {
                let entries = schedule::from_text(&text);
                if entries.is_empty() {
                    warn!("no schedule entries extracted, using static schedule");
                    self.schedule = schedule::default_static_schedule();
                } else {
                    info!(count = entries.len(), "loaded schedule");
                    self.schedule = entries;
                }
            }
            Err(e) => {
                warn!(error = %e, "could not read schedule, using static schedule");
                self.schedule = schedule::default_static_schedule();
            }
        }
        &self.schedule
    }

    pub fn process_document(&self, week: u32, document: &str) -> WeeklyStatsBundle {
        build_bundle(week, document, &self.schedule)
    }

    pub fn process_week(&self, location: &str, week: u32) -> Result<WeeklyStatsBundle> {
        info!(week, %location, "processing standings");
        let doc = self.source.fetch_as(location, &format!("standings_week_{week}.html"))?;
        Ok(self.process_document(week, &doc))
    }

    /// Process `(week, location)` pairs in order. A failed week is logged,
    /// reported and skipped.
    pub fn run_pages(
        &self,
        pages: &[(u32, String)],
        mut progress: Option<&mut dyn Progress>,
    ) -> Vec<WeeklyStatsBundle> {
        if let Some(p) = progress.as_deref_mut() {
            p.begin(pages.len());
        }

        let mut out = Vec::with_capacity(pages.len());
        for (week, location) in pages {
            match self.process_week(location, *week) {
                Ok(bundle) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(*week);
                    }
                    out.push(bundle);
                }
                Err(e) => {
                    warn!(week, error = %e, "skipping week");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(*week, &e.to_string());
                    }
                }
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        out
    }

    /// Discover week pages on the index at `index` and process them.
    /// Only fetching the index itself is fatal.
    pub fn run_index(
        &self,
        index: &str,
        filter: &LinkFilter,
        mut progress: Option<&mut dyn Progress>,
    ) -> Result<Vec<WeeklyStatsBundle>> {
        let html = self.source.fetch(index)?;
        let pages = week_pages(index, &links::standings_links(&html, filter));

        if pages.is_empty() {
            warn!(%index, "no standings links found");
            if let Some(p) = progress.as_deref_mut() {
                p.log("No standings links found on the index page.");
            }
        }
        Ok(self.run_pages(&pages, progress))
    }

    /// Entry point for a full scrape as configured.
    pub fn run(
        &mut self,
        opts: &ScrapeOptions,
        progress: Option<&mut dyn Progress>,
    ) -> Result<Vec<WeeklyStatsBundle>> {
        match &opts.schedule {
            Some(loc) => {
                self.load_schedule(loc);
            }
            None => debug!("no schedule document, using static schedule"),
        }

        match &opts.pages {
            PageSelector::Index(index) => {
                self.run_index(index, &LinkFilter::new(opts.link_needles.iter().cloned()), progress)
            }
            PageSelector::Pages(pages) => Ok(self.run_pages(pages, progress)),
        }
    }
}

/// Absolute page locations with their weeks: `Wk<n>` in the link, else the
/// 1-based link position. Links that cannot be resolved are dropped.
pub fn week_pages(index: &str, hrefs: &[String]) -> Vec<(u32, String)> {
    hrefs
        .iter()
        .enumerate()
        .filter_map(|(i, href)| {
            let location = match links::resolve_link(index, href) {
                Ok(l) => l,
                Err(e) => {
                    warn!(%href, error = %e, "dropping unresolvable link");
                    return None;
                }
            };
            let week = links::week_from_url(&location).unwrap_or(i as u32 + 1);
            debug!(week, %location, "standings page");
            Some((week, location))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    const PAGE: &str = r#"<html><body>
<h2>Combined X01/Cricket games, sorted by Team + PPD:</h2>
<table>
<tr><th>Player</th><th>SancPd</th><th>Games</th><th>Wins</th><th>PPD</th><th>MPR</th><th>Hat</th><th>HstTon</th><th>HstOut</th></tr>
<tr><td>Harbor Hills 2</td></tr>
<tr><td>JOHN DOE</td><td>AA</td><td>10</td><td>7</td><td>2.50</td><td>1.20</td><td>1</td><td>100</td><td>50</td></tr>
<tr><td>STEVE WHEELOCK</td><td>A</td><td>8</td><td>4</td><td>19.80</td><td>2.10</td><td>0</td><td>120</td><td>60</td></tr>
<tr><td>REDHEADS</td></tr>
<tr><td>MIKE ROE</td><td>B</td><td>6</td><td>9</td><td>15.00</td><td>1.50</td><td>0</td><td>80</td><td>32</td></tr>
</table>
Most Improved Players for week 3
</body></html>"#;

    struct MapSource(HashMap<String, String>);

    impl DocumentSource for MapSource {
        fn fetch(&self, location: &str) -> Result<String> {
            self.0.get(location).cloned().ok_or_else(|| Error::Status {
                url: location.to_string(),
                status: 404,
            })
        }
    }

    fn schedule() -> Vec<MatchScheduleEntry> {
        vec![
            MatchScheduleEntry::new(3, "", "HARBOR HILLS TOO", "redheads"),
            MatchScheduleEntry::new(4, "", "REDHEADS", "BYE"),
        ]
    }

    #[test]
    fn extracts_and_canonicalizes() {
        let (players, _) = extract_stats(PAGE);
        assert_eq!(players.len(), 3);
        assert_eq!(players[0].team, "HARBOR HILLS TOO");
        assert_eq!(players[2].team, "REDHEADS");
    }

    #[test]
    fn pinned_player_moves_team() {
        let (players, _) = extract_stats(PAGE);
        let steve = players.iter().find(|p| p.name == "STEVE WHEELOCK").unwrap();
        assert_eq!(steve.team, "BRIDGE INN 2");
    }

    #[test]
    fn opponents_are_canonical_or_sentinel() {
        let b = build_bundle(3, PAGE, &schedule());
        assert_eq!(b.week, 3);
        assert_eq!(b.players[0].opponent, "REDHEADS");
        assert_eq!(b.players[1].opponent, "Unknown");
        assert_eq!(b.players[2].opponent, "HARBOR HILLS TOO");

        let b = build_bundle(4, PAGE, &schedule());
        assert_eq!(b.players[2].opponent, "BYE");
    }

    #[test]
    fn wins_are_not_checked_against_games() {
        // MIKE ROE is listed with more wins than games; the record is kept as is.
        let (players, _) = extract_stats(PAGE);
        let mike = &players[2];
        assert!(mike.games_won > mike.games_played);
        assert_eq!((mike.games_played, mike.games_won), (6, 9));
    }

    #[test]
    fn missing_section_gives_empty_bundle() {
        let b = build_bundle(1, "<html>no stats</html>", &schedule());
        assert!(b.is_empty());
    }

    #[test]
    fn table_and_line_extractors_agree() {
        let values = ["JOHN DOE", "AA", "10", "7", "2.50", "1.20", "1", "100", "50"];
        let row: String = values.iter().map(|v| format!("<td>{v}</td>")).collect();
        let table = format!(
            "<table><tr><th>Player</th><th>PPD</th></tr><tr>{row}</tr></table>"
        );
        let (from_table, _) = standings_table::extract(&table);
        let from_line = standings_lines::parse_player_line(&values.join(" ")).unwrap();
        assert_eq!(from_table, vec![from_line]);
    }

    #[test]
    fn index_run_infers_weeks_and_skips_failures() {
        let index = r#"<a href="Fall2024Wk3.html">3</a> <a href="Fall2024Wk9.html">9</a> <a href="Fall2024Final.html">x</a>"#;
        let mut docs = HashMap::new();
        docs.insert("site/index.html".to_string(), index.to_string());
        docs.insert("site/Fall2024Wk3.html".to_string(), PAGE.to_string());

        let pipeline = Pipeline::new(MapSource(docs)).with_schedule(schedule());
        let bundles = pipeline
            .run_index("site/index.html", &LinkFilter::for_season("Fall2024"), None)
            .unwrap();

        assert_eq!(bundles.len(), 1);
        assert_eq!(bundles[0].week, 3);
        assert_eq!(bundles[0].players.len(), 3);
    }

    #[test]
    fn week_falls_back_to_link_position() {
        let pages = week_pages(
            "https://league.example/s/index.html",
            &["a.html".to_string(), "Wk7.html".to_string()],
        );
        assert_eq!(pages[0], (1, "https://league.example/s/a.html".to_string()));
        assert_eq!(pages[1].0, 7);
    }

    #[test]
    fn schedule_load_failure_keeps_static() {
        let mut pipeline = Pipeline::new(MapSource(HashMap::new())).with_schedule(Vec::new());
        let n = pipeline.load_schedule("missing.pdf").len();
        assert_eq!(n, schedule::default_static_schedule().len());
    }

    #[test]
    fn schedule_loads_from_text() {
        let mut docs = HashMap::new();
        docs.insert("s.txt".to_string(), "Week 1 - Sep 8, 2024\nTHE HUTCH vs CAPITALIZE\n".to_string());
        let mut pipeline = Pipeline::new(MapSource(docs));
        let s = pipeline.load_schedule("s.txt");
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].home_team, "THE HUTCH");
    }
}
