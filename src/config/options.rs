// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// Where standings come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageSelector {
    /// Index page listing one link per week.
    Index(String),
    /// Explicit standings pages with their week numbers.
    Pages(Vec<(u32, String)>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub pages: PageSelector,
    /// Schedule document (PDF or text); `None` uses the static schedule.
    pub schedule: Option<String>,
    /// Every standings link must contain all of these.
    pub link_needles: Vec<String>,
    /// Keep raw copies of fetched documents under the output directory.
    pub cache: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            pages: PageSelector::Index(DEFAULT_INDEX_URL.to_string()),
            schedule: Some(DEFAULT_SCHEDULE_URL.to_string()),
            link_needles: vec![DEFAULT_SEASON_TAG.to_string(), WEEK_LINK_NEEDLE.to_string()],
            cache: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub out_dir: PathBuf,
    pub include_headers: bool,
    /// Also write each bundle as JSON next to the table file.
    pub json: bool,
    /// Print the console table for every week.
    pub print: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            include_headers: true,
            json: false,
            print: true,
        }
    }
}

impl ExportOptions {
    pub fn csv_dir(&self) -> PathBuf { self.out_dir.join(CSV_SUBDIR) }
    pub fn html_dir(&self) -> PathBuf { self.out_dir.join(HTML_SUBDIR) }
    pub fn pdf_dir(&self) -> PathBuf { self.out_dir.join(PDF_SUBDIR) }

    /// `<out>/csv/player_stats_week_<n>.<ext>`
    pub fn week_path(&self, week: u32) -> PathBuf {
        self.csv_dir().join(format!("player_stats_week_{}.{}", week, self.format.ext()))
    }

    pub fn week_json_path(&self, week: u32) -> PathBuf {
        self.csv_dir().join(format!("player_stats_week_{}.json", week))
    }
}
