// src/cli.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use crate::config::consts::{DEFAULT_INDEX_URL, DEFAULT_OUT_DIR, DEFAULT_SCHEDULE_URL, DEFAULT_SEASON_TAG, WEEK_LINK_NEEDLE};
use crate::config::options::{AppOptions, ExportFormat, ExportOptions, PageSelector, ScrapeOptions};
use crate::file;
use crate::pipeline::Pipeline;
use crate::progress::Progress;
use crate::report;
use crate::source::{AutoSource, CachedSource, DocumentSource};
use crate::specs::links::week_from_url;

#[derive(Parser, Debug)]
#[command(
    name = "dart_scrape",
    version,
    about = "Scrape weekly dart league standings into per-week CSV files"
)]
pub struct Cli {
    /// Season index page listing the weekly standings (URL or file)
    #[arg(long, default_value = DEFAULT_INDEX_URL, conflicts_with = "pages")]
    pub index: String,

    /// Single standings page instead of the index (repeatable)
    #[arg(long = "page", value_name = "LOCATION")]
    pub pages: Vec<String>,

    /// Week number for the matching --page, in order
    #[arg(long = "week", value_name = "N", requires = "pages")]
    pub weeks: Vec<u32>,

    /// Schedule document, PDF or text (URL or file)
    #[arg(long, default_value = DEFAULT_SCHEDULE_URL)]
    pub schedule: String,

    /// Skip the schedule document and use the built-in pairing
    #[arg(long, default_value_t = false)]
    pub static_schedule: bool,

    /// Season tag every standings link must contain
    #[arg(long, default_value = DEFAULT_SEASON_TAG)]
    pub season_tag: String,

    /// Output directory (csv/, html/ and pdf/ go below it)
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Also write each week as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Leave out the header row
    #[arg(long, default_value_t = false)]
    pub no_headers: bool,

    /// Always fetch, never reuse or keep copies under html/
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    /// No console tables
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

impl Cli {
    pub fn options(&self) -> AppOptions {
        let pages = if self.pages.is_empty() {
            PageSelector::Index(self.index.clone())
        } else {
            PageSelector::Pages(
                self.pages
                    .iter()
                    .enumerate()
                    .map(|(i, loc)| {
                        let week = self
                            .weeks
                            .get(i)
                            .copied()
                            .or_else(|| week_from_url(loc))
                            .unwrap_or(i as u32 + 1);
                        (week, loc.clone())
                    })
                    .collect(),
            )
        };

        let mut link_needles = Vec::new();
        if !self.season_tag.is_empty() {
            link_needles.push(self.season_tag.clone());
        }
        link_needles.push(WEEK_LINK_NEEDLE.to_string());

        AppOptions {
            scrape: ScrapeOptions {
                pages,
                schedule: (!self.static_schedule).then(|| self.schedule.clone()),
                link_needles,
                cache: !self.no_cache,
            },
            export: ExportOptions {
                format: self.format.into(),
                out_dir: self.output.clone(),
                include_headers: !self.no_headers,
                json: self.json,
                print: !self.quiet,
            },
        }
    }
}

/// Reports week progress through the log.
struct LogProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        info!(weeks = total, "found standings pages to process");
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self, week: u32) {
        self.done += 1;
        info!(week, "week {}/{} done", self.done + self.failed, self.total);
    }

    fn item_failed(&mut self, week: u32, error: &str) {
        self.failed += 1;
        warn!(week, error, "week {}/{} failed", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        info!(done = self.done, failed = self.failed, "scraping complete");
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let opts = cli.options();
    let export = &opts.export;

    file::ensure_output_dirs(export).wrap_err("could not create output directories")?;

    let auto = AutoSource::new(export.pdf_dir()).wrap_err("could not build HTTP client")?;
    let source: Box<dyn DocumentSource> = if opts.scrape.cache {
        Box::new(CachedSource::new(auto, export.html_dir()))
    } else {
        Box::new(auto)
    };

    let mut pipeline = Pipeline::new(source);
    let mut progress = LogProgress { total: 0, done: 0, failed: 0 };
    let bundles = pipeline
        .run(&opts.scrape, Some(&mut progress))
        .wrap_err("could not read the standings index")?;

    for bundle in &bundles {
        if export.print {
            report::print_week(bundle);
        }
        file::export_week(bundle, export)
            .wrap_err_with(|| format!("could not save week {}", bundle.week))?;
    }

    info!(weeks = bundles.len(), out = %export.out_dir.display(), "done");
    Ok(())
}
