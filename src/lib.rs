// src/lib.rs

pub mod config;
pub mod core;
pub mod specs;

pub mod csv;
pub mod error;
pub mod file;
pub mod log;
pub mod model;
pub mod opponents;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod source;
pub mod teams;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use model::{MatchScheduleEntry, PlayerRecord, TeamRecord, WeeklyStatsBundle};
pub use pipeline::{Pipeline, build_bundle, extract_stats};
pub use source::{AutoSource, CachedSource, DocumentSource, FileSource, HttpSource};
