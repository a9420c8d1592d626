// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::ExportOptions;
use crate::csv::write_bundle;
use crate::error::{Error, Result};
use crate::model::WeeklyStatsBundle;

/// Create `dir` (and parents) unless it already is a directory.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(Error::io(
            dir,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "path exists but is not a directory"),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }
    Ok(())
}

/// The output tree: `csv/`, `html/` and `pdf/` under the output directory.
pub fn ensure_output_dirs(export: &ExportOptions) -> Result<()> {
    for dir in [export.csv_dir(), export.html_dir(), export.pdf_dir()] {
        ensure_directory(&dir)?;
    }
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let file = File::create(path).map_err(|e| Error::io(path, e))?; // truncate/overwrite
    Ok(BufWriter::new(file))
}

/// Write one week's table file. Returns the path written.
pub fn write_week(bundle: &WeeklyStatsBundle, export: &ExportOptions) -> Result<PathBuf> {
    let path = export.week_path(bundle.week);
    let mut out = create(&path)?;

    write_bundle(&mut out, bundle, export.include_headers, export.format.delim())
        .and_then(|_| out.flush())
        .map_err(|e| Error::io(&path, e))?;

    info!(week = bundle.week, path = %path.display(), players = bundle.players.len(), "saved player stats");
    Ok(path)
}

/// Write one week as pretty JSON next to the table file.
pub fn write_json(bundle: &WeeklyStatsBundle, export: &ExportOptions) -> Result<PathBuf> {
    let path = export.week_json_path(bundle.week);
    let mut out = create(&path)?;

    serde_json::to_writer_pretty(&mut out, bundle)?;
    out.flush().map_err(|e| Error::io(&path, e))?;

    info!(week = bundle.week, path = %path.display(), "saved JSON");
    Ok(path)
}

/// Everything the options ask for, for one week.
pub fn export_week(bundle: &WeeklyStatsBundle, export: &ExportOptions) -> Result<Vec<PathBuf>> {
    let mut written = vec![write_week(bundle, export)?];
    if export.json {
        written.push(write_json(bundle, export)?);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::ExportFormat;
    use crate::model::PlayerRecord;

    fn bundle() -> WeeklyStatsBundle {
        WeeklyStatsBundle {
            week: 2,
            players: vec![PlayerRecord { name: "ANNA".into(), ppd: 20.0, ..Default::default() }],
            teams: Vec::new(),
        }
    }

    #[test]
    fn writes_week_file_under_csv_dir() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportOptions { out_dir: dir.path().to_path_buf(), ..Default::default() };

        let path = write_week(&bundle(), &export).unwrap();
        assert_eq!(path, dir.path().join("csv").join("player_stats_week_2.csv"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Week,Player,"));
        assert!(text.contains("2,ANNA,,,,0,0,20.00,0.00,0,0,0"));
    }

    #[test]
    fn json_and_tsv_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportOptions {
            out_dir: dir.path().to_path_buf(),
            format: ExportFormat::Tsv,
            json: true,
            ..Default::default()
        };

        let written = export_week(&bundle(), &export).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].extension().is_some_and(|e| e == "tsv"));

        let back: WeeklyStatsBundle = serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
        assert_eq!(back, bundle());
    }

    #[test]
    fn file_in_place_of_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("csv");
        fs::write(&blocker, "x").unwrap();
        assert!(ensure_directory(&blocker).is_err());
    }
}
