// src/source.rs
//! Where documents come from.
//!
//! The pipeline only sees a [`DocumentSource`]: give it a location (URL or
//! path), get back text. PDFs are turned into layout-preserving text with the
//! `pdftotext` tool from poppler, which must be on `PATH`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

pub trait DocumentSource {
    /// Text of the document at `location`.
    fn fetch(&self, location: &str) -> Result<String>;

    /// Like [`fetch`](Self::fetch), with a stable name sources may use to keep
    /// a local copy ("standings_week_3.html").
    fn fetch_as(&self, location: &str, _key: &str) -> Result<String> {
        self.fetch(location)
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for Box<T> {
    fn fetch(&self, location: &str) -> Result<String> {
        (**self).fetch(location)
    }
    fn fetch_as(&self, location: &str, key: &str) -> Result<String> {
        (**self).fetch_as(location, key)
    }
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn is_pdf_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".pdf")
}

/// Last path segment of a URL or path, with `%20` decoded.
fn file_name(location: &str) -> String {
    let trimmed = location.split(['?', '#']).next().unwrap_or(location);
    let name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    name.replace("%20", " ")
}

/// Run `pdftotext -layout <path> -` and return its stdout.
pub fn pdf_to_text(path: &Path) -> Result<String> {
    debug!(path = %path.display(), "extracting PDF text");

    let output = Command::new("pdftotext")
        .arg("-layout")
        .arg(path)
        .arg("-")
        .output()
        .map_err(|e| Error::PdfText {
            path: path.to_path_buf(),
            message: format!("failed to run pdftotext: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::PdfText {
            path: path.to_path_buf(),
            message: format!("pdftotext exited with {}: {}", output.status, stderr.trim()),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Blocking HTTP GET. Non-2xx responses are errors. PDF responses are
/// saved under `download_dir` and converted to text.
pub struct HttpSource {
    client: Client,
    download_dir: PathBuf,
}

impl HttpSource {
    pub fn new(download_dir: impl Into<PathBuf>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, download_dir: download_dir.into() })
    }

    fn save_pdf(&self, location: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.download_dir).map_err(|e| Error::io(&self.download_dir, e))?;

        let mut name = file_name(location);
        if !is_pdf_name(&name) {
            name.push_str(".pdf");
        }
        let path = self.download_dir.join(name);
        fs::write(&path, bytes).map_err(|e| Error::io(&path, e))?;
        info!(path = %path.display(), "saved PDF");
        Ok(path)
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self, location: &str) -> Result<String> {
        debug!(url = %location, "HTTP fetch");
        let resp = self.client.get(location).send()?;

        let status = resp.status();
        if !status.is_success() {
            warn!(url = %location, %status, "HTTP request failed");
            return Err(Error::Status { url: location.to_string(), status: status.as_u16() });
        }

        let pdf_content = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("pdf"));

        if pdf_content || is_pdf_name(&file_name(location)) {
            let bytes = resp.bytes()?;
            let path = self.save_pdf(location, &bytes)?;
            return pdf_to_text(&path);
        }

        let body = resp.text()?;
        debug!(url = %location, bytes = body.len(), "HTTP fetch done");
        Ok(body)
    }
}

/// Local files. `.pdf` files go through `pdftotext`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileSource;

impl DocumentSource for FileSource {
    fn fetch(&self, location: &str) -> Result<String> {
        let path = Path::new(location);
        if is_pdf_name(location) {
            return pdf_to_text(path);
        }
        let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// URLs over HTTP, everything else from disk.
pub struct AutoSource {
    pub http: HttpSource,
    pub file: FileSource,
}

impl AutoSource {
    pub fn new(download_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self { http: HttpSource::new(download_dir)?, file: FileSource })
    }
}

impl DocumentSource for AutoSource {
    fn fetch(&self, location: &str) -> Result<String> {
        if is_remote(location) {
            self.http.fetch(location)
        } else {
            self.file.fetch(location)
        }
    }
}

/// Keeps a copy of every keyed fetch under `dir` and serves it on the next
/// run instead of asking the inner source. Unkeyed fetches pass through.
pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
}

impl<S: DocumentSource> CachedSource<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self { inner, dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn store(&self, path: &Path, body: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::io(&self.dir, e))?;
        fs::write(path, body).map_err(|e| Error::io(path, e))
    }
}

impl<S: DocumentSource> DocumentSource for CachedSource<S> {
    fn fetch(&self, location: &str) -> Result<String> {
        self.inner.fetch(location)
    }

    fn fetch_as(&self, location: &str, key: &str) -> Result<String> {
        let path = self.dir.join(key);

        if let Ok(body) = fs::read_to_string(&path) {
            info!(path = %path.display(), "using cached copy");
            return Ok(body);
        }

        let body = self.inner.fetch(location)?;
        match self.store(&path, &body) {
            Ok(()) => debug!(path = %path.display(), "saved copy"),
            Err(e) => warn!(error = %e, "could not save copy"),
        }
        Ok(body)
    }
}
