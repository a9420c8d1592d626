// src/specs/links.rs
//! Per-week standings links on a season index page.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};
use url::Url;

use crate::config::consts::WEEK_LINK_NEEDLE;
use crate::core::html::{self, attr_value, opener};
use crate::error::{Error, Result};
use crate::source::is_remote;

static RE_WEEK_IN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Wk(\d+)").expect("week link regex"));

/// Substrings a standings link must contain, all of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkFilter {
    pub needles: Vec<String>,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self { needles: vec![WEEK_LINK_NEEDLE.to_string()] }
    }
}

impl LinkFilter {
    pub fn new<I, S>(needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { needles: needles.into_iter().map(Into::into).collect() }
    }

    /// Default filter narrowed to one season ("Fall2024").
    pub fn for_season(tag: &str) -> Self {
        let mut f = Self::default();
        if !tag.is_empty() {
            f.needles.insert(0, tag.to_string());
        }
        f
    }

    pub fn accepts(&self, href: &str) -> bool {
        self.needles.iter().all(|n| href.contains(n.as_str()))
    }
}

/// `href` values of matching `<a>` tags, in page order.
pub fn standings_links(index_html: &str, filter: &LinkFilter) -> Vec<String> {
    let links: Vec<String> = html::blocks(index_html, &["a"])
        .filter_map(|a| attr_value(opener(a), "href"))
        .map(str::trim)
        .filter(|href| filter.accepts(href))
        .inspect(|href| debug!(href, "found standings link"))
        .map(str::to_string)
        .collect();

    info!(count = links.len(), "extracted standings links");
    links
}

/// Week number from a `...Wk<n>...` link.
pub fn week_from_url(url: &str) -> Option<u32> {
    RE_WEEK_IN_URL.captures(url)?.get(1)?.as_str().parse().ok()
}

/// Repair a collapsed scheme slash and encode spaces.
pub fn normalize_url(url: &str) -> String {
    let fixed = [("https:/", "https://"), ("http:/", "http://")]
        .iter()
        .find_map(|(bad, good)| {
            (url.starts_with(bad) && !url.starts_with(good))
                .then(|| format!("{good}{}", &url[bad.len()..]))
        })
        .unwrap_or_else(|| url.to_string());

    fixed.replace(' ', "%20")
}

/// Absolute location of `link` as found on the page at `base`.
///
/// Remote bases are joined as URLs (absolute, protocol-relative, root-relative
/// and path-relative links). A local base resolves the link next to the index
/// file.
pub fn resolve_link(base: &str, link: &str) -> Result<String> {
    let link = normalize_url(link.trim());
    if is_remote(&link) {
        return Ok(link);
    }

    if is_remote(base) {
        let base_url = Url::parse(&normalize_url(base))
            .map_err(|source| Error::InvalidUrl { url: base.to_string(), source })?;
        let joined = base_url
            .join(&link)
            .map_err(|source| Error::InvalidUrl { url: link.clone(), source })?;
        debug!(%link, %joined, "resolved standings link");
        return Ok(joined.to_string());
    }

    let local = link.replace("%20", " ");
    let dir = Path::new(base).parent().unwrap_or(Path::new(""));
    Ok(dir.join(local).to_string_lossy().into_owned())
}
