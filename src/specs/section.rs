// src/specs/section.rs
//! Locates the player-statistics section of a standings document.

use tracing::{debug, warn};

use crate::config::consts::{ALT_SECTION_MARKERS, SECTION_END_MARKER, SECTION_START_MARKER};

/// Start/end markers bounding the statistics section.
#[derive(Clone, Debug)]
pub struct SectionMarkers<'a> {
    pub primary: &'a str,
    /// Tried in order when the primary marker is missing.
    pub alternates: &'a [&'a str],
    pub end: &'a str,
}

impl Default for SectionMarkers<'static> {
    fn default() -> Self {
        Self {
            primary: SECTION_START_MARKER,
            alternates: ALT_SECTION_MARKERS,
            end: SECTION_END_MARKER,
        }
    }
}

/// The statistics section of `doc`, or "" when no start marker is present.
pub fn locate(doc: &str) -> &str {
    locate_with(doc, &SectionMarkers::default())
}

pub fn locate_with<'d>(doc: &'d str, markers: &SectionMarkers<'_>) -> &'d str {
    let start = match doc.find(markers.primary) {
        Some(i) => i,
        None => {
            let alt = markers
                .alternates
                .iter()
                .find_map(|m| doc.find(m).map(|i| (i, *m)));
            match alt {
                Some((i, m)) => {
                    debug!(marker = m, "using alternative start marker");
                    i
                }
                None => {
                    warn!("no statistics section marker found");
                    return "";
                }
            }
        }
    };

    let end = match doc[start..].find(markers.end) {
        Some(rel) => start + rel,
        None => {
            debug!(bytes = doc.len() - start, "end marker not found, using rest of document");
            doc.len()
        }
    };

    let section = &doc[start..end];
    debug!(len = section.len(), "found player stats section");
    section
}
