// src/core/html.rs
// Naive, case-insensitive tag-block scanning. No DOM: a block runs from `<tag ...>`
// to the first matching `</tag>` after it (or to the next `<tag` when the closer
// was omitted, which older league-page generators do for cells).

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

/// Position of the next `<name` opener in `lc` at or after `from`,
/// requiring a tag boundary after the name (so `<th` does not match `<thead`).
fn find_open(lc: &str, name: &str, from: usize) -> Option<usize> {
    let pat = format!("<{name}");
    let mut at = from;
    while let Some(rel) = lc.get(at..)?.find(&pat) {
        let start = at + rel;
        match lc.as_bytes().get(start + pat.len()) {
            None | Some(b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n') => return Some(start),
            _ => at = start + pat.len(),
        }
    }
    None
}

/// Iterator over complete `<name ...>...</name>` blocks of one or more tag names,
/// in document order. Lowercases the haystack once.
pub struct TagBlocks<'a> {
    s: &'a str,
    lc: String,
    names: &'a [&'a str],
    pos: usize,
}

impl<'a> TagBlocks<'a> {
    pub fn new(s: &'a str, names: &'a [&'a str]) -> Self {
        Self { s, lc: to_lower(s), names, pos: 0 }
    }
}

impl<'a> Iterator for TagBlocks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        // Earliest opener among the requested tag names
        let (start, name) = self
            .names
            .iter()
            .filter_map(|n| find_open(&self.lc, n, self.pos).map(|i| (i, *n)))
            .min_by_key(|(i, _)| *i)?;

        let open_end = match self.s[start..].find('>') {
            Some(i) => start + i + 1,
            None => {
                self.pos = self.s.len();
                return None;
            }
        };

        let close = format!("</{name}");
        let end = match self.lc[open_end..].find(&close) {
            Some(rel) => {
                let close_start = open_end + rel;
                match self.s[close_start..].find('>') {
                    Some(gt) => close_start + gt + 1,
                    None => self.s.len(),
                }
            }
            // Unclosed: stop at the next sibling opener
            None => self
                .names
                .iter()
                .filter_map(|n| find_open(&self.lc, n, open_end))
                .min()
                .unwrap_or(self.s.len()),
        };

        self.pos = end;
        Some(&self.s[start..end])
    }
}

pub fn blocks<'a>(s: &'a str, names: &'a [&'a str]) -> TagBlocks<'a> {
    TagBlocks::new(s, names)
}

/// Given a block like `<td ...>INNER</td>`, return INNER (may still hold nested tags).
pub fn inner_after_open_tag(block: &str) -> &str {
    let Some(open_end) = block.find('>') else { return "" };
    let body = &block[open_end + 1..];
    match body.rfind("</") {
        Some(close_start) => &body[..close_start],
        None => body,
    }
}

/// Remove all `<...>` tags, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => { in_tag = false; out.push(' '); }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a block: inner markup, entities decoded, tags stripped.
pub fn block_text(block: &str) -> String {
    strip_tags(normalize_entities(inner_after_open_tag(block)))
}

/// Texts of the `<td>` cells of a row.
pub fn td_texts(row: &str) -> Vec<String> {
    blocks(row, &["td"]).map(block_text).collect()
}

/// Texts of the `<td>`/`<th>` cells of a row, in order.
pub fn cell_texts(row: &str) -> Vec<String> {
    blocks(row, &["td", "th"]).map(block_text).collect()
}

/// Value of `attr` in an opening tag, quoted or bare.
pub fn attr_value<'a>(opener: &'a str, attr: &str) -> Option<&'a str> {
    let lc = to_lower(opener);
    let key = format!("{}=", to_lower(attr));
    let mut from = 0;
    let at = loop {
        let i = lc.get(from..)?.find(&key)? + from;
        // must be a whole attribute name
        let prev = lc.as_bytes().get(i.wrapping_sub(1)).copied();
        if i == 0 || matches!(prev, Some(b' ' | b'\t' | b'\r' | b'\n' | b'<')) {
            break i + key.len();
        }
        from = i + key.len();
    };

    let val = &opener[at..];
    match val.as_bytes().first() {
        Some(q @ (b'"' | b'\'')) => {
            let q = *q as char;
            let rest = &val[1..];
            Some(&rest[..rest.find(q).unwrap_or(rest.len())])
        }
        _ => {
            let end = val
                .find(|c: char| c.is_ascii_whitespace() || c == '>')
                .unwrap_or(val.len());
            Some(&val[..end])
        }
    }
}

/// The opening tag of a block, up to and including the first '>'.
pub fn opener(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_rows_and_cells_case_insensitively() {
        let t = "<TABLE><TR><TH>Player</TH><th>PPD</th></TR><tr><td>A</td><TD>1.5</TD></tr></TABLE>";
        let rows: Vec<&str> = blocks(t, &["tr"]).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(cell_texts(rows[0]), vec!["Player", "PPD"]);
        assert_eq!(td_texts(rows[1]), vec!["A", "1.5"]);
    }

    #[test]
    fn th_does_not_match_thead() {
        let t = "<table><thead><tr><th>X</th></tr></thead></table>";
        let cells: Vec<&str> = blocks(t, &["th"]).collect();
        assert_eq!(cells.len(), 1);
        assert_eq!(block_text(cells[0]), "X");
    }

    #[test]
    fn unclosed_cells_end_at_next_cell() {
        let row = "<tr><td>JOHN<td>AA<td> 10 </tr>";
        assert_eq!(td_texts(row), vec!["JOHN", "AA", "10"]);
    }

    #[test]
    fn nested_markup_is_flattened() {
        let cell = "<td><b>MIKE</b>&nbsp;<i>SMITH</i></td>";
        assert_eq!(block_text(cell), "MIKE SMITH");
    }

    #[test]
    fn reads_quoted_and_bare_attributes() {
        assert_eq!(attr_value(r#"<a class="x" href="Wk1.html">"#, "href"), Some("Wk1.html"));
        assert_eq!(attr_value("<a href='Wk2.html'>", "HREF"), Some("Wk2.html"));
        assert_eq!(attr_value("<a href=Wk3.html target=_blank>", "href"), Some("Wk3.html"));
        assert_eq!(attr_value("<a data-href=x>", "href"), None);
    }
}
