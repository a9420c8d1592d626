// src/core/sanitize.rs

/// Decode the handful of entities the standings pages actually use.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&amp;", "&")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
}

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Keep only ASCII digits and '.'; nothing else is validated.
/// "1.2.3" survives untouched and simply fails to parse later.
pub fn sanitize_numeric(token: &str) -> String {
    token.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

/// Sanitized integer, zero when the remainder does not parse.
pub fn parse_count(token: &str) -> u32 {
    sanitize_numeric(token).parse().unwrap_or(0)
}

/// Sanitized float, zero when the remainder does not parse.
pub fn parse_average(token: &str) -> f64 {
    sanitize_numeric(token)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// True when the token carries at least one digit after sanitizing.
pub fn has_numeric(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_digit())
}

/// Drop everything except word characters and whitespace.
pub fn strip_punctuation(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}
