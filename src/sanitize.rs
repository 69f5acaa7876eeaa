//! Pure sanitization helpers for user supplied text, paths, ids and URLs.

use crate::constants::security::{
    ALLOWED_PROTOCOLS, MAX_ID_LENGTH, MAX_INPUT_LENGTH, MAX_PATH_LENGTH,
};
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

static DANGEROUS_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").expect("dangerous chars pattern")
});

static DANGEROUS_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)<script\b",
        r"(?i)javascript:",
        r"(?i)on\w+\s*=",
        r"(?i)data:",
        r"(?i)vbscript:",
    ])
    .expect("dangerous content patterns")
});

fn html_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        '/' => Some("&#x2F;"),
        '`' => Some("&#x60;"),
        '=' => Some("&#x3D;"),
        _ => None,
    }
}

/// Escape `& < > " ' / `` =` in a single pass
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match html_entity(c) {
            Some(entity) => escaped.push_str(entity),
            None => escaped.push(c),
        }
    }
    escaped
}

fn is_control_char(c: char) -> bool {
    let code = c as u32;
    code < 32 || code == 127
}

/// Sanitize free text with the default length limit
pub fn sanitize_input(input: &str) -> String {
    sanitize_input_with_limit(input, MAX_INPUT_LENGTH)
}

/// Strip dangerous and control characters (newline and tab survive),
/// escape HTML, then cut to `max_length` characters.
pub fn sanitize_input_with_limit(input: &str, max_length: usize) -> String {
    let stripped = DANGEROUS_CHARS.replace_all(input, "");
    let cleaned: String = stripped
        .chars()
        .filter(|c| !is_control_char(*c) || *c == '\n' || *c == '\t')
        .collect();
    truncate_input(&escape_html(&cleaned), max_length)
}

/// Cut to at most `max_length` characters
pub fn truncate_input(input: &str, max_length: usize) -> String {
    input.chars().take(max_length).collect()
}

/// Validate a filesystem-like path.
///
/// Returns an empty string when the path is too long, holds a NUL byte or a
/// `..` segment; otherwise strips `< > " | ? *`.
pub fn sanitize_path(path: &str) -> String {
    if path.chars().count() > MAX_PATH_LENGTH {
        return String::new();
    }
    if path.contains('\0') || path.contains("..") {
        return String::new();
    }
    path.chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '|' | '?' | '*'))
        .collect()
}

/// Keep only `[a-zA-Z0-9_-]`, at most 256 characters
pub fn sanitize_id(id: &str) -> String {
    id.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_ID_LENGTH)
        .collect()
}

/// True only for parseable URLs with an http, https or file scheme
pub fn is_valid_protocol(input: &str) -> bool {
    match url::Url::parse(input) {
        Ok(parsed) => ALLOWED_PROTOCOLS.contains(&parsed.scheme()),
        Err(_) => false,
    }
}

/// Escape for display after stripping dangerous characters
pub fn sanitize_for_display(input: &str) -> String {
    escape_html(&DANGEROUS_CHARS.replace_all(input, ""))
}

/// Flags script tags, script-ish schemes and inline event handlers.
///
/// Content flagging only; use the sanitizers above to clean text.
pub fn contains_dangerous_patterns(input: &str) -> bool {
    DANGEROUS_PATTERNS.is_match(input)
}
