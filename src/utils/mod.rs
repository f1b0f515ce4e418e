use std::time::SystemTime;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use time::OffsetDateTime;

/// Characters escaped when a title becomes one URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\');

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Percent-encode a title for use as a single path segment
pub fn encode_segment(title: &str) -> String {
    utf8_percent_encode(title, PATH_SEGMENT).to_string()
}

/// Link to the view of an entry
pub fn entry_href(title: &str) -> String {
    format!("/wiki/{}", encode_segment(title))
}

/// Link to the edit form of an entry
pub fn edit_href(title: &str) -> String {
    format!("/edit/{}", encode_segment(title))
}

/// Generate last modified metadata HTML
pub fn last_modified_html(modified: Option<SystemTime>) -> String {
    let Some(mtime) = modified else {
        return String::new();
    };
    let fmt = time::format_description::well_known::Rfc3339;
    match OffsetDateTime::from(mtime).format(&fmt) {
        Ok(s) => format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s)),
        Err(_) => String::new(),
    }
}

/// Normalize request path
pub fn normalize_path(path: &str) -> String {
    path.trim_matches('/').to_string()
}
