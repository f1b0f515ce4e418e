use log::debug;
use percent_encoding::percent_decode_str;
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

use crate::utils::entry_href;

/// Service for handling markdown rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownService;

impl MarkdownService {
    /// Create a new markdown service
    pub fn new() -> Self {
        Self
    }

    /// Render markdown to an HTML fragment
    pub fn render(&self, content: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);

        let parser = Parser::new_ext(content, options).map(|event| match event {
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
                link_type,
                dest_url: rewrite_entry_link(dest_url),
                title,
                id,
            }),
            other => other,
        });

        let mut out = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut out, parser);
        debug!("Rendered {} bytes of markdown into {} bytes of HTML", content.len(), out.len());
        out
    }
}

/// Relative links to `Name.md` point at the view of entry `Name`
fn rewrite_entry_link(dest: CowStr<'_>) -> CowStr<'_> {
    let Some(stem) = dest.strip_suffix(".md") else {
        return dest;
    };
    if stem.is_empty() || stem.contains("://") || stem.contains(['/', '#', '?']) || stem.starts_with('.') {
        return dest;
    }
    let href = percent_decode_str(stem)
        .decode_utf8()
        .ok()
        .map(|title| entry_href(&title));
    match href {
        Some(href) => CowStr::from(href),
        None => dest,
    }
}
