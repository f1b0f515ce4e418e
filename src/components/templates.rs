use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::errors::WikiError;
use crate::types::TemplateContext;
use crate::utils::escape_html;

const STYLE: &str = "<link rel=\"stylesheet\" href=\"/static/css/encyclopedia.css\">";

/// Component for handling HTML template rendering
pub struct TemplateComponent {
    base_template: PathBuf,
}

impl TemplateComponent {
    /// Create a template component reading its shell from `static_dir/html/base.html`
    pub fn new(static_dir: &Path) -> Self {
        Self {
            base_template: static_dir.join("html").join("base.html"),
        }
    }

    /// Load and render the main HTML shell template
    pub fn render_shell_template(&self, context: &TemplateContext) -> Result<String, WikiError> {
        let title = escape_html(&context.title);

        match fs::read_to_string(&self.base_template) {
            Ok(base) => {
                if !base.contains("{{CONTENT}}") {
                    return Err(WikiError::Template(format!(
                        "{} has no {{{{CONTENT}}}} placeholder",
                        self.base_template.display()
                    )));
                }
                return Ok(base
                    .replace("{{TITLE}}", &title)
                    .replace("{{STYLE}}", STYLE)
                    .replace("{{SIDEBAR}}", &context.sidebar)
                    .replace("{{FAB}}", &context.fab)
                    .replace("{{CONTENT}}", &context.content));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No shell template at {:?}, using inline shell", self.base_template);
            }
            Err(e) => {
                warn!("Failed to read shell template {:?}: {}", self.base_template, e);
            }
        }

        // Fallback inline shell
        Ok(format!(
            "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>{}</title>{}</head><body><div class=\"layout\"><aside class=\"sidebar\">{}</aside><main class=\"content\"><div class=\"article-card\">{}</div></main></div>{}</body></html>",
            title, STYLE, context.sidebar, context.content, context.fab
        ))
    }

    /// Generate a complete page with navigation and content
    pub fn render_page(
        &self,
        navigation: &str,
        content: &str,
        fab: &str,
        title: &str,
    ) -> Result<String, WikiError> {
        let context = TemplateContext {
            title: title.to_string(),
            content: content.to_string(),
            sidebar: navigation.to_string(),
            fab: fab.to_string(),
        };

        self.render_shell_template(&context)
    }
}
