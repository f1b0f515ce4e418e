use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use rand::rngs::StdRng;
use serde::Deserialize;

use crate::services::EntryStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub static_dir: Arc<PathBuf>,
    pub rng: Arc<Mutex<StdRng>>,
}

/// Submitted create/edit form. Absent and blank fields are both "missing".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl EntryForm {
    pub fn new(title: &str, content: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
        }
    }

    /// Both fields, trimmed title first, when neither is blank
    pub fn filled(&self) -> Option<(&str, &str)> {
        let title = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let content = self.content.as_deref().filter(|c| !c.trim().is_empty())?;
        Some((title, content))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Values shown in the create and edit forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub content: String,
    pub error: Option<String>,
}

/// Everything a page service operation can ask the presentation layer to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Index {
        entries: Vec<String>,
    },
    Entry {
        title: String,
        html: String,
        modified: Option<SystemTime>,
    },
    Search {
        query: String,
        matches: Vec<String>,
    },
    Create(FormView),
    Edit {
        /// Title the form posts back to
        target: String,
        form: FormView,
    },
    Message {
        heading: String,
        message: String,
    },
}

impl View {
    pub fn message(heading: &str, message: impl Into<String>) -> Self {
        View::Message {
            heading: heading.to_string(),
            message: message.into(),
        }
    }
}

/// Result of a page service operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(View),
    /// Send the client to the view of this title
    Redirect(String),
}

/// Template rendering context
#[derive(Debug, Clone)]
pub struct TemplateContext {
    pub title: String,
    pub content: String,
    pub sidebar: String,
    pub fab: String,
}
