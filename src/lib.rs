//! Encyclopedia - a small wiki of Markdown entries served over HTTP
//!
//! Entries live as one `<title>.md` file each. The [`services::PageService`]
//! holds the request logic; [`server::router`] exposes it through axum.

pub mod components;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod logger;
pub mod server;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use server::{router, serve};
pub use services::{EntryStore, FileEntryStore, MarkdownService, PageService, SearchService};
pub use types::{AppState, EntryForm, FormView, Outcome, View};
