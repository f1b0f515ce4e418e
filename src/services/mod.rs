pub mod entry_store;
pub mod markdown_service;
pub mod page_service;
pub mod search_service;

pub use entry_store::{EntryStore, FileEntryStore, validate_title};
pub use markdown_service::MarkdownService;
pub use page_service::PageService;
pub use search_service::{SearchOutcome, SearchService};
