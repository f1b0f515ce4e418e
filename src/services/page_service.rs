use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::errors::WikiError;
use crate::services::{EntryStore, MarkdownService, SearchOutcome, SearchService, validate_title};
use crate::types::{EntryForm, FormView, Outcome, View};

pub const FIELDS_REQUIRED: &str = "Both title and content are required.";

/// Request-level operations of the encyclopedia.
///
/// Every operation returns either a view to render or a redirect to an
/// entry. User mistakes (missing pages, blank fields, title clashes) become
/// views; only store failures come back as `Err`.
pub struct PageService<'a> {
    store: &'a dyn EntryStore,
    markdown: MarkdownService,
    search: SearchService,
}

impl<'a> PageService<'a> {
    pub fn new(store: &'a dyn EntryStore) -> Self {
        Self {
            store,
            markdown: MarkdownService::new(),
            search: SearchService::new(),
        }
    }

    /// All titles, in store order
    pub fn list(&self) -> Result<View, WikiError> {
        let entries = self.store.list_entries()?;
        debug!("Index lists {} entries", entries.len());
        Ok(View::Index { entries })
    }

    pub fn view(&self, title: &str) -> Result<View, WikiError> {
        let Ok(title) = validate_title(title) else {
            return Ok(not_found(title.trim()));
        };
        let Some(content) = self.store.get_entry(title)? else {
            warn!("Entry not found: '{}'", title);
            return Ok(not_found(title));
        };

        Ok(View::Entry {
            title: title.to_string(),
            html: self.markdown.render(&content),
            modified: self.store.last_modified(title),
        })
    }

    pub fn search(&self, query: &str) -> Result<Outcome, WikiError> {
        let titles = self.store.list_entries()?;
        let outcome = match self.search.search(titles, query) {
            SearchOutcome::All => Outcome::Render(self.list()?),
            SearchOutcome::ExactHit(title) => Outcome::Redirect(title),
            SearchOutcome::Matches(matches) => Outcome::Render(View::Search {
                query: query.trim().to_string(),
                matches,
            }),
            SearchOutcome::NoMatch => Outcome::Render(View::message(
                "No Results",
                format!("No page found for '{}'.", query.trim()),
            )),
        };
        Ok(outcome)
    }

    /// Blank creation form
    pub fn create_form(&self) -> View {
        View::Create(FormView::default())
    }

    pub fn create(&self, form: &EntryForm) -> Result<Outcome, WikiError> {
        let Some((title, content)) = form.filled() else {
            return Ok(Outcome::Render(View::Create(submitted(form, FIELDS_REQUIRED))));
        };
        if let Err(e) = validate_title(title) {
            return Ok(Outcome::Render(View::Create(submitted(form, &invalid_title(&e)))));
        }

        if self.store.get_entry(title)?.is_some() {
            warn!("Refusing to create existing entry '{}'", title);
            return Ok(Outcome::Render(View::message("Page Exists", already_exists(title))));
        }

        self.store.save_entry(title, content)?;
        info!("Created entry '{}'", title);
        Ok(Outcome::Redirect(title.to_string()))
    }

    /// Edit form pre-filled with the stored entry
    pub fn edit_form(&self, title: &str) -> Result<View, WikiError> {
        let Ok(title) = validate_title(title) else {
            return Ok(not_editable(title.trim()));
        };
        let Some(content) = self.store.get_entry(title)? else {
            return Ok(not_editable(title));
        };
        Ok(View::Edit {
            target: title.to_string(),
            form: FormView {
                title: title.to_string(),
                content,
                error: None,
            },
        })
    }

    /// Replace the content of `title`, moving it when the form names a new title
    pub fn edit(&self, title: &str, form: &EntryForm) -> Result<Outcome, WikiError> {
        let Ok(title) = validate_title(title) else {
            return Ok(Outcome::Render(not_editable(title.trim())));
        };
        let Some(original) = self.store.get_entry(title)? else {
            warn!("Edit submitted for missing entry '{}'", title);
            return Ok(Outcome::Render(not_editable(title)));
        };
        let edit_view = |form: FormView| {
            Outcome::Render(View::Edit {
                target: title.to_string(),
                form,
            })
        };

        let Some((new_title, new_content)) = form.filled() else {
            return Ok(edit_view(FormView {
                title: title.to_string(),
                content: original,
                error: Some(FIELDS_REQUIRED.to_string()),
            }));
        };
        if let Err(e) = validate_title(new_title) {
            return Ok(edit_view(submitted(form, &invalid_title(&e))));
        }

        if new_title != title {
            let taken = self.store.list_entries()?.iter().any(|t| t == new_title);
            if taken {
                warn!("Refusing to rename '{}' onto existing entry '{}'", title, new_title);
                return Ok(edit_view(submitted(form, &already_exists(new_title))));
            }
            self.store.move_entry(title, new_title, new_content)?;
        } else {
            self.store.save_entry(new_title, new_content)?;
        }
        info!("Edited entry '{}'", new_title);
        Ok(Outcome::Redirect(new_title.to_string()))
    }

    /// Pick one title uniformly at random
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Outcome, WikiError> {
        let titles = self.store.list_entries()?;
        match titles.choose(rng) {
            Some(title) => {
                debug!("Random pick: '{}' of {}", title, titles.len());
                Ok(Outcome::Redirect(title.clone()))
            }
            None => Ok(Outcome::Render(View::message(
                "No Pages",
                "There are no pages yet, so there is no page to pick.",
            ))),
        }
    }
}

fn not_found(title: &str) -> View {
    View::message("Page Not Found", format!("The page '{title}' was not found."))
}

fn not_editable(title: &str) -> View {
    View::message(
        "Page Not Found",
        format!("The page '{title}' does not exist and cannot be edited."),
    )
}

fn already_exists(title: &str) -> String {
    format!("A page with the title '{title}' already exists.")
}

fn invalid_title(err: &WikiError) -> String {
    match err {
        WikiError::InvalidTitle(title) => format!(
            "'{}' cannot be used as a title. Titles may not start with '.' or contain slashes, and must fit in a file name.",
            title.trim()
        ),
        other => other.to_string(),
    }
}

/// Echo the submitted values back with an error
fn submitted(form: &EntryForm, error: &str) -> FormView {
    FormView {
        title: form.title.clone().unwrap_or_default(),
        content: form.content.clone().unwrap_or_default(),
        error: Some(error.to_string()),
    }
}
