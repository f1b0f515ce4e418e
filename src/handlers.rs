use std::path::{Component, Path};
use std::sync::PoisonError;

use axum::{
    body::Body,
    extract::{Form, Path as AxumPath, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use log::{debug, info, warn};

use crate::components::{FabComponent, NavigationComponent, TemplateComponent, render_view};
use crate::errors::WikiError;
use crate::services::PageService;
use crate::types::{AppState, EntryForm, Outcome, SearchParams, View};
use crate::utils::{entry_href, normalize_path};

/// Longest search query honoured; longer input is cut at a char boundary
const MAX_QUERY_CHARS: usize = 1000;

/// Wrap a view in the page shell
fn render_page(state: &AppState, view: &View, status: StatusCode) -> Result<Response, WikiError> {
    let rendered = render_view(view);

    let sidebar = NavigationComponent::new().build_sidebar_html(rendered.nav_path, &rendered.query);
    let fab = FabComponent::new();
    let actions = rendered
        .entry
        .as_deref()
        .map(|title| fab.generate_actions(title))
        .unwrap_or_default();
    let fab_html = fab.generate_fab_html(&actions);

    let templates = TemplateComponent::new(&state.static_dir);
    let page = templates.render_page(&sidebar, &rendered.body, &fab_html, &rendered.title)?;
    Ok((status, Html(page)).into_response())
}

fn respond(state: &AppState, outcome: Outcome) -> Result<Response, WikiError> {
    match outcome {
        Outcome::Redirect(title) => {
            debug!("Redirecting to entry '{}'", title);
            Ok(Redirect::to(&entry_href(&title)).into_response())
        }
        Outcome::Render(view) => render_page(state, &view, StatusCode::OK),
    }
}

/// Handle root path requests: the list of every entry
pub async fn handle_root(State(state): State<AppState>) -> Result<Response, WikiError> {
    info!("Index request received");
    let view = PageService::new(state.store.as_ref()).list()?;
    render_page(&state, &view, StatusCode::OK)
}

/// Handle entry page requests
pub async fn handle_entry(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
) -> Result<Response, WikiError> {
    info!("Entry request received: '{}'", title);
    let view = PageService::new(state.store.as_ref()).view(&title)?;
    render_page(&state, &view, StatusCode::OK)
}

/// Handle search requests
pub async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, WikiError> {
    let raw = params.q.unwrap_or_default();
    let query = match raw.char_indices().nth(MAX_QUERY_CHARS) {
        Some((cut, _)) => {
            warn!("Very long search query received ({} bytes), truncating", raw.len());
            &raw[..cut]
        }
        None => raw.as_str(),
    };
    info!("Search request received for query: '{}'", query);

    let start_time = std::time::Instant::now();
    let outcome = PageService::new(state.store.as_ref()).search(query)?;
    debug!("Search request completed in {}ms", start_time.elapsed().as_millis());

    respond(&state, outcome)
}

/// Handle requests for the blank creation form
pub async fn handle_create_form(State(state): State<AppState>) -> Result<Response, WikiError> {
    let view = PageService::new(state.store.as_ref()).create_form();
    render_page(&state, &view, StatusCode::OK)
}

/// Handle creation form submissions
pub async fn handle_create(
    State(state): State<AppState>,
    Form(form): Form<EntryForm>,
) -> Result<Response, WikiError> {
    info!("Create submitted for title: {:?}", form.title);
    let outcome = PageService::new(state.store.as_ref()).create(&form)?;
    respond(&state, outcome)
}

/// Handle random page requests: redirect to a random entry
pub async fn handle_random(State(state): State<AppState>) -> Result<Response, WikiError> {
    let outcome = {
        let mut rng = state.rng.lock().unwrap_or_else(PoisonError::into_inner);
        PageService::new(state.store.as_ref()).random(&mut *rng)?
    };
    respond(&state, outcome)
}

/// Handle requests for the edit form of an entry
pub async fn handle_edit_form(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
) -> Result<Response, WikiError> {
    info!("Edit form requested for '{}'", title);
    let view = PageService::new(state.store.as_ref()).edit_form(&title)?;
    render_page(&state, &view, StatusCode::OK)
}

/// Handle edit form submissions
pub async fn handle_edit(
    State(state): State<AppState>,
    AxumPath(title): AxumPath<String>,
    Form(form): Form<EntryForm>,
) -> Result<Response, WikiError> {
    info!("Edit submitted for '{}' with title: {:?}", title, form.title);
    let outcome = PageService::new(state.store.as_ref()).edit(&title, &form)?;
    respond(&state, outcome)
}

/// Handle static file requests
pub async fn handle_static(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, WikiError> {
    let normalized = normalize_path(&path);
    let relative = Path::new(&normalized);
    if !relative.components().all(|c| matches!(c, Component::Normal(_))) {
        warn!("Rejected static path: '{}'", path);
        return Err(WikiError::InvalidPath);
    }

    let requested = state.static_dir.join(relative);
    if !requested.is_file() {
        return Err(WikiError::NotFound);
    }

    let bytes = std::fs::read(&requested)?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&requested))], Body::from(bytes)).into_response())
}

/// Anything no route matched
pub async fn handle_not_found(State(state): State<AppState>) -> Result<Response, WikiError> {
    let view = View::message("Page Not Found", "The requested page could not be found.");
    render_page(&state, &view, StatusCode::NOT_FOUND)
}

/// Determine content type for a file based on its extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase()) {
        Some(ref ext) if ext == "html" => "text/html; charset=utf-8",
        Some(ref ext) if ext == "css" => "text/css; charset=utf-8",
        Some(ref ext) if ext == "js" => "application/javascript; charset=utf-8",
        Some(ref ext) if ext == "svg" => "image/svg+xml",
        Some(ref ext) if ext == "png" => "image/png",
        Some(ref ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ref ext) if ext == "ico" => "image/x-icon",
        Some(ref ext) if ext == "txt" || ext == "md" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}
