use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::{Router, routing::get};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::errors::WikiError;
use crate::handlers;
use crate::services::{EntryStore, FileEntryStore};
use crate::types::AppState;

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>, static_dir: PathBuf, rng: StdRng) -> Self {
        Self {
            store,
            static_dir: Arc::new(static_dir),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Open the file store and seed the random picker as configured
    pub fn from_config(config: &Config) -> Result<Self, WikiError> {
        let store = FileEntryStore::open(&config.entries_dir)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::new(Arc::new(store), config.static_dir.clone(), rng))
    }
}

/// All routes of the encyclopedia
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/wiki/:title", get(handlers::handle_entry))
        .route("/search", get(handlers::handle_search))
        .route("/create", get(handlers::handle_create_form).post(handlers::handle_create))
        .route("/random", get(handlers::handle_random))
        .route("/edit/:title", get(handlers::handle_edit_form).post(handlers::handle_edit))
        .route("/static/*path", get(handlers::handle_static))
        .fallback(handlers::handle_not_found)
        .with_state(state)
}

/// Bind the configured address and serve until the process is stopped
pub async fn serve(config: &Config) -> Result<(), WikiError> {
    let state = AppState::from_config(config)?;
    let app = router(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Encyclopedia listening on http://{}", addr);
    info!("Serving entries from {:?}", config.entries_dir);
    axum::serve(listener, app).await.map_err(WikiError::from)
}
