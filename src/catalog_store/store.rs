//! Observable catalog state and the actions that update it.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use super::demo::{demo_apps, demo_categories};
use super::filters::{AppFilters, FilterUpdate};
use super::models::{AppDetails, Category};
use crate::backend::CatalogBackend;
use crate::config::BackendMode;
use crate::error_policy::StoreAction;

/// Snapshot of everything the catalog screens render.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CatalogState {
    pub apps: Vec<AppDetails>,
    pub categories: Vec<Category>,
    pub selected_app: Option<AppDetails>,
    pub filters: AppFilters,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Catalog browsing store.
///
/// All writes go through a single `watch` channel, so every observer sees
/// whole snapshots. Actions are not serialized against each other: two
/// overlapping actions both commit, and the last one to finish wins.
pub struct CatalogStore {
    backend: Arc<dyn CatalogBackend>,
    mode: BackendMode,
    state: watch::Sender<CatalogState>,
}

impl CatalogStore {
    pub fn new(backend: Arc<dyn CatalogBackend>, mode: BackendMode) -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self {
            backend,
            mode,
            state,
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    /// Returns a receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    fn update(&self, modify: impl FnOnce(&mut CatalogState)) {
        self.state.send_modify(modify);
    }

    /// Replaces the app list with the listings matching the current filters.
    /// Failures yield an empty list and never populate `error`.
    pub async fn fetch_apps(&self) {
        self.update(|state| {
            state.is_loading = true;
            state.error = None;
        });

        if self.mode.is_demo() {
            let apps = demo_apps();
            self.update(|state| {
                state.apps = apps;
                state.is_loading = false;
            });
            return;
        }

        let filters = self.state.borrow().filters.clone();
        debug!("Fetching apps with {:?}", filters);
        let apps = match self.backend.list_apps(&filters).await {
            Ok(apps) => apps,
            Err(err) => {
                StoreAction::FetchApps.handle_failure(&err);
                Vec::new()
            }
        };

        self.update(|state| {
            state.apps = apps;
            state.is_loading = false;
        });
    }

    /// Loads one app into `selected_app`. On failure `selected_app` is kept
    /// and `error` is set.
    pub async fn fetch_app(&self, id: &str) {
        self.update(|state| {
            state.is_loading = true;
            state.error = None;
        });

        debug!("Fetching app {}", id);
        match self.backend.get_app(id).await {
            Ok(app) => self.update(|state| {
                state.selected_app = Some(app);
                state.is_loading = false;
            }),
            Err(err) => {
                let message = StoreAction::FetchApp.handle_failure(&err);
                self.update(|state| {
                    state.is_loading = false;
                    state.error = message;
                });
            }
        }
    }

    /// Loads the category list. Failures are logged and leave the list as is.
    pub async fn load_categories(&self) {
        if self.mode.is_demo() {
            let categories = demo_categories();
            self.update(|state| state.categories = categories);
            return;
        }

        match self.backend.list_categories().await {
            Ok(categories) => self.update(|state| state.categories = categories),
            Err(err) => {
                StoreAction::LoadCategories.handle_failure(&err);
            }
        }
    }

    /// Merges `update` into the current filters and refetches the app list.
    pub async fn set_filters(&self, update: FilterUpdate) {
        self.update(|state| state.filters = state.filters.merge(&update));
        self.fetch_apps().await;
    }

    pub fn clear_error(&self) {
        self.update(|state| state.error = None);
    }
}
