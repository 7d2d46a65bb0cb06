use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::content_loader::PageShells;

pub type RefreshBroadcaster = broadcast::Sender<()>;

pub struct AppState {
    pub shells: RwLock<PageShells>,
    pub site: RwLock<SiteConfig>,
    /// Deliberately not behind a lock: the catalog is built once at startup
    /// and is never written again.
    pub catalog: Catalog,
    pub is_development: bool,
}

#[derive(Clone)]
pub struct RouterState {
    pub app_state: Arc<AppState>,
    pub broadcaster: RefreshBroadcaster,
}

impl axum::extract::FromRef<RouterState> for Arc<AppState> {
    fn from_ref(state: &RouterState) -> Self {
        state.app_state.clone()
    }
}

impl axum::extract::FromRef<RouterState> for RefreshBroadcaster {
    fn from_ref(state: &RouterState) -> Self {
        state.broadcaster.clone()
    }
}
