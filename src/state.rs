use axum::extract::FromRef;

use crate::config::Config;
use crate::session::Sessions;
use crate::store::JsonStore;

#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub sessions: Sessions,
    pub config: Config,
}

impl FromRef<AppState> for JsonStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Sessions {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
