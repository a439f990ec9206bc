//! Global application state
//!
//! Wraps the `nova-login` store: network actions run on `spawn_local`, and
//! every store change is mirrored into a signal the views read from.

use leptos::prelude::*;
use leptos::task::spawn_local;
use nova_login::api::{run_action, AuthApi};
use nova_login::{AppState, LoginConfig, Store, Subscription};
use std::sync::Arc;

/// Global application state, provided as context by `App`
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<LoginConfig>,
    pub store: Store,
    /// Mirror of the store state
    pub state: RwSignal<AppState>,
    _subscription: Arc<Subscription>,
}

impl AppContext {
    pub fn new(config: Arc<LoginConfig>) -> Self {
        let config = Arc::new(resolve_base_url(&config));
        let store = Store::new();
        let state = RwSignal::new(store.state());

        let exec_config = Arc::clone(&config);
        store.set_executor(move |action, store| {
            let api = AuthApi::new(&exec_config);
            let store = store.clone();
            spawn_local(async move {
                run_action(&api, &store, action).await;
            });
        });

        let subscription = store.subscribe(move |_, snapshot| state.set(snapshot.clone()));

        Self {
            config,
            store,
            state,
            _subscription: Arc::new(subscription),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(|s| s.user.is_logged_in == nova_login::types::SessionState::LoggedIn)
    }
}

/// The HTTP client needs absolute URLs; anchor a path-only base at the
/// page origin.
fn resolve_base_url(config: &LoginConfig) -> LoginConfig {
    let mut config = config.clone();
    if config.api.base_url.starts_with('/') {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            config.api.base_url = format!("{}{}", origin, config.api.base_url);
        }
    }
    config
}
