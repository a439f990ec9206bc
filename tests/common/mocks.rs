//! Mock host and a small harness that wires a `LoginView` to a `Store`.
//!
//! The harness plays the part of the front end: it forwards store
//! notifications to the view and runs every returned effect, recording host
//! calls and the actions that reached the executor.

use nova_login::login::form::Field;
use nova_login::{run_effects, Action, AppState, Host, LoginConfig, LoginView, Outcome, Store};
use parking_lot::Mutex;
use std::sync::Arc;

/// A host call, in the order it was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Navigate(String),
    RemoveSecureCookie,
    GuardHistory,
    ReleaseHistory,
}

/// Host that records every call.
#[derive(Clone, Default)]
pub struct RecordingHost {
    calls: Arc<Mutex<Vec<HostCall>>>,
}

impl RecordingHost {
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                HostCall::Navigate(route) => Some(route.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn navigate(&self, route: &str) {
        self.calls.lock().push(HostCall::Navigate(route.to_string()));
    }

    fn remove_secure_cookie(&self) {
        self.calls.lock().push(HostCall::RemoveSecureCookie);
    }

    fn guard_history(&self) {
        self.calls.lock().push(HostCall::GuardHistory);
    }

    fn release_history(&self) {
        self.calls.lock().push(HostCall::ReleaseHistory);
    }
}

/// Store + view + host, driven synchronously.
pub struct LoginHarness {
    pub store: Store,
    pub host: RecordingHost,
    pub view: Arc<Mutex<LoginView>>,
    executed: Arc<Mutex<Vec<Action>>>,
    _subscription: nova_login::Subscription,
}

impl LoginHarness {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        let store = Store::with_state(state);
        let host = RecordingHost::default();
        let view = Arc::new(Mutex::new(LoginView::new(Arc::new(LoginConfig::default()))));
        let executed = Arc::new(Mutex::new(Vec::new()));

        let executed_clone = Arc::clone(&executed);
        store.set_executor(move |action, _| executed_clone.lock().push(action));

        // Effects are collected under the view lock and run after it is released
        let sub_view = Arc::clone(&view);
        let sub_host = host.clone();
        let sub_store = store.clone();
        let subscription = store.subscribe(move |slices, state| {
            let effects = sub_view.lock().on_state_change(slices, state);
            run_effects(&sub_host, &sub_store, effects);
        });

        Self {
            store,
            host,
            view,
            executed,
            _subscription: subscription,
        }
    }

    pub fn mount(&self) {
        let effects = self.view.lock().mount(&self.store.state());
        run_effects(&self.host, &self.store, effects);
    }

    pub fn unmount(&self) {
        let effects = self.view.lock().unmount();
        run_effects(&self.host, &self.store, effects);
    }

    pub fn type_into(&self, field: Field, value: &str) {
        self.view.lock().set_field(field, value, &self.store.state());
    }

    pub fn submit(&self) {
        let effects = self.view.lock().submit(&self.store.state());
        run_effects(&self.host, &self.store, effects);
    }

    pub fn press_global_key(&self, key: &str) {
        let effects = self.view.lock().on_global_key_down(key, &self.store.state());
        run_effects(&self.host, &self.store, effects);
    }

    pub fn apply(&self, outcome: Outcome) {
        self.store.apply(outcome);
    }

    /// Actions handed to the network executor so far
    pub fn executed(&self) -> Vec<Action> {
        self.executed.lock().clone()
    }

    pub fn count_executed(&self, action: &Action) -> usize {
        self.executed.lock().iter().filter(|a| *a == action).count()
    }

    pub fn login_requests(&self) -> Vec<nova_login::types::Credential> {
        self.executed
            .lock()
            .iter()
            .filter_map(|a| match a {
                Action::Login(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn field(&self, field: Field) -> String {
        self.view.lock().form().value(field).to_string()
    }

    pub fn visible_error(&self, field: Field) -> Option<String> {
        self.view.lock().form().visible_error(field).map(str::to_string)
    }
}
