//! Global application store
//!
//! A small observable store: state lives behind a `parking_lot::RwLock`,
//! changes go through [`reducer::reduce`], and subscribers are told which
//! [`Slice`]s changed. Network actions are handed to an executor installed by
//! the host; their results come back through [`Store::apply`].

pub mod reducer;

use crate::types::{CaptchaChallenge, Credential, Message, SessionState, SystemParameters};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

pub use reducer::{reduce, Outcome};

/// Session slice of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    pub is_logged_in: SessionState,
    pub username: Option<String>,
}

/// Everything the login view reads from global state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub user: UserState,
    pub captcha: Option<CaptchaChallenge>,
    pub system_param: SystemParameters,
    pub message: Message,
    /// Bumped whenever a message is written, so an identical repeat still
    /// counts as a new occurrence
    pub message_revision: u64,
    /// Global loading indicator
    pub loading: bool,
}

impl AppState {
    pub fn session(&self) -> SessionState {
        self.user.is_logged_in
    }

    pub fn is_captcha_enabled(&self) -> bool {
        self.system_param.is_captcha_enabled
    }

    /// Expected-answer hash of the current captcha, if one was fetched
    pub fn captcha_answer_hash(&self) -> Option<&str> {
        self.captcha.as_ref().map(|c| c.answer.as_str())
    }
}

/// Part of [`AppState`] that changed in an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Session,
    Captcha,
    SystemParam,
    Message,
    Loading,
}

/// Requests sent to the store. Fire-and-forget: results arrive as state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    GetSystemSetting,
    GetCaptcha,
    Login(Credential),
    LoadingManagement(bool),
    ClearMessage,
}

impl Action {
    /// Whether the action needs the network executor
    pub fn is_async(&self) -> bool {
        matches!(
            self,
            Action::GetSystemSetting | Action::GetCaptcha | Action::Login(_)
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::GetSystemSetting => "get_system_setting",
            Action::GetCaptcha => "get_captcha",
            Action::Login(_) => "login",
            Action::LoadingManagement(_) => "loading_management",
            Action::ClearMessage => "clear_message",
        }
    }
}

type Subscriber = Arc<dyn Fn(&[Slice], &AppState) + Send + Sync>;
type Executor = Arc<dyn Fn(Action, &Store) + Send + Sync>;

struct StoreInner {
    state: RwLock<AppState>,
    subscribers: RwLock<Vec<(u64, Subscriber)>>,
    executor: RwLock<Option<Executor>>,
    next_id: AtomicU64,
}

/// Cheaply cloneable handle to the global store
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                subscribers: RwLock::new(Vec::new()),
                executor: RwLock::new(None),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AppState {
        self.inner.state.read().clone()
    }

    /// Read a value out of the state without cloning all of it
    pub fn select<T>(&self, selector: impl FnOnce(&AppState) -> T) -> T {
        selector(&self.inner.state.read())
    }

    /// Install the function that runs network actions
    pub fn set_executor(&self, executor: impl Fn(Action, &Store) + Send + Sync + 'static) {
        *self.inner.executor.write() = Some(Arc::new(executor));
    }

    /// Register a listener. It stays registered until the returned guard drops.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&[Slice], &AppState) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .write()
            .push((id, Arc::new(subscriber)));

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    /// Dispatch an action.
    ///
    /// Synchronous actions are reduced immediately. Network actions go to the
    /// executor; without one they are dropped with a warning.
    pub fn dispatch(&self, action: Action) {
        tracing::debug!(action = action.name(), "dispatch");

        if action.is_async() {
            let executor = self.inner.executor.read().clone();
            match executor {
                Some(run) => run(action, self),
                None => {
                    tracing::warn!(action = action.name(), "no executor installed, action dropped")
                }
            }
            return;
        }

        match action {
            Action::LoadingManagement(flag) => self.apply(Outcome::LoadingChanged(flag)),
            Action::ClearMessage => self.apply(Outcome::MessageCleared),
            // Sent to the executor above
            Action::GetSystemSetting | Action::GetCaptcha | Action::Login(_) => {}
        }
    }

    /// Apply the result of an action and notify subscribers of changed slices
    pub fn apply(&self, outcome: Outcome) {
        let (changed, snapshot) = {
            let mut state = self.inner.state.write();
            let changed = reduce(&mut state, outcome);
            (changed, state.clone())
        };

        if changed.is_empty() {
            return;
        }

        // Call subscribers with no lock held so they may dispatch again
        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .read()
            .iter()
            .map(|(_, s)| Arc::clone(s))
            .collect();

        for subscriber in subscribers {
            subscriber(&changed, &snapshot);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.inner.state.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Guard returned by [`Store::subscribe`]
pub struct Subscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.subscribers.write().retain(|(id, _)| *id != self.id);
        }
    }
}
