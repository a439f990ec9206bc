//! Platform services the login view needs, and the effect runner

use super::Effect;
use crate::store::Store;

/// Browser-side services. The Leptos front end implements this over
/// `web_sys`; tests use a mock.
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    fn navigate(&self, route: &str);

    fn remove_secure_cookie(&self);

    /// Keep the user on the login page when they press Back
    fn guard_history(&self);

    fn release_history(&self);
}

/// Execute effects in order: dispatches go to the store, the rest to the host.
pub fn run_effects(host: &dyn Host, store: &Store, effects: Vec<Effect>) {
    for effect in effects {
        tracing::debug!(?effect, "running effect");
        match effect {
            Effect::Dispatch(action) => store.dispatch(action),
            Effect::Navigate(route) => host.navigate(&route),
            Effect::RemoveSecureCookie => host.remove_secure_cookie(),
            Effect::GuardHistory => host.guard_history(),
            Effect::ReleaseHistory => host.release_history(),
        }
    }
}
