//! State transitions for the global store

use super::{AppState, Slice};
use crate::types::{CaptchaChallenge, ErrorModel, Message, SessionState, SystemParameters};

/// Result of an action, applied to the store by [`reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    SystemSettingLoaded(SystemParameters),
    CaptchaLoaded(CaptchaChallenge),
    LoginSucceeded { username: Option<String> },
    LoginFailed(ErrorModel),
    /// A non-login request failed; only the message slot changes
    RequestFailed(ErrorModel),
    LoadingChanged(bool),
    MessageShown(Message),
    MessageCleared,
}

/// Apply `outcome` to `state`, returning the slices whose value changed.
pub fn reduce(state: &mut AppState, outcome: Outcome) -> Vec<Slice> {
    let before = state.clone();
    // Every failure is a new occurrence, even when it repeats the last one
    let failure = matches!(outcome, Outcome::LoginFailed(_) | Outcome::RequestFailed(_));

    match outcome {
        Outcome::SystemSettingLoaded(params) => {
            state.system_param = params;
        }
        Outcome::CaptchaLoaded(captcha) => {
            state.captcha = Some(captcha);
        }
        Outcome::LoginSucceeded { username } => {
            state.user.is_logged_in = SessionState::LoggedIn;
            state.user.username = username;
            state.message = Message::default();
        }
        Outcome::LoginFailed(error) => {
            state.user.is_logged_in = SessionState::LoggedOut;
            state.user.username = None;
            state.message = Message::error(error);
        }
        Outcome::RequestFailed(error) => {
            state.message = Message::error(error);
        }
        Outcome::LoadingChanged(flag) => {
            state.loading = flag;
        }
        Outcome::MessageShown(message) => {
            state.message = message;
        }
        Outcome::MessageCleared => {
            state.message = Message::default();
        }
    }

    if failure || state.message != before.message {
        state.message_revision = before.message_revision.wrapping_add(1);
    }

    changed_slices(&before, state)
}

fn changed_slices(before: &AppState, after: &AppState) -> Vec<Slice> {
    let mut changed = Vec::new();
    if before.user.is_logged_in != after.user.is_logged_in {
        changed.push(Slice::Session);
    }
    if before.captcha != after.captcha {
        changed.push(Slice::Captcha);
    }
    if before.system_param != after.system_param {
        changed.push(Slice::SystemParam);
    }
    if before.message_revision != after.message_revision {
        changed.push(Slice::Message);
    }
    if before.loading != after.loading {
        changed.push(Slice::Loading);
    }
    changed
}
