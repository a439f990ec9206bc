//! Reactive rules of the login view
//!
//! Each rule maps a change in one piece of global state to a list of
//! [`Effect`]s. Rules hold only the memory they need about previous
//! messages; they never touch the store or the host themselves.

use super::Effect;
use crate::store::Action;
use crate::types::{Message, MessageKind, SessionState};
use crate::utils::config::LoginConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginReactions {
    /// Kind of the message seen before the current one
    prev_kind: Option<MessageKind>,
    /// Error code of the message seen before the current one
    prev_code: Option<String>,
    /// Most recent error code ever seen; survives cleared messages
    last_error_code: Option<String>,
    last_session: Option<SessionState>,
    last_captcha_enabled: Option<bool>,
}

/// Result of the message rules, before they are turned into effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageReaction {
    pub clear_captcha_answer: bool,
    pub refresh_captcha: bool,
}

impl LoginReactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules that run when the view mounts.
    pub fn on_mount(&mut self, current_message: &Message) -> Vec<Effect> {
        self.record_message(current_message);
        vec![
            Effect::Dispatch(Action::GetSystemSetting),
            Effect::GuardHistory,
        ]
    }

    pub fn on_unmount(&mut self) -> Vec<Effect> {
        vec![Effect::ReleaseHistory]
    }

    /// Session rule. Fires once per distinct session value.
    pub fn on_session_change(&mut self, session: SessionState, config: &LoginConfig) -> Vec<Effect> {
        if self.last_session == Some(session) {
            return Vec::new();
        }
        self.last_session = Some(session);

        match session {
            SessionState::LoggedIn => vec![Effect::Navigate(config.routes.home.clone())],
            SessionState::Unknown => vec![Effect::RemoveSecureCookie],
            SessionState::LoggedOut => vec![Effect::Dispatch(Action::LoadingManagement(false))],
        }
    }

    /// Both message rules, evaluated against the same pre-transition snapshot.
    ///
    /// Clearing: a message carrying the invalid-answer code empties the
    /// captcha field. Refreshing: a message cleared after an error, or any
    /// message replacing a refresh-code error, fetches one new captcha.
    pub fn on_message_change(
        &mut self,
        message: &Message,
        captcha_enabled: bool,
        config: &LoginConfig,
    ) -> MessageReaction {
        let codes = &config.captcha;
        let code = message.error_code();

        let clear_captcha_answer = code == Some(codes.invalid_answer_code.as_str());

        let cleared_after_error =
            message.is_cleared() && self.prev_kind == Some(MessageKind::Error);
        // A repeated refresh-code error still replaces the previous occurrence
        let leaving_refresh_error = self.prev_code.as_deref() == Some(codes.refresh_code.as_str());
        let refresh_captcha = captcha_enabled && (cleared_after_error || leaving_refresh_error);

        self.record_message(message);

        MessageReaction {
            clear_captcha_answer,
            refresh_captcha,
        }
    }

    /// Fetch a captcha when the server switches the captcha requirement on.
    pub fn on_captcha_flag_change(&mut self, enabled: bool) -> Vec<Effect> {
        if self.last_captcha_enabled == Some(enabled) {
            return Vec::new();
        }
        self.last_captcha_enabled = Some(enabled);

        if enabled {
            vec![Effect::Dispatch(Action::GetCaptcha)]
        } else {
            Vec::new()
        }
    }

    /// The captcha answer is required when the server asks for it or the
    /// last error was a wrong answer.
    pub fn captcha_required(&self, captcha_enabled: bool, config: &LoginConfig) -> bool {
        captcha_enabled
            || self.last_error_code.as_deref() == Some(config.captcha.invalid_answer_code.as_str())
    }

    pub fn last_error_code(&self) -> Option<&str> {
        self.last_error_code.as_deref()
    }

    fn record_message(&mut self, message: &Message) {
        self.prev_kind = message.kind;
        self.prev_code = message.error_code().map(str::to_string);
        if let Some(code) = &self.prev_code {
            self.last_error_code = Some(code.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorModel;

    fn error(code: &str) -> Message {
        Message::error(ErrorModel::new(code, "failed"))
    }

    #[test]
    fn test_mount_requests_system_setting() {
        let mut rules = LoginReactions::new();
        let effects = rules.on_mount(&Message::default());

        assert_eq!(
            effects,
            vec![Effect::Dispatch(Action::GetSystemSetting), Effect::GuardHistory]
        );
    }

    #[test]
    fn test_session_rule_fires_once_per_value() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        assert_eq!(
            rules.on_session_change(SessionState::LoggedIn, &config),
            vec![Effect::Navigate("/sokan/home".to_string())]
        );
        assert!(rules.on_session_change(SessionState::LoggedIn, &config).is_empty());
    }

    #[test]
    fn test_session_unknown_removes_cookie() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        assert_eq!(
            rules.on_session_change(SessionState::Unknown, &config),
            vec![Effect::RemoveSecureCookie]
        );
    }

    #[test]
    fn test_session_logged_out_stops_loading() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        assert_eq!(
            rules.on_session_change(SessionState::LoggedOut, &config),
            vec![Effect::Dispatch(Action::LoadingManagement(false))]
        );
    }

    #[test]
    fn test_invalid_answer_clears_field_and_requires_captcha() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        let reaction = rules.on_message_change(&error("2038"), false, &config);

        assert!(reaction.clear_captcha_answer);
        assert!(!reaction.refresh_captcha);
        assert!(rules.captcha_required(false, &config));
    }

    #[test]
    fn test_invalid_answer_requirement_survives_cleared_message() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        rules.on_message_change(&error("2038"), true, &config);
        rules.on_message_change(&Message::default(), true, &config);

        assert!(rules.captcha_required(false, &config));
        assert_eq!(rules.last_error_code(), Some("2038"));
    }

    #[test]
    fn test_cleared_after_error_refreshes_once() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        let on_error = rules.on_message_change(&error("2026"), true, &config);
        assert!(!on_error.refresh_captcha);

        let on_clear = rules.on_message_change(&Message::default(), true, &config);
        assert!(on_clear.refresh_captcha);

        // The refresh code is consumed; later transitions do not refetch
        let later = rules.on_message_change(
            &Message::text(MessageKind::Info, "welcome"),
            true,
            &config,
        );
        assert!(!later.refresh_captcha);
    }

    #[test]
    fn test_leaving_refresh_error_for_another_error_refreshes() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        rules.on_message_change(&error("2026"), true, &config);
        let reaction = rules.on_message_change(&error("2001"), true, &config);

        assert!(reaction.refresh_captcha);
    }

    #[test]
    fn test_repeated_refresh_error_refreshes_per_occurrence() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        assert!(!rules.on_message_change(&error("2026"), true, &config).refresh_captcha);
        assert!(rules.on_message_change(&error("2026"), true, &config).refresh_captcha);
        assert!(rules.on_message_change(&Message::default(), true, &config).refresh_captcha);
        assert!(!rules.on_message_change(&Message::default(), true, &config).refresh_captcha);
    }

    #[test]
    fn test_repeated_invalid_answer_clears_each_time() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        assert!(rules.on_message_change(&error("2038"), true, &config).clear_captcha_answer);
        assert!(rules.on_message_change(&error("2038"), true, &config).clear_captcha_answer);
    }

    #[test]
    fn test_no_refresh_when_captcha_disabled() {
        let config = LoginConfig::default();
        let mut rules = LoginReactions::new();

        rules.on_message_change(&error("2026"), false, &config);
        let reaction = rules.on_message_change(&Message::default(), false, &config);

        assert!(!reaction.refresh_captcha);
    }

    #[test]
    fn test_captcha_flag_fetches_on_enable_only() {
        let mut rules = LoginReactions::new();

        assert!(rules.on_captcha_flag_change(false).is_empty());
        assert_eq!(
            rules.on_captcha_flag_change(true),
            vec![Effect::Dispatch(Action::GetCaptcha)]
        );
        assert!(rules.on_captcha_flag_change(true).is_empty());
    }
}
