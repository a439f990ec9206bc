//! Login view-model
//!
//! [`LoginView`] owns the local form state and turns user input and global
//! state changes into [`Effect`]s. It never performs I/O: the host runs the
//! returned effects with [`host::run_effects`] after each call, which keeps
//! the whole flow testable without a browser.
//!
//! ```rust,ignore
//! let mut view = LoginView::new(Arc::new(LoginConfig::default()));
//! run_effects(&host, &store, view.mount(&store.state()));
//!
//! view.set_field(Field::Username, "admin", &store.state());
//! view.set_field(Field::Password, "secret", &store.state());
//! run_effects(&host, &store, view.submit(&store.state()));
//! ```

pub mod form;
pub mod host;
pub mod keyboard;
pub mod reactions;
pub mod validation;

use crate::store::{Action, AppState, Slice};
use crate::types::{Credential, Message, SessionState};
use crate::utils::config::LoginConfig;
use form::{Field, LoginForm};
use keyboard::{KeyDownOutcome, KeyStroke, KeyboardLanguage};
use reactions::LoginReactions;
use std::sync::Arc;
use validation::{Schema, ValidationContext};

pub use host::{run_effects, Host};

/// Side effect requested by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Dispatch(Action),
    Navigate(String),
    RemoveSecureCookie,
    GuardHistory,
    ReleaseHistory,
}

/// Keys of the global listener that submit the form
const SUBMIT_KEYS: [&str; 2] = ["Enter", "NumpadEnter"];

#[derive(Debug, Clone)]
pub struct LoginView {
    config: Arc<LoginConfig>,
    schema: Schema,
    form: LoginForm,
    reactions: LoginReactions,
    keyboard: KeyboardLanguage,
}

impl LoginView {
    pub fn new(config: Arc<LoginConfig>) -> Self {
        let schema = Schema::login(&config.messages);
        Self {
            config,
            schema,
            form: LoginForm::new(),
            reactions: LoginReactions::new(),
            keyboard: KeyboardLanguage::English,
        }
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    // ============= Lifecycle =============

    /// Mount rules plus the first run of the session and captcha-flag rules.
    pub fn mount(&mut self, state: &AppState) -> Vec<Effect> {
        tracing::debug!(session = ?state.session(), "login view mounted");

        let mut effects = self.reactions.on_mount(&state.message);
        effects.extend(self.on_session_change(state.session()));
        effects.extend(self.on_captcha_flag_change(state.is_captcha_enabled()));
        effects
    }

    pub fn unmount(&mut self) -> Vec<Effect> {
        tracing::debug!("login view unmounted");
        self.reactions.on_unmount()
    }

    /// Route a store notification to the matching rules.
    pub fn on_state_change(&mut self, slices: &[Slice], state: &AppState) -> Vec<Effect> {
        let mut effects = Vec::new();

        if slices.contains(&Slice::Session) {
            effects.extend(self.on_session_change(state.session()));
        }
        if slices.contains(&Slice::SystemParam) {
            effects.extend(self.on_captcha_flag_change(state.is_captcha_enabled()));
        }
        if slices.contains(&Slice::Message) {
            effects.extend(self.on_message_change(&state.message, state));
        }

        effects
    }

    pub fn on_session_change(&mut self, session: SessionState) -> Vec<Effect> {
        self.reactions.on_session_change(session, &self.config)
    }

    pub fn on_captcha_flag_change(&mut self, enabled: bool) -> Vec<Effect> {
        self.reactions.on_captcha_flag_change(enabled)
    }

    pub fn on_message_change(&mut self, message: &Message, state: &AppState) -> Vec<Effect> {
        let reaction =
            self.reactions
                .on_message_change(message, state.is_captcha_enabled(), &self.config);

        if reaction.clear_captcha_answer {
            tracing::info!("captcha answer rejected, clearing field");
            self.form.set_value(Field::CaptchaUserAnswer, "");
            self.revalidate(state);
        }

        // A wrong answer while the server has captcha switched off still
        // needs a challenge to answer
        let needs_challenge = reaction.clear_captcha_answer
            && !state.is_captcha_enabled()
            && state.captcha.is_none();

        if reaction.refresh_captcha || needs_challenge {
            vec![Effect::Dispatch(Action::GetCaptcha)]
        } else {
            Vec::new()
        }
    }

    // ============= Input =============

    pub fn set_field(&mut self, field: Field, value: impl Into<String>, state: &AppState) {
        self.form.set_value(field, value);
        self.revalidate(state);
    }

    pub fn blur(&mut self, field: Field) {
        self.form.touch(field);
    }

    /// Classify a key-down in a credential field and remember the layout.
    pub fn key_down(&mut self, field: Field, stroke: &KeyStroke) -> KeyDownOutcome {
        let language = keyboard::classify(stroke);
        self.keyboard = language;
        self.form.set_language(language.label(&self.config.messages));

        if !language.is_english() {
            tracing::debug!(field = field.name(), ?language, "blocked non-English key");
        }

        KeyDownOutcome {
            language,
            prevent_default: !language.is_english(),
        }
    }

    pub fn keyboard_language(&self) -> KeyboardLanguage {
        self.keyboard
    }

    /// Banner text shown while a non-English layout is active
    pub fn keyboard_warning(&self) -> Option<String> {
        if self.keyboard.is_english() {
            return None;
        }
        self.form
            .language()
            .map(|label| format!("{} {}", self.config.messages.keyboard_banner, label))
    }

    /// Global key listener: submit on Enter.
    pub fn on_global_key_down(&mut self, key: &str, state: &AppState) -> Vec<Effect> {
        if SUBMIT_KEYS.contains(&key) {
            self.submit(state)
        } else {
            Vec::new()
        }
    }

    // ============= Captcha =============

    /// Whether the captcha block is rendered. Follows the validation
    /// requirement so a required answer always has a visible input.
    pub fn show_captcha(&self, state: &AppState) -> bool {
        self.captcha_required(state)
    }

    pub fn captcha_required(&self, state: &AppState) -> bool {
        self.reactions
            .captcha_required(state.is_captcha_enabled(), &self.config)
    }

    pub fn refresh_captcha(&self) -> Vec<Effect> {
        vec![Effect::Dispatch(Action::GetCaptcha)]
    }

    // ============= Submission =============

    /// Validate and, if valid, dispatch a login request.
    pub fn submit(&mut self, state: &AppState) -> Vec<Effect> {
        self.form.mark_submitted();

        if !self.revalidate(state) {
            tracing::debug!(errors = self.form.errors().len(), "login form invalid");
            return Vec::new();
        }

        let credential = self.credential(state);
        tracing::info!(
            language = %credential.detected_keyboard_language,
            "Detected keyboard language"
        );

        vec![Effect::Dispatch(Action::Login(credential))]
    }

    /// Build the credential for the current values. Captcha fields are only
    /// filled while a captcha answer is required.
    pub fn credential(&self, state: &AppState) -> Credential {
        let values = self.form.values();
        let with_captcha = self.captcha_required(state);

        Credential {
            username: values.username.clone(),
            password: values.password.clone(),
            captcha_user_answer: with_captcha.then(|| values.captcha_user_answer.clone()),
            captcha_expected_answer_hash: if with_captcha {
                state.captcha_answer_hash().map(str::to_string)
            } else {
                None
            },
            detected_keyboard_language: values
                .language
                .clone()
                .unwrap_or_else(|| self.config.messages.english_label.clone()),
        }
    }

    /// Re-run validation once the form has been submitted. Returns validity.
    fn revalidate(&mut self, state: &AppState) -> bool {
        if !self.form.is_submitted() {
            return true;
        }

        let ctx = ValidationContext {
            captcha_required: self.captcha_required(state),
        };

        match self.schema.validate(self.form.values(), &ctx) {
            Ok(()) => {
                self.form.set_errors(Default::default());
                true
            }
            Err(errors) => {
                self.form.set_errors(errors);
                false
            }
        }
    }
}
