//! Declarative validation schema for the login form

use super::form::{Field, FieldErrors, LoginFormValues};
use crate::utils::config::MessagesConfig;

/// Facts from outside the form that rules may depend on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationContext {
    pub captcha_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// Required only when the context asks for a captcha answer
    RequiredWithCaptcha,
}

impl Rule {
    fn applies(&self, ctx: &ValidationContext) -> bool {
        match self {
            Rule::Required => true,
            Rule::RequiredWithCaptcha => ctx.captcha_required,
        }
    }
}

#[derive(Debug, Clone)]
struct FieldRule {
    field: Field,
    rule: Rule,
    message: String,
}

/// Ordered list of per-field rules. The first failing rule of a field wins.
#[derive(Debug, Clone)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule(mut self, field: Field, rule: Rule, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule {
            field,
            rule,
            message: message.into(),
        });
        self
    }

    /// The login schema: username and password required, captcha answer
    /// required when the context says so.
    pub fn login(messages: &MessagesConfig) -> Self {
        Self::new()
            .rule(Field::Username, Rule::Required, &messages.username_required)
            .rule(Field::Password, Rule::Required, &messages.password_required)
            .rule(
                Field::CaptchaUserAnswer,
                Rule::RequiredWithCaptcha,
                &messages.captcha_required,
            )
    }

    pub fn validate(
        &self,
        values: &LoginFormValues,
        ctx: &ValidationContext,
    ) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        for FieldRule { field, rule, message } in &self.rules {
            if errors.contains_key(field) || !rule.applies(ctx) {
                continue;
            }
            if values.get(*field).trim().is_empty() {
                errors.insert(*field, message.clone());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::login(&MessagesConfig::default())
    }
}
