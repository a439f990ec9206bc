//! Local form state for the login view

use std::collections::{BTreeMap, BTreeSet};

/// Editable fields of the login form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Username,
    Password,
    CaptchaUserAnswer,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Username, Field::Password, Field::CaptchaUserAnswer];

    /// Form field name, as used for the `name` attribute
    pub fn name(self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::CaptchaUserAnswer => "captchaUserAnswer",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormValues {
    pub username: String,
    pub password: String,
    pub captcha_user_answer: String,
    /// Label of the keyboard layout seen on the last key-down
    pub language: Option<String>,
}

impl LoginFormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Username => &self.username,
            Field::Password => &self.password,
            Field::CaptchaUserAnswer => &self.captcha_user_answer,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Username => &mut self.username,
            Field::Password => &mut self.password,
            Field::CaptchaUserAnswer => &mut self.captcha_user_answer,
        }
    }
}

pub type FieldErrors = BTreeMap<Field, String>;

/// Values, errors, touched fields and the submitted flag.
///
/// Errors are kept as soon as validation produces them but only become
/// visible once the form has been submitted and the field is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    values: LoginFormValues,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    submitted: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &LoginFormValues {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        *self.values.slot(field) = value.into();
    }

    pub fn language(&self) -> Option<&str> {
        self.values.language.as_deref()
    }

    pub fn set_language(&mut self, label: impl Into<String>) {
        self.values.language = Some(label.into());
    }

    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Record a submit attempt; every field counts as touched from now on.
    pub fn mark_submitted(&mut self) {
        self.submitted = true;
        self.touched.extend(Field::ALL);
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// Error to display under `field`, gated by the submitted flag
    pub fn visible_error(&self, field: Field) -> Option<&str> {
        if self.submitted && self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }
}
