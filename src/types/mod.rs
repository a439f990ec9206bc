use serde::{Deserialize, Serialize};

// ============= Auth Request/Response Types =============

/// Credentials sent with a login attempt. Built fresh for every submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captcha_user_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captcha_expected_answer_hash: Option<String>,
    /// Label of the keyboard layout seen on the last key-down. Logged only.
    #[serde(skip)]
    pub detected_keyboard_language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub username: Option<String>,
}

/// Server-provided flags that change client behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemParameters {
    #[serde(default)]
    pub is_captcha_enabled: bool,
}

/// A captcha image (base64 PNG) and the hash of its expected answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptchaChallenge {
    pub image: String,
    pub answer: String,
}

impl CaptchaChallenge {
    /// `data:` URL suitable for an `<img src>`.
    pub fn data_url(&self) -> String {
        format!("data:image/png;base64, {}", self.image)
    }
}

// ============= Message Types =============

/// Error payload carried by the message slot. `code` drives UI reactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorModel {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorModel {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ErrorModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "error {}", self.code)
        } else {
            write!(f, "{} ({})", self.message, self.code)
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Error,
    Warning,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Error(ErrorModel),
    Text(String),
}

/// The global message slot. `kind == None` means no message is shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub kind: Option<MessageKind>,
    pub content: Option<MessageContent>,
}

impl Message {
    pub fn error(error: ErrorModel) -> Self {
        Self {
            kind: Some(MessageKind::Error),
            content: Some(MessageContent::Error(error)),
        }
    }

    pub fn text(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            content: Some(MessageContent::Text(text.into())),
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.kind.is_none()
    }

    /// Error code of the content, if the content is an error.
    pub fn error_code(&self) -> Option<&str> {
        match &self.content {
            Some(MessageContent::Error(e)) => Some(e.code.as_str()),
            _ => None,
        }
    }

    /// Human readable text for the generic alert.
    pub fn display_text(&self) -> Option<String> {
        match &self.content {
            Some(MessageContent::Error(e)) if e.message.is_empty() => Some(e.to_string()),
            Some(MessageContent::Error(e)) => Some(e.message.clone()),
            Some(MessageContent::Text(t)) => Some(t.clone()),
            None => None,
        }
    }
}

// ============= Session Types =============

/// Whether the current user is authenticated. Mirrors a `true | false | undefined` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unknown,
    LoggedIn,
    LoggedOut,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error: {0}")]
    Server(ErrorModel),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Error payload to place in the message slot.
    pub fn into_error_model(self) -> ErrorModel {
        match self {
            AppError::Server(model) => model,
            AppError::Network(msg) => ErrorModel::new("network", msg),
            AppError::Decode(msg) => ErrorModel::new("decode", msg),
            AppError::Config(msg) => ErrorModel::new("config", msg),
            AppError::InvalidInput(msg) => ErrorModel::new("invalid-input", msg),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_omits_keyboard_language_on_the_wire() {
        let credential = Credential {
            username: "admin".to_string(),
            password: "secret".to_string(),
            captcha_user_answer: Some("x7k2".to_string()),
            captcha_expected_answer_hash: Some("abc123".to_string()),
            detected_keyboard_language: "انگلیسی".to_string(),
        };

        let json = serde_json::to_value(&credential).expect("should serialize");

        assert_eq!(json["username"], "admin");
        assert_eq!(json["captchaUserAnswer"], "x7k2");
        assert_eq!(json["captchaExpectedAnswerHash"], "abc123");
        assert!(json.get("detectedKeyboardLanguage").is_none());
    }

    #[test]
    fn test_credential_without_captcha_skips_captcha_fields() {
        let credential = Credential {
            username: "admin".to_string(),
            password: "secret".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&credential).expect("should serialize");
        let object = json.as_object().expect("should be an object");

        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_message_error_code() {
        let message = Message::error(ErrorModel::new("2038", "invalid captcha"));
        assert_eq!(message.error_code(), Some("2038"));
        assert!(!message.is_cleared());

        let text = Message::text(MessageKind::Info, "hello");
        assert_eq!(text.error_code(), None);
        assert!(Message::default().is_cleared());
    }

    #[test]
    fn test_display_text_falls_back_to_code() {
        let message = Message::error(ErrorModel::new("500", ""));
        assert_eq!(message.display_text().as_deref(), Some("error 500"));
    }

    #[test]
    fn test_server_error_keeps_model() {
        let model = ErrorModel::new("2026", "try again");
        let err = AppError::Server(model.clone());
        assert_eq!(err.into_error_model(), model);

        let network = AppError::Network("refused".to_string()).into_error_model();
        assert_eq!(network.code, "network");
    }

    #[test]
    fn test_system_parameters_deserialize_camel_case() {
        let params: SystemParameters =
            serde_json::from_str(r#"{"isCaptchaEnabled": true}"#).expect("should parse");
        assert!(params.is_captcha_enabled);

        let defaults: SystemParameters = serde_json::from_str("{}").expect("should parse");
        assert!(!defaults.is_captcha_enabled);
    }
}
