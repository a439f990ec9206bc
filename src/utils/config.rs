//! TOML-based configuration for the login view
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration pointed at `http://localhost:8080`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from `nova-login.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub routes: RouteConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub captcha: CaptchaConfig,

    #[serde(default)]
    pub messages: MessagesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============= API Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    #[serde(default = "default_captcha_path")]
    pub captcha_path: String,

    #[serde(default = "default_system_setting_path")]
    pub system_setting_path: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_login_path() -> String {
    "/api/auth/login".to_string()
}

fn default_captcha_path() -> String {
    "/api/security/captcha".to_string()
}

fn default_system_setting_path() -> String {
    "/api/common/system-setting".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            captcha_path: default_captcha_path(),
            system_setting_path: default_system_setting_path(),
        }
    }
}

impl ApiConfig {
    /// Join the base URL and a path without doubling the slash.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// ============= Route Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_login_route")]
    pub login: String,

    /// Where a logged-in user is sent
    #[serde(default = "default_home_route")]
    pub home: String,
}

fn default_login_route() -> String {
    "/login".to_string()
}

fn default_home_route() -> String {
    "/sokan/home".to_string()
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            login: default_login_route(),
            home: default_home_route(),
        }
    }
}

// ============= Session Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the secure session cookie removed when the session is unknown
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_cookie_name() -> String {
    "nova_session".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
        }
    }
}

// ============= Captcha Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptchaConfig {
    /// Server code for a wrong captcha answer; clears the answer field
    #[serde(default = "default_invalid_answer_code")]
    pub invalid_answer_code: String,

    /// Server code after which a fresh captcha must be fetched
    #[serde(default = "default_refresh_code")]
    pub refresh_code: String,
}

fn default_invalid_answer_code() -> String {
    "2038".to_string()
}

fn default_refresh_code() -> String {
    "2026".to_string()
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            invalid_answer_code: default_invalid_answer_code(),
            refresh_code: default_refresh_code(),
        }
    }
}

// ============= Message Configuration =============

/// User-facing strings. Defaults are the Persian texts of the Nova client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesConfig {
    #[serde(default = "default_username_required")]
    pub username_required: String,

    #[serde(default = "default_password_required")]
    pub password_required: String,

    #[serde(default = "default_captcha_required")]
    pub captcha_required: String,

    /// Prefix of the keyboard warning banner
    #[serde(default = "default_keyboard_banner")]
    pub keyboard_banner: String,

    #[serde(default = "default_english_label")]
    pub english_label: String,

    #[serde(default = "default_persian_label")]
    pub persian_label: String,

    #[serde(default = "default_other_label")]
    pub other_label: String,
}

fn default_username_required() -> String {
    "نام کاربری اجباری است".to_string()
}

fn default_password_required() -> String {
    "رمز عبور اجباری است".to_string()
}

fn default_captcha_required() -> String {
    "کد امنیتی اجباری است".to_string()
}

fn default_keyboard_banner() -> String {
    "زبان صفحه کلید :".to_string()
}

fn default_english_label() -> String {
    "انگلیسی".to_string()
}

fn default_persian_label() -> String {
    "فارسی".to_string()
}

fn default_other_label() -> String {
    "سایر زبان ها".to_string()
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            username_required: default_username_required(),
            password_required: default_password_required(),
            captcha_required: default_captcha_required(),
            keyboard_banner: default_keyboard_banner(),
            english_label: default_english_label(),
            persian_label: default_persian_label(),
            other_label: default_other_label(),
        }
    }
}

// ============= Logging Configuration =============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ============= Loading & Validation =============

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Config(err.to_string())
    }
}

impl LoginConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LoginConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://") || base.starts_with('/')) {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url must be an http(s) URL or an absolute path, got '{}'",
                base
            )));
        }

        if !self.routes.home.starts_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "routes.home must start with '/', got '{}'",
                self.routes.home
            )));
        }

        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "session.cookie_name must not be empty".to_string(),
            ));
        }

        if self.captcha.invalid_answer_code == self.captcha.refresh_code {
            return Err(ConfigError::ValidationError(
                "captcha.invalid_answer_code and captcha.refresh_code must differ".to_string(),
            ));
        }

        Ok(())
    }
}
