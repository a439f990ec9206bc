//! HTTP actions behind the store
//!
//! [`AuthApi`] talks to the Nova backend; [`run_action`] executes one store
//! action with it and applies the outcome. The host decides how the future is
//! driven (`spawn_local` in the browser, tokio in tests).

use crate::store::{Action, Outcome, Store};
use crate::types::{
    AppError, CaptchaChallenge, Credential, ErrorModel, LoginResponse, Result, SystemParameters,
};
use crate::utils::config::{ApiConfig, LoginConfig};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct AuthApi {
    client: reqwest::Client,
    api: ApiConfig,
}

impl AuthApi {
    pub fn new(config: &LoginConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api: config.api.clone(),
        }
    }

    pub fn with_client(client: reqwest::Client, config: &LoginConfig) -> Self {
        Self {
            client,
            api: config.api.clone(),
        }
    }

    /// Fetch server-side flags such as the captcha requirement
    pub async fn system_setting(&self) -> Result<SystemParameters> {
        let url = self.api.url(&self.api.system_setting_path);
        let resp = self.get(&url).send().await?;
        decode(resp).await
    }

    /// Fetch a new captcha challenge
    pub async fn captcha(&self) -> Result<CaptchaChallenge> {
        let url = self.api.url(&self.api.captcha_path);
        let resp = self.get(&url).send().await?;
        decode(resp).await
    }

    /// Submit credentials. An empty success body is accepted.
    pub async fn login(&self, credential: &Credential) -> Result<LoginResponse> {
        let url = self.api.url(&self.api.login_path);
        let request = self.client.post(&url).json(credential);
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let resp = request.send().await?;
        let resp = check_status(resp).await?;
        let body = resp.text().await?;

        if body.trim().is_empty() {
            return Ok(LoginResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| AppError::Decode(e.to_string()))
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();
        request
    }
}

/// Turn a non-2xx response into `AppError::Server`, keeping the server's
/// error code when the body carries one.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let model = match serde_json::from_str::<ErrorModel>(&body) {
        Ok(model) if !model.code.is_empty() => model,
        _ => ErrorModel::new(
            status.as_u16().to_string(),
            format!("Request failed with status {}", status),
        ),
    };
    Err(AppError::Server(model))
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let resp = check_status(resp).await?;
    resp.json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

/// Execute `action` and apply its outcome to `store`.
///
/// Failures never escape: they land in the message slot as an `ErrorModel`.
pub async fn run_action(api: &AuthApi, store: &Store, action: Action) {
    match action {
        Action::GetSystemSetting => match api.system_setting().await {
            Ok(params) => {
                tracing::debug!(captcha = params.is_captcha_enabled, "system settings loaded");
                store.apply(Outcome::SystemSettingLoaded(params));
            }
            Err(e) => {
                tracing::error!("Failed to load system settings: {}", e);
                store.apply(Outcome::RequestFailed(e.into_error_model()));
            }
        },
        Action::GetCaptcha => match api.captcha().await {
            Ok(captcha) => store.apply(Outcome::CaptchaLoaded(captcha)),
            Err(e) => {
                tracing::error!("Failed to load captcha: {}", e);
                store.apply(Outcome::RequestFailed(e.into_error_model()));
            }
        },
        Action::Login(credential) => {
            store.apply(Outcome::LoadingChanged(true));
            match api.login(&credential).await {
                Ok(resp) => {
                    tracing::info!(username = %credential.username, "login succeeded");
                    store.apply(Outcome::LoginSucceeded {
                        username: resp.username.or(Some(credential.username)),
                    });
                }
                Err(e) => {
                    tracing::warn!(username = %credential.username, "login failed: {}", e);
                    store.apply(Outcome::LoginFailed(e.into_error_model()));
                    store.apply(Outcome::LoadingChanged(false));
                }
            }
        }
        sync => store.dispatch(sync),
    }
}
