//! # Nova Login
//!
//! The login screen of the Nova web client, as a headless library: form
//! state, validation, a keyboard-layout guard for credential fields, the
//! reactive rules that follow the global store, and the HTTP actions behind
//! the store. The Leptos front end in `ui/` renders it and supplies the
//! browser services.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nova_login::{api, AuthApi, LoginConfig, LoginView, Store};
//! use std::sync::Arc;
//!
//! let config = Arc::new(LoginConfig::load("nova-login.toml")?);
//! let store = Store::new();
//!
//! // Run network actions on the host's executor
//! let exec_config = Arc::clone(&config);
//! store.set_executor(move |action, store| {
//!     let api = AuthApi::new(&exec_config);
//!     let store = store.clone();
//!     tokio::spawn(async move { api::run_action(&api, &store, action).await });
//! });
//!
//! let mut view = LoginView::new(config);
//! nova_login::run_effects(&host, &store, view.mount(&store.state()));
//! ```
//!
//! ## Modules
//!
//! - [`login`] - Login view-model: form, validation, keyboard guard, reactive rules
//! - [`store`] - Observable global store and reducer
//! - [`api`] - HTTP actions (system settings, captcha, login)
//! - [`types`] - Domain types and error handling
//! - [`utils`] - Configuration

/// HTTP actions executed on behalf of the store.
pub mod api;

/// Login view-model.
pub mod login;

/// Global observable store.
pub mod store;

/// Domain types and errors.
pub mod types;

/// Configuration loading.
pub mod utils;

pub use api::AuthApi;
pub use login::{run_effects, Effect, Host, LoginView};
pub use store::{Action, AppState, Outcome, Slice, Store, Subscription};
pub use types::{AppError, Result};
pub use utils::config::LoginConfig;
