//! Nova login UI - Leptos frontend
//!
//! Renders the login screen over the `nova-login` view-model and supplies
//! the browser services it needs.

pub mod browser;
pub mod components;
pub mod pages;
pub mod state;

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};
use nova_login::LoginConfig;
use std::sync::Arc;

use pages::{home::HomePage, login::LoginPage};
use state::AppContext;

const EMBEDDED_CONFIG: &str = include_str!("../nova-login.toml");

/// Parse the configuration bundled with the app, falling back to defaults.
pub fn load_config() -> Arc<LoginConfig> {
    match LoginConfig::from_toml_str(EMBEDDED_CONFIG) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            web_sys::console::error_1(&format!("Invalid nova-login.toml, using defaults: {}", e).into());
            Arc::new(LoginConfig::default())
        }
    }
}

/// Main application component
#[component]
pub fn App(config: Arc<LoginConfig>) -> impl IntoView {
    provide_meta_context();

    // Initialize global state
    let app = AppContext::new(config);
    provide_context(app);

    view! {
        <Title text="سامانه نووا" />
        <Router>
            <main class="min-h-screen" dir="rtl">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/login" /> } />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/sokan/home") view=HomePage />
                </Routes>
            </main>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-6xl font-bold mb-4">"404"</h1>
                <a href="/login" class="btn btn-primary">"بازگشت به صفحه ورود"</a>
            </div>
        </div>
    }
}
