//! Landing page after a successful login

use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use nova_login::Action;

/// Home page
#[component]
pub fn HomePage() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let state = app.state;
    let login_route = app.config.routes.login.clone();

    // The login action leaves the loading flag on until the target page is up
    let store = app.store.clone();
    Effect::new(move |_| store.dispatch(Action::LoadingManagement(false)));

    let username = move || state.with(|s| s.user.username.clone().unwrap_or_default());

    view! {
        <Show
            when=move || app.is_authenticated()
            fallback=move || view! { <Redirect path=login_route.clone() /> }
        >
            <div class="min-h-screen flex items-center justify-center">
                <div class="card p-8 text-center">
                    <h1 class="text-2xl font-bold mb-2">"سامانه نووا"</h1>
                    <p>{move || format!("خوش آمدید، {}", username())}</p>
                </div>
            </div>
        </Show>
    }
}
