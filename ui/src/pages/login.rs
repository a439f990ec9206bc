//! Login page

use crate::browser::BrowserHost;
use crate::components::{Alert, CredentialField, LoadingOverlay, MessageAlert, Severity};
use crate::state::AppContext;
use chrono::Datelike;
use leptos::ev;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use nova_login::login::form::Field;
use nova_login::{run_effects, Effect, LoginView};
use std::rc::Rc;
use std::sync::Arc;

/// Login page
#[component]
pub fn LoginPage() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let navigate = use_navigate();

    let store = app.store.clone();
    let state = app.state;
    let view_model = RwSignal::new(LoginView::new(Arc::clone(&app.config)));

    let host = Rc::new(BrowserHost::new(
        app.config.session.cookie_name.clone(),
        move |route: &str| navigate(route, Default::default()),
    ));
    let run: Rc<dyn Fn(Vec<Effect>)> = {
        let store = store.clone();
        Rc::new(move |effects| run_effects(host.as_ref(), &store, effects))
    };

    // Mount: system settings, history guard, first session/captcha rules
    {
        let run = Rc::clone(&run);
        let store = store.clone();
        Effect::new(move |prev: Option<()>| {
            if prev.is_none() {
                let snapshot = store.state();
                run(view_model.try_update(|v| v.mount(&snapshot)).unwrap_or_default());
            }
        });
    }

    // Session rule
    let session = Memo::new(move |_| state.with(|s| s.session()));
    {
        let run = Rc::clone(&run);
        Effect::new(move |_| {
            let session = session.get();
            run(view_model.try_update(|v| v.on_session_change(session)).unwrap_or_default());
        });
    }

    // Captcha-flag rule
    let captcha_enabled = Memo::new(move |_| state.with(|s| s.is_captcha_enabled()));
    {
        let run = Rc::clone(&run);
        Effect::new(move |_| {
            let enabled = captcha_enabled.get();
            run(view_model.try_update(|v| v.on_captcha_flag_change(enabled)).unwrap_or_default());
        });
    }

    // Message rules: run on change only, mount already recorded the current message.
    // Keyed on the revision so a repeated identical error still fires.
    let message = Memo::new(move |_| state.with(|s| (s.message_revision, s.message.clone())));
    {
        let run = Rc::clone(&run);
        let store = store.clone();
        Effect::new(move |prev: Option<()>| {
            let (_, message) = message.get();
            if prev.is_some() {
                let snapshot = store.state();
                run(view_model
                    .try_update(|v| v.on_message_change(&message, &snapshot))
                    .unwrap_or_default());
            }
        });
    }

    // Global Enter submits the form
    let keydown = {
        let run = Rc::clone(&run);
        let store = store.clone();
        window_event_listener(ev::keydown, move |ev| {
            let key = ev.key();
            let snapshot = store.state();
            run(view_model
                .try_update(|v| v.on_global_key_down(&key, &snapshot))
                .unwrap_or_default());
        })
    };

    {
        let cookie_name = app.config.session.cookie_name.clone();
        let store = store.clone();
        on_cleanup(move || {
            keydown.remove();
            let effects = view_model
                .try_update_untracked(|v| v.unmount())
                .unwrap_or_else(|| vec![Effect::ReleaseHistory]);
            run_effects(&BrowserHost::without_router(cookie_name), &store, effects);
        });
    }

    let on_submit_click = {
        let run = Rc::clone(&run);
        let store = store.clone();
        move |_| {
            let snapshot = store.state();
            run(view_model.try_update(|v| v.submit(&snapshot)).unwrap_or_default());
        }
    };

    let on_refresh_captcha = {
        let run = Rc::clone(&run);
        move |_| run(view_model.with_untracked(|v| v.refresh_captcha()))
    };

    let keyboard_warning = move || view_model.with(|v| v.keyboard_warning());
    let show_captcha = move || state.with(|s| view_model.with(|v| v.show_captcha(s)));
    let captcha_src = move || {
        state.with(|s| s.captcha.as_ref().map(|c| c.data_url()).unwrap_or_default())
    };
    let year = chrono::Local::now().year();

    view! {
        <div class="login-body">
            <div class="bg"></div>
            <div class="bg bg2"></div>
            <div class="bg bg3"></div>

            <Show when=move || state.with(|s| s.loading)>
                <LoadingOverlay />
            </Show>

            <div class="login-container">
                <div class="login">
                    <form class="login-panel" autocomplete="off" on:submit=|ev| ev.prevent_default()>
                        <div class="img-container">
                            <img src="/assets/app-logo.svg" alt="Nova" />
                            <span>"سامانه نووا"</span>
                        </div>

                        <div class="form-container">
                            <div class="login-field">
                                <MessageAlert />
                            </div>

                            <div class="login-field">
                                {move || keyboard_warning().map(|text| view! {
                                    <Alert message=text severity=Severity::Warning />
                                })}
                            </div>

                            <div class="login-field">
                                <CredentialField
                                    field=Field::Username
                                    view_model=view_model
                                    store=store.clone()
                                    label="نام کاربری"
                                    autofocus=true
                                />
                            </div>

                            <div class="login-field">
                                <CredentialField
                                    field=Field::Password
                                    view_model=view_model
                                    store=store.clone()
                                    label="رمز عبور"
                                    input_type="password"
                                    disable_clipboard=true
                                />
                            </div>

                            // Always rendered so the refresh handler stays a plain DOM listener
                            <div class="login-field" class:hidden=move || !show_captcha()>
                                <label>"تصویر امنیتی"</label>
                                <div class="col-equal">
                                    <CredentialField
                                        field=Field::CaptchaUserAnswer
                                        view_model=view_model
                                        store=store.clone()
                                        placeholder="کد امنیتی را وارد کنید"
                                    />
                                    <div class="captcha">
                                        <img src=captcha_src height="45" />
                                        <span
                                            class="material-icons-outlined icon-24px"
                                            on:click=on_refresh_captcha
                                        >
                                            "restart_alt"
                                        </span>
                                    </div>
                                </div>
                            </div>

                            <div class="login-field">
                                <button type="button" class="btn btn-primary w-full" on:click=on_submit_click>
                                    "ورود به سامانه"
                                </button>
                            </div>
                        </div>
                    </form>
                </div>

                <div class="intro">
                    <span class="material-icons-outlined icon-18px">"info"</span>
                    <p>
                        "سامانه نووا جهت فراهم آوردن انواع گزارشات کارت، تراکنش ها، حساب، اطلاعات مشتریان و صدور انواع کارت ها به صورت دسته ای و آنی پیاده سازی شده است."
                    </p>
                </div>
            </div>

            <footer>
                <p>
                    {format!(
                        "تمامی حقوق متعلق به این سامانه برای شرکت خدمات انفورماتیک محفوظ می باشد. Copyright {} ISC©",
                        year
                    )}
                </p>
            </footer>
        </div>
    }
}
