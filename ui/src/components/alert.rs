//! Alert banners

use crate::state::AppContext;
use leptos::prelude::*;
use nova_login::types::MessageKind;
use nova_login::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Success,
    Info,
}

impl Severity {
    fn class(self) -> &'static str {
        match self {
            Severity::Error => "alert alert-error",
            Severity::Warning => "alert alert-warning",
            Severity::Success => "alert alert-success",
            Severity::Info => "alert alert-info",
        }
    }
}

impl From<MessageKind> for Severity {
    fn from(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Error => Severity::Error,
            MessageKind::Warning => Severity::Warning,
            MessageKind::Success => Severity::Success,
            MessageKind::Info => Severity::Info,
        }
    }
}

/// A single alert line. `on_dismiss` adds a close button.
#[component]
pub fn Alert(
    #[prop(into)] message: Signal<String>,
    severity: Severity,
    #[prop(optional)] on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class=severity.class() role="alert">
            <span class="alert-text">{move || message.get()}</span>
            {on_dismiss.map(|cb| view! {
                <button type="button" class="alert-close" on:click=move |_| cb.run(())>
                    <span class="material-icons-outlined icon-18px">"close"</span>
                </button>
            })}
        </div>
    }
}

/// Generic alert for whatever the store's message slot holds
#[component]
pub fn MessageAlert() -> impl IntoView {
    let app = expect_context::<AppContext>();
    let state = app.state;
    let store = app.store.clone();

    let text = Signal::derive(move || {
        state.with(|s| s.message.display_text()).unwrap_or_default()
    });
    let dismiss = Callback::new(move |_| store.dispatch(Action::ClearMessage));

    view! {
        {move || {
            state
                .with(|s| s.message.kind)
                .map(|kind| view! {
                    <Alert message=text severity=Severity::from(kind) on_dismiss=dismiss />
                })
        }}
    }
}
