//! Credential text field bound to the login view-model

use leptos::prelude::*;
use nova_login::login::form::Field;
use nova_login::login::keyboard::KeyStroke;
use nova_login::{LoginView, Store};

/// Labelled input for one login field.
///
/// Every key-down goes through the keyboard-language guard; non-English
/// characters are swallowed. Errors show only once the form was submitted.
#[component]
pub fn CredentialField(
    field: Field,
    view_model: RwSignal<LoginView>,
    store: Store,
    #[prop(optional)] label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] autofocus: bool,
    /// Block copy/paste/cut, for password fields
    #[prop(optional)]
    disable_clipboard: bool,
) -> impl IntoView {
    let on_input = move |ev| {
        let value = event_target_value(&ev);
        let state = store.state();
        view_model.update(|v| v.set_field(field, value, &state));
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let stroke = KeyStroke {
            key: ev.key(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            alt: ev.alt_key(),
        };
        let outcome = view_model.try_update(|v| v.key_down(field, &stroke));
        if outcome.is_some_and(|o| o.prevent_default) {
            ev.prevent_default();
        }
    };

    let on_blur = move |_| view_model.update(|v| v.blur(field));

    let block_clipboard = move |ev: web_sys::ClipboardEvent| {
        if disable_clipboard {
            ev.prevent_default();
        }
    };

    let error = move || view_model.with(|v| v.form().visible_error(field).map(str::to_string));
    let input_class = move || {
        if error().is_some() {
            "input input-error"
        } else {
            "input"
        }
    };

    view! {
        <div class="text-field">
            {(!label.is_empty()).then(|| view! { <label class="field-label" for=field.name()>{label}</label> })}
            <input
                id=field.name()
                name=field.name()
                type=input_type
                class=input_class
                placeholder=placeholder
                autocomplete="off"
                autofocus=autofocus
                prop:value=move || view_model.with(|v| v.form().value(field).to_string())
                on:input=on_input
                on:keydown=on_keydown
                on:blur=on_blur
                on:copy=block_clipboard
                on:paste=block_clipboard
                on:cut=block_clipboard
            />
            {move || error().map(|msg| view! { <p class="helper-text text-error">{msg}</p> })}
        </div>
    }
}
