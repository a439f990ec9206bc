//! Browser implementation of the login view's `Host`

use nova_login::Host;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

thread_local! {
    static HISTORY_GUARD: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>> = const { RefCell::new(None) };
}

/// Navigation goes through the router when one is available, otherwise
/// through `location.href`.
pub struct BrowserHost {
    cookie_name: String,
    navigate: Option<Rc<dyn Fn(&str)>>,
}

impl BrowserHost {
    pub fn new(cookie_name: impl Into<String>, navigate: impl Fn(&str) + 'static) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            navigate: Some(Rc::new(navigate)),
        }
    }

    /// Host for cleanup code that runs after the router context is gone
    pub fn without_router(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            navigate: None,
        }
    }
}

impl Host for BrowserHost {
    fn navigate(&self, route: &str) {
        match &self.navigate {
            Some(navigate) => navigate(route),
            None => {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(route);
                }
            }
        }
    }

    fn remove_secure_cookie(&self) {
        remove_cookie(&self.cookie_name);
    }

    fn guard_history(&self) {
        guard_history();
    }

    fn release_history(&self) {
        release_history();
    }
}

/// Expire a cookie set with the `Secure` attribute
pub fn remove_cookie(name: &str) {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok());

    if let Some(document) = document {
        let expired = format!("{}=; Max-Age=0; Path=/; Secure; SameSite=Strict", name);
        if let Err(e) = document.set_cookie(&expired) {
            tracing::warn!("Failed to remove cookie {}: {:?}", name, e);
        }
    }
}

fn push_current_entry(window: &web_sys::Window) {
    let title = window.document().map(|d| d.title()).unwrap_or_default();
    if let (Ok(history), Ok(href)) = (window.history(), window.location().href()) {
        let _ = history.push_state_with_url(&JsValue::NULL, &title, Some(&href));
    }
}

/// Re-push the current entry now and on every `popstate`, so Back stays on
/// the login page. Idempotent.
pub fn guard_history() {
    let Some(window) = web_sys::window() else {
        return;
    };
    push_current_entry(&window);

    HISTORY_GUARD.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return;
        }

        let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                push_current_entry(&window);
            }
        });
        if window
            .add_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref())
            .is_ok()
        {
            *slot = Some(listener);
        }
    });
}

pub fn release_history() {
    HISTORY_GUARD.with(|slot| {
        if let Some(listener) = slot.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .remove_event_listener_with_callback("popstate", listener.as_ref().unchecked_ref());
            }
        }
    });
}
