//! Login Flow Integration Tests
//!
//! Drives a `LoginView` wired to a real `Store` through the harness in
//! `common::mocks`, covering validation, captcha handling, session
//! reactions and the keyboard guard.

mod common;

use common::mocks::{HostCall, LoginHarness};
use nova_login::login::form::Field;
use nova_login::login::keyboard::{KeyStroke, KeyboardLanguage};
use nova_login::types::{CaptchaChallenge, ErrorModel, Message, SystemParameters};
use nova_login::{Action, AppState, Outcome};

fn captcha_enabled() -> Outcome {
    Outcome::SystemSettingLoaded(SystemParameters {
        is_captcha_enabled: true,
    })
}

fn captcha(answer: &str) -> Outcome {
    Outcome::CaptchaLoaded(CaptchaChallenge {
        image: "iVBORw0KGgo=".to_string(),
        answer: answer.to_string(),
    })
}

// =============================================================================
// Mount / Unmount
// =============================================================================

#[test]
fn test_mount_requests_system_setting_and_guards_history() {
    let harness = LoginHarness::new();
    harness.mount();

    assert_eq!(harness.executed(), vec![Action::GetSystemSetting]);
    assert_eq!(
        harness.host.calls(),
        vec![HostCall::GuardHistory, HostCall::RemoveSecureCookie]
    );
}

#[test]
fn test_unmount_releases_history() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.unmount();

    assert_eq!(harness.host.count(&HostCall::ReleaseHistory), 1);
}

#[test]
fn test_system_setting_with_captcha_fetches_captcha() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.apply(captcha_enabled());

    assert_eq!(harness.count_executed(&Action::GetCaptcha), 1);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn test_empty_submit_shows_both_errors_and_blocks_login() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.submit();

    assert!(harness.visible_error(Field::Username).is_some());
    assert!(harness.visible_error(Field::Password).is_some());
    assert!(harness.login_requests().is_empty());
}

#[test]
fn test_errors_hidden_before_first_submit() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.type_into(Field::Username, "");

    assert_eq!(harness.visible_error(Field::Username), None);
}

#[test]
fn test_captcha_enabled_requires_answer() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.apply(captcha_enabled());
    harness.apply(captcha("hash-1"));

    harness.type_into(Field::Username, "admin");
    harness.type_into(Field::Password, "secret");
    harness.submit();

    assert_eq!(
        harness.visible_error(Field::CaptchaUserAnswer).as_deref(),
        Some("کد امنیتی اجباری است")
    );
    assert!(harness.login_requests().is_empty());

    harness.type_into(Field::CaptchaUserAnswer, "x7k2");
    harness.submit();

    let requests = harness.login_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].captcha_user_answer.as_deref(), Some("x7k2"));
    assert_eq!(requests[0].captcha_expected_answer_hash.as_deref(), Some("hash-1"));
}

#[test]
fn test_captcha_disabled_submits_without_answer() {
    let harness = LoginHarness::new();
    harness.mount();

    harness.type_into(Field::Username, "admin");
    harness.type_into(Field::Password, "secret");
    harness.submit();

    let requests = harness.login_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].username, "admin");
    assert_eq!(requests[0].captcha_user_answer, None);
    assert_eq!(requests[0].captcha_expected_answer_hash, None);
}

#[test]
fn test_enter_key_submits() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.type_into(Field::Username, "admin");
    harness.type_into(Field::Password, "secret");

    harness.press_global_key("Tab");
    assert!(harness.login_requests().is_empty());

    harness.press_global_key("Enter");
    assert_eq!(harness.login_requests().len(), 1);
}

// =============================================================================
// Error Codes
// =============================================================================

#[test]
fn test_invalid_captcha_code_clears_answer() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.apply(captcha_enabled());
    harness.type_into(Field::CaptchaUserAnswer, "wrong");

    harness.apply(Outcome::LoginFailed(ErrorModel::new("2038", "invalid captcha")));

    assert_eq!(harness.field(Field::CaptchaUserAnswer), "");
}

#[test]
fn test_invalid_captcha_code_requires_captcha_even_when_disabled() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.apply(Outcome::LoginFailed(ErrorModel::new("2038", "invalid captcha")));
    harness.apply(Outcome::MessageCleared);

    // The block is shown and a challenge fetched even though the server flag is off
    assert!(harness.view.lock().show_captcha(&harness.store.state()));
    assert_eq!(harness.count_executed(&Action::GetCaptcha), 1);

    harness.type_into(Field::Username, "admin");
    harness.type_into(Field::Password, "secret");
    harness.submit();

    assert!(harness.visible_error(Field::CaptchaUserAnswer).is_some());
    assert!(harness.login_requests().is_empty());

    harness.apply(captcha("hash-7"));
    harness.type_into(Field::CaptchaUserAnswer, "k9p4");
    harness.submit();

    let requests = harness.login_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].captcha_user_answer.as_deref(), Some("k9p4"));
    assert_eq!(requests[0].captcha_expected_answer_hash.as_deref(), Some("hash-7"));
}

#[test]
fn test_refresh_code_with_captcha_refreshes_exactly_once() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.apply(captcha_enabled());
    let after_setup = harness.count_executed(&Action::GetCaptcha);

    harness.apply(Outcome::LoginFailed(ErrorModel::new("2026", "try again")));
    harness.apply(Outcome::MessageCleared);

    assert_eq!(harness.count_executed(&Action::GetCaptcha), after_setup + 1);

    // Unrelated later messages do not refresh again
    harness.apply(Outcome::MessageShown(Message::text(
        nova_login::types::MessageKind::Info,
        "hello",
    )));
    assert_eq!(harness.count_executed(&Action::GetCaptcha), after_setup + 1);

    // A second occurrence refreshes once more
    harness.apply(Outcome::LoginFailed(ErrorModel::new("2026", "try again")));
    harness.apply(Outcome::MessageCleared);
    assert_eq!(harness.count_executed(&Action::GetCaptcha), after_setup + 2);
}

#[test]
fn test_repeated_invalid_captcha_code_clears_answer_again() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.apply(captcha_enabled());
    let invalid = || Outcome::LoginFailed(ErrorModel::new("2038", "invalid captcha"));

    harness.type_into(Field::CaptchaUserAnswer, "wrong1");
    harness.apply(invalid());
    assert_eq!(harness.field(Field::CaptchaUserAnswer), "");

    // Alert left open, second attempt fails the same way
    harness.type_into(Field::CaptchaUserAnswer, "wrong2");
    harness.apply(invalid());
    assert_eq!(harness.field(Field::CaptchaUserAnswer), "");
}

#[test]
fn test_repeated_refresh_code_refreshes_once_per_occurrence() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.apply(captcha_enabled());
    let after_setup = harness.count_executed(&Action::GetCaptcha);
    let retry = || Outcome::LoginFailed(ErrorModel::new("2026", "try again"));

    harness.apply(retry());
    assert_eq!(harness.count_executed(&Action::GetCaptcha), after_setup);

    harness.apply(retry());
    assert_eq!(harness.count_executed(&Action::GetCaptcha), after_setup + 1);

    harness.apply(Outcome::MessageCleared);
    assert_eq!(harness.count_executed(&Action::GetCaptcha), after_setup + 2);
}

#[test]
fn test_refresh_code_without_captcha_does_not_refresh() {
    let harness = LoginHarness::new();
    harness.mount();

    harness.apply(Outcome::LoginFailed(ErrorModel::new("2026", "try again")));
    harness.apply(Outcome::MessageCleared);

    assert_eq!(harness.count_executed(&Action::GetCaptcha), 0);
}

// =============================================================================
// Session
// =============================================================================

#[test]
fn test_unknown_session_removes_cookie_without_navigation() {
    let harness = LoginHarness::new();
    harness.mount();

    assert_eq!(harness.host.count(&HostCall::RemoveSecureCookie), 1);
    assert!(harness.host.navigations().is_empty());
}

#[test]
fn test_logged_in_navigates_home_once() {
    let harness = LoginHarness::new();
    harness.mount();

    harness.apply(Outcome::LoginSucceeded {
        username: Some("admin".to_string()),
    });
    harness.apply(captcha("unrelated"));

    assert_eq!(harness.host.navigations(), vec!["/sokan/home".to_string()]);
}

#[test]
fn test_english_key_after_persian_hides_banner() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.view.lock().key_down(Field::Username, &KeyStroke::new("ب"));

    harness.view.lock().key_down(Field::Username, &KeyStroke::new("b"));

    assert_eq!(harness.view.lock().keyboard_language(), KeyboardLanguage::English);
    assert_eq!(harness.view.lock().keyboard_warning(), None);
}

#[test]
fn test_already_logged_in_on_mount_navigates() {
    let mut state = AppState::default();
    state.user.is_logged_in = nova_login::types::SessionState::LoggedIn;

    let harness = LoginHarness::with_state(state);
    harness.mount();

    assert_eq!(harness.host.navigations(), vec!["/sokan/home".to_string()]);
    assert_eq!(harness.host.count(&HostCall::RemoveSecureCookie), 0);
}

#[test]
fn test_failed_login_stops_loading() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.store.dispatch(Action::LoadingManagement(true));

    harness.apply(Outcome::LoginFailed(ErrorModel::new("2001", "bad password")));

    assert!(!harness.store.select(|s| s.loading));
}

// =============================================================================
// Keyboard Guard
// =============================================================================

#[test]
fn test_non_english_key_in_username_is_blocked_with_banner() {
    let harness = LoginHarness::new();
    harness.mount();

    let outcome = harness
        .view
        .lock()
        .key_down(Field::Username, &KeyStroke::new("ب"));

    assert!(outcome.prevent_default);
    assert_eq!(outcome.language, KeyboardLanguage::Persian);
    assert_eq!(harness.view.lock().keyboard_language(), KeyboardLanguage::Persian);

    let banner = harness.view.lock().keyboard_warning();
    assert_eq!(banner.as_deref(), Some("زبان صفحه کلید : فارسی | سایر زبان ها"));
}

#[test]
fn test_detected_language_travels_with_credential() {
    let harness = LoginHarness::new();
    harness.mount();
    harness.type_into(Field::Username, "admin");
    harness.type_into(Field::Password, "secret");
    harness
        .view
        .lock()
        .key_down(Field::Password, &KeyStroke::new("ж"));

    harness.submit();

    let requests = harness.login_requests();
    assert_eq!(requests[0].detected_keyboard_language, "سایر زبان ها");
}
