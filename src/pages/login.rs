//! Login page with email + password and a "remember me" choice.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_query_map;

use crate::error::{AuthError, ValidationErrors};
use crate::routes::{AppRoute, REGISTERED_PARAM};
use crate::state::auth::BrowserAuthService;
use crate::util::validate;

/// Checked login form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Validate the form before any request is made.
///
/// # Errors
///
/// Returns field errors for `email` and `password`.
pub fn validate_login_input(email: &str, password: &str, remember_me: bool) -> Result<LoginInput, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = match validate::email(email) {
        Ok(email) => email.to_owned(),
        Err(e) => {
            errors.add("email", e);
            String::new()
        }
    };
    if let Err(e) = validate::password(password) {
        errors.add("password", e);
    }
    errors.into_result(LoginInput { email, password: password.to_owned(), remember_me })
}

/// Message shown under the submit button for a failed login.
pub fn login_error_message(err: &AuthError) -> String {
    match err {
        AuthError::InvalidCredentials => err.to_string(),
        AuthError::Transport(_) | AuthError::Registration(_) => "Login failed".to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let service = expect_context::<StoredValue<BrowserAuthService, LocalStorage>>();
    let query = use_query_map();
    let just_registered = move || query.with(|q| q.get(REGISTERED_PARAM).as_deref() == Some("true"));

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember_me = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let submitted = RwSignal::new(false);
    let error_message = RwSignal::new(String::new());

    let field_error = move |field: &'static str| {
        if !submitted.get() {
            return None;
        }
        validate_login_input(&email.get(), &password.get(), false)
            .err()
            .and_then(|errors| errors.get(field))
            .map(|e| e.to_string())
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        submitted.set(true);
        let Ok(input) = validate_login_input(&email.get_untracked(), &password.get_untracked(), remember_me.get_untracked())
        else {
            return;
        };
        busy.set(true);
        error_message.set(String::new());

        let service = service.get_value();
        leptos::task::spawn_local(async move {
            if let Err(e) = service.login(&input.email, &input.password, input.remember_me).await {
                error_message.set(login_error_message(&e));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Birthday Reminder"</h1>
                <p class="auth-card__subtitle">"Sign in"</p>
                <Show when=just_registered>
                    <p class="auth-message auth-message--success">
                        "Registration successful. You can sign in now."
                    </p>
                </Show>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    <label class="auth-label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="field-error">{move || field_error("email")}</p>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="field-error">{move || field_error("password")}</p>
                    <label class="auth-checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || remember_me.get()
                            on:change=move |ev| remember_me.set(event_target_checked(&ev))
                        />
                        "Remember me"
                    </label>
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !error_message.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error_message.get()}</p>
                </Show>
                <p class="auth-card__footer">
                    "No account? " <A href={AppRoute::Register.path()}>"Register"</A>
                </p>
            </div>
        </div>
    }
}
