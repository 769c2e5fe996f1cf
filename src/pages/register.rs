//! Registration page: creates a user record, then returns to login.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::error::{FieldError, ValidationErrors};
use crate::net::types::Registration;
use crate::routes::AppRoute;
use crate::state::auth::BrowserAuthService;
use crate::util::validate;

/// Raw register form input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Inputs of the register form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterField {
    Email,
    Password,
    ConfirmPassword,
    FirstName,
    LastName,
}

impl RegisterField {
    pub const ALL: [Self; 5] = [Self::Email, Self::Password, Self::ConfirmPassword, Self::FirstName, Self::LastName];

    pub fn name(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
            Self::FirstName => "First name",
            Self::LastName => "Last name",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password | Self::ConfirmPassword => "password",
            Self::FirstName | Self::LastName => "text",
        }
    }
}

impl RegisterForm {
    pub fn set(&mut self, field: RegisterField, value: String) {
        let slot = match field {
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
            RegisterField::FirstName => &mut self.first_name,
            RegisterField::LastName => &mut self.last_name,
        };
        *slot = value;
    }

    /// # Errors
    ///
    /// Returns field errors; `confirmPassword` fails with `Mismatch` when it
    /// differs from `password`.
    pub fn validate(&self) -> Result<Registration, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut keep = |field: RegisterField, checked: Result<&str, FieldError>| match checked {
            Ok(value) => value.to_owned(),
            Err(e) => {
                errors.add(field.name(), e);
                String::new()
            }
        };
        let email = keep(RegisterField::Email, validate::email(&self.email));
        let password = keep(RegisterField::Password, validate::password(&self.password));
        let confirm = if self.confirm_password.is_empty() {
            Err(FieldError::Required)
        } else if self.confirm_password == self.password {
            Ok(self.confirm_password.as_str())
        } else {
            Err(FieldError::Mismatch)
        };
        keep(RegisterField::ConfirmPassword, confirm);
        let first_name = keep(RegisterField::FirstName, validate::required(&self.first_name));
        let last_name = keep(RegisterField::LastName, validate::required(&self.last_name));
        errors.into_result(Registration { email, password, first_name, last_name })
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let service = expect_context::<StoredValue<BrowserAuthService, LocalStorage>>();
    let form = RwSignal::new(RegisterForm::default());
    let busy = RwSignal::new(false);
    let submitted = RwSignal::new(false);
    let error_message = RwSignal::new(String::new());

    let field_error = move |field: &'static str| {
        if !submitted.get() {
            return None;
        }
        form.with(RegisterForm::validate).err().and_then(|e| e.get(field)).map(|e| e.to_string())
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        submitted.set(true);
        let Ok(registration) = form.with_untracked(RegisterForm::validate) else {
            return;
        };
        busy.set(true);
        error_message.set(String::new());

        let service = service.get_value();
        leptos::task::spawn_local(async move {
            if let Err(e) = service.register(registration).await {
                error_message.set(e.to_string());
            }
            busy.set(false);
        });
    };

    let fields = RegisterField::ALL
        .into_iter()
        .map(move |field| {
            view! {
                <label class="auth-label">
                    {field.label()}
                    <input
                        class="auth-input"
                        type=field.input_type()
                        name=field.name()
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|f| f.set(field, value));
                        }
                    />
                </label>
                <p class="field-error">{move || field_error(field.name())}</p>
            }
        })
        .collect_view();

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Birthday Reminder"</h1>
                <p class="auth-card__subtitle">"Create an account"</p>
                <form class="auth-form" on:submit=on_submit novalidate=true>
                    {fields}
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Register" }}
                    </button>
                </form>
                <Show when=move || !error_message.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error_message.get()}</p>
                </Show>
                <p class="auth-card__footer">
                    "Already registered? " <A href={AppRoute::login().path()}>"Sign in"</A>
                </p>
            </div>
        </div>
    }
}
