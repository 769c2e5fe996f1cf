//! Modal dialog for adding or editing a friend.

#[cfg(test)]
#[path = "friend_dialog_test.rs"]
mod friend_dialog_test;

use leptos::prelude::*;

use crate::state::friends::{FormField, FriendForm, FriendsState};

pub fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::FirstName => "First name",
        FormField::LastName => "Last name",
        FormField::Phone => "Phone",
        FormField::City => "City",
        FormField::Birthdate => "Birthdate",
    }
}

pub fn input_type(field: FormField) -> &'static str {
    match field {
        FormField::Phone => "tel",
        FormField::Birthdate => "date",
        FormField::FirstName | FormField::LastName | FormField::City => "text",
    }
}

pub fn placeholder(field: FormField) -> &'static str {
    match field {
        FormField::Phone => "07XXXXXXXX",
        FormField::Birthdate => "YYYY-MM-DD",
        FormField::FirstName | FormField::LastName | FormField::City => "",
    }
}

pub fn dialog_title(form: Option<&FriendForm>) -> &'static str {
    if form.is_some_and(FriendForm::is_editing) { "Edit friend" } else { "Add friend" }
}

/// Shown while `friends` has an open form.
#[component]
pub fn FriendDialog(friends: RwSignal<FriendsState>, on_save: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let inputs = FormField::ALL
        .into_iter()
        .map(move |field| {
            let value = move || friends.with(|s| s.form().map(|f| f.values.get(field).to_owned()).unwrap_or_default());
            let error = move || {
                friends
                    .with(|s| s.form().and_then(|f| f.visible_error(field)))
                    .map(|e| e.to_string())
            };
            view! {
                <label class="dialog__label">
                    {field_label(field)}
                    <input
                        class="dialog__input"
                        type=input_type(field)
                        name=field.name()
                        placeholder=placeholder(field)
                        prop:value=value
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            friends.update(|s| s.set_field(field, text));
                        }
                        on:blur=move |_| friends.update(|s| s.touch_field(field))
                    />
                </label>
                <p class="field-error">{error}</p>
            }
        })
        .collect_view();

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog dialog--friend" on:click=move |ev| ev.stop_propagation()>
                <h2 class="dialog__title">{move || friends.with(|s| dialog_title(s.form()))}</h2>
                <form
                    class="dialog__form"
                    novalidate=true
                    on:submit=move |ev: leptos::ev::SubmitEvent| {
                        ev.prevent_default();
                        on_save.run(());
                    }
                >
                    {inputs}
                    <div class="dialog__actions">
                        <button class="btn" type="button" on:click=move |_| on_cancel.run(())>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" type="submit">
                            "Save"
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
