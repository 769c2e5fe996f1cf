//! Protected friend list page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entered only through the route guard. Owns the in-memory `FriendsState`
//! for its lifetime; leaving the page or reloading resets it to the seeds.

#[cfg(test)]
#[path = "birthdays_test.rs"]
mod birthdays_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use uuid::Uuid;

use crate::components::friend_dialog::FriendDialog;
use crate::components::friend_table::FriendTable;
use crate::config::AppConfig;
use crate::net::types::User;
use crate::state::auth::{AuthState, BrowserAuthService};
use crate::state::friends::{Friend, FriendsState};
use crate::util::birthday;
use crate::util::guard::install_unauth_redirect;

/// Text of the destructive confirmation prompt.
pub fn delete_prompt(friend: &Friend) -> String {
    format!("Are you sure you want to delete {} from your friends?", friend.full_name())
}

/// Header summary for birthdays inside the reminder window.
pub fn upcoming_summary(count: usize, window_days: i64) -> String {
    match count {
        0 => format!("No birthdays in the next {window_days} days"),
        1 => format!("1 birthday in the next {window_days} days"),
        n => format!("{n} birthdays in the next {window_days} days"),
    }
}

fn confirm_delete(friend: &Friend) -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(&delete_prompt(friend)).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = friend;
        false
    }
}

#[component]
pub fn BirthdaysPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let service = expect_context::<StoredValue<BrowserAuthService, LocalStorage>>();
    let window_days = expect_context::<AppConfig>().upcoming_window_days;
    install_unauth_redirect(auth, use_navigate());

    let friends = RwSignal::new(FriendsState::seeded());
    let today = birthday::today();

    let on_edit = Callback::new(move |friend: Friend| friends.update(|s| s.edit(&friend)));
    let on_delete = Callback::new(move |id: Uuid| {
        friends.update(|s| {
            if s.delete(id, confirm_delete) {
                log::debug!("deleted friend {id}");
            }
        });
    });
    let on_save = Callback::new(move |()| {
        let owner = service.with_value(BrowserAuthService::current_user_id);
        friends.update(|s| {
            if let Err(errors) = s.save(owner) {
                log::debug!("friend form rejected: {errors}");
            }
        });
    });
    let on_cancel = Callback::new(move |()| friends.update(FriendsState::close));
    let on_logout = move |_| service.with_value(BrowserAuthService::logout);

    let greeting = move || auth.with(|a| a.user.as_ref().map(User::display_name)).unwrap_or_default();
    let upcoming = move || upcoming_summary(friends.with(|s| s.upcoming_count(today, window_days)), window_days);

    view! {
        <div class="birthdays-page">
            <header class="birthdays-header">
                <div>
                    <h1>"Birthday Reminder"</h1>
                    <p class="birthdays-header__user">{greeting}</p>
                </div>
                <button class="btn" on:click=on_logout>"Log out"</button>
            </header>
            <section class="birthdays-toolbar">
                <input
                    class="birthdays-search"
                    type="search"
                    placeholder="Search by name or city"
                    prop:value=move || friends.with(|s| s.search_term.clone())
                    on:input=move |ev| {
                        let term = event_target_value(&ev);
                        friends.update(|s| s.set_search(term));
                    }
                />
                <button class="btn btn--primary" on:click=move |_| friends.update(FriendsState::open_add)>
                    "Add friend"
                </button>
            </section>
            <p class="birthdays-upcoming">{upcoming}</p>
            <FriendTable friends=friends today=today on_edit=on_edit on_delete=on_delete/>
            <Show when=move || friends.with(|s| s.form().is_some())>
                <FriendDialog friends=friends on_save=on_save on_cancel=on_cancel/>
            </Show>
        </div>
    }
}
