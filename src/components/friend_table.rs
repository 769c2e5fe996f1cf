//! Sortable friend list with birthday countdowns.

#[cfg(test)]
#[path = "friend_table_test.rs"]
mod friend_table_test;

use chrono::NaiveDate;
use leptos::prelude::*;
use uuid::Uuid;

use crate::state::friends::{Friend, FriendsState, SortField, SortState};

/// Countdown label for the next birthday.
pub fn birthday_badge(days: Option<i64>) -> String {
    match days {
        Some(0) => "Today!".to_owned(),
        Some(1) => "Tomorrow".to_owned(),
        Some(n) => format!("in {n} days"),
        None => String::new(),
    }
}

/// Arrow shown next to the active sort column.
pub fn sort_indicator(sort: SortState, field: SortField) -> &'static str {
    if sort.field == field { sort.direction.arrow() } else { "" }
}

#[component]
pub fn FriendTable(
    friends: RwSignal<FriendsState>,
    today: NaiveDate,
    on_edit: Callback<Friend>,
    on_delete: Callback<Uuid>,
) -> impl IntoView {
    let headers = SortField::ALL
        .into_iter()
        .map(move |field| {
            view! {
                <th
                    class="friend-table__sortable"
                    on:click=move |_| friends.update(|s| s.sort_by(field))
                >
                    {field.label()}
                    " "
                    {move || friends.with(|s| sort_indicator(s.sort, field))}
                </th>
            }
        })
        .collect_view();

    let rows = move || {
        let visible: Vec<Friend> = friends.with(|s| s.sorted().into_iter().cloned().collect());
        visible
            .into_iter()
            .map(|friend| {
                let id = friend.id;
                let age = friend.age(today).map(|a| a.to_string()).unwrap_or_default();
                let badge = birthday_badge(friend.days_until_birthday(today));
                let target = friend.clone();
                view! {
                    <tr class="friend-table__row">
                        <td>{friend.first_name}</td>
                        <td>{friend.last_name}</td>
                        <td>{friend.phone}</td>
                        <td>{friend.city}</td>
                        <td>{friend.birthdate}</td>
                        <td>{age}</td>
                        <td class="friend-table__badge">{badge}</td>
                        <td class="friend-table__actions">
                            <button class="btn" on:click=move |_| on_edit.run(target.clone())>
                                "Edit"
                            </button>
                            <button class="btn btn--danger" on:click=move |_| on_delete.run(id)>
                                "Delete"
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let is_empty = move || friends.with(|s| s.filtered().is_empty());

    view! {
        <table class="friend-table">
            <thead>
                <tr>
                    {headers}
                    <th>"Age"</th>
                    <th>"Next birthday"</th>
                    <th></th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
        <Show when=is_empty>
            <p class="friend-table__empty">"No friends match your search."</p>
        </Show>
    }
}
