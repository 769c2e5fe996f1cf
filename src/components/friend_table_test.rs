use super::*;
use crate::state::friends::SortDirection;

#[test]
fn birthday_badge_labels() {
    assert_eq!(birthday_badge(Some(0)), "Today!");
    assert_eq!(birthday_badge(Some(1)), "Tomorrow");
    assert_eq!(birthday_badge(Some(12)), "in 12 days");
    assert_eq!(birthday_badge(None), "");
}

#[test]
fn sort_indicator_marks_active_column_only() {
    let sort = SortState { field: SortField::City, direction: SortDirection::Desc };
    assert_eq!(sort_indicator(sort, SortField::City), "▼");
    assert_eq!(sort_indicator(sort, SortField::FirstName), "");
    assert_eq!(sort_indicator(SortState::default(), SortField::FirstName), "▲");
}
