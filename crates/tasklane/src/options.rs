//! Static lookup tables the UI renders pickers and badges from.
//!
//! These carry no behaviour. Each list is in display order.

use crate::filter::SortField;
use crate::model::{Category, Priority, Recurrence, TaskStatus};

/// A selectable value paired with its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry<T> {
    pub value: T,
    pub label: &'static str,
}

const fn entry<T>(value: T, label: &'static str) -> OptionEntry<T> {
    OptionEntry { value, label }
}

pub const CATEGORY_OPTIONS: &[OptionEntry<Category>] = &[
    entry(Category::Work, "Work"),
    entry(Category::Personal, "Personal"),
    entry(Category::Health, "Health"),
    entry(Category::Finance, "Finance"),
    entry(Category::Other, "Other"),
];

pub const PRIORITY_OPTIONS: &[OptionEntry<Priority>] = &[
    entry(Priority::High, "High"),
    entry(Priority::Medium, "Medium"),
    entry(Priority::Low, "Low"),
];

pub const STATUS_OPTIONS: &[OptionEntry<TaskStatus>] = &[
    entry(TaskStatus::Pending, "Pending"),
    entry(TaskStatus::Completed, "Completed"),
];

pub const RECURRENCE_OPTIONS: &[OptionEntry<Recurrence>] = &[
    entry(Recurrence::None, "None"),
    entry(Recurrence::Daily, "Daily"),
    entry(Recurrence::Weekly, "Weekly"),
    entry(Recurrence::Monthly, "Monthly"),
    entry(Recurrence::Custom, "Custom"),
];

pub const SORT_OPTIONS: &[OptionEntry<SortField>] = &[
    entry(SortField::CreatedAt, "Date Created"),
    entry(SortField::DueDate, "Due Date"),
    entry(SortField::Priority, "Priority"),
    entry(SortField::Title, "Title"),
    entry(SortField::Order, "Custom Order"),
];

/// Palette offered when creating a tag.
pub const TAG_COLORS: &[&str] = &[
    "#ef4444", // red
    "#f97316", // orange
    "#f59e0b", // amber
    "#84cc16", // lime
    "#10b981", // emerald
    "#14b8a6", // teal
    "#06b6d4", // cyan
    "#0ea5e9", // sky
    "#3b82f6", // blue
    "#6366f1", // indigo
    "#8b5cf6", // violet
    "#d946ef", // fuchsia
    "#ec4899", // pink
    "#f43f5e", // rose
];

/// Looks up the display label for a value in one of the option tables.
pub fn label_for<T: PartialEq + Copy>(options: &[OptionEntry<T>], value: T) -> Option<&'static str> {
    options
        .iter()
        .find(|entry| entry.value == value)
        .map(|entry| entry.label)
}
