//! Filtering and sorting of task collections.
//!
//! [`TaskFilter`] expresses the list view the UI is showing: optional predicates
//! that are AND-combined, plus the sort settings applied afterwards by
//! [`apply_view`].
//!
//! - `status`, `priority`, `category`: exact match.
//! - `tags`: the task must carry at least one of the listed tag ids.
//! - `search`: case-insensitive substring of the title, description, any
//!   subtask title or any tag name.
//!
//! Sorting is stable and deterministic. Equal keys fall back to id order
//! (ascending in both directions), so the same input always produces the same
//! output.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::{Category, Priority, Task, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    DueDate,
    Priority,
    CreatedAt,
    Title,
    Order,
}

impl Default for SortField {
    fn default() -> Self {
        Self::CreatedAt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Desc
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    /// Tag ids; a task matches if it has any of them. Empty means no tag filter.
    pub tags: Vec<String>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_by = field;
        self.sort_direction = direction;
        self
    }

    /// Check if `task` satisfies every predicate of this filter.
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|s| s != task.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if self.category.is_some_and(|c| c != task.category) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|id| task.has_tag(id)) {
            return false;
        }
        match self.search.as_deref() {
            Some(term) if !term.is_empty() => matches_search(task, &term.to_lowercase()),
            _ => true,
        }
    }
}

/// `needle` must already be lowercase.
fn matches_search(task: &Task, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    contains(&task.title)
        || task.description.as_deref().is_some_and(contains)
        || task.subtasks.iter().any(|s| contains(&s.title))
        || task.tags.iter().any(|t| contains(&t.name))
}

/// Returns the tasks matching `filter`, in their original order.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// Returns a sorted copy of `tasks`.
///
/// A missing due date sorts as infinitely late, a missing order key after
/// every ordered task. Priority ranks high > medium > low. Titles compare
/// case-insensitively.
pub fn sort_tasks(tasks: &[Task], sort_by: SortField, direction: SortDirection) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        let primary = compare_by(a, b, sort_by);
        let primary = match direction {
            SortDirection::Asc => primary,
            SortDirection::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
    sorted
}

/// Filters then sorts, using the filter's own sort settings.
pub fn apply_view(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    let filtered = filter_tasks(tasks, filter);
    sort_tasks(&filtered, filter.sort_by, filter.sort_direction)
}

fn compare_by(a: &Task, b: &Task, field: SortField) -> Ordering {
    match field {
        SortField::DueDate => missing_last(a.due_date, b.due_date),
        SortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortField::Order => missing_last(a.order, b.order),
    }
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SubTask, TaskTag};
    use crate::mutations::{create_task, NewTask};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    fn task(title: &str) -> Task {
        create_task(NewTask::new(title)).unwrap()
    }

    fn tag(id: &str, name: &str) -> TaskTag {
        TaskTag {
            id: id.into(),
            name: name.into(),
            color: "#3b82f6".into(),
        }
    }

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    fn sample() -> Vec<Task> {
        let mut run = task("Go for a run");
        run.description = Some("30 minutes morning run".into());
        run.category = Category::Health;
        run.tags = vec![tag("tag4", "Ideas")];

        let mut bill = task("Pay electricity bill");
        bill.description = Some("Online payment through banking app".into());
        bill.priority = Priority::High;
        bill.category = Category::Finance;
        bill.tags = vec![tag("tag3", "Urgent"), tag("tag5", "Shopping")];

        let mut proposal = task("Complete project proposal");
        proposal.priority = Priority::High;
        proposal.category = Category::Work;
        proposal.status = TaskStatus::Completed;
        proposal.completed_at = Some(Utc::now());
        proposal.subtasks = vec![SubTask {
            id: "sub1".into(),
            title: "Research competition".into(),
            completed: true,
            created_at: Utc::now(),
        }];

        vec![run, bill, proposal]
    }

    #[test]
    fn test_empty_filter_returns_input_unchanged() {
        let tasks = sample();
        assert_eq!(filter_tasks(&tasks, &TaskFilter::default()), tasks);
    }

    #[test]
    fn test_search_scenario() {
        let tasks = sample();
        let found = filter_tasks(&tasks, &TaskFilter::new().with_search("run"));
        assert_eq!(titles(&found), vec!["Go for a run"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let tasks = sample();
        let by_desc = filter_tasks(&tasks, &TaskFilter::new().with_search("BANKING"));
        assert_eq!(titles(&by_desc), vec!["Pay electricity bill"]);

        let by_subtask = filter_tasks(&tasks, &TaskFilter::new().with_search("competition"));
        assert_eq!(titles(&by_subtask), vec!["Complete project proposal"]);

        let by_tag = filter_tasks(&tasks, &TaskFilter::new().with_search("urgent"));
        assert_eq!(titles(&by_tag), vec!["Pay electricity bill"]);
    }

    #[test]
    fn test_empty_search_is_ignored() {
        let tasks = sample();
        assert_eq!(filter_tasks(&tasks, &TaskFilter::new().with_search("")).len(), 3);
    }

    #[test]
    fn test_exact_match_fields_combine_with_and() {
        let tasks = sample();
        let high = filter_tasks(&tasks, &TaskFilter::new().with_priority(Priority::High));
        assert_eq!(high.len(), 2);

        let high_pending = filter_tasks(
            &tasks,
            &TaskFilter::new()
                .with_priority(Priority::High)
                .with_status(TaskStatus::Pending),
        );
        assert_eq!(titles(&high_pending), vec!["Pay electricity bill"]);

        let none = filter_tasks(
            &tasks,
            &TaskFilter::new()
                .with_category(Category::Health)
                .with_priority(Priority::High),
        );
        assert!(none.is_empty());
    }

    #[test]
    fn test_tag_filter_is_any_of() {
        let tasks = sample();
        let filter = TaskFilter::new().with_tags(vec!["tag4".into(), "tag5".into()]);
        let found = filter_tasks(&tasks, &filter);
        assert_eq!(titles(&found), vec!["Go for a run", "Pay electricity bill"]);

        let filter = TaskFilter::new().with_tags(vec!["unknown".into()]);
        assert!(filter_tasks(&tasks, &filter).is_empty());
    }

    #[test]
    fn test_sort_priority_desc_then_reversed() {
        let mut low = task("low");
        low.priority = Priority::Low;
        let mut high = task("high");
        high.priority = Priority::High;
        let medium = task("medium");
        let tasks = vec![low, medium, high];

        let desc = sort_tasks(&tasks, SortField::Priority, SortDirection::Desc);
        assert_eq!(titles(&desc), vec!["high", "medium", "low"]);

        let asc = sort_tasks(&tasks, SortField::Priority, SortDirection::Asc);
        assert_eq!(titles(&asc), vec!["low", "medium", "high"]);
    }

    #[test]
    fn test_sort_due_date_missing_is_last_ascending() {
        let mut a = task("a");
        a.due_date = Some(at(5));
        let b = task("b");
        let mut c = task("c");
        c.due_date = Some(at(2));
        let tasks = vec![a, b, c];

        let asc = sort_tasks(&tasks, SortField::DueDate, SortDirection::Asc);
        assert_eq!(titles(&asc), vec!["c", "a", "b"]);

        let desc = sort_tasks(&tasks, SortField::DueDate, SortDirection::Desc);
        assert_eq!(titles(&desc), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_title_case_insensitive() {
        let tasks = vec![task("banana"), task("Apple"), task("cherry")];
        let asc = sort_tasks(&tasks, SortField::Title, SortDirection::Asc);
        assert_eq!(titles(&asc), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_order_and_created_at() {
        let mut a = task("a");
        a.order = Some(2);
        a.created_at = at(3);
        let mut b = task("b");
        b.order = Some(0);
        b.created_at = at(1);
        let mut c = task("c");
        c.order = None;
        c.created_at = at(2);
        let tasks = vec![a, b, c];

        let by_order = sort_tasks(&tasks, SortField::Order, SortDirection::Asc);
        assert_eq!(titles(&by_order), vec!["b", "a", "c"]);

        let newest_first = sort_tasks(&tasks, SortField::CreatedAt, SortDirection::Desc);
        assert_eq!(titles(&newest_first), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_ties_break_by_id() {
        let mut x = task("same");
        x.id = "b".into();
        let mut y = task("same");
        y.id = "a".into();
        let tasks = vec![x, y];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort_tasks(&tasks, SortField::Title, direction);
            assert_eq!(sorted[0].id, "a");
            assert_eq!(sorted[1].id, "b");
        }
    }

    #[test]
    fn test_sort_leaves_input_untouched() {
        let tasks = vec![task("b"), task("a")];
        let _ = sort_tasks(&tasks, SortField::Title, SortDirection::Asc);
        assert_eq!(titles(&tasks), vec!["b", "a"]);
    }

    #[test]
    fn test_apply_view_filters_then_sorts() {
        let tasks = sample();
        let filter = TaskFilter::new()
            .with_priority(Priority::High)
            .sorted_by(SortField::Title, SortDirection::Asc);
        let view = apply_view(&tasks, &filter);
        assert_eq!(
            titles(&view),
            vec!["Complete project proposal", "Pay electricity bill"]
        );
    }
}
