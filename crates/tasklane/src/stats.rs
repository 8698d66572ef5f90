//! Summary statistics over a task collection.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Category, Priority, Task, TaskStatus};

/// Trailing window, in days, for [`TaskStatistics::tasks_completed_by_day`].
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub pending_tasks: usize,
    /// Pending tasks whose due date is strictly in the past.
    pub overdue_tasks: usize,
    /// `completed / total`, or `0.0` for an empty collection.
    pub completion_rate: f64,
    /// Only categories that occur in the collection.
    pub tasks_by_category: BTreeMap<Category, usize>,
    /// Only priorities that occur in the collection.
    pub tasks_by_priority: BTreeMap<Priority, usize>,
    /// `YYYY-MM-DD` (UTC) -> completions on that day, within the trailing
    /// window. Days without completions are absent.
    pub tasks_completed_by_day: BTreeMap<String, usize>,
}

pub fn calculate_statistics(tasks: &[Task]) -> TaskStatistics {
    calculate_statistics_at(tasks, Utc::now())
}

pub fn calculate_statistics_at(tasks: &[Task], now: DateTime<Utc>) -> TaskStatistics {
    calculate_statistics_with_window(tasks, now, DEFAULT_WINDOW_DAYS)
}

pub fn calculate_statistics_with_window(
    tasks: &[Task],
    now: DateTime<Utc>,
    window_days: u32,
) -> TaskStatistics {
    let window_start = now - Duration::days(i64::from(window_days));
    let mut stats = TaskStatistics {
        total_tasks: tasks.len(),
        ..Default::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Completed => stats.completed_tasks += 1,
            TaskStatus::Pending => stats.pending_tasks += 1,
        }
        if task.is_overdue_at(now) {
            stats.overdue_tasks += 1;
        }
        *stats.tasks_by_category.entry(task.category).or_insert(0) += 1;
        *stats.tasks_by_priority.entry(task.priority).or_insert(0) += 1;

        if let (TaskStatus::Completed, Some(done)) = (task.status, task.completed_at) {
            if done >= window_start {
                let day = done.format("%Y-%m-%d").to_string();
                *stats.tasks_completed_by_day.entry(day).or_insert(0) += 1;
            }
        }
    }

    if stats.total_tasks > 0 {
        stats.completion_rate = stats.completed_tasks as f64 / stats.total_tasks as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutations::{create_task, NewTask};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 15, 12, 0, 0).unwrap()
    }

    fn task(category: Category, priority: Priority) -> Task {
        create_task(
            NewTask::new("t")
                .with_category(category)
                .with_priority(priority),
        )
        .unwrap()
    }

    fn completed_on(mut task: Task, when: DateTime<Utc>) -> Task {
        task.status = TaskStatus::Completed;
        task.completed_at = Some(when);
        task
    }

    #[test]
    fn test_empty_collection() {
        let stats = calculate_statistics(&[]);
        assert_eq!(stats, TaskStatistics::default());
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn test_counts_and_rate() {
        let tasks = vec![
            task(Category::Work, Priority::High),
            completed_on(task(Category::Work, Priority::Low), now()),
            task(Category::Health, Priority::High),
            completed_on(task(Category::Finance, Priority::High), now()),
        ];
        let stats = calculate_statistics_at(&tasks, now());
        assert_eq!(stats.total_tasks, 4);
        assert_eq!(stats.completed_tasks, 2);
        assert_eq!(stats.pending_tasks, 2);
        assert_eq!(stats.completion_rate, 0.5);

        assert_eq!(stats.tasks_by_category.get(&Category::Work), Some(&2));
        assert_eq!(stats.tasks_by_category.get(&Category::Health), Some(&1));
        assert_eq!(stats.tasks_by_category.get(&Category::Personal), None);
        assert_eq!(stats.tasks_by_priority.get(&Priority::High), Some(&3));
        assert_eq!(stats.tasks_by_priority.get(&Priority::Medium), None);
    }

    #[test]
    fn test_overdue_only_pending_and_strictly_past() {
        let mut late = task(Category::Work, Priority::High);
        late.due_date = Some(now() - Duration::days(1));
        let mut exactly_now = task(Category::Work, Priority::High);
        exactly_now.due_date = Some(now());
        let mut late_but_done = task(Category::Work, Priority::High);
        late_but_done.due_date = Some(now() - Duration::days(3));
        let late_but_done = completed_on(late_but_done, now());
        let undated = task(Category::Work, Priority::High);

        let stats = calculate_statistics_at(&[late, exactly_now, late_but_done, undated], now());
        assert_eq!(stats.overdue_tasks, 1);
    }

    #[test]
    fn test_completed_by_day_is_sparse_and_windowed() {
        let day = |d: u32, h: u32| Utc.with_ymd_and_hms(2024, 2, d, h, 0, 0).unwrap();
        let tasks = vec![
            completed_on(task(Category::Other, Priority::Low), day(14, 8)),
            completed_on(task(Category::Other, Priority::Low), day(14, 20)),
            completed_on(task(Category::Other, Priority::Low), day(10, 9)),
            // outside the 30-day window
            completed_on(
                task(Category::Other, Priority::Low),
                now() - Duration::days(31),
            ),
        ];
        let stats = calculate_statistics_at(&tasks, now());
        assert_eq!(stats.tasks_completed_by_day.len(), 2);
        assert_eq!(stats.tasks_completed_by_day.get("2024-02-14"), Some(&2));
        assert_eq!(stats.tasks_completed_by_day.get("2024-02-10"), Some(&1));
        assert_eq!(stats.completed_tasks, 4);
    }

    #[test]
    fn test_custom_window() {
        let tasks = vec![completed_on(
            task(Category::Other, Priority::Low),
            now() - Duration::days(5),
        )];
        let narrow = calculate_statistics_with_window(&tasks, now(), 3);
        assert!(narrow.tasks_completed_by_day.is_empty());
        let wide = calculate_statistics_with_window(&tasks, now(), 7);
        assert_eq!(wide.tasks_completed_by_day.len(), 1);
    }

    #[test]
    fn test_serializes_enum_keys_as_strings() {
        let tasks = vec![task(Category::Finance, Priority::High)];
        let value = serde_json::to_value(calculate_statistics_at(&tasks, now())).unwrap();
        assert_eq!(value["tasksByCategory"]["finance"], 1);
        assert_eq!(value["tasksByPriority"]["high"], 1);
        assert_eq!(value["totalTasks"], 1);
    }
}
