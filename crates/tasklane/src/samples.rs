//! Demo data shown on first run, when the store is empty.

use chrono::{DateTime, Duration, Utc};

use crate::model::{Category, Priority, Recurrence, SubTask, Task, TaskStatus, TaskTag};

/// `(id, name, color)` of the demo tags.
pub const SAMPLE_TAGS: &[(&str, &str, &str)] = &[
    ("tag1", "Home", "#ef4444"),
    ("tag2", "Office", "#3b82f6"),
    ("tag3", "Urgent", "#f97316"),
    ("tag4", "Ideas", "#8b5cf6"),
    ("tag5", "Shopping", "#10b981"),
];

pub fn sample_tags() -> Vec<TaskTag> {
    SAMPLE_TAGS
        .iter()
        .map(|(id, name, color)| TaskTag {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect()
}

pub fn generate_sample_tasks() -> Vec<Task> {
    generate_sample_tasks_at(Utc::now())
}

pub fn generate_sample_tasks_at(now: DateTime<Utc>) -> Vec<Task> {
    let tags = sample_tags();
    let hours_ago = |h: i64| now - Duration::hours(h);

    vec![
        Task {
            id: "sample1".into(),
            title: "Complete project proposal".into(),
            description: Some("Finish the proposal for the new client project".into()),
            status: TaskStatus::Pending,
            priority: Priority::High,
            category: Category::Work,
            due_date: Some(now + Duration::days(1)),
            created_at: now,
            updated_at: now,
            completed_at: None,
            recurrence: Recurrence::None,
            recurrence_end_date: None,
            tags: vec![tags[0].clone(), tags[2].clone()],
            subtasks: vec![
                SubTask {
                    id: "sub1".into(),
                    title: "Research competition".into(),
                    completed: true,
                    created_at: now,
                },
                SubTask {
                    id: "sub2".into(),
                    title: "Create wireframes".into(),
                    completed: false,
                    created_at: now,
                },
            ],
            attachments: Vec::new(),
            order: Some(0),
        },
        Task {
            id: "sample2".into(),
            title: "Go for a run".into(),
            description: Some("30 minutes morning run".into()),
            status: TaskStatus::Completed,
            priority: Priority::Medium,
            category: Category::Health,
            due_date: None,
            created_at: hours_ago(2),
            updated_at: hours_ago(1),
            completed_at: Some(hours_ago(1)),
            recurrence: Recurrence::Daily,
            recurrence_end_date: None,
            tags: vec![tags[3].clone()],
            subtasks: Vec::new(),
            attachments: Vec::new(),
            order: Some(1),
        },
        Task {
            id: "sample3".into(),
            title: "Pay electricity bill".into(),
            description: Some("Online payment through banking app".into()),
            status: TaskStatus::Pending,
            priority: Priority::High,
            category: Category::Finance,
            due_date: Some(now + Duration::days(7)),
            created_at: hours_ago(5),
            updated_at: hours_ago(5),
            completed_at: None,
            recurrence: Recurrence::None,
            recurrence_end_date: None,
            tags: vec![tags[2].clone(), tags[4].clone()],
            subtasks: Vec::new(),
            attachments: Vec::new(),
            order: Some(2),
        },
    ]
}
