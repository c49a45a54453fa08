use chrono::{Duration, Local, Utc};
use uuid::Uuid;

use crate::models::{Employee, EmployeeStatus, Priority, Task, TaskStatus};

/// Id shared by the demo employee account and its employee record.
pub const DEMO_EMPLOYEE_ID: Uuid = Uuid::from_u128(2);

/// Demo employees, in display order. Dates are relative to today.
pub fn employees() -> Vec<Employee> {
    let today = Local::now().date_naive();
    let employee = |id: u128,
                    name: &str,
                    email: &str,
                    department: &str,
                    position: &str,
                    days: i64,
                    tasks: u32| Employee {
        id: Uuid::from_u128(id),
        name: name.into(),
        email: email.into(),
        department: department.into(),
        position: position.into(),
        status: EmployeeStatus::Active,
        joined_at: today - Duration::days(days),
        tasks_count: tasks,
    };

    let mut emily = employee(
        5,
        "Emily Davis",
        "emily.davis@company.com",
        "Marketing",
        "Content Strategist",
        120,
        1,
    );
    emily.status = EmployeeStatus::Inactive;

    vec![
        employee(
            2,
            "John Employee",
            "employee@company.com",
            "Engineering",
            "Software Engineer",
            540,
            3,
        ),
        employee(3, "Sarah Chen", "sarah.chen@company.com", "Design", "Product Designer", 410, 2),
        employee(
            4,
            "Mike Johnson",
            "mike.johnson@company.com",
            "Engineering",
            "DevOps Engineer",
            300,
            1,
        ),
        emily,
    ]
}

/// Demo tasks, newest first.
pub fn tasks() -> Vec<Task> {
    let today = Local::now().date_naive();
    let now = Utc::now();
    let task = |id: u128,
                title: &str,
                description: &str,
                status: TaskStatus,
                priority: Priority,
                assignee: (u128, &str),
                age_days: i64,
                due_in: i64| Task {
        id: Uuid::from_u128(id),
        title: title.into(),
        description: description.into(),
        status,
        priority,
        assigned_to: Uuid::from_u128(assignee.0),
        assigned_to_name: assignee.1.into(),
        created_at: now - Duration::days(age_days),
        updated_at: now - Duration::days(age_days / 2),
        due_date: today + Duration::days(due_in),
    };

    let john = (2, "John Employee");
    let sarah = (3, "Sarah Chen");
    let mike = (4, "Mike Johnson");
    let emily = (5, "Emily Davis");

    vec![
        task(
            107,
            "Fix login redirect loop",
            "Users bounce between /login and /dashboard after the session expires.",
            TaskStatus::Pending,
            Priority::High,
            john,
            1,
            2,
        ),
        task(
            106,
            "Design onboarding screens",
            "Wireframes and final mockups for the first-run experience.",
            TaskStatus::InProgress,
            Priority::Medium,
            sarah,
            3,
            7,
        ),
        task(
            105,
            "Set up CI pipeline",
            "Run lint, tests and the release build on every push.",
            TaskStatus::InProgress,
            Priority::High,
            mike,
            5,
            4,
        ),
        task(
            104,
            "Write API documentation",
            "Document every endpoint of the internal task API.",
            TaskStatus::InProgress,
            Priority::Medium,
            john,
            8,
            10,
        ),
        task(
            103,
            "Quarterly newsletter draft",
            "",
            TaskStatus::Pending,
            Priority::Low,
            emily,
            12,
            -3,
        ),
        task(
            102,
            "Update brand color tokens",
            "Replace the legacy palette in the shared style sheet.",
            TaskStatus::Completed,
            Priority::Low,
            sarah,
            20,
            -6,
        ),
        task(
            101,
            "Migrate database backups",
            "Move nightly backups to the new storage bucket.",
            TaskStatus::Completed,
            Priority::High,
            john,
            30,
            -12,
        ),
    ]
}
