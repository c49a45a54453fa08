use chrono::{NaiveDate, Utc};
use teamdesk::models::{Employee, EmployeeStatus, Priority, Task, TaskStatus};
use teamdesk::seed;
use teamdesk::stats::{DashboardStats, StatusCounts, RECENT_TASKS};
use uuid::Uuid;

fn task(status: TaskStatus) -> Task {
    let now = Utc::now();
    Task {
        id: Uuid::new_v4(),
        title: format!("{status} task"),
        description: String::new(),
        status,
        priority: Priority::Medium,
        assigned_to: Uuid::from_u128(7),
        assigned_to_name: "Sam".into(),
        created_at: now,
        updated_at: now,
        due_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    }
}

#[test]
fn test_tally_counts_each_status() {
    let tasks = vec![
        task(TaskStatus::Pending),
        task(TaskStatus::Completed),
        task(TaskStatus::InProgress),
        task(TaskStatus::Completed),
    ];
    let counts = StatusCounts::tally(&tasks);
    assert_eq!(
        counts,
        StatusCounts {
            pending: 1,
            in_progress: 1,
            completed: 2,
        }
    );
    assert_eq!(counts.total(), 4);
    assert!((counts.completion_ratio() - 0.5).abs() < f64::EPSILON);
}

#[test]
fn test_completion_ratio_without_tasks() {
    assert_eq!(StatusCounts::default().completion_ratio(), 0.0);
}

#[test]
fn test_admin_dashboard_caps_recent_tasks() {
    let tasks: Vec<Task> = (0..8).map(|_| task(TaskStatus::Pending)).collect();
    let stats = DashboardStats::for_admin(&seed::employees(), &tasks);
    assert_eq!(stats.listed_tasks().len(), RECENT_TASKS);
    assert_eq!(stats.listed_tasks()[0].id, tasks[0].id);
    assert_eq!(stats.counts().pending, 8);
}

#[test]
fn test_admin_dashboard_counts_active_employees() {
    let employees: Vec<Employee> = seed::employees();
    let inactive = employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Inactive)
        .count();
    match DashboardStats::for_admin(&employees, &[]) {
        DashboardStats::Admin {
            total_employees,
            active_employees,
            recent,
            ..
        } => {
            assert_eq!(total_employees, employees.len());
            assert_eq!(active_employees, employees.len() - inactive);
            assert!(recent.is_empty());
        }
        other => panic!("unexpected stats: {other:?}"),
    }
}

#[test]
fn test_employee_dashboard_lists_every_own_task() {
    let mine: Vec<Task> = (0..7).map(|_| task(TaskStatus::InProgress)).collect();
    let stats = DashboardStats::for_employee(mine.clone());
    assert_eq!(stats.listed_tasks(), mine.as_slice());
    assert_eq!(stats.counts().in_progress, 7);
}
