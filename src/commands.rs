use chrono::{DateTime, Local, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use uuid::Uuid;

use crate::access;
use crate::desk::Desk;
use crate::models::{
    Employee, EmployeeQuery, EmployeeStatus, Priority, Task, TaskFilter, TaskStatus,
};
use crate::stats::DashboardStats;
use crate::storage::SessionSlot;

fn header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|l| Cell::new(l).add_attribute(Attribute::Bold))
        .collect()
}

/// Table color for a task status badge.
pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Yellow,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Completed => Color::Green,
    }
}

/// Table color for a priority badge.
pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Grey,
        Priority::Medium => Color::Blue,
        Priority::High => Color::Red,
    }
}

/// Signs in and persists the session.
pub fn cmd_login<S: SessionSlot>(desk: &mut Desk<S>, email: String, password: String) {
    match desk.login(&email, &password) {
        Ok(identity) => println!("Welcome back, {} ({}).", identity.name, identity.role.title()),
        Err(e) => eprintln!("Login failed: {}. Try the demo credentials.", e),
    }
}

/// Signs out. Succeeds even if nobody is signed in.
pub fn cmd_logout<S: SessionSlot>(desk: &mut Desk<S>) {
    match desk.logout() {
        Ok(()) => println!("Signed out."),
        Err(e) => eprintln!("Failed to sign out: {}", e),
    }
}

/// Prints the signed-in identity.
pub fn cmd_whoami<S: SessionSlot>(desk: &Desk<S>) {
    match desk.current_identity() {
        Some(identity) => {
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.add_row(vec![Cell::new("Name"), Cell::new(&identity.name)]);
            table.add_row(vec![Cell::new("Email"), Cell::new(&identity.email)]);
            table.add_row(vec![Cell::new("Role"), Cell::new(identity.role.title())]);
            table.add_row(vec![
                Cell::new("Department"),
                Cell::new(identity.department.as_deref().unwrap_or("-")),
            ]);
            println!("{table}");
        }
        None => println!("Not signed in."),
    }
}

/// Lists the navigation entries available to the signed-in identity.
pub fn cmd_nav<S: SessionSlot>(desk: &Desk<S>) {
    let routes = match desk.navigation() {
        Ok(routes) => routes,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    if let Some(identity) = desk.current_identity() {
        for route in routes {
            println!("{:<10} {}", route.label(identity.role), route.path());
        }
    }
}

/// Prints the dashboard figures for the signed-in identity.
pub fn cmd_dashboard<S: SessionSlot>(desk: &Desk<S>) {
    let stats = match desk.dashboard() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    let counts = stats.counts();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if let DashboardStats::Admin {
        total_employees,
        active_employees,
        ..
    } = &stats
    {
        table.add_row(vec![
            Cell::new("Employees"),
            Cell::new(format!("{} ({} active)", total_employees, active_employees)),
        ]);
    }
    table.add_row(vec![Cell::new("Pending"), Cell::new(counts.pending).fg(Color::Yellow)]);
    table.add_row(vec![Cell::new("In Progress"), Cell::new(counts.in_progress).fg(Color::Cyan)]);
    table.add_row(vec![Cell::new("Completed"), Cell::new(counts.completed).fg(Color::Green)]);
    table.add_row(vec![
        Cell::new("Done"),
        Cell::new(format!("{:.0}%", counts.completion_ratio() * 100.0)),
    ]);
    println!("{table}");

    let title = match stats {
        DashboardStats::Admin { .. } => "Recent Tasks",
        DashboardStats::Employee { .. } => "My Tasks",
    };
    println!("{title}");
    print_tasks(stats.listed_tasks(), matches!(stats, DashboardStats::Admin { .. }));
}

/// Lists tasks visible to the signed-in identity.
pub fn cmd_tasks<S: SessionSlot>(
    desk: &Desk<S>,
    status: Option<String>,
    search: Option<String>,
    assignee: Option<String>,
) {
    let status = match status.map(|s| s.parse::<TaskStatus>()).transpose() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let assigned_to = match assignee.map(|a| Uuid::parse_str(&a)).transpose() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Invalid assignee id: {}", e);
            return;
        }
    };
    let filter = TaskFilter {
        status,
        assigned_to,
        search,
    };
    match desk.list_tasks(&filter) {
        Ok(tasks) if tasks.is_empty() => println!("No tasks found."),
        Ok(tasks) => {
            let show_assignee = desk
                .current_identity()
                .map(access::can_manage_employees)
                .unwrap_or(false);
            print_tasks(&tasks, show_assignee);
        }
        Err(e) => eprintln!("{}", e),
    }
}

/// Prints one task in detail.
pub fn cmd_task<S: SessionSlot>(desk: &Desk<S>, id: String) {
    let id = match Uuid::parse_str(&id) {
        Ok(id) => id,
        Err(e) => {
            eprintln!("Invalid task id '{}': {}", id, e);
            return;
        }
    };
    let task = match desk.task(id) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };
    let description = if task.description.is_empty() {
        "No description provided.".to_string()
    } else {
        task.description.clone()
    };
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let stamp = |t: DateTime<Utc>| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    table.add_row(vec![
        Cell::new("Title"),
        Cell::new(&task.title).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Description"), Cell::new(description)]);
    table.add_row(vec![
        Cell::new("Status"),
        Cell::new(task.status).fg(status_color(task.status)),
    ]);
    table.add_row(vec![
        Cell::new("Priority"),
        Cell::new(task.priority).fg(priority_color(task.priority)),
    ]);
    table.add_row(vec![Cell::new("Assigned to"), Cell::new(&task.assigned_to_name)]);
    table.add_row(vec![Cell::new("Due"), Cell::new(task.due_date)]);
    table.add_row(vec![Cell::new("Created"), Cell::new(stamp(task.created_at))]);
    table.add_row(vec![Cell::new("Updated"), Cell::new(stamp(task.updated_at))]);
    println!("{table}");
}

/// Lists employees. Administrators only.
pub fn cmd_employees<S: SessionSlot>(desk: &Desk<S>, search: Option<String>) {
    let query = EmployeeQuery {
        search,
        status: None,
    };
    match desk.list_employees(&query) {
        Ok(employees) if employees.is_empty() => println!("No employees found."),
        Ok(employees) => print_employees(&employees),
        Err(e) => eprintln!("{}", e),
    }
}

fn print_tasks(tasks: &[Task], show_assignee: bool) {
    let today = Local::now().date_naive();
    let mut labels = vec!["ID", "Title", "Priority", "Status", "Due"];
    if show_assignee {
        labels.push("Assigned To");
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&labels));

    for t in tasks {
        let overdue = t.due_date < today && t.status != TaskStatus::Completed;
        let mut row = vec![
            Cell::new(t.id),
            Cell::new(&t.title),
            Cell::new(t.priority).fg(priority_color(t.priority)),
            Cell::new(t.status).fg(status_color(t.status)),
            Cell::new(t.due_date).fg(if overdue { Color::Red } else { Color::Reset }),
        ];
        if show_assignee {
            row.push(Cell::new(&t.assigned_to_name));
        }
        table.add_row(row);
    }

    println!("{table}");
}

fn print_employees(employees: &[Employee]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(&[
            "ID",
            "Name",
            "Email",
            "Department",
            "Position",
            "Status",
            "Joined",
            "Tasks",
        ]));

    for e in employees {
        let status_color = match e.status {
            EmployeeStatus::Active => Color::Green,
            EmployeeStatus::Inactive => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(e.id),
            Cell::new(&e.name),
            Cell::new(&e.email),
            Cell::new(&e.department),
            Cell::new(&e.position),
            Cell::new(e.status).fg(status_color),
            Cell::new(e.joined_at),
            Cell::new(e.tasks_count),
        ]);
    }

    println!("{table}");
}
