//! Role-based visibility and mutation rules.
//!
//! Every function here is pure and total over [`Role`]; adding a role forces
//! each rule to be revisited at compile time.

use crate::models::{Identity, Role, Route, Task, TaskField};

/// Tasks the identity may see: all of them for admins, their own for
/// employees. Order is preserved.
pub fn visible_tasks(identity: &Identity, tasks: &[Task]) -> Vec<Task> {
    tasks
        .iter()
        .filter(|t| can_view_task(identity, t))
        .cloned()
        .collect()
}

pub fn can_view_task(identity: &Identity, task: &Task) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::Employee => task.assigned_to == identity.id,
    }
}

/// Whether the identity may change `field` on `task`.
///
/// Employees may only move the status of tasks assigned to them.
pub fn can_mutate_task(identity: &Identity, task: &Task, field: TaskField) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::Employee => field == TaskField::Status && task.assigned_to == identity.id,
    }
}

pub fn can_create_task(identity: &Identity) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::Employee => false,
    }
}

pub fn can_delete_task(identity: &Identity, _task: &Task) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::Employee => false,
    }
}

pub fn can_manage_employees(identity: &Identity) -> bool {
    match identity.role {
        Role::Admin => true,
        Role::Employee => false,
    }
}

/// Sidebar entries for the identity, in display order.
pub fn visible_navigation(identity: &Identity) -> Vec<Route> {
    match identity.role {
        Role::Admin => vec![
            Route::Dashboard,
            Route::Employees,
            Route::Tasks,
            Route::Profile,
        ],
        Role::Employee => vec![Route::Dashboard, Route::Tasks, Route::Profile],
    }
}
