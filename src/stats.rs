use crate::models::{Employee, EmployeeStatus, Task, TaskStatus};

/// How many tasks the admin dashboard lists under "Recent Tasks".
pub const RECENT_TASKS: usize = 5;

/// Task totals by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn tally<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks.into_iter().fold(StatusCounts::default(), |mut c, t| {
            match t.status {
                TaskStatus::Pending => c.pending += 1,
                TaskStatus::InProgress => c.in_progress += 1,
                TaskStatus::Completed => c.completed += 1,
            }
            c
        })
    }

    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }

    /// Share of completed tasks in `[0.0, 1.0]`.
    ///
    /// # Returns
    /// - `0.0` when there are no tasks at all.
    pub fn completion_ratio(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.completed as f64 / total as f64,
        }
    }
}

/// Figures shown on the landing page; the shape depends on the role.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardStats {
    Admin {
        total_employees: usize,
        active_employees: usize,
        tasks: StatusCounts,
        recent: Vec<Task>,
    },
    Employee {
        tasks: StatusCounts,
        my_tasks: Vec<Task>,
    },
}

impl DashboardStats {
    /// Team-wide figures. `tasks` is expected newest first.
    pub fn for_admin(employees: &[Employee], tasks: &[Task]) -> Self {
        DashboardStats::Admin {
            total_employees: employees.len(),
            active_employees: employees
                .iter()
                .filter(|e| e.status == EmployeeStatus::Active)
                .count(),
            tasks: StatusCounts::tally(tasks),
            recent: tasks.iter().take(RECENT_TASKS).cloned().collect(),
        }
    }

    /// Figures over the employee's own tasks.
    pub fn for_employee(my_tasks: Vec<Task>) -> Self {
        DashboardStats::Employee {
            tasks: StatusCounts::tally(&my_tasks),
            my_tasks,
        }
    }

    pub fn counts(&self) -> StatusCounts {
        match self {
            DashboardStats::Admin { tasks, .. } | DashboardStats::Employee { tasks, .. } => *tasks,
        }
    }

    /// The task list shown under the stat cards.
    pub fn listed_tasks(&self) -> &[Task] {
        match self {
            DashboardStats::Admin { recent, .. } => recent,
            DashboardStats::Employee { my_tasks, .. } => my_tasks,
        }
    }
}
