//! The desk: session, record stores and access rules behind one handle.
//!
//! Front ends hold a `Desk` and go through it for every read and write.
//! Each operation resolves the signed-in identity, asks [`crate::access`]
//! whether the action is allowed, and only then touches a store.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::access;
use crate::error::{Error, Result};
use crate::models::{
    Employee, EmployeePatch, EmployeeQuery, EmployeeStatus, Identity, NewEmployee, NewTask, Route,
    Task, TaskField, TaskFilter, TaskPatch, TaskStatus,
};
use crate::seed;
use crate::session::{CredentialTable, SessionStore};
use crate::stats::DashboardStats;
use crate::storage::SessionSlot;
use crate::store::{EmployeeStore, TaskStore};

/// Snapshot used when a task is created for an unknown employee id.
pub const UNASSIGNED: &str = "Unassigned";

#[derive(Debug)]
pub struct Desk<S> {
    session: SessionStore<S>,
    employees: EmployeeStore,
    tasks: TaskStore,
}

fn forbidden(action: &str) -> Error {
    warn!(action, "forbidden");
    Error::Forbidden(action.to_string())
}

impl<S: SessionSlot> Desk<S> {
    /// Opens a desk over the demo credential table and seed records.
    pub fn open(slot: S) -> Result<Self> {
        Ok(Desk::new(
            SessionStore::open(slot, CredentialTable::demo())?,
            EmployeeStore::with_records(seed::employees()),
            TaskStore::with_records(seed::tasks()),
        ))
    }

    pub fn new(session: SessionStore<S>, employees: EmployeeStore, tasks: TaskStore) -> Self {
        Desk {
            session,
            employees,
            tasks,
        }
    }

    // ── Session ───────────────────────────────────────────────────────────

    pub fn login(&mut self, email: &str, credential: &str) -> Result<Identity> {
        self.session.login(email, credential)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.logout()
    }

    pub fn current_identity(&self) -> Option<&Identity> {
        self.session.current_identity()
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    fn actor(&self) -> Result<Identity> {
        self.session
            .current_identity()
            .cloned()
            .ok_or_else(|| forbidden("not signed in"))
    }

    /// Sidebar entries for the signed-in identity.
    pub fn navigation(&self) -> Result<Vec<Route>> {
        Ok(access::visible_navigation(&self.actor()?))
    }

    pub fn dashboard(&self) -> Result<DashboardStats> {
        let actor = self.actor()?;
        let tasks = self.tasks.list();
        if access::can_manage_employees(&actor) {
            Ok(DashboardStats::for_admin(&self.employees.list(), &tasks))
        } else {
            Ok(DashboardStats::for_employee(access::visible_tasks(&actor, &tasks)))
        }
    }

    // ── Employees ─────────────────────────────────────────────────────────

    fn require_employee_admin(&self, action: &str) -> Result<Identity> {
        let actor = self.actor()?;
        if !access::can_manage_employees(&actor) {
            return Err(forbidden(action));
        }
        Ok(actor)
    }

    pub fn list_employees(&self, query: &EmployeeQuery) -> Result<Vec<Employee>> {
        self.require_employee_admin("list employees")?;
        let found = self.employees.list_where(|e| query.matches(e));
        debug!(count = found.len(), "listed employees");
        Ok(found)
    }

    pub fn employee(&self, id: Uuid) -> Result<Employee> {
        self.require_employee_admin("view employee")?;
        self.employees
            .get(id)
            .cloned()
            .ok_or(Error::NotFound { kind: "employee", id })
    }

    pub fn create_employee(&mut self, new: NewEmployee) -> Result<Employee> {
        self.require_employee_admin("create employee")?;
        let employee = self.employees.create(new);
        info!(id = %employee.id, name = %employee.name, "employee added");
        Ok(employee)
    }

    pub fn update_employee(&mut self, id: Uuid, patch: EmployeePatch) -> Result<Employee> {
        self.require_employee_admin("edit employee")?;
        let employee = self.employees.update(id, patch)?;
        info!(%id, "employee updated");
        Ok(employee)
    }

    /// Removes an employee. Tasks assigned to them are left as they are.
    pub fn delete_employee(&mut self, id: Uuid) -> Result<()> {
        self.require_employee_admin("delete employee")?;
        self.employees.delete(id)?;
        info!(%id, "employee removed");
        Ok(())
    }

    // ── Tasks ─────────────────────────────────────────────────────────────

    /// Visible tasks matching `filter`, newest first.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let actor = self.actor()?;
        let found = self
            .tasks
            .list_where(|t| access::can_view_task(&actor, t) && filter.matches(t));
        debug!(count = found.len(), "listed tasks");
        Ok(found)
    }

    pub fn task(&self, id: Uuid) -> Result<Task> {
        let actor = self.actor()?;
        let task = self
            .tasks
            .get(id)
            .ok_or(Error::NotFound { kind: "task", id })?;
        if !access::can_view_task(&actor, task) {
            return Err(forbidden("view task"));
        }
        Ok(task.clone())
    }

    /// Active employees that a task can be assigned to.
    pub fn assignees(&self) -> Result<Vec<Employee>> {
        let actor = self.actor()?;
        if !access::can_create_task(&actor) {
            return Err(forbidden("list assignees"));
        }
        Ok(self
            .employees
            .list_where(|e| e.status == EmployeeStatus::Active))
    }

    pub fn create_task(&mut self, new: NewTask) -> Result<Task> {
        let actor = self.actor()?;
        if !access::can_create_task(&actor) {
            return Err(forbidden("create task"));
        }
        let name = self
            .employees
            .get(new.assigned_to)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| UNASSIGNED.to_string());
        let task = self.tasks.create(new, name);
        info!(id = %task.id, assignee = %task.assigned_to_name, "task created");
        Ok(task)
    }

    /// Applies `patch` if the signed-in identity may touch every field in it.
    /// An empty patch changes nothing, not even `updated_at`.
    ///
    /// A reassignment re-snapshots the assignee name from the employee list;
    /// an unknown assignee keeps the previous snapshot.
    pub fn update_task(&mut self, id: Uuid, mut patch: TaskPatch) -> Result<Task> {
        let actor = self.actor()?;
        let current = self
            .tasks
            .get(id)
            .ok_or(Error::NotFound { kind: "task", id })?;
        if !access::can_view_task(&actor, current) {
            return Err(forbidden(&format!("update task {id}")));
        }

        if patch.is_empty() {
            return Ok(current.clone());
        }

        if let Some(field) = patch
            .fields()
            .into_iter()
            .find(|f| !access::can_mutate_task(&actor, current, *f))
        {
            return Err(forbidden(&format!("change {field:?} of task {id}")));
        }

        if let Some(assignee) = patch.assigned_to {
            if patch.assigned_to_name.is_none() {
                patch.assigned_to_name = self.employees.get(assignee).map(|e| e.name.clone());
            }
        }

        let task = self.tasks.update(id, patch)?;
        info!(%id, status = %task.status, "task updated");
        Ok(task)
    }

    /// Moves a task to `status`. Allowed for admins and the task's assignee.
    pub fn set_status(&mut self, id: Uuid, status: TaskStatus) -> Result<Task> {
        self.update_task(id, TaskPatch::status(status))
    }

    pub fn delete_task(&mut self, id: Uuid) -> Result<()> {
        let actor = self.actor()?;
        let task = self
            .tasks
            .get(id)
            .ok_or(Error::NotFound { kind: "task", id })?;
        if !access::can_delete_task(&actor, task) {
            return Err(forbidden("delete task"));
        }
        self.tasks.delete(id)?;
        info!(%id, "task deleted");
        Ok(())
    }

    /// Whether the signed-in identity may change `field` of task `id`.
    pub fn can_mutate(&self, id: Uuid, field: TaskField) -> bool {
        match (self.session.current_identity(), self.tasks.get(id)) {
            (Some(actor), Some(task)) => access::can_mutate_task(actor, task, field),
            _ => false,
        }
    }
}
