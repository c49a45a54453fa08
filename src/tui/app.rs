use ratatui::widgets::TableState;
use uuid::Uuid;

use crate::desk::Desk;
use crate::error::Error;
use crate::forms::{EmployeeForm, TaskForm};
use crate::models::{
    Employee, EmployeePatch, EmployeeQuery, EmployeeStatus, Identity, Role, Route, Task, TaskField,
    TaskFilter, TaskPatch, TaskStatus,
};
use crate::stats::DashboardStats;
use crate::storage::SessionSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Sign-in form; shown whenever nobody is signed in.
    Login,
    Normal,
    Editing,
    Adding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    None,
    Title,
    Search,
}

/// Which record the multi-step form is building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Task,
    Employee,
}

/// State for the multi-step add/edit wizards.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub task: TaskForm,
    pub employee: EmployeeForm,
    /// Record being edited; `None` when adding.
    pub editing: Option<Uuid>,
    pub step: usize,
}

/// State for the sign-in form.
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub email: String,
    /// 0: email, 1: password
    pub step: usize,
}

/// Feedback line shown under the main view, like a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

pub const TASK_FORM_STEPS: usize = 5;
pub const EMPLOYEE_FORM_STEPS: usize = 4;

pub struct App<S> {
    pub desk: Desk<S>,
    pub routes: Vec<Route>,
    pub route: Route,
    pub stats: Option<DashboardStats>,
    pub tasks: Vec<Task>,
    pub task_state: TableState,
    pub employees: Vec<Employee>,
    pub employee_state: TableState,
    pub status_filter: Option<TaskStatus>,
    /// Query typed on the Tasks page.
    pub task_search: String,
    /// Query typed on the Employees page.
    pub employee_search: String,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub login: LoginState,
    pub form_kind: FormKind,
    pub form: FormState,
    pub notice: Option<Notice>,
}

impl<S: SessionSlot> App<S> {
    /// Creates the app, starting on the sign-in form unless a session was
    /// restored.
    pub fn new(desk: Desk<S>) -> App<S> {
        let mut app = App {
            desk,
            routes: Vec::new(),
            route: Route::Dashboard,
            stats: None,
            tasks: Vec::new(),
            task_state: TableState::default(),
            employees: Vec::new(),
            employee_state: TableState::default(),
            status_filter: None,
            task_search: String::new(),
            employee_search: String::new(),
            input_mode: InputMode::Login,
            input_field: InputField::None,
            input_buffer: String::new(),
            login: LoginState::default(),
            form_kind: FormKind::Task,
            form: FormState::default(),
            notice: None,
        };
        if app.desk.current_identity().is_some() {
            app.input_mode = InputMode::Normal;
        }
        app.reload();
        app
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.desk.current_identity()
    }

    pub fn is_admin(&self) -> bool {
        self.identity().map(|i| i.role == Role::Admin).unwrap_or(false)
    }

    fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
        });
    }

    fn error(&mut self, e: Error) {
        self.notice = Some(Notice {
            text: e.to_string(),
            is_error: true,
        });
    }

    /// Re-reads everything the current view shows from the desk.
    pub fn reload(&mut self) {
        if self.identity().is_none() {
            self.routes.clear();
            self.stats = None;
            self.tasks.clear();
            self.employees.clear();
            return;
        }

        self.routes = self.desk.navigation().unwrap_or_default();
        if !self.routes.contains(&self.route) {
            self.route = Route::Dashboard;
        }
        self.stats = self.desk.dashboard().ok();

        let filter = TaskFilter {
            status: self.status_filter,
            assigned_to: None,
            search: non_empty(&self.task_search),
        };
        self.tasks = self.desk.list_tasks(&filter).unwrap_or_default();
        clamp_selection(&mut self.task_state, self.tasks.len());

        self.employees = if self.routes.contains(&Route::Employees) {
            let query = EmployeeQuery {
                search: non_empty(&self.employee_search),
                status: None,
            };
            self.desk.list_employees(&query).unwrap_or_default()
        } else {
            Vec::new()
        };
        clamp_selection(&mut self.employee_state, self.employees.len());
    }

    // ── Sign-in ───────────────────────────────────────────────────────────

    fn handle_login_input(&mut self) {
        match self.login.step {
            0 => {
                if !self.input_buffer.trim().is_empty() {
                    self.login.email = self.input_buffer.trim().to_string();
                    self.login.step = 1;
                    self.input_buffer.clear();
                }
            }
            _ => {
                let password = std::mem::take(&mut self.input_buffer);
                match self.desk.login(&self.login.email, &password) {
                    Ok(identity) => {
                        self.info(format!("Welcome back, {}!", identity.name));
                        self.login = LoginState::default();
                        self.route = Route::Dashboard;
                        self.input_mode = InputMode::Normal;
                        self.reload();
                    }
                    Err(e) => {
                        self.error(e);
                        self.login.step = 0;
                        self.input_buffer = self.login.email.clone();
                    }
                }
            }
        }
    }

    pub fn logout(&mut self) {
        match self.desk.logout() {
            Ok(()) => {
                self.info("Signed out.");
                self.task_search.clear();
                self.employee_search.clear();
                self.status_filter = None;
                self.input_mode = InputMode::Login;
                self.login = LoginState::default();
                self.input_buffer.clear();
                self.reload();
            }
            Err(e) => self.error(e),
        }
    }

    // ── Navigation ────────────────────────────────────────────────────────

    pub fn next_route(&mut self) {
        if let Some(i) = self.routes.iter().position(|r| *r == self.route) {
            self.route = self.routes[(i + 1) % self.routes.len()];
        }
    }

    pub fn previous_route(&mut self) {
        if let Some(i) = self.routes.iter().position(|r| *r == self.route) {
            self.route = self.routes[(i + self.routes.len() - 1) % self.routes.len()];
        }
    }

    /// Jumps to the n-th sidebar entry (0-based), if it exists.
    pub fn select_route(&mut self, n: usize) {
        if let Some(route) = self.routes.get(n) {
            self.route = *route;
        }
    }

    /// Selects the next row in the current list.
    pub fn next(&mut self) {
        match self.route {
            Route::Tasks => step_selection(&mut self.task_state, self.tasks.len(), true),
            Route::Employees => {
                step_selection(&mut self.employee_state, self.employees.len(), true)
            }
            _ => {}
        }
    }

    /// Selects the previous row in the current list.
    pub fn previous(&mut self) {
        match self.route {
            Route::Tasks => step_selection(&mut self.task_state, self.tasks.len(), false),
            Route::Employees => {
                step_selection(&mut self.employee_state, self.employees.len(), false)
            }
            _ => {}
        }
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.task_state.selected().and_then(|i| self.tasks.get(i))
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.employee_state.selected().and_then(|i| self.employees.get(i))
    }

    // ── Task actions ──────────────────────────────────────────────────────

    /// Moves the selected task to `status`.
    pub fn set_selected_status(&mut self, status: TaskStatus) {
        if self.route != Route::Tasks {
            return;
        }
        if let Some(id) = self.selected_task().map(|t| t.id) {
            match self.desk.set_status(id, status) {
                Ok(task) => self.info(format!("'{}' is now {}.", task.title, task.status)),
                Err(e) => self.error(e),
            }
            self.reload();
        }
    }

    /// Advances the selected task to the next status.
    pub fn cycle_selected_status(&mut self) {
        if let Some(status) = self.selected_task().map(|t| t.status.cycle()) {
            self.set_selected_status(status);
        }
    }

    /// Cycles the status filter: all, pending, in progress, completed.
    pub fn cycle_status_filter(&mut self) {
        self.status_filter = match self.status_filter {
            None => Some(TaskStatus::Pending),
            Some(TaskStatus::Completed) => None,
            Some(s) => Some(s.cycle()),
        };
        self.reload();
    }

    /// Deletes the currently selected task or employee.
    pub fn delete_selected(&mut self) {
        let result = match self.route {
            Route::Tasks => match self.selected_task().map(|t| t.id) {
                Some(id) => self.desk.delete_task(id).map(|_| "Task deleted."),
                None => return,
            },
            Route::Employees => match self.selected_employee().map(|e| e.id) {
                Some(id) => self.desk.delete_employee(id).map(|_| "Employee removed."),
                None => return,
            },
            _ => return,
        };
        match result {
            Ok(msg) => self.info(msg),
            Err(e) => self.error(e),
        }
        self.reload();
    }

    /// Toggles the selected employee between active and inactive.
    pub fn toggle_employee_status(&mut self) {
        if self.route != Route::Employees {
            return;
        }
        if let Some(e) = self.selected_employee() {
            let id = e.id;
            let status = match e.status {
                EmployeeStatus::Active => EmployeeStatus::Inactive,
                EmployeeStatus::Inactive => EmployeeStatus::Active,
            };
            let patch = EmployeePatch {
                status: Some(status),
                ..Default::default()
            };
            match self.desk.update_employee(id, patch) {
                Ok(e) => self.info(format!("{} is now {}.", e.name, e.status)),
                Err(e) => self.error(e),
            }
            self.reload();
        }
    }

    // ── Text input ────────────────────────────────────────────────────────

    pub fn start_search(&mut self) {
        self.input_buffer = match self.route {
            Route::Tasks => self.task_search.clone(),
            Route::Employees => self.employee_search.clone(),
            _ => return,
        };
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::Search;
    }

    /// Starts renaming the selected task.
    pub fn start_edit_title(&mut self) {
        if self.route != Route::Tasks {
            return;
        }
        let Some(t) = self.selected_task() else { return };
        if !self.desk.can_mutate(t.id, TaskField::Title) {
            self.error(Error::Forbidden("only administrators can rename tasks".into()));
            return;
        }
        self.input_buffer = t.title.clone();
        self.input_mode = InputMode::Editing;
        self.input_field = InputField::Title;
    }

    /// Starts the add wizard for the current view.
    pub fn start_add(&mut self) {
        let kind = match self.route {
            Route::Tasks => FormKind::Task,
            Route::Employees => FormKind::Employee,
            _ => return,
        };
        self.form_kind = kind;
        self.form = FormState::default();
        self.input_buffer.clear();
        self.input_mode = InputMode::Adding;
    }

    /// Starts the edit wizard, pre-filled from the selected record.
    pub fn start_edit_selected(&mut self) {
        let mut form = FormState::default();
        match self.route {
            Route::Tasks => {
                let Some(t) = self.selected_task() else { return };
                if !self.desk.can_mutate(t.id, TaskField::Title) {
                    self.error(Error::Forbidden("only administrators can edit tasks".into()));
                    return;
                }
                form.task = TaskForm {
                    title: t.title.clone(),
                    description: t.description.clone(),
                    priority: t.priority.label().to_lowercase(),
                    assigned_to: t.assigned_to_name.clone(),
                    due_date: t.due_date.to_string(),
                };
                form.editing = Some(t.id);
                self.form_kind = FormKind::Task;
            }
            Route::Employees => {
                let Some(e) = self.selected_employee() else { return };
                form.employee = EmployeeForm {
                    name: e.name.clone(),
                    email: e.email.clone(),
                    department: e.department.clone(),
                    position: e.position.clone(),
                };
                form.editing = Some(e.id);
                self.form_kind = FormKind::Employee;
            }
            _ => return,
        }
        self.form = form;
        self.input_buffer = self.form_value(0);
        self.input_mode = InputMode::Adding;
    }

    /// Current text of the wizard's `step`-th field.
    fn form_value(&self, step: usize) -> String {
        match self.form_kind {
            FormKind::Task => match step {
                0 => self.form.task.title.clone(),
                1 => self.form.task.description.clone(),
                2 => self.form.task.priority.clone(),
                3 => self.form.task.assigned_to.clone(),
                _ => self.form.task.due_date.clone(),
            },
            FormKind::Employee => match step {
                0 => self.form.employee.name.clone(),
                1 => self.form.employee.email.clone(),
                2 => self.form.employee.department.clone(),
                _ => self.form.employee.position.clone(),
            },
        }
    }

    fn set_form_value(&mut self, step: usize, value: String) {
        match self.form_kind {
            FormKind::Task => match step {
                0 => self.form.task.title = value,
                1 => self.form.task.description = value,
                2 => self.form.task.priority = value,
                3 => self.form.task.assigned_to = value,
                _ => self.form.task.due_date = value,
            },
            FormKind::Employee => match step {
                0 => self.form.employee.name = value,
                1 => self.form.employee.email = value,
                2 => self.form.employee.department = value,
                _ => self.form.employee.position = value,
            },
        }
    }

    /// Handles Enter based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Login => self.handle_login_input(),
            InputMode::Adding => self.handle_form_input(),
            InputMode::Editing => self.handle_editing_input(),
            InputMode::Normal => {}
        }
    }

    /// Abandons whatever is being typed.
    pub fn cancel_input(&mut self) {
        match self.input_mode {
            InputMode::Login => {
                self.login = LoginState::default();
                self.input_buffer.clear();
            }
            _ => {
                self.input_mode = InputMode::Normal;
                self.input_field = InputField::None;
                self.input_buffer.clear();
            }
        }
    }

    fn handle_editing_input(&mut self) {
        match self.input_field {
            InputField::Search => {
                let query = self.input_buffer.trim().to_string();
                match self.route {
                    Route::Employees => self.employee_search = query,
                    _ => self.task_search = query,
                }
            }
            InputField::Title => {
                if let Some(id) = self.selected_task().map(|t| t.id) {
                    let patch = TaskPatch {
                        title: Some(self.input_buffer.trim().to_string()),
                        ..Default::default()
                    };
                    if self.input_buffer.trim().is_empty() {
                        self.error(Error::Validation("title is required".into()));
                    } else {
                        match self.desk.update_task(id, patch) {
                            Ok(_) => self.info("Task updated."),
                            Err(e) => self.error(e),
                        }
                    }
                }
            }
            InputField::None => {}
        }
        self.input_mode = InputMode::Normal;
        self.input_field = InputField::None;
        self.input_buffer.clear();
        self.reload();
    }

    /// Stores the typed value and moves to the next wizard step, submitting
    /// after the last one.
    fn handle_form_input(&mut self) {
        let step = self.form.step;
        let value = std::mem::take(&mut self.input_buffer);
        self.set_form_value(step, value);

        let steps = match self.form_kind {
            FormKind::Task => TASK_FORM_STEPS,
            FormKind::Employee => EMPLOYEE_FORM_STEPS,
        };
        if step + 1 < steps {
            self.form.step += 1;
            self.input_buffer = self.form_value(self.form.step);
            return;
        }

        let outcome = match self.form_kind {
            FormKind::Task => self.submit_task_form(),
            FormKind::Employee => self.submit_employee_form(),
        };
        match outcome {
            Ok(msg) => {
                self.info(msg);
                self.input_mode = InputMode::Normal;
            }
            Err(e) => {
                // Back to the first step with the entered values kept.
                self.error(e);
                self.form.step = 0;
                self.input_buffer = self.form_value(0);
            }
        }
        self.reload();
    }

    /// Resolves the typed assignee (name or id) against active employees.
    fn resolve_assignee(&self, typed: &str) -> Result<String, Error> {
        let typed = typed.trim();
        if Uuid::parse_str(typed).is_ok() {
            return Ok(typed.to_string());
        }
        let needle = typed.to_lowercase();
        self.desk
            .assignees()?
            .into_iter()
            .find(|e| !needle.is_empty() && e.name.to_lowercase().starts_with(&needle))
            .map(|e| e.id.to_string())
            .ok_or_else(|| Error::Validation(format!("no active employee named '{typed}'")))
    }

    /// The edited task's assignee, if the assignee field still shows the
    /// name it was pre-filled with.
    fn unchanged_assignee(&self, typed: &str) -> Option<Uuid> {
        let id = self.form.editing?;
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .filter(|t| t.assigned_to_name == typed.trim())
            .map(|t| t.assigned_to)
    }

    fn submit_task_form(&mut self) -> Result<&'static str, Error> {
        let mut form = self.form.task.clone();
        let kept = self.unchanged_assignee(&form.assigned_to);
        form.assigned_to = match kept {
            Some(id) => id.to_string(),
            None => self.resolve_assignee(&form.assigned_to)?,
        };
        match self.form.editing {
            Some(id) => {
                let mut patch = form.validate_patch()?;
                if kept.is_some() {
                    // Inactive, removed or renamed assignees stay as they are.
                    patch.assigned_to = None;
                }
                self.desk.update_task(id, patch)?;
                Ok("Task updated successfully.")
            }
            None => {
                self.desk.create_task(form.validate()?)?;
                Ok("Task created successfully.")
            }
        }
    }

    fn submit_employee_form(&mut self) -> Result<&'static str, Error> {
        let form = self.form.employee.clone();
        match self.form.editing {
            Some(id) => {
                self.desk.update_employee(id, form.validate_patch()?)?;
                Ok("Employee updated successfully.")
            }
            None => {
                self.desk.create_employee(form.validate()?)?;
                Ok("Employee added successfully.")
            }
        }
    }
}

fn non_empty(query: &str) -> Option<String> {
    Some(query.to_string()).filter(|q| !q.is_empty())
}

fn clamp_selection(state: &mut TableState, len: usize) {
    if len == 0 {
        state.select(None);
    } else if let Some(i) = state.selected() {
        if i >= len {
            state.select(Some(len - 1));
        }
    } else {
        state.select(Some(0));
    }
}

fn step_selection(state: &mut TableState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    state.select(Some(i));
}
