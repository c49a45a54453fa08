//! Input validation at the view boundary.
//!
//! Forms hold raw text as typed by the user and convert into the typed
//! records the desk accepts. The record stores themselves never validate.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{EmployeePatch, NewEmployee, NewTask, Priority, TaskPatch};

/// Due dates are entered as `YYYY-MM-DD`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a due date in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| Error::Validation(format!("invalid date '{s}': {e}. Use YYYY-MM-DD.")))
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn parse_id(field: &str, value: &str) -> Result<Uuid> {
    let value = required(field, value)?;
    Uuid::parse_str(&value)
        .map_err(|_| Error::Validation(format!("{field} '{value}' is not a valid id")))
}

/// Raw "Add Task" / "Edit Task" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    /// Empty means medium.
    pub priority: String,
    pub assigned_to: String,
    pub due_date: String,
}

impl TaskForm {
    pub fn validate(&self) -> Result<NewTask> {
        let title = required("title", &self.title)?;
        let priority = if self.priority.trim().is_empty() {
            Priority::default()
        } else {
            self.priority.parse()?
        };
        let assigned_to = parse_id("assignee", &self.assigned_to)?;
        let due_date = parse_date(&required("due date", &self.due_date)?)?;
        Ok(NewTask {
            title,
            description: self.description.trim().to_string(),
            priority,
            assigned_to,
            due_date,
        })
    }

    /// Validates the form as an edit, producing a patch that sets every
    /// field. The assignee name snapshot is filled in by the desk.
    pub fn validate_patch(&self) -> Result<TaskPatch> {
        let new = self.validate()?;
        Ok(TaskPatch {
            title: Some(new.title),
            description: Some(new.description),
            priority: Some(new.priority),
            assigned_to: Some(new.assigned_to),
            due_date: Some(new.due_date),
            ..Default::default()
        })
    }
}

/// Raw "Add Employee" / "Edit Employee" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
}

impl EmployeeForm {
    pub fn validate(&self) -> Result<NewEmployee> {
        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        if !email.contains('@') {
            return Err(Error::Validation(format!("'{email}' is not an email address")));
        }
        Ok(NewEmployee {
            name,
            email,
            department: required("department", &self.department)?,
            position: required("position", &self.position)?,
        })
    }

    pub fn validate_patch(&self) -> Result<EmployeePatch> {
        let new = self.validate()?;
        Ok(EmployeePatch {
            name: Some(new.name),
            email: Some(new.email),
            department: Some(new.department),
            position: Some(new.position),
            status: None,
        })
    }
}
