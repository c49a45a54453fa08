//! In-memory record collections.
//!
//! A [`RecordStore`] keeps records in a `Vec` in display order and finds them
//! by linear scan. Mutations take `&mut self`; an update is applied to a copy
//! and swapped in whole, so readers never see a partially applied change.

use chrono::{Local, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{
    Employee, EmployeePatch, EmployeeStatus, NewEmployee, NewTask, Task, TaskPatch, TaskStatus,
};

/// Where newly created records are placed in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Front,
    Back,
}

/// An entity that lives in a [`RecordStore`].
pub trait Record: Clone {
    /// Name used in `NotFound` errors and logs.
    const KIND: &'static str;
    const PLACEMENT: Placement;

    fn id(&self) -> Uuid;
}

impl Record for Employee {
    const KIND: &'static str = "employee";
    const PLACEMENT: Placement = Placement::Back;

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Task {
    const KIND: &'static str = "task";
    // newest first
    const PLACEMENT: Placement = Placement::Front;

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

pub type EmployeeStore = RecordStore<Employee>;
pub type TaskStore = RecordStore<Task>;

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new() -> Self {
        RecordStore::default()
    }

    /// Builds a store holding `records` in the given order.
    pub fn with_records(records: Vec<R>) -> Self {
        RecordStore { records }
    }

    /// All records, in collection order.
    pub fn list(&self) -> Vec<R> {
        self.records.clone()
    }

    /// Records matching `predicate`, in collection order.
    pub fn list_where<P>(&self, predicate: P) -> Vec<R>
    where
        P: Fn(&R) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).cloned().collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inserts a fully formed record according to [`Record::PLACEMENT`].
    pub fn insert(&mut self, record: R) -> R {
        debug!(kind = R::KIND, id = %record.id(), "insert");
        match R::PLACEMENT {
            Placement::Front => self.records.insert(0, record.clone()),
            Placement::Back => self.records.push(record.clone()),
        }
        record
    }

    /// Applies `change` to a copy of the record and stores the result.
    pub fn modify<F>(&mut self, id: Uuid, change: F) -> Result<R>
    where
        F: FnOnce(&mut R),
    {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(Error::NotFound { kind: R::KIND, id })?;
        let mut updated = slot.clone();
        change(&mut updated);
        *slot = updated.clone();
        Ok(updated)
    }

    /// Removes a record. Removal is permanent.
    pub fn delete(&mut self, id: Uuid) -> Result<R> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(Error::NotFound { kind: R::KIND, id })?;
        debug!(kind = R::KIND, %id, "delete");
        Ok(self.records.remove(idx))
    }
}

impl RecordStore<Employee> {
    /// Adds an active employee who joined today.
    pub fn create(&mut self, new: NewEmployee) -> Employee {
        self.insert(Employee {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            department: new.department,
            position: new.position,
            status: EmployeeStatus::Active,
            joined_at: Local::now().date_naive(),
            tasks_count: 0,
        })
    }

    pub fn update(&mut self, id: Uuid, patch: EmployeePatch) -> Result<Employee> {
        self.modify(id, |e| {
            if let Some(name) = patch.name {
                e.name = name;
            }
            if let Some(email) = patch.email {
                e.email = email;
            }
            if let Some(department) = patch.department {
                e.department = department;
            }
            if let Some(position) = patch.position {
                e.position = position;
            }
            if let Some(status) = patch.status {
                e.status = status;
            }
        })
    }
}

impl RecordStore<Task> {
    /// Adds a pending task at the front of the list.
    ///
    /// `assigned_to_name` is stored as given and never re-synced.
    pub fn create(&mut self, new: NewTask, assigned_to_name: String) -> Task {
        let now = Utc::now();
        self.insert(Task {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            status: TaskStatus::Pending,
            priority: new.priority,
            assigned_to: new.assigned_to,
            assigned_to_name,
            created_at: now,
            updated_at: now,
            due_date: new.due_date,
        })
    }

    /// Merges `patch` into the task and refreshes `updated_at`.
    pub fn update(&mut self, id: Uuid, patch: TaskPatch) -> Result<Task> {
        self.modify(id, |t| {
            if let Some(title) = patch.title {
                t.title = title;
            }
            if let Some(description) = patch.description {
                t.description = description;
            }
            if let Some(status) = patch.status {
                t.status = status;
            }
            if let Some(priority) = patch.priority {
                t.priority = priority;
            }
            if let Some(assigned_to) = patch.assigned_to {
                t.assigned_to = assigned_to;
            }
            if let Some(name) = patch.assigned_to_name {
                t.assigned_to_name = name;
            }
            if let Some(due) = patch.due_date {
                t.due_date = due;
            }
            t.updated_at = Utc::now();
        })
    }
}
