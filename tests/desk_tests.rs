use chrono::NaiveDate;
use teamdesk::desk::{Desk, UNASSIGNED};
use teamdesk::error::Error;
use teamdesk::models::{
    Employee, EmployeePatch, EmployeeQuery, EmployeeStatus, Identity, NewEmployee, NewTask,
    Priority, Role, Route, TaskField, TaskFilter, TaskPatch, TaskStatus,
};
use teamdesk::seed;
use teamdesk::session::{Account, CredentialTable, SessionStore};
use teamdesk::stats::DashboardStats;
use teamdesk::storage::MemorySlot;
use teamdesk::store::{EmployeeStore, TaskStore};
use uuid::Uuid;

const ALICE: Uuid = Uuid::from_u128(0xa11ce);
const BOB: Uuid = Uuid::from_u128(0xb0b);

fn account(id: Uuid, name: &str, role: Role) -> Account {
    Account {
        identity: Identity {
            id,
            name: name.into(),
            email: format!("{}@company.com", name.to_lowercase()),
            role,
            department: None,
        },
        password: format!("{}-pw", name.to_lowercase()),
    }
}

fn employee(id: Uuid, name: &str) -> Employee {
    Employee {
        id,
        name: name.into(),
        email: format!("{}@company.com", name.to_lowercase()),
        department: "Engineering".into(),
        position: "Engineer".into(),
        status: EmployeeStatus::Active,
        joined_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        tasks_count: 0,
    }
}

fn due() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
}

/// Two employees (alice: admin, bob: employee) and one task assigned to bob.
/// Returns the desk signed in as nobody plus the task id.
fn scenario() -> (Desk<MemorySlot>, Uuid) {
    let credentials = CredentialTable::new(vec![
        account(ALICE, "Alice", Role::Admin),
        account(BOB, "Bob", Role::Employee),
    ]);
    let session = SessionStore::open(MemorySlot::new(), credentials).unwrap();
    let employees =
        EmployeeStore::with_records(vec![employee(ALICE, "Alice"), employee(BOB, "Bob")]);
    let mut desk = Desk::new(session, employees, TaskStore::new());

    desk.login("alice@company.com", "alice-pw").unwrap();
    let task = desk
        .create_task(NewTask {
            title: "Prepare demo".into(),
            description: "Slides and a script".into(),
            priority: Priority::High,
            assigned_to: BOB,
            due_date: due(),
        })
        .unwrap();
    desk.logout().unwrap();
    (desk, task.id)
}

fn as_alice(desk: &mut Desk<MemorySlot>) {
    desk.login("alice@company.com", "alice-pw").unwrap();
}

fn as_bob(desk: &mut Desk<MemorySlot>) {
    desk.login("bob@company.com", "bob-pw").unwrap();
}

#[test]
fn test_visible_tasks_scenario() {
    let (mut desk, task_id) = scenario();
    as_alice(&mut desk);
    desk.create_task(NewTask {
        title: "Alice's own".into(),
        description: String::new(),
        priority: Priority::Low,
        assigned_to: ALICE,
        due_date: due(),
    })
    .unwrap();
    assert_eq!(desk.list_tasks(&TaskFilter::default()).unwrap().len(), 2);

    as_bob(&mut desk);
    let visible = desk.list_tasks(&TaskFilter::default()).unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, task_id);
}

#[test]
fn test_owner_sets_status_but_cannot_retitle() {
    let (mut desk, task_id) = scenario();
    as_bob(&mut desk);

    let task = desk.set_status(task_id, TaskStatus::Completed).unwrap();
    assert_eq!(task.status, TaskStatus::Completed);

    let patch = TaskPatch {
        title: Some("x".into()),
        ..Default::default()
    };
    assert!(matches!(desk.update_task(task_id, patch), Err(Error::Forbidden(_))));
    assert_eq!(desk.task(task_id).unwrap().title, "Prepare demo");
}

#[test]
fn test_mixed_patch_from_owner_is_rejected_whole() {
    let (mut desk, task_id) = scenario();
    as_bob(&mut desk);
    let patch = TaskPatch {
        status: Some(TaskStatus::InProgress),
        priority: Some(Priority::Low),
        ..Default::default()
    };
    assert!(matches!(desk.update_task(task_id, patch), Err(Error::Forbidden(_))));
    let task = desk.task(task_id).unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.priority, Priority::High);
}

#[test]
fn test_employee_cannot_touch_other_tasks() {
    let (mut desk, _) = scenario();
    as_alice(&mut desk);
    let alices = desk
        .create_task(NewTask {
            title: "Budget review".into(),
            description: String::new(),
            priority: Priority::Medium,
            assigned_to: ALICE,
            due_date: due(),
        })
        .unwrap();

    as_bob(&mut desk);
    assert!(matches!(desk.task(alices.id), Err(Error::Forbidden(_))));
    assert!(matches!(
        desk.set_status(alices.id, TaskStatus::Completed),
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(desk.delete_task(alices.id), Err(Error::Forbidden(_))));
}

#[test]
fn test_employee_cannot_create_tasks_or_manage_employees() {
    let (mut desk, task_id) = scenario();
    as_bob(&mut desk);
    let new = NewTask {
        title: "Sneaky".into(),
        description: String::new(),
        priority: Priority::Low,
        assigned_to: BOB,
        due_date: due(),
    };
    assert!(matches!(desk.create_task(new), Err(Error::Forbidden(_))));
    assert!(matches!(desk.delete_task(task_id), Err(Error::Forbidden(_))));
    assert!(matches!(
        desk.list_employees(&EmployeeQuery::default()),
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(
        desk.update_employee(BOB, EmployeePatch::default()),
        Err(Error::Forbidden(_))
    ));
    assert!(matches!(desk.delete_employee(ALICE), Err(Error::Forbidden(_))));
}

#[test]
fn test_signed_out_desk_refuses_everything() {
    let (mut desk, task_id) = scenario();
    assert!(matches!(desk.list_tasks(&TaskFilter::default()), Err(Error::Forbidden(_))));
    assert!(matches!(desk.set_status(task_id, TaskStatus::Completed), Err(Error::Forbidden(_))));
    assert!(matches!(desk.navigation(), Err(Error::Forbidden(_))));
    assert!(matches!(desk.dashboard(), Err(Error::Forbidden(_))));
}

#[test]
fn test_admin_reassignment_resnapshots_name() {
    let (mut desk, task_id) = scenario();
    as_alice(&mut desk);
    let patch = TaskPatch {
        assigned_to: Some(ALICE),
        ..Default::default()
    };
    let task = desk.update_task(task_id, patch).unwrap();
    assert_eq!(task.assigned_to, ALICE);
    assert_eq!(task.assigned_to_name, "Alice");
}

#[test]
fn test_assignee_name_is_not_synced_on_rename() {
    let (mut desk, task_id) = scenario();
    as_alice(&mut desk);
    let patch = EmployeePatch {
        name: Some("Robert".into()),
        ..Default::default()
    };
    desk.update_employee(BOB, patch).unwrap();
    assert_eq!(desk.task(task_id).unwrap().assigned_to_name, "Bob");
}

#[test]
fn test_deleting_employee_leaves_tasks_dangling() {
    let (mut desk, task_id) = scenario();
    as_alice(&mut desk);
    desk.delete_employee(BOB).unwrap();
    let task = desk.task(task_id).unwrap();
    assert_eq!(task.assigned_to, BOB);
    assert_eq!(task.assigned_to_name, "Bob");
    assert!(matches!(desk.employee(BOB), Err(Error::NotFound { .. })));

    as_bob(&mut desk);
    assert_eq!(desk.list_tasks(&TaskFilter::default()).unwrap().len(), 1);
}

#[test]
fn test_unknown_assignee_is_unassigned() {
    let (mut desk, _) = scenario();
    as_alice(&mut desk);
    let task = desk
        .create_task(NewTask {
            title: "Orphan".into(),
            description: String::new(),
            priority: Priority::Low,
            assigned_to: Uuid::new_v4(),
            due_date: due(),
        })
        .unwrap();
    assert_eq!(task.assigned_to_name, UNASSIGNED);
}

#[test]
fn test_task_delete_twice_is_not_found() {
    let (mut desk, task_id) = scenario();
    as_alice(&mut desk);
    desk.delete_task(task_id).unwrap();
    assert!(desk
        .list_tasks(&TaskFilter::default())
        .unwrap()
        .iter()
        .all(|t| t.id != task_id));
    assert!(matches!(desk.delete_task(task_id), Err(Error::NotFound { .. })));
}

#[test]
fn test_employee_crud_as_admin() {
    let (mut desk, _) = scenario();
    as_alice(&mut desk);
    let dana = desk
        .create_employee(NewEmployee {
            name: "Dana".into(),
            email: "dana@company.com".into(),
            department: "Design".into(),
            position: "Designer".into(),
        })
        .unwrap();
    let all = desk.list_employees(&EmployeeQuery::default()).unwrap();
    assert_eq!(all.last().map(|e| e.id), Some(dana.id));

    let query = EmployeeQuery {
        search: Some("DESIGN".into()),
        status: None,
    };
    let found = desk.list_employees(&query).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, dana.id);

    desk.delete_employee(dana.id).unwrap();
    assert!(matches!(desk.delete_employee(dana.id), Err(Error::NotFound { .. })));
}

#[test]
fn test_task_filters() {
    let (mut desk, task_id) = scenario();
    as_alice(&mut desk);
    desk.create_task(NewTask {
        title: "Quarterly report".into(),
        description: String::new(),
        priority: Priority::Low,
        assigned_to: ALICE,
        due_date: due(),
    })
    .unwrap();
    desk.set_status(task_id, TaskStatus::InProgress).unwrap();

    let by_status = TaskFilter {
        status: Some(TaskStatus::InProgress),
        ..Default::default()
    };
    let found = desk.list_tasks(&by_status).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, task_id);

    let by_assignee = TaskFilter {
        assigned_to: Some(ALICE),
        ..Default::default()
    };
    assert_eq!(desk.list_tasks(&by_assignee).unwrap()[0].title, "Quarterly report");

    let by_name = TaskFilter {
        search: Some("bob".into()),
        ..Default::default()
    };
    assert_eq!(desk.list_tasks(&by_name).unwrap()[0].id, task_id);
}

#[test]
fn test_navigation_follows_role() {
    let (mut desk, _) = scenario();
    as_bob(&mut desk);
    assert_eq!(
        desk.navigation().unwrap(),
        vec![Route::Dashboard, Route::Tasks, Route::Profile]
    );
}

#[test]
fn test_dashboard_shape_follows_role() {
    let (mut desk, _) = scenario();
    as_alice(&mut desk);
    assert!(matches!(
        desk.dashboard().unwrap(),
        DashboardStats::Admin { total_employees: 2, .. }
    ));
    as_bob(&mut desk);
    match desk.dashboard().unwrap() {
        DashboardStats::Employee { my_tasks, tasks } => {
            assert_eq!(my_tasks.len(), 1);
            assert_eq!(tasks.pending, 1);
        }
        other => panic!("unexpected stats: {other:?}"),
    }
}

#[test]
fn test_demo_desk_links_employee_account_to_seed_tasks() {
    let mut desk = Desk::open(MemorySlot::new()).unwrap();
    desk.login("employee@company.com", "employee123").unwrap();
    let mine = desk.list_tasks(&TaskFilter::default()).unwrap();
    assert!(mine.len() >= 2);
    assert!(mine.iter().all(|t| t.assigned_to == seed::DEMO_EMPLOYEE_ID));

    desk.login("admin@company.com", "admin123").unwrap();
    assert_eq!(desk.list_tasks(&TaskFilter::default()).unwrap().len(), seed::tasks().len());
    assert!(desk.assignees().unwrap().iter().all(|e| e.status == EmployeeStatus::Active));
}

#[test]
fn test_empty_patch_changes_nothing() {
    let (mut desk, task_id) = scenario();
    as_bob(&mut desk);
    let before = desk.task(task_id).unwrap();
    let after = desk.update_task(task_id, TaskPatch::default()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_can_mutate_reflects_role_and_ownership() {
    let (mut desk, task_id) = scenario();
    assert!(!desk.can_mutate(task_id, TaskField::Status));

    as_bob(&mut desk);
    assert!(desk.can_mutate(task_id, TaskField::Status));
    assert!(!desk.can_mutate(task_id, TaskField::Title));

    as_alice(&mut desk);
    assert!(desk.can_mutate(task_id, TaskField::DueDate));
    assert!(!desk.can_mutate(Uuid::new_v4(), TaskField::Status));
}
