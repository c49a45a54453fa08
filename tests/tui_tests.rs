use teamdesk::desk::Desk;
use teamdesk::models::{EmployeeStatus, Route};
use teamdesk::storage::MemorySlot;
use teamdesk::tui::app::{App, InputMode};
use uuid::Uuid;

const NEWSLETTER: Uuid = Uuid::from_u128(103);
const CI_PIPELINE: Uuid = Uuid::from_u128(105);
const MIKE: Uuid = Uuid::from_u128(4);

fn admin_app() -> App<MemorySlot> {
    let mut desk = Desk::open(MemorySlot::new()).unwrap();
    desk.login("admin@company.com", "admin123").unwrap();
    App::new(desk)
}

fn select_task(app: &mut App<MemorySlot>, id: Uuid) {
    app.route = Route::Tasks;
    app.reload();
    let i = app.tasks.iter().position(|t| t.id == id).unwrap();
    app.task_state.select(Some(i));
}

/// Walks the edit wizard, replacing the title and keeping every other field.
fn retitle_through_form(app: &mut App<MemorySlot>, title: &str) {
    app.start_edit_selected();
    assert_eq!(app.input_mode, InputMode::Adding);
    app.input_buffer = title.to_string();
    for _ in 0..5 {
        app.handle_input();
    }
}

#[test]
fn test_edit_task_of_inactive_assignee() {
    let mut app = admin_app();
    let emily = app.desk.employee(Uuid::from_u128(5)).unwrap();
    assert_eq!(emily.status, EmployeeStatus::Inactive);

    select_task(&mut app, NEWSLETTER);
    retitle_through_form(&mut app, "Newsletter draft v2");

    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(!app.notice.as_ref().unwrap().is_error);
    let task = app.desk.task(NEWSLETTER).unwrap();
    assert_eq!(task.title, "Newsletter draft v2");
    assert_eq!(task.assigned_to, emily.id);
    assert_eq!(task.assigned_to_name, "Emily Davis");
}

#[test]
fn test_edit_task_of_removed_assignee() {
    let mut app = admin_app();
    app.desk.delete_employee(MIKE).unwrap();

    select_task(&mut app, CI_PIPELINE);
    retitle_through_form(&mut app, "Set up CI");

    assert_eq!(app.input_mode, InputMode::Normal);
    let task = app.desk.task(CI_PIPELINE).unwrap();
    assert_eq!(task.title, "Set up CI");
    assert_eq!(task.assigned_to, MIKE);
    assert_eq!(task.assigned_to_name, "Mike Johnson");
}

#[test]
fn test_edit_can_still_reassign_by_name() {
    let mut app = admin_app();
    select_task(&mut app, CI_PIPELINE);
    app.start_edit_selected();
    for step in 0..5 {
        if step == 3 {
            app.input_buffer = "sarah".into();
        }
        app.handle_input();
    }
    let task = app.desk.task(CI_PIPELINE).unwrap();
    assert_eq!(task.assigned_to, Uuid::from_u128(3));
    assert_eq!(task.assigned_to_name, "Sarah Chen");
}

#[test]
fn test_search_is_kept_per_page() {
    let mut app = admin_app();
    let all_employees = app.employees.len();

    app.route = Route::Tasks;
    app.start_search();
    app.input_buffer = "pipeline".into();
    app.handle_input();

    assert_eq!(app.tasks.len(), 1);
    assert_eq!(app.employees.len(), all_employees);

    app.route = Route::Employees;
    app.start_search();
    assert!(app.input_buffer.is_empty());
    app.input_buffer = "design".into();
    app.handle_input();

    assert_eq!(app.employees.len(), 1);
    assert_eq!(app.tasks.len(), 1);
    assert_eq!(app.task_search, "pipeline");
}
