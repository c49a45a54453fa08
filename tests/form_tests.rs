use chrono::NaiveDate;
use teamdesk::error::Error;
use teamdesk::forms::{parse_date, EmployeeForm, TaskForm};
use teamdesk::models::Priority;
use uuid::Uuid;

fn task_form() -> TaskForm {
    TaskForm {
        title: "  Write release notes ".into(),
        description: " For 2.3 ".into(),
        priority: String::new(),
        assigned_to: Uuid::from_u128(3).to_string(),
        due_date: "2025-03-14".into(),
    }
}

fn employee_form() -> EmployeeForm {
    EmployeeForm {
        name: "Dana Park".into(),
        email: "dana.park@company.com".into(),
        department: "Design".into(),
        position: "Designer".into(),
    }
}

#[test]
fn test_task_form_trims_and_defaults_priority() {
    let new = task_form().validate().unwrap();
    assert_eq!(new.title, "Write release notes");
    assert_eq!(new.description, "For 2.3");
    assert_eq!(new.priority, Priority::Medium);
    assert_eq!(new.assigned_to, Uuid::from_u128(3));
    assert_eq!(new.due_date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
}

#[test]
fn test_task_form_parses_priority() {
    let form = TaskForm {
        priority: "high".into(),
        ..task_form()
    };
    assert_eq!(form.validate().unwrap().priority, Priority::High);
}

#[test]
fn test_task_form_rejects_blank_title() {
    let form = TaskForm {
        title: "   ".into(),
        ..task_form()
    };
    assert!(matches!(form.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_task_form_rejects_bad_assignee_and_date() {
    let bad_assignee = TaskForm {
        assigned_to: "sarah".into(),
        ..task_form()
    };
    assert!(matches!(bad_assignee.validate(), Err(Error::Validation(_))));

    let bad_date = TaskForm {
        due_date: "14/03/2025".into(),
        ..task_form()
    };
    assert!(matches!(bad_date.validate(), Err(Error::Validation(_))));

    let no_date = TaskForm {
        due_date: String::new(),
        ..task_form()
    };
    assert!(matches!(no_date.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_task_form_patch_sets_every_editable_field() {
    let patch = task_form().validate_patch().unwrap();
    assert_eq!(patch.title.as_deref(), Some("Write release notes"));
    assert_eq!(patch.assigned_to, Some(Uuid::from_u128(3)));
    assert!(patch.status.is_none());
    assert!(patch.assigned_to_name.is_none());
}

#[test]
fn test_parse_date_message() {
    match parse_date("tomorrow") {
        Err(Error::Validation(msg)) => assert!(msg.contains("YYYY-MM-DD")),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(
        parse_date(" 2024-02-29 ").unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    );
}

#[test]
fn test_employee_form_requires_every_field() {
    assert!(employee_form().validate().is_ok());
    let no_position = EmployeeForm {
        position: " ".into(),
        ..employee_form()
    };
    assert!(matches!(no_position.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_employee_form_rejects_email_without_at() {
    let form = EmployeeForm {
        email: "dana.park".into(),
        ..employee_form()
    };
    assert!(matches!(form.validate(), Err(Error::Validation(_))));
}

#[test]
fn test_employee_form_patch_keeps_status() {
    let patch = employee_form().validate_patch().unwrap();
    assert_eq!(patch.name.as_deref(), Some("Dana Park"));
    assert!(patch.status.is_none());
}
