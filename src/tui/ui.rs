use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table},
    Frame,
};
use chrono::Local;
use crate::models::{EmployeeStatus, Priority, Route, Task, TaskStatus};
use crate::stats::DashboardStats;
use crate::storage::SessionSlot;
use super::app::{App, FormKind, InputField, InputMode};

fn status_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Pending => Style::default().fg(Color::Yellow),
        TaskStatus::InProgress => Style::default().fg(Color::Cyan),
        TaskStatus::Completed => Style::default().fg(Color::Green),
    }
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::Low => Style::default().fg(Color::Gray),
        Priority::Medium => Style::default().fg(Color::Blue),
        Priority::High => Style::default().fg(Color::Red),
    }
}

fn header_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

pub fn ui<S: SessionSlot>(f: &mut Frame, app: &mut App<S>) {
    if app.input_mode == InputMode::Login {
        draw_login(f, app);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)].as_ref())
        .split(f.area());

    draw_sidebar(f, app, columns[0]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Notice
            Constraint::Length(3)  // Help
        ].as_ref())
        .split(columns[1]);

    match app.route {
        Route::Dashboard => draw_dashboard(f, app, chunks[0]),
        Route::Employees => draw_employees(f, app, chunks[0]),
        Route::Tasks => draw_tasks(f, app, chunks[0]),
        Route::Profile => draw_profile(f, app, chunks[0]),
    }

    if let Some(notice) = &app.notice {
        let style = if notice.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        f.render_widget(Paragraph::new(notice.text.as_str()).style(style), chunks[1]);
    }

    let help_text = match app.input_mode {
        InputMode::Normal => match (app.route, app.is_admin()) {
            (Route::Tasks, true) => {
                "q: Quit | Tab: Page | a: Add | e: Edit | n: Title | Space/p/i/c: Status \
                 | f: Filter | /: Search | d: Del"
            }
            (Route::Tasks, false) => {
                "q: Quit | Tab: Page | Space: Next Status \
                 | p/i/c: Pending/In Progress/Completed | f: Filter | /: Search"
            }
            (Route::Employees, _) => {
                "q: Quit | Tab: Page | a: Add | e: Edit | x: Toggle Active | /: Search | d: Del"
            }
            (Route::Profile, _) => "q: Quit | Tab: Page | L: Logout",
            _ => "q: Quit | Tab: Page | 1-4: Jump",
        },
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
        InputMode::Login => "Enter: Next | Esc: Quit",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    // Render Input Box if needed
    if matches!(app.input_mode, InputMode::Editing | InputMode::Adding) {
        let area = centered_rect(60, 3, f.area()); // Fixed height of 3 (border + 1 line)
        f.render_widget(Clear, area); // Clear the area first

        let verb = if app.form.editing.is_some() { "Edit" } else { "Add" };
        let title = match app.input_mode {
            InputMode::Adding => match app.form_kind {
                FormKind::Task => match app.form.step {
                    0 => format!("{verb} Task: Title"),
                    1 => format!("{verb} Task: Description (Optional)"),
                    2 => format!("{verb} Task: Priority (low/medium/high)"),
                    3 => format!("{verb} Task: Assign To (employee name)"),
                    _ => format!("{verb} Task: Due Date (YYYY-MM-DD)"),
                },
                FormKind::Employee => match app.form.step {
                    0 => format!("{verb} Employee: Full Name"),
                    1 => format!("{verb} Employee: Email"),
                    2 => format!("{verb} Employee: Department"),
                    _ => format!("{verb} Employee: Position"),
                },
            },
            _ => match app.input_field {
                InputField::Title => "Edit Title".to_string(),
                InputField::Search => "Search".to_string(),
                InputField::None => "Edit".to_string(),
            },
        };

        let input = Paragraph::new(app.input_buffer.as_str())
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(title));

        f.render_widget(input, area);
    }
}

fn draw_login<S: SessionSlot>(f: &mut Frame, app: &App<S>) {
    let area = centered_rect(50, 12, f.area());
    f.render_widget(Clear, area);

    let masked = "*".repeat(app.input_buffer.chars().count());
    let (email, password) = match app.login.step {
        0 => (app.input_buffer.as_str(), ""),
        _ => (app.login.email.as_str(), masked.as_str()),
    };
    let active = Style::default().fg(Color::Yellow);
    let idle = Style::default();

    let mut lines = vec![
        Line::from(Span::styled(
            "Sign in to your account to continue",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Email:    "),
            Span::styled(email, if app.login.step == 0 { active } else { idle }),
        ]),
        Line::from(vec![
            Span::raw("Password: "),
            Span::styled(password, if app.login.step == 1 { active } else { idle }),
        ]),
        Line::from(""),
        Line::from(Span::styled("Demo credentials", Style::default().fg(Color::Gray))),
    ];
    for account in app.desk.session().credentials().accounts() {
        lines.push(Line::from(Span::styled(
            format!("{} / {}", account.identity.email, account.password),
            Style::default().fg(Color::Gray),
        )));
    }
    if let Some(notice) = &app.notice {
        let color = if notice.is_error { Color::Red } else { Color::Green };
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(notice.text.as_str(), Style::default().fg(color))));
    }

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Teamdesk - Sign In"));
    f.render_widget(form, area);
}

fn draw_sidebar<S: SessionSlot>(f: &mut Frame, app: &App<S>, area: Rect) {
    let Some(identity) = app.identity() else { return };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)].as_ref())
        .split(area);

    let items: Vec<ListItem> = app
        .routes
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let style = if *r == app.route {
                Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", i + 1, r.label(identity.role))).style(style)
        })
        .collect();
    let nav = List::new(items).block(Block::default().borders(Borders::ALL).title("Teamdesk"));
    f.render_widget(nav, parts[0]);

    let user = Paragraph::new(vec![
        Line::from(Span::styled(
            identity.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(identity.role.title(), Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(user, parts[1]);
}

fn task_row(t: &Task, show_assignee: bool) -> Row<'static> {
    let today = Local::now().date_naive();
    let overdue = t.due_date < today && t.status != TaskStatus::Completed;
    let mut cells = vec![
        Cell::from(t.title.clone()),
        Cell::from(t.priority.label()).style(priority_style(t.priority)),
        Cell::from(t.status.label()).style(status_style(t.status)),
        Cell::from(t.due_date.to_string()).style(if overdue {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        }),
    ];
    if show_assignee {
        cells.push(Cell::from(t.assigned_to_name.clone()));
    }
    Row::new(cells)
}

fn task_widths(show_assignee: bool) -> Vec<Constraint> {
    let mut widths = vec![
        Constraint::Min(24),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(11),
    ];
    if show_assignee {
        widths.push(Constraint::Length(16));
    }
    widths
}

fn task_header(show_assignee: bool) -> Row<'static> {
    let mut labels = vec!["Title", "Priority", "Status", "Due"];
    if show_assignee {
        labels.push("Assigned To");
    }
    Row::new(labels).style(header_style()).bottom_margin(1)
}

fn draw_dashboard<S: SessionSlot>(f: &mut Frame, app: &App<S>, area: Rect) {
    let Some(stats) = &app.stats else { return };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
        .split(area);

    let counts = stats.counts();
    let mut cards: Vec<(String, String, Color)> = Vec::new();
    if let DashboardStats::Admin {
        total_employees,
        active_employees,
        ..
    } = stats
    {
        let value = format!("{} ({} active)", total_employees, active_employees);
        cards.push(("Employees".into(), value, Color::White));
    }
    cards.push(("Pending".into(), counts.pending.to_string(), Color::Yellow));
    cards.push(("In Progress".into(), counts.in_progress.to_string(), Color::Cyan));
    cards.push(("Completed".into(), counts.completed.to_string(), Color::Green));
    let done = format!("{:.0}%", counts.completion_ratio() * 100.0);
    cards.push(("Done".into(), done, Color::Magenta));

    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len() as u32); cards.len()])
        .split(parts[0]);
    for ((title, value, color), card_area) in cards.into_iter().zip(card_areas.iter()) {
        let card = Paragraph::new(value)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(card, *card_area);
    }

    let (title, show_assignee) = match stats {
        DashboardStats::Admin { .. } => ("Recent Tasks", true),
        DashboardStats::Employee { .. } => ("My Tasks", false),
    };
    let rows: Vec<Row> = stats.listed_tasks().iter().map(|t| task_row(t, show_assignee)).collect();
    let table = Table::new(rows, task_widths(show_assignee))
        .header(task_header(show_assignee))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, parts[1]);
}

fn draw_tasks<S: SessionSlot>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let show_assignee = app.is_admin();
    let rows: Vec<Row> = app.tasks.iter().map(|t| task_row(t, show_assignee)).collect();

    let mut title = if show_assignee { "All Tasks".to_string() } else { "My Tasks".to_string() };
    if let Some(status) = app.status_filter {
        title.push_str(&format!(" [{}]", status.label()));
    }
    if !app.task_search.is_empty() {
        title.push_str(&format!(" /{}", app.task_search));
    }
    if app.tasks.is_empty() {
        title.push_str(" - No tasks found");
    }

    let table = Table::new(rows, task_widths(show_assignee))
        .header(task_header(show_assignee))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.task_state);
}

fn draw_employees<S: SessionSlot>(f: &mut Frame, app: &mut App<S>, area: Rect) {
    let rows: Vec<Row> = app
        .employees
        .iter()
        .map(|e| {
            let status_style = match e.status {
                EmployeeStatus::Active => Style::default().fg(Color::Green),
                EmployeeStatus::Inactive => Style::default().fg(Color::Yellow),
            };
            Row::new(vec![
                Cell::from(e.name.clone()),
                Cell::from(e.email.clone()),
                Cell::from(e.department.clone()),
                Cell::from(e.position.clone()),
                Cell::from(e.status.to_string()).style(status_style),
                Cell::from(e.joined_at.to_string()),
                Cell::from(e.tasks_count.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Min(24),
        Constraint::Length(12),
        Constraint::Length(20),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(5),
    ];

    let mut title = "Employees".to_string();
    if !app.employee_search.is_empty() {
        title.push_str(&format!(" /{}", app.employee_search));
    }

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                "Name",
                "Email",
                "Department",
                "Position",
                "Status",
                "Joined",
                "Tasks",
            ])
            .style(header_style())
            .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.employee_state);
}

fn draw_profile<S: SessionSlot>(f: &mut Frame, app: &App<S>, area: Rect) {
    let Some(identity) = app.identity() else { return };
    let label = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(vec![Span::styled("Full Name   ", label), Span::raw(identity.name.as_str())]),
        Line::from(vec![Span::styled("Email       ", label), Span::raw(identity.email.as_str())]),
        Line::from(vec![Span::styled("Role        ", label), Span::raw(identity.role.title())]),
        Line::from(vec![
            Span::styled("Department  ", label),
            Span::raw(identity.department.as_deref().unwrap_or("-")),
        ]),
    ];
    let profile =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Profile"));
    f.render_widget(profile, area);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let margin = r.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(margin),
            Constraint::Length(height),
            Constraint::Length(margin),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
