pub mod app;
pub mod ui;

use std::{error::Error, io};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;
use app::{App, InputMode};
use ui::ui;

use crate::desk::Desk;
use crate::models::{Route, TaskStatus};
use crate::storage::SessionSlot;

/// Runs the interactive dashboard until the user quits.
///
/// Employee and task changes live only as long as this call.
pub fn run_tui<S: SessionSlot>(desk: Desk<S>) -> Result<(), Box<dyn Error>> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(desk);
    info!("dashboard started");

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend, S: SessionSlot>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Tab | KeyCode::Right => app.next_route(),
                KeyCode::BackTab | KeyCode::Left => app.previous_route(),
                KeyCode::Char(c @ '1'..='4') => app.select_route(c as usize - '1' as usize),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char(' ') => app.cycle_selected_status(),
                KeyCode::Char('p') => app.set_selected_status(TaskStatus::Pending),
                KeyCode::Char('i') => app.set_selected_status(TaskStatus::InProgress),
                KeyCode::Char('c') => app.set_selected_status(TaskStatus::Completed),
                KeyCode::Char('f') => app.cycle_status_filter(),
                KeyCode::Char('/') => app.start_search(),
                KeyCode::Char('a') => app.start_add(),
                KeyCode::Char('e') => app.start_edit_selected(),
                KeyCode::Char('n') => app.start_edit_title(),
                KeyCode::Char('x') => app.toggle_employee_status(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_selected(),
                KeyCode::Char('L') if app.route == Route::Profile => app.logout(),
                _ => {}
            },
            InputMode::Login | InputMode::Editing | InputMode::Adding => match key.code {
                KeyCode::Enter => app.handle_input(),
                KeyCode::Esc => {
                    if app.input_mode == InputMode::Login && app.input_buffer.is_empty() {
                        return Ok(());
                    }
                    app.cancel_input();
                }
                KeyCode::Char(c) => {
                    app.input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    app.input_buffer.pop();
                }
                _ => {}
            },
        }
    }
}
