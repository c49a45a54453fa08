use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use teamdesk::commands::*;
use teamdesk::config::Config;
use teamdesk::desk::Desk;
use teamdesk::logging;
use teamdesk::storage::FileSlot;
use teamdesk::tui::run_tui;

#[derive(Parser)]
#[command(name = "teamdesk")]
#[command(about = "Team and task dashboard", long_about = None)]
struct Cli {
    /// Session file (defaults to the platform data directory)
    #[arg(long, global = true, env = "TEAMDESK_SESSION", value_name = "FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with a demo account
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List the pages available to the signed-in user
    Nav,
    /// Show dashboard figures
    Dashboard,
    /// List tasks
    Tasks {
        /// Only tasks in this status (pending, in_progress, completed)
        #[arg(short, long)]
        status: Option<String>,
        /// Match against title or assignee name
        #[arg(short = 'q', long)]
        search: Option<String>,
        /// Only tasks assigned to this employee id
        #[arg(short, long)]
        assignee: Option<String>,
    },
    /// Show one task
    Task {
        id: String,
    },
    /// List employees (administrators only)
    Employees {
        /// Match against name, email or department
        #[arg(short = 'q', long)]
        search: Option<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::resolve(cli.session_file);

    if let Some(Commands::Completions { shell }) = &cli.command {
        let shell_enum = match shell.as_str() {
            "bash" => Shell::Bash,
            "zsh" => Shell::Zsh,
            "fish" => Shell::Fish,
            "powershell" => Shell::PowerShell,
            "elvish" => Shell::Elvish,
            _ => {
                eprintln!("Unsupported shell: {}", shell);
                return ExitCode::FAILURE;
            }
        };
        let mut cmd = Cli::command();
        generate(shell_enum, &mut cmd, "teamdesk", &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    let interactive = matches!(cli.command, Some(Commands::Ui) | None);
    if interactive {
        if let Err(e) = logging::init_file(&config) {
            eprintln!("Cannot open log file {}: {}", config.log_path.display(), e);
        }
    } else {
        logging::init_stderr(&config);
    }

    let mut desk = match Desk::open(FileSlot::new(&config.session_path)) {
        Ok(desk) => desk,
        Err(e) => {
            eprintln!("Failed to open session: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Commands::Login { email, password }) => cmd_login(&mut desk, email, password),
        Some(Commands::Logout) => cmd_logout(&mut desk),
        Some(Commands::Whoami) => cmd_whoami(&desk),
        Some(Commands::Nav) => cmd_nav(&desk),
        Some(Commands::Dashboard) => cmd_dashboard(&desk),
        Some(Commands::Tasks {
            status,
            search,
            assignee,
        }) => cmd_tasks(&desk, status, search, assignee),
        Some(Commands::Task { id }) => cmd_task(&desk, id),
        Some(Commands::Employees { search }) => cmd_employees(&desk, search),
        Some(Commands::Completions { .. }) => {}
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui(desk) {
                eprintln!("Error running TUI: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
