//! # Teamdesk
//!
//! A terminal team and task dashboard with role-gated views. Administrators
//! manage employees and tasks; employees see the tasks assigned to them and
//! move them through their lifecycle.
//!
//! ## Features
//!
//! *   **Roles**: `admin` (full CRUD, sees every task) and `employee` (sees own
//!     tasks, may only change their status).
//! *   **Dual Interface**:
//!     *   **CLI**: sign in and out, list tasks and employees.
//!     *   **TUI**: interactive dashboard with the full set of actions.
//! *   **Demo data**: employees and tasks are seeded in memory on every start.
//!     Only the signed-in identity survives a restart.
//!
//! ## Demo accounts
//!
//! *   `admin@company.com` / `admin123`
//! *   `employee@company.com` / `employee123`
//!
//! ## Data Storage
//!
//! The session is saved in your local data directory:
//! *   Linux: `~/.local/share/teamdesk/session.json`
//! *   macOS: `~/Library/Application Support/teamdesk/session.json`
//! *   Windows: `%APPDATA%\teamdesk\session.json`
//!
//! You can override this with `--session-file` or the `TEAMDESK_SESSION`
//! environment variable. Log verbosity is read from `TEAMDESK_LOG`.

pub mod access;
pub mod commands;
pub mod config;
pub mod desk;
pub mod error;
pub mod forms;
pub mod logging;
pub mod models;
pub mod seed;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;
pub mod tui;

pub use error::{Error, Result};
