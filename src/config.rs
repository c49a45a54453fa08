use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the session file location.
pub const SESSION_ENV: &str = "TEAMDESK_SESSION";
/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "TEAMDESK_LOG";

/// Runtime configuration for the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file holding the signed-in identity.
    pub session_path: PathBuf,
    /// Log file used while the interactive dashboard owns the terminal.
    pub log_path: PathBuf,
    /// Filter directive passed to `tracing_subscriber::EnvFilter`.
    pub log_filter: String,
}

impl Config {
    /// Resolves configuration from an explicit session path, the environment,
    /// and finally the platform data directory.
    ///
    /// The session path is determined in the following order:
    /// 1. `session_path` argument (the `--session-file` flag).
    /// 2. `TEAMDESK_SESSION` environment variable.
    /// 3. `~/.local/share/teamdesk/session.json` (on Linux).
    /// 4. `./session.json` (fallback).
    pub fn resolve(session_path: Option<PathBuf>) -> Config {
        let session_path = session_path
            .or_else(|| std::env::var(SESSION_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(default_session_path);

        let mut log_path = session_path.clone();
        log_path.set_file_name("teamdesk.log");

        let log_filter = std::env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string());

        Config {
            session_path,
            log_path,
            log_filter,
        }
    }
}

fn default_session_path() -> PathBuf {
    let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    p.push("teamdesk");
    if !p.exists() {
        let _ = fs::create_dir_all(&p);
    }
    p.push("session.json");
    p
}
