//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. Both the
//! scoreboard service and the judge CLI read from it; tests override single
//! fields through the per-field setters.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    /// Address the scoreboard service binds to.
    pub host: String,
    pub port: u16,
    /// Base URL the judge uses to reach the scoreboard service.
    pub scoreboard_url: String,
    /// Directory scanned for homework descriptor TOML files.
    pub config_dir: String,
    /// Root directory for persisted submissions.
    pub storage_root: String,
    /// Root directory for rendered board snapshots.
    pub output_root: String,
    /// Username prefix identifying the ranked subpopulation. Empty ranks everyone.
    pub ranked_prefix: String,
    /// Sentinel file whose presence grants the privileged judge options.
    pub privilege_file: String,
    /// Directory the judge creates its scratch build directories under.
    pub judge_work_root: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every field has a usable default so the workspace runs out of the box;
    /// nothing here panics on absence.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "scoreboard".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "scoreboard.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "48848".into())
                .parse()
                .unwrap_or(48848),
            scoreboard_url: env::var("SCOREBOARD_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:48848".into()),
            config_dir: env::var("CONFIG_DIR").unwrap_or_else(|_| "config".into()),
            storage_root: env::var("STORAGE_ROOT").unwrap_or_else(|_| "storage".into()),
            output_root: env::var("OUTPUT_ROOT").unwrap_or_else(|_| "out".into()),
            ranked_prefix: env::var("RANKED_PREFIX").unwrap_or_default(),
            privilege_file: env::var("PRIVILEGE_FILE")
                .unwrap_or_else(|_| "/etc/judge-privileged".into()),
            judge_work_root: env::var("JUDGE_WORK_ROOT")
                .or_else(|_| env::var("HOME"))
                .unwrap_or_else(|_| ".".into()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_project_name(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.project_name = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_file = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_scoreboard_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.scoreboard_url = value.into());
    }

    pub fn set_config_dir(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.config_dir = value.into());
    }

    pub fn set_storage_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.storage_root = value.into());
    }

    pub fn set_output_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.output_root = value.into());
    }

    pub fn set_ranked_prefix(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.ranked_prefix = value.into());
    }

    pub fn set_privilege_file(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.privilege_file = value.into());
    }

    pub fn set_judge_work_root(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.judge_work_root = value.into());
    }
}

// --- Module-level accessors used throughout the workspace ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn scoreboard_url() -> String {
    AppConfig::global().scoreboard_url.clone()
}

pub fn config_dir() -> String {
    AppConfig::global().config_dir.clone()
}

pub fn storage_root() -> String {
    AppConfig::global().storage_root.clone()
}

pub fn output_root() -> String {
    AppConfig::global().output_root.clone()
}

pub fn ranked_prefix() -> String {
    AppConfig::global().ranked_prefix.clone()
}

pub fn privilege_file() -> String {
    AppConfig::global().privilege_file.clone()
}

pub fn judge_work_root() -> String {
    AppConfig::global().judge_work_root.clone()
}
