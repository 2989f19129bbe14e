//! Global application configuration.
//!
//! `AppConfig` is a lazily initialized singleton loaded from `.env` and the
//! process environment. Module-level accessor functions are the normal way to
//! read a value (`config::port()`); the per-field setters exist so tests can
//! override values without touching the environment.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Runtime configuration for the occupancy tracker.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// Canonical label of the designated entry zone.
    pub zone_entry_label: String,
    /// Canonical label of the designated exit zone.
    pub zone_exit_label: String,
    /// Canonical labels of the interior zones, in display order.
    pub zone_interior_labels: Vec<String>,
    pub ws_ping_seconds: u64,
}

static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

const DEFAULT_INTERIOR_ZONES: &str =
    "Work Zone,Meeting Zone,Cafeteria Zone,Recreation Zone,Restricted Zone";

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Panics if a required variable is missing or malformed; configuration
    /// problems should stop the process before it serves traffic.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "zonetrace".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or_else(|_| "60".into())
                .parse()
                .expect("JWT_DURATION_MINUTES must be a number"),
            zone_entry_label: env::var("ZONE_ENTRY_LABEL").unwrap_or_else(|_| "In".into()),
            zone_exit_label: env::var("ZONE_EXIT_LABEL").unwrap_or_else(|_| "Out".into()),
            zone_interior_labels: env::var("ZONE_INTERIOR_LABELS")
                .unwrap_or_else(|_| DEFAULT_INTERIOR_ZONES.into())
                .split(',')
                .map(|z| z.trim().to_owned())
                .filter(|z| !z.is_empty())
                .collect(),
            ws_ping_seconds: env::var("WS_PING_SECONDS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .expect("WS_PING_SECONDS must be a number"),
        }
    }

    /// Returns a read guard on the global configuration, initializing it from
    /// the environment on first access.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Reloads the configuration from the environment, discarding overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock.write().expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters (primarily for tests) ---

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

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_host(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.host = value.into());
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_jwt_secret(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.jwt_secret = value.into());
    }

    pub fn set_jwt_duration_minutes(value: u64) {
        AppConfig::set_field(|cfg| cfg.jwt_duration_minutes = value);
    }

    pub fn set_zone_entry_label(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.zone_entry_label = value.into());
    }

    pub fn set_zone_exit_label(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.zone_exit_label = value.into());
    }

    pub fn set_zone_interior_labels(value: Vec<String>) {
        AppConfig::set_field(|cfg| cfg.zone_interior_labels = value);
    }

    pub fn set_ws_ping_seconds(value: u64) {
        AppConfig::set_field(|cfg| cfg.ws_ping_seconds = value);
    }
}

// --- Module-level accessors ---

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

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn zone_entry_label() -> String {
    AppConfig::global().zone_entry_label.clone()
}

pub fn zone_exit_label() -> String {
    AppConfig::global().zone_exit_label.clone()
}

pub fn zone_interior_labels() -> Vec<String> {
    AppConfig::global().zone_interior_labels.clone()
}

pub fn ws_ping_seconds() -> u64 {
    AppConfig::global().ws_ping_seconds
}
