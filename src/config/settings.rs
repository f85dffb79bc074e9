use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Fallback admin password used when nothing is configured.
///
/// Kept for development convenience; startup warns when it is still in use.
pub const DEFAULT_ADMIN_PASSWORD: &str = "default_password";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Storage backend: "file" (default) or "memory"
    #[serde(default = "default_queue_backend")]
    pub backend: String,
    /// Path of the JSON file mirroring the queue
    #[serde(default = "default_queue_file")]
    pub file: String,
    /// First local hour (inclusive) at which joins are accepted
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    /// Local hour (exclusive) at which joins stop being accepted
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_password")]
    pub password: String,
    /// Lifetime of an admin session token in seconds
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: u64,
    /// How often expired sessions are swept, in seconds
    #[serde(default = "default_session_cleanup_interval")]
    pub session_cleanup_interval_seconds: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5050
}

fn default_queue_backend() -> String {
    "file".to_string()
}

fn default_queue_file() -> String {
    "queue.json".to_string()
}

fn default_open_hour() -> u32 {
    11
}

fn default_close_hour() -> u32 {
    23
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_session_ttl() -> u64 {
    8 * 60 * 60 // 8 hours
}

fn default_session_cleanup_interval() -> u64 {
    300 // 5 minutes
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Start with default values
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("queue.backend", default_queue_backend())?
            .set_default("queue.file", default_queue_file())?
            .set_default("queue.open_hour", i64::from(default_open_hour()))?
            .set_default("queue.close_hour", i64::from(default_close_hour()))?
            .set_default("admin.password", DEFAULT_ADMIN_PASSWORD)?
            .set_default("admin.session_ttl_seconds", default_session_ttl() as i64)?
            .set_default(
                "admin.session_cleanup_interval_seconds",
                default_session_cleanup_interval() as i64,
            )?
            .set_default("log.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Load from environment variables
            // SERVER__PORT, QUEUE__OPEN_HOUR, ADMIN__PASSWORD, etc.
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins"),
            );

        // Plain ADMIN_PASSWORD wins over everything else
        if let Ok(password) = env::var("ADMIN_PASSWORD") {
            builder = builder.set_override("admin.password", password)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject configurations the open-hours gate cannot represent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let QueueConfig {
            open_hour,
            close_hour,
            ..
        } = self.queue;

        if open_hour > 24 || close_hour > 24 {
            return Err(ConfigError::Message(format!(
                "queue hours must be within 0..=24 (open_hour={}, close_hour={})",
                open_hour, close_hour
            )));
        }

        if open_hour >= close_hour {
            return Err(ConfigError::Message(format!(
                "queue.open_hour ({}) must be before queue.close_hour ({})",
                open_hour, close_hour
            )));
        }

        if self.admin.session_ttl_seconds == 0 {
            return Err(ConfigError::Message(
                "admin.session_ttl_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn uses_default_admin_password(&self) -> bool {
        self.admin.password == DEFAULT_ADMIN_PASSWORD
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            backend: default_queue_backend(),
            file: default_queue_file(),
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            password: default_admin_password(),
            session_ttl_seconds: default_session_ttl(),
            session_cleanup_interval_seconds: default_session_cleanup_interval(),
        }
    }
}
