mod settings;

pub use settings::{
    AdminConfig, LogConfig, LogFormat, QueueConfig, ServerConfig, Settings,
    DEFAULT_ADMIN_PASSWORD,
};
