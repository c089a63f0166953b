use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Default level for the application's own targets when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
    /// Directory for daily-rolling JSON log files. No file output when unset.
    pub log_dir: Option<String>,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match lookup("LOG_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        Self {
            level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            format,
            log_dir: lookup("LOG_DIR").filter(|s| !s.trim().is_empty()),
        }
    }
}
