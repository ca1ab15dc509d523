use std::env;
use std::path::PathBuf;

use crate::error::WatchError;

/// Profile checked when `WATCH_URL` is unset.
pub const DEFAULT_WATCH_URL: &str = "https://www.linkedin.com/in/example/";

/// Watchlist applied when `WATCH_KEYWORDS` is unset.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "funding",
    "investment",
    "million",
    "secured",
    "breaking",
    "raised",
];

/// How to treat a snapshot file that exists but fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptPolicy {
    /// Surface the corrupt-snapshot error and abort the run.
    #[default]
    Abort,
    /// Log a warning and start over from an empty snapshot.
    Discard,
}

/// Application configuration loaded from environment variables.
/// Email credentials are optional; absence of any of them disables
/// delivery without failing the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub watch_url: String,
    pub watch_subject: String,
    pub keywords: Vec<String>,
    pub data_dir: PathBuf,

    pub email_from: Option<String>,
    pub email_to: Option<String>,
    pub email_password: Option<String>,
    pub smtp_host: String,
    pub smtp_port: u16,

    pub on_corrupt: CorruptPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, WatchError> {
        dotenvy::dotenv().ok();

        let keywords: Vec<String> = env::var("WATCH_KEYWORDS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let keywords = if keywords.is_empty() {
            DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
        } else {
            keywords
        };

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| WatchError::Config("SMTP_PORT must be a number".to_string()))?;

        let on_corrupt = match env::var("SNAPSHOT_ON_CORRUPT").as_deref() {
            Ok("abort") | Err(_) => CorruptPolicy::Abort,
            Ok("discard") => CorruptPolicy::Discard,
            Ok(other) => {
                return Err(WatchError::Config(format!(
                    "SNAPSHOT_ON_CORRUPT must be 'abort' or 'discard', got '{other}'"
                )))
            }
        };

        Ok(Self {
            watch_url: env::var("WATCH_URL").unwrap_or_else(|_| DEFAULT_WATCH_URL.to_string()),
            watch_subject: env::var("WATCH_SUBJECT").unwrap_or_else(|_| "example".to_string()),
            keywords,
            data_dir: PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string())),
            email_from: env::var("EMAIL_FROM").ok(),
            email_to: env::var("EMAIL_TO").ok(),
            email_password: env::var("EMAIL_PASSWORD").ok(),
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port,
            on_corrupt,
        })
    }

    /// Log the loaded configuration with credentials redacted.
    pub fn log_redacted(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => {
                    let n = v.len().min(3);
                    format!("{}...({} chars)", &v[..n], v.len())
                }
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  WATCH_URL: {}", self.watch_url);
        tracing::info!("  WATCH_SUBJECT: {}", self.watch_subject);
        tracing::info!("  WATCH_KEYWORDS: {}", self.keywords.join(","));
        tracing::info!("  DATA_DIR: {}", self.data_dir.display());
        tracing::info!("  EMAIL_FROM: {}", preview_opt(&self.email_from));
        tracing::info!("  EMAIL_TO: {}", preview_opt(&self.email_to));
        tracing::info!("  EMAIL_PASSWORD: {}", preview_opt(&self.email_password));
        tracing::info!("  SMTP: {}:{}", self.smtp_host, self.smtp_port);
    }
}
