//! Application configuration loaded from environment variables.

use std::env;

use blog_infra::DatabaseConfig;

use crate::telemetry::LogFormat;

/// Mail settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Sender address of every outgoing message.
    pub from: String,
    /// Mail relay endpoint. Messages are only logged when unset.
    pub api_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Directory holding the `blog/` templates.
    pub template_dir: String,
    pub mail: MailConfig,
    /// `LOG_FORMAT`; unknown values fall back to pretty output.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
            sql_logging: parse_var("DB_SQL_LOGGING").unwrap_or(false),
            ..DatabaseConfig::new(url)
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            template_dir: env::var("TEMPLATE_DIR")
                .unwrap_or_else(|_| default_template_dir().to_string()),
            mail: MailConfig {
                from: env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@blog.local".to_string()),
                api_url: env::var("MAIL_API_URL").ok().filter(|url| !url.is_empty()),
            },
            log_format: parse_var("LOG_FORMAT").unwrap_or_default(),
        }
    }
}

/// Templates shipped with the crate.
pub fn default_template_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/templates")
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|s| s.parse().ok())
}
