// ABOUTME: Environment-driven server configuration
// ABOUTME: Validates ports and assembles SMTP settings

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use recordhub_mailer::SmtpConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub database_path: Option<PathBuf>,
    pub app_url: String,
    pub smtp: SmtpConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "4000".to_string());
        let port = port_str.parse::<u16>()?;
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let database_path = env::var("DATABASE_PATH").ok().map(PathBuf::from);

        let app_url = env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let smtp_port_str = env::var("SMTP_PORT").unwrap_or_else(|_| "587".to_string());
        let smtp_port = smtp_port_str.parse::<u16>()?;

        let smtp_user = env::var("SMTP_USER").unwrap_or_default();
        let from_email = env::var("SMTP_FROM_EMAIL").unwrap_or_else(|_| {
            if smtp_user.is_empty() {
                "noreply@localhost".to_string()
            } else {
                smtp_user.clone()
            }
        });
        let smtp = SmtpConfig {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            port: smtp_port,
            username: smtp_user,
            password: env::var("SMTP_PASS").unwrap_or_default(),
            from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "RecordHub".to_string()),
            from_email,
        };

        Ok(Self {
            port,
            cors_origin,
            database_path,
            app_url,
            smtp,
        })
    }
}
