use std::net::IpAddr;
use std::path::PathBuf;

use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub admin_email: String,
    pub template_dir: PathBuf,
    pub max_body_size: usize,
    pub log_level: String,
    pub smtp: SmtpConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
    pub from: String,
    pub tls: SmtpTls,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmtpTls {
    /// Implicit TLS from the first byte (SMTPS).
    Wrapper,
    StartTls,
    None,
}

impl SmtpTls {
    /// Port 465 is the conventional implicit-TLS port; everything else upgrades with STARTTLS.
    pub fn for_port(port: u16) -> Self {
        if port == 465 {
            SmtpTls::Wrapper
        } else {
            SmtpTls::StartTls
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tls" => Some(SmtpTls::Wrapper),
            "starttls" => Some(SmtpTls::StartTls),
            "none" => Some(SmtpTls::None),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env_required("DATABASE_URL")?;
        let admin_email = env_required("ADMIN_EMAIL")?;

        let host: IpAddr = parse_var("HOST", &env_or("HOST", "0.0.0.0"))?;
        let port: u16 = parse_var("PORT", &env_or("PORT", "3000"))?;

        let template_dir = PathBuf::from(env_or("TEMPLATE_DIR", "templates"));

        let max_body_size: usize = parse_var("MAX_BODY_SIZE", &env_or("MAX_BODY_SIZE", "1048576"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        let smtp = SmtpConfig::from_env()?;

        Ok(Config {
            database_url,
            host,
            port,
            admin_email,
            template_dir,
            max_body_size,
            log_level,
            smtp,
        })
    }
}

impl SmtpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_required("SMTP_HOST")?;
        let port: u16 = parse_var("SMTP_PORT", &env_or("SMTP_PORT", "587"))?;
        let user = env_required("SMTP_USER")?;
        let pass = env_required("SMTP_PASS")?;
        let from = std::env::var("SMTP_FROM").unwrap_or_else(|_| user.clone());

        let tls = match std::env::var("SMTP_TLS").ok() {
            Some(raw) => SmtpTls::parse(&raw).ok_or_else(|| ConfigError::InvalidVar {
                key: "SMTP_TLS".to_string(),
                reason: format!("expected tls, starttls or none, got '{raw}'"),
            })?,
            None => SmtpTls::for_port(port),
        };

        Ok(SmtpConfig {
            host,
            port,
            user,
            pass,
            from,
            tls,
        })
    }
}

fn env_required(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingVar(key.to_string()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
        key: key.to_string(),
        reason: e.to_string(),
    })
}
