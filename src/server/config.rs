use std::str::FromStr;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:8000";
const DEFAULT_SESSION_EXPIRY_MINUTES: i64 = 30;
const DEFAULT_COMPANY_NAME: &str = "Pawn Shop Inc.";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_RATE_LIMIT_PER_SECOND: u64 = 2;
const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

/// Credentials for the superuser created on first startup.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct Config {
    pub database_url: String,

    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,

    pub session_expiry_minutes: i64,
    pub company_name: String,
    pub log_level: String,
    pub environment: String,

    /// Present only when all of `ADMIN_USERNAME`, `ADMIN_EMAIL` and `ADMIN_PASSWORD` are set.
    pub admin: Option<AdminConfig>,

    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let admin = match (
            std::env::var("ADMIN_USERNAME").ok(),
            std::env::var("ADMIN_EMAIL").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(username), Some(email), Some(password)) => Some(AdminConfig {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            host: env_or("HOST", DEFAULT_HOST),
            port: parse_env("PORT", DEFAULT_PORT)?,
            allowed_origins: parse_origins(&env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS)),
            session_expiry_minutes: parse_env(
                "SESSION_EXPIRY_MINUTES",
                DEFAULT_SESSION_EXPIRY_MINUTES,
            )?,
            company_name: env_or("COMPANY_NAME", DEFAULT_COMPANY_NAME),
            log_level: env_or("LOG_LEVEL", DEFAULT_LOG_LEVEL),
            environment: env_or("ENVIRONMENT", DEFAULT_ENVIRONMENT),
            admin,
            rate_limit_per_second: parse_env(
                "RATE_LIMIT_PER_SECOND",
                DEFAULT_RATE_LIMIT_PER_SECOND,
            )?,
            rate_limit_burst: parse_env("RATE_LIMIT_BURST", DEFAULT_RATE_LIMIT_BURST)?,
        })
    }

    /// Session cookies are only marked `Secure` in production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
