// src/config.rs

use std::env;
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_secret: String,
    /// Session lifetime in seconds.
    pub session_expiration: u64,
    /// Shared secret required to self-register as admin. Admin registration is refused when unset.
    pub admin_code: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub secure_cookies: bool,
    pub bind_address: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://quiz_master.db?mode=rwc".to_string());

        let session_secret = env::var("SESSION_SECRET")
            .expect("SESSION_SECRET must be set");

        let session_expiration = env::var("SESSION_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86_400);

        let admin_code = env::var("ADMIN_CODE").ok().filter(|v| !v.is_empty());
        let admin_email = env::var("ADMIN_EMAIL").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();

        let secure_cookies = env::var("SECURE_COOKIES")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let bind_address = env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "127.0.0.1:5000".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            session_secret,
            session_expiration,
            admin_code,
            admin_email,
            admin_password,
            secure_cookies,
            bind_address,
            rust_log,
        }
    }
}
