use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Credentials of the account seeded at startup when no user with
/// `email` exists yet. The defaults are the documented well-known pair;
/// override them via `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "staffdesk".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "staffdesk-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        let admin = AdminConfig {
            email: std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@gmail.com".into()),
            password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin1234".into()),
        };
        Ok(Self {
            database_url,
            jwt,
            admin,
        })
    }
}
