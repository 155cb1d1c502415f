use serde::Deserialize;

const DEV_SECRET: &str = "secret";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let jwt = JwtConfig {
            secret: jwt_secret(std::env::var("JWT_SECRET").ok(), &app_env)?,
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
        };
        Ok(Self { database_url, jwt })
    }
}

/// Production refuses to start on the built-in dev secret.
fn jwt_secret(raw: Option<String>, app_env: &str) -> anyhow::Result<String> {
    match raw {
        Some(s) if !s.is_empty() => Ok(s),
        _ if app_env == "production" => {
            anyhow::bail!("JWT_SECRET must be set when APP_ENV=production")
        }
        _ => {
            tracing::warn!("JWT_SECRET not set, falling back to the insecure dev default");
            Ok(DEV_SECRET.into())
        }
    }
}
