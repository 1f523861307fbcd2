use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub session_expiration_secs: u64,
    pub password_hash_cost: u32,
    pub server_host: String,
    pub server_port: u16,
}

const DEFAULT_DATABASE_URL: &str = "sqlite://feedback.db";
const DEFAULT_SESSION_EXPIRATION_HOURS: u64 = 24;
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 5000;

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        let session_expiration = parse_or(
            "SESSION_EXPIRATION",
            optional_var("SESSION_EXPIRATION")?.map(|v| v.trim_end_matches('h').to_string()),
            DEFAULT_SESSION_EXPIRATION_HOURS,
        );

        let secret_key = match optional_var("SECRET_KEY")? {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("SECRET_KEY not set, sessions will not survive a restart");
                format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
            }
        };

        Ok(Config {
            database_url: optional_var("DATABASE_URL")?
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            secret_key,
            session_expiration_secs: hours_to_secs(session_expiration),
            password_hash_cost: parse_or(
                "PASSWORD_HASH_COST",
                optional_var("PASSWORD_HASH_COST")?,
                bcrypt::DEFAULT_COST,
            ),
            server_host: optional_var("SERVER_HOST")?
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or(
                "SERVER_PORT",
                optional_var("SERVER_PORT")?,
                DEFAULT_SERVER_PORT,
            ),
        })
    }

    pub fn session_expiration(&self) -> Duration {
        Duration::from_secs(self.session_expiration_secs)
    }
}

fn hours_to_secs(hours: u64) -> u64 {
    hours.checked_mul(3600).unwrap_or_else(|| {
        tracing::warn!("SESSION_EXPIRATION of {}h overflows, using default", hours);
        DEFAULT_SESSION_EXPIRATION_HOURS * 3600
    })
}

fn optional_var(key: &str) -> Result<Option<String>, env::VarError> {
    match env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e),
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value {:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
