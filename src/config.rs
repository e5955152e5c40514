use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
    pub public_rps: u32,
    pub api_rps: u32,
    /// Post-Job variant that requires a deadline of today or later.
    pub require_job_deadline: bool,
    /// Employer portal variant that computes live job statistics.
    pub employer_live_stats: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret: get_env("JWT_SECRET")?,
            session_ttl_minutes: get_env_parse_or("SESSION_TTL_MINUTES", 24 * 60)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 20)?,
            api_rps: get_env_parse_or("API_RPS", 100)?,
            require_job_deadline: get_env_parse_or("REQUIRE_JOB_DEADLINE", true)?,
            employer_live_stats: get_env_parse_or("EMPLOYER_LIVE_STATS", true)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
