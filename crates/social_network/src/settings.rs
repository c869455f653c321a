use config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: Option<String>,
    pub database_url: String,
    pub port: Option<u16>,
    pub session_ttl_hours: Option<i64>,
}

impl Settings {
    pub fn session_ttl_hours(&self) -> i64 {
        self.session_ttl_hours
            .filter(|hours| *hours > 0)
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS)
    }

    pub fn is_production(&self) -> bool {
        self.environment.as_deref() == Some("PROD")
    }
}

pub fn load_settings() -> Result<Settings, config::ConfigError> {
    let settings = Config::builder()
        .set_default("database_url", "sqlite://network.db")?
        .add_source(Environment::default());
    settings.build()?.try_deserialize()
}
