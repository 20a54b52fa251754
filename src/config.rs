use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database file name without extension, used when no url is given.
    pub name: String,
    /// Full connection string, replaces everything else.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseSettings {
    pub fn connection_string(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}.db?mode=rwc", self.name),
        }
    }
}

/// Reads `.env`, an optional `configuration.toml` and the environment.
///
/// `TRIVIA_DB_NAME` and `DATABASE_URL` are honoured on top of the
/// `TRIVIA_DATABASE__*` style variables.
pub fn get_configuration() -> Result<Settings, ConfigError> {
    dotenv::dotenv().ok();
    Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 5000)?
        .set_default("database.name", "trivia")?
        .set_default("database.max_connections", 5)?
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("database.name", std::env::var("TRIVIA_DB_NAME").ok())?
        .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
        .build()?
        .try_deserialize()
}
