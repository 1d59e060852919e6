use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable naming the config file (without extension).
pub const CONFIG_PATH_ENV: &str = "RETAIL_DASHBOARD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/dashboard";
const ENV_PREFIX: &str = "RETAIL";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub dashboard: DashboardSettings,
    pub source: SourceSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub title: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    #[serde(rename = "mongodb")]
    MongoDb,
    #[serde(rename = "directory")]
    Directory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub uri: String,
    pub database: String,
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl SourceSettings {
    pub fn directory(&self) -> anyhow::Result<&PathBuf> {
        self.directory
            .as_ref()
            .context("source.directory is required when source.kind = \"directory\"")
    }
}

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("server.bind_addr", "0.0.0.0:8080")?
        .set_default("dashboard.title", "Retail Sales Dashboard")?
        .set_default("source.kind", "mongodb")?
        .set_default("source.uri", "mongodb://localhost:27017")?
        .set_default("source.database", "MyDatabase")?)
}

/// Load the config file (optional), then `RETAIL__SECTION__KEY` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let settings = builder()?
        .add_source(config::File::with_name(&path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .with_context(|| format!("Failed to load configuration from {}", path))?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_app_config(toml: &str) -> anyhow::Result<AppConfig> {
        let settings = builder()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    #[test]
    fn test_defaults() {
        let config = parse_app_config("").unwrap();

        assert_eq!(config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.dashboard.title, "Retail Sales Dashboard");
        assert_eq!(config.source.kind, SourceKind::MongoDb);
        assert_eq!(config.source.uri, "mongodb://localhost:27017");
        assert_eq!(config.source.database, "MyDatabase");
        assert!(config.source.directory().is_err());
    }

    #[test]
    fn test_directory_source() {
        let config = parse_app_config(
            r#"
            [dashboard]
            title = "Store 12"

            [source]
            kind = "directory"
            directory = "fixtures"
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.title, "Store 12");
        assert_eq!(config.source.kind, SourceKind::Directory);
        assert_eq!(config.source.directory().unwrap(), &PathBuf::from("fixtures"));
    }

    #[test]
    fn test_mongodb_source() {
        let config = parse_app_config(
            r#"
            [source]
            kind = "mongodb"
            uri = "mongodb://db.internal:27017/?replicaSet=rs0"
            database = "Retail"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.kind, SourceKind::MongoDb);
        assert_eq!(config.source.uri, "mongodb://db.internal:27017/?replicaSet=rs0");
        assert_eq!(config.source.database, "Retail");
    }
}
