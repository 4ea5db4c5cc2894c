use crate::core::KeywordTable;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub locations: LocationSettings,
    #[serde(default)]
    pub reputation: ReputationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
    #[serde(default)]
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 300 }
fn default_cache_capacity() -> u64 { 1000 }

/// Extra keyword entries for address parsing, keyword -> canonical name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationSettings {
    #[serde(default)]
    pub extra_country_keywords: BTreeMap<String, String>,
    #[serde(default)]
    pub extra_city_keywords: BTreeMap<String, String>,
}

impl LocationSettings {
    /// Built-in keyword table extended with the configured entries
    pub fn keyword_table(&self) -> KeywordTable {
        let mut table = KeywordTable::builtin();
        for (keyword, canonical) in &self.extra_country_keywords {
            table.add_country(keyword, canonical);
        }
        for (keyword, canonical) in &self.extra_city_keywords {
            table.add_city(keyword, canonical);
        }
        table
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReputationSettings {
    #[serde(default = "default_funnel_event_limit")]
    pub funnel_event_limit: i64,
    #[serde(default = "default_review_limit")]
    pub review_limit: i64,
}

impl Default for ReputationSettings {
    fn default() -> Self {
        Self {
            funnel_event_limit: default_funnel_event_limit(),
            review_limit: default_review_limit(),
        }
    }
}

fn default_funnel_event_limit() -> i64 { 500 }
fn default_review_limit() -> i64 { 200 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CLINIC_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CLINIC_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CLINIC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CLINIC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional DATABASE_URL override
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = std::env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cache_settings() {
        let cache = CacheSettings::default();
        assert_eq!(cache.ttl_secs, 300);
        assert_eq!(cache.max_capacity, 1000);
    }

    #[test]
    fn test_default_reputation_limits() {
        let reputation = ReputationSettings::default();
        assert_eq!(reputation.funnel_event_limit, 500);
        assert_eq!(reputation.review_limit, 200);
    }

    #[test]
    fn test_keyword_table_extension() {
        let mut locations = LocationSettings::default();
        locations
            .extra_city_keywords
            .insert("Al Ain".to_string(), "Al Ain".to_string());

        let table = locations.keyword_table();
        assert!(table.city_keywords().any(|(k, c)| k == "al ain" && c == "Al Ain"));
        assert!(table.city_keywords().any(|(_, c)| c == "Dubai"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("clinic-algo-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090

            [database]
            url = "postgres://localhost/test"
            "#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9090);
        assert!(!settings.database.run_migrations);
        assert_eq!(settings.cache.ttl_secs, 300);
        assert!(settings.locations.extra_country_keywords.is_empty());
    }
}
