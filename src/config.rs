use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub records: RecordsSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub recommend: RecommendSettings,
    #[serde(default)]
    pub propagation: PropagationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordsSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub subjects: String,
    pub dependents: String,
}

/// Recommendation tunables
///
/// The pool cap and weights come from the platform's original design; they
/// are constants of configuration, not of the domain, so they live here.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_candidate_pool")]
    pub candidate_pool: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            candidate_pool: default_candidate_pool(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_limit() -> u16 { 5 }
fn default_max_limit() -> u16 { 20 }
fn default_candidate_pool() -> usize { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_goals_weight")]
    pub goals: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            goals: default_goals_weight(),
        }
    }
}

fn default_interests_weight() -> f64 { 0.6 }
fn default_goals_weight() -> f64 { 0.4 }

#[derive(Debug, Clone, Deserialize)]
pub struct PropagationSettings {
    #[serde(default = "default_max_new_interests")]
    pub max_new_interests: usize,
    #[serde(default = "default_max_new_goals")]
    pub max_new_goals: usize,
}

impl Default for PropagationSettings {
    fn default() -> Self {
        Self {
            max_new_interests: default_max_new_interests(),
            max_new_goals: default_max_new_goals(),
        }
    }
}

fn default_max_new_interests() -> usize { 2 }
fn default_max_new_goals() -> usize { 1 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with VSPHERE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with VSPHERE_)
            // e.g., VSPHERE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("VSPHERE")
                    .prefix_separator("__")
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
                Environment::with_prefix("VSPHERE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply plain environment overrides for the records API credentials
///
/// Deployments commonly export RECORDS_API_KEY directly rather than the
/// prefixed VSPHERE_RECORDS__API_KEY form, so both are honored.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let endpoint = env::var("RECORDS_ENDPOINT")
        .or_else(|_| env::var("VSPHERE_RECORDS__ENDPOINT"))
        .ok();
    let api_key = env::var("RECORDS_API_KEY")
        .or_else(|_| env::var("VSPHERE_RECORDS__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = endpoint {
        builder = builder.set_override("records.endpoint", endpoint)?;
    }
    if let Some(api_key) = api_key {
        builder = builder.set_override("records.api_key", api_key)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.interests, 0.6);
        assert_eq!(weights.goals, 0.4);
    }

    #[test]
    fn test_default_recommend_settings() {
        let recommend = RecommendSettings::default();
        assert_eq!(recommend.default_limit, 5);
        assert_eq!(recommend.candidate_pool, 20);
    }

    #[test]
    fn test_default_propagation_caps() {
        let propagation = PropagationSettings::default();
        assert_eq!(propagation.max_new_interests, 2);
        assert_eq!(propagation.max_new_goals, 1);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }
}
