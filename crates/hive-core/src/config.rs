//! Configuration types for the Hive API server.
//!
//! Configuration is loaded once from a YAML file at process start and passed
//! into the components that need it at construction time. Nothing reads
//! configuration from ambient global state after startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file to load.
pub const CONFIG_PATH_ENV: &str = "HIVE_CONFIG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}

/// Complete Hive configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiveConfig {
    /// Deployment environment designation ("development", "production", ...).
    #[serde(default = "default_environment")]
    pub environment: String,

    #[serde(default)]
    pub server: ServerConfig,

    pub jwt: JwtConfig,

    pub mongo: MongoConfig,

    pub orchestration: OrchestrationConfig,

    #[serde(default)]
    pub bots: BotDefaults,
}

impl HiveConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load configuration from the path named by `HIVE_CONFIG`,
    /// defaulting to `hive.yaml` in the working directory.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "hive.yaml".to_string());
        Self::load(Path::new(&path))
    }
}

fn default_environment() -> String {
    "development".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address, e.g. "0.0.0.0:8080".
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Token signing and verification settings.
///
/// The private key is optional: verification-only deployments hold just the
/// public key and never gain issuance capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Issuer claim stamped into and required from every token.
    pub issuer: String,

    /// Path to the RSA private key PEM. Absent on verify-only deployments.
    #[serde(default)]
    pub private_key: Option<PathBuf>,

    /// Path to the RSA public key PEM.
    pub public_key: PathBuf,

    /// Issued-token lifetime in days.
    #[serde(default = "default_token_ttl_days")]
    pub ttl_days: i64,
}

fn default_token_ttl_days() -> i64 {
    30
}

/// Document store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection URI.
    pub uri: String,

    /// Database name.
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_database() -> String {
    "hive".to_string()
}

/// Orchestration collaborator endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    /// Base URL of the orchestration API, e.g. "http://orchestrator:9000".
    pub url: String,
}

/// Defaults applied to newly created bot instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotDefaults {
    /// Project the bot is attached to until an operator reassigns it.
    #[serde(default = "default_project_id")]
    pub default_project_id: String,

    /// Domain under which the bot's public URL is formed as
    /// `https://<slug>.<public_domain>`.
    #[serde(default = "default_public_domain")]
    pub public_domain: String,
}

fn default_project_id() -> String {
    "default".to_string()
}

fn default_public_domain() -> String {
    "bots.example.com".to_string()
}

impl Default for BotDefaults {
    fn default() -> Self {
        Self {
            default_project_id: default_project_id(),
            public_domain: default_public_domain(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config() {
        let yaml = r#"
jwt:
  issuer: hive-test
  public_key: /keys/jwt.pub.pem
mongo:
  uri: mongodb://localhost:27017
orchestration:
  url: http://localhost:9000
"#;
        let config: HiveConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.jwt.issuer, "hive-test");
        assert!(config.jwt.private_key.is_none());
        assert_eq!(config.jwt.ttl_days, 30);
        assert_eq!(config.mongo.database, "hive");
        assert_eq!(config.bots.default_project_id, "default");
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
environment: production
server:
  bind: 127.0.0.1:3000
jwt:
  issuer: hive
  private_key: /keys/jwt.pem
  public_key: /keys/jwt.pub.pem
  ttl_days: 7
mongo:
  uri: mongodb://db:27017
  database: hive-prod
orchestration:
  url: http://orchestrator:9000
bots:
  default_project_id: pW2WEr9JJoWauvFge
  public_domain: bots.hive.example
"#;
        let config: HiveConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.environment, "production");
        assert_eq!(config.jwt.ttl_days, 7);
        assert!(config.jwt.private_key.is_some());
        assert_eq!(config.mongo.database, "hive-prod");
        assert_eq!(config.bots.public_domain, "bots.hive.example");
    }
}
