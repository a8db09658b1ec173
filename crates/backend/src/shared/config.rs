use contracts::domain::common::TransitionPolicy;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub transitions: TransitionsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid server address {}:{}: {}", self.host, self.port, e))?;
        Ok(addr)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: String,
    pub seed: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: "target/db/techzone.db".into(),
            seed: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default)]
pub struct TransitionsConfig {
    #[serde(default)]
    pub policy: TransitionPolicy,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Cookie `techzone_session`
    #[default]
    Session,
    /// `Authorization: Bearer <token>`
    Bearer,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub require_login: bool,
    pub admin_email: String,
    pub reset_token_ttl_minutes: i64,
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
    /// Предел одновременно хранимых сессий и токенов сброса
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_session_ttl_minutes() -> i64 {
    480
}

fn default_max_entries() -> usize {
    1000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::Session,
            require_login: false,
            admin_email: "admin@techzone.com".into(),
            reset_token_ttl_minutes: 60,
            session_ttl_minutes: default_session_ttl_minutes(),
            max_entries: default_max_entries(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000/api".into(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[storage]
backend = "memory"
path = "target/db/techzone.db"
seed = true

[transitions]
policy = "enforce"

[auth]
mode = "session"
require_login = false
admin_email = "admin@techzone.com"
reset_token_ttl_minutes = 60
session_ttl_minutes = 480
max_entries = 1000

[api]
base_url = "http://127.0.0.1:3000/api"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current working directory
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let mut candidates = Vec::new();
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    for config_path in candidates {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            return load_from_file(&config_path);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    parse(DEFAULT_CONFIG)
}

pub fn load_from_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
    parse(&contents)
}

pub fn parse(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> PathBuf {
    let db_path = Path::new(&config.storage.path);

    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return exe_dir.join(db_path);
        }
    }

    PathBuf::from(&config.storage.path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, "target/db/techzone.db");
        assert_eq!(config.transitions.policy, TransitionPolicy::Enforce);
        assert_eq!(config.auth.mode, AuthMode::Session);
        assert!(!config.auth.require_login);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse(
            r#"
            [storage]
            backend = "sqlite"
            path = "/tmp/techzone.db"
            seed = false

            [transitions]
            policy = "permissive"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.transitions.policy, TransitionPolicy::Permissive);
        assert_eq!(config.auth.admin_email, "admin@techzone.com");
        assert_eq!(config.auth.session_ttl_minutes, 480);
        assert_eq!(get_database_path(&config), PathBuf::from("/tmp/techzone.db"));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(parse("[storage]\nbackend = \"mongo\"\npath = \"x\"\nseed = true").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = Config::default();
        assert_eq!(config.server.socket_addr().unwrap().port(), 3000);
    }
}
