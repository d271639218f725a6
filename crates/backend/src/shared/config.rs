use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// MongoDB connection string. Left empty here so that a missing
    /// `MONGODB_URI` surfaces as a configuration error instead of a
    /// connection attempt against a bogus default.
    #[serde(default)]
    pub uri: String,
    #[serde(default = "default_db_name")]
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    /// When set, the static demo dataset replaces live aggregation.
    #[serde(default)]
    pub use_mock_data: bool,
}

fn default_db_name() -> String {
    "optizen".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
uri = ""
name = "optizen"

[dashboard]
use_mock_data = false
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment variables `MONGODB_URI`, `MONGODB_DB_NAME` and
/// `ENABLE_MOCK_DATA` override the file values.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    apply_env_overrides(&mut config);
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(uri) = std::env::var("MONGODB_URI") {
        if !uri.is_empty() {
            config.database.uri = uri;
        }
    }
    if let Ok(name) = std::env::var("MONGODB_DB_NAME") {
        if !name.is_empty() {
            config.database.name = name;
        }
    }
    if let Ok(flag) = std::env::var("ENABLE_MOCK_DATA") {
        config.dashboard.use_mock_data = flag == "true";
    }
}
