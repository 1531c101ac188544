/**
 * Server Configuration
 *
 * Configuration is layered, later sources winning:
 *
 * 1. built-in defaults
 * 2. an optional TOML file named by `SSR_CONFIG`
 * 3. environment variables
 *
 * | Variable             | Meaning                                   |
 * |----------------------|-------------------------------------------|
 * | `SERVER_PORT`        | listen port (default 3000)                |
 * | `SSR_DEV`            | development mode (`1`/`true`/`yes`)       |
 * | `SSR_PARTIAL_PATH`   | asset partial emitted by the client build |
 * | `SSR_STATIC_DIR`     | directory served under `/static`          |
 * | `API_BASE_URL`       | upstream API used by page effects         |
 * | `SSR_ANALYTICS_PATH` | file whose contents are the analytics tag |
 *
 * Unlike optional services, a broken configuration stops startup: the
 * server cannot render anything useful without it.
 *
 * # Example file
 *
 * ```toml
 * port = 8000
 * static_dir = "./dist/prod/static"
 * analytics_path = "./analytics.html"
 *
 * [render]
 * api_base_url = "https://api.golangci.com"
 * ```
 */

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::shared::{ConfigError, RenderConfig, RenderConfigBuilder};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_STATIC_DIR: &str = "./dist/prod/static";

/// Environment variable naming the TOML configuration file
pub const CONFIG_PATH_VAR: &str = "SSR_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub render: RenderConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            render: RenderConfig::default(),
        }
    }
}

/// Shape of the configuration file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    analytics_path: Option<PathBuf>,
    #[serde(default)]
    render: RenderConfigBuilder,
}

/// Values gathered from all layers before validation
#[derive(Debug, Default)]
struct Layers {
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    analytics_path: Option<PathBuf>,
    render: RenderConfigBuilder,
}

impl Layers {
    fn apply_file(mut self, file: ConfigFile) -> Self {
        self.port = file.port.or(self.port);
        self.static_dir = file.static_dir.or(self.static_dir);
        self.analytics_path = file.analytics_path.or(self.analytics_path);
        self.render = self.render.merge(file.render);
        self
    }

    fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("SERVER_PORT") {
            let parsed = port.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: port.clone(),
            })?;
            self.port = Some(parsed);
        }
        if let Some(dev) = lookup("SSR_DEV") {
            self.render = self.render.dev_mode(parse_flag("SSR_DEV", &dev)?);
        }
        if let Some(path) = lookup("SSR_PARTIAL_PATH") {
            self.render = self.render.partial_path(path);
        }
        if let Some(dir) = lookup("SSR_STATIC_DIR") {
            self.static_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup("API_BASE_URL") {
            self.render = self.render.api_base_url(url);
        }
        if let Some(path) = lookup("SSR_ANALYTICS_PATH") {
            self.analytics_path = Some(PathBuf::from(path));
        }
        Ok(self)
    }

    fn finish(self) -> Result<ServerConfig, ConfigError> {
        let mut render = self.render;
        if let Some(path) = &self.analytics_path {
            render = render.analytics_html(read_file(path)?);
        }

        Ok(ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            static_dir: self
                .static_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            render: render.build()?,
        })
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration reading variables through `lookup`
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layers = Layers::default();
        if let Some(path) = lookup(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "reading configuration file");
            layers = layers.apply_file(toml::from_str(&read_file(&path)?)?);
        }

        let config = layers.apply_env(lookup)?.finish()?;
        tracing::info!(
            port = config.port,
            dev_mode = config.render.dev_mode,
            api = %config.render.api_base_url,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Configuration from TOML text alone, without the environment
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Layers::default().apply_file(file).finish()
    }
}
