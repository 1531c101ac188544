//! Render configuration
//!
//! Describes where the page template pieces come from and which upstream
//! API effects talk to. Loading from files and the environment lives in
//! `backend::server::config`; this module only holds the validated values.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default location of the production asset partial
pub const DEFAULT_PARTIAL_PATH: &str = "./dist/prod/webpack.partial.html";

/// Asset markup used in development instead of the built partial
pub const DEV_PARTIAL_HTML: &str = r#"
      <script src="/js/dist/dev/dev.client.app.js" type="text/javascript" defer></script>
      <link href="https://fonts.googleapis.com/css?family=Roboto" rel="stylesheet"></link>
"#;

/// Favicon and tile markup spliced into every document head
pub const FAVICON_HTML: &str = r##"
<link rel="apple-touch-icon" sizes="180x180" href="/favicon/apple-touch-icon.png">
<link rel="icon" type="image/png" sizes="32x32" href="/favicon/favicon-32x32.png">
<link rel="icon" type="image/png" sizes="16x16" href="/favicon/favicon-16x16.png">
<link rel="manifest" href="/favicon/manifest.json">
<link rel="mask-icon" href="/favicon/safari-pinned-tab.svg" color="#5bbad5">
<link rel="shortcut icon" href="/favicon/favicon.ico">
<meta name="msapplication-TileColor" content="#2b5797">
<meta name="msapplication-TileImage" content="/favicon/mstile-144x144.png">
<meta name="msapplication-config" content="/favicon/browserconfig.xml">
<meta name="theme-color" content="#ffffff">
"##;

/// Default upstream API
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

/// Where the asset partial comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartialSource {
    /// Markup known up front (development)
    Inline(String),
    /// Build output read from disk on first use
    File(PathBuf),
}

/// Validated render configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub dev_mode: bool,
    pub partial: PartialSource,
    pub favicon_html: String,
    /// Analytics markup, always empty in development
    pub analytics_html: String,
    pub api_base_url: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            partial: PartialSource::File(PathBuf::from(DEFAULT_PARTIAL_PATH)),
            favicon_html: FAVICON_HTML.to_string(),
            analytics_html: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl RenderConfig {
    /// Create a new RenderConfigBuilder
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(url.to_string()));
        }
        if let PartialSource::File(path) = &self.partial {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::MissingValue("partial_path"));
            }
        }
        Ok(())
    }
}

/// Builder for RenderConfig
///
/// Unset fields fall back to [`RenderConfig::default`]; `dev_mode` switches
/// the partial to [`DEV_PARTIAL_HTML`] and drops analytics unless a partial
/// was chosen explicitly.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RenderConfigBuilder {
    dev_mode: Option<bool>,
    partial_path: Option<PathBuf>,
    #[serde(skip)]
    inline_partial: Option<String>,
    favicon_html: Option<String>,
    analytics_html: Option<String>,
    api_base_url: Option<String>,
}

impl RenderConfigBuilder {
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = Some(dev_mode);
        self
    }

    pub fn partial_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.partial_path = Some(path.into());
        self.inline_partial = None;
        self
    }

    pub fn inline_partial(mut self, html: impl Into<String>) -> Self {
        self.inline_partial = Some(html.into());
        self.partial_path = None;
        self
    }

    pub fn favicon_html(mut self, html: impl Into<String>) -> Self {
        self.favicon_html = Some(html.into());
        self
    }

    pub fn analytics_html(mut self, html: impl Into<String>) -> Self {
        self.analytics_html = Some(html.into());
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Overlay values set in `other` on top of this builder
    pub fn merge(mut self, other: RenderConfigBuilder) -> Self {
        if other.dev_mode.is_some() {
            self.dev_mode = other.dev_mode;
        }
        if other.partial_path.is_some() {
            self.partial_path = other.partial_path;
            self.inline_partial = None;
        }
        if other.inline_partial.is_some() {
            self.inline_partial = other.inline_partial;
            self.partial_path = None;
        }
        if other.favicon_html.is_some() {
            self.favicon_html = other.favicon_html;
        }
        if other.analytics_html.is_some() {
            self.analytics_html = other.analytics_html;
        }
        if other.api_base_url.is_some() {
            self.api_base_url = other.api_base_url;
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<RenderConfig, ConfigError> {
        let defaults = RenderConfig::default();
        let dev_mode = self.dev_mode.unwrap_or(false);

        let partial = match (self.inline_partial, self.partial_path) {
            (Some(html), _) => PartialSource::Inline(html),
            (None, Some(path)) => PartialSource::File(path),
            (None, None) if dev_mode => PartialSource::Inline(DEV_PARTIAL_HTML.to_string()),
            (None, None) => defaults.partial,
        };

        let analytics_html = if dev_mode {
            String::new()
        } else {
            self.analytics_html.unwrap_or(defaults.analytics_html)
        };

        let config = RenderConfig {
            dev_mode,
            partial,
            favicon_html: self.favicon_html.unwrap_or(defaults.favicon_html),
            analytics_html,
            api_base_url: self
                .api_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
