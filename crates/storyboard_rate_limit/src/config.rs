//! Configuration loading for the storyboard generator.
//!
//! Sources are layered, later sources overriding earlier ones:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - `~/.config/storyboard/storyboard.toml`
//! - `./storyboard.toml`

use crate::{RetryPolicy, TierConfig};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storyboard_error::{ConfigError, ConfigErrorKind, StoryboardError, StoryboardResult};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

/// Gemini endpoint and model selection.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeminiSettings {
    /// REST base, without trailing slash
    pub base_url: String,
    /// Text model used to write the script
    pub script_model: String,
    /// Image model used to render scenes
    pub image_model: String,
    /// Sampling temperature for script generation
    pub temperature: f32,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
    /// Client-side throttling tier
    #[serde(default)]
    pub tier: TierConfig,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            script_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            temperature: 0.7,
            request_timeout_secs: 120,
            tier: TierConfig::default(),
        }
    }
}

/// Where story history is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StorageSettings {
    /// Overrides the platform data directory
    #[serde(default)]
    pub history_dir: Option<String>,
}

impl StorageSettings {
    /// Resolved history directory.
    ///
    /// Falls back to `<data dir>/storyboard`, then `./.storyboard` when the
    /// platform has no data directory.
    pub fn history_dir(&self) -> PathBuf {
        match &self.history_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("storyboard"))
                .unwrap_or_else(|| PathBuf::from(".storyboard")),
        }
    }
}

/// Top-level storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_rate_limit::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// println!("image model: {}", config.gemini.image_model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StoryboardConfig {
    /// Queue retry and pacing
    #[serde(default)]
    pub retry: RetryPolicy,
    /// Provider settings
    #[serde(default)]
    pub gemini: GeminiSettings,
    /// History settings
    #[serde(default)]
    pub storage: StorageSettings,
}

impl StoryboardConfig {
    /// Load configuration layered on top of the bundled defaults.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyboard").required(false));

        Self::finish(builder)
    }

    /// Load the bundled defaults overlaid with one explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or cannot be parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StoryboardResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(ConfigErrorKind::Build(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                StoryboardError::from(ConfigError::new(ConfigErrorKind::Parse(e.to_string())))
            })?;

        debug!(
            max_retries = config.retry.max_retries(),
            image_model = %config.gemini.image_model,
            tier = %config.gemini.tier.name,
            "Configuration loaded"
        );
        Ok(config)
    }
}
