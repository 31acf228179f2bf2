use config::{Config, Environment, File};
use rowmap::MappingError;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `ROWMAP__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "ROWMAP";

/// Custom error type for config loading and profile validation.
#[rowmap_derive::rowmap_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Profile error{}: {source}", format_context(.context))]
    Mapping { source: MappingError, context: Option<Cow<'static, str>> },

    #[error("Invalid profile{}: {message}", format_context(.context))]
    Profile { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ConfigError {
    pub(crate) fn profile(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Profile { message: message.into(), context: None }
    }
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// This function implements a layered configuration strategy:
/// 1. **Base File**: Loads settings from a file (e.g., `users.toml`). If no path is provided, it defaults to `"rowmap"`,
///    resolved against the supported extensions (`toml`, `json`, `yaml`).
/// 2. **Environment Overrides**: Overlays values from environment variables prefixed with `ROWMAP__`.
///    Nested structures are accessed using double underscores (e.g., `ROWMAP__LOGGING__LEVEL` maps to `logging.level`).
///
/// # Errors
/// This function will return an error if:
/// * The specified (or default) configuration file cannot be found.
/// * The content of the file does not match the structure of type `T`.
///
/// # Example
/// ```rust
/// use rowmap_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     name: String,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path = path.map_or_else(|| PathBuf::from("rowmap"), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
