use config::{Config, Environment as EnvSource, File};
use keel_domain::config::{Settings, SettingsInner};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default configuration file stem, resolved against every supported extension.
pub const DEFAULT_CONFIG_FILE: &str = "keel";

/// Custom error type for settings loading and startup validation.
#[keel_derive::keel_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Unsafe configuration{}: {message}", format_context(.context))]
    UnsafeConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Loads [`Settings`] from the layered configuration sources.
///
/// Layers, lowest priority first:
/// 1. **Defaults**: the values of [`SettingsInner::default`].
/// 2. **File**: `path` when given (must exist), otherwise an optional `keel.{toml,..}`.
/// 3. **Environment**: process variables whose lowercased names match a settings field
///    (`PORT`, `ENABLE_OCR`, `CORS_ORIGINS`, ...).
///
/// This only parses. Call [`validate`] before acting on the result.
///
/// # Example
/// ```rust,no_run
/// use keel_kernel::config::{load_settings, validate};
///
/// let settings = load_settings(None::<&str>).unwrap_or_default();
/// validate(&settings).expect("safe configuration");
/// ```
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<Settings, ConfigError> {
    build(EnvSource::default(), path)
}

/// Same as [`load_settings`], reading variables from `vars` instead of the process
/// environment.
pub fn load_settings_from(
    vars: HashMap<String, String>,
    path: Option<impl AsRef<Path>>,
) -> Result<Settings, ConfigError> {
    build(EnvSource::default().source(Some(vars)), path)
}

/// Refuses to start when the process is configured for production with debug enabled.
///
/// No other invariant is enforced here.
pub fn validate(settings: &SettingsInner) -> Result<(), ConfigError> {
    if settings.is_production() && settings.debug {
        return Err(ConfigError::UnsafeConfiguration {
            message: "DEBUG must be false when ENVIRONMENT is production".into(),
            context: None,
        });
    }
    debug!(environment = %settings.environment, debug = settings.debug, "Settings validated");
    Ok(())
}

fn build(env: EnvSource, path: Option<impl AsRef<Path>>) -> Result<Settings, ConfigError> {
    let (file, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.as_ref().to_path_buf(), true),
    );

    let inner = Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(env)
        .build()
        .context("Failed to build settings")?
        .try_deserialize::<SettingsInner>()
        .context("Failed to deserialize settings")?;

    Ok(Settings::new(inner))
}
