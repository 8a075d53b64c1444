//! # Engine Configuration
//!
//! Settings that shape how a properties source is resolved: the default icon
//! dimension, the built-in fallback font, whether forward references get a
//! second resolution pass, and where filesystem loaders look for icons.
//!
//! ## Sources
//!
//! - [EngineConfig::new]: built-in defaults
//! - [EngineConfig::from_toml] / [EngineConfig::from_file]: a TOML document
//! - [EngineConfig::from_env_or_default]: environment variables
//!
//! ## Environment Variables
//!
//! - `UMBRA_DEFAULTS_CONFIG`: path to a TOML configuration file
//! - `UMBRA_ICON_SIZE`: default icon dimension as `width,height`
//! - `UMBRA_SECOND_PASS`: `true` to retry forward references after the load
//!
//! ## File Format
//!
//! ```toml
//! [icon]
//! default_width = 16
//! default_height = 16
//! roots = ["/usr/share/umbra/icons"]
//!
//! [font]
//! family = "Dialog"
//! size = 12
//!
//! [references]
//! second_pass = false
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DefaultsError, DefaultsResult};
use crate::icon::DEFAULT_ICON_SIZE;
use crate::util::parse_int_tuple;
use crate::value::{FontSpec, FontStyle};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "UMBRA_DEFAULTS_CONFIG";
/// Environment variable overriding the default icon dimension.
pub const ICON_SIZE_ENV: &str = "UMBRA_ICON_SIZE";
/// Environment variable enabling the second reference pass.
pub const SECOND_PASS_ENV: &str = "UMBRA_SECOND_PASS";

/// Icon settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IconSettings {
    /// Width used when an icon path carries no dimension.
    pub default_width: u32,
    /// Height used when an icon path carries no dimension.
    pub default_height: u32,
    /// Directories searched by filesystem loaders, in order.
    pub roots: Vec<PathBuf>,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            default_width: DEFAULT_ICON_SIZE.0,
            default_height: DEFAULT_ICON_SIZE.1,
            roots: Vec::new(),
        }
    }
}

/// Settings of the font used when a font declaration cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    /// Family name.
    pub family: String,
    /// Point size.
    pub size: i32,
}

impl Default for FontSettings {
    fn default() -> Self {
        let builtin = FontSpec::builtin();
        Self {
            family: builtin.family,
            size: builtin.size,
        }
    }
}

/// Reference resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReferenceSettings {
    /// Retry forward references once the whole source has been folded.
    pub second_pass: bool,
}

/// Configuration of the defaults engine.
///
/// # Examples
///
/// ```rust
/// use umbra_defaults::config::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_icon_size(24, 24)
///     .with_second_pass(true);
/// assert_eq!(config.icon_size(), (24, 24));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Icon settings.
    pub icon: IconSettings,
    /// Fallback font settings.
    pub font: FontSettings,
    /// Reference settings.
    pub references: ReferenceSettings,
}

impl EngineConfig {
    /// Create a configuration with built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration from environment variables or use defaults.
    ///
    /// `UMBRA_DEFAULTS_CONFIG` is read first; `UMBRA_ICON_SIZE` and
    /// `UMBRA_SECOND_PASS` then override individual settings. Unusable
    /// values are logged and ignored.
    pub fn from_env_or_default() -> Self {
        let mut config = Self::new();

        if let Ok(path) = env::var(CONFIG_ENV) {
            match Self::from_file(&path) {
                Ok(file_config) => config = file_config,
                Err(e) => log::warn!("Ignoring {}: {}", CONFIG_ENV, e),
            }
        }

        if let Ok(size) = env::var(ICON_SIZE_ENV) {
            match Self::parse_icon_size(&size) {
                Ok((width, height)) => config = config.with_icon_size(width, height),
                Err(e) => log::warn!("Ignoring {}: {}", ICON_SIZE_ENV, e),
            }
        }

        if let Ok(flag) = env::var(SECOND_PASS_ENV) {
            match flag.trim().to_lowercase().as_str() {
                "true" | "1" => config.references.second_pass = true,
                "false" | "0" => config.references.second_pass = false,
                _ => log::warn!(
                    "Ignoring {}: {}",
                    SECOND_PASS_ENV,
                    DefaultsError::invalid_setting(SECOND_PASS_ENV, flag.as_str())
                ),
            }
        }

        config
    }

    /// Load a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> DefaultsResult<Self> {
        let path = path.as_ref();
        if path.extension().and_then(|s| s.to_str()) != Some("toml") {
            return Err(DefaultsError::config_error(
                path,
                "Unsupported configuration file format. Use .toml",
            ));
        }

        let content = fs::read_to_string(path).map_err(|e| DefaultsError::read_error(path, e))?;
        toml::from_str(&content).map_err(|e| DefaultsError::config_error(path, e.to_string()))
    }

    /// Load a configuration from TOML content.
    pub fn from_toml(content: &str) -> DefaultsResult<Self> {
        toml::from_str(content).map_err(|e| DefaultsError::config_error("<inline>", e.to_string()))
    }

    /// Set the default icon dimension.
    pub fn with_icon_size(mut self, width: u32, height: u32) -> Self {
        self.icon.default_width = width;
        self.icon.default_height = height;
        self
    }

    /// Add an icon search root.
    pub fn with_icon_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.icon.roots.push(root.into());
        self
    }

    /// Set the fallback font.
    pub fn with_fallback_font(mut self, family: impl Into<String>, size: i32) -> Self {
        self.font.family = family.into();
        self.font.size = size;
        self
    }

    /// Enable or disable the second reference pass.
    pub fn with_second_pass(mut self, enabled: bool) -> Self {
        self.references.second_pass = enabled;
        self
    }

    /// The default icon dimension.
    pub fn icon_size(&self) -> (u32, u32) {
        (self.icon.default_width, self.icon.default_height)
    }

    /// The font recorded for unparseable font declarations.
    pub fn fallback_font(&self) -> FontSpec {
        FontSpec::new(self.font.family.clone(), FontStyle::Plain, self.font.size)
    }

    fn parse_icon_size(value: &str) -> DefaultsResult<(u32, u32)> {
        parse_int_tuple::<2>(value)
            .and_then(|[w, h]| Some((u32::try_from(w).ok()?, u32::try_from(h).ok()?)))
            .ok_or_else(|| DefaultsError::invalid_setting(ICON_SIZE_ENV, value))
    }
}
