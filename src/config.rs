//! Gallery configuration.
//!
//! A [`GalleryConfig`] is resolved by overlaying caller-supplied options onto
//! stock defaults: supplied values win, everything else keeps its default.
//! Options use the camelCase names of the widget's markup contract.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! imagesSelector = "a img"             # Thumbnails, queried inside the container
//! galleryElementSelector = "#largeImg" # The viewer, queried in the whole document
//! preload = true                       # Fetch full-size images at construction
//! transitionTime = 200                 # Milliseconds the viewer stays hidden
//! strategy = "suffix"                  # "suffix" or "anchor-href"
//! thumbSuffix = "-thumb"               # suffix strategy: marker in thumbnail URLs
//! largeSuffix = "-lg"                  # suffix strategy: replacement marker
//! hiddenClass = "hidden"               # Class applied while transitioning
//! ```
//!
//! ## Partial Configuration
//!
//! Option sets are sparse. Unknown keys are ignored, so an options file
//! shared with other page scripts does not break the gallery.

use crate::selector::{Selector, SelectorError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Upper bound for `transitionTime`.
pub const MAX_TRANSITION_MS: u64 = 60_000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid selector: {0}")]
    Selector(#[from] SelectorError),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How a thumbnail's full-size image URL is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Replace `thumbSuffix` with `largeSuffix` in the thumbnail's own `src`.
    #[default]
    Suffix,
    /// Use the `href` of the link wrapping the thumbnail.
    AnchorHref,
}

/// Resolved gallery options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GalleryConfig {
    pub images_selector: String,
    pub gallery_element_selector: String,
    pub preload: bool,
    /// Milliseconds between hiding the viewer and swapping its image.
    pub transition_time: u64,
    pub strategy: Strategy,
    pub thumb_suffix: String,
    pub large_suffix: String,
    pub hidden_class: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            images_selector: "a img".to_string(),
            gallery_element_selector: "#largeImg".to_string(),
            preload: true,
            transition_time: 200,
            strategy: Strategy::Suffix,
            thumb_suffix: "-thumb".to_string(),
            large_suffix: "-lg".to_string(),
            hidden_class: "hidden".to_string(),
        }
    }
}

impl GalleryConfig {
    /// Overlay `options` onto the stock defaults, then validate.
    pub fn from_options(options: toml::Value) -> Result<Self, ConfigError> {
        resolve_config(stock_defaults_value(), Some(options))
    }

    /// Parse both selectors.
    pub fn selectors(&self) -> Result<(Selector, Selector), ConfigError> {
        Ok((
            Selector::parse(&self.images_selector)?,
            Selector::parse(&self.gallery_element_selector)?,
        ))
    }

    /// Validate option values. Selectors must parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selectors()?;
        if self.transition_time > MAX_TRANSITION_MS {
            return Err(ConfigError::Validation(format!(
                "transitionTime must be at most {MAX_TRANSITION_MS} ms"
            )));
        }
        if self.strategy == Strategy::Suffix && self.thumb_suffix.is_empty() {
            return Err(ConfigError::Validation(
                "thumbSuffix must not be empty with the suffix strategy".into(),
            ));
        }
        if self.hidden_class.is_empty() || self.hidden_class.contains(char::is_whitespace) {
            return Err(ConfigError::Validation(
                "hiddenClass must be a single class name".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(GalleryConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<GalleryConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: GalleryConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load options from a TOML file on top of the stock defaults.
///
/// `None` yields the defaults. A missing file is an error: the caller named it.
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig, ConfigError> {
    let overlay = match path {
        Some(p) => Some(toml::from_str::<toml::Value>(&fs::read_to_string(p)?)?),
        None => None,
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock options file.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# lightgal options
# ================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys are ignored.

# Selector for thumbnail images, queried inside the thumbnail container.
imagesSelector = "a img"

# Selector for the single large-image viewer, queried in the whole document.
galleryElementSelector = "#largeImg"

# Fetch every full-size image into a hidden container at startup.
preload = true

# Milliseconds the viewer stays hidden while its image is swapped.
transitionTime = 200

# How the full-size URL is found for a thumbnail:
#   "suffix"      -> replace thumbSuffix with largeSuffix in the thumbnail src
#   "anchor-href" -> use the href of the link wrapping the thumbnail
strategy = "suffix"

# Marker in thumbnail file names, and its full-size replacement.
thumbSuffix = "-thumb"
largeSuffix = "-lg"

# Class put on the viewer during a transition.
hiddenClass = "hidden"
"##
}
