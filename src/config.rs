use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CopyError, Result};
use crate::serialize::{Delimiter, FormatConfig, QuoteChar};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuoteType {
    #[default]
    Double,
    Single,
}

/// Persisted user settings. Keys match the stored names.
///
/// Any key missing from storage takes its default, so a partially
/// written file still loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "useCSV")]
    pub use_csv: bool,
    #[serde(rename = "quoteStrings")]
    pub quote_strings: bool,
    #[serde(rename = "quoteType")]
    pub quote_type: QuoteType,
    #[serde(rename = "escapeQuotes")]
    pub escape_quotes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_csv: false,
            quote_strings: false,
            quote_type: QuoteType::Double,
            escape_quotes: false,
        }
    }
}

impl Settings {
    pub fn format_config(&self) -> FormatConfig {
        FormatConfig {
            delimiter: if self.use_csv { Delimiter::Comma } else { Delimiter::Tab },
            quote_strings: self.quote_strings,
            quote_char: match self.quote_type {
                QuoteType::Double => QuoteChar::Double,
                QuoteType::Single => QuoteChar::Single,
            },
            escape_quotes: self.escape_quotes,
        }
    }

    /// Set one setting by its stored key name.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = || CopyError::InvalidSetting {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "useCSV" => self.use_csv = parse_bool(value).ok_or_else(invalid)?,
            "quoteStrings" => self.quote_strings = parse_bool(value).ok_or_else(invalid)?,
            "escapeQuotes" => self.escape_quotes = parse_bool(value).ok_or_else(invalid)?,
            "quoteType" => {
                self.quote_type = match value.to_lowercase().as_str() {
                    "double" | "\"" => QuoteType::Double,
                    "single" | "'" => QuoteType::Single,
                    _ => return Err(invalid()),
                }
            }
            _ => return Err(CopyError::UnknownSetting(key.to_string())),
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Where settings come from at the start of each copy.
pub trait SettingsSource {
    fn load(&self) -> Settings;
}

impl SettingsSource for Settings {
    fn load(&self) -> Settings {
        self.clone()
    }
}

/// One-off changes laid over another source for a single copy.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides<S> {
    pub inner: S,
    pub use_csv: Option<bool>,
    pub quote_strings: Option<bool>,
    pub quote_type: Option<QuoteType>,
}

impl<S: SettingsSource> SettingsOverrides<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, use_csv: None, quote_strings: None, quote_type: None }
    }
}

impl<S: SettingsSource> SettingsSource for SettingsOverrides<S> {
    fn load(&self) -> Settings {
        let mut settings = self.inner.load();
        if let Some(use_csv) = self.use_csv {
            settings.use_csv = use_csv;
        }
        if let Some(quote_strings) = self.quote_strings {
            settings.quote_strings = quote_strings;
        }
        if let Some(quote_type) = self.quote_type {
            settings.quote_type = quote_type;
        }
        settings
    }
}

/// Settings stored as TOML on disk.
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `$HOME/.config/tablecopy/settings.toml`
    pub fn default_location() -> Self {
        Self::new(settings_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, change one key, and write back.
    pub fn set(&self, key: &str, value: &str) -> Result<Settings> {
        let mut settings = self.load();
        settings.set(key, value)?;
        self.save(&settings)?;
        info!(key, value, path = %self.path.display(), "setting saved");
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, settings.to_toml()?)?;
        Ok(())
    }
}

impl SettingsSource for SettingsFile {
    /// Missing or malformed storage falls back to defaults.
    fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Settings::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read settings");
                return Settings::default();
            }
        };

        toml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to parse settings");
            Settings::default()
        })
    }
}

fn settings_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/tablecopy/settings.toml")
    } else {
        PathBuf::from(".config/tablecopy/settings.toml")
    }
}
