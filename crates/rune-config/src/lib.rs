//! rune-line configuration system
//!
//! This crate provides centralized configuration for the rune-line driver,
//! loading settings from `rune-line.toml` with environment variable
//! overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "rune-line.toml";

/// Main configuration structure for rune-line
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RuneLineConfig {
    /// Font settings
    pub font: FontConfig,
    /// Input text settings
    pub text: TextConfig,
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to a font file (.ttf/.otf/.ttc); system sans-serif when unset
    pub path: Option<PathBuf>,
    /// Face index within a font collection
    pub index: u32,
    /// Font size in pixels per em
    pub pixel_size: f32,
}

/// Code-unit encoding the driver hands to the layout engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    Utf8,
    Utf16,
    Utf32,
}

impl TextEncoding {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().replace('-', "").as_str() {
            "utf8" => Some(Self::Utf8),
            "utf16" => Some(Self::Utf16),
            "utf32" => Some(Self::Utf32),
            _ => None,
        }
    }
}

/// Input text configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// UTF-8 file holding the line to lay out
    pub path: Option<PathBuf>,
    /// Encoding used when passing the text to the layout engine
    pub encoding: TextEncoding,
    /// BCP-47 language tag for shaping
    pub language: Option<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: None,
            index: 0,
            pixel_size: 70.0,
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            path: None,
            encoding: TextEncoding::Utf16,
            language: None,
        }
    }
}

impl RuneLineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the rune-line.toml configuration file
    ///
    /// # Returns
    /// * `Ok(RuneLineConfig)` - Successfully loaded configuration
    /// * `Err(String)` - Error message if loading failed
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load configuration from rune-line.toml in the current directory
    /// or return default configuration if the file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Font settings
        if let Ok(path) = std::env::var("RUNE_LINE_FONT") {
            self.font.path = Some(PathBuf::from(path));
        }
        if let Ok(val) = std::env::var("RUNE_LINE_FONT_INDEX") {
            if let Ok(index) = val.parse::<u32>() {
                self.font.index = index;
            }
        }
        if let Ok(val) = std::env::var("RUNE_LINE_PIXEL_SIZE") {
            if let Ok(size) = val.parse::<f32>() {
                self.font.pixel_size = size;
            }
        }

        // Text settings
        if let Ok(path) = std::env::var("RUNE_LINE_TEXT") {
            self.text.path = Some(PathBuf::from(path));
        }
        if let Ok(val) = std::env::var("RUNE_LINE_ENCODING") {
            if let Some(encoding) = TextEncoding::parse(&val) {
                self.text.encoding = encoding;
            }
        }
        if let Ok(language) = std::env::var("RUNE_LINE_LANGUAGE") {
            self.text.language = Some(language);
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from rune-line.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
