// Rule document loaders

use crate::{ConfigError, Result, RuleDocument};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Supported rule file formats
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Rule document loader.
///
/// Every loaded document is checked with [`RuleDocument::check`] before it
/// is returned, so a bad regex or a duplicated field fails at load time.
pub struct RuleLoader {
    format: FileFormat,
}

impl RuleLoader {
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ConfigError::LoadError("No file extension found".to_string()))?;

        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| ConfigError::UnsupportedFormat(ext.to_string()))?;

        Ok(Self::new(format))
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// Load rules from file
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<RuleDocument> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let document = self.parse(&content)?;
        debug!(
            path = %path.display(),
            fields = document.fields.len(),
            rules = document.rule_count(),
            "Loaded validation rules"
        );
        Ok(document)
    }

    /// Parse rules from string
    pub fn parse(&self, content: &str) -> Result<RuleDocument> {
        let document = match self.format {
            FileFormat::Json => self.parse_json(content)?,
            FileFormat::Toml => self.parse_toml(content)?,
        };

        document.check()?;
        Ok(document)
    }

    fn parse_json(&self, content: &str) -> Result<RuleDocument> {
        serde_json::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e)))
    }

    fn parse_toml(&self, content: &str) -> Result<RuleDocument> {
        let toml_value: toml::Value = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))?;

        // Rule kinds are internally tagged, so go through the JSON data model
        let json_value = serde_json::to_value(&toml_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML to JSON conversion error: {}", e)))?;

        serde_json::from_value(json_value)
            .map_err(|e| ConfigError::ParseError(format!("TOML rule error: {}", e)))
    }
}

/// Load rules from a file, detecting the format from its extension
pub fn load_rules(path: impl AsRef<Path>) -> Result<RuleDocument> {
    let path = path.as_ref();
    RuleLoader::auto(path)?.load_file(path)
}
