use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScanError};

/// Locations searched, in order, when `--config` is absent
pub const CONFIG_CANDIDATES: &[&str] = &["mw-scanner.yaml", "schema/mw-scanner.yaml"];

const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "be", "by", "cf", "do", "for", "go", "id", "in", "is", "it",
    "of", "on", "or", "see", "so", "the", "to", "with", "also", "from", "fr", "this", "that",
];

/// Source-format markers and annotator word lists.
///
/// Every field has a default matching the Cologne MW72 dump, so an empty
/// YAML document is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub entry_start: String,
    pub page_marker: String,
    pub key_field: String,
    pub ignored_prefixes: Vec<String>,
    pub stop_words: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            entry_start: "<L>".to_string(),
            page_marker: "[Page".to_string(),
            key_field: "<k1>".to_string(),
            ignored_prefixes: vec!["<L".to_string()],
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl ScannerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: format!("failed to open: {}", e),
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| ScanError::Config {
            path: path.to_path_buf(),
            message: format!("failed to read: {}", e),
        })?;

        Self::from_yaml(&contents).map_err(|message| ScanError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_yaml(contents: &str) -> std::result::Result<Self, String> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(contents)
            .map_err(|e| format!("failed to parse YAML: {}", e))?;
        if config.entry_start.is_empty() {
            return Err("entry_start must not be empty".to_string());
        }
        if config.key_field.is_empty() {
            return Err("key_field must not be empty".to_string());
        }
        Ok(config)
    }

    /// Explicit path if given, otherwise the first existing candidate file,
    /// otherwise the built-in defaults.
    pub fn discover(explicit: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match CONFIG_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
        {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn markers(&self) -> Result<Markers> {
        let key_pattern = Regex::new(&format!("{}([^<]+)", regex::escape(&self.key_field)))?;
        Ok(Markers {
            entry_start: self.entry_start.clone(),
            page_marker: self.page_marker.clone(),
            ignored_prefixes: self
                .ignored_prefixes
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
            key_pattern,
        })
    }

    pub fn stop_word_set(&self) -> HashSet<String> {
        self.stop_words.iter().map(|w| w.trim().to_lowercase()).collect()
    }
}

/// Compiled line markers used by the classifier and the segmenter.
#[derive(Debug, Clone)]
pub struct Markers {
    pub entry_start: String,
    pub page_marker: String,
    pub ignored_prefixes: Vec<String>,
    pub key_pattern: Regex,
}

impl Markers {
    /// Key text of an entry-start line, or an empty string when the key
    /// field is missing.
    pub fn key_text<'a>(&self, line: &'a str) -> &'a str {
        self.key_pattern
            .captures(line)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().trim())
            .unwrap_or("")
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            entry_start: "<L>".to_string(),
            page_marker: "[Page".to_string(),
            ignored_prefixes: vec!["<L".to_string()],
            key_pattern: Regex::new(r"<k1>([^<]+)").unwrap(),
        }
    }
}
