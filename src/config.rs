//! Index configuration
//!
//! Settings are read from a JSON file, either given explicitly or found as
//! `config.json` in the per-user data directory. Missing fields fall back to
//! their defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "suffixnet";
const CONFIG_FILE: &str = "config.json";

/// Reading direction of suffix labels in a transition network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Labels are read as stored in the text buffer (suffix automata)
    #[default]
    Forward,
    /// Labels are read back to front (prefix automata built from reversed texts)
    Reversed,
}

/// Configuration for building suffix trees and transition networks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Symbol closing every input text; must not occur inside a text
    #[serde(default = "default_terminator")]
    pub terminator: char,

    /// Lowercase every character before it enters the text buffer
    #[serde(default)]
    pub case_insensitive: bool,

    /// Direction used when reading suffix labels of a network
    #[serde(default)]
    pub direction: Direction,
}

fn default_terminator() -> char {
    '$'
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            terminator: default_terminator(),
            case_insensitive: false,
            direction: Direction::default(),
        }
    }
}

impl IndexConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load config from the app data directory, or return default if not found
    pub fn load_default() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse and validate a JSON config document
    pub fn from_json(content: &str) -> Result<Self> {
        let config: IndexConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings can be used together
    pub fn validate(&self) -> Result<()> {
        if self.terminator.is_whitespace() {
            return Err(Error::config(format!(
                "terminator {:?} must not be whitespace",
                self.terminator
            )));
        }

        if self.case_insensitive && self.fold(self.terminator) != self.terminator {
            return Err(Error::config(format!(
                "terminator {:?} changes under case folding",
                self.terminator
            )));
        }

        Ok(())
    }

    /// Apply case folding if configured
    #[inline]
    pub fn fold(&self, ch: char) -> char {
        if self.case_insensitive {
            // Multi-char lowercase expansions keep their first char.
            ch.to_lowercase().next().unwrap_or(ch)
        } else {
            ch
        }
    }

    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        ch == self.terminator
    }
}

/// Path of `config.json` in the per-user data directory, if one can be determined
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|base| base.join(APP_NAME).join(CONFIG_FILE))
}
