//! Bot configuration.
//!
//! Loaded once from a JSON file at startup and read-only thereafter:
//! severity-to-emoji formatting, line aliases, the set of recognised
//! line identifiers, and bot display settings.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Severity key that matches any severity without an explicit emoji.
pub const WILDCARD_SEVERITY: &str = "*";

/// Errors from loading or validating the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Could not read the config file
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON or is missing required fields
    #[error("failed to parse config file: {0}")]
    Json(#[from] serde_json::Error),

    /// The severities table has no `"*"` fallback entry
    #[error("severities table must contain a \"*\" wildcard entry")]
    MissingWildcard,
}

/// Bot display settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BotSettings {
    /// Display name used in the help text.
    pub name: String,
}

/// Static bot configuration.
///
/// `severities` maps a TfL status severity description to an emoji, with a
/// `"*"` entry as the fallback for anything unmapped. `aliases` maps
/// lowercase user shorthand (`wac`, `hammersmith`) to canonical TfL line
/// identifiers. `lines` is the set of line identifiers that get their own
/// direct command.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    severities: HashMap<String, String>,
    aliases: HashMap<String, String>,
    lines: Vec<String>,
    pub settings: BotSettings,
}

impl BotConfig {
    /// Load and validate configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: BotConfig = serde_json::from_str(&raw)?;

        if !config.severities.contains_key(WILDCARD_SEVERITY) {
            return Err(ConfigError::MissingWildcard);
        }

        Ok(config)
    }

    /// Emoji for a severity description, falling back to the wildcard entry.
    pub fn emoji(&self, severity: &str) -> &str {
        self.severities
            .get(severity)
            .or_else(|| self.severities.get(WILDCARD_SEVERITY))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Resolve user input to a canonical line identifier.
    ///
    /// Matching is case-insensitive; input that is not a known alias is
    /// passed through lowercased and left for the API to accept or reject.
    pub fn resolve_line(&self, input: &str) -> String {
        let lowered = input.to_lowercase();
        match self.aliases.get(&lowered) {
            Some(canonical) => canonical.clone(),
            None => lowered,
        }
    }

    /// Whether this identifier is a configured line.
    pub fn is_line(&self, id: &str) -> bool {
        self.lines.iter().any(|l| l == id)
    }

    /// Line identifiers that can be registered as direct commands.
    ///
    /// Telegram command names cannot contain hyphens, so hyphenated
    /// identifiers (`waterloo-city`) are reachable only via alias.
    pub fn command_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(String::as_str)
            .filter(|l| !l.contains('-'))
    }

    /// Aliases usable as direct commands, with their canonical line.
    pub fn command_aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(a, l)| (a.as_str(), l.as_str()))
            .filter(|(a, _)| !a.contains('-'))
    }
}
