//! Console configuration loaded from TOML.

use serde::Deserialize;

use prism_types::error::Result;

/// Tunables for a console session.
///
/// Every field has a default so a partial (or absent) config file works.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsoleConfig {
    /// Upper bound on retained history entries; absent means unbounded.
    /// A bound drops the oldest entries first.
    #[serde(default)]
    pub history_limit: Option<usize>,

    /// Open the console immediately at startup.
    #[serde(default)]
    pub open_on_start: bool,
}

impl ConsoleConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
