//! Document-level DOT attributes.
//!
//! The header written ahead of the node and edge statements is fixed policy, but
//! different outlines look best with different spacing, so the values can be loaded
//! from a TOML file:
//!
//! ```toml
//! layout = "sfdp"
//! sep = "+12"
//! overlap = "scale"
//! splines = "true"
//! repulsive_force = 1.5
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DotConfig {
    /// Layout engine hint (`layout`).
    pub layout: String,

    /// Minimum node separation (`sep`).
    pub sep: String,

    /// Overlap removal mode (`overlap`).
    pub overlap: String,

    /// Edge routing mode (`splines`).
    pub splines: String,

    /// Repulsive force for force-directed engines (`repulsiveforce`), omitted when `None`.
    pub repulsive_force: Option<f64>,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            layout: "sfdp".to_string(),
            sep: "+12".to_string(),
            overlap: "scale".to_string(),
            splines: "true".to_string(),
            repulsive_force: Some(1.5),
        }
    }
}

impl DotConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Header attributes in emission order.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("layout", self.layout.clone()),
            ("sep", self.sep.clone()),
            ("overlap", self.overlap.clone()),
            ("splines", self.splines.clone()),
        ];
        if let Some(force) = self.repulsive_force {
            attrs.push(("repulsiveforce", force.to_string()));
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_attributes_in_order() {
        let attrs = DotConfig::default().attributes();
        let keys: Vec<&str> = attrs.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["layout", "sep", "overlap", "splines", "repulsiveforce"]);
        assert_eq!(attrs[4].1, "1.5");
    }

    #[test]
    fn repulsive_force_can_be_dropped() {
        let config = DotConfig {
            repulsive_force: None,
            ..DotConfig::default()
        };
        assert_eq!(config.attributes().len(), 4);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DotConfig::from_toml_str("overlap = \"prism\"\nrepulsive_force = 2.0\n").unwrap();
        assert_eq!(config.overlap, "prism");
        assert_eq!(config.repulsive_force, Some(2.0));
        assert_eq!(config.layout, "sfdp");
        assert_eq!(config.sep, "+12");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(DotConfig::from_toml_str("").unwrap(), DotConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = DotConfig::from_toml_str("colour = \"red\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got: {err}");
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = DotConfig::load(Path::new("/nonexistent/bandgraph.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bandgraph.toml"), "got: {err}");
    }
}
