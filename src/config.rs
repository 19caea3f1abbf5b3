use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level wavelift configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveliftConfig {
    /// Basis rendering settings.
    #[serde(default)]
    pub basis: BasisToml,

    /// Stable-wavelet sweep settings.
    #[serde(default)]
    pub construct: ConstructToml,
}

impl WaveliftConfig {
    /// Reads a TOML file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BasisToml {
    #[serde(default = "default_levels")]
    pub levels: u32,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    #[serde(default = "default_boundary")]
    pub boundary: String,
    #[serde(default = "default_smooth_level")]
    pub smooth_level: u32,
}

impl Default for BasisToml {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            scheme: default_scheme(),
            boundary: default_boundary(),
            smooth_level: default_smooth_level(),
        }
    }
}

fn default_levels() -> u32 {
    12
}
fn default_scheme() -> String {
    "stable-linear".to_string()
}
fn default_boundary() -> String {
    "clamped".to_string()
}
fn default_smooth_level() -> u32 {
    2
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructToml {
    #[serde(default = "default_min_alpha")]
    pub min_alpha: f64,
    #[serde(default = "default_max_alpha")]
    pub max_alpha: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for ConstructToml {
    fn default() -> Self {
        Self {
            min_alpha: default_min_alpha(),
            max_alpha: default_max_alpha(),
            step: default_step(),
            parallel: true,
        }
    }
}

fn default_min_alpha() -> f64 {
    -2.0
}
fn default_max_alpha() -> f64 {
    2.0
}
fn default_step() -> f64 {
    1e-4
}
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: WaveliftConfig = toml::from_str("").unwrap();
        assert_eq!(config.basis.levels, 12);
        assert_eq!(config.basis.scheme, "stable-linear");
        assert_eq!(config.basis.boundary, "clamped");
        assert_eq!(config.basis.smooth_level, 2);
        assert_eq!(config.construct.min_alpha, -2.0);
        assert_eq!(config.construct.max_alpha, 2.0);
        assert_eq!(config.construct.step, 1e-4);
        assert!(config.construct.parallel);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: WaveliftConfig = toml::from_str(
            r#"
            [basis]
            scheme = "cdf97"

            [construct]
            step = 0.01
            parallel = false
            "#,
        )
        .unwrap();
        assert_eq!(config.basis.scheme, "cdf97");
        assert_eq!(config.basis.levels, 12);
        assert_eq!(config.construct.step, 0.01);
        assert_eq!(config.construct.min_alpha, -2.0);
        assert!(!config.construct.parallel);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<WaveliftConfig>("[basis]\nlevel = 3\n").is_err());
        assert!(toml::from_str::<WaveliftConfig>("[render]\n").is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[basis]\nlevels = 9\nboundary = \"cyclic\"").unwrap();
        let config = WaveliftConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.basis.levels, 9);
        assert_eq!(config.basis.boundary, "cyclic");
    }

    #[test]
    fn load_without_path_gives_defaults() {
        let config = WaveliftConfig::load(None).unwrap();
        assert_eq!(config.basis.levels, 12);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = WaveliftConfig::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config file"));
    }
}
