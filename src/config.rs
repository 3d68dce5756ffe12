use crate::engine::Controls;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub reconciler: ReconcilerConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReconcilerConfig {
    /// Never regenerate steps automatically (used when correcting historical sessions).
    #[serde(default)]
    pub disable_auto_regeneration: bool,
}

/// Control values a new session form starts with.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub repetition_count: u32,
    #[serde(default)]
    pub effort_duration: String,
    pub effort_distance: Option<f64>,
    #[serde(default)]
    pub recovery_duration: String,
    pub recovery_distance: Option<f64>,
}

impl DefaultsConfig {
    /// Non-finite distances (`nan`, `inf` are valid TOML floats) are treated as unset.
    pub fn controls(&self) -> Controls {
        Controls {
            repetition_count: self.repetition_count,
            effort_duration: self.effort_duration.clone(),
            effort_distance: finite_distance("effort_distance", self.effort_distance),
            recovery_duration: self.recovery_duration.clone(),
            recovery_distance: finite_distance("recovery_distance", self.recovery_distance),
        }
    }
}

fn finite_distance(key: &str, value: Option<f64>) -> Option<f64> {
    match value {
        Some(d) if !d.is_finite() => {
            tracing::warn!(key, value = d, "ignoring non-finite default distance");
            None
        }
        other => other,
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn default_log_filter() -> String {
    "training_log=info".to_string()
}

fn default_log_file() -> String {
    "training-log.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses() {
        let config = Config::load(Path::new("config.toml")).unwrap();
        assert!(!config.reconciler.disable_auto_regeneration);
        assert_eq!(config.defaults.repetition_count, 0);
        assert_eq!(config.logging.filter, "training_log=info");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(!config.reconciler.disable_auto_regeneration);
        assert_eq!(config.defaults.controls(), Controls::default());
        assert_eq!(config.logging.log_file, "training-log.log");
    }

    #[test]
    fn test_defaults_map_to_controls() {
        let config = Config::parse(
            r#"
            [defaults]
            repetition_count = 6
            effort_duration = "00:01:00"
            recovery_distance = 0.2
            "#,
        )
        .unwrap();
        let controls = config.defaults.controls();
        assert_eq!(controls.repetition_count, 6);
        assert_eq!(controls.effort_duration, "00:01:00");
        assert_eq!(controls.recovery_distance, Some(0.2));
        assert!(controls.recovery_duration.is_empty());
    }

    #[test]
    fn test_non_finite_distances_are_dropped() {
        let config = Config::parse(
            r#"
            [defaults]
            repetition_count = 2
            effort_distance = nan
            recovery_distance = inf
            "#,
        )
        .unwrap();
        let controls = config.defaults.controls();
        assert!(controls.effort_distance.is_none());
        assert!(controls.recovery_distance.is_none());

        // With the distance dropped, repeated evaluation settles.
        let mut form = crate::form::IntervalForm::new(controls, false);
        assert_eq!(form.steps().len(), 5);
        assert!(!form.set_effort_duration(""));
        assert!(!form.set_recovery_distance(None));
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::parse("[reconciler]\ndisable_auto_regeneration = \"maybe\"").is_err());
    }
}
