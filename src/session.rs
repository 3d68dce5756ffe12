use crate::engine::steps::{effort_count, EntryMode, IntervalStep};
use crate::engine::Controls;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Endurance,
    Interval,
    Race,
    Recovery,
}

/// Interval block of a session: the controls the steps were generated from.
pub type IntervalDetails = Controls;

/// What the dashboard stores for one logged session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub date: NaiveDate,
    pub session_type: SessionType,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub interval: Option<IntervalDetails>,
    #[serde(default)]
    pub steps: Vec<IntervalStep>,
    #[serde(default)]
    pub mode: EntryMode,
    #[serde(default)]
    pub notes: Option<String>,
}

impl SessionPayload {
    pub fn effort_count(&self) -> usize {
        effort_count(&self.steps)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse session payload")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file: {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize session payload")
    }
}
