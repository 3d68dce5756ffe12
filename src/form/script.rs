use super::state::{IntervalForm, StepEdit};
use crate::engine::steps::EntryMode;
use crate::engine::StepSink;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One user interaction with the interval form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    SetRepetitionCount { value: u32 },
    SetEffortDuration { value: String },
    SetEffortDistance { value: Option<f64> },
    SetRecoveryDuration { value: String },
    SetRecoveryDistance { value: Option<f64> },
    EditStep { step_number: u32, edit: StepEdit },
    SetMode { mode: EntryMode },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditScript {
    pub events: Vec<FormEvent>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub replacements: usize,
    pub rejected_edits: usize,
}

impl EditScript {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse edit script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read edit script: {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn replay(&self, form: &mut IntervalForm) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for event in &self.events {
            summary.events += 1;
            match apply(form, event) {
                Applied::Replaced => summary.replacements += 1,
                Applied::Rejected => summary.rejected_edits += 1,
                Applied::NoChange => {}
            }
        }
        tracing::info!(
            events = summary.events,
            replacements = summary.replacements,
            rejected = summary.rejected_edits,
            "edit script replayed"
        );
        summary
    }
}

enum Applied {
    Replaced,
    NoChange,
    Rejected,
}

fn replaced(emitted: bool) -> Applied {
    if emitted {
        Applied::Replaced
    } else {
        Applied::NoChange
    }
}

fn apply(form: &mut IntervalForm, event: &FormEvent) -> Applied {
    tracing::debug!(?event, "applying form event");
    match event {
        FormEvent::SetRepetitionCount { value } => replaced(form.set_repetition_count(*value)),
        FormEvent::SetEffortDuration { value } => replaced(form.set_effort_duration(value)),
        FormEvent::SetEffortDistance { value } => replaced(form.set_effort_distance(*value)),
        FormEvent::SetRecoveryDuration { value } => replaced(form.set_recovery_duration(value)),
        FormEvent::SetRecoveryDistance { value } => replaced(form.set_recovery_distance(*value)),
        FormEvent::EditStep { step_number, edit } => {
            if form.edit_step(*step_number, edit.clone()) {
                Applied::NoChange
            } else {
                Applied::Rejected
            }
        }
        FormEvent::SetMode { mode } => {
            form.set_mode(*mode);
            Applied::NoChange
        }
    }
}
