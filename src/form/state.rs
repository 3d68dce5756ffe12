use crate::engine::steps::{EntryMode, IntervalStep};
use crate::engine::{Controls, IntervalReconciler, StepSink};
use crate::session::{SessionPayload, SessionType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A manual edit to one row of the step table. `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepEdit {
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub pace: Option<String>,
    #[serde(default)]
    pub hr: Option<u32>,
}

/// State behind the structured-workout part of the session form.
#[derive(Debug, Clone)]
pub struct IntervalForm {
    controls: Controls,
    steps: Vec<IntervalStep>,
    mode: EntryMode,
    completed: bool,
    /// Set for a reopened session; new forms derive the type from their steps.
    session_type: Option<SessionType>,
    had_interval: bool,
    reconciler: IntervalReconciler,
}

impl IntervalForm {
    /// Fresh form. The initial controls get one evaluation, so a default count
    /// above zero produces steps right away.
    pub fn new(initial: Controls, disable_auto_regeneration: bool) -> Self {
        let mut form = Self {
            controls: initial,
            steps: Vec::new(),
            mode: EntryMode::Quick,
            completed: false,
            session_type: None,
            had_interval: false,
            reconciler: IntervalReconciler::new(disable_auto_regeneration),
        };
        form.evaluate();
        form
    }

    /// Reopen a saved session. Its steps are taken as they are; a completed
    /// session never has its steps regenerated.
    pub fn from_session(session: &SessionPayload, disable_auto_regeneration: bool) -> Self {
        let controls = session.interval.clone().unwrap_or_default();
        let disabled = disable_auto_regeneration || session.completed;
        tracing::debug!(
            date = %session.date,
            steps = session.steps.len(),
            disabled,
            "loaded interval session"
        );
        Self {
            reconciler: IntervalReconciler::seeded(&controls, disabled),
            controls,
            steps: session.steps.clone(),
            mode: session.mode,
            completed: session.completed,
            session_type: Some(session.session_type),
            had_interval: session.interval.is_some(),
        }
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn steps(&self) -> &[IntervalStep] {
        &self.steps
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn auto_regeneration_disabled(&self) -> bool {
        self.reconciler.is_disabled()
    }

    pub fn set_auto_regeneration_disabled(&mut self, disabled: bool) {
        self.reconciler.set_disabled(disabled);
    }

    pub fn set_repetition_count(&mut self, count: u32) -> bool {
        self.controls.repetition_count = count;
        self.evaluate()
    }

    pub fn set_effort_duration(&mut self, duration: &str) -> bool {
        self.controls.effort_duration = duration.to_string();
        self.evaluate()
    }

    pub fn set_effort_distance(&mut self, distance: Option<f64>) -> bool {
        self.controls.effort_distance = distance;
        self.evaluate()
    }

    pub fn set_recovery_duration(&mut self, duration: &str) -> bool {
        self.controls.recovery_duration = duration.to_string();
        self.evaluate()
    }

    pub fn set_recovery_distance(&mut self, distance: Option<f64>) -> bool {
        self.controls.recovery_distance = distance;
        self.evaluate()
    }

    /// Apply a hand edit to the step with `step_number`. Returns false when no such step exists.
    pub fn edit_step(&mut self, step_number: u32, edit: StepEdit) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.step_number == step_number) else {
            tracing::warn!(step_number, "edit for unknown interval step");
            return false;
        };
        if let Some(duration) = edit.duration {
            step.duration = duration;
        }
        if let Some(distance) = edit.distance {
            step.distance = Some(distance);
        }
        if let Some(pace) = edit.pace {
            step.pace = pace;
        }
        if let Some(hr) = edit.hr {
            step.hr = Some(hr);
        }
        true
    }

    pub fn to_payload(&self, date: NaiveDate, notes: Option<String>) -> SessionPayload {
        let has_intervals = !self.steps.is_empty() || self.controls.repetition_count > 0;
        let session_type = self.session_type.unwrap_or(if has_intervals {
            SessionType::Interval
        } else {
            SessionType::Endurance
        });
        SessionPayload {
            date,
            session_type,
            completed: self.completed,
            interval: (has_intervals || self.had_interval).then(|| self.controls.clone()),
            steps: self.steps.clone(),
            mode: self.mode,
            notes,
        }
    }

    fn evaluate(&mut self) -> bool {
        // The form is its own sink, so the reconciler is moved out for the call.
        let mut reconciler = std::mem::take(&mut self.reconciler);
        let controls = self.controls.clone();
        let current = self.steps.clone();
        let emitted = reconciler.evaluate_into(&controls, &current, self);
        self.reconciler = reconciler;
        emitted
    }
}

impl StepSink for IntervalForm {
    fn replace_steps(&mut self, steps: Vec<IntervalStep>) {
        tracing::info!(
            repetitions = self.controls.repetition_count,
            steps = steps.len(),
            "interval steps replaced"
        );
        self.steps = steps;
    }

    fn set_mode(&mut self, mode: EntryMode) {
        self.mode = mode;
    }
}
