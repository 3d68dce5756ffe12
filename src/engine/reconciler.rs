use super::content_sync::synchronize;
use super::steps::{EntryMode, IntervalStep, StepType};
use super::structure::{reconcile_structure, StructuralOutcome};
use serde::{Deserialize, Serialize};

/// The five values the interval form exposes above the step table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    #[serde(default)]
    pub repetition_count: u32,
    #[serde(default)]
    pub effort_duration: String,
    #[serde(default)]
    pub effort_distance: Option<f64>,
    #[serde(default)]
    pub recovery_duration: String,
    #[serde(default)]
    pub recovery_distance: Option<f64>,
}

impl Controls {
    pub fn effort_step(&self) -> IntervalStep {
        IntervalStep::with_target(StepType::Effort, &self.effort_duration, self.effort_distance)
    }

    pub fn recovery_step(&self) -> IntervalStep {
        IntervalStep::with_target(
            StepType::Recovery,
            &self.recovery_duration,
            self.recovery_distance,
        )
    }

    /// True when any of the four effort/recovery fields differs (the count is ignored).
    pub fn parameters_differ(&self, other: &Controls) -> bool {
        self.effort_duration != other.effort_duration
            || self.effort_distance != other.effort_distance
            || self.recovery_duration != other.recovery_duration
            || self.recovery_distance != other.recovery_distance
    }
}

/// Values seen on the previous evaluation. Owned by whoever drives the reconciler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilerState {
    last_seen: Controls,
}

impl ReconcilerState {
    /// Start from controls that already match the step list (e.g. a loaded session),
    /// so the first evaluation does not regenerate anything.
    pub fn seeded(controls: &Controls) -> Self {
        Self {
            last_seen: controls.clone(),
        }
    }

    pub fn previous_repetition_count(&self) -> u32 {
        self.last_seen.repetition_count
    }

    pub fn last_seen(&self) -> &Controls {
        &self.last_seen
    }
}

/// Evaluate one change of the watched controls against the current step list.
///
/// A changed repetition count drives structural reconciliation; changed
/// effort/recovery parameters drive content synchronization when the structural
/// pass did not already emit. `Some` is the full replacement list.
pub fn reconcile(
    state: &mut ReconcilerState,
    controls: &Controls,
    steps: &[IntervalStep],
    disabled: bool,
) -> Option<Vec<IntervalStep>> {
    let previous = std::mem::replace(&mut state.last_seen, controls.clone());
    if disabled {
        return None;
    }

    if previous.repetition_count != controls.repetition_count {
        match reconcile_structure(steps, controls) {
            StructuralOutcome::Skipped => return None,
            StructuralOutcome::Replaced(next) => return Some(next),
            StructuralOutcome::Unchanged => {}
        }
    }

    if controls.parameters_differ(&previous) {
        return synchronize(steps, controls);
    }
    None
}

/// Receiver of reconciler output: the form's step list and its entry mode.
pub trait StepSink {
    fn replace_steps(&mut self, steps: Vec<IntervalStep>);
    fn set_mode(&mut self, mode: EntryMode);
}

#[derive(Debug, Clone, Default)]
pub struct IntervalReconciler {
    state: ReconcilerState,
    disabled: bool,
}

impl IntervalReconciler {
    pub fn new(disabled: bool) -> Self {
        Self {
            state: ReconcilerState::default(),
            disabled,
        }
    }

    pub fn seeded(controls: &Controls, disabled: bool) -> Self {
        Self {
            state: ReconcilerState::seeded(controls),
            disabled,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn evaluate(
        &mut self,
        controls: &Controls,
        steps: &[IntervalStep],
    ) -> Option<Vec<IntervalStep>> {
        reconcile(&mut self.state, controls, steps, self.disabled)
    }

    /// Evaluate and hand any replacement to `sink`, switching it to detailed mode.
    /// Returns whether a replacement was emitted.
    pub fn evaluate_into<S: StepSink + ?Sized>(
        &mut self,
        controls: &Controls,
        steps: &[IntervalStep],
        sink: &mut S,
    ) -> bool {
        match self.evaluate(controls, steps) {
            Some(next) => {
                sink.replace_steps(next);
                sink.set_mode(EntryMode::Detailed);
                true
            }
            None => false,
        }
    }
}
