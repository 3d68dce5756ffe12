use super::reconciler::Controls;
use super::steps::{is_manually_detailed, renumber, IntervalStep, StepType};

/// Push the effort/recovery parameters into every step that was not detailed by hand.
///
/// Returns the updated list only when at least one field actually changed.
pub fn synchronize(steps: &[IntervalStep], controls: &Controls) -> Option<Vec<IntervalStep>> {
    let mut changed = 0usize;
    let mut next = steps.to_vec();

    for step in next.iter_mut() {
        if is_manually_detailed(step) {
            continue;
        }
        let touched = match step.step_type {
            StepType::Effort => {
                apply_target(step, &controls.effort_duration, controls.effort_distance)
            }
            StepType::Recovery => {
                apply_target(step, &controls.recovery_duration, controls.recovery_distance)
            }
            StepType::Warmup | StepType::Cooldown => false,
        };
        if touched {
            changed += 1;
        }
    }

    if changed == 0 {
        return None;
    }
    renumber(&mut next);
    tracing::debug!(changed, "propagated interval parameters");
    Some(next)
}

/// Empty duration / missing distance mean "leave the field as it is".
fn apply_target(step: &mut IntervalStep, duration: &str, distance: Option<f64>) -> bool {
    let mut touched = false;
    if !duration.is_empty() && step.duration != duration {
        step.duration = duration.to_string();
        touched = true;
    }
    if let Some(d) = distance {
        if step.distance != Some(d) {
            step.distance = Some(d);
            touched = true;
        }
    }
    touched
}
