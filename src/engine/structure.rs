use super::reconciler::Controls;
use super::steps::{
    effort_count, last_effort_index, renumber, IntervalStep, StepType,
};

/// Result of reacting to a repetition count change.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuralOutcome {
    /// Count is zero: the list is left alone whatever it contains.
    Skipped,
    /// Effort count already matches the target.
    Unchanged,
    Replaced(Vec<IntervalStep>),
}

/// Bring the list in line with `controls.repetition_count`.
pub fn reconcile_structure(steps: &[IntervalStep], controls: &Controls) -> StructuralOutcome {
    let target = controls.repetition_count as usize;
    if target == 0 {
        return StructuralOutcome::Skipped;
    }

    if steps.is_empty() {
        let generated = generate(target, controls);
        tracing::debug!(repetitions = target, steps = generated.len(), "generated interval steps");
        return StructuralOutcome::Replaced(generated);
    }

    let current = effort_count(steps);
    if target == current {
        return StructuralOutcome::Unchanged;
    }

    let mut next = steps.to_vec();
    if target > current {
        grow(&mut next, target, controls);
    } else {
        shrink(&mut next, target);
    }
    renumber(&mut next);
    tracing::debug!(from = current, to = target, steps = next.len(), "reconciled effort count");
    StructuralOutcome::Replaced(next)
}

/// warmup, `count` efforts with a recovery between each pair, cooldown.
pub fn generate(count: usize, controls: &Controls) -> Vec<IntervalStep> {
    let mut steps = Vec::with_capacity(2 * count + 1);
    steps.push(IntervalStep::blank(StepType::Warmup));
    for i in 0..count {
        steps.push(controls.effort_step());
        if i + 1 < count {
            steps.push(controls.recovery_step());
        }
    }
    steps.push(IntervalStep::blank(StepType::Cooldown));
    renumber(&mut steps);
    steps
}

/// New efforts go right before the first cooldown that follows the last effort,
/// or at the end when there is none.
fn insertion_point(steps: &[IntervalStep]) -> usize {
    let from = last_effort_index(steps).map_or(0, |i| i + 1);
    steps[from..]
        .iter()
        .position(|s| s.is(StepType::Cooldown))
        .map_or(steps.len(), |offset| from + offset)
}

pub fn grow(steps: &mut Vec<IntervalStep>, target: usize, controls: &Controls) {
    let current = effort_count(steps);
    if target <= current {
        return;
    }

    // The existing last effort needs a recovery after it before anything is appended.
    if let Some(last) = last_effort_index(steps) {
        let followed_by_recovery = steps
            .get(last + 1)
            .is_some_and(|s| s.is(StepType::Recovery));
        if !followed_by_recovery {
            steps.insert(last + 1, controls.recovery_step());
        }
    }

    let to_add = target - current;
    for i in 0..to_add {
        let at = insertion_point(steps);
        steps.insert(at, controls.effort_step());
        if i + 1 < to_add {
            steps.insert(at + 1, controls.recovery_step());
        }
    }
}

pub fn shrink(steps: &mut Vec<IntervalStep>, target: usize) {
    while effort_count(steps) > target {
        let Some(last) = last_effort_index(steps) else {
            break;
        };
        steps.remove(last);
        if last > 0 && steps[last - 1].is(StepType::Recovery) {
            steps.remove(last - 1);
        }
    }

    if let Some(last) = last_effort_index(steps) {
        if steps
            .get(last + 1)
            .is_some_and(|s| s.is(StepType::Recovery))
        {
            steps.remove(last + 1);
        }
    }
}
