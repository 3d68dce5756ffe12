use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    Warmup,
    Effort,
    Recovery,
    Cooldown,
}

/// Which editor the interval form shows: just the controls, or the per-step table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryMode {
    #[default]
    Quick,
    Detailed,
}

/// One row of a structured workout.
///
/// `step_number` is positional only and gets rewritten after every structural change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalStep {
    pub step_number: u32,
    pub step_type: StepType,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub pace: String,
    #[serde(default)]
    pub hr: Option<u32>,
}

impl IntervalStep {
    /// A step with no timing data (warmup and cooldown are created this way).
    pub fn blank(step_type: StepType) -> Self {
        Self {
            step_number: 0,
            step_type,
            duration: String::new(),
            distance: None,
            pace: String::new(),
            hr: None,
        }
    }

    pub fn with_target(step_type: StepType, duration: &str, distance: Option<f64>) -> Self {
        Self {
            duration: duration.to_string(),
            distance,
            ..Self::blank(step_type)
        }
    }

    pub fn is(&self, step_type: StepType) -> bool {
        self.step_type == step_type
    }
}

/// Pace or heart rate filled in by hand (or by an import). Such steps are never
/// overwritten by parameter propagation.
pub fn is_manually_detailed(step: &IntervalStep) -> bool {
    !step.pace.is_empty() || step.hr.is_some()
}

pub fn count_of(steps: &[IntervalStep], step_type: StepType) -> usize {
    steps.iter().filter(|s| s.is(step_type)).count()
}

pub fn effort_count(steps: &[IntervalStep]) -> usize {
    count_of(steps, StepType::Effort)
}

pub fn last_effort_index(steps: &[IntervalStep]) -> Option<usize> {
    steps.iter().rposition(|s| s.is(StepType::Effort))
}

/// Reassign step numbers as `1..=len` in list order.
pub fn renumber(steps: &mut [IntervalStep]) {
    for (i, step) in steps.iter_mut().enumerate() {
        step.step_number = i as u32 + 1;
    }
}

/// True when the final effort is immediately followed by a recovery.
pub fn has_dangling_recovery(steps: &[IntervalStep]) -> bool {
    last_effort_index(steps)
        .and_then(|i| steps.get(i + 1))
        .is_some_and(|next| next.is(StepType::Recovery))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(step_type: StepType) -> IntervalStep {
        IntervalStep::blank(step_type)
    }

    #[test]
    fn test_blank_step_is_not_detailed() {
        assert!(!is_manually_detailed(&step(StepType::Effort)));
    }

    #[test]
    fn test_pace_or_hr_marks_detailed() {
        let mut paced = step(StepType::Effort);
        paced.pace = "3:45".to_string();
        assert!(is_manually_detailed(&paced));

        let mut with_hr = step(StepType::Recovery);
        with_hr.hr = Some(152);
        assert!(is_manually_detailed(&with_hr));
    }

    #[test]
    fn test_duration_alone_is_not_detailed() {
        let s = IntervalStep::with_target(StepType::Effort, "00:03:00", Some(1.0));
        assert!(!is_manually_detailed(&s));
    }

    #[test]
    fn test_renumber_is_contiguous() {
        let mut steps = vec![
            step(StepType::Warmup),
            step(StepType::Effort),
            step(StepType::Cooldown),
        ];
        steps[0].step_number = 7;
        steps[2].step_number = 2;
        renumber(&mut steps);
        let numbers: Vec<u32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_dangling_recovery_detection() {
        let steps = vec![
            step(StepType::Effort),
            step(StepType::Recovery),
            step(StepType::Cooldown),
        ];
        assert!(has_dangling_recovery(&steps));

        let steps = vec![
            step(StepType::Effort),
            step(StepType::Recovery),
            step(StepType::Effort),
            step(StepType::Cooldown),
        ];
        assert!(!has_dangling_recovery(&steps));
        assert!(!has_dangling_recovery(&[]));
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut s = IntervalStep::with_target(StepType::Effort, "00:03:00", None);
        s.step_number = 2;
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["stepNumber"], 2);
        assert_eq!(json["stepType"], "effort");
        assert_eq!(json["duration"], "00:03:00");
        assert!(json["hr"].is_null());
    }

    #[test]
    fn test_deserializes_with_missing_optional_fields() {
        let s: IntervalStep =
            serde_json::from_str(r#"{"stepNumber":1,"stepType":"warmup"}"#).unwrap();
        assert_eq!(s.step_type, StepType::Warmup);
        assert!(s.duration.is_empty());
        assert!(s.distance.is_none());
    }
}
