pub mod content_sync;
pub mod reconciler;
pub mod steps;
pub mod structure;

pub use reconciler::{reconcile, Controls, IntervalReconciler, ReconcilerState, StepSink};
pub use steps::{is_manually_detailed, EntryMode, IntervalStep, StepType};
