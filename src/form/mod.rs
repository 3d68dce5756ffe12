pub mod script;
pub mod state;

pub use script::{EditScript, FormEvent, ReplaySummary};
pub use state::{IntervalForm, StepEdit};
