//! Shared task primitives for lookahead pipelines.
//!
//! * [`TaskClass`] labels every spawned future for tracing.
//! * [`spawn`] attaches work to the active tokio runtime.
//! * [`GenerationClock`] and [`GenerationToken`] identify the latest request of a pipeline.
//! * [`TimerSlot`] holds at most one armed timer.

mod class;
mod spawn;
mod timer;
mod token;

pub use class::TaskClass;
pub use spawn::spawn;
pub use timer::TimerSlot;
pub use token::{GenerationClock, GenerationToken};
