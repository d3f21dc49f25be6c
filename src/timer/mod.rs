//! The timer engine: work/break cycle orchestration on top of the per-session
//! countdown state machine.

mod countdown;
mod engine;
pub mod input;

pub use countdown::{recordable, Control, Countdown, Phase, Recordable, Snapshot};
pub use engine::{EngineOptions, RunOutcome, TimerEngine};
