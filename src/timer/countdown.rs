//! Per-session countdown state machine.
//!
//! ```text
//! Running --tick to 0--> Completed
//! Running --pause-->     Paused --resume-->  Running
//!                               --restart--> Running (remaining = total)
//!                               --skip-->    Skipped
//! Running / Paused --quit--> Quit
//! ```
//!
//! Quit from Running is the interrupt path (Ctrl+C); it is handled exactly
//! like a quit from the pause menu.

use crate::format;
use crate::session::SessionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Skipped,
    Quit,
    Completed,
}

impl Phase {
    /// Ends the countdown loop for the current session.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Skipped | Self::Quit | Self::Completed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Resume,
    Restart,
    Skip,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total: u64,
    remaining: u64,
    phase: Phase,
}

impl Countdown {
    pub fn new(total_secs: u64) -> Self {
        Self {
            total: total_secs,
            remaining: total_secs,
            phase: if total_secs == 0 { Phase::Completed } else { Phase::Running },
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn elapsed(&self) -> u64 {
        self.total - self.remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advances one second. Does nothing unless running.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.phase = Phase::Completed;
        }
    }

    /// Applies a control event. Returns false when the event has no meaning
    /// in the current phase, leaving the state untouched.
    pub fn apply(&mut self, control: Control) -> bool {
        let next = match (self.phase, control) {
            (Phase::Running, Control::Pause) => Phase::Paused,
            (Phase::Running, Control::Quit) => Phase::Quit,
            (Phase::Paused, Control::Resume) => Phase::Running,
            (Phase::Paused, Control::Restart) => {
                self.remaining = self.total;
                Phase::Running
            }
            (Phase::Paused, Control::Skip) => Phase::Skipped,
            (Phase::Paused, Control::Quit) => Phase::Quit,
            _ => return false,
        };
        self.phase = next;
        true
    }
}

/// Read-only view of the live countdown handed to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub kind: SessionKind,
    pub cycle: u32,
    pub cycles: u32,
    pub total_secs: u64,
    pub remaining_secs: u64,
    pub phase: Phase,
}

impl Snapshot {
    pub fn new(kind: SessionKind, cycle: u32, cycles: u32, countdown: &Countdown) -> Self {
        Self {
            kind,
            cycle,
            cycles,
            total_secs: countdown.total(),
            remaining_secs: countdown.remaining(),
            phase: countdown.phase(),
        }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs - self.remaining_secs
    }

    pub fn percentage(&self) -> f64 {
        format::percentage(self.elapsed_secs(), self.total_secs)
    }
}

/// What a finished session contributes to the session log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recordable {
    pub kind: SessionKind,
    pub minutes: f64,
}

/// Completed sessions log their planned length. Skipped or quit sessions log
/// the elapsed fraction once a full minute has passed, and nothing before
/// that. Sessions that have not ended log nothing.
pub fn recordable(kind: SessionKind, planned_minutes: u32, elapsed_secs: u64, end: Phase) -> Option<Recordable> {
    let minutes = match end {
        Phase::Completed => f64::from(planned_minutes),
        Phase::Skipped | Phase::Quit if elapsed_secs >= 60 => elapsed_secs as f64 / 60.0,
        _ => return None,
    };
    Some(Recordable { kind, minutes })
}
