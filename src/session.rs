//! Session kinds and the immutable per-run plan.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionKind {
    /// Label used in the session log and as the theme art slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "short_break",
            Self::LongBreak => "long_break",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Work => "Work Session",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }
}

/// Durations (minutes) and cycle count for one run. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPlan {
    work_mins: u32,
    short_break_mins: u32,
    long_break_mins: u32,
    cycles: u32,
}

impl SessionPlan {
    pub fn new(
        work_mins: u32,
        short_break_mins: u32,
        long_break_mins: u32,
        cycles: u32,
    ) -> Result<Self, ConfigError> {
        if work_mins == 0 {
            return Err(ConfigError::ZeroDuration("Work duration"));
        }
        if short_break_mins == 0 {
            return Err(ConfigError::ZeroDuration("Short break duration"));
        }
        if long_break_mins == 0 {
            return Err(ConfigError::ZeroDuration("Long break duration"));
        }
        if cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }

        Ok(Self {
            work_mins,
            short_break_mins,
            long_break_mins,
            cycles,
        })
    }

    pub fn minutes(&self, kind: SessionKind) -> u32 {
        match kind {
            SessionKind::Work => self.work_mins,
            SessionKind::ShortBreak => self.short_break_mins,
            SessionKind::LongBreak => self.long_break_mins,
        }
    }

    pub fn seconds(&self, kind: SessionKind) -> u64 {
        u64::from(self.minutes(kind)) * 60
    }

    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// The break that follows the work session of `cycle` (1-based).
    pub fn break_after(&self, cycle: u32) -> SessionKind {
        if cycle < self.cycles {
            SessionKind::ShortBreak
        } else {
            SessionKind::LongBreak
        }
    }
}

impl Default for SessionPlan {
    fn default() -> Self {
        Self {
            work_mins: 25,
            short_break_mins: 5,
            long_break_mins: 15,
            cycles: 4,
        }
    }
}
