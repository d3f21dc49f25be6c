//! Full-screen presentation of engine state.
//!
//! The engine builds a [`Screen`] and hands it to a [`Display`]. Displays only
//! read screens; layout is recomputed on every draw.

mod screens;
mod shell;
pub mod stats_view;

pub use shell::TerminalShell;

use crate::error::Result;
use crate::format;
use crate::timer::Snapshot;

pub trait Display {
    fn draw(&mut self, screen: &Screen) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Welcome { logo: String },
    Intro { art: String, message: String },
    Countdown(CountdownView),
    Paused(Snapshot),
    Completion,
    RestartPrompt,
    Exit,
}

/// Everything the countdown screen shows for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct CountdownView {
    pub snapshot: Snapshot,
    pub art: String,
    pub message: String,
    pub digits: String,
    pub percentage: f64,
    pub milestone: &'static str,
}

impl CountdownView {
    pub fn new(snapshot: Snapshot, art: &str, message: &str) -> Self {
        let remaining = snapshot.remaining_secs;
        let percentage = snapshot.percentage();

        Self {
            snapshot,
            art: art.to_string(),
            message: message.to_string(),
            digits: format::render_digits(remaining / 60, remaining % 60).unwrap_or_default(),
            percentage,
            milestone: format::milestone_message(percentage),
        }
    }
}
