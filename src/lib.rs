//! pomotui: a full-screen terminal Pomodoro timer.
//!
//! The binary wires these pieces together; everything here is usable
//! without a real terminal, which is how the tests drive the engine.

pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod notify;
pub mod paths;
pub mod session;
pub mod stats;
pub mod theme;
pub mod timer;
pub mod ui;

pub use error::{Error, Result};
