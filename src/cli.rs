use std::path::PathBuf;

use clap::Parser;

use crate::theme::{ColorName, ThemeName};

#[derive(Parser, Clone, Debug)]
#[command(author, version, about = "🍅 pomotui - A full-screen terminal Pomodoro timer")]
pub struct Args {
    /// Art theme for session screens
    #[arg(short, long, value_enum)]
    pub theme: Option<ThemeName>,

    /// Display color
    #[arg(short, long, value_enum)]
    pub color: Option<ColorName>,

    /// Work session length in minutes
    #[arg(short, long, value_name = "MINS")]
    pub work: Option<u32>,

    /// Short break length in minutes
    #[arg(short, long, value_name = "MINS")]
    pub short_break: Option<u32>,

    /// Long break length in minutes
    #[arg(short, long, value_name = "MINS")]
    pub long_break: Option<u32>,

    /// Work/break cycles per run; the last one ends with a long break
    #[arg(short = 'n', long)]
    pub cycles: Option<u32>,

    #[arg(long)]
    pub no_sound: bool,

    /// Where the session log, log file and custom themes live
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Show session statistics instead of starting the timer
    #[arg(long)]
    pub stats: bool,
}
