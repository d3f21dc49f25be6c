//! Settings layering: `config.json` defaults, then command-line overrides,
//! then validation into a [`SessionPlan`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::ConfigError;
use crate::session::SessionPlan;
use crate::theme::{ColorName, ThemeName};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub work_mins: u32,
    pub short_break_mins: u32,
    pub long_break_mins: u32,
    pub cycles: u32,
    pub theme: ThemeName,
    pub color: ColorName,
    pub sound_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_mins: 25,
            short_break_mins: 5,
            long_break_mins: 15,
            cycles: 4,
            theme: ThemeName::Default,
            color: ColorName::Pink,
            sound_enabled: true,
        }
    }
}

impl Settings {
    /// Reads `path`, falling back to defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            return Self::default();
        };

        serde_json::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid settings file");
            Self::default()
        })
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(t) = args.theme { self.theme = t; }
        if let Some(c) = args.color { self.color = c; }
        if let Some(w) = args.work { self.work_mins = w; }
        if let Some(s) = args.short_break { self.short_break_mins = s; }
        if let Some(l) = args.long_break { self.long_break_mins = l; }
        if let Some(n) = args.cycles { self.cycles = n; }
        if args.no_sound { self.sound_enabled = false; }
    }

    pub fn plan(&self) -> Result<SessionPlan, ConfigError> {
        SessionPlan::new(self.work_mins, self.short_break_mins, self.long_break_mins, self.cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.plan().unwrap(), SessionPlan::default());
        assert_eq!(settings.theme, ThemeName::Default);
        assert_eq!(settings.color, ColorName::Pink);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"work_mins": 50, "theme": "dogs", "unknown": 1}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.work_mins, 50);
        assert_eq!(settings.theme, ThemeName::Dogs);
        assert_eq!(settings.short_break_mins, 5);
    }

    #[test]
    fn missing_or_invalid_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(&dir.path().join("none.json")), Settings::default());

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "work_mins = 50").unwrap();
        assert_eq!(Settings::load(&bad), Settings::default());
    }

    #[test]
    fn args_override_file() {
        let mut settings = Settings {
            work_mins: 50,
            ..Settings::default()
        };
        let args = Args::try_parse_from(["pomotui", "-w", "30", "--cycles", "2", "--no-sound"]).unwrap();
        settings.apply_args(&args);

        assert_eq!(settings.work_mins, 30);
        assert_eq!(settings.cycles, 2);
        assert!(!settings.sound_enabled);
        assert_eq!(settings.long_break_mins, 15);
    }

    #[test]
    fn zero_values_are_rejected() {
        let mut settings = Settings::default();
        let args = Args::try_parse_from(["pomotui", "--cycles", "0"]).unwrap();
        settings.apply_args(&args);
        assert_eq!(settings.plan(), Err(ConfigError::ZeroCycles));
    }
}
