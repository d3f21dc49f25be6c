use std::path::{Path, PathBuf};

/// Per-user data directory: `$XDG_DATA_HOME/pomotui` on Linux.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pomotui")
}

/// Settings file: `$XDG_CONFIG_HOME/pomotui/config.json`.
pub fn config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pomotui")
        .join("config.json")
}

/// Layout of everything stored under the data directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sessions_log(&self) -> PathBuf {
        self.root.join("sessions.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.root.join("pomotui.log")
    }

    /// User art: `themes/<theme>/<slot>.txt` and `themes/logo.txt`.
    pub fn themes_dir(&self) -> PathBuf {
        self.root.join("themes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dirs_end_with_app_name() {
        assert!(default_data_dir().ends_with("pomotui"));
        assert!(config_file().ends_with("pomotui/config.json"));
    }

    #[test]
    fn layout_under_root() {
        let paths = DataPaths::new("/tmp/pomo");
        assert_eq!(paths.sessions_log(), PathBuf::from("/tmp/pomo/sessions.json"));
        assert_eq!(paths.themes_dir(), PathBuf::from("/tmp/pomo/themes"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/pomo/pomotui.log"));
    }
}
