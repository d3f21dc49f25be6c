//! Theme art and display colors.
//!
//! Art is looked up on disk first (`<assets>/<theme>/<slot>.txt`), then in the
//! built-in tables below, then falls back to a tomato. Lookups never fail.

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::session::SessionKind;

pub const FALLBACK_ART: &str = "🍅";

#[derive(Debug, Serialize, Deserialize, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Default,
    Cats,
    Dogs,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Cats => "cats",
            Self::Dogs => "dogs",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ValueEnum, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorName {
    #[default]
    Pink,
    Blue,
    Default,
}

impl ColorName {
    pub fn color(&self) -> Color {
        match self {
            Self::Pink => Color::LightMagenta,
            Self::Blue => Color::LightCyan,
            Self::Default => Color::Reset,
        }
    }
}

const LOGO: &str = r"
 ____                           _
|  _ \ ___  _ __ ___   ___   __| | ___  _ __ ___
| |_) / _ \| '_ ` _ \ / _ \ / _` |/ _ \| '__/ _ \
|  __/ (_) | | | | | | (_) | (_| | (_) | | | (_) |
|_|   \___/|_| |_| |_|\___/ \__,_|\___/|_|  \___/ ";

const DEFAULT_WORK: &str = r"
    \|/
  .-'^'-.
 /       \
|  (   )  |
 \       /
  '-...-'";

const DEFAULT_SHORT_BREAK: &str = r"
   ( (
    ) )
 ........
 |      |]
 \      /
  `----'";

const DEFAULT_LONG_BREAK: &str = r"
      \ | /
    '-.;;;.-'
   -==;;;;;==-
    .-';;;'-.
  ~~~~~~~~~~~~~
 ~~~~~~~~~~~~~~~";

const CATS_WORK: &str = r"
  /\_/\
 ( o.o )
  > ^ <  [____]";

const CATS_SHORT_BREAK: &str = r"
  /\_/\
 ( -.- )
  > ^ <   ~ c[_]";

const CATS_LONG_BREAK: &str = r"
      |\      _,,,---,,_
ZZZzz /,`.-'`'    -.  ;-;;,_
     |,4-  ) )-,_. ,\ (  `'-'
    '---''(_/--'  `-'\_)";

const DOGS_WORK: &str = r"
  / \__
 (    @\___
 /         O
/   (_____/
/_____/   U";

const DOGS_SHORT_BREAK: &str = r"
    __
 o-''|\_____/)
  \_/|_)     )
     \  __  /
     (_/ (_/";

const DOGS_LONG_BREAK: &str = r"
       _
      /(|
     (  :
    __\  \  _____
  (____)  `|
 (____)|   |
  (____).__|
   (___)__.|_____";

fn builtin_art(theme: ThemeName, kind: SessionKind) -> &'static str {
    match (theme, kind) {
        (ThemeName::Default, SessionKind::Work) => DEFAULT_WORK,
        (ThemeName::Default, SessionKind::ShortBreak) => DEFAULT_SHORT_BREAK,
        (ThemeName::Default, SessionKind::LongBreak) => DEFAULT_LONG_BREAK,
        (ThemeName::Cats, SessionKind::Work) => CATS_WORK,
        (ThemeName::Cats, SessionKind::ShortBreak) => CATS_SHORT_BREAK,
        (ThemeName::Cats, SessionKind::LongBreak) => CATS_LONG_BREAK,
        (ThemeName::Dogs, SessionKind::Work) => DOGS_WORK,
        (ThemeName::Dogs, SessionKind::ShortBreak) => DOGS_SHORT_BREAK,
        (ThemeName::Dogs, SessionKind::LongBreak) => DOGS_LONG_BREAK,
    }
}

#[derive(Debug, Clone)]
pub struct ThemeProvider {
    theme: ThemeName,
    color: ColorName,
    assets_dir: Option<PathBuf>,
}

impl ThemeProvider {
    pub fn new(theme: ThemeName, color: ColorName) -> Self {
        Self {
            theme,
            color,
            assets_dir: None,
        }
    }

    /// Prefer user-supplied art files under `dir` over the built-in art.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    pub fn color(&self) -> Color {
        self.color.color()
    }

    pub fn art(&self, kind: SessionKind) -> String {
        let from_disk = self.assets_dir.as_deref().and_then(|dir| {
            read_asset(&dir.join(self.theme.as_str()).join(format!("{}.txt", kind.as_str())))
        });

        match from_disk {
            Some(art) => art,
            None => {
                let art = builtin_art(self.theme, kind).trim_start_matches('\n');
                if art.trim().is_empty() {
                    FALLBACK_ART.into()
                } else {
                    art.into()
                }
            }
        }
    }

    pub fn logo(&self) -> String {
        self.assets_dir
            .as_deref()
            .and_then(|dir| read_asset(&dir.join("logo.txt")))
            .unwrap_or_else(|| LOGO.trim_start_matches('\n').into())
    }
}

fn read_asset(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) if !text.trim().is_empty() => Some(text.trim_end().to_string()),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "theme asset unavailable");
            None
        }
    }
}
