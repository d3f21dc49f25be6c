use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use notify_rust::{Notification, Urgency};

use crate::session::SessionKind;

const SOUNDS: [(&str, &str); 3] = [
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/generic.wav"),
];

/// Fire-and-forget cue when a session completes. Implementations must not
/// block the caller or report failures.
pub trait Notifier {
    fn session_completed(&mut self, kind: SessionKind);
}

pub struct DesktopNotifier {
    sound_enabled: bool,
}

impl DesktopNotifier {
    pub fn new(sound_enabled: bool) -> Self {
        Self { sound_enabled }
    }
}

impl Notifier for DesktopNotifier {
    fn session_completed(&mut self, kind: SessionKind) {
        let (title, body) = message(kind);
        let sound = self.sound_enabled;

        std::thread::spawn(move || {
            if let Err(e) = Notification::new()
                .summary(title)
                .body(body)
                .appname("pomotui")
                .icon("alarm-clock")
                .urgency(Urgency::Critical)
                .show()
            {
                tracing::debug!(error = %e, "desktop notification failed");
            }

            if sound {
                play_sound();
            }
        });
    }
}

fn message(kind: SessionKind) -> (&'static str, &'static str) {
    match kind {
        SessionKind::Work => ("Work session done! 🍅", "Time for a break."),
        SessionKind::ShortBreak => ("Break over! ☕", "Back to focus."),
        SessionKind::LongBreak => ("Long break over! 🌴", "The cycle is complete."),
    }
}

fn play_sound() {
    let Some((cmd, file)) = SOUNDS.into_iter().find(|(_, file)| Path::new(file).exists()) else {
        return;
    };
    if let Err(e) = play(cmd, file) {
        tracing::debug!(cmd, error = %e, "sound playback failed");
    }
}

/// Runs the player to completion so the child is reaped.
fn play(cmd: &str, file: &str) -> io::Result<ExitStatus> {
    Command::new(cmd)
        .arg(file)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?
        .wait()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_is_waited_on() {
        let status = play("true", "/dev/null").unwrap();
        assert!(status.success());
        assert!(play("pomotui-no-such-player", "/dev/null").is_err());
    }

    #[test]
    fn every_kind_has_a_message() {
        for kind in [SessionKind::Work, SessionKind::ShortBreak, SessionKind::LongBreak] {
            let (title, body) = message(kind);
            assert!(!title.is_empty());
            assert!(!body.is_empty());
        }
    }
}
