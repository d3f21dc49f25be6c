use crate::error::Result;
use crate::events::{AppEvent, EventSource};
use crate::notify::Notifier;
use crate::session::{SessionKind, SessionPlan};
use crate::stats::SessionLog;
use crate::theme::ThemeProvider;
use crate::ui::{CountdownView, Display, Screen};

use super::countdown::{recordable, Control, Countdown, Phase, Snapshot};
use super::input;

/// How many ticks the non-countdown screens stay up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub intro_ticks: u32,
    pub completion_ticks: u32,
    pub exit_ticks: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            intro_ticks: 2,
            completion_ticks: 2,
            exit_ticks: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// All cycles ran and the user declined another round.
    Finished,
    /// Quit or interrupted.
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct TimerEngine<D, E, N> {
    plan: SessionPlan,
    theme: ThemeProvider,
    log: SessionLog,
    display: D,
    events: E,
    notifier: N,
    options: EngineOptions,
}

impl<D: Display, E: EventSource, N: Notifier> TimerEngine<D, E, N> {
    pub fn new(
        plan: SessionPlan,
        theme: ThemeProvider,
        log: SessionLog,
        display: D,
        events: E,
        notifier: N,
    ) -> Self {
        Self {
            plan,
            theme,
            log,
            display,
            events,
            notifier,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Runs cycles until the user quits or declines another round.
    pub fn run(&mut self) -> Result<RunOutcome> {
        loop {
            let welcome = Screen::Welcome {
                logo: self.theme.logo(),
            };
            if self.hold(&welcome, self.options.intro_ticks)? == Flow::Quit {
                return self.exit();
            }

            if self.run_cycles()? == Flow::Quit {
                return self.exit();
            }

            tracing::info!(cycles = self.plan.cycles(), "all cycles complete");
            if self.hold(&Screen::Completion, self.options.completion_ticks)? == Flow::Quit {
                return self.exit();
            }

            if !self.ask_restart()? {
                self.hold(&Screen::Exit, self.options.exit_ticks)?;
                return Ok(RunOutcome::Finished);
            }
            tracing::info!("starting another round");
        }
    }

    fn run_cycles(&mut self) -> Result<Flow> {
        for cycle in 1..=self.plan.cycles() {
            if self.run_session(SessionKind::Work, cycle)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
            if self.run_session(self.plan.break_after(cycle), cycle)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn run_session(&mut self, kind: SessionKind, cycle: u32) -> Result<Flow> {
        let art = self.theme.art(kind);
        let message = intro_message(kind, cycle, self.plan.minutes(kind));

        let intro = Screen::Intro {
            art: art.clone(),
            message: message.clone(),
        };
        if self.hold(&intro, self.options.intro_ticks)? == Flow::Quit {
            return Ok(Flow::Quit);
        }

        tracing::info!(kind = kind.as_str(), cycle, "session started");
        let mut countdown = Countdown::new(self.plan.seconds(kind));
        self.events.restart_clock();

        while !countdown.phase().is_terminal() {
            let snapshot = Snapshot::new(kind, cycle, self.plan.cycles(), &countdown);
            let screen = match countdown.phase() {
                Phase::Paused => Screen::Paused(snapshot),
                _ => Screen::Countdown(CountdownView::new(snapshot, &art, &message)),
            };
            self.display.draw(&screen)?;

            match self.events.next_event()? {
                AppEvent::Tick => countdown.tick(),
                AppEvent::Key(key) => {
                    let before = countdown.phase();
                    if let Some(control) = input::countdown_control(&key, before) {
                        if countdown.apply(control) {
                            tracing::debug!(?control, from = ?before, to = ?countdown.phase(), "countdown transition");
                        }
                    }
                }
                AppEvent::Interrupt => {
                    tracing::info!(kind = kind.as_str(), "interrupted by signal");
                    countdown.apply(Control::Quit);
                }
                AppEvent::Resize(..) => {}
            }
        }

        self.finish(kind, &countdown)
    }

    fn finish(&mut self, kind: SessionKind, countdown: &Countdown) -> Result<Flow> {
        let end = countdown.phase();
        tracing::info!(
            kind = kind.as_str(),
            end = ?end,
            elapsed_secs = countdown.elapsed(),
            "session ended"
        );

        if let Some(entry) = recordable(kind, self.plan.minutes(kind), countdown.elapsed(), end) {
            self.log.record(entry.kind, entry.minutes)?;
        }
        if end == Phase::Completed {
            self.notifier.session_completed(kind);
        }

        Ok(if end == Phase::Quit { Flow::Quit } else { Flow::Continue })
    }

    /// Shows `screen` for `ticks` ticks. Ctrl+C or a signal cuts it short
    /// with a quit.
    fn hold(&mut self, screen: &Screen, ticks: u32) -> Result<Flow> {
        self.display.draw(screen)?;
        self.events.restart_clock();

        let mut left = ticks;
        while left > 0 {
            match self.events.next_event()? {
                AppEvent::Tick => left -= 1,
                AppEvent::Key(key) if input::is_interrupt(&key) => return Ok(Flow::Quit),
                AppEvent::Interrupt => return Ok(Flow::Quit),
                AppEvent::Key(_) => {}
                AppEvent::Resize(..) => self.display.draw(screen)?,
            }
        }
        Ok(Flow::Continue)
    }

    fn ask_restart(&mut self) -> Result<bool> {
        self.display.draw(&Screen::RestartPrompt)?;

        loop {
            match self.events.next_event()? {
                AppEvent::Key(key) => {
                    if let Some(answer) = input::restart_answer(&key) {
                        return Ok(answer);
                    }
                }
                AppEvent::Interrupt => return Ok(false),
                AppEvent::Resize(..) => self.display.draw(&Screen::RestartPrompt)?,
                AppEvent::Tick => {}
            }
        }
    }

    fn exit(&mut self) -> Result<RunOutcome> {
        tracing::info!("run quit");
        self.hold(&Screen::Exit, self.options.exit_ticks)?;
        Ok(RunOutcome::Quit)
    }
}

fn intro_message(kind: SessionKind, cycle: u32, minutes: u32) -> String {
    match kind {
        SessionKind::Work => format!("🍅 Work Session {cycle} - {minutes} minutes\nStay focused!"),
        SessionKind::ShortBreak => format!("☕ Short Break {cycle} - {minutes} minutes\nTake a short break!"),
        SessionKind::LongBreak => format!("🎉 Work done! Long Break - {minutes} minutes\nYou've earned it!"),
    }
}
