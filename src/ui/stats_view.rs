//! `--stats`: session counts per period, switchable with number keys.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};

use super::screens::{block_lines, centered_rect, span_key};
use super::TerminalShell;
use crate::error::Result;
use crate::events::{AppEvent, EventSource};
use crate::stats::{Period, SessionLog, Totals};
use crate::timer::input::is_interrupt;

enum Action {
    Show(Period),
    Quit,
}

fn action_for(key: &KeyEvent) -> Option<Action> {
    if is_interrupt(key) {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Char('1') => Some(Action::Show(Period::Today)),
        KeyCode::Char('2') => Some(Action::Show(Period::Week)),
        KeyCode::Char('3') => Some(Action::Show(Period::Month)),
        KeyCode::Char('4') => Some(Action::Show(Period::AllTime)),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

pub fn motivation(work_minutes: f64, period: Period) -> String {
    if work_minutes == 0.0 {
        format!("No work sessions {} yet. Time to lock in!", period.title().to_lowercase())
    } else {
        format!("You focused for {work_minutes} minutes! Keep this momentum going!")
    }
}

pub fn run(shell: &mut TerminalShell, events: &mut impl EventSource, log: &SessionLog) -> Result<()> {
    let mut period = Period::default();

    loop {
        let start = period.start(Local::now());
        let totals = log.totals(start);
        let minutes = log.work_minutes(start);
        let color = shell.color();
        shell.draw_with(|f| render(f, period, &totals, minutes, color))?;

        let action = match events.next_event()? {
            AppEvent::Key(key) => action_for(&key),
            AppEvent::Interrupt => Some(Action::Quit),
            AppEvent::Tick | AppEvent::Resize(..) => None,
        };
        match action {
            Some(Action::Show(p)) => period = p,
            Some(Action::Quit) => return Ok(()),
            None => {}
        }
    }
}

fn render(f: &mut Frame, period: Period, totals: &Totals, minutes: f64, color: Color) {
    let area = centered_rect(70, 70, f.size());
    let accent = Style::default().fg(color).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format!("📊 POMODORO STATISTICS - {}", period.title()), accent)),
        Line::from(motivation(minutes, period)),
        Line::from(""),
        Line::from(""),
    ];
    lines.extend(block_lines(
        &format!(
            "Work Sessions: {}\nShort Breaks:  {}\nLong Breaks:   {}\nTotal:         {}",
            totals.work, totals.short_break, totals.long_break, totals.total
        ),
        accent,
    ));
    lines.extend([Line::from(""), Line::from("")]);

    let hint = Style::default().fg(Color::DarkGray);
    let mut keys = Vec::new();
    for (i, p) in Period::ALL.iter().enumerate() {
        keys.push(Span::styled((i + 1).to_string(), accent));
        keys.push(Span::styled(format!(" {}  ", p.title()), hint));
    }
    keys.push(span_key("Q", color));
    keys.push(Span::styled(" Quit", hint));
    lines.push(Line::from(keys));

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(" Statistics ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn motivation_messages() {
        assert_eq!(
            motivation(0.0, Period::Week),
            "No work sessions this week yet. Time to lock in!"
        );
        assert_eq!(
            motivation(51.5, Period::Today),
            "You focused for 51.5 minutes! Keep this momentum going!"
        );
        assert_eq!(
            motivation(50.0, Period::Today),
            "You focused for 50 minutes! Keep this momentum going!"
        );
    }

    #[test]
    fn number_keys_pick_periods() {
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert!(matches!(action_for(&key('3')), Some(Action::Show(Period::Month))));
        assert!(matches!(action_for(&key('4')), Some(Action::Show(Period::AllTime))));
        assert!(matches!(action_for(&key('Q')), Some(Action::Quit)));
        assert!(action_for(&key('9')).is_none());
    }
}
