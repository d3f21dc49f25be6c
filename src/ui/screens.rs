use ratatui::{prelude::*, widgets::*};

use super::{CountdownView, Screen};
use crate::format;
use crate::timer::Snapshot;

const WELCOME: &str = "Welcome to the Pomodoro Timer!";
const COMPLETION: &str = "✨ Pomodoro session complete! ✨\n\nWhat did you create in this time?";
const RESTART_PROMPT: &str = "Start another session? (y/n)";
const EXIT: &str = "👋 Timer stopped.\nSee you next time!";
const MAX_BAR_WIDTH: u16 = 60;

pub fn render(f: &mut Frame, screen: &Screen, color: Color) {
    let accent = Style::default().fg(color).add_modifier(Modifier::BOLD);

    match screen {
        Screen::Welcome { logo } => {
            let mut lines = block_lines(logo, accent);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(WELCOME, accent)));
            render_middle(f, f.size(), lines);
        }
        Screen::Intro { art, message } => {
            let mut lines = block_lines(art, accent);
            lines.push(Line::from(""));
            lines.extend(text_lines(message, accent));
            render_middle(f, f.size(), lines);
        }
        Screen::Countdown(view) => render_countdown(f, view, color),
        Screen::Paused(snapshot) => render_pause_menu(f, snapshot, color),
        Screen::Completion => render_middle(f, f.size(), text_lines(COMPLETION, accent)),
        Screen::RestartPrompt => render_middle(f, f.size(), text_lines(RESTART_PROMPT, accent)),
        Screen::Exit => render_middle(f, f.size(), text_lines(EXIT, accent)),
    }
}

fn render_countdown(f: &mut Frame, view: &CountdownView, color: Color) {
    let area = f.size();
    let accent = Style::default().fg(color).add_modifier(Modifier::BOLD);
    let bar_width = MAX_BAR_WIDTH.min(area.width.saturating_sub(20)) as usize;
    let snap = &view.snapshot;

    let mut lines = block_lines(&view.art, accent);
    lines.push(Line::from(""));
    lines.extend(text_lines(&view.message, accent));
    lines.extend([Line::from(""), Line::from("")]);
    lines.extend(block_lines(&view.digits, accent));
    lines.extend([Line::from(""), Line::from("")]);
    if !view.milestone.is_empty() {
        lines.push(Line::from(Span::styled(view.milestone, Style::default().fg(color))));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format::progress_bar(snap.elapsed_secs(), snap.total_secs, bar_width),
        accent,
    )));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    render_middle(f, chunks[0], lines);

    let controls = Line::from(vec![
        span_key("P", color),
        Span::raw(" Pause  •  "),
        span_key("Ctrl+C", color),
        Span::raw(" Quit  •  "),
        Span::raw(format!("Cycle {} of {}", snap.cycle, snap.cycles)),
    ]);
    f.render_widget(
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

fn render_pause_menu(f: &mut Frame, snap: &Snapshot, color: Color) {
    let area = centered_rect(60, 50, f.size());
    let elapsed_mins = snap.elapsed_secs() as f64 / 60.0;
    let total_mins = snap.total_secs as f64 / 60.0;

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("{} ({} of {})", snap.kind.name(), snap.cycle, snap.cycles),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Elapsed: {elapsed_mins:.1} / {total_mins:.0} minutes ({:.0}%)",
            snap.percentage()
        )),
        Line::from(""),
        Line::from(vec![
            span_key("R", color),
            Span::raw(" Resume  •  "),
            span_key("S", color),
            Span::raw(" Skip  •  "),
            span_key("A", color),
            Span::raw(" Restart  •  "),
            span_key("Q", color),
            Span::raw(" Quit"),
        ]),
    ];

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .title(" ⏸  PAUSED ")
                .title_alignment(Alignment::Center)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        ),
        area,
    );
}

pub(super) fn span_key(text: &str, color: Color) -> Span<'_> {
    Span::styled(text, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

/// Lines of a multi-line text, each centered on its own.
pub(super) fn text_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    text.lines()
        .map(|l| Line::from(Span::styled(l.trim_end().to_string(), style)))
        .collect()
}

/// Lines of ASCII art padded to a common width, so centering each line keeps
/// the art aligned as a block.
pub(super) fn block_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    let rows: Vec<&str> = text.lines().map(str::trim_end).collect();
    let widths: Vec<usize> = rows.iter().map(|r| Span::raw(*r).width()).collect();
    let max = widths.iter().copied().max().unwrap_or(0);

    rows.iter()
        .zip(widths)
        .map(|(row, w)| Line::from(Span::styled(format!("{row}{}", " ".repeat(max - w)), style)))
        .collect()
}

/// Vertically centers `lines` in `area`, clipping what does not fit.
pub(super) fn render_middle(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + (area.height - height) / 2;
    let target = Rect::new(area.x, top, area.width, height);

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), target);
}

pub(super) fn centered_rect(w: u16, h: u16, r: Rect) -> Rect {
    let v = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - h) / 2),
            Constraint::Percentage(h),
            Constraint::Percentage((100 - h) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - w) / 2),
            Constraint::Percentage(w),
            Constraint::Percentage((100 - w) / 2),
        ])
        .split(v[1])[1]
}
