//! Big countdown digits, the progress bar and milestone text.
//!
//! Everything here is pure; the engine calls these once per tick and the shell
//! calls `progress_bar` again when it knows the terminal width.

pub const GLYPH_HEIGHT: usize = 6;

const FILLED: char = '█';
const EMPTY: char = '░';

const DIGITS: [[&str; GLYPH_HEIGHT]; 10] = [
    [" ██████╗ ", "██╔═══██╗", "██║   ██║", "██║   ██║", "╚██████╔╝", " ╚═════╝ "],
    [" ██╗", "███║", "╚██║", " ██║", " ██║", " ╚═╝"],
    ["██████╗ ", "╚════██╗", " █████╔╝", "██╔═══╝ ", "███████╗", "╚══════╝"],
    ["██████╗ ", "╚════██╗", " █████╔╝", " ╚═══██╗", "██████╔╝", "╚═════╝ "],
    ["██╗  ██╗", "██║  ██║", "███████║", "╚════██║", "     ██║", "     ╚═╝"],
    ["███████╗", "██╔════╝", "███████╗", "╚════██║", "███████║", "╚══════╝"],
    [" ██████╗ ", "██╔════╝ ", "███████╗ ", "██╔═══██╗", "╚██████╔╝", " ╚═════╝ "],
    ["███████╗", "╚════██║", "    ██╔╝", "   ██╔╝ ", "   ██║  ", "   ╚═╝  "],
    [" ██████╗ ", "██╔═══██╗", "╚█████╔╝ ", "██╔═══██╗", "╚██████╔╝", " ╚═════╝ "],
    [" ██████╗ ", "██╔═══██╗", "╚██████╔╝", " ╚════██║", " █████╔╝ ", " ╚════╝  "],
];

const COLON: [&str; GLYPH_HEIGHT] = ["   ", "██╗", "╚═╝", "██╗", "╚═╝", "   "];

fn glyph(c: char) -> Option<&'static [&'static str; GLYPH_HEIGHT]> {
    match c {
        ':' => Some(&COLON),
        '0'..='9' => c.to_digit(10).map(|d| &DIGITS[d as usize]),
        _ => None,
    }
}

/// Renders a string of digits and colons as a 6-row block, glyphs separated by
/// one column. Returns `None` if any other character is present.
pub fn render_text(text: &str) -> Option<String> {
    let glyphs = text.chars().map(glyph).collect::<Option<Vec<_>>>()?;

    let rows: Vec<String> = (0..GLYPH_HEIGHT)
        .map(|row| {
            glyphs
                .iter()
                .map(|g| g[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    Some(rows.join("\n"))
}

/// Large `MM:SS` digits. `None` when `seconds` is not a valid clock second.
pub fn render_digits(minutes: u64, seconds: u64) -> Option<String> {
    if seconds > 59 {
        return None;
    }
    render_text(&format!("{minutes:02}:{seconds:02}"))
}

/// Raw completion percentage in `[0, 100]`. A zero total counts as 0%.
pub fn percentage(elapsed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Rounds to the nearest multiple of 5, halves going up.
pub fn rounded_percentage(elapsed: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    // Exact in integers: round(elapsed * 20 / total) with halves going up.
    let steps = (elapsed.min(total) * 40 + total) / (2 * total);
    (steps * 5).min(100) as u32
}

pub fn progress_bar(elapsed: u64, total: u64, width: usize) -> String {
    let pct = rounded_percentage(elapsed, total);
    let filled = width * pct as usize / 100;

    let mut bar = String::with_capacity(width * 3 + 8);
    bar.push('[');
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(width - filled));
    bar.push_str(&format!("] {pct}%"));
    bar
}

pub fn milestone_message(percentage: f64) -> &'static str {
    if percentage >= 80.0 {
        "Almost done!"
    } else if percentage >= 50.0 {
        "Halfway there!"
    } else if percentage >= 25.0 {
        "Keep going!"
    } else {
        ""
    }
}
