//! Shared rendering utilities.
//!
//! Components draw into a [`Frame`], an in-memory ANSI buffer that the renderer
//! flushes to stdout once per render. Drawing into a buffer keeps components
//! testable and avoids interleaving partial frames with the host's output.
//!
//! All widths here are counted in characters, not bytes.

use std::fmt::Write;

use crate::ui::theme::Theme;

/// In-memory ANSI output for one render pass.
#[derive(Debug, Default)]
pub struct Frame {
    buf: String,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed `row`/`col`.
    pub fn move_to(&mut self, row: usize, col: usize) {
        let _ = write!(self.buf, "\u{1b}[{row};{col}H");
    }

    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn fg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::fg(hex));
    }

    pub fn bg(&mut self, hex: &str) {
        self.buf.push_str(&Theme::bg(hex));
    }

    pub fn reset(&mut self) {
        self.buf.push_str(Theme::reset());
    }

    /// Pushes `count` spaces.
    pub fn pad(&mut self, count: usize) {
        self.buf.extend(std::iter::repeat(' ').take(count));
    }

    /// Pushes `text` centered in a line of `cols` characters.
    pub fn centered(&mut self, text: &str, cols: usize) {
        let text = truncate(text, cols);
        let len = char_len(&text);
        let left = cols.saturating_sub(len) / 2;
        self.pad(left);
        self.push(&text);
        self.pad(cols.saturating_sub(left + len));
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Display length in characters, not bytes.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

/// Writes `text` with the character `ranges` painted in the match colors.
///
/// Selected rows skip match highlighting so the selection background stays
/// uniform. After each highlight the row's base colors are restored.
pub fn render_highlighted_text(
    frame: &mut Frame,
    text: &str,
    ranges: &[(usize, usize)],
    theme: &Theme,
    is_selected: bool,
) {
    if ranges.is_empty() || is_selected {
        frame.push(text);
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }

        let plain: String = chars[current_pos..start].iter().collect();
        frame.push(&plain);

        frame.fg(&theme.colors.match_highlight_fg);
        frame.bg(&theme.colors.match_highlight_bg);
        let highlighted: String = chars[start..end].iter().collect();
        frame.push(&highlighted);
        frame.reset();
        frame.fg(&theme.colors.text_normal);

        current_pos = end;
    }

    let remaining: String = chars[current_pos..].iter().collect();
    frame.push(&remaining);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Émile Zola", 20), "Émile Zola");
        assert_eq!(truncate("Alexandria Ocasio-Cortez", 10), "Alexand...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn highlighted_text_keeps_every_character() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "Anna Lee", &[(0, 2), (6, 99)], &theme, false);

        let out = frame.into_string();
        let stripped: String = strip_ansi(&out);
        assert_eq!(stripped, "Anna Lee");
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn selected_rows_are_not_highlighted() {
        let theme = Theme::default();
        let mut frame = Frame::new();
        render_highlighted_text(&mut frame, "Anna", &[(0, 2)], &theme, true);
        assert_eq!(frame.as_str(), "Anna");
    }

    #[test]
    fn centered_pads_both_sides() {
        let mut frame = Frame::new();
        frame.centered("ab", 6);
        assert_eq!(frame.as_str(), "  ab  ");
    }

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in text.chars() {
            match (in_escape, c) {
                (false, '\u{1b}') => in_escape = true,
                (true, 'm' | 'H') => in_escape = false,
                (true, _) => {}
                (false, c) => out.push(c),
            }
        }
        out
    }
}
