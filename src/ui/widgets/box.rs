use std::borrow::Cow;
use std::sync::LazyLock;

use crossterm::style::{Color, Stylize};
use regex::Regex;
use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::border::Frame;
use crate::ui::theme;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(?:\[[0-9;?]*[A-Za-z]|\][^\x07]*\x07)").expect("escape pattern should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxStyle {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl BoxStyle {
    fn color(self) -> Color {
        match self {
            BoxStyle::Info => theme::colors::INFO,
            BoxStyle::Success => theme::colors::SUCCESS,
            BoxStyle::Warning => theme::colors::WARNING,
            BoxStyle::Error => theme::colors::ERROR,
        }
    }
}

/// Framed block of text; the first row is the title.
#[derive(Debug, Default, Clone)]
pub struct Box {
    rows: Vec<String>,
    style: BoxStyle,
}

impl Box {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            rows: vec![title.into()],
            ..Self::default()
        }
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    /// Multi-line text becomes one row per line.
    pub fn add_line(&mut self, line: impl Into<String>) {
        self.rows.extend(line.into().lines().map(str::to_string));
    }

    pub fn add_empty(&mut self) {
        self.rows.push(String::new());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let frame = Frame::for_terminal(supports_unicode);
        let paint = |s: &str| -> String {
            if supports_color {
                s.with(self.style.color()).to_string()
            } else {
                s.to_string()
            }
        };

        let widest = self.rows.iter().map(|r| visible_width(r)).max().unwrap_or(0);
        let inner = widest + 2;

        let mut out = paint(&frame.edge(true, inner));
        out.push('\n');
        for row in &self.rows {
            let pad = " ".repeat(widest - visible_width(row) + 1);
            let side = paint(frame.vertical);
            out.push_str(&format!("{side} {row}{pad}{side}\n"));
        }
        out.push_str(&paint(&frame.edge(false, inner)));
        out.push('\n');
        out
    }
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

/// Remove terminal escape sequences, leaving the visible text.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if s.contains('\u{1b}') {
        ANSI_ESCAPE.replace_all(s, "")
    } else {
        Cow::Borrowed(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiline_content_becomes_framed_rows() {
        let mut b = Box::with_title("TITLE");
        b.add_line("Line1\nLine2");
        let rendered = b.render(false, true);

        let line2 = rendered
            .lines()
            .find(|l| l.contains("Line2"))
            .expect("expected Line2 to appear in output");
        assert!(line2.starts_with(Frame::for_terminal(true).vertical));
    }

    #[test]
    fn rows_share_one_width_even_with_color() {
        let mut b = Box::with_title("\u{1b}[32mok\u{1b}[0m");
        b.add_line("a longer line");
        let rendered = b.render(false, false);
        let widths: Vec<usize> = rendered.lines().map(|l| strip_ansi(l).width()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn ascii_frame_uses_plus_corners() {
        let rendered = Box::with_title("x").render(false, false);
        assert_eq!(rendered, "+---+\n| x |\n+---+\n");
    }

    #[test]
    fn strip_ansi_leaves_plain_text_borrowed() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
        assert_eq!(strip_ansi("\u{1b}[1;31mred\u{1b}[0m"), "red");
    }
}
