use crossterm::style::{Color, Stylize};

use crate::ui::theme;

/// Status markers at the start of output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Skipped,
    Arrow,
    Command,
    Deploy,
    Remote,
}

impl Icon {
    /// (unicode, ascii) glyph pair
    fn glyphs(self) -> (&'static str, &'static str) {
        use theme::{icons, icons_ascii as ascii};
        match self {
            Icon::Success => (icons::SUCCESS, ascii::SUCCESS),
            Icon::Error => (icons::ERROR, ascii::ERROR),
            Icon::Warning => (icons::WARNING, ascii::WARNING),
            Icon::Progress => (icons::PROGRESS, ascii::PROGRESS),
            Icon::Skipped => (icons::SKIPPED, ascii::SKIPPED),
            Icon::Arrow => (icons::ARROW, ascii::ARROW),
            Icon::Command => (icons::COMMAND, ascii::COMMAND),
            Icon::Deploy => (icons::DEPLOY, ascii::DEPLOY),
            Icon::Remote => (icons::REMOTE, ascii::REMOTE),
        }
    }

    fn tint(self) -> Color {
        match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Skipped | Icon::Arrow | Icon::Command => theme::colors::DIM,
            Icon::Deploy | Icon::Remote => theme::colors::INFO,
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        let (unicode, ascii) = self.glyphs();
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let glyph = self.render(supports_unicode);
        if supports_color {
            glyph.with(self.tint()).to_string()
        } else {
            glyph.to_string()
        }
    }
}
