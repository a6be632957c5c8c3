use std::fmt;

use crossterm::style::{Color, Stylize};

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl SemanticColor {
    fn color(self) -> Color {
        match self {
            SemanticColor::Success => theme::colors::SUCCESS,
            SemanticColor::Error => theme::colors::ERROR,
            SemanticColor::Warning => theme::colors::WARNING,
            SemanticColor::Info => theme::colors::INFO,
            SemanticColor::Dim => theme::colors::DIM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    color: SemanticColor,
    bold: bool,
}

impl ColoredText {
    fn new(text: impl Into<String>, color: SemanticColor) -> Self {
        Self {
            text: text.into(),
            color,
            bold: false,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Error)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Warning)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Info)
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::new(text, SemanticColor::Dim)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn render(&self, supports_color: bool) -> String {
        if !supports_color {
            return self.text.clone();
        }

        let mut styled = self.text.as_str().with(self.color.color());
        if self.bold {
            styled = styled.bold();
        }
        format!("{}", styled)
    }
}

impl fmt::Display for ColoredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
