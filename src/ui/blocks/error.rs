use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::r#box::{Box, BoxStyle};

/// Boxed error with the offending command or path and a fix hint
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    message: String,
    target: Option<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            target: None,
            fix: None,
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut b = Box::with_title(ColoredText::error("ERROR").bold().render(supports_color))
            .style(BoxStyle::Error);

        if let Some(target) = &self.target {
            b.add_line(ColoredText::dim(target.as_str()).render(supports_color));
        }
        b.add_empty();
        b.add_line(self.message.clone());

        if let Some(fix) = &self.fix {
            b.add_empty();
            b.add_line(format!("FIX: {}", fix));
        }

        b.render(supports_color, supports_unicode)
    }
}
