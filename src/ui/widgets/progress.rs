use crate::ui::theme;

/// Cells in a rendered bar
pub const DEFAULT_WIDTH: u16 = 50;

#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: u64,
    current: u64,
    width: u16,
    message: String,
}

impl ProgressBar {
    pub fn with_message(total: u64, message: impl Into<String>) -> Self {
        Self {
            total,
            current: 0,
            width: DEFAULT_WIDTH,
            message: message.into(),
        }
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    pub fn set(&mut self, value: u64) {
        self.current = value;
    }

    pub fn set_total(&mut self, total: u64) {
        self.total = total;
    }

    /// Bounded percentage; an empty job counts as done.
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            return 100;
        }
        self.current.min(self.total) * 100 / self.total
    }

    pub fn render(&self, supports_unicode: bool) -> String {
        let (filled, empty) = self.bar_segments();
        let (full, blank) = if supports_unicode {
            (theme::bar::FILLED, theme::bar::EMPTY)
        } else {
            (theme::bar::FILLED_ASCII, theme::bar::EMPTY_ASCII)
        };

        let mut out = String::new();
        if !self.message.is_empty() {
            out.push_str(&self.message);
            out.push(' ');
        }
        out.push('[');
        out.push_str(&full.repeat(filled));
        out.push_str(&blank.repeat(empty));
        out.push_str(&format!("] {:>3}%", self.percent()));
        out
    }

    fn bar_segments(&self) -> (usize, usize) {
        let width = self.width.max(1) as usize;
        let filled = (self.percent() as usize * width) / 100;
        (filled, width.saturating_sub(filled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_includes_percentage() {
        let mut bar = ProgressBar::with_message(200, "Compressing");
        bar.set(100);
        let rendered = bar.render(false);
        assert!(rendered.starts_with("Compressing ["));
        assert!(rendered.ends_with("]  50%"));
        assert_eq!(rendered.matches('#').count(), 25);
        assert_eq!(rendered.matches('.').count(), 25);
    }

    #[test]
    fn default_bar_has_fifty_cells() {
        let mut bar = ProgressBar::with_message(10, "");
        bar.set(10);
        let rendered = bar.render(true);
        assert_eq!(rendered.matches(theme::bar::FILLED).count(), 50);
        assert!(rendered.ends_with("100%"));
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut bar = ProgressBar::with_message(4, "x");
        bar.set_width(8);
        bar.set(9);
        assert_eq!(bar.percent(), 100);
        assert_eq!(bar.render(false), "x [########] 100%");
    }

    #[test]
    fn empty_job_renders_complete() {
        let bar = ProgressBar::with_message(0, "x");
        assert_eq!(bar.percent(), 100);
    }
}
