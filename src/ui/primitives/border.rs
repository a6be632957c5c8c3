use crate::ui::theme;

/// Glyphs for one box frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub top_left: &'static str,
    pub top_right: &'static str,
    pub bottom_left: &'static str,
    pub bottom_right: &'static str,
    pub horizontal: &'static str,
    pub vertical: &'static str,
}

impl Frame {
    pub fn for_terminal(supports_unicode: bool) -> Self {
        if supports_unicode {
            Self {
                top_left: theme::borders::TOP_LEFT,
                top_right: theme::borders::TOP_RIGHT,
                bottom_left: theme::borders::BOTTOM_LEFT,
                bottom_right: theme::borders::BOTTOM_RIGHT,
                horizontal: theme::borders::HORIZONTAL,
                vertical: theme::borders::VERTICAL,
            }
        } else {
            Self {
                top_left: theme::borders_ascii::TOP_LEFT,
                top_right: theme::borders_ascii::TOP_RIGHT,
                bottom_left: theme::borders_ascii::BOTTOM_LEFT,
                bottom_right: theme::borders_ascii::BOTTOM_RIGHT,
                horizontal: theme::borders_ascii::HORIZONTAL,
                vertical: theme::borders_ascii::VERTICAL,
            }
        }
    }

    /// Top or bottom edge spanning `width` cells between the corners
    pub fn edge(&self, top: bool, width: usize) -> String {
        let (left, right) = if top {
            (self.top_left, self.top_right)
        } else {
            (self.bottom_left, self.bottom_right)
        };
        format!("{}{}{}", left, self.horizontal.repeat(width), right)
    }
}
