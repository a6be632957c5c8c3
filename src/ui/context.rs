use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use dropship::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    pub animation: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>, cli_no_animation: bool) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, cli_no_animation, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        cli_no_animation: bool,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => caps.supports_color && !caps.is_ci,
        };

        let animation = !json && !cli_no_animation && caps.is_tty && !caps.is_ci;

        Self {
            json,
            verbose,
            caps,
            color,
            unicode: caps.supports_unicode,
            animation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_tty: true,
            stdin_is_tty: true,
            supports_color: true,
            supports_unicode: true,
            is_ci: true,
            width: 120,
        }
    }

    fn tty_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_ci: false,
            ..ci_caps()
        }
    }

    #[test]
    fn ci_forces_animation_off() {
        let ui = UiContext::from_caps(false, 0, None, false, ci_caps());
        assert!(!ui.animation);
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let ui = UiContext::from_caps(false, 0, Some(ColorWhen::Auto), false, ci_caps());
        assert!(!ui.color);
    }

    #[test]
    fn ci_allows_explicit_color_always_flag() {
        let ui = UiContext::from_caps(false, 0, Some(ColorWhen::Always), false, ci_caps());
        assert!(ui.color);
    }

    #[test]
    fn json_and_no_animation_disable_live_output() {
        assert!(UiContext::from_caps(false, 0, None, false, tty_caps()).animation);
        assert!(!UiContext::from_caps(true, 0, None, false, tty_caps()).animation);
        assert!(!UiContext::from_caps(false, 0, None, true, tty_caps()).animation);
    }
}
