//! Console rendering of deploy events

use std::io::{self, Write};
use std::sync::Mutex;

use dropship::domain::ports::{DeployEvent, DeployEventSink, Stage};

use crate::ui::context::UiContext;
use crate::ui::live_region::LiveRegion;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::transfer::format_bytes_compact;
use crate::ui::widgets::progress::ProgressBar;

struct ConsoleState<W> {
    out: W,
    region: LiveRegion,
    bar: Option<ProgressBar>,
}

/// Human-readable stage log with a live compression bar
pub struct ConsoleEventSink<W: Write + Send> {
    ui: UiContext,
    state: Mutex<ConsoleState<W>>,
}

impl ConsoleEventSink<io::Stdout> {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }
}

impl<W: Write + Send> ConsoleEventSink<W> {
    pub fn with_writer(ui: UiContext, out: W) -> Self {
        Self {
            ui,
            state: Mutex::new(ConsoleState {
                out,
                region: LiveRegion::new(),
                bar: None,
            }),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.state
            .into_inner()
            .unwrap_or_else(|e| e.into_inner())
            .out
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.ui.color, self.ui.unicode)
    }

    fn render(&self, event: &DeployEvent) -> Option<String> {
        let line = match event {
            // The confirmer draws its own summary and prompt.
            DeployEvent::StageStarted {
                stage: Stage::Confirm,
            } => return None,
            DeployEvent::StageStarted { stage } => {
                format!("{} {}", self.icon(Icon::Progress), stage.title())
            }
            DeployEvent::StageSkipped { stage, reason } => format!(
                "{} {} {}",
                self.icon(Icon::Skipped),
                stage.title(),
                ColoredText::dim(format!("(skipped: {})", reason)).render(self.ui.color)
            ),
            DeployEvent::StageCompleted { stage } if self.ui.verbose > 0 => format!(
                "{} {}",
                self.icon(Icon::Success),
                ColoredText::dim(format!("{} done", stage.id())).render(self.ui.color)
            ),
            DeployEvent::StageCompleted { .. } => return None,
            DeployEvent::StageFailed { stage, .. } => format!(
                "{} {}",
                self.icon(Icon::Error),
                ColoredText::error(format!("{} failed", stage.title())).render(self.ui.color)
            ),
            DeployEvent::CommandStarted { command, remote } => {
                let icon = if *remote { Icon::Remote } else { Icon::Command };
                format!(
                    "  {} {}",
                    self.icon(icon),
                    ColoredText::dim(command.as_str()).render(self.ui.color)
                )
            }
            DeployEvent::ArchiveProgress { .. } => return None,
            DeployEvent::ArchiveCreated { path, bytes } => format!(
                "  {} {} ({})",
                self.icon(Icon::Arrow),
                path.display(),
                format_bytes_compact(*bytes)
            ),
            DeployEvent::BackupCreated { name } => {
                format!("  {} backup {}", self.icon(Icon::Arrow), name)
            }
            DeployEvent::BackupsRotated { pruned, .. } if pruned.is_empty() => return None,
            DeployEvent::BackupsRotated { kept, pruned } => format!(
                "  {} removed {} old backup(s), {} kept",
                self.icon(Icon::Arrow),
                pruned.len(),
                kept
            ),
            DeployEvent::Warning { message } => format!(
                "{} {}",
                self.icon(Icon::Warning),
                ColoredText::warning(message.as_str()).render(self.ui.color)
            ),
            DeployEvent::Cancelled | DeployEvent::Completed { .. } => return None,
        };
        Some(line)
    }

    fn progress(state: &mut ConsoleState<W>, unicode: bool, processed: u64, total: u64) {
        let bar = state
            .bar
            .get_or_insert_with(|| ProgressBar::with_message(total, "  Compressing"));
        bar.set_total(total);
        bar.set(processed);
        let content = bar.render(unicode);
        let _ = state.region.update(&mut state.out, &content);
    }
}

impl<W: Write + Send> DeployEventSink for ConsoleEventSink<W> {
    fn on_event(&self, event: DeployEvent) {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let state = &mut *guard;

        if let DeployEvent::ArchiveProgress { processed, total } = event {
            Self::progress(state, self.ui.unicode, processed, total);
            return;
        }

        if !state.region.is_empty() {
            let _ = state.region.clear(&mut state.out);
        }
        state.bar = None;

        if let Some(line) = self.render(&event) {
            let _ = writeln!(state.out, "{}", line);
            let _ = state.out.flush();
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.ui.animation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::terminal::TerminalCapabilities;

    fn ui(animation: bool, verbose: u8) -> UiContext {
        UiContext {
            json: false,
            verbose,
            caps: TerminalCapabilities {
                is_tty: animation,
                stdin_is_tty: false,
                supports_color: false,
                supports_unicode: false,
                is_ci: false,
                width: 80,
            },
            color: false,
            unicode: false,
            animation,
        }
    }

    fn render(sink: ConsoleEventSink<Vec<u8>>, events: Vec<DeployEvent>) -> String {
        for event in events {
            sink.on_event(event);
        }
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn echoes_commands_before_they_run() {
        let out = render(
            ConsoleEventSink::with_writer(ui(false, 0), Vec::new()),
            vec![
                DeployEvent::StageStarted {
                    stage: Stage::Upload,
                },
                DeployEvent::CommandStarted {
                    command: "scp /tmp/a.zip web:/srv/dist.zip".to_string(),
                    remote: true,
                },
            ],
        );
        assert_eq!(
            out,
            "[..] Uploading archive\n  [REMOTE] scp /tmp/a.zip web:/srv/dist.zip\n"
        );
    }

    #[test]
    fn skipped_stage_names_the_flag() {
        let out = render(
            ConsoleEventSink::with_writer(ui(false, 0), Vec::new()),
            vec![DeployEvent::StageSkipped {
                stage: Stage::Backup,
                reason: "--no-backup",
            }],
        );
        assert_eq!(out, "[--] Creating backup (skipped: --no-backup)\n");
    }

    #[test]
    fn confirm_start_and_quiet_completions_print_nothing() {
        let out = render(
            ConsoleEventSink::with_writer(ui(false, 0), Vec::new()),
            vec![
                DeployEvent::StageStarted {
                    stage: Stage::Confirm,
                },
                DeployEvent::StageCompleted {
                    stage: Stage::Confirm,
                },
                DeployEvent::Cancelled,
            ],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn progress_bar_is_cleared_before_next_line() {
        let out = render(
            ConsoleEventSink::with_writer(ui(true, 0), Vec::new()),
            vec![
                DeployEvent::ArchiveProgress {
                    processed: 1,
                    total: 2,
                },
                DeployEvent::ArchiveProgress {
                    processed: 2,
                    total: 2,
                },
                DeployEvent::Warning {
                    message: "skipped entry".to_string(),
                },
            ],
        );
        assert!(out.contains("  Compressing ["));
        assert!(out.contains("100%"));
        assert!(out.ends_with("[WARN] skipped entry\n"));
    }

    #[test]
    fn detail_events_follow_animation_setting() {
        assert!(ConsoleEventSink::with_writer(ui(true, 0), Vec::new()).wants_detailed_events());
        assert!(!ConsoleEventSink::with_writer(ui(false, 0), Vec::new()).wants_detailed_events());
    }
}
