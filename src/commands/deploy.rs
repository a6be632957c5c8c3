use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dropship::config::{self, ConfigWarning, KEY_SERVER};
use dropship::presentation::{create_deploy_use_case, Cli, Interruption};
use dropship::infrastructure::{install_interrupt_handler, JsonEventSink};
use dropship::{ConfigError, DeployError, DeployEventSink, DeployOutcome, DeployRequest};

use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::sink::ConsoleEventSink;
use crate::ui::views::deploy::{render_cancelled, render_deploy_header, render_deploy_summary};

/// Directory holding env files, relative to the project root
const DEFAULT_CONFIG_DIR: &str = "deploy";

pub fn cmd_deploy(cli: &Cli) -> Result<()> {
    let ui = UiContext::new(cli.json, cli.verbose, cli.color, cli.no_animation);

    if cli.json && !cli.force {
        return Err(DeployError::from(ConfigError::Usage(
            "--json cannot prompt for confirmation; pass --force as well".to_string(),
        ))
        .into());
    }

    let cwd = std::env::current_dir().context("cannot determine the current directory")?;
    let project_root = resolve_dir(&cwd, cli.project_root.as_deref()).unwrap_or_else(|| cwd.clone());
    let config_dir = resolve_dir(&cwd, cli.config_dir.as_deref())
        .unwrap_or_else(|| project_root.join(DEFAULT_CONFIG_DIR));

    let loaded = config::load(&config_dir, cli.mode).map_err(DeployError::from)?;
    print_config_warnings(&loaded.warnings, ui);

    if !ui.json {
        print!(
            "{}",
            render_deploy_header(
                cli.mode,
                &project_root,
                &loaded.source,
                loaded.values.get(KEY_SERVER),
                ui.color,
                ui.unicode,
            )
        );
        println!();
    }

    let interruption = Interruption::default();
    install_interrupt_handler(interruption.token.clone(), interruption.registry.clone())
        .context("cannot install the interrupt handler")?;

    let events: Arc<dyn DeployEventSink> = if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    };
    let use_case = create_deploy_use_case(events, &interruption, ui.json, ui.caps.stdin_is_tty);

    let request = DeployRequest::new(project_root, loaded.values)
        .with_mode(cli.mode)
        .with_flags(cli.flags());

    match use_case.execute(&request)? {
        DeployOutcome::Completed(report) => {
            tracing::info!(
                elapsed_ms = report.elapsed.as_millis() as u64,
                backup = report.backup.as_deref().unwrap_or("-"),
                "deployment complete"
            );
            if !ui.json {
                println!();
                print!("{}", render_deploy_summary(&report, ui.color, ui.unicode));
            }
        }
        DeployOutcome::Cancelled => {
            if !ui.json {
                print!("{}", render_cancelled(ui.color, ui.unicode));
            }
        }
    }

    Ok(())
}

fn resolve_dir(cwd: &Path, dir: Option<&Path>) -> Option<PathBuf> {
    dir.map(|d| cwd.join(d))
}

fn print_config_warnings(warnings: &[ConfigWarning], ui: UiContext) {
    for warning in warnings {
        if ui.json {
            let _ = crate::ui::json::emit(serde_json::json!({
                "event": "warning",
                "key": warning.key,
                "message": warning.to_string(),
            }));
        } else {
            eprintln!(
                "{} {}",
                Icon::Warning.colored(ui.color, ui.unicode),
                warning
            );
        }
    }
}
