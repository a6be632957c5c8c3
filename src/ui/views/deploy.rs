use std::path::Path;

use dropship::{DeployReport, Mode};

use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::transfer::{format_bytes_compact, format_elapsed};

pub fn render_deploy_header(
    mode: Option<Mode>,
    project_root: &Path,
    env_file: &Path,
    server: Option<&str>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Deploy, "Dropship Deploy");
    header.add("Mode", mode.map_or("default", Mode::as_str));
    header.add("Project", project_root.display().to_string());
    header.add("Config", env_file.display().to_string());
    if let Some(server) = server {
        header.add("Server", server);
    }
    header.render(supports_color, supports_unicode)
}

pub fn render_deploy_summary(
    report: &DeployReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut summary = if report.has_warnings() {
        ResultSummary::partial("Deploy Complete")
    } else {
        ResultSummary::success("Deploy Complete")
    };

    summary.add_stat("Elapsed", format_elapsed(report.elapsed));
    summary.add_stat("Archive", format_bytes_compact(report.archive_bytes));
    summary.add_stat(
        "Backup",
        report.backup.clone().unwrap_or_else(|| "skipped".to_string()),
    );
    summary.add_stat("Pruned", report.pruned.len().to_string());

    summary.add_info(format!("Live at {}:{}", report.remote_host, report.remote_dir));
    for warning in &report.warnings {
        summary.add_warning(warning.as_str());
    }
    if report.backup.is_none() {
        summary.with_next_step("Drop --no-backup on the next run to keep a restore point");
    }

    summary.render(supports_color, supports_unicode)
}

pub fn render_cancelled(supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} Deployment cancelled\n",
        Icon::Skipped.colored(supports_color, supports_unicode)
    )
}
