use dropship::DeployError;

use crate::ui::blocks::error::ErrorBlock;

pub fn format_deploy_error(err: &DeployError, supports_color: bool, supports_unicode: bool) -> String {
    let mut block = ErrorBlock::new(err.to_string());
    if let Some(target) = err.offending_target() {
        block = block.with_target(target);
    }
    if let Some(fix) = err.hint() {
        block = block.with_fix(fix);
    }
    block.render(supports_color, supports_unicode)
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    if let Some(deploy) = err.downcast_ref::<DeployError>() {
        return format_deploy_error(deploy, supports_color, supports_unicode);
    }

    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        message.push_str(&format!("\n  caused by: {}", cause));
    }
    ErrorBlock::new(message).render(supports_color, supports_unicode)
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let mut output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
        });
        if let Some(deploy) = err.downcast_ref::<DeployError>() {
            if let DeployError::RemoteCommand { stage, .. } = deploy {
                output["stage"] = serde_json::json!(stage.id());
            }
            if let Some(target) = deploy.offending_target() {
                output["target"] = serde_json::json!(target);
            }
        }
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    let color = caps.supports_color && !caps.is_ci;
    eprint!("{}", format_error(err, color, caps.supports_unicode));
}
