//! Operator confirmation
//!
//! `InteractiveConfirmer` drives a dialoguer prompt on a terminal.
//! `LineConfirmer` reads a single answer line, used when stdin is piped.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;

use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::config::parse_yes_no;
use crate::domain::ports::{ConfirmationRequest, Confirmer};

/// Lines describing what is about to happen
pub fn summary_lines(request: &ConfirmationRequest) -> Vec<String> {
    let backup = if request.backup_enabled {
        format!("enabled (keep {})", request.backup_retention)
    } else {
        "disabled".to_string()
    };
    vec![
        format!("Mode:        {}", request.mode.as_deref().unwrap_or("default")),
        format!("Server:      {}", request.remote_host),
        format!("Remote dir:  {}", request.remote_dir),
        format!("Backup:      {}", backup),
    ]
}

fn prompt_text(request: &ConfirmationRequest) -> String {
    format!("Deploy to {}:{}?", request.remote_host, request.remote_dir)
}

/// Terminal prompt
#[derive(Debug, Default)]
pub struct InteractiveConfirmer;

impl InteractiveConfirmer {
    pub fn new() -> Self {
        Self
    }
}

impl Confirmer for InteractiveConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> io::Result<bool> {
        let mut err = io::stderr().lock();
        writeln!(err)?;
        for line in summary_lines(request) {
            writeln!(err, "  {}", line)?;
        }
        writeln!(err)?;
        drop(err);

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt_text(request))
            .default(request.default_yes)
            .interact()
            .map_err(io::Error::from)
    }
}

/// Reads one answer line from `input`.
///
/// An empty line (or end of input) takes the request's default. Anything
/// that is not a recognizable yes/no is treated as "no".
pub struct LineConfirmer<R, W> {
    io: Mutex<(R, W)>,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            io: Mutex::new((input, output)),
        }
    }
}

impl LineConfirmer<io::StdinLock<'static>, io::Stderr> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn confirm(&self, request: &ConfirmationRequest) -> io::Result<bool> {
        let mut guard = self.io.lock().unwrap_or_else(|e| e.into_inner());
        let (input, output) = &mut *guard;

        for line in summary_lines(request) {
            writeln!(output, "  {}", line)?;
        }
        let hint = if request.default_yes { "Y/n" } else { "y/N" };
        write!(output, "{} [{}] ", prompt_text(request), hint)?;
        output.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer)?;
        writeln!(output)?;

        if answer.trim().is_empty() {
            return Ok(request.default_yes);
        }
        Ok(parse_yes_no(&answer).unwrap_or(false))
    }
}

/// Picks the prompt style for the attached stdin
pub enum OperatorConfirmer {
    Interactive(InteractiveConfirmer),
    Line(LineConfirmer<io::StdinLock<'static>, io::Stderr>),
}

impl OperatorConfirmer {
    pub fn for_stdin(is_terminal: bool) -> Self {
        if is_terminal {
            OperatorConfirmer::Interactive(InteractiveConfirmer::new())
        } else {
            OperatorConfirmer::Line(LineConfirmer::stdin())
        }
    }
}

impl Confirmer for OperatorConfirmer {
    fn confirm(&self, request: &ConfirmationRequest) -> io::Result<bool> {
        match self {
            OperatorConfirmer::Interactive(inner) => inner.confirm(request),
            OperatorConfirmer::Line(inner) => inner.confirm(request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(default_yes: bool) -> ConfirmationRequest {
        ConfirmationRequest {
            mode: Some("production".to_string()),
            remote_host: "deploy@example.com".to_string(),
            remote_dir: "/var/www/site".to_string(),
            backup_enabled: true,
            backup_retention: 3,
            default_yes,
        }
    }

    fn answer(input: &str, default_yes: bool) -> (bool, String) {
        let confirmer = LineConfirmer::new(input.as_bytes(), Vec::new());
        let result = confirmer.confirm(&request(default_yes)).unwrap();
        let (_, output) = confirmer.io.into_inner().unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn explicit_answers() {
        assert!(answer("y\n", false).0);
        assert!(answer("YES\n", false).0);
        assert!(!answer("n\n", true).0);
        assert!(!answer("no\n", true).0);
    }

    #[test]
    fn empty_answer_takes_default() {
        assert!(answer("\n", true).0);
        assert!(!answer("\n", false).0);
        assert!(answer("", true).0);
    }

    #[test]
    fn unrecognized_answer_declines() {
        assert!(!answer("sure\n", true).0);
    }

    #[test]
    fn prompt_shows_summary_and_default_hint() {
        let (_, output) = answer("y\n", true);
        assert!(output.contains("Server:      deploy@example.com"));
        assert!(output.contains("Backup:      enabled (keep 3)"));
        assert!(output.contains("Deploy to deploy@example.com:/var/www/site? [Y/n]"));
    }

    #[test]
    fn summary_reports_disabled_backup_and_default_mode() {
        let mut req = request(true);
        req.backup_enabled = false;
        req.mode = None;
        let lines = summary_lines(&req);
        assert!(lines.contains(&"Mode:        default".to_string()));
        assert!(lines.contains(&"Backup:      disabled".to_string()));
    }
}
