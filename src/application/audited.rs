//! Command auditing
//!
//! Wraps a [`CommandRunner`] so every command is reported to the event sink
//! before it is spawned.

use std::sync::Arc;

use crate::domain::ports::{
    CommandFailure, CommandOutcome, CommandRunner, CommandSpec, DeployEvent, DeployEventSink,
};

pub struct AuditedRunner<R> {
    inner: R,
    events: Arc<dyn DeployEventSink>,
}

impl<R: CommandRunner> AuditedRunner<R> {
    pub fn new(inner: R, events: Arc<dyn DeployEventSink>) -> Self {
        Self { inner, events }
    }

    fn announce(&self, spec: &CommandSpec) {
        self.events.on_event(DeployEvent::CommandStarted {
            command: spec.to_string(),
            remote: spec.is_remote(),
        });
    }
}

impl<R: CommandRunner> CommandRunner for AuditedRunner<R> {
    fn run(&self, spec: &CommandSpec) -> CommandOutcome {
        self.announce(spec);
        self.inner.run(spec)
    }

    fn capture(&self, spec: &CommandSpec) -> Result<String, CommandFailure> {
        self.announce(spec);
        self.inner.capture(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<DeployEvent>>);

    impl DeployEventSink for Recorder {
        fn on_event(&self, event: DeployEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    struct Failing;

    impl CommandRunner for Failing {
        fn run(&self, spec: &CommandSpec) -> CommandOutcome {
            Err(CommandFailure::new(spec.to_string(), Some(1), String::new()))
        }

        fn capture(&self, spec: &CommandSpec) -> Result<String, CommandFailure> {
            Err(CommandFailure::new(spec.to_string(), Some(1), String::new()))
        }
    }

    #[test]
    fn announces_before_running_even_when_command_fails() {
        let recorder = Arc::new(Recorder(Mutex::new(Vec::new())));
        let runner = AuditedRunner::new(Failing, recorder.clone());

        assert!(runner.run(&CommandSpec::local("npm run build", None)).is_err());

        let events = recorder.0.lock().unwrap();
        assert_eq!(
            *events,
            vec![DeployEvent::CommandStarted {
                command: "npm run build".to_string(),
                remote: false,
            }]
        );
    }
}
