//! Deploy Use Case
//!
//! Runs the deployment stages strictly in order:
//! 1. Validate configuration
//! 2. Build (skippable)
//! 3. Verify the build output exists
//! 4. Confirm with the operator (skippable)
//! 5. Compress the output into a temp archive
//! 6. Ensure the remote directory exists
//! 7. Upload the archive
//! 8. Back up the uploaded archive and rotate old backups (skippable)
//! 9. Clear the remote tree
//! 10. Extract and fix permissions
//! 11. Remove the local archive
//!
//! Any failure stops the sequence. The temp archive is a scoped guard, so it
//! is removed on every exit path. Cancellation is checked between stages but
//! never between clearing and extraction. Once clearing starts, a failure is
//! always reported as an error, even when an interrupt arrived meanwhile, and
//! both remote commands run detached from the terminal's interrupts.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use crate::application::audited::AuditedRunner;
use crate::application::backup::{backup_dir, RemoteBackupManager, REMOTE_ARTIFACT_NAME};
use crate::application::cancel::CancelToken;
use crate::application::remote_tree::{clear_command, extract_command};
use crate::config::DeploymentConfig;
use crate::domain::ports::{
    ArchiveEvent, Archiver, Clock, CommandFailure, CommandRunner, CommandSpec, Confirmer,
    DeployEvent, DeployEventSink, NoopEventSink, Stage,
};
use crate::error::{DeployError, DeployResult};
use crate::infrastructure::fs::{CleanupRegistry, TempArchive};

use super::options::DeployRequest;
use super::result::{DeployOutcome, DeployReport};

/// Why the stage sequence stopped early
enum Abort {
    Cancelled,
    Failed(DeployError),
    /// The live tree may be half cleared or half extracted
    Critical(DeployError),
}

impl From<DeployError> for Abort {
    fn from(err: DeployError) -> Self {
        Abort::Failed(err)
    }
}

type StageResult<T> = Result<T, Abort>;

fn fail(err: impl Into<DeployError>) -> Abort {
    Abort::Failed(err.into())
}

fn remote_failure(stage: Stage) -> impl FnOnce(CommandFailure) -> Abort {
    move |failure| Abort::Failed(DeployError::RemoteCommand { stage, failure })
}

fn critical_failure(stage: Stage) -> impl FnOnce(CommandFailure) -> Abort {
    move |failure| Abort::Critical(DeployError::RemoteCommand { stage, failure })
}

/// Deploy use case - orchestrates one deployment
///
/// Parameterized by its ports so tests can record every command issued.
pub struct DeployUseCase<R, A, C, K>
where
    R: CommandRunner,
    A: Archiver,
    C: Confirmer,
    K: Clock,
{
    runner: R,
    archiver: A,
    confirmer: C,
    clock: K,
    events: Arc<dyn DeployEventSink>,
    cancel: CancelToken,
    registry: CleanupRegistry,
}

impl<R, A, C, K> DeployUseCase<R, A, C, K>
where
    R: CommandRunner,
    A: Archiver,
    C: Confirmer,
    K: Clock,
{
    pub fn new(runner: R, archiver: A, confirmer: C, clock: K) -> Self {
        Self {
            runner,
            archiver,
            confirmer,
            clock,
            events: Arc::new(NoopEventSink),
            cancel: CancelToken::new(),
            registry: CleanupRegistry::new(),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn DeployEventSink>) -> Self {
        self.events = events;
        self
    }

    /// Share the token flipped by the interrupt handler
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Share the registry released by the interrupt handler
    pub fn with_cleanup_registry(mut self, registry: CleanupRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Execute the deployment.
    ///
    /// Declining the confirmation or interrupting the run yields
    /// `Ok(DeployOutcome::Cancelled)`.
    pub fn execute(&self, request: &DeployRequest) -> DeployResult<DeployOutcome> {
        let started = Instant::now();
        match self.run(request, started) {
            Ok(report) => {
                self.emit(DeployEvent::Completed {
                    archive_bytes: report.archive_bytes,
                    backup: report.backup.clone(),
                    pruned: report.pruned.len(),
                });
                Ok(DeployOutcome::Completed(report))
            }
            Err(Abort::Critical(err)) => Err(err),
            Err(Abort::Failed(err)) if !self.cancel.is_cancelled() => Err(err),
            Err(Abort::Failed(err)) => {
                tracing::info!(error = %err, "stage interrupted by cancellation");
                self.cancelled()
            }
            Err(Abort::Cancelled) => self.cancelled(),
        }
    }

    fn cancelled(&self) -> DeployResult<DeployOutcome> {
        self.emit(DeployEvent::Cancelled);
        Ok(DeployOutcome::Cancelled)
    }

    fn emit(&self, event: DeployEvent) {
        self.events.on_event(event);
    }

    fn checkpoint(&self) -> StageResult<()> {
        if self.cancel.is_cancelled() {
            tracing::info!("cancellation requested, not starting next stage");
            return Err(Abort::Cancelled);
        }
        Ok(())
    }

    fn skip(&self, stage: Stage, reason: &'static str) {
        tracing::debug!(%stage, reason, "stage skipped");
        self.emit(DeployEvent::StageSkipped { stage, reason });
    }

    fn stage<T>(&self, stage: Stage, body: impl FnOnce() -> StageResult<T>) -> StageResult<T> {
        tracing::debug!(%stage, "stage started");
        self.emit(DeployEvent::StageStarted { stage });

        let result = body();
        let failure = match &result {
            Ok(_) => {
                self.emit(DeployEvent::StageCompleted { stage });
                None
            }
            Err(Abort::Critical(err)) => Some(err),
            Err(Abort::Failed(err)) if !self.cancel.is_cancelled() => Some(err),
            Err(_) => None,
        };
        if let Some(err) = failure {
            tracing::error!(%stage, error = %err, "stage failed");
            self.emit(DeployEvent::StageFailed {
                stage,
                message: err.to_string(),
            });
        }
        result
    }

    fn warn(&self, report: &mut DeployReport, message: String) {
        tracing::warn!("{}", message);
        self.emit(DeployEvent::Warning {
            message: message.clone(),
        });
        report.warnings.push(message);
    }

    fn run(&self, request: &DeployRequest, started: Instant) -> StageResult<DeployReport> {
        let config = self.stage(Stage::Validate, || {
            DeploymentConfig::from_values(
                request.mode,
                &request.project_root,
                &request.values,
                request.flags,
            )
            .map_err(fail)
        })?;

        let runner = AuditedRunner::new(&self.runner, Arc::clone(&self.events));
        let mut report = DeployReport {
            remote_host: config.remote_host().to_string(),
            remote_dir: config.remote_dir().to_string(),
            ..DeployReport::default()
        };

        self.checkpoint()?;
        match config.build_command().filter(|_| !config.skip_build()) {
            Some(command) => self.stage(Stage::Build, || {
                let spec = CommandSpec::local(command, Some(config.project_root().to_path_buf()));
                runner
                    .run(&spec)
                    .map_err(|failure| fail(DeployError::Build(failure)))
            })?,
            None => self.skip(Stage::Build, "--skip-build"),
        }

        self.checkpoint()?;
        self.stage(Stage::VerifyArtifact, || {
            if config.dist_path().is_dir() {
                Ok(())
            } else {
                Err(fail(DeployError::ArtifactMissing {
                    path: config.dist_path().to_path_buf(),
                    build_skipped: config.skip_build(),
                }))
            }
        })?;

        self.checkpoint()?;
        if config.force_no_confirm() {
            self.skip(Stage::Confirm, "--force");
        } else {
            let approved = self.stage(Stage::Confirm, || {
                match self.confirmer.confirm(&config.confirmation_request()) {
                    Ok(answer) => Ok(answer),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(Abort::Cancelled),
                    Err(e) => Err(fail(DeployError::Prompt(e))),
                }
            })?;
            if !approved {
                tracing::info!("deployment declined by operator");
                return Err(Abort::Cancelled);
            }
        }

        self.checkpoint()?;
        let mut archive = self.stage(Stage::Archive, || {
            self.create_archive(&config, request, &mut report)
        })?;

        self.checkpoint()?;
        let backups = RemoteBackupManager::new(&runner, config.remote_host().clone());
        self.stage(Stage::PrepareRemote, || {
            backups
                .ensure_remote_dir(config.remote_dir())
                .map_err(remote_failure(Stage::PrepareRemote))
        })?;

        self.checkpoint()?;
        self.stage(Stage::Upload, || {
            let spec = CommandSpec::copy(
                archive.path(),
                config.remote_host(),
                config.remote_dir().join(REMOTE_ARTIFACT_NAME),
            );
            runner.run(&spec).map_err(remote_failure(Stage::Upload))
        })?;

        self.checkpoint()?;
        if config.create_backup() {
            let name = self.stage(Stage::Backup, || {
                let name = backups
                    .create_backup(config.remote_dir(), REMOTE_ARTIFACT_NAME, self.clock.now())
                    .map_err(remote_failure(Stage::Backup))?;
                self.emit(DeployEvent::BackupCreated {
                    name: name.to_string(),
                });
                self.rotate(&backups, &config, &mut report);
                Ok(name)
            })?;
            report.backup = Some(name.to_string());
        } else {
            self.skip(Stage::Backup, "--no-backup");
        }

        self.checkpoint()?;
        self.stage(Stage::ClearRemoteTree, || {
            let spec =
                CommandSpec::remote_detached(config.remote_host(), clear_command(config.remote_dir()));
            runner.run(&spec).map_err(critical_failure(Stage::ClearRemoteTree))
        })?;

        // The tree is empty now; extraction runs even if an interrupt arrived.
        self.stage(Stage::Extract, || {
            let spec =
                CommandSpec::remote_detached(config.remote_host(), extract_command(config.remote_dir()));
            runner.run(&spec).map_err(critical_failure(Stage::Extract))
        })?;

        self.stage(Stage::LocalCleanup, || {
            if let Err(e) = archive.release() {
                let message = format!("could not remove {}: {}", archive.path().display(), e);
                self.warn(&mut report, message);
            }
            Ok(())
        })?;

        report.elapsed = started.elapsed();
        Ok(report)
    }

    fn create_archive(
        &self,
        config: &DeploymentConfig,
        request: &DeployRequest,
        report: &mut DeployReport,
    ) -> StageResult<TempArchive> {
        let mode = config.mode().map(|m| m.as_str());
        let archive = TempArchive::acquire(&request.temp_dir, mode, &self.registry).map_err(fail)?;

        let detailed = self.events.wants_detailed_events();
        let summary = self
            .archiver
            .compress(config.dist_path(), archive.path(), &mut |event| match event {
                ArchiveEvent::Progress(progress) if detailed => {
                    self.emit(DeployEvent::ArchiveProgress {
                        processed: progress.processed,
                        total: progress.total,
                    })
                }
                ArchiveEvent::Progress(_) => {}
                ArchiveEvent::Warning(message) => self.emit(DeployEvent::Warning { message }),
            })
            .map_err(fail)?;

        tracing::info!(
            path = %archive.path().display(),
            bytes = summary.total_bytes,
            entries = summary.entries,
            "archive created"
        );
        report.archive_bytes = summary.total_bytes;
        report.warnings.extend(summary.warnings);
        self.emit(DeployEvent::ArchiveCreated {
            path: archive.path().to_path_buf(),
            bytes: summary.total_bytes,
        });
        Ok(archive)
    }

    /// Rotation is best effort: a failure is reported but does not abort.
    fn rotate<B: CommandRunner>(
        &self,
        backups: &RemoteBackupManager<B>,
        config: &DeploymentConfig,
        report: &mut DeployReport,
    ) {
        let retention = config.backup_retention() as usize;
        match backups.rotate(&backup_dir(config.remote_dir()), retention) {
            Ok(rotation) => {
                report.pruned = rotation.pruned.iter().map(ToString::to_string).collect();
                self.emit(DeployEvent::BackupsRotated {
                    kept: rotation.kept.len(),
                    pruned: report.pruned.clone(),
                });
            }
            Err(failure) => self.warn(report, format!("backup rotation failed: {}", failure)),
        }
    }
}
