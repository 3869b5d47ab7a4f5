//! Build pipeline
//!
//! Runs one application through preprocess, compile and bundle, in that
//! order, on a single thread of control.
//!
//! ## Flow
//!
//! 1. Select the backend and validate settings (before anything touches the
//!    file system)
//! 2. Strip comments into the scratch directory when asked (non-fatal)
//! 3. Resolve the entry and compile; write in-memory artifacts
//! 4. Overlay `common` then `<env>` assets into the output directory
//!
//! Every stage that runs is bracketed by `Reporter::start`/`stop`. A failing
//! compile stops the run before bundling.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::config::BuildConfiguration;
use crate::domain::entities::{
    CompiledOutput, MergePlan, MergeReport, Stage, StageFailure, StageReport, StageResult,
};
use crate::domain::ports::{Backend, CompileJob, EntryRequest, NoopReporter, Reporter};
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::backends::BackendRegistry;
use crate::infrastructure::fs::write_artifact;

use super::assets::AssetMerger;
use super::preprocess::Preprocessor;

/// Shown when comment stripping fails and the build carries on
pub const PREPROCESS_FALLBACK_WARNING: &str =
    "Failed to strip comments, continuing to specified bundler";

/// What happened to one application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub app: String,
    /// Stages that ran, in order
    pub stages: Vec<StageReport>,
    pub warnings: Vec<String>,
    /// Counters of the bundle stage, when it ran and succeeded
    pub merge: Option<MergeReport>,
}

impl PipelineOutcome {
    pub fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            stages: Vec::new(),
            warnings: Vec::new(),
            merge: None,
        }
    }

    fn record(&mut self, stage: Stage, result: StageResult) {
        self.stages.push(StageReport { stage, result });
    }

    /// True when no fatal stage failed; preprocess failures never fail a run
    pub fn success(&self) -> bool {
        self.first_failure().is_none()
    }

    pub fn first_failure(&self) -> Option<&StageFailure> {
        self.stages
            .iter()
            .filter(|report| report.stage != Stage::Preprocess)
            .find_map(|report| report.result.failure_ref())
    }

    /// Failure message, only when `verbose`
    pub fn message(&self, verbose: bool) -> Option<&str> {
        if !verbose {
            return None;
        }
        self.first_failure().map(|failure| failure.message.as_str())
    }

    pub fn ran(&self, stage: Stage) -> bool {
        self.stages.iter().any(|report| report.stage == stage)
    }
}

/// Orchestrates one build per call to [`BuildPipeline::run`]
pub struct BuildPipeline {
    registry: BackendRegistry,
    reporter: Arc<dyn Reporter>,
    preprocessor: Preprocessor,
}

impl BuildPipeline {
    pub fn new(registry: BackendRegistry) -> Self {
        Self {
            registry,
            reporter: Arc::new(NoopReporter),
            preprocessor: Preprocessor::new(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Build one application.
    ///
    /// Stage failures are part of the outcome; `Err` is reserved for
    /// internal faults.
    pub async fn run(&self, config: &BuildConfiguration) -> BuildResult<PipelineOutcome> {
        let mut outcome = PipelineOutcome::new(&config.app);

        let backend = if config.skip_compile {
            None
        } else {
            match self.select_backend(config) {
                Ok(backend) => Some(backend),
                Err(err) => return self.reject(Stage::Compile, config, err, outcome),
            }
        };

        // nothing is written or cleared before the settings are known to be safe
        if let Err(err) = config.validate() {
            let stage = if config.skip_compile {
                Stage::Bundle
            } else {
                Stage::Compile
            };
            return self.reject(stage, config, err, outcome);
        }

        if let Some(backend) = backend {

            let source = self.preprocess(config, &mut outcome).await?;

            let header = header(Stage::Compile, &config.app);
            self.reporter.start(&header);
            info!(app = %config.app, backend = backend.id(), "compile started");
            let result = settle(self.compile(backend.as_ref(), config, source).await)?;
            self.reporter.stop(&header, &result);
            info!(app = %config.app, success = result.is_success(), "compile finished");

            let failed = !result.is_success();
            outcome.record(Stage::Compile, result);
            if failed {
                return Ok(outcome);
            }
        }

        if !config.skip_bundle {
            let header = header(Stage::Bundle, &config.app);
            self.reporter.start(&header);
            info!(app = %config.app, env = %config.environment, "bundle started");

            let plan = MergePlan::for_environment(&config.assets_dir, &config.environment);
            let merged = AssetMerger::new(config.copy_policy)
                .merge(&plan, &config.output_dir)
                .await;
            let result = match merged {
                Ok(report) => {
                    for skipped in &report.skipped {
                        let message = format!("skipped {}: {}", skipped.path.display(), skipped.reason);
                        self.reporter.warn(&message);
                        outcome.warnings.push(message);
                    }
                    info!(
                        app = %config.app,
                        layers = ?report.layers_applied,
                        files = report.files_copied,
                        "bundle finished"
                    );
                    outcome.merge = Some(report);
                    StageResult::Success
                }
                Err(err) => settle::<()>(Err(err))?,
            };
            self.reporter.stop(&header, &result);
            outcome.record(Stage::Bundle, result);
        }

        Ok(outcome)
    }

    /// Record `err` as the failure of `stage` without running anything.
    fn reject(
        &self,
        stage: Stage,
        config: &BuildConfiguration,
        err: BuildError,
        mut outcome: PipelineOutcome,
    ) -> BuildResult<PipelineOutcome> {
        let header = header(stage, &config.app);
        self.reporter.start(&header);
        let result = settle::<()>(Err(err))?;
        self.reporter.stop(&header, &result);
        outcome.record(stage, result);
        Ok(outcome)
    }

    fn select_backend(&self, config: &BuildConfiguration) -> BuildResult<Arc<dyn Backend>> {
        let id = config.backend.as_deref().ok_or(BuildError::MissingTarget)?;
        self.registry.get(id)
    }

    /// Strip comments when enabled; returns the source the backend should use.
    async fn preprocess(
        &self,
        config: &BuildConfiguration,
        outcome: &mut PipelineOutcome,
    ) -> BuildResult<PathBuf> {
        if !config.strip_comments {
            return Ok(config.source.clone());
        }

        let header = header(Stage::Preprocess, &config.app);
        self.reporter.start(&header);
        let stripped = self
            .preprocessor
            .preprocess(&config.source, &config.scratch_dir)
            .await;

        match stripped {
            Ok(done) => {
                self.reporter.stop(&header, &StageResult::Success);
                outcome.record(Stage::Preprocess, StageResult::Success);
                Ok(done.source)
            }
            Err(err) if err.is_internal() => Err(err),
            Err(err) => {
                warn!(app = %config.app, error = %err, "comment stripping failed");
                let result = StageResult::Failure(err.into());
                self.reporter.stop(&header, &result);
                self.reporter.warn(PREPROCESS_FALLBACK_WARNING);
                outcome.record(Stage::Preprocess, result);
                outcome.warnings.push(PREPROCESS_FALLBACK_WARNING.to_string());
                Ok(config.source.clone())
            }
        }
    }

    async fn compile(
        &self,
        backend: &dyn Backend,
        config: &BuildConfiguration,
        source: PathBuf,
    ) -> BuildResult<()> {
        let request = EntryRequest::new(source).with_index(config.index.clone());
        let entry = backend.resolve_entry(&request)?;

        let job = CompileJob {
            app: config.app.clone(),
            entry,
            output_dir: config.output_dir.clone(),
            working_dir: config.working_dir.clone(),
            environment: config.environment.clone(),
            verbose: config.verbose,
        };

        match backend.compile(&job).await? {
            CompiledOutput::InMemory(artifact) => {
                write_artifact(&config.output_dir, &config.app, &artifact).await?;
            }
            CompiledOutput::OnDisk => {}
        }
        Ok(())
    }
}

/// Internal faults abort the run; everything else becomes a stage failure.
fn settle<T>(result: BuildResult<T>) -> BuildResult<StageResult> {
    match result {
        Ok(_) => Ok(StageResult::Success),
        Err(err) if err.is_internal() => Err(err),
        Err(err) => Ok(StageResult::Failure(err.into())),
    }
}

/// "Building svc @ 14:03:27"
fn header(stage: Stage, app: &str) -> String {
    format!("{} {} @ {}", stage.verb(), app, Local::now().format("%H:%M:%S"))
}

#[cfg(test)]
mod tests;
