use super::*;
use crate::domain::entities::Artifact;
use crate::domain::value_objects::CopyPolicy;
use crate::error::FailureKind;
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::tempdir;

/// Backend that records the job and returns a canned result
struct FakeBackend {
    id: &'static str,
    output: Result<CompiledOutput, String>,
    jobs: Mutex<Vec<CompileJob>>,
}

impl FakeBackend {
    fn bundling(id: &'static str, contents: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            output: Ok(CompiledOutput::InMemory(Artifact::javascript(contents))),
            jobs: Mutex::new(Vec::new()),
        })
    }

    fn failing(id: &'static str, message: &str) -> Arc<Self> {
        Arc::new(Self {
            id,
            output: Err(message.to_string()),
            jobs: Mutex::new(Vec::new()),
        })
    }

    fn entries(&self) -> Vec<Option<PathBuf>> {
        self.jobs.lock().unwrap().iter().map(|job| job.entry.clone()).collect()
    }
}

#[async_trait]
impl Backend for FakeBackend {
    fn id(&self) -> &str {
        self.id
    }

    async fn compile(&self, job: &CompileJob) -> BuildResult<CompiledOutput> {
        self.jobs.lock().unwrap().push(job.clone());
        self.output.clone().map_err(|message| BuildError::BackendFailure {
            backend: self.id.to_string(),
            message,
        })
    }
}

#[derive(Default)]
struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl Reporter for RecordingReporter {
    fn start(&self, header: &str) {
        let verb = header.split(' ').next().unwrap_or_default();
        self.events.lock().unwrap().push(format!("start {verb}"));
    }

    fn stop(&self, header: &str, result: &StageResult) {
        let verb = header.split(' ').next().unwrap_or_default();
        let status = if result.is_success() { "ok" } else { "fail" };
        self.events.lock().unwrap().push(format!("stop {verb} {status}"));
    }

    fn warn(&self, message: &str) {
        self.events.lock().unwrap().push(format!("warn {message}"));
    }
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project with `src/main.ts` and both asset layers
fn project(root: &Path) {
    write(root, "src/main.ts", "// entry\nexport const x = 1;\n");
    write(root, "assets/common/config.json", "common");
    write(root, "assets/common/logo.svg", "<svg/>");
    write(root, "assets/production/config.json", "production");
}

fn pipeline_with(backend: Arc<FakeBackend>) -> BuildPipeline {
    BuildPipeline::new(BackendRegistry::new().with(backend))
}

#[tokio::test]
async fn skipping_both_stages_writes_nothing() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let config = BuildConfiguration::new("svc", dir.path())
        .with_skip_compile(true)
        .with_skip_bundle(true)
        .with_strip_comments(true);

    let outcome = BuildPipeline::new(BackendRegistry::new()).run(&config).await.unwrap();

    assert!(outcome.success());
    assert!(outcome.stages.is_empty());
    assert!(!dir.path().join("dist").exists());
    assert!(!dir.path().join("tmp").exists());
}

#[tokio::test]
async fn full_build_writes_artifact_then_assets() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let backend = FakeBackend::bundling("fake", "bundle()");
    let reporter = Arc::new(RecordingReporter::default());
    let config = BuildConfiguration::new("svc", dir.path()).with_backend("fake");

    let outcome = pipeline_with(backend.clone())
        .with_reporter(reporter.clone())
        .run(&config)
        .await
        .unwrap();

    assert!(outcome.success());
    let out = dir.path().join("dist");
    assert_eq!(fs::read_to_string(out.join("svc.js")).unwrap(), "bundle()");
    assert_eq!(fs::read_to_string(out.join("config.json")).unwrap(), "production");
    assert!(out.join("logo.svg").exists());
    assert_eq!(backend.entries(), vec![Some(dir.path().join("src/main.ts"))]);
    assert_eq!(
        reporter.events(),
        vec!["start Building", "stop Building ok", "start Bundling", "stop Bundling ok"]
    );
    assert_eq!(
        outcome.merge.unwrap().layers_applied,
        vec!["common", "production"]
    );
}

#[tokio::test]
async fn stale_output_is_cleared_before_writing() {
    let dir = tempdir().unwrap();
    project(dir.path());
    write(dir.path(), "dist/stale.js", "old");
    let config = BuildConfiguration::new("svc", dir.path())
        .with_backend("fake")
        .with_skip_bundle(true);

    pipeline_with(FakeBackend::bundling("fake", "new"))
        .run(&config)
        .await
        .unwrap();

    assert!(!dir.path().join("dist/stale.js").exists());
    assert!(dir.path().join("dist/svc.js").exists());
}

#[tokio::test]
async fn unknown_backend_fails_without_writes() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let config = BuildConfiguration::new("svc", dir.path())
        .with_backend("webpack")
        .with_strip_comments(true);

    let outcome = pipeline_with(FakeBackend::bundling("fake", "x"))
        .run(&config)
        .await
        .unwrap();

    assert!(!outcome.success());
    assert_eq!(outcome.first_failure().unwrap().kind, FailureKind::UnknownBackend);
    assert_eq!(
        outcome.message(true),
        Some("Specified builder [webpack] not found")
    );
    assert_eq!(outcome.message(false), None);
    assert!(!outcome.ran(Stage::Bundle));
    assert!(!dir.path().join("dist").exists());
    assert!(!dir.path().join("tmp").exists());
}

#[tokio::test]
async fn missing_target_fails_compile() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let config = BuildConfiguration::new("svc", dir.path());

    let outcome = BuildPipeline::new(BackendRegistry::builtin())
        .run(&config)
        .await
        .unwrap();

    assert_eq!(outcome.first_failure().unwrap().kind, FailureKind::MissingTarget);
    assert!(!dir.path().join("dist").exists());
}

#[tokio::test]
async fn backend_failure_stops_before_bundle() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let config = BuildConfiguration::new("svc", dir.path()).with_backend("fake");

    let outcome = pipeline_with(FakeBackend::failing("fake", "syntax error"))
        .run(&config)
        .await
        .unwrap();

    assert!(!outcome.success());
    assert_eq!(outcome.message(true), Some("syntax error"));
    assert!(!outcome.ran(Stage::Bundle));
    assert!(!dir.path().join("dist/config.json").exists());
}

#[tokio::test]
async fn missing_entry_is_entry_not_found() {
    let dir = tempdir().unwrap();
    write(dir.path(), "src/app.ts", "x");
    let backend = FakeBackend::bundling("fake", "x");
    let config = BuildConfiguration::new("svc", dir.path()).with_backend("fake");

    let outcome = pipeline_with(backend.clone()).run(&config).await.unwrap();

    assert_eq!(outcome.first_failure().unwrap().kind, FailureKind::EntryNotFound);
    assert!(backend.entries().is_empty());
}

#[tokio::test]
async fn stripped_sources_are_handed_to_backend() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let backend = FakeBackend::bundling("fake", "x");
    let config = BuildConfiguration::new("svc", dir.path())
        .with_backend("fake")
        .with_strip_comments(true)
        .with_skip_bundle(true);

    let outcome = pipeline_with(backend.clone()).run(&config).await.unwrap();

    assert!(outcome.success());
    let entry = dir.path().join("tmp/main.ts");
    assert_eq!(backend.entries(), vec![Some(entry.clone())]);
    assert_eq!(fs::read_to_string(entry).unwrap(), "\nexport const x = 1;\n");
}

#[tokio::test]
async fn preprocess_failure_falls_back_to_original_source() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let backend = FakeBackend::bundling("fake", "x");
    let reporter = Arc::new(RecordingReporter::default());
    // scratch inside the source tree is refused
    let config = BuildConfiguration::new("svc", dir.path())
        .with_backend("fake")
        .with_strip_comments(true)
        .with_scratch_dir("src/tmp")
        .with_skip_bundle(true);

    let outcome = pipeline_with(backend.clone())
        .with_reporter(reporter.clone())
        .run(&config)
        .await
        .unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.warnings, vec![PREPROCESS_FALLBACK_WARNING]);
    assert_eq!(backend.entries(), vec![Some(dir.path().join("src/main.ts"))]);
    assert!(reporter
        .events()
        .contains(&format!("warn {PREPROCESS_FALLBACK_WARNING}")));
}

#[tokio::test]
async fn bundle_only_overlays_assets() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let config = BuildConfiguration::new("svc", dir.path()).with_skip_compile(true);

    let outcome = BuildPipeline::new(BackendRegistry::new()).run(&config).await.unwrap();

    assert!(outcome.success());
    assert!(!outcome.ran(Stage::Compile));
    assert_eq!(
        fs::read_to_string(dir.path().join("dist/config.json")).unwrap(),
        "production"
    );
}

#[cfg(unix)]
#[tokio::test]
async fn fail_fast_bundle_reports_asset_failure() {
    let dir = tempdir().unwrap();
    project(dir.path());
    std::os::unix::fs::symlink(
        dir.path().join("missing"),
        dir.path().join("assets/common/broken.txt"),
    )
    .unwrap();
    let config = BuildConfiguration::new("svc", dir.path())
        .with_skip_compile(true)
        .with_copy_policy(CopyPolicy::FailFast);

    let outcome = BuildPipeline::new(BackendRegistry::new()).run(&config).await.unwrap();

    assert_eq!(
        outcome.first_failure().unwrap().kind,
        FailureKind::AssetMergeFailure
    );
}

#[cfg(unix)]
#[tokio::test]
async fn best_effort_bundle_warns_about_skipped_files() {
    let dir = tempdir().unwrap();
    project(dir.path());
    std::os::unix::fs::symlink(
        dir.path().join("missing"),
        dir.path().join("assets/common/broken.txt"),
    )
    .unwrap();
    let config = BuildConfiguration::new("svc", dir.path()).with_skip_compile(true);

    let outcome = BuildPipeline::new(BackendRegistry::new()).run(&config).await.unwrap();

    assert!(outcome.success());
    assert_eq!(outcome.warnings.len(), 1);
    assert!(outcome.warnings[0].contains("broken.txt"));
}

#[tokio::test]
async fn environment_selects_layer() {
    let dir = tempdir().unwrap();
    project(dir.path());
    write(dir.path(), "assets/staging/config.json", "staging");
    let config = BuildConfiguration::new("svc", dir.path())
        .with_skip_compile(true)
        .with_environment("staging");

    BuildPipeline::new(BackendRegistry::new()).run(&config).await.unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("dist/config.json")).unwrap(),
        "staging"
    );
}

#[tokio::test]
async fn output_dir_over_project_is_refused_before_clearing() {
    let dir = tempdir().unwrap();
    project(dir.path());
    let backend = FakeBackend::bundling("fake", "x");
    let reporter = Arc::new(RecordingReporter::default());
    let config = BuildConfiguration::new("svc", dir.path())
        .with_backend("fake")
        .with_output_dir(".");

    let outcome = pipeline_with(backend.clone())
        .with_reporter(reporter.clone())
        .run(&config)
        .await
        .unwrap();

    assert!(!outcome.success());
    assert_eq!(outcome.first_failure().unwrap().kind, FailureKind::InvalidSetting);
    assert!(backend.entries().is_empty());
    assert!(dir.path().join("src/main.ts").exists());
    assert!(dir.path().join("assets/common/config.json").exists());
    assert_eq!(reporter.events(), vec!["start Building", "stop Building fail"]);
}

#[tokio::test]
async fn escaping_environment_fails_bundle_without_writes() {
    let dir = tempdir().unwrap();
    project(dir.path());

    for env in ["", "../assets"] {
        let config = BuildConfiguration::new("svc", dir.path())
            .with_skip_compile(true)
            .with_environment(env);

        let outcome = BuildPipeline::new(BackendRegistry::new()).run(&config).await.unwrap();

        assert_eq!(outcome.first_failure().unwrap().kind, FailureKind::InvalidSetting);
        assert!(outcome.ran(Stage::Bundle));
        assert!(!dir.path().join("dist").exists(), "env {env:?}");
    }
}
