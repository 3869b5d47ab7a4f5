//! Configuration type definitions

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CopyPolicy;
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::backends::ToolCommand;

use super::loader::{self, ConfigWarning};

pub const DEFAULT_APP: &str = "app";
pub const DEFAULT_ENVIRONMENT: &str = "production";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_SOURCE_DIR: &str = "src";
pub const DEFAULT_SCRATCH_DIR: &str = "tmp";

/// `[build]` defaults applied to every application
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildDefaults {
    #[serde(default)]
    pub target: Option<String>,

    #[serde(default)]
    pub env: Option<String>,

    #[serde(default)]
    pub out: Option<PathBuf>,

    #[serde(default)]
    pub source: Option<PathBuf>,

    #[serde(default)]
    pub scratch: Option<PathBuf>,

    #[serde(default)]
    pub index: Option<String>,

    #[serde(default)]
    pub strip_comments: bool,
}

/// `[assets]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,

    #[serde(default)]
    pub policy: CopyPolicy,
}

/// `[backends.<id>]` - replaces the executable of one backend
///
/// ```toml
/// [backends.ncc]
/// command = "npx ncc"
/// args = ["--no-source-map-register"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub command: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,
}

impl BackendSettings {
    /// `None` when the backend keeps its default executable and arguments
    pub fn to_command(&self, default_program: &str) -> Option<ToolCommand> {
        let base = match self.command.as_deref() {
            Some(command) => ToolCommand::parse(command)?,
            None if self.args.is_empty() => return None,
            None => ToolCommand::new(default_program),
        };
        Some(base.with_args(self.args.iter().cloned()))
    }
}

/// Contents of `appbuild.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub build: BuildDefaults,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub backends: HashMap<String, BackendSettings>,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> BuildResult<Self> {
        Ok(Self::load_with_warnings(path)?.0)
    }

    pub fn load_with_warnings(path: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Executable overrides for the backend registry
    pub fn backend_commands(&self) -> HashMap<String, ToolCommand> {
        self.backends
            .iter()
            .filter_map(|(id, settings)| Some((id.clone(), settings.to_command(id)?)))
            .collect()
    }
}

/// Everything one pipeline run needs, resolved once and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub app: String,
    /// Backend identifier; required unless compiling is skipped
    pub backend: Option<String>,
    pub environment: String,
    /// Directory external tools run in; relative paths resolve against it
    pub working_dir: PathBuf,
    /// Entry file, or directory to search for one
    pub source: PathBuf,
    /// Explicit entry file name inside `source`
    pub index: Option<String>,
    pub output_dir: PathBuf,
    /// Root holding the `common` and per-environment layers
    pub assets_dir: PathBuf,
    pub scratch_dir: PathBuf,
    pub verbose: bool,
    pub skip_compile: bool,
    pub skip_bundle: bool,
    pub strip_comments: bool,
    pub copy_policy: CopyPolicy,
}

impl BuildConfiguration {
    /// Defaults for `app` rooted at `working_dir`
    pub fn new(app: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        let working_dir = working_dir.into();
        Self {
            app: app.into(),
            backend: None,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            source: working_dir.join(DEFAULT_SOURCE_DIR),
            index: None,
            output_dir: working_dir.join(DEFAULT_OUTPUT_DIR),
            assets_dir: working_dir.join(DEFAULT_ASSETS_DIR),
            scratch_dir: working_dir.join(DEFAULT_SCRATCH_DIR),
            working_dir,
            verbose: false,
            skip_compile: false,
            skip_bundle: false,
            strip_comments: false,
            copy_policy: CopyPolicy::default(),
        }
    }

    pub fn with_backend(mut self, backend: impl Into<String>) -> Self {
        self.backend = Some(backend.into());
        self
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_source(mut self, source: impl AsRef<Path>) -> Self {
        self.source = self.working_dir.join(source);
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = self.working_dir.join(output_dir);
        self
    }

    pub fn with_assets_dir(mut self, assets_dir: impl AsRef<Path>) -> Self {
        self.assets_dir = self.working_dir.join(assets_dir);
        self
    }

    pub fn with_scratch_dir(mut self, scratch_dir: impl AsRef<Path>) -> Self {
        self.scratch_dir = self.working_dir.join(scratch_dir);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_skip_compile(mut self, skip: bool) -> Self {
        self.skip_compile = skip;
        self
    }

    pub fn with_skip_bundle(mut self, skip: bool) -> Self {
        self.skip_bundle = skip;
        self
    }

    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    pub fn with_copy_policy(mut self, policy: CopyPolicy) -> Self {
        self.copy_policy = policy;
        self
    }

    /// Reject settings that would let a run delete project files or write
    /// outside its directories.
    ///
    /// Only the stages that will run are checked: compiling clears
    /// `output_dir` and names the artifact after the app, bundling joins the
    /// environment onto the assets root.
    pub fn validate(&self) -> BuildResult<()> {
        if !self.skip_compile {
            check_plain_name("application name", &self.app)?;
            if let Some(inside) = self.output_conflict() {
                return Err(BuildError::InvalidSetting {
                    setting: "output directory",
                    message: format!(
                        "{} is cleared before compiling and would delete {}",
                        self.output_dir.display(),
                        inside.display()
                    ),
                });
            }
        }
        if !self.skip_bundle {
            check_plain_name("environment", &self.environment)?;
        }
        Ok(())
    }

    /// Project directory that lies at or below `output_dir`, if any
    pub fn output_conflict(&self) -> Option<&Path> {
        let output = lexical(&self.output_dir);
        [
            &self.working_dir,
            &self.source,
            &self.assets_dir,
            &self.scratch_dir,
        ]
        .into_iter()
        .find(|dir| lexical(dir).starts_with(&output))
        .map(PathBuf::as_path)
    }
}

/// App names and environment tags become single path components.
fn check_plain_name(setting: &'static str, value: &str) -> BuildResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." || trimmed.contains(['/', '\\']) {
        return Err(BuildError::InvalidSetting {
            setting,
            message: format!("'{}' must be a plain name without path separators", value),
        });
    }
    Ok(())
}

/// `.` and `..` resolved without touching the file system
fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}
