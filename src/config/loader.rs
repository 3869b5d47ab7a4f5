//! Configuration loading and layering

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuildError, BuildResult};

use super::types::{
    BuildConfiguration, ProjectConfig, DEFAULT_APP, DEFAULT_ASSETS_DIR, DEFAULT_ENVIRONMENT,
    DEFAULT_OUTPUT_DIR, DEFAULT_SCRATCH_DIR, DEFAULT_SOURCE_DIR,
};

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "appbuild.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BuildResult<(ProjectConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: ProjectConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BuildError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load `explicit`, or `appbuild.toml` from `working_dir` when present.
///
/// An explicit path must exist; the implicit file is optional.
pub fn load_project(
    working_dir: &Path,
    explicit: Option<&Path>,
) -> BuildResult<(ProjectConfig, Vec<ConfigWarning>)> {
    match explicit {
        Some(path) => load_with_warnings(&working_dir.join(path)),
        None => {
            let path = working_dir.join(PROJECT_CONFIG_FILE);
            if path.is_file() {
                load_with_warnings(&path)
            } else {
                Ok((ProjectConfig::default(), Vec::new()))
            }
        }
    }
}

/// Values from `APPBUILD_*` environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub target: Option<String>,
    pub env: Option<String>,
    pub out: Option<PathBuf>,
    pub assets: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get_env: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| get_env(key).filter(|v| !v.trim().is_empty());
        Self {
            target: get("APPBUILD_TARGET"),
            env: get("APPBUILD_ENV"),
            out: get("APPBUILD_OUT").map(PathBuf::from),
            assets: get("APPBUILD_ASSETS").map(PathBuf::from),
        }
    }
}

/// Values given on the command line; `None`/`false` means "not given"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOverrides {
    pub target: Option<String>,
    pub env: Option<String>,
    pub out: Option<PathBuf>,
    pub assets: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub scratch: Option<PathBuf>,
    pub index: Option<String>,
    pub skip_compile: bool,
    pub skip_bundle: bool,
    pub verbose: bool,
    pub strip_comments: bool,
}

/// Resolve one application's configuration.
///
/// Priority: command line, then `APPBUILD_*` variables, then the project file,
/// then built-in defaults.
pub fn resolve(
    app: &str,
    cli: &BuildOverrides,
    env: &EnvOverrides,
    project: &ProjectConfig,
    working_dir: &Path,
) -> BuildConfiguration {
    let defaults = &project.build;
    let app = if app.trim().is_empty() { DEFAULT_APP } else { app.trim() };

    let backend = cli
        .target
        .clone()
        .or_else(|| env.target.clone())
        .or_else(|| defaults.target.clone());
    let environment = cli
        .env
        .clone()
        .or_else(|| env.env.clone())
        .or_else(|| defaults.env.clone())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
    let out = cli
        .out
        .clone()
        .or_else(|| env.out.clone())
        .or_else(|| defaults.out.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let assets = cli
        .assets
        .clone()
        .or_else(|| env.assets.clone())
        .or_else(|| project.assets.root.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR));
    let source = cli
        .source
        .clone()
        .or_else(|| defaults.source.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_DIR));
    let scratch = cli
        .scratch
        .clone()
        .or_else(|| defaults.scratch.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRATCH_DIR));
    let index = cli.index.clone().or_else(|| defaults.index.clone());

    let mut config = BuildConfiguration::new(app, working_dir)
        .with_environment(environment)
        .with_output_dir(out)
        .with_assets_dir(assets)
        .with_source(source)
        .with_scratch_dir(scratch)
        .with_verbose(cli.verbose)
        .with_skip_compile(cli.skip_compile)
        .with_skip_bundle(cli.skip_bundle)
        .with_strip_comments(cli.strip_comments || defaults.strip_comments)
        .with_copy_policy(project.assets.policy);

    config.backend = backend;
    config.index = index;
    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "build",
        "target",
        "env",
        "out",
        "source",
        "scratch",
        "index",
        "strip_comments",
        "assets",
        "root",
        "policy",
        "backends",
        "command",
        "args",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
