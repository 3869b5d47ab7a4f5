//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - A single command with flags; `--name a,b` builds several applications in turn
//! - Flags only override; defaults live in the config layer

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BuildOverrides, DEFAULT_APP};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// appbuild - compile, bundle and ship TypeScript/JavaScript applications
#[derive(Parser, Debug, Default)]
#[command(name = "appbuild")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: appbuild -n api,worker -t esbuild -e staging")]
pub struct Cli {
    /// Application name(s), comma separated
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Backend used to compile (ncc, esbuild, tsc, vite)
    #[arg(short, long, value_name = "ID")]
    pub target: Option<String>,

    /// Assets root holding `common/` and one directory per environment
    #[arg(short, long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Environment tag selecting the asset layer
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Explicit entry file name inside the source directory
    #[arg(short, long, value_name = "FILE")]
    pub index: Option<String>,

    /// Entry file or directory to search for one
    #[arg(short, long, value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Skip the compile stage
    #[arg(short = 'c', long)]
    pub skip_compile: bool,

    /// Skip the bundle stage
    #[arg(short = 'b', long)]
    pub skip_bundle: bool,

    /// Show failure details and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Strip comments into the scratch directory before compiling
    #[arg(long)]
    pub strip_comments: bool,

    /// Scratch directory for stripped sources
    #[arg(long, value_name = "DIR")]
    pub scratch: Option<PathBuf>,

    /// Project file (default: ./appbuild.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Emit NDJSON events instead of the status line
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Disable animations (live status line)
    #[arg(long)]
    pub no_animation: bool,
}

impl Cli {
    /// Application names in the order given; `app` when none
    pub fn app_names(&self) -> Vec<String> {
        let names: Vec<String> = self
            .name
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if names.is_empty() {
            vec![DEFAULT_APP.to_string()]
        } else {
            names
        }
    }

    pub fn to_overrides(&self) -> BuildOverrides {
        BuildOverrides {
            target: self.target.clone(),
            env: self.env.clone(),
            out: self.out.clone(),
            assets: self.assets.clone(),
            source: self.source.clone(),
            scratch: self.scratch.clone(),
            index: self.index.clone(),
            skip_compile: self.skip_compile,
            skip_bundle: self.skip_bundle,
            verbose: self.verbose,
            strip_comments: self.strip_comments,
        }
    }
}
