//! Common test utilities for appbuild CLI tests.
//!
//! - `TestProject`: isolated project directory with sources and asset layers
//! - `run`: invoke the binary with a scrubbed environment

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// `src/main.ts` plus `assets/common` and `assets/production`
    pub fn with_sources_and_assets() -> Self {
        let project = Self::new();
        project.write("src/main.ts", "// entry point\nconsole.log('hi');\n");
        project.write("assets/common/config.json", "{\"env\":\"common\"}");
        project.write("assets/common/img/logo.svg", "<svg/>");
        project.write("assets/production/config.json", "{\"env\":\"production\"}");
        project.write("assets/staging/config.json", "{\"env\":\"staging\"}");
        project
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) {
        let path = self.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.join(rel)).unwrap()
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_appbuild"));
        cmd.current_dir(self.path())
            .env_remove("APPBUILD_TARGET")
            .env_remove("APPBUILD_ENV")
            .env_remove("APPBUILD_OUT")
            .env_remove("APPBUILD_ASSETS")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
