//! Vite Backend
//!
//! Builds the entry in library mode as a single minified IIFE. The Vite
//! config is generated per run into a temp directory; Vite empties and
//! writes the output directory itself.

use std::ffi::OsString;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::entities::CompiledOutput;
use crate::domain::ports::{Backend, CompileJob};
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::fs::clear_dir;

use super::{require_entry, ToolCommand};

pub const VITE_ID: &str = "vite";

pub struct ViteBackend {
    command: ToolCommand,
}

impl ViteBackend {
    pub fn new() -> Self {
        Self::with_command(ToolCommand::new("vite"))
    }

    pub fn with_command(command: ToolCommand) -> Self {
        Self { command }
    }
}

impl Default for ViteBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `vite.config.mjs` for one application.
pub fn render_config(app: &str, entry: &Path, output_dir: &Path) -> BuildResult<String> {
    let quote = |value: &str| {
        serde_json::to_string(value).map_err(|err| BuildError::Internal(err.to_string()))
    };
    let app = quote(app)?;
    let entry = quote(&entry.to_string_lossy())?;
    let out_dir = quote(&output_dir.to_string_lossy())?;

    Ok(format!(
        r#"export default {{
  logLevel: "silent",
  build: {{
    minify: true,
    sourcemap: false,
    emptyOutDir: true,
    outDir: {out_dir},
    target: "esnext",
    lib: {{
      entry: {entry},
      formats: ["iife"],
      fileName: {app},
      name: {app},
    }},
    rollupOptions: {{
      output: {{
        inlineDynamicImports: true,
      }},
    }},
  }},
}};
"#
    ))
}

#[async_trait]
impl Backend for ViteBackend {
    fn id(&self) -> &str {
        VITE_ID
    }

    async fn compile(&self, job: &CompileJob) -> BuildResult<CompiledOutput> {
        let entry = require_entry(VITE_ID, job)?;
        let scratch = tempfile::Builder::new().prefix("appbuild-vite").tempdir()?;
        let config_path = scratch.path().join("vite.config.mjs");
        tokio::fs::write(&config_path, render_config(&job.app, entry, &job.output_dir)?).await?;

        clear_dir(&job.output_dir).await?;

        let args: Vec<OsString> = vec!["build".into(), "--config".into(), config_path.into()];
        self.command
            .run(VITE_ID, &args, &job.working_dir, &job.environment)
            .await?;

        Ok(CompiledOutput::OnDisk)
    }
}
