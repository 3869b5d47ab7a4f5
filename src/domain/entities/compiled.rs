//! CompiledOutput entity - what a backend hands back after compiling

/// A single compiled file held in memory until it is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    contents: Vec<u8>,
    extension: String,
}

impl Artifact {
    pub fn new(contents: impl Into<Vec<u8>>, extension: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            extension: extension.into(),
        }
    }

    /// JavaScript bundle, the shape every in-memory backend produces
    pub fn javascript(contents: impl Into<Vec<u8>>) -> Self {
        Self::new(contents, "js")
    }

    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// `<app>.<ext>`
    pub fn file_name(&self, app: &str) -> String {
        format!("{}.{}", app, self.extension.trim_start_matches('.'))
    }
}

/// Result shape of a backend compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledOutput {
    /// Backend returned the artifact; the caller clears the output directory and writes it
    InMemory(Artifact),
    /// Backend wrote its output directly to the output directory
    OnDisk,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_file_name_uses_app_and_extension() {
        assert_eq!(Artifact::javascript("x").file_name("svc"), "svc.js");
        assert_eq!(Artifact::new("x", ".mjs").file_name("svc"), "svc.mjs");
    }
}
