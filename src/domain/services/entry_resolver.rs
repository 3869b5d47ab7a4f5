//! Entry resolution
//!
//! Shared lookup for backends that accept a directory:
//! 1. a source path that is already a file is the entry
//! 2. an explicit index name resolves to `<dir>/<index>`
//! 3. otherwise the first existing of `main.ts`, `main.js`, `index.ts`, `index.js`

use std::path::{Path, PathBuf};

use crate::domain::ports::EntryRequest;
use crate::error::{BuildError, BuildResult};

/// Conventional entry file stems, in priority order
pub const ENTRY_NAMES: [&str; 2] = ["main", "index"];

/// Supported entry extensions, in priority order
pub const ENTRY_EXTENSIONS: [&str; 2] = ["ts", "js"];

/// Resolve against the local file system.
pub fn resolve_entry(request: &EntryRequest) -> BuildResult<PathBuf> {
    resolve_entry_with(request, |path| path.is_file())
}

/// Resolve with an injected existence check.
pub fn resolve_entry_with(
    request: &EntryRequest,
    is_file: impl Fn(&Path) -> bool,
) -> BuildResult<PathBuf> {
    let source = &request.source;

    if is_file(source) {
        return Ok(source.clone());
    }

    let not_found = || BuildError::EntryNotFound {
        directory: source.clone(),
    };

    if let Some(index) = &request.index {
        let candidate = source.join(index);
        return if is_file(&candidate) {
            Ok(candidate)
        } else {
            Err(not_found())
        };
    }

    entry_candidates(source)
        .into_iter()
        .find(|candidate| is_file(candidate))
        .ok_or_else(not_found)
}

/// Every conventional entry path under `dir`, in lookup order.
pub fn entry_candidates(dir: &Path) -> Vec<PathBuf> {
    ENTRY_NAMES
        .iter()
        .flat_map(|name| {
            ENTRY_EXTENSIONS
                .iter()
                .map(move |ext| dir.join(format!("{}.{}", name, ext)))
        })
        .collect()
}
