//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Async recursive copy, directory clearing, artifact writes
//! - `backends/` - External compiler/bundler adapters and their registry

pub mod backends;
pub mod fs;

// Re-export for convenience
pub use backends::{BackendRegistry, EsbuildBackend, NccBackend, TscBackend, ViteBackend};
pub use fs::{clear_dir, copy_tree, write_artifact, ContentTransform, CopyOptions};
