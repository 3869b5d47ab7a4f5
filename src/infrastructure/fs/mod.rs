//! File System Implementations
//!
//! Every operation here is async: each read and write is a suspension point
//! on the pipeline's single thread of control.

mod artifact;
mod clean;
mod copy;

pub use artifact::write_artifact;
pub use clean::clear_dir;
pub use copy::{copy_tree, ContentTransform, CopyOptions};
