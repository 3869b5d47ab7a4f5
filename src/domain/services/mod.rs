//! Domain Services
//!
//! Rules shared by every backend and by the preprocessor.

pub mod comment_stripper;
pub mod entry_resolver;

pub use comment_stripper::{is_script, strip_comments, SCRIPT_EXTENSIONS};
pub use entry_resolver::{entry_candidates, resolve_entry, ENTRY_EXTENSIONS, ENTRY_NAMES};
