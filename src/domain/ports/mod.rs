//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure and the binary provide concrete implementations.

pub mod backend;
pub mod reporter;

pub use backend::{Backend, CompileJob, EntryRequest};
pub use reporter::{NoopReporter, Reporter};
