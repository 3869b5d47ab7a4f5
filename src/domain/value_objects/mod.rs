//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod copy_policy;

pub use copy_policy::CopyPolicy;
