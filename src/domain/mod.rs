//! Domain Layer
//!
//! Build pipeline vocabulary: stages and their results, merge plans, the
//! backend and reporter ports, and the pure rules shared by every backend
//! (entry resolution, comment stripping).
//!
//! ## Structure
//!
//! - `entities/` - Stage results, compiled output, merge plans
//! - `value_objects/` - Immutable value types (CopyPolicy)
//! - `services/` - Entry resolution and comment stripping
//! - `ports/` - Interface definitions for infrastructure (Backend, Reporter)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
