//! Terminal and JSON presentation for the binary

pub mod context;
pub mod json;
pub mod live_region;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
