pub mod badge;
pub mod icon;
pub mod text;
