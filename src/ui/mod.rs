pub mod components;
pub mod screens;
pub mod theme;

pub use theme::{Theme, ThemeMode};
