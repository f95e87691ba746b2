pub mod icon;
pub mod weather;

pub use icon::*;
pub use weather::*;
