pub mod gauge;
pub mod input;

pub use gauge::{humidity_gauge, wind_gauge};
pub use input::SearchBox;
