pub mod weather;

pub use weather::WeatherScreen;
