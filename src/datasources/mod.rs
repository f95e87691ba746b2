pub mod geolocation;
pub mod openweathermap;

pub use geolocation::Geolocator;
pub use openweathermap::OpenWeatherMapClient;
