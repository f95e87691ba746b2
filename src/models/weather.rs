use super::icon::ConditionIcon;
use std::fmt;

/// Everything the main panel displays. Replaced whole after each successful fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub humidity: f64,
    /// Degrees Celsius, floored.
    pub temperature: i64,
    pub wind_speed: f64,
    pub location: String,
    pub icon: Option<ConditionIcon>,
}

impl WeatherSnapshot {
    pub fn new(
        humidity: f64,
        temp_c: f64,
        wind_speed: f64,
        location: impl Into<String>,
        icon: ConditionIcon,
    ) -> Self {
        Self {
            humidity,
            temperature: floor_temperature(temp_c),
            wind_speed,
            location: location.into(),
            icon: Some(icon),
        }
    }
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.location)?;
        if let Some(icon) = self.icon {
            writeln!(f, "  {} ({})", icon.label(), icon.asset_path())?;
        }
        writeln!(f, "  Temperature: {}°C", self.temperature)?;
        writeln!(f, "  Humidity:    {}%", self.humidity)?;
        write!(f, "  Wind:        {} km/h", self.wind_speed)
    }
}

pub fn floor_temperature(temp_c: f64) -> i64 {
    temp_c.floor() as i64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
