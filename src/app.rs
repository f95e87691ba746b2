use crate::models::WeatherSnapshot;
use crate::ui::ThemeMode;
use chrono::{DateTime, Local};

/// Side effects requested by state transitions, run by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Geolocate and resolve the current city
    Locate,
    /// Fetch current weather for `city`, tagged with its request number
    FetchWeather { seq: u64, city: String },
}

/// Results delivered back to the main loop by effect tasks.
#[derive(Debug, Clone)]
pub enum AppEvent {
    CityResolved(String),
    WeatherLoaded { seq: u64, snapshot: WeatherSnapshot },
}

/// Search box text with a char-indexed cursor.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    text: String,
    cursor: usize,
}

impl SearchInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        let idx = self.byte_index();
        self.text.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.text.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let idx = self.byte_index();
            self.text.remove(idx);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

pub struct App {
    pub should_quit: bool,

    // Displayed state
    weather: WeatherSnapshot,
    city: String,
    pub search: SearchInput,
    theme: ThemeMode,
    last_updated: Option<DateTime<Local>>,

    // Request sequencing
    next_seq: u64,
    applied_seq: u64,
}

impl App {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            should_quit: false,
            weather: WeatherSnapshot::default(),
            city: String::new(),
            search: SearchInput::default(),
            theme,
            last_updated: None,
            next_seq: 0,
            applied_seq: 0,
        }
    }

    pub fn weather(&self) -> &WeatherSnapshot {
        &self.weather
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Effects to run on startup: an explicit city skips geolocation.
    pub fn start(&mut self, initial_city: Option<&str>) -> Vec<Effect> {
        match initial_city {
            Some(city) => self.set_city(city).into_iter().collect(),
            None => vec![Effect::Locate],
        }
    }

    /// Record a new city name. A non-empty name yields a weather fetch.
    pub fn set_city(&mut self, city: &str) -> Option<Effect> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }
        self.city = city.to_string();
        Some(self.fetch_effect())
    }

    /// Submit the search box. Blank input is ignored and left as typed.
    pub fn submit_search(&mut self) -> Option<Effect> {
        let query = self.search.text().trim().to_string();
        if query.is_empty() {
            return None;
        }
        let effect = self.set_city(&query);
        self.search.clear();
        effect
    }

    /// Apply a fetched snapshot unless a newer request was already applied.
    /// Returns whether the display changed.
    pub fn apply_weather(&mut self, seq: u64, snapshot: WeatherSnapshot) -> bool {
        if seq < self.applied_seq {
            tracing::debug!(
                seq,
                applied = self.applied_seq,
                "discarding stale weather response"
            );
            return false;
        }
        self.applied_seq = seq;
        self.weather = snapshot;
        self.last_updated = Some(Local::now());
        true
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Effect> {
        match event {
            AppEvent::CityResolved(city) => self.set_city(&city),
            AppEvent::WeatherLoaded { seq, snapshot } => {
                self.apply_weather(seq, snapshot);
                None
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
    }

    fn fetch_effect(&mut self) -> Effect {
        self.next_seq += 1;
        Effect::FetchWeather {
            seq: self.next_seq,
            city: self.city.clone(),
        }
    }
}
