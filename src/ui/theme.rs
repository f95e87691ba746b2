use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            ThemeMode::Dark => Theme::DARK,
            ThemeMode::Light => Theme::LIGHT,
        }
    }
}

/// Palette tokens for the root container, header and weather card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub header_bg: Color,
    pub card_bg: Color,
    pub card_fg: Color,
}

impl Theme {
    pub const DARK: Theme = Theme {
        bg: Color::Black,
        fg: Color::White,
        dim: Color::DarkGray,
        accent: Color::Cyan,
        header_bg: Color::Rgb(31, 41, 55),
        card_bg: Color::Rgb(6, 95, 70),
        card_fg: Color::White,
    };

    pub const LIGHT: Theme = Theme {
        bg: Color::White,
        fg: Color::Black,
        dim: Color::Gray,
        accent: Color::Blue,
        header_bg: Color::Rgb(243, 244, 246),
        card_bg: Color::Rgb(16, 185, 129),
        card_fg: Color::Rgb(31, 41, 55),
    };

    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;

    // Styles
    pub fn root(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn header(&self) -> Style {
        Style::default().bg(self.header_bg).fg(self.fg)
    }

    pub fn title(&self) -> Style {
        self.header().add_modifier(Modifier::BOLD)
    }

    pub fn card(&self) -> Style {
        Style::default().bg(self.card_bg).fg(self.card_fg)
    }

    pub fn card_value(&self) -> Style {
        self.card().add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_key(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn temp_color(temp_c: i64) -> Color {
        if temp_c < 5 {
            Self::TEMP_COLD
        } else if temp_c < 15 {
            Self::TEMP_COOL
        } else if temp_c < 27 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }
}
