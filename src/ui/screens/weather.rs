use crate::app::App;
use crate::models::WeatherSnapshot;
use crate::ui::components::{humidity_gauge, wind_gauge, SearchBox};
use crate::ui::Theme;
use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const CARD_WIDTH: u16 = 44;

pub struct WeatherScreen<'a> {
    weather: &'a WeatherSnapshot,
    search_text: &'a str,
    search_cursor: usize,
    last_updated: Option<DateTime<Local>>,
    theme: Theme,
}

impl<'a> WeatherScreen<'a> {
    pub fn new(app: &'a App) -> Self {
        Self {
            weather: app.weather(),
            search_text: app.search.text(),
            search_cursor: app.search.cursor(),
            last_updated: app.last_updated(),
            theme: app.theme().theme(),
        }
    }
}

impl Widget for WeatherScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default().style(self.theme.root()).render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(14),   // Weather card
                Constraint::Length(1), // Nav bar
            ])
            .split(area);

        self.render_header(chunks[0], buf);
        self.render_card(chunks[1], buf);
        self.render_nav(chunks[2], buf);
    }
}

impl WeatherScreen<'_> {
    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        Block::default().style(self.theme.header()).render(area, buf);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(16),
                Constraint::Length(34),
                Constraint::Length(22),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled("Weather App", self.theme.title())))
            .style(self.theme.header());
        title.render(
            Rect {
                y: cols[0].y + 1,
                height: 1,
                ..cols[0]
            },
            buf,
        );

        SearchBox::new(self.search_text, self.theme)
            .cursor(self.search_cursor)
            .render(cols[1], buf);

        let updated = self
            .last_updated
            .map(|t| format!("Updated {}", t.format("%H:%M")))
            .unwrap_or_default();
        let right = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(" [^T] ", self.theme.nav_key()),
                Span::styled("Change Theme", self.theme.header()),
            ]),
            Line::from(Span::styled(format!(" {}", updated), self.theme.dim())),
        ])
        .style(self.theme.header());
        right.render(
            Rect {
                y: cols[2].y + 1,
                height: cols[2].height.saturating_sub(1),
                ..cols[2]
            },
            buf,
        );
    }

    fn render_card(&self, area: Rect, buf: &mut Buffer) {
        let [column] = Layout::horizontal([Constraint::Length(CARD_WIDTH)])
            .flex(Flex::Center)
            .areas(area);
        let card_area = Rect {
            y: column.y + 1,
            height: column.height.saturating_sub(1).min(14),
            ..column
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.card())
            .style(self.theme.card());
        let inner = block.inner(card_area);
        block.render(card_area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Icon
                Constraint::Length(1), // Temperature
                Constraint::Length(1), // Location
                Constraint::Length(1),
                Constraint::Length(4), // Humidity and wind
            ])
            .split(inner);

        let art: Vec<Line> = match self.weather.icon {
            Some(icon) => icon
                .art()
                .iter()
                .map(|l| Line::from(Span::styled(*l, self.theme.card_value())))
                .collect(),
            None => Vec::new(),
        };
        Paragraph::new(art)
            .alignment(Alignment::Center)
            .render(rows[0], buf);

        let temp_style = Style::default()
            .bg(self.theme.card_bg)
            .fg(Theme::temp_color(self.weather.temperature))
            .add_modifier(Modifier::BOLD);
        Paragraph::new(Span::styled(
            format!("{}°C", self.weather.temperature),
            temp_style,
        ))
        .alignment(Alignment::Center)
        .render(rows[1], buf);

        Paragraph::new(Span::styled(
            self.weather.location.as_str(),
            self.theme.card(),
        ))
        .alignment(Alignment::Center)
        .render(rows[2], buf);

        let stats = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[4]);
        humidity_gauge(self.weather.humidity, self.theme).render(stats[0], buf);
        wind_gauge(self.weather.wind_speed, self.theme).render(stats[1], buf);
    }

    fn render_nav(&self, area: Rect, buf: &mut Buffer) {
        let nav = Line::from(vec![
            Span::styled("[Enter]", self.theme.nav_key()),
            Span::styled("Search ", self.theme.nav_label()),
            Span::styled("[^T/F2]", self.theme.nav_key()),
            Span::styled("Theme ", self.theme.nav_label()),
            Span::styled("[Esc]", self.theme.nav_key()),
            Span::styled("Quit", self.theme.nav_label()),
        ]);

        Paragraph::new(nav).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConditionIcon;
    use crate::ui::ThemeMode;

    fn render(app: &App) -> Buffer {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        WeatherScreen::new(app).render(area, &mut buf);
        buf
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_snapshot_values() {
        let mut app = App::new(ThemeMode::Dark);
        app.apply_weather(
            1,
            WeatherSnapshot::new(60.0, 21.7, 5.0, "Paris", ConditionIcon::Clear),
        );
        let out = text(&render(&app));

        assert!(out.contains("Weather App"));
        assert!(out.contains("21°C"));
        assert!(out.contains("Paris"));
        assert!(out.contains("60%"));
        assert!(out.contains("5 km/h"));
        assert!(out.contains(".-."));
    }

    #[test]
    fn default_state_shows_zeroes() {
        let app = App::new(ThemeMode::Dark);
        let out = text(&render(&app));
        assert!(out.contains("0°C"));
        assert!(out.contains("0%"));
        assert!(out.contains("0 km/h"));
        assert!(out.contains("Search..."));
        assert!(!out.contains("Updated"));
    }

    #[test]
    fn theme_changes_root_background() {
        let mut app = App::new(ThemeMode::Dark);
        let dark = render(&app);
        app.toggle_theme();
        let light = render(&app);

        assert_eq!(dark[(0, 19)].bg, Theme::DARK.bg);
        assert_eq!(light[(0, 19)].bg, Theme::LIGHT.bg);
        assert_eq!(light[(0, 0)].bg, Theme::LIGHT.header_bg);
    }
}
