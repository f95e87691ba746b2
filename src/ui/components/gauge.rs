use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Labelled reading with an optional fill bar.
pub struct GaugeWidget<'a> {
    title: &'a str,
    value: f64,
    unit: &'a str,
    range: Option<(f64, f64)>,
    theme: Theme,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: f64, unit: &'a str, theme: Theme) -> Self {
        Self {
            title,
            value,
            unit,
            range: None,
            theme,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(Span::styled(self.title, self.theme.card()))
            .borders(Borders::ALL)
            .border_style(self.theme.card())
            .style(self.theme.card());

        let inner = block.inner(area);
        block.render(area, buf);

        let value_line = Line::from(vec![Span::styled(
            format!("{}{}", self.value, self.unit),
            self.theme.card_value(),
        )]);
        Paragraph::new(value_line).render(inner, buf);

        // Render bar if space allows
        if let Some((min, max)) = self.range {
            if inner.height >= 2 && max > min {
                let bar_area = Rect {
                    x: inner.x,
                    y: inner.y + 1,
                    width: inner.width,
                    height: 1,
                };

                let ratio = ((self.value - min) / (max - min)).clamp(0.0, 1.0);
                let filled = (bar_area.width as f64 * ratio) as u16;

                for x in bar_area.x..bar_area.x + bar_area.width {
                    let ch = if x < bar_area.x + filled {
                        '█'
                    } else {
                        '░'
                    };
                    buf[(x, bar_area.y)].set_char(ch).set_fg(self.theme.card_fg);
                }
            }
        }
    }
}

pub fn humidity_gauge(value: f64, theme: Theme) -> GaugeWidget<'static> {
    GaugeWidget::new("Humidity", value, "%", theme).range(0.0, 100.0)
}

pub fn wind_gauge(value: f64, theme: Theme) -> GaugeWidget<'static> {
    GaugeWidget::new("Wind", value, " km/h", theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: GaugeWidget<'_>, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    fn text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn humidity_shows_percent_and_bar() {
        let buf = rendered(humidity_gauge(60.0, Theme::DARK), Rect::new(0, 0, 12, 4));
        let out = text(&buf);
        assert!(out.contains("60%"));
        // 10 inner cells, 60% filled
        assert_eq!(out.matches('█').count(), 6);
        assert_eq!(out.matches('░').count(), 4);
    }

    #[test]
    fn wind_has_no_bar() {
        let buf = rendered(wind_gauge(5.0, Theme::DARK), Rect::new(0, 0, 14, 4));
        let out = text(&buf);
        assert!(out.contains("5 km/h"));
        assert_eq!(out.matches('█').count(), 0);
    }

    #[test]
    fn too_small_area_renders_nothing() {
        let buf = rendered(wind_gauge(5.0, Theme::DARK), Rect::new(0, 0, 5, 2));
        assert!(text(&buf).trim().is_empty());
    }
}
