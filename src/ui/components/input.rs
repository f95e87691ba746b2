use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct SearchBox<'a> {
    value: &'a str,
    cursor_position: usize,
    placeholder: &'a str,
    theme: Theme,
}

impl<'a> SearchBox<'a> {
    pub fn new(value: &'a str, theme: Theme) -> Self {
        Self {
            value,
            cursor_position: value.chars().count(),
            placeholder: "Search...",
            theme,
        }
    }

    pub fn cursor(mut self, position: usize) -> Self {
        self.cursor_position = position;
        self
    }
}

impl Widget for SearchBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = self.theme.border_focused();

        let block = Block::default()
            .title(Span::styled(" Search ", border_style))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(self.theme.header());

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.value.is_empty() {
            Line::from(vec![
                Span::styled(" ", self.theme.selected()),
                Span::styled(self.placeholder, self.theme.dim()),
            ])
        } else {
            let before: String = self.value.chars().take(self.cursor_position).collect();
            let mut after = self.value.chars().skip(self.cursor_position);
            let cursor_char = after.next().unwrap_or(' ');
            let rest: String = after.collect();

            Line::from(vec![
                Span::raw(before),
                Span::styled(cursor_char.to_string(), self.theme.selected()),
                Span::raw(rest),
            ])
        };

        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: SearchBox<'_>) -> String {
        let area = Rect::new(0, 0, 24, 3);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn empty_box_shows_placeholder() {
        assert!(rendered(SearchBox::new("", Theme::DARK)).contains("Search..."));
    }

    #[test]
    fn typed_text_replaces_placeholder() {
        let out = rendered(SearchBox::new("Paris", Theme::DARK));
        assert!(out.contains("Paris"));
        assert!(!out.contains("Search..."));
    }
}
