use crate::app::state::AppState;
use crate::theme::{glyphs, Theme};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a, 'b> {
    pub state: &'a AppState<'b>,
    pub theme: &'a Theme,
    pub terminal_width: u16,
}

impl Widget for Header<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Segment background colors for separator transitions
        let logo_bg = self.theme.header_logo.bg.unwrap_or(Color::Reset);
        let stats_bg = self.theme.header_stats.bg.unwrap_or(Color::Reset);
        let base_bg = self.theme.header.bg.unwrap_or(Color::Reset);

        let sep_logo_stats = Style::default().fg(logo_bg).bg(stats_bg);

        let mut spans = vec![
            Span::styled(" FAVCMD ", self.theme.header_logo),
            Span::styled(glyphs::SEP_RIGHT, sep_logo_stats),
            Span::styled(self.state.stats(), self.theme.header_stats),
        ];

        let trailing_bg = if self.state.active_tasks.is_empty() {
            stats_bg
        } else {
            let busy_bg = self.theme.header_active.bg.unwrap_or(Color::Reset);
            spans.push(Span::styled(
                glyphs::SEP_RIGHT,
                Style::default().fg(stats_bg).bg(busy_bg),
            ));
            spans.push(Span::styled(
                format!(" {} ", self.state.active_tasks.join(", ")),
                self.theme.header_active,
            ));
            busy_bg
        };
        spans.push(Span::styled(
            glyphs::SEP_RIGHT,
            Style::default().fg(trailing_bg).bg(base_bg),
        ));

        // Theme name on the right
        let theme_label = format!(" {} ", self.state.palette_type.label());
        let used: usize = spans.iter().map(Span::width).sum();
        let padding = usize::from(self.terminal_width).saturating_sub(used + theme_label.len());
        spans.push(Span::styled(" ".repeat(padding), self.theme.header));
        spans.push(Span::styled(theme_label, self.theme.header_item));

        Paragraph::new(Line::from(spans))
            .style(self.theme.header)
            .render(area, buf);
    }
}
