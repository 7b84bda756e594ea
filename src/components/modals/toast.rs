use crate::app::state::{ErrorSeverity, ErrorState};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::helpers::bottom_right_rect;

/// Non-blocking error notification. Expires on its own; `Esc` dismisses it.
pub struct ErrorToast<'a> {
    pub theme: &'a Theme,
    pub error: &'a ErrorState,
}

impl Widget for ErrorToast<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_text, title_style) = match self.error.severity {
            ErrorSeverity::Info => (" INFO ", self.theme.header_item),
            ErrorSeverity::Warning => (" WARNING ", self.theme.header_warn),
            ErrorSeverity::Error => (" ERROR ", self.theme.status_error),
        };
        let timestamp = self.error.timestamp.format("%H:%M:%S").to_string();

        let mut lines = vec![Line::from(Span::styled(
            self.error.message.as_str(),
            self.theme.toast,
        ))];
        for suggestion in &self.error.suggestions {
            lines.push(Line::from(vec![
                Span::styled("• ", self.theme.header_item),
                Span::styled(suggestion.as_str(), self.theme.footer_segment_key),
            ]));
        }

        let width = area.width.saturating_sub(2).min(50);
        let text_width = usize::from(width.saturating_sub(2)).max(1);
        // Rough wrap estimate so long messages get room.
        let body_rows: usize = lines
            .iter()
            .map(|l| l.width().div_ceil(text_width).max(1))
            .sum();
        let height = u16::try_from(body_rows + 2).unwrap_or(u16::MAX);

        let toast_area = bottom_right_rect(width, height, area);
        if toast_area.width < 3 || toast_area.height < 3 {
            return;
        }
        Clear.render(toast_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(title_text, title_style),
                Span::styled(format!(" {timestamp} "), self.theme.dimmed),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(title_style)
            .style(self.theme.toast);

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(block)
            .render(toast_area, buf);
    }
}
