use crate::app::state::PromptState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

/// Single-line prompt: title in the border, hint line, then the text area.
pub struct TextInputModal<'a, 'b> {
    pub theme: &'a Theme,
    pub prompt: &'a PromptState<'b>,
}

impl Widget for TextInputModal<'_, '_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal_area = centered_rect_fixed_height(60, 5, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!(" {} ", self.prompt.title), self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner_area);

        let input_area = Rect {
            x: rows[0].x + 1,
            width: rows[0].width.saturating_sub(2),
            ..rows[0]
        };
        if input_area.width > 0 && input_area.height > 0 {
            Widget::render(&self.prompt.text_area, input_area, buf);
        }

        let hint = Line::from(vec![
            Span::styled(" Enter", self.theme.footer_segment_key),
            Span::styled(" confirm  ", self.theme.dimmed),
            Span::styled("Esc", self.theme.footer_segment_key),
            Span::styled(" cancel", self.theme.dimmed),
        ]);
        if rows[2].height > 0 {
            buf.set_line(rows[2].x, rows[2].y, &hint, rows[2].width);
        }
    }
}
