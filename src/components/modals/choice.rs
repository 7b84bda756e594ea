use crate::app::state::ChoiceState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
};

use super::helpers::{centered_rect_fixed_height, draw_drop_shadow};

/// Quick-pick list: confirmations and the move-to-folder picker.
pub struct ChoiceModal<'a> {
    pub theme: &'a Theme,
    pub state: &'a ChoiceState,
}

impl Widget for ChoiceModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let option_rows = u16::try_from(self.state.options.len()).unwrap_or(u16::MAX);
        let height = option_rows.saturating_add(5);
        let modal_area = centered_rect_fixed_height(60, height, area);
        if modal_area.width == 0 || modal_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, modal_area, area);
        Clear.render(modal_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);
        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner_area);

        Paragraph::new(Line::from(Span::styled(
            self.state.prompt.as_str(),
            self.theme.header_item,
        )))
        .wrap(Wrap { trim: true })
        .render(rows[0], buf);

        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                if i == self.state.selected {
                    ListItem::new(format!("> {option}")).style(self.theme.list_selected)
                } else {
                    ListItem::new(format!("  {option}")).style(self.theme.list_item)
                }
            })
            .collect();
        List::new(items).render(rows[1], buf);
    }
}
