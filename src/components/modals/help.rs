use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            (" j / \u{2193}", "Select next row"),
            (" k / \u{2191}", "Select previous row"),
            (" Tab", "Collapse / expand folder"),
            (" Wheel", "Scroll the tree"),
        ],
    ),
    (
        "Commands",
        &[
            (" Enter", "Run command / toggle folder"),
            (" y", "Copy command to clipboard"),
            (" a", "Add command to folder"),
            (" e", "Edit command"),
            (" d", "Delete folder or command"),
            (" M", "Move command to another folder"),
        ],
    ),
    (
        "Folders",
        &[
            (" N", "New folder"),
            (" r", "Rename folder"),
        ],
    ),
    (
        "Reordering",
        &[
            (" Space", "Mark row for moving"),
            (" m", "Pick up marked or selected rows"),
            (" Enter", "Drop on selected row (while moving)"),
            (" R", "Drop on root (while moving)"),
            (" Mouse", "Drag a row onto another row"),
        ],
    ),
    (
        "General",
        &[
            (" E / I", "Export / import JSON"),
            (" F5", "Reload from disk"),
            (" t", "Cycle theme"),
            (" ?", "Show this help"),
            (" Esc", "Cancel / dismiss error"),
            (" q", "Quit"),
        ],
    ),
];

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }
        draw_drop_shadow(buf, help_area, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" HELP - KEYBINDINGS ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let key_style = self.theme.footer_segment_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;

        let mut rows = Vec::new();
        for (i, (category, bindings)) in SECTIONS.iter().enumerate() {
            if i > 0 {
                rows.push(Row::new(vec![Cell::from(""), Cell::from("")]));
            }
            rows.push(Row::new(vec![
                Cell::from(Span::styled(*category, category_style)),
                Cell::from(""),
            ]));
            for (key, desc) in *bindings {
                rows.push(Row::new(vec![
                    Cell::from(Span::styled(*key, key_style)),
                    Cell::from(Span::styled(*desc, desc_style)),
                ]));
            }
        }

        let table = Table::new(
            rows,
            [Constraint::Percentage(30), Constraint::Percentage(70)],
        )
        .block(block);

        table.render(help_area, buf);
    }
}
