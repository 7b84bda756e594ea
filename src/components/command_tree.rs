use crate::domain::models::Node;
use crate::domain::tree::TreeRow;
use crate::theme::{glyphs, Theme};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget},
};
use std::collections::HashSet;

/// The folder/command tree. Every row is exactly one line tall, which mouse
/// hit-testing relies on.
pub struct CommandTree<'a> {
    pub rows: &'a [TreeRow],
    pub marked: &'a HashSet<usize>,
    pub dragging: Option<&'a Node>,
    pub theme: &'a Theme,
}

impl CommandTree<'_> {
    fn row_line(&self, index: usize, row: &TreeRow) -> Line<'static> {
        let theme = self.theme;
        let mark = if self.marked.contains(&index) {
            Span::styled(format!("{} ", glyphs::MARK), theme.marked)
        } else {
            Span::raw("  ")
        };

        let mut spans = vec![mark];
        match &row.node {
            Node::Folder(folder) => {
                let glyph = if row.expanded {
                    glyphs::FOLDER_OPEN
                } else {
                    glyphs::FOLDER_CLOSED
                };
                let style = if folder.is_default {
                    theme.folder_default
                } else {
                    theme.folder
                };
                spans.push(Span::styled(format!("{glyph} {}", folder.name), style));
                spans.push(Span::styled(
                    format!(" ({})", folder.commands.len()),
                    theme.folder_count,
                ));
            }
            Node::Command(cmd) => {
                let indent = "  ".repeat(usize::from(row.depth));
                spans.push(Span::styled(
                    format!("{indent}{} {}", glyphs::COMMAND, cmd.label),
                    theme.command_label,
                ));
                spans.push(Span::styled(format!("  {}", cmd.command), theme.command_text));
            }
        }

        if self.dragging == Some(&row.node) {
            spans.push(Span::styled(format!(" {} ", glyphs::CARRY), theme.carried));
        }
        Line::from(spans)
    }
}

impl StatefulWidget for CommandTree<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            let hint = Line::from(Span::styled("No folders yet. Press N to add one.", self.theme.dimmed));
            buf.set_line(area.x + 1, area.y, &hint, area.width.saturating_sub(1));
            return;
        }

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let item = ListItem::new(self.row_line(i, row));
                if self.dragging == Some(&row.node) {
                    item.style(self.theme.carried)
                } else {
                    item.style(self.theme.list_item)
                }
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.list_selected);
        StatefulWidget::render(list, area, buf, state);
    }
}
