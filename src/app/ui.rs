use crate::app::state::{AppMode, AppState};
use crate::components::command_tree::CommandTree;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::ModalManager;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders},
    Frame,
};

pub struct AppLayout {
    pub main: Vec<Rect>,
}

impl AppLayout {
    pub fn header(&self) -> Rect {
        self.main[0]
    }

    pub fn tree(&self) -> Rect {
        self.main[1]
    }

    pub fn footer(&self) -> Rect {
        self.main[2]
    }

    /// The rows area inside the tree border. Mouse hit-testing uses this.
    pub fn tree_inner(&self) -> Rect {
        tree_block().inner(self.tree())
    }
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Tree
            Constraint::Length(1), // Footer
        ])
        .split(area)
        .to_vec();

    AppLayout { main }
}

fn tree_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

pub fn draw(f: &mut Frame, app_state: &mut AppState) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }
    let theme = app_state.theme.clone();
    let layout = get_layout(f.area());

    // --- Header ---
    if layout.header().height > 0 {
        let header = Header {
            state: app_state,
            theme: &theme,
            terminal_width: f.area().width,
        };
        f.render_widget(header, layout.header());
    }

    // --- Command Tree ---
    let tree_area = layout.tree();
    if tree_area.width > 2 && tree_area.height > 2 {
        let (border, title_style, title) = match app_state.mode {
            AppMode::Move => (theme.border_move, theme.header_warn, "MOVING"),
            AppMode::Normal => (theme.border_focus, theme.header_active, "FAVORITE COMMANDS"),
            // A modal has focus.
            _ => (theme.border, theme.header_item, "FAVORITE COMMANDS"),
        };
        let block = tree_block()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!(" {title} "), title_style),
                Span::raw(" "),
            ]))
            .border_style(border);

        let tree = CommandTree {
            rows: &app_state.tree.rows,
            marked: &app_state.tree.marked,
            dragging: app_state.dragging.as_ref(),
            theme: &theme,
        };
        f.render_stateful_widget(tree, block.inner(tree_area), &mut app_state.tree.list_state);
        f.render_widget(block, tree_area);
    }

    // --- Footer ---
    if layout.footer().height > 0 {
        let footer = Footer {
            state: app_state,
            theme: &theme,
        };
        f.render_widget(footer, layout.footer());
    }

    // --- Modals ---
    let modals = ModalManager {
        theme: &theme,
        app_state,
    };
    f.render_widget(modals, f.area());
}
