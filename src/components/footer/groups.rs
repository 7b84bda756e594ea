use super::types::{FooterGroup, FooterItem};
use crate::app::state::{AppMode, AppState};
use crate::domain::models::Node;

pub fn get_groups(state: &AppState) -> Vec<FooterGroup> {
    if state.last_error.is_some() {
        return vec![FooterGroup {
            name: "ERROR",
            items: vec![FooterItem::new("Esc", "dismiss")],
        }];
    }

    match state.mode {
        AppMode::Normal => {
            let on_command = matches!(state.selected_node(), Some(Node::Command(_)));
            let marking = !state.tree.marked.is_empty();
            vec![
                FooterGroup {
                    name: "NAV",
                    items: vec![
                        FooterItem::new("j/k", "move"),
                        FooterItem::new("Tab", "fold"),
                    ],
                },
                FooterGroup {
                    name: "RUN",
                    items: vec![
                        FooterItem::new("ENTER", if on_command { "run" } else { "open" })
                            .highlighted(on_command),
                        FooterItem::new("y", "copy"),
                    ],
                },
                FooterGroup {
                    name: "EDIT",
                    items: vec![
                        FooterItem::new("a", "add"),
                        FooterItem::new("e", "edit"),
                        FooterItem::new("N", "folder"),
                        FooterItem::new("r", "rename"),
                        FooterItem::new("d", "del"),
                    ],
                },
                FooterGroup {
                    name: "ORDER",
                    items: vec![
                        FooterItem::new("Space", "mark").highlighted(marking),
                        FooterItem::new("m", "grab"),
                        FooterItem::new("M", "to folder"),
                    ],
                },
                FooterGroup {
                    name: "FILE",
                    items: vec![
                        FooterItem::new("E", "export"),
                        FooterItem::new("I", "import"),
                    ],
                },
                FooterGroup {
                    name: "APP",
                    items: vec![
                        FooterItem::new("t", "theme"),
                        FooterItem::new("?", "help"),
                        FooterItem::new("q", "quit"),
                    ],
                },
            ]
        }
        AppMode::Move => vec![
            FooterGroup {
                name: "MOVE",
                items: vec![
                    FooterItem::new("j/k", "target"),
                    FooterItem::new("ENTER", "drop here").highlighted(true),
                    FooterItem::new("R", "drop on root"),
                ],
            },
            FooterGroup {
                name: "APP",
                items: vec![FooterItem::new("Esc", "cancel")],
            },
        ],
        AppMode::Input => vec![FooterGroup {
            name: "INPUT",
            items: vec![
                FooterItem::new("ENTER", "submit"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
        AppMode::Choice => vec![FooterGroup {
            name: "CHOOSE",
            items: vec![
                FooterItem::new("j/k", "select"),
                FooterItem::new("ENTER", "confirm"),
                FooterItem::new("Esc", "cancel"),
            ],
        }],
        AppMode::Help => vec![FooterGroup {
            name: "HELP",
            items: vec![FooterItem::new("Esc/?", "close")],
        }],
    }
}
