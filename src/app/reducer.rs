use super::{
    action::{Action, UpdateResult},
    command::Command,
    features,
    state::AppState,
};
use tracing::trace;

type Feature = fn(&mut AppState, &Action) -> UpdateResult;

const FEATURES: [Feature; 4] = [
    features::navigation::update,
    features::drag::update,
    features::launcher::update,
    features::ui::update,
];

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    for feature in FEATURES {
        if let UpdateResult::Handled(command) = feature(state, &action) {
            return command;
        }
    }
    trace!(?action, "unhandled action");
    None
}
