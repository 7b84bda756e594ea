pub const FOLDER_OPEN: &str = "▾";
pub const FOLDER_CLOSED: &str = "▸";
pub const COMMAND: &str = "›";
pub const MARK: &str = "●";
pub const CARRY: &str = "⇅";
pub const SEP_RIGHT: &str = "";
