mod commands;
mod handlers;
mod output;
mod session;

pub use commands::{Cli, Commands};
pub use handlers::{handle_inspect, handle_session, load_config};
pub use output::{frame_row, note_row, preview};
pub use session::Session;
