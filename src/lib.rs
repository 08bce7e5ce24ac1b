pub mod board;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod snapshot;
pub mod view;
pub mod warnings;

pub use board::Board;
pub use config::BoardConfig;
pub use error::{BoardError, Result};
pub use view::Surface;
