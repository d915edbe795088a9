//! Tetris Bot Protocol (TBP) bridge.
//!
//! Messages are single-line JSON objects discriminated by `type`. A bot is a
//! child process: the frontend writes to its stdin and reads its stdout.

pub mod bot;
pub mod error;
pub mod protocol;

pub use bot::{Bot, ProcessBot, QUIT_GRACE};
pub use error::BotError;
pub use protocol::{BotInfo, BotMessage, FrontendMessage, Location, Start, TbpCell, TbpMove};
