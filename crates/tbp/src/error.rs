use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("failed to launch bot {}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("bot pipe failed")]
    Io(#[from] io::Error),
    #[error("malformed message from bot: {line}")]
    Json {
        line: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode message for bot")]
    Encode(#[source] serde_json::Error),
    #[error("bot closed its output")]
    Closed,
    #[error("expected {expected} from bot, got {got}")]
    Unexpected {
        expected: &'static str,
        got: &'static str,
    },
    #[error("bot reported an error: {0}")]
    Rejected(String),
    #[error("bot did not answer within {0:?}")]
    Timeout(Duration),
}
