//! Async bridge to one bot.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use stadium_core::{GameState, Move, Piece};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::error::BotError;
use crate::protocol::{BotInfo, BotMessage, FrontendMessage, Start, TbpMove};

/// How long a spawned bot gets to exit after `quit`.
pub const QUIT_GRACE: Duration = Duration::from_secs(2);

/// A bot running as a child process.
pub type ProcessBot = Bot<ChildStdout, ChildStdin>;

/// One bot connection: a line reader, a line writer and, for spawned bots,
/// the child process itself (killed when the `Bot` is dropped).
pub struct Bot<R, W> {
    reader: Lines<BufReader<R>>,
    writer: W,
    info: BotInfo,
    child: Option<Child>,
    /// Suggest requests whose answer has not been read yet.
    outstanding: usize,
}

impl ProcessBot {
    /// Launch the executable at `path` and wait for its `info` message.
    pub async fn spawn(path: impl AsRef<Path>) -> Result<Self, BotError> {
        let path = path.as_ref();
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| BotError::Spawn {
                path: path.to_path_buf(),
                source,
            })?;
        let stdin = child.stdin.take().ok_or(BotError::Closed)?;
        let stdout = child.stdout.take().ok_or(BotError::Closed)?;

        let mut bot = Self::connect(stdout, stdin).await?;
        bot.child = Some(child);
        Ok(bot)
    }
}

impl<R, W> Bot<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wrap an already-open pair of pipes. Blocks until the bot introduces
    /// itself with `info`.
    pub async fn connect(reader: R, writer: W) -> Result<Self, BotError> {
        let mut reader = BufReader::new(reader).lines();
        let info = match read_message(&mut reader, "?").await? {
            BotMessage::Info(info) => info,
            BotMessage::Error { reason } => return Err(BotError::Rejected(reason)),
            other => {
                return Err(BotError::Unexpected {
                    expected: "info",
                    got: other.kind(),
                })
            }
        };
        info!(
            name = %info.name,
            version = %info.version,
            author = %info.author,
            "bot connected"
        );
        Ok(Self {
            reader,
            writer,
            info,
            child: None,
            outstanding: 0,
        })
    }

    pub fn info(&self) -> &BotInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Write one message as a single line and flush.
    pub async fn send(&mut self, msg: &FrontendMessage) -> Result<(), BotError> {
        let line = serde_json::to_string(msg).map_err(BotError::Encode)?;
        debug!(bot = %self.info.name, "-> {line}");
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Read the next message. Cancel safe: a dropped call loses no input.
    pub async fn receive(&mut self) -> Result<BotMessage, BotError> {
        read_message(&mut self.reader, &self.info.name).await
    }

    /// Begin a game. Suggest requests from an earlier game are forgotten.
    pub async fn start(&mut self, state: &GameState) -> Result<(), BotError> {
        self.outstanding = 0;
        self.send(&FrontendMessage::Start(Start::from_state(state)))
            .await
    }

    /// Ask for a move and wait up to `timeout` for the candidates, most
    /// preferred first. Answers to earlier requests that timed out are
    /// skipped.
    pub async fn suggest(&mut self, timeout: Duration) -> Result<Vec<Move>, BotError> {
        self.send(&FrontendMessage::Suggest).await?;
        self.outstanding += 1;

        let moves = tokio::time::timeout(timeout, self.await_suggestion())
            .await
            .map_err(|_| BotError::Timeout(timeout))??;
        Ok(moves.into_iter().map(Move::from).collect())
    }

    async fn await_suggestion(&mut self) -> Result<Vec<TbpMove>, BotError> {
        loop {
            match self.receive().await? {
                BotMessage::Suggestion { moves } => {
                    self.outstanding -= 1;
                    if self.outstanding == 0 {
                        return Ok(moves);
                    }
                    warn!(bot = %self.info.name, "dropping late suggestion");
                }
                BotMessage::Error { reason } => {
                    self.outstanding -= 1;
                    return Err(BotError::Rejected(reason));
                }
                other => {
                    return Err(BotError::Unexpected {
                        expected: "suggestion",
                        got: other.kind(),
                    })
                }
            }
        }
    }

    pub async fn play(&mut self, mv: &Move) -> Result<(), BotError> {
        self.send(&FrontendMessage::Play { mv: mv.into() }).await
    }

    pub async fn new_piece(&mut self, piece: Piece) -> Result<(), BotError> {
        self.send(&FrontendMessage::NewPiece { piece }).await
    }

    /// End the current game. A bot is not required to answer a suggest
    /// request it was still working on, so none are waited for afterwards.
    pub async fn stop(&mut self) -> Result<(), BotError> {
        self.outstanding = 0;
        self.send(&FrontendMessage::Stop).await
    }

    /// Tell the bot to exit and, for a spawned bot, wait up to
    /// [`QUIT_GRACE`] before killing it.
    pub async fn quit(self) -> Result<(), BotError> {
        self.quit_within(QUIT_GRACE).await
    }

    pub async fn quit_within(mut self, grace: Duration) -> Result<(), BotError> {
        let sent = match self.send(&FrontendMessage::Quit).await {
            Ok(()) => self.writer.shutdown().await.map_err(BotError::from),
            Err(err) => Err(err),
        };
        if let Some(mut child) = self.child.take() {
            match tokio::time::timeout(grace, child.wait()).await {
                Ok(status) => {
                    let status = status?;
                    debug!(bot = %self.info.name, %status, "bot exited");
                }
                Err(_) => {
                    warn!(bot = %self.info.name, ?grace, "bot ignored quit, killing it");
                    child.kill().await?;
                }
            }
        }
        sent
    }
}

async fn read_message<R>(
    reader: &mut Lines<BufReader<R>>,
    bot: &str,
) -> Result<BotMessage, BotError>
where
    R: AsyncRead + Unpin,
{
    loop {
        let line = reader.next_line().await?.ok_or(BotError::Closed)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        debug!(bot, "<- {line}");
        return serde_json::from_str(line).map_err(|source| BotError::Json {
            line: line.to_string(),
            source,
        });
    }
}
