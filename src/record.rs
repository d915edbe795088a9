//! Per-tick match records and where they go.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use stadium_core::{Board, Move, Piece};
use stadium_engine::{Game, Outcome};

/// One player's view of a tick: the state the move was chosen in, the move,
/// and what the tick did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Visible rows bottom first, one 10-bit bitmap per row.
    pub board: [u16; Board::VISIBLE_HEIGHT],
    pub current_piece: Piece,
    #[serde(rename = "move")]
    pub mv: Option<Move>,
    pub meter: u32,
    pub attack: u32,
    pub damage_received: u32,
    pub spun: bool,
    pub queue: Vec<Piece>,
    pub hold: Option<Piece>,
}

impl PlayerRecord {
    /// Capture `game` before its move is applied.
    pub fn before(game: &Game, mv: Option<Move>) -> Self {
        Self {
            board: game.board().visible_rows(),
            current_piece: game.current().kind,
            mv,
            meter: game.meter(),
            attack: 0,
            damage_received: 0,
            spun: false,
            queue: game.queue().to_vec(),
            hold: game.hold(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub match_id: u64,
    pub move_index: u32,
    pub outcome: Outcome,
    pub players: [PlayerRecord; 2],
}

pub trait RecordSink {
    fn record(&mut self, record: &TickRecord) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn record(&mut self, record: &TickRecord) -> io::Result<()> {
        (**self).record(record)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

/// Drops everything.
#[derive(Debug, Default)]
pub struct NullSink;

impl RecordSink for NullSink {
    fn record(&mut self, _record: &TickRecord) -> io::Result<()> {
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<TickRecord>,
}

impl RecordSink for MemorySink {
    fn record(&mut self, record: &TickRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn record(&mut self, record: &TickRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
