//! The match loop: two bots, one `VersusGame`, one record per tick.

use std::fmt;
use std::io;

use stadium_core::Move;
use stadium_engine::{IllegalMove, Outcome, Side, Tick, VersusGame};
use stadium_tbp::{Bot, BotError};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, warn};

use crate::config::ArenaConfig;
use crate::record::{PlayerRecord, RecordSink, TickRecord};

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("bot {side:?} failed")]
    Bot {
        side: Side,
        #[source]
        source: BotError,
    },
    #[error("bot {side:?} played an illegal move {mv:?}")]
    IllegalMove {
        side: Side,
        mv: Move,
        #[source]
        source: IllegalMove,
    },
    #[error("could not write match record")]
    Record(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Playing,
    GameOver,
    Finished,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub games: u32,
    pub p1_wins: u32,
    pub p2_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::P1Win => self.p1_wins += 1,
            Outcome::P2Win => self.p2_wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Playing => return,
        }
        self.games += 1;
    }
}

impl fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({} draws, {} games)",
            self.p1_wins, self.p2_wins, self.draws, self.games
        )
    }
}

pub struct Arena<R, W, S> {
    bots: [Bot<R, W>; 2],
    config: ArenaConfig,
    sink: S,
    game: VersusGame,
    phase: Phase,
    scoreboard: Scoreboard,
    match_id: u64,
    move_index: u32,
    /// Whether the bots have been sent `start` for a game not yet stopped.
    running: bool,
}

impl<R, W, S> Arena<R, W, S>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    S: RecordSink,
{
    pub fn new(bots: [Bot<R, W>; 2], config: ArenaConfig, sink: S) -> Self {
        let game = VersusGame::new(config.attack.clone(), config.match_seed(0));
        Self {
            bots,
            config,
            sink,
            game,
            phase: Phase::Setup,
            scoreboard: Scoreboard::default(),
            match_id: 0,
            move_index: 0,
            running: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game(&self) -> &VersusGame {
        &self.game
    }

    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Play until the configured number of games is done, then send `quit`
    /// to both bots.
    pub async fn run(mut self) -> Result<Scoreboard, ArenaError> {
        while self.phase != Phase::Finished {
            self.step().await?;
        }
        self.sink.flush()?;

        // Both bots get their quit even when the first one fails.
        let [one, two] = self.bots;
        let first = one.quit().await;
        let second = two.quit().await;
        first.map_err(|source| ArenaError::Bot { side: Side::One, source })?;
        second.map_err(|source| ArenaError::Bot { side: Side::Two, source })?;
        Ok(self.scoreboard)
    }

    /// Advance the state machine by one phase action.
    pub async fn step(&mut self) -> Result<Phase, ArenaError> {
        self.phase = match self.phase {
            Phase::Setup => self.setup().await?,
            Phase::Playing => self.play_tick().await?,
            Phase::GameOver => self.game_over(),
            Phase::Finished => Phase::Finished,
        };
        Ok(self.phase)
    }

    async fn setup(&mut self) -> Result<Phase, ArenaError> {
        self.game = VersusGame::new(
            self.config.attack.clone(),
            self.config.match_seed(self.match_id),
        );
        self.move_index = 0;
        debug!(match_id = self.match_id, "starting match");

        let running = self.running;
        for side in Side::BOTH {
            let state = self.game.game(side).snapshot();
            let bot = &mut self.bots[side.index()];
            let result = async {
                if running {
                    bot.stop().await?;
                }
                bot.start(&state).await
            }
            .await;
            result.map_err(|source| ArenaError::Bot { side, source })?;
        }
        self.running = true;
        Ok(Phase::Playing)
    }

    async fn play_tick(&mut self) -> Result<Phase, ArenaError> {
        if self.game.outcome().is_over() {
            self.emit_terminal()?;
            return Ok(Phase::GameOver);
        }

        let timeout = self.config.suggest_timeout;
        let [one, two] = &mut self.bots;
        let (first, second) = tokio::join!(one.suggest(timeout), two.suggest(timeout));

        let mut timed_out = [false; 2];
        let mut candidates: [Vec<Move>; 2] = Default::default();
        for (side, result) in Side::BOTH.into_iter().zip([first, second]) {
            match result {
                Ok(moves) => candidates[side.index()] = moves,
                Err(BotError::Timeout(after)) => {
                    warn!(?side, ?after, "bot did not answer suggest in time, forfeiting");
                    timed_out[side.index()] = true;
                }
                Err(source) => return Err(ArenaError::Bot { side, source }),
            }
        }

        match timed_out {
            [true, true] => self.game.abandon(),
            [true, false] => self.game.forfeit(Side::One),
            [false, true] => self.game.forfeit(Side::Two),
            [false, false] => {}
        }
        if self.game.outcome().is_over() {
            return Ok(Phase::Playing);
        }

        if let Some(side) = Side::BOTH
            .into_iter()
            .find(|side| candidates[side.index()].is_empty())
        {
            warn!(?side, match_id = self.match_id, "bot suggested no moves, restarting match");
            return Ok(Phase::Setup);
        }

        let chosen = [candidates[0][0], candidates[1][0]];
        for side in Side::BOTH {
            let mv = chosen[side.index()];
            self.game
                .check_move(side, &mv, self.config.strict)
                .map_err(|source| ArenaError::IllegalMove { side, mv, source })?;
        }

        let mut players = Side::BOTH
            .map(|side| PlayerRecord::before(self.game.game(side), Some(chosen[side.index()])));

        for side in Side::BOTH {
            self.game.set_move(side, Some(chosen[side.index()]));
        }
        let tick = self.game.play_moves();

        for side in Side::BOTH {
            let report = &tick.reports[side.index()];
            let player = &mut players[side.index()];
            player.attack = report.attack;
            player.damage_received = report.damage_received;
            player.spun = report.spun;
        }
        self.sink.record(&TickRecord {
            match_id: self.match_id,
            move_index: self.move_index,
            outcome: Outcome::Playing,
            players,
        })?;
        self.move_index += 1;

        self.sync(&tick, &chosen).await?;

        tokio::time::sleep(self.config.tick_interval()).await;
        Ok(Phase::Playing)
    }

    /// Bring both bots in line with the engine after a tick.
    async fn sync(&mut self, tick: &Tick, chosen: &[Move; 2]) -> Result<(), ArenaError> {
        for side in Side::BOTH {
            let report = &tick.reports[side.index()];
            let game = self.game.game(side);
            let bot = &mut self.bots[side.index()];

            let result = async {
                if report.accepts_garbage {
                    // Garbage moved the stack; hand the bot a fresh view.
                    bot.stop().await?;
                    return bot.start(&game.snapshot()).await;
                }
                let queue = game.queue();
                if report.first_hold {
                    if let Some(&piece) = queue.len().checked_sub(2).and_then(|i| queue.get(i)) {
                        bot.new_piece(piece).await?;
                    }
                }
                if let Some(&piece) = queue.last() {
                    bot.new_piece(piece).await?;
                }
                bot.play(&chosen[side.index()]).await
            }
            .await;
            result.map_err(|source| ArenaError::Bot { side, source })?;
        }
        Ok(())
    }

    fn emit_terminal(&mut self) -> Result<(), ArenaError> {
        let players = Side::BOTH.map(|side| PlayerRecord::before(self.game.game(side), None));
        self.sink.record(&TickRecord {
            match_id: self.match_id,
            move_index: self.move_index,
            outcome: self.game.outcome(),
            players,
        })?;
        self.sink.flush()?;
        Ok(())
    }

    fn game_over(&mut self) -> Phase {
        let outcome = self.game.outcome();
        self.scoreboard.record(outcome);
        info!(
            match_id = self.match_id,
            ?outcome,
            turns = self.game.turn(),
            p1 = self.bots[0].name(),
            p2 = self.bots[1].name(),
            "match over: {}",
            self.scoreboard
        );

        self.match_id += 1;
        self.move_index = 0;
        match self.config.games {
            Some(games) if self.scoreboard.games >= games => Phase::Finished,
            _ => Phase::Setup,
        }
    }
}
