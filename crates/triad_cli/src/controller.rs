//! Top-level controller: owns the session and turns text commands into
//! engine calls.
//!
//! The controller plays every view role against the engine's public API:
//! it seats the roster, forwards moves and config changes, and prints the
//! board. It never reaches into engine state directly.

use crate::config::TriadConfig;
use derive_more::{Display, Error};
use std::io::Write;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};
use triad_tictactoe::{
    GameEngine, MoveOutcome, Phase, Player, SessionError, SessionId, SessionManager,
    roster_is_ready,
};

/// A command typed at the prompt or given in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the current player's mark.
    Move {
        /// Row, zero-based.
        row: i64,
        /// Column, zero-based.
        col: i64,
    },
    /// Clear the board, keep the players.
    Reset,
    /// Unseat everyone and seat the roster again.
    NewGame,
    /// Change the board size.
    Size(i64),
    /// Change the win length.
    Win(i64),
    /// Print the board.
    Show,
    /// Leave.
    Quit,
}

/// Error parsing a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// Nothing was typed.
    #[display("empty command")]
    Empty,
    /// The word is not a command.
    #[display("unknown command: {}", _0)]
    Unknown(#[error(not(source))] String),
    /// A number was expected.
    #[display("not a number: {}", _0)]
    BadNumber(#[error(not(source))] String),
}

fn parse_number(token: Option<&str>) -> Result<i64, CommandError> {
    let token = token.ok_or(CommandError::BadNumber(String::new()))?;
    token
        .parse()
        .map_err(|_| CommandError::BadNumber(token.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    /// Parses `r c`, `r,c`, `reset`, `new`, `size N`, `win N`, `show` or `quit`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let normalized = line.replace(',', " ");
        let mut tokens = normalized.split_whitespace();
        let first = tokens.next().ok_or(CommandError::Empty)?;

        match first.to_lowercase().as_str() {
            "reset" => Ok(Command::Reset),
            "new" => Ok(Command::NewGame),
            "show" => Ok(Command::Show),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "size" => Ok(Command::Size(parse_number(tokens.next())?)),
            "win" => Ok(Command::Win(parse_number(tokens.next())?)),
            word if word.starts_with('-') || word.chars().all(|c| c.is_ascii_digit()) => {
                let row = parse_number(Some(first))?;
                let col = parse_number(tokens.next())?;
                Ok(Command::Move { row, col })
            }
            word => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

/// Parses a move script such as `"0,0 1,1 2,2"`.
#[instrument]
pub fn parse_moves(script: &str) -> Result<Vec<(i64, i64)>, CommandError> {
    script
        .split_whitespace()
        .map(|pair| match pair.parse::<Command>()? {
            Command::Move { row, col } => Ok((row, col)),
            _ => Err(CommandError::Unknown(pair.to_string())),
        })
        .collect()
}

/// Error raised by the controller.
#[derive(Debug, Display, Error)]
pub enum ControllerError {
    /// The roster has no seats, an unnamed seat, or two seats sharing an id.
    #[display("every player needs a name and a distinct id before the game can start")]
    RosterNotReady,
    /// The session was torn down underneath the controller.
    #[display("{}", _0)]
    Session(SessionError),
    /// Output could not be written.
    #[display("output failed: {}", _0)]
    Io(std::io::Error),
}

impl From<SessionError> for ControllerError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<std::io::Error> for ControllerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Whether the controller should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep going.
    Continue,
    /// Stop reading.
    Quit,
}

/// Owns one game session for the lifetime of a terminal run.
#[derive(Debug)]
pub struct Controller {
    sessions: SessionManager,
    session: SessionId,
    roster: Vec<Player>,
}

impl Controller {
    /// Opens a session and seats the configured roster.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::RosterNotReady`] if any seat is unnamed or
    /// two seats share an id.
    #[instrument(skip(config))]
    pub fn start(config: &TriadConfig) -> Result<Self, ControllerError> {
        let roster = config.players().clone();
        if !roster_is_ready(&roster) {
            warn!(seats = roster.len(), "Roster not ready");
            return Err(ControllerError::RosterNotReady);
        }

        let mut sessions = SessionManager::new();
        let session = sessions.open(config.game_config());
        sessions.engine_mut(session)?.set_players(roster.clone());
        info!(%session, players = roster.len(), "Game started");

        Ok(Self {
            sessions,
            session,
            roster,
        })
    }

    /// Returns the engine of the active session.
    pub fn engine(&self) -> Result<&GameEngine, ControllerError> {
        Ok(self.sessions.engine(self.session)?)
    }

    fn engine_mut(&mut self) -> Result<&mut GameEngine, ControllerError> {
        Ok(self.sessions.engine_mut(self.session)?)
    }

    /// Applies one command, writing feedback to `out`.
    #[instrument(skip(self, out))]
    pub fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, ControllerError> {
        match command {
            Command::Move { row, col } => {
                let outcome = self.engine_mut()?.make_move(row, col);
                self.report(&outcome, out)?;
            }
            Command::Reset => {
                self.engine_mut()?.reset_game();
                self.show(out)?;
            }
            Command::NewGame => {
                let roster = self.roster.clone();
                let engine = self.engine_mut()?;
                engine.start_new_game();
                engine.set_players(roster);
                self.show(out)?;
            }
            Command::Size(size) => {
                self.engine_mut()?.change_board_size(size);
                self.show(out)?;
            }
            Command::Win(win) => {
                self.engine_mut()?.change_win_condition(win);
                self.show(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn report(&self, outcome: &MoveOutcome, out: &mut impl Write) -> Result<(), ControllerError> {
        match outcome {
            MoveOutcome::Ignored(reason) => {
                debug!(%reason, "Move had no effect");
                writeln!(out, "(ignored: {reason})")?;
            }
            MoveOutcome::Won { winner, .. } => {
                self.show(out)?;
                writeln!(out, "{} wins!", winner.name())?;
            }
            MoveOutcome::Draw => {
                self.show(out)?;
                writeln!(out, "Game ends in a draw!")?;
            }
            MoveOutcome::Continued { .. } => self.show(out)?,
        }
        Ok(())
    }

    /// Prints the board, status line and whose turn it is.
    pub fn show(&self, out: &mut impl Write) -> Result<(), ControllerError> {
        let state = self.engine()?.state();
        write!(out, "{}", state.render())?;
        writeln!(out, "{}", state.status_line())?;
        if state.phase() == Phase::InProgress
            && let Some(player) = state.current_player()
        {
            writeln!(out, "{} ({}) to move", player.name(), player.symbol())?;
        }
        Ok(())
    }

    /// Prints the state as a JSON snapshot.
    pub fn write_json(&self, out: &mut impl Write) -> Result<(), ControllerError> {
        let state = self.engine()?.state();
        serde_json::to_writer_pretty(&mut *out, state).map_err(std::io::Error::from)?;
        writeln!(out)?;
        Ok(())
    }

    /// Tears the session down, returning the final engine.
    #[instrument(skip(self))]
    pub fn finish(mut self) -> Result<GameEngine, ControllerError> {
        Ok(self.sessions.close(self.session)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_config() -> TriadConfig {
        TriadConfig::default()
            .with_board_size(3)
            .with_win_condition(3)
            .with_player_names(&["Ada".into(), "Grace".into()])
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("1 2".parse::<Command>(), Ok(Command::Move { row: 1, col: 2 }));
        assert_eq!("1,2".parse::<Command>(), Ok(Command::Move { row: 1, col: 2 }));
        assert_eq!("-1 0".parse::<Command>(), Ok(Command::Move { row: -1, col: 0 }));
        assert_eq!("SIZE 7".parse::<Command>(), Ok(Command::Size(7)));
        assert_eq!("win 4".parse::<Command>(), Ok(Command::Win(4)));
        assert_eq!("new".parse::<Command>(), Ok(Command::NewGame));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "jump 1".parse::<Command>(),
            Err(CommandError::Unknown("jump".into()))
        );
        assert_eq!(
            "size big".parse::<Command>(),
            Err(CommandError::BadNumber("big".into()))
        );
        assert_eq!("1".parse::<Command>(), Err(CommandError::BadNumber(String::new())));
    }

    #[test]
    fn test_parse_moves_script() {
        assert_eq!(parse_moves("0,0 1,1  2,2"), Ok(vec![(0, 0), (1, 1), (2, 2)]));
        assert!(parse_moves("0,0 reset").is_err());
    }

    #[test]
    fn test_unnamed_roster_refused() {
        let err = Controller::start(&TriadConfig::default()).expect_err("unnamed seats");
        assert!(matches!(err, ControllerError::RosterNotReady));
    }

    #[test]
    fn test_ignored_move_reported() {
        let mut controller = Controller::start(&named_config()).expect("ready roster");
        let mut out = Vec::new();
        controller
            .apply(Command::Move { row: 5, col: 5 }, &mut out)
            .expect("apply");
        assert_eq!(String::from_utf8(out).expect("utf8"), "(ignored: out of bounds)\n");
    }

    #[test]
    fn test_new_game_reseats_roster() {
        let mut controller = Controller::start(&named_config()).expect("ready roster");
        let mut out = Vec::new();
        controller.apply(Command::Move { row: 0, col: 0 }, &mut out).expect("apply");
        controller.apply(Command::NewGame, &mut out).expect("apply");

        let engine = controller.engine().expect("open session");
        assert_eq!(engine.state().players().len(), 2);
        assert_eq!(engine.state().move_count(), 0);
        assert_eq!(engine.phase(), Phase::InProgress);
    }

    #[test]
    fn test_quit_stops() {
        let mut controller = Controller::start(&named_config()).expect("ready roster");
        let flow = controller.apply(Command::Quit, &mut Vec::new()).expect("apply");
        assert_eq!(flow, Flow::Quit);
        assert!(controller.finish().is_ok());
    }
}
