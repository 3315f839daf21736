//! Game sessions: explicit handles to engine instances.
//!
//! A session is opened before any view reads or mutates game state and
//! torn down when play ends. Looking up a session that was never opened, or
//! has been closed, fails with [`SessionErrorKind::ContextUnavailable`].

use crate::config::GameConfig;
use crate::engine::GameEngine;
use derive_more::{Display, Error};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Identifier of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("session-{}", _0)]
pub struct SessionId(u64);

/// What went wrong with a session lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionErrorKind {
    /// The session is not open: state was read outside a session.
    #[display("{} is not open", _0)]
    ContextUnavailable(SessionId),
}

/// Session error with location tracking.
///
/// Signals a programming error in the caller, never a gameplay condition.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Session error: {} at {}:{}", kind, file, line)]
pub struct SessionError {
    /// What went wrong.
    pub kind: SessionErrorKind,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`SessionErrorKind::ContextUnavailable`] error.
    #[track_caller]
    pub fn context_unavailable(session: SessionId) -> Self {
        Self::new(SessionErrorKind::ContextUnavailable(session))
    }
}

/// One game session: an engine owned by exactly one controller.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    engine: GameEngine,
}

impl GameSession {
    /// Returns the session ID.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the engine for reading state.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Returns the engine for mutation.
    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    /// Ends the session, returning the engine.
    pub fn into_engine(self) -> GameEngine {
        self.engine
    }
}

/// Registry of open sessions.
///
/// Single-threaded: callers hold it by `&mut` and every call completes
/// before the next begins.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: HashMap<SessionId, GameSession>,
    next_id: u64,
}

impl SessionManager {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session with a fresh engine in setup.
    #[instrument(skip(self))]
    pub fn open(&mut self, config: GameConfig) -> SessionId {
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.sessions.insert(
            id,
            GameSession {
                id,
                engine: GameEngine::new(config),
            },
        );
        info!(session = %id, "Session opened");
        id
    }

    /// Tears down a session, returning its engine.
    #[instrument(skip(self))]
    pub fn close(&mut self, id: SessionId) -> Result<GameEngine, SessionError> {
        let session = self.sessions.remove(&id).ok_or_else(|| {
            warn!(session = %id, "Close requested for a session that is not open");
            SessionError::context_unavailable(id)
        })?;
        info!(session = %id, "Session closed");
        Ok(session.into_engine())
    }

    /// Gets an open session.
    #[instrument(skip(self))]
    pub fn session(&self, id: SessionId) -> Result<&GameSession, SessionError> {
        self.sessions.get(&id).ok_or_else(|| {
            debug!(session = %id, "Session not found");
            SessionError::context_unavailable(id)
        })
    }

    /// Gets an open session for mutation.
    #[instrument(skip(self))]
    pub fn session_mut(&mut self, id: SessionId) -> Result<&mut GameSession, SessionError> {
        self.sessions.get_mut(&id).ok_or_else(|| {
            debug!(session = %id, "Session not found");
            SessionError::context_unavailable(id)
        })
    }

    /// Gets the engine of an open session.
    pub fn engine(&self, id: SessionId) -> Result<&GameEngine, SessionError> {
        self.session(id).map(GameSession::engine)
    }

    /// Gets the engine of an open session for mutation.
    pub fn engine_mut(&mut self, id: SessionId) -> Result<&mut GameEngine, SessionError> {
        self.session_mut(id).map(GameSession::engine_mut)
    }

    /// Returns true if the session is open.
    pub fn is_open(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Lists open session IDs in the order they were opened.
    pub fn list(&self) -> Vec<SessionId> {
        let mut ids: Vec<_> = self.sessions.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Returns the number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no session is open.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
