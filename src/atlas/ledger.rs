//! Player scores.
//!
//! The ledger enforces the rules around identities on top of a [`Store`]: names must be
//! non-empty, and the guest identity is never stored, scored, or deleted. Scores only go up,
//! except when they are zeroed along with a reset of the game.

use std::sync::Arc;

use serde::Serialize;

use super::{LedgerError, Player, RawSession, Scores, Store};


/// The result of registering a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Registration {
    /// A new player was created, with a score of zero.
    Created,
    /// The player was already registered.
    AlreadyExists,
    /// The name is the guest identity, which is never stored.
    Guest,
}

/// A durable mapping from player to best score.
pub struct Ledger {
    store: Arc<dyn Store>,
    guest: String,
}

impl Ledger {
    /// Creates a new [`Ledger`], with the specified guest identity.
    pub fn new<S: Into<String>>(store: Arc<dyn Store>, guest: S) -> Self {
        Self {
            store,
            guest: guest.into(),
        }
    }

    /// The guest identity.
    pub fn guest(&self) -> &str {
        &self.guest
    }

    fn check_name<'a>(&self, username: &'a str) -> Result<&'a str, LedgerError> {
        if username.trim().is_empty() {
            Err(LedgerError::EmptyName)
        } else if username == self.guest {
            Err(LedgerError::Guest(username.to_string()))
        } else {
            Ok(username)
        }
    }

    /// Registers a player. Registering an existing player is a no-op.
    pub fn register(&self, username: &str) -> Result<Registration, LedgerError> {
        let username = match self.check_name(username) {
            Err(LedgerError::Guest(_)) => return Ok(Registration::Guest),
            result => result?,
        };
        if self.store.register(username)? {
            tracing::info!(username, "registered player");
            Ok(Registration::Created)
        } else {
            Ok(Registration::AlreadyExists)
        }
    }

    /// Records a score, keeping the player's best. Returns the player's best score.
    pub fn record_score(&self, username: &str, score: u32) -> Result<u32, LedgerError> {
        let username = self.check_name(username)?;
        let best = self
            .store
            .record_score(username, score)?
            .ok_or_else(|| LedgerError::NotFound(username.to_string()))?;
        tracing::debug!(username, score, best, "recorded score");
        Ok(best)
    }

    /// Returns the player's best score, or zero if the player is unknown.
    pub fn score(&self, username: &str) -> Result<u32, LedgerError> {
        if username == self.guest {
            return Ok(0);
        }
        Ok(self.store.score(username)?.unwrap_or_default())
    }

    /// Returns every player, highest score first.
    pub fn leaderboard(&self) -> Result<Vec<Player>, LedgerError> {
        Ok(self.store.leaderboard()?)
    }

    /// Deletes a player.
    pub fn delete(&self, username: &str) -> Result<(), LedgerError> {
        let username = self.check_name(username)?;
        if self.store.delete(username)? {
            tracing::info!(username, "deleted player");
            Ok(())
        } else {
            Err(LedgerError::NotFound(username.to_string()))
        }
    }

    /// Saves a fresh game session, zeroing the selected scores in the same write. The guest, a
    /// blank name, or an unknown player has no score to zero, so only the session changes.
    pub fn reset(&self, session: &RawSession, scores: Scores<'_>) -> Result<(), LedgerError> {
        let scores = match scores {
            Scores::Player(username) if self.check_name(username).is_err() => Scores::Kept,
            scores => scores,
        };
        self.store.reset(session, scores)?;
        tracing::info!(?scores, "reset game");
        Ok(())
    }
}
