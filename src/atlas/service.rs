//! The game's request/response surface.
//!
//! [`Atlas`] exposes one method per action a client can take. Replies are serializable, so that a
//! transport can hand them on as-is; failures are [`ServiceError`]s, classified by
//! [`ErrorKind`](`super::error::ErrorKind`).
//!
//! There is a single game session, shared by every caller. Turns and resets hold the session lock
//! from validation until the new session has been saved, so they never interleave. A change to the
//! session is made on a copy, which replaces the live session only once it has been persisted.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::session::STARTING_LETTER;
use super::{
    Catalog, Chooser, Engine, Ledger, Player, RawSession, Registration, Scores, ServiceError,
    Session, Store, StoreError,
};


/// A plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReply {
    pub username: String,
    pub status: Registration,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnReply {
    pub user_nation: String,
    pub computer_nation: Option<String>,
    pub next_letter: Option<char>,
    pub message: String,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintReply {
    pub letter: char,
    pub nation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetReply {
    pub message: String,
    pub last_letter: char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionReply {
    pub used_nations: Vec<String>,
    pub last_letter: Option<char>,
}

/// The body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReply {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
}

impl From<&ServiceError> for ErrorReply {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: err.to_string(),
            game_over: err.game_over().then_some(true),
        }
    }
}

/// The referee and the session it rules on.
struct Table {
    engine: Engine,
    session: Session,
}

/// The nation-chaining game.
pub struct Atlas {
    table: Mutex<Table>,
    ledger: Ledger,
    store: Arc<dyn Store>,
}

impl Atlas {
    /// Creates a new [`Atlas`], resuming the session saved in the store.
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn Store>,
        chooser: Box<dyn Chooser + Send>,
        guest: &str,
    ) -> Result<Self, StoreError> {
        let session = Session::from(store.load_session()?);
        tracing::info!(
            nations = catalog.len(),
            resumed = !session.is_empty(),
            used = session.len(),
            "game ready"
        );
        let table = Table {
            engine: Engine::new(Arc::new(catalog), chooser),
            session,
        };
        Ok(Self {
            table: Mutex::new(table),
            ledger: Ledger::new(store.clone(), guest),
            store,
        })
    }

    fn table(&self) -> MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The guest identity.
    pub fn guest(&self) -> &str {
        self.ledger.guest()
    }

    /// Registers a player.
    pub fn register(&self, username: &str) -> Result<RegisterReply, ServiceError> {
        let status = self.ledger.register(username)?;
        let message = match status {
            Registration::Created => format!("User '{username}' created successfully."),
            Registration::AlreadyExists => format!("User '{username}' already exists."),
            Registration::Guest => "Playing as guest.".to_string(),
        };
        Ok(RegisterReply {
            username: username.to_string(),
            status,
            message,
        })
    }

    /// Plays the player's nation, and the computer's reply.
    pub fn submit_turn(&self, nation: &str) -> Result<TurnReply, ServiceError> {
        let mut table = self.table();
        let Table { engine, session } = &mut *table;
        let mut next = session.clone();
        let turn = engine.submit_turn(&mut next, nation).map_err(|violation| {
            tracing::info!(nation, %violation, "player lost");
            violation
        })?;
        self.store.save_session(&RawSession::from(&next))?;
        *session = next;

        tracing::debug!(
            nation = %turn.nation,
            computer = ?turn.computer(),
            game_over = turn.game_over(),
            "turn played"
        );
        Ok(TurnReply {
            message: turn.to_string(),
            computer_nation: turn.computer().map(str::to_string),
            next_letter: turn.next_letter(),
            game_over: turn.game_over(),
            user_nation: turn.nation,
        })
    }

    /// Records the player's score, if it beats their best.
    pub fn record_score(&self, username: &str, score: u32) -> Result<Ack, ServiceError> {
        self.ledger.record_score(username, score)?;
        Ok(Ack::new("Score saved!"))
    }

    /// Returns the player's best score, or zero if the player is unknown.
    pub fn player_score(&self, username: &str) -> Result<Player, ServiceError> {
        let score = self.ledger.score(username)?;
        Ok(Player::new(username, score))
    }

    /// Returns every player, highest score first.
    pub fn leaderboard(&self) -> Result<Vec<Player>, ServiceError> {
        Ok(self.ledger.leaderboard()?)
    }

    /// Deletes a player.
    pub fn delete_player(&self, username: &str) -> Result<Ack, ServiceError> {
        self.ledger.delete(username)?;
        Ok(Ack::new(format!("User '{username}' has been deleted.")))
    }

    /// Suggests an unused nation starting with the letter.
    pub fn hint(&self, letter: &str) -> Result<HintReply, ServiceError> {
        let mut chars = letter.trim().chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_alphabetic() => c.to_ascii_uppercase(),
            _ => return Err(ServiceError::InvalidLetter(letter.to_string())),
        };
        let mut table = self.table();
        let Table { engine, session } = &mut *table;
        let nation = engine
            .hint(session, letter)
            .ok_or(ServiceError::NoHint(letter))?;
        Ok(HintReply { letter, nation })
    }

    /// Returns the nations played so far, and the letter the next must start with.
    pub fn session(&self) -> SessionReply {
        let table = self.table();
        SessionReply {
            used_nations: table.session.used_nations().to_vec(),
            last_letter: table.session.last_letter(),
        }
    }

    /// Starts a new game. If a player is named, their score is zeroed too; the guest and unknown
    /// players are ignored.
    pub fn reset_session(&self, username: Option<&str>) -> Result<ResetReply, ServiceError> {
        self.reset(username.map_or(Scores::Kept, Scores::Player))?;
        Ok(ResetReply {
            message: format!("Game reset. Start with a nation beginning with '{STARTING_LETTER}'."),
            last_letter: STARTING_LETTER,
        })
    }

    /// Starts a new game, and sets every player's score to zero.
    pub fn reset_all(&self) -> Result<ResetReply, ServiceError> {
        self.reset(Scores::All)?;
        Ok(ResetReply {
            message: format!(
                "Game and scores reset. Start with a nation beginning with '{STARTING_LETTER}'."
            ),
            last_letter: STARTING_LETTER,
        })
    }

    /// Saves a fresh session and the score changes in one write, then commits the session.
    fn reset(&self, scores: Scores<'_>) -> Result<(), ServiceError> {
        let mut table = self.table();
        let mut fresh = table.session.clone();
        fresh.reset();
        self.ledger.reset(&RawSession::from(&fresh), scores)?;
        table.session = fresh;
        Ok(())
    }
}
