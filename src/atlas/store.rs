//! Durable storage for players and the game session.
//!
//! A [`Store`] is the raw persistence capability behind the [`Ledger`](`super::Ledger`); it knows
//! nothing of guests or validation. Two backends are provided: [`MemoryStore`], which forgets
//! everything when the process exits, and [`JsonStore`], which writes every change through to a
//! JSON file before returning.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use super::{RawSession, StoreError};

#[cfg(test)]
mod test;

/// A player's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub username: String,
    pub score: u32,
}

impl Player {
    /// Creates a new [`Player`].
    pub fn new<S: Into<String>>(username: S, score: u32) -> Self {
        Self {
            username: username.into(),
            score,
        }
    }
}

/// Whose scores are zeroed when the game is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scores<'a> {
    /// No score changes.
    Kept,
    /// Only this player's score is zeroed. An unknown player is ignored.
    Player(&'a str),
    /// Every score is zeroed.
    All,
}

/// Persistence for players and the game session.
pub trait Store: Send + Sync {
    /// Adds a player with a score of zero. Returns false if the player already exists.
    fn register(&self, username: &str) -> Result<bool, StoreError>;

    /// Raises the player's score to `score`, if it is higher. Returns the stored score, or None if
    /// the player doesn't exist.
    fn record_score(&self, username: &str, score: u32) -> Result<Option<u32>, StoreError>;

    /// Returns the player's score, or None if the player doesn't exist.
    fn score(&self, username: &str) -> Result<Option<u32>, StoreError>;

    /// Returns every player, highest score first.
    fn leaderboard(&self) -> Result<Vec<Player>, StoreError>;

    /// Removes a player. Returns false if the player doesn't exist.
    fn delete(&self, username: &str) -> Result<bool, StoreError>;

    /// Replaces the game session and zeroes the selected scores, as a single change.
    fn reset(&self, session: &RawSession, scores: Scores<'_>) -> Result<(), StoreError>;

    /// Returns the saved game session.
    fn load_session(&self) -> Result<RawSession, StoreError>;

    /// Saves the game session.
    fn save_session(&self, session: &RawSession) -> Result<(), StoreError>;
}

/// Everything a store holds, laid out as it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    pub users: Vec<Player>,
    #[serde(flatten)]
    pub session: RawSession,
}

impl Records {
    fn find_mut(&mut self, username: &str) -> Option<&mut Player> {
        self.users.iter_mut().find(|p| p.username == username)
    }

    fn register(&mut self, username: &str) -> bool {
        if self.find_mut(username).is_some() {
            return false;
        }
        self.users.push(Player::new(username, 0));
        true
    }

    fn record_score(&mut self, username: &str, score: u32) -> Option<u32> {
        let player = self.find_mut(username)?;
        player.score = player.score.max(score);
        Some(player.score)
    }

    fn score(&self, username: &str) -> Option<u32> {
        self.users
            .iter()
            .find(|p| p.username == username)
            .map(|p| p.score)
    }

    fn leaderboard(&self) -> Vec<Player> {
        let mut users = self.users.clone();
        users.sort_by(|a, b| b.score.cmp(&a.score));
        users
    }

    fn delete(&mut self, username: &str) -> bool {
        let len = self.users.len();
        self.users.retain(|p| p.username != username);
        self.users.len() != len
    }

    fn reset(&mut self, session: &RawSession, scores: Scores<'_>) {
        self.session = session.clone();
        match scores {
            Scores::Kept => (),
            Scores::Player(username) => {
                if let Some(player) = self.find_mut(username) {
                    player.score = 0;
                }
            }
            Scores::All => {
                for player in &mut self.users {
                    player.score = 0;
                }
            }
        }
    }
}

/// Shared access to a store's [`Records`].
pub trait Backend: Send + Sync {
    /// Reads the records.
    fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T;

    /// Changes the records. The change must be durable before this returns.
    fn write<T>(&self, f: impl FnOnce(&mut Records) -> T) -> Result<T, StoreError>;
}

impl<B: Backend> Store for B {
    fn register(&self, username: &str) -> Result<bool, StoreError> {
        self.write(|r| r.register(username))
    }

    fn record_score(&self, username: &str, score: u32) -> Result<Option<u32>, StoreError> {
        self.write(|r| r.record_score(username, score))
    }

    fn score(&self, username: &str) -> Result<Option<u32>, StoreError> {
        Ok(self.read(|r| r.score(username)))
    }

    fn leaderboard(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.read(Records::leaderboard))
    }

    fn delete(&self, username: &str) -> Result<bool, StoreError> {
        self.write(|r| r.delete(username))
    }

    fn reset(&self, session: &RawSession, scores: Scores<'_>) -> Result<(), StoreError> {
        self.write(|r| r.reset(session, scores))
    }

    fn load_session(&self) -> Result<RawSession, StoreError> {
        Ok(self.read(|r| r.session.clone()))
    }

    fn save_session(&self, session: &RawSession) -> Result<(), StoreError> {
        self.write(|r| r.session = session.clone())
    }
}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore(Mutex<Records>);

impl Backend for MemoryStore {
    fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T {
        let records = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&*records)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Records) -> T) -> Result<T, StoreError> {
        let mut records = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&mut *records))
    }
}

/// A store backed by a JSON file.
///
/// Every change is made to a copy of the records, which is written to a temporary file alongside
/// the target, synced, and renamed into place, and the directory is synced so that the rename
/// survives a crash. Only then is the copy committed in memory, so a failed write leaves both the
/// file and the in-memory records as they were.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    records: Mutex<Records>,
}

impl JsonStore {
    /// Opens the store at `path`. A missing file is treated as an empty store.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "store not found, starting empty");
                Records::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &Records) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let replaced =
            write_synced(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(err) = replaced {
            match fs::remove_file(&tmp) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
                    tracing::warn!(path = %tmp.display(), error = %err, "failed to remove temp file");
                }
                _ => (),
            }
            return Err(io_err(err));
        }
        sync_parent(&self.path).map_err(io_err)
    }
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Syncs the directory holding `path`, which makes a rename into it durable.
fn sync_parent(path: &Path) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    File::open(dir)?.sync_all()
}

impl Backend for JsonStore {
    fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        f(&*records)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Records) -> T) -> Result<T, StoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let mut copy = records.clone();
        let value = f(&mut copy);
        if copy != *records {
            self.persist(&copy).map_err(|err| {
                tracing::error!(path = %self.path.display(), error = %err, "failed to save store");
                err
            })?;
            *records = copy;
        }
        Ok(value)
    }
}
