//! Game session state.
//!
//! A session records the nations named so far, in play order, and the letter that the player's
//! next nation must start with. Every successful turn appends two nations: the player's, then the
//! computer's. A session is never discarded, only [`reset`](`Session::reset`).

use std::collections::HashSet;

use delegate::delegate;
use serde::{Deserialize, Serialize};

use super::catalog::{fold, fold_char};


/// The letter that every game opens with.
pub const STARTING_LETTER: char = 'S';

/// A serializable version of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
    /// Nations in play order.
    pub used_nations: Vec<String>,
    /// The required first letter of the next nation, if any.
    pub last_letter: Option<char>,
}
impl Default for RawSession {
    fn default() -> Self {
        RawSession::from(&Session::default())
    }
}
impl From<&Session> for RawSession {
    fn from(session: &Session) -> Self {
        RawSession {
            used_nations: session.used.clone(),
            last_letter: session.last_letter,
        }
    }
}

/// The state of the game in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Nations in play order.
    used: Vec<String>,
    /// Folded view of `used`, for lookups.
    folded: HashSet<String>,
    /// The required first letter of the player's next nation.
    last_letter: Option<char>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            used: vec![],
            folded: HashSet::new(),
            last_letter: Some(STARTING_LETTER),
        }
    }
}

impl From<RawSession> for Session {
    fn from(raw: RawSession) -> Self {
        let folded = raw.used_nations.iter().map(|n| fold(n)).collect();
        Self {
            used: raw.used_nations,
            folded,
            last_letter: raw.last_letter,
        }
    }
}

impl Session {
    delegate! {
        to self.used {
            /// The number of nations named so far.
            pub fn len(&self) -> usize;
            /// Returns true if no nation has been named.
            pub fn is_empty(&self) -> bool;
        }
    }

    /// Nations named so far, in play order.
    pub fn used_nations(&self) -> &[String] {
        &self.used
    }

    /// The required first letter of the player's next nation, in upper case.
    pub fn last_letter(&self) -> Option<char> {
        self.last_letter.map(|c| c.to_ascii_uppercase())
    }

    /// Returns true if the letter satisfies the required first letter.
    pub fn accepts_letter(&self, letter: char) -> bool {
        match self.last_letter {
            Some(required) => fold_char(required) == fold_char(letter),
            None => true,
        }
    }

    /// Returns true if the nation has already been named, ignoring case.
    pub fn is_used(&self, nation: &str) -> bool {
        self.folded.contains(&fold(nation))
    }

    /// Records a nation as named.
    pub fn push(&mut self, nation: &str) {
        self.folded.insert(fold(nation));
        self.used.push(nation.to_string());
    }

    /// Sets the required first letter of the player's next nation.
    pub fn set_last_letter(&mut self, letter: char) {
        self.last_letter = Some(letter);
    }

    /// Clears the history and restores the starting letter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[cfg(test)]
    /// Returns true if each nation begins with the letter that the one before it ended with, and
    /// the first begins with the starting letter.
    pub fn is_chained(&self) -> bool {
        let mut expect = Some(fold_char(STARTING_LETTER));
        for nation in &self.used {
            if super::catalog::first_letter(nation) != expect {
                return false;
            }
            expect = super::catalog::last_letter(nation);
        }
        true
    }
}
