//! Turn validation and the computer's reply.
//!
//! ## Turns
//!
//! The player names a nation. It must be non-empty, not yet used this game, present in the
//! [`Catalog`], and start with the session's required letter. Any failure ends the game, and
//! leaves the session untouched, so that it stands as a record of the finished game until it is
//! explicitly reset.
//!
//! A valid nation is recorded, and the computer looks for an unused nation starting with its last
//! letter. If there are none, the player wins; their nation stays recorded, and its last letter
//! becomes the required letter, which no unused nation can satisfy. Otherwise the computer
//! records its choice, and the last letter of that choice becomes the player's next required
//! letter.

use std::fmt::Display;
use std::sync::Arc;

use super::catalog::{fold_char, last_letter};
use super::{Catalog, Chooser, Session, Violation};


/// The outcome of a valid turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The computer replied, and the game goes on.
    Continue {
        /// The computer's nation.
        computer: String,
        /// The required first letter of the player's next nation, in upper case.
        next_letter: char,
    },
    /// The computer couldn't reply.
    Won,
}

/// A valid turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The player's nation, as submitted.
    pub nation: String,
    /// What happened next.
    pub outcome: Outcome,
}

impl Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.outcome {
            Outcome::Continue { next_letter, .. } => write!(
                f,
                "Your turn! Name a nation starting with \"{next_letter}\"."
            ),
            Outcome::Won => f.write_str("You win! I can't think of a nation."),
        }
    }
}

impl Turn {
    /// Returns true if the turn ended the game.
    pub fn game_over(&self) -> bool {
        matches!(self.outcome, Outcome::Won)
    }

    /// The computer's nation, if it replied.
    pub fn computer(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Continue { computer, .. } => Some(computer),
            Outcome::Won => None,
        }
    }

    /// The required first letter of the player's next nation, if the game goes on.
    pub fn next_letter(&self) -> Option<char> {
        match self.outcome {
            Outcome::Continue { next_letter, .. } => Some(next_letter),
            Outcome::Won => None,
        }
    }
}

/// Referees turns against a catalog, and plays the computer's side.
pub struct Engine {
    catalog: Arc<Catalog>,
    chooser: Box<dyn Chooser + Send>,
}

impl Engine {
    /// Creates a new [`Engine`].
    pub fn new(catalog: Arc<Catalog>, chooser: Box<dyn Chooser + Send>) -> Self {
        Self { catalog, chooser }
    }

    /// Validates the player's nation, and replies with the computer's.
    pub fn submit_turn(&mut self, session: &mut Session, nation: &str) -> Result<Turn, Violation> {
        let nation = self.validate(session, nation)?;
        let letter = last_letter(nation).ok_or(Violation::Empty)?;
        session.push(nation);

        let outcome = match self.choose(session, letter) {
            None => {
                // Every nation with this letter is used, so the player can't go on either.
                session.set_last_letter(letter);
                Outcome::Won
            }
            Some(computer) => {
                let computer = computer.to_string();
                session.push(&computer);
                let next_letter = last_letter(&computer).unwrap_or(letter);
                session.set_last_letter(next_letter);
                Outcome::Continue {
                    computer,
                    next_letter: next_letter.to_ascii_uppercase(),
                }
            }
        };
        Ok(Turn {
            nation: nation.to_string(),
            outcome,
        })
    }

    /// Suggests an unused nation starting with the letter.
    pub fn hint(&mut self, session: &Session, letter: char) -> Option<String> {
        self.choose(session, letter).map(str::to_string)
    }

    /// Checks the player's nation against the rules, returning it trimmed.
    fn validate<'a>(&self, session: &Session, nation: &'a str) -> Result<&'a str, Violation> {
        let nation = nation.trim();
        let Some(first) = nation.chars().next() else {
            return Err(Violation::Empty);
        };
        if session.is_used(nation) {
            return Err(Violation::AlreadyUsed(nation.to_string()));
        }
        if !self.catalog.contains(nation) {
            return Err(Violation::UnknownNation(nation.to_string()));
        }
        if !session.accepts_letter(first) {
            let required = session.last_letter().unwrap_or(first);
            return Err(Violation::WrongLetter(required));
        }
        Ok(nation)
    }

    /// Chooses an unused nation that starts with the letter.
    fn choose(&mut self, session: &Session, letter: char) -> Option<&str> {
        let candidates: Vec<&str> = self
            .catalog
            .starting_with(fold_char(letter))
            .into_iter()
            .filter(|n| !session.is_used(n))
            .collect();
        self.chooser.choose(&candidates)
    }
}
