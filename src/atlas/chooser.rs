//! Choosing among eligible nations.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// A source of choices for the computer's move.
pub trait Chooser {
    /// Picks one of the candidates, or None if there are none.
    fn choose<'a>(&mut self, candidates: &[&'a str]) -> Option<&'a str>;
}

/// Chooses uniformly at random.
#[derive(Debug)]
pub struct Random<R>(R);

impl<R: Rng> Chooser for Random<R> {
    fn choose<'a>(&mut self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.choose(&mut self.0).copied()
    }
}

impl Random<StdRng> {
    /// Creates a [`Random`] chooser seeded from the operating system.
    pub fn from_entropy() -> Self {
        Random(StdRng::from_entropy())
    }

    /// Creates a [`Random`] chooser that always makes the same sequence of choices.
    pub fn seeded(seed: u64) -> Self {
        Random(StdRng::seed_from_u64(seed))
    }
}

/// Always chooses the first candidate.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct First;

#[cfg(test)]
impl Chooser for First {
    fn choose<'a>(&mut self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.first().copied()
    }
}
