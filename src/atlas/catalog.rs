//! The catalog of nations recognized by the game.

use std::collections::HashMap;
use std::path::Path;

use itertools::Itertools;

use super::CatalogError;


static BUILTIN: &str = include_str!("../../data/nations.json");

/// Folds a name for case-insensitive comparison.
pub fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Folds a single letter for case-insensitive comparison.
pub fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// The first letter of a name, folded.
pub fn first_letter(name: &str) -> Option<char> {
    name.chars().next().map(fold_char)
}

/// The last letter of a name, folded.
pub fn last_letter(name: &str) -> Option<char> {
    name.chars().next_back().map(fold_char)
}

/// An immutable set of nation names, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Display names, indexed by folded name.
    nations: HashMap<String, String>,
}

impl Catalog {
    /// Loads the catalog bundled with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN)
    }

    /// Loads a catalog from a JSON array of names.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parses a catalog from a JSON array of names.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let names: Vec<String> = serde_json::from_str(json)?;
        Self::from_names(names)
    }

    /// Builds a catalog from a list of names. Blank or repeated names are rejected, so that a
    /// malformed source never yields a partial catalog.
    pub fn from_names<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut nations = HashMap::new();
        for name in names {
            let name: String = name.into();
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::BlankName);
            }
            if let Some(prev) = nations.insert(fold(&name), name) {
                return Err(CatalogError::Duplicate(prev));
            }
        }
        if nations.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { nations })
    }

    /// The number of nations in the catalog.
    pub fn len(&self) -> usize {
        self.nations.len()
    }

    /// Returns true if the name matches a nation, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.nations.contains_key(&fold(name))
    }

    /// Returns every nation that starts with the letter, ignoring case, in alphabetical order.
    pub fn starting_with(&self, letter: char) -> Vec<&str> {
        let letter = fold_char(letter);
        self.nations
            .iter()
            .filter(|(key, _)| first_letter(key) == Some(letter))
            .sorted_unstable_by(|a, b| a.0.cmp(b.0))
            .map(|(_, name)| name.as_str())
            .collect()
    }
}
