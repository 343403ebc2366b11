//! Simple console front end.

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use ansi_term::Colour::{Green, Red, Yellow};
use ansi_term::{ANSIString, ANSIStrings};
use itertools::Itertools;
use serde::Serialize;

use super::service::ErrorReply;
use super::{Atlas, ServiceError};

#[cfg(test)]
mod test;

static HELP: &str = "\
Commands:
  <nation> | play <nation>   name a nation
  hint <letter>              suggest an unused nation
  used                       show the nations played so far
  register <name>            play as a registered player
  score <name> <score>       record a score
  get <name>                 show a player's best score
  scores                     show the leaderboard
  delete <name>              delete a player
  reset [name]               start a new game, and zero the player's score
  reset-all                  start a new game, and zero every score
  help                       show this message
  quit                       leave the game";

/// A line of input from the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(String),
    Hint(String),
    Used,
    Register(String),
    Score(String, u32),
    Get(String),
    Scores,
    Delete(String),
    Reset(Option<String>),
    ResetAll,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid score {0:?}")]
    InvalidScore(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };
        let arg = |name| {
            if rest.is_empty() {
                Err(CommandError::MissingArgument(name))
            } else {
                Ok(rest.to_string())
            }
        };
        Ok(match word.to_lowercase().as_str() {
            "play" => Command::Play(rest.to_string()),
            "hint" => Command::Hint(arg("hint")?),
            "used" => Command::Used,
            "register" => Command::Register(arg("register")?),
            "score" => {
                let (name, score) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or(CommandError::MissingArgument("score"))?;
                let score = score
                    .parse()
                    .map_err(|_| CommandError::InvalidScore(score.to_string()))?;
                Command::Score(name.trim().to_string(), score)
            }
            "get" => Command::Get(arg("get")?),
            "scores" => Command::Scores,
            "delete" => Command::Delete(arg("delete")?),
            "reset" => Command::Reset((!rest.is_empty()).then(|| rest.to_string())),
            "reset-all" => Command::ResetAll,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => Command::Play(s.to_string()),
        })
    }
}

/// Plays the game over a pair of text streams.
pub struct Console {
    color: bool,
    json: bool,
    /// The name scores are recorded under.
    username: String,
    /// Nations named by the player this game.
    streak: u32,
}

impl Console {
    pub fn new(color: bool, json: bool, username: String) -> Self {
        Self {
            color,
            json,
            username,
            streak: 0,
        }
    }

    fn format(&self, s: &ANSIStrings) -> String {
        if self.color {
            s.to_string()
        } else {
            ansi_term::unstyle(s)
        }
    }

    fn paint(&self, s: ANSIString) -> String {
        self.format(&ANSIStrings(&[s]))
    }

    /// Writes a reply, as JSON or as prose.
    fn reply<T, W, D>(&self, out: &mut W, reply: &T, text: D) -> std::io::Result<()>
    where
        T: Serialize,
        W: Write,
        D: Display,
    {
        if self.json {
            serde_json::to_writer(&mut *out, reply)?;
            writeln!(out)
        } else {
            writeln!(out, "{text}")
        }
    }

    fn error<W: Write>(&self, out: &mut W, err: &ServiceError) -> std::io::Result<()> {
        tracing::debug!(kind = ?err.kind(), error = %err, "request failed");
        let text = self.paint(Red.paint(format!("Error: {err}")));
        self.reply(out, &ErrorReply::from(err), text)
    }

    /// Records the player's streak at the end of a game.
    fn game_over<W: Write>(&mut self, atlas: &Atlas, out: &mut W) -> std::io::Result<()> {
        let streak = std::mem::take(&mut self.streak);
        if !self.json {
            writeln!(out, "Game over. You named {streak} nations. Type 'reset' to play again.")?;
        }
        if self.username != atlas.guest() {
            if let Err(err) = atlas.record_score(&self.username, streak) {
                self.error(out, &err)?;
            }
        }
        Ok(())
    }

    /// Runs a single command. Returns false when the player quits.
    pub fn execute<W: Write>(
        &mut self,
        atlas: &Atlas,
        command: Command,
        out: &mut W,
    ) -> std::io::Result<bool> {
        match command {
            Command::Play(nation) => match atlas.submit_turn(&nation) {
                Ok(reply) => {
                    self.streak += 1;
                    let text = match &reply.computer_nation {
                        Some(computer) => format!("Computer: {computer}\n{}", reply.message),
                        None => self.paint(Green.paint(reply.message.as_str())),
                    };
                    self.reply(out, &reply, text)?;
                    if reply.game_over {
                        self.game_over(atlas, out)?;
                    }
                }
                Err(err) => {
                    self.error(out, &err)?;
                    if err.game_over() {
                        self.game_over(atlas, out)?;
                    }
                }
            },
            Command::Hint(letter) => match atlas.hint(&letter) {
                Ok(reply) => {
                    let text = format!("Try {}.", self.paint(Yellow.paint(reply.nation.as_str())));
                    self.reply(out, &reply, text)?;
                }
                Err(err) => self.error(out, &err)?,
            },
            Command::Used => {
                let reply = atlas.session();
                let mut text = format!("Used: {}", reply.used_nations.iter().join(", "));
                if let Some(letter) = reply.last_letter {
                    text.push_str(&format!("\nNext letter: {letter}"));
                }
                self.reply(out, &reply, text)?;
            }
            Command::Register(username) => match atlas.register(&username) {
                Ok(reply) => {
                    self.username = username;
                    self.reply(out, &reply, &reply.message)?;
                }
                Err(err) => self.error(out, &err)?,
            },
            Command::Score(username, score) => match atlas.record_score(&username, score) {
                Ok(reply) => self.reply(out, &reply, &reply.message)?,
                Err(err) => self.error(out, &err)?,
            },
            Command::Get(username) => match atlas.player_score(&username) {
                Ok(reply) => {
                    let text = format!("{}: {}", reply.username, reply.score);
                    self.reply(out, &reply, text)?;
                }
                Err(err) => self.error(out, &err)?,
            },
            Command::Scores => match atlas.leaderboard() {
                Ok(reply) => {
                    let text = reply
                        .iter()
                        .enumerate()
                        .map(|(i, p)| format!("{:>3}. {:<20} {}", i + 1, p.username, p.score))
                        .join("\n");
                    self.reply(out, &reply, text)?;
                }
                Err(err) => self.error(out, &err)?,
            },
            Command::Delete(username) => match atlas.delete_player(&username) {
                Ok(reply) => {
                    if username == self.username {
                        self.username = atlas.guest().to_string();
                    }
                    self.reply(out, &reply, &reply.message)?;
                }
                Err(err) => self.error(out, &err)?,
            },
            Command::Reset(username) => match atlas.reset_session(username.as_deref()) {
                Ok(reply) => {
                    self.streak = 0;
                    self.reply(out, &reply, &reply.message)?;
                }
                Err(err) => self.error(out, &err)?,
            },
            Command::ResetAll => match atlas.reset_all() {
                Ok(reply) => {
                    self.streak = 0;
                    self.reply(out, &reply, &reply.message)?;
                }
                Err(err) => self.error(out, &err)?,
            },
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Reads commands until the input ends or the player quits.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        atlas: &Atlas,
        input: R,
        mut out: W,
    ) -> std::io::Result<()> {
        if let Some(letter) = atlas.session().last_letter {
            writeln!(out, "Name a nation starting with \"{letter}\". Type 'help' for help.")?;
        }
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.execute(atlas, command, &mut out)? {
                        break;
                    }
                }
                Err(err) => writeln!(out, "{}", self.paint(Red.paint(format!("Error: {err}"))))?,
            }
            out.flush()?;
        }
        Ok(())
    }
}
