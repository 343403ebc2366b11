use std::sync::Arc;

use super::*;
use crate::atlas::chooser::First;
use crate::atlas::{Catalog, MemoryStore};

fn atlas() -> Atlas {
    let catalog = Catalog::from_names(["Spain", "Nepal", "Lebanon", "Niger", "Chad"]).unwrap();
    Atlas::new(catalog, Arc::new(MemoryStore::default()), Box::new(First), "Guest").unwrap()
}

fn run(console: &mut Console, atlas: &Atlas, script: &str) -> String {
    let mut out = vec![];
    console.run(atlas, script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse() {
    let cmd = |s: &str| s.parse::<Command>();
    assert_eq!(cmd("Spain"), Ok(Command::Play("Spain".into())));
    assert_eq!(cmd("  South Africa "), Ok(Command::Play("South Africa".into())));
    assert_eq!(cmd("play  Sri Lanka"), Ok(Command::Play("Sri Lanka".into())));
    assert_eq!(cmd("HINT n"), Ok(Command::Hint("n".into())));
    assert_eq!(cmd("score alice 50"), Ok(Command::Score("alice".into(), 50)));
    assert_eq!(
        cmd("score alice fifty"),
        Err(CommandError::InvalidScore("fifty".into()))
    );
    assert_eq!(cmd("score"), Err(CommandError::MissingArgument("score")));
    assert_eq!(cmd("register"), Err(CommandError::MissingArgument("register")));
    assert_eq!(cmd("scores"), Ok(Command::Scores));
    assert_eq!(cmd("reset"), Ok(Command::Reset(None)));
    assert_eq!(cmd("reset  bob "), Ok(Command::Reset(Some("bob".into()))));
    assert_eq!(cmd("reset-all"), Ok(Command::ResetAll));
    assert_eq!(cmd("quit"), Ok(Command::Quit));
}

#[test]
fn test_game() {
    let atlas = atlas();
    let mut console = Console::new(false, false, "Guest".into());
    let out = run(
        &mut console,
        &atlas,
        "register alice\nSpain\nused\nLebanon\nget alice\nquit\nChad\n",
    );
    let expect = "\
Name a nation starting with \"S\". Type 'help' for help.
User 'alice' created successfully.
Computer: Nepal
Your turn! Name a nation starting with \"L\".
Used: Spain, Nepal
Next letter: L
Computer: Niger
Your turn! Name a nation starting with \"R\".
alice: 0
";
    assert_eq!(out, expect);
}

#[test]
fn test_loss_records_streak() {
    let atlas = atlas();
    let mut console = Console::new(false, false, "Guest".into());
    let out = run(&mut console, &atlas, "register bob\nSpain\nChad\nscores\n");
    assert!(out.contains("Error: Must start with \"L\". You lost!"));
    assert!(out.contains("Game over. You named 1 nations."));
    assert!(out.contains("bob"));
    assert_eq!(atlas.player_score("bob").unwrap().score, 1);
}

#[test]
fn test_guest_streak_is_not_recorded() {
    let atlas = atlas();
    let mut console = Console::new(false, false, "Guest".into());
    let out = run(&mut console, &atlas, "Spain\nXyzabc\n");
    assert!(out.contains("is not a valid nation"));
    assert!(!out.contains("cannot be scored"));
    assert!(atlas.leaderboard().unwrap().is_empty());
}

#[test]
fn test_json() {
    let atlas = atlas();
    let mut console = Console::new(false, true, "Guest".into());
    let out = run(&mut console, &atlas, "Spain\nSpain\nhint q\n");
    let lines: Vec<serde_json::Value> = out
        .lines()
        .skip(1)
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![
            serde_json::json!({
                "userNation": "Spain",
                "computerNation": "Nepal",
                "nextLetter": "L",
                "message": "Your turn! Name a nation starting with \"L\".",
                "gameOver": false,
            }),
            serde_json::json!({
                "error": "\"Spain\" has already been used. You lost!",
                "gameOver": true,
            }),
            serde_json::json!({
                "error": "No unused nation starts with \"Q\".",
            }),
        ]
    );
}

#[test]
fn test_reset_player() {
    let atlas = atlas();
    atlas.register("alice").unwrap();
    atlas.register("bob").unwrap();
    atlas.record_score("alice", 4).unwrap();
    atlas.record_score("bob", 6).unwrap();
    let mut console = Console::new(false, false, "Guest".into());
    let out = run(&mut console, &atlas, "Spain\nreset alice\nused\nreset Guest\n");
    assert!(out.contains("Game reset. Start with a nation beginning with 'S'."));
    assert!(out.contains("Used: \nNext letter: S"));
    assert_eq!(atlas.player_score("alice").unwrap().score, 0);
    assert_eq!(atlas.player_score("bob").unwrap().score, 6);
}
