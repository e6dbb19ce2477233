//! Print the word slots of a lyric file, for authoring chord files by hand.
//!
//! Usage: cargo run --bin dump_tokens -- song.txt [--template]
//!
//! Each line shows `line:token` and the word. With `--template`, prints a
//! chord file with an empty chord for every word instead.

use anyhow::{Context, Result};

use chordsheet::source::load_sheet;
use chordsheet::lyrics::{split_lines, tokenize, word_slots, TokenKind};
use chordsheet::types::ChordEntry;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let template = args.iter().any(|a| a == "--template");
    let path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .context("Usage: dump_tokens FILE [--template]")?;

    let sheet = load_sheet(std::path::Path::new(path))?;

    if template {
        let entries: Vec<ChordEntry> = word_slots(&sheet.lyrics)
            .into_iter()
            .map(|slot| ChordEntry {
                line: slot.index.line,
                token: slot.index.token,
                chord: String::new(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("=== {} ===", sheet.title);
    for (li, line) in split_lines(&sheet.lyrics).into_iter().enumerate() {
        println!("{li:>3} | {line}");
        for (ti, token) in tokenize(line).iter().enumerate() {
            if token.kind == TokenKind::Word {
                println!("      {li}:{ti:<4} {}", token.text);
            }
        }
    }
    Ok(())
}
