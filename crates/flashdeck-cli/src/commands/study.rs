//! The `flashdeck study` command.
//!
//! A line-driven session: each input line is one command, and the card plus
//! the summary line are printed after every command.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;

use flashdeck_core::engine::{CardView, Command, Direction, Snapshot};
use flashdeck_core::model::Mark;
use flashdeck_core::traits::{CatalogSource, KeyValueStore};
use flashdeck_core::{StudyError, StudySession};
use flashdeck_sources::create_source;

use crate::SessionArgs;

const HELP: &str = "\
Commands:
  n, next          next card
  p, prev          previous card
  f, flip          show the other side
  k, known         mark the card as known
  u, unknown       mark the card as unknown
  t, filter        toggle the unknown-only filter
  g, group NAME    toggle a group
  l, list          list groups
  s, stats         show counts
  r, reload        reload the catalog
  h, help          this help
  q, quit          leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Engine(Command),
    List,
    Stats,
    Reload,
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (word, rest) = match s.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (s, ""),
        };

        let action = match word.to_lowercase().as_str() {
            "n" | "next" => Action::Engine(Command::Advance(Direction::Forward)),
            "p" | "prev" => Action::Engine(Command::Advance(Direction::Backward)),
            "f" | "flip" => Action::Engine(Command::Flip),
            "k" | "known" => Action::Engine(Command::Mark(Mark::Known)),
            "u" | "unknown" => Action::Engine(Command::Mark(Mark::Unknown)),
            "t" | "filter" => Action::Engine(Command::ToggleUnknownOnly),
            "g" | "group" if rest.is_empty() => return Err("group name required".into()),
            "g" | "group" => Action::Engine(Command::ToggleGroup(rest.to_string())),
            "l" | "list" => Action::List,
            "s" | "stats" => Action::Stats,
            "r" | "reload" => Action::Reload,
            "h" | "help" | "?" => Action::Help,
            "q" | "quit" | "exit" => Action::Quit,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(action)
    }
}

pub async fn execute(args: SessionArgs, unknown_only: bool) -> Result<()> {
    let config = super::resolve_config(&args)?;
    let source = create_source(&config.catalog)?;
    let mut session = super::open_session(&config, source.as_ref()).await?;

    if unknown_only {
        session.toggle_unknown_only()?;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&mut session, source.as_ref(), stdin.lock(), stdout.lock()).await
}

/// Drive a session from `input` until `quit` or end of input.
pub async fn run<S, R, W>(
    session: &mut StudySession<S>,
    source: &dyn CatalogSource,
    input: R,
    mut out: W,
) -> Result<()>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Type 'h' for help.")?;
    print_snapshot(&mut out, &session.snapshot())?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                writeln!(out, "{e} (type 'h' for help)")?;
                continue;
            }
        };

        match action {
            Action::Engine(command) => match session.execute(command) {
                Ok(snapshot) => print_snapshot(&mut out, &snapshot)?,
                Err(e @ StudyError::UnknownGroup(_)) => writeln!(out, "{e}")?,
                Err(e) => return Err(e.into()),
            },
            Action::List => print_groups(&mut out, &session.snapshot())?,
            Action::Stats => writeln!(out, "{}", session.snapshot().summary)?,
            Action::Reload => match session.reload(source).await {
                Ok(snapshot) => {
                    writeln!(out, "Catalog reloaded.")?;
                    print_snapshot(&mut out, &snapshot)?;
                }
                Err(e) => writeln!(out, "Reload failed: {e:#}")?,
            },
            Action::Help => writeln!(out, "{HELP}")?,
            Action::Quit => break,
        }
    }

    out.flush()?;
    Ok(())
}

/// Render the card part of a snapshot.
pub fn render_card(card: &CardView) -> String {
    match card {
        CardView::Empty => {
            let (front, back) = card.faces();
            format!("  {front} {back}")
        }
        CardView::Card {
            front,
            back,
            highlight,
            flipped,
            position,
            of,
        } => {
            let marker = match highlight.as_str() {
                "known" => " [known]",
                "unknown" => " [unknown]",
                _ => "",
            };
            let face = if *flipped { back } else { front };
            format!("[{}/{}] {face}{marker}", position + 1, of)
        }
    }
}

fn print_snapshot<W: Write>(out: &mut W, snapshot: &Snapshot) -> Result<()> {
    writeln!(out, "{}", render_card(&snapshot.card))?;
    let filter = if snapshot.unknown_only {
        " (unknown only)"
    } else {
        ""
    };
    writeln!(out, "{}{filter}", snapshot.summary)?;
    Ok(())
}

fn print_groups<W: Write>(out: &mut W, snapshot: &Snapshot) -> Result<()> {
    if snapshot.groups.is_empty() {
        writeln!(out, "No groups.")?;
    }
    for option in &snapshot.groups {
        let mark = if option.selected { "x" } else { " " };
        writeln!(out, "[{mark}] {}", option.group)?;
    }
    Ok(())
}
