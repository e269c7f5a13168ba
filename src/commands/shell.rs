// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Interactive session. All commands share one store, so expenses added or
//! deleted here live until the shell exits.

use crate::cli::build_shell;
use crate::commands::{add, dashboard, delete, export, list};
use crate::session::Session;
use crate::utils::parse_category;
use anyhow::{bail, Result};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    Continue,
    Quit,
}

/// Reads lines from `next_line` until it returns `None` or the user quits.
pub fn run<F>(session: &mut Session, mut next_line: F) -> Result<()>
where
    F: FnMut() -> Result<Option<String>>,
{
    println!("expensetrack shell. Type 'help' for commands, 'quit' to leave.");
    loop {
        print!("expensetrack> ");
        std::io::stdout().flush()?;
        let Some(line) = next_line()? else {
            break;
        };
        match handle_line(session, &line) {
            Ok(ShellAction::Quit) => break,
            Ok(ShellAction::Continue) => {}
            Err(e) => eprintln!("error: {:#}", e),
        }
    }
    Ok(())
}

pub fn handle_line(session: &mut Session, line: &str) -> Result<ShellAction> {
    let words = split_line(line)?;
    if words.is_empty() {
        return Ok(ShellAction::Continue);
    }
    let shell = build_shell();
    if shell.find_subcommand(&words[0]).is_none() {
        // Anything that is not a command shows the list.
        session.navigate("list");
        list::render(session, None, false, false)?;
        return Ok(ShellAction::Continue);
    }
    let matches = match shell.try_get_matches_from(&words) {
        Ok(m) => m,
        Err(e) => {
            e.print()?;
            return Ok(ShellAction::Continue);
        }
    };
    match matches.subcommand() {
        Some(("add", sub)) => add::handle(session, sub)?,
        Some(("list", sub)) => list::handle(session, sub)?,
        Some(("dashboard", sub)) => dashboard::handle(session, sub)?,
        Some(("delete", sub)) => delete::handle(session, sub)?,
        Some(("export", sub)) => export::handle(session, sub)?,
        Some(("clear", _)) => {
            session.clear_filters();
            list::render(session, None, false, false)?;
        }
        Some(("toggle", sub)) => {
            if let Some(name) = sub.get_one::<String>("category") {
                let category = parse_category(name)?;
                let hidden = session.dashboard_mut().toggle_category(category);
                println!(
                    "{} is now {} in the chart",
                    category,
                    if hidden { "hidden" } else { "shown" }
                );
            }
        }
        Some(("help", _)) => print_help(),
        Some(("quit", _)) => return Ok(ShellAction::Quit),
        _ => {}
    }
    Ok(ShellAction::Continue)
}

fn print_help() {
    for cmd in build_shell().get_subcommands() {
        println!(
            "  {:<10} {}",
            cmd.get_name(),
            cmd.get_about().map(|a| a.to_string()).unwrap_or_default()
        );
    }
}

/// Splits on whitespace; double quotes group words and `\"` is a literal quote.
pub fn split_line(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut cur = String::new();
    let mut in_word = false;
    let mut quoted = false;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' if quoted => match chars.next() {
                Some(next) => cur.push(next),
                None => cur.push('\\'),
            },
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut cur));
                    in_word = false;
                }
            }
            c => {
                cur.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        bail!("Unterminated quote");
    }
    if in_word {
        words.push(cur);
    }
    Ok(words)
}
