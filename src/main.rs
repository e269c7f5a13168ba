// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use expensetrack::config::{self, Settings};
use expensetrack::confirm::StdioConfirm;
use expensetrack::session::Session;
use expensetrack::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::from_settings(&settings, Box::new(StdioConfirm));

    match matches.subcommand() {
        Some(("init", _)) => {
            let path = match config_path {
                Some(p) => p,
                None => config::config_path()?,
            };
            if path.exists() {
                println!("Config already exists at {}", path.display());
            } else {
                Settings::default().save_to(&path)?;
                println!("Config written to {}", path.display());
            }
        }
        Some(("add", sub)) => commands::add::handle(&mut session, sub)?,
        Some(("list", sub)) => commands::list::handle(&mut session, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut session, sub)?,
        Some(("delete", sub)) => commands::delete::handle(&mut session, sub)?,
        Some(("export", sub)) => commands::export::handle(&mut session, sub)?,
        Some(("shell", _)) => commands::shell::run(&mut session, || {
            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            Ok(Some(line))
        })?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
