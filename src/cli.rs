// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("category")
            .long("category")
            .help("Only this category (Food, Transportation, Housing, ...)"),
    )
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("On or after this date"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("On or before this date (whole day)"),
    )
    .arg(
        Arg::new("search")
            .long("search")
            .help("Case-insensitive text matched against note and category"),
    )
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Pretty JSON output"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("One JSON object per line"),
    )
}

/// Page subcommands shared by the one-shot CLI and the interactive shell.
fn page_commands() -> Vec<Command> {
    vec![
        Command::new("add")
            .about("Record a new expense")
            .arg(
                Arg::new("amount")
                    .long("amount")
                    .allow_negative_numbers(true)
                    .help("e.g. 12.34"),
            )
            .arg(Arg::new("category").long("category"))
            .arg(
                Arg::new("date")
                    .long("date")
                    .value_name("YYYY-MM-DD")
                    .help("Defaults to today"),
            )
            .arg(Arg::new("note").long("note").help("Up to 500 characters")),
        json_args(filter_args(
            Command::new("list")
                .about("List expenses, newest first")
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )),
        json_args(Command::new("dashboard").about("Totals and category breakdown"))
            .arg(
                Arg::new("hide")
                    .long("hide")
                    .action(ArgAction::Append)
                    .help("Leave a category out of the chart"),
            ),
        Command::new("delete")
            .about("Delete an expense by id")
            .arg(Arg::new("id").required(true))
            .arg(
                Arg::new("yes")
                    .long("yes")
                    .short('y')
                    .action(ArgAction::SetTrue)
                    .help("Skip the confirmation prompt"),
            ),
        filter_args(
            Command::new("export")
                .about("Write the filtered expense list to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        ),
    ]
}

pub fn build_cli() -> Command {
    Command::new("expensetrack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Record expenses, filter them, and see where the money goes")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Config file (defaults to the platform config dir)"),
        )
        .subcommand(Command::new("init").about("Write a default config file"))
        .subcommands(page_commands())
        .subcommand(Command::new("shell").about("Interactive session over one in-memory store"))
}

/// Grammar for one line typed into the shell.
pub fn build_shell() -> Command {
    Command::new("expensetrack")
        .multicall(true)
        .subcommand_required(false)
        .disable_help_subcommand(true)
        .subcommands(page_commands())
        .subcommand(Command::new("clear").about("Reset list filters"))
        .subcommand(
            Command::new("toggle")
                .about("Show or hide a category in the dashboard chart")
                .arg(Arg::new("category").required(true)),
        )
        .subcommand(Command::new("help").about("Show commands"))
        .subcommand(Command::new("quit").alias("exit").about("Leave the shell"))
}
