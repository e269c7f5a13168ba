// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::session::{DeleteOutcome, Session};
use anyhow::{anyhow, Context, Result};

pub fn handle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub
        .get_one::<String>("id")
        .context("Missing expense id")?
        .trim();
    if session.store().get(id).is_none() {
        println!("No expense with id '{}'", id);
        return Ok(());
    }
    let outcome = if sub.get_flag("yes") {
        session.delete_confirmed(id)
    } else {
        session.delete_expense(id)?
    };
    match outcome {
        DeleteOutcome::Deleted => {
            println!("Deleted expense '{}'", id);
            Ok(())
        }
        DeleteOutcome::Cancelled => {
            println!("Kept expense '{}'", id);
            Ok(())
        }
        DeleteOutcome::Declined => Err(anyhow!("Expense '{}' could not be deleted", id)),
        DeleteOutcome::Failed(err) => Err(anyhow!("Error deleting expense: {}", err)),
    }
}
