// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::list;
use crate::session::{Session, SubmitOutcome};
use crate::utils::fmt_money;
use crate::validation::Field;
use anyhow::{anyhow, Result};

pub fn handle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    session.navigate("add");
    fill_form(session, sub);
    match session.submit_expense() {
        SubmitOutcome::Created(e) => {
            println!(
                "Recorded {} for {} on {} (id: {})",
                fmt_money(&e.amount, session.currency()),
                e.category,
                e.date,
                e.id
            );
            list::render(session, None, false, false)
        }
        SubmitOutcome::Invalid(errors) => {
            for (field, msg) in &errors {
                eprintln!("  {}: {}", field, msg);
            }
            Err(anyhow!("Expense not saved: fix the fields above"))
        }
        SubmitOutcome::Busy => Err(anyhow!("An expense is already being saved")),
        SubmitOutcome::Failed(err) => Err(anyhow!("Error adding expense: {}", err)),
    }
}

/// Copies the given flags into the add form; each one counts as a user edit.
pub fn fill_form(session: &mut Session, sub: &clap::ArgMatches) {
    let form = session.form_mut();
    for (field, name) in [
        (Field::Amount, "amount"),
        (Field::Category, "category"),
        (Field::Date, "date"),
        (Field::Note, "note"),
    ] {
        if let Some(v) = sub.get_one::<String>(name) {
            form.set_value(field, v.trim());
        }
    }
}
