// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::list::{criteria_from_matches, current_rows};
use crate::session::Session;
use anyhow::{bail, Context, Result};

pub fn handle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|f| f.to_lowercase())
        .unwrap_or_else(|| "csv".to_string());
    let out = sub.get_one::<String>("out").context("Missing --out")?;
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    session.set_filters(criteria_from_matches(sub)?);
    let rows = current_rows(session, None);

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)
            .with_context(|| format!("Create {}", out))?;
        wtr.write_record(["id", "date", "category", "amount", "note"])?;
        for r in &rows {
            wtr.write_record([&r.id, &r.date, &r.category, &r.amount, &r.note])?;
        }
        wtr.flush()?;
    } else {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?;
    }
    println!("Exported {} expense(s) to {}", rows.len(), out);
    Ok(())
}
