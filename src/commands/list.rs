// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filter::FilterCriteria;
use crate::models::Expense;
use crate::session::Session;
use crate::utils::{
    category_cell, fmt_money, maybe_print_json, parse_category, parse_date, pretty_table,
};
use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;

pub fn handle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    let criteria = criteria_from_matches(sub)?;
    session.set_filters(criteria);
    session.navigate("list");
    let limit = sub.get_one::<usize>("limit").copied();
    render(session, limit, sub.get_flag("json"), sub.get_flag("jsonl"))
}

/// Filter criteria from `--category/--from/--to/--search`; absent flags stay unset.
pub fn criteria_from_matches(sub: &clap::ArgMatches) -> Result<FilterCriteria> {
    let category = match sub.get_one::<String>("category") {
        Some(c) if !c.trim().is_empty() => Some(parse_category(c)?),
        _ => None,
    };
    let start_date = sub
        .get_one::<String>("from")
        .map(|s| parse_date(s))
        .transpose()?;
    let end_date = sub
        .get_one::<String>("to")
        .map(|s| parse_date(s))
        .transpose()?;
    let search_text = sub
        .get_one::<String>("search")
        .map(|s| s.to_string())
        .filter(|s| !s.is_empty());
    Ok(FilterCriteria {
        category,
        start_date,
        end_date,
        search_text,
    })
}

#[derive(Debug, Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(e: &Expense) -> Self {
        Self {
            id: e.id.clone(),
            date: e.date.to_string(),
            category: e.category.to_string(),
            amount: format!("{:.2}", e.amount),
            note: e.note.clone().unwrap_or_default(),
        }
    }
}

/// Rows of the list page as currently filtered.
pub fn current_rows(session: &Session, limit: Option<usize>) -> Vec<ExpenseRow> {
    let list = session.list();
    list.expenses()
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(ExpenseRow::from)
        .collect()
}

pub fn render(session: &Session, limit: Option<usize>, json: bool, jsonl: bool) -> Result<()> {
    let rows = current_rows(session, limit);
    if maybe_print_json(json, jsonl, &rows)? {
        return Ok(());
    }
    let list = session.list();
    if list.count() == 0 {
        println!("No expenses match the current filters.");
        return Ok(());
    }
    let mut table = pretty_table(&["ID", "Date", "Category", "Amount", "Note"], Vec::new());
    for e in list.expenses().iter().take(limit.unwrap_or(usize::MAX)) {
        table.add_row(vec![
            Cell::new(&e.id),
            Cell::new(e.date.format("%b %-d, %Y")),
            category_cell(e.category),
            Cell::new(fmt_money(&e.amount, session.currency())),
            Cell::new(e.note.as_deref().unwrap_or_default()),
        ]);
    }
    println!("{}", table);
    println!(
        "{} expense(s), total {}",
        list.count(),
        fmt_money(&list.total_amount(), session.currency())
    );
    Ok(())
}
