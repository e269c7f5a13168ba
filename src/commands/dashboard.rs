// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::list::ExpenseRow;
use crate::models::CategoryTotal;
use crate::session::Session;
use crate::utils::{
    category_cell, fmt_money, fmt_percent, maybe_print_json, parse_category, percent_bar,
    pretty_table,
};
use anyhow::Result;
use comfy_table::{Cell, Color};
use serde::Serialize;

const BAR_WIDTH: usize = 30;

pub fn handle(session: &mut Session, sub: &clap::ArgMatches) -> Result<()> {
    if let Some(hidden) = sub.get_many::<String>("hide") {
        let mut dash = session.dashboard_mut();
        for name in hidden {
            let category = parse_category(name)?;
            if !dash.is_hidden(category) {
                dash.toggle_category(category);
            }
        }
    }
    session.navigate("dashboard");
    render(session, sub.get_flag("json"), sub.get_flag("jsonl"))
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total: String,
    pub categories: Vec<CategoryTotal>,
    pub recent: Vec<ExpenseRow>,
}

pub fn summary(session: &Session) -> DashboardSummary {
    let dash = session.dashboard();
    DashboardSummary {
        total: format!("{:.2}", dash.total()),
        categories: dash.categories().to_vec(),
        recent: dash.recent().iter().map(ExpenseRow::from).collect(),
    }
}

pub fn render(session: &Session, json: bool, jsonl: bool) -> Result<()> {
    if maybe_print_json(json, jsonl, &summary(session))? {
        return Ok(());
    }
    let dash = session.dashboard();
    let ccy = session.currency();
    println!("Total expenses: {}", fmt_money(&dash.total(), ccy));

    let visible = dash.visible_categories();
    if visible.is_empty() {
        println!("No expense data to chart yet. Add an expense to see the breakdown.");
    } else {
        let mut table = pretty_table(&["Category", "Spent", "Share", ""], Vec::new());
        for c in &visible {
            let (r, g, b) = c.category.color();
            table.add_row(vec![
                category_cell(c.category),
                Cell::new(fmt_money(&c.total, ccy)),
                Cell::new(fmt_percent(&c.percentage)),
                Cell::new(percent_bar(&c.percentage, BAR_WIDTH)).fg(Color::Rgb { r, g, b }),
            ]);
        }
        println!("{}", table);
    }
    let hidden: Vec<String> = dash
        .categories()
        .iter()
        .filter(|c| dash.is_hidden(c.category))
        .map(|c| c.category.to_string())
        .collect();
    if !hidden.is_empty() {
        println!("Hidden from chart: {}", hidden.join(", "));
    }

    if !dash.recent().is_empty() {
        let rows: Vec<Vec<String>> = dash
            .recent()
            .iter()
            .map(|e| {
                vec![
                    e.date.format("%b %-d").to_string(),
                    e.category.to_string(),
                    e.note.clone().unwrap_or_default(),
                    fmt_money(&e.amount, ccy),
                ]
            })
            .collect();
        println!("Recent expenses");
        println!("{}", pretty_table(&["Date", "Category", "Note", "Amount"], rows));
    }
    Ok(())
}
