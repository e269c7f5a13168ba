// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::ExpenseCategory;
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_category(s: &str) -> Result<ExpenseCategory> {
    s.parse::<ExpenseCategory>()
        .with_context(|| format!("Category must be one of: {}", category_names().join(", ")))
}

pub fn category_names() -> Vec<&'static str> {
    ExpenseCategory::ALL.iter().map(|c| c.as_str()).collect()
}

/// Last representable instant of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last)
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{} {:.2}", ccy, d.round_dp(2))
}

pub fn fmt_percent(d: &Decimal) -> String {
    format!("{:.1}%", d.round_dp(1))
}

pub fn category_cell(category: ExpenseCategory) -> Cell {
    let (r, g, b) = category.color();
    Cell::new(category.as_str().to_uppercase()).fg(Color::Rgb { r, g, b })
}

/// Horizontal bar scaled so 100% is `width` blocks.
pub fn percent_bar(percentage: &Decimal, width: usize) -> String {
    let scaled = percentage
        .checked_mul(Decimal::from(width as u64))
        .unwrap_or(Decimal::ZERO)
        / Decimal::ONE_HUNDRED;
    let scaled = scaled
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(width);
    "█".repeat(scaled)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
