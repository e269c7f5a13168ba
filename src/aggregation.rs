// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Category breakdown for the dashboard.

use crate::models::{CategoryTotal, Expense, ExpenseCategory};
use crate::store::{total_of, Snapshot};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use tracing::debug;

/// Per-category totals ordered by descending total.
///
/// Categories with no expenses are left out. Equal totals keep the order in
/// which their category first appears in `expenses`. An empty input (or one
/// whose amounts sum to zero) yields no rows at all.
pub fn category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut groups: Vec<(ExpenseCategory, Decimal)> = Vec::new();
    let mut grand_total = Decimal::ZERO;
    for e in expenses {
        match groups.iter_mut().find(|(c, _)| *c == e.category) {
            Some((_, sum)) => *sum = sum.saturating_add(e.amount),
            None => groups.push((e.category, e.amount)),
        }
        grand_total = grand_total.saturating_add(e.amount);
    }
    if grand_total.is_zero() {
        return Vec::new();
    }

    let mut items: Vec<CategoryTotal> = groups
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category,
            total,
            percentage: share_of(total, grand_total),
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total));
    items
}

/// `part` as a percentage of `whole`; zero when the ratio is not representable.
fn share_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Dashboard state, recomputed on every store emission.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    total: Decimal,
    categories: Vec<CategoryTotal>,
    recent: Vec<Expense>,
    recent_limit: usize,
    hidden: BTreeSet<ExpenseCategory>,
}

impl DashboardView {
    pub fn new(recent_limit: usize) -> Self {
        Self {
            recent_limit,
            ..Self::default()
        }
    }

    pub fn on_expenses(&mut self, expenses: &Snapshot) {
        self.total = total_of(expenses);
        self.categories = category_totals(expenses);
        self.recent = expenses.iter().take(self.recent_limit).cloned().collect();
        debug!(
            total = %self.total,
            categories = self.categories.len(),
            "dashboard recomputed"
        );
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn categories(&self) -> &[CategoryTotal] {
        &self.categories
    }

    /// Most recently added expenses, newest first.
    pub fn recent(&self) -> &[Expense] {
        &self.recent
    }

    /// Flips whether `category` is drawn in the chart. Returns true if it is now hidden.
    pub fn toggle_category(&mut self, category: ExpenseCategory) -> bool {
        if !self.hidden.remove(&category) {
            self.hidden.insert(category);
            true
        } else {
            false
        }
    }

    pub fn is_hidden(&self, category: ExpenseCategory) -> bool {
        self.hidden.contains(&category)
    }

    /// Chart rows: the breakdown minus hidden categories. Percentages stay
    /// relative to the full total.
    pub fn visible_categories(&self) -> Vec<CategoryTotal> {
        self.categories
            .iter()
            .filter(|c| !self.hidden.contains(&c.category))
            .cloned()
            .collect()
    }
}
