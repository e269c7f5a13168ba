// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Expense, ExpenseCategory};
use crate::store::{total_of, Snapshot};
use crate::utils::{end_of_day, start_of_day};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub category: Option<ExpenseCategory>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search_text: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.search().is_none()
    }

    // Blank search text means no search.
    fn search(&self) -> Option<&str> {
        self.search_text.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = self.category {
            if expense.category != category {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if expense.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if start_of_day(expense.date) > end_of_day(end) {
                return false;
            }
        }
        if let Some(search) = self.search() {
            let needle = search.to_lowercase();
            let note_match = expense
                .note
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle);
            let category_match = expense.category.as_str().to_lowercase().contains(&needle);
            if !note_match && !category_match {
                return false;
            }
        }
        true
    }
}

/// Matching expenses, newest date first. Equal dates keep their input order.
pub fn filter_expenses(expenses: &[Expense], criteria: &FilterCriteria) -> Vec<Expense> {
    let mut out: Vec<Expense> = expenses
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilteredExpenses {
    pub expenses: Vec<Expense>,
    pub total_amount: Decimal,
    pub count: usize,
}

impl FilteredExpenses {
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self {
            total_amount: total_of(&expenses),
            count: expenses.len(),
            expenses,
        }
    }
}

/// The expense list page: latest store snapshot combined with the latest
/// criteria. Either input changing re-derives the result.
#[derive(Debug, Clone, Default)]
pub struct ExpenseListView {
    source: Snapshot,
    criteria: FilterCriteria,
    result: FilteredExpenses,
}

impl ExpenseListView {
    pub fn new() -> Self {
        Self {
            source: Rc::new(Vec::new()),
            criteria: FilterCriteria::default(),
            result: FilteredExpenses::default(),
        }
    }

    pub fn on_expenses(&mut self, expenses: &Snapshot) {
        self.source = Rc::clone(expenses);
        self.recompute();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn result(&self) -> &FilteredExpenses {
        &self.result
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.result.expenses
    }

    pub fn total_amount(&self) -> Decimal {
        self.result.total_amount
    }

    pub fn count(&self) -> usize {
        self.result.count
    }

    fn recompute(&mut self) {
        self.result = FilteredExpenses::from_expenses(filter_expenses(&self.source, &self.criteria));
        debug!(
            count = self.result.count,
            total = %self.result.total_amount,
            "expense list recomputed"
        );
    }
}
