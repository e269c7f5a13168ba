// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory expense store.
//!
//! The store holds the authoritative, newest-first list of expenses for the
//! running process and pushes every new snapshot to its subscribers
//! synchronously, in the order the mutations were applied. A subscriber is
//! called once with the current snapshot as soon as it registers.

use crate::models::{Expense, ExpenseCategory};
use chrono::{Days, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::rc::Rc;
use tracing::debug;

/// An immutable view of the collection at one point in time.
pub type Snapshot = Rc<Vec<Expense>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot)>;

pub struct ExpenseStore {
    expenses: Snapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ExpenseStore {
    pub fn new(expenses: Vec<Expense>) -> Self {
        Self {
            expenses: Rc::new(expenses),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Store seeded with the sample expenses, dated relative to `today`.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        Self::new(sample_expenses(today))
    }

    pub fn snapshot(&self) -> Snapshot {
        Rc::clone(&self.expenses)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn total(&self) -> Decimal {
        total_of(&self.expenses)
    }

    pub fn subscribe<F>(&mut self, mut f: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        f(&self.expenses);
        self.subscribers.push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Swaps in a whole new collection. Records are taken as given.
    pub fn replace_all(&mut self, expenses: Vec<Expense>) {
        self.emit(expenses);
    }

    /// Puts `expense` at the head of the collection.
    pub fn add(&mut self, expense: Expense) {
        let mut next = Vec::with_capacity(self.expenses.len() + 1);
        next.push(expense);
        next.extend(self.expenses.iter().cloned());
        self.emit(next);
    }

    /// Removes the expense with `id`, if any. Subscribers are notified either way.
    pub fn delete_by_id(&mut self, id: &str) {
        let mut next: Vec<Expense> = self.expenses.as_ref().clone();
        if let Some(pos) = next.iter().position(|e| e.id == id) {
            next.remove(pos);
        }
        self.emit(next);
    }

    fn emit(&mut self, next: Vec<Expense>) {
        self.expenses = Rc::new(next);
        debug!(
            count = self.expenses.len(),
            subscribers = self.subscribers.len(),
            "expense store updated"
        );
        for (_, f) in self.subscribers.iter_mut() {
            f(&self.expenses);
        }
    }
}

/// Sum of every amount; zero for an empty slice.
/// Sum of all amounts, clamped to the `Decimal` range.
pub fn total_of(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

pub fn sample_expenses(today: NaiveDate) -> Vec<Expense> {
    let rows: [(&str, i64, ExpenseCategory, u64, &str); 10] = [
        ("1", 4599, ExpenseCategory::Food, 0, "Lunch at downtown restaurant"),
        ("2", 8550, ExpenseCategory::Transportation, 1, "Gas for the car"),
        ("3", 120000, ExpenseCategory::Housing, 2, "Monthly rent payment"),
        ("4", 15675, ExpenseCategory::Utilities, 3, "Electricity and water bill"),
        ("5", 8999, ExpenseCategory::Shopping, 4, "New workout clothes"),
        ("6", 2850, ExpenseCategory::Entertainment, 5, "Movie tickets"),
        ("7", 12500, ExpenseCategory::Healthcare, 6, "Doctor visit copay"),
        ("8", 6730, ExpenseCategory::Food, 7, "Grocery shopping"),
        ("9", 1599, ExpenseCategory::Other, 8, "Coffee shop"),
        ("10", 29999, ExpenseCategory::Shopping, 10, "New headphones for work"),
    ];
    rows.into_iter()
        .map(|(id, cents, category, days_ago, note)| {
            let date = today.checked_sub_days(Days::new(days_ago)).unwrap_or(today);
            Expense {
                id: id.to_string(),
                amount: Decimal::new(cents, 2),
                category,
                date,
                note: Some(note.to_string()),
                created_at: date.and_time(NaiveTime::MIN).and_utc(),
            }
        })
        .collect()
}
