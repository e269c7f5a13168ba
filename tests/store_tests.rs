// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use expensetrack::models::{Expense, ExpenseCategory};
use expensetrack::store::{total_of, ExpenseStore, Snapshot};
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::rc::Rc;

fn expense(id: &str, cents: i64, category: ExpenseCategory, date: &str) -> Expense {
    Expense {
        id: id.to_string(),
        amount: Decimal::new(cents, 2),
        category,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        note: None,
        created_at: Utc::now(),
    }
}

fn recorder(store: &mut ExpenseStore) -> Rc<RefCell<Vec<Snapshot>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |s| sink.borrow_mut().push(Rc::clone(s)));
    seen
}

#[test]
fn starts_with_sample_data() {
    let today = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
    let store = ExpenseStore::with_sample_data(today);
    assert_eq!(store.len(), 10);
    let first = &store.expenses()[0];
    assert_eq!(first.id, "1");
    assert_eq!(first.date, today);
    assert_eq!(first.amount, Decimal::new(4599, 2));
    assert_eq!(store.expenses()[9].date, NaiveDate::from_ymd_opt(2025, 7, 4).unwrap());
}

#[test]
fn subscriber_gets_current_value_immediately() {
    let mut store = ExpenseStore::new(vec![expense("1", 5000, ExpenseCategory::Food, "2025-07-14")]);
    let seen = recorder(&mut store);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].len(), 1);
}

#[test]
fn add_prepends_newest_first() {
    let first = expense("1", 2500, ExpenseCategory::Food, "2025-07-13");
    let second = expense("2", 5000, ExpenseCategory::Transportation, "2025-07-14");
    let mut store = ExpenseStore::default();
    store.replace_all(vec![first.clone()]);
    store.add(second.clone());
    assert_eq!(store.expenses(), &[second, first][..]);
}

#[test]
fn every_mutation_is_one_emission_in_order() {
    let mut store = ExpenseStore::default();
    let seen = recorder(&mut store);
    store.replace_all(vec![expense("1", 100, ExpenseCategory::Food, "2025-07-01")]);
    store.add(expense("2", 200, ExpenseCategory::Other, "2025-07-02"));
    store.delete_by_id("1");
    let lens: Vec<usize> = seen.borrow().iter().map(|s| s.len()).collect();
    assert_eq!(lens, vec![0, 1, 2, 1]);
    assert_eq!(seen.borrow()[3][0].id, "2");
}

#[test]
fn delete_removes_only_matching_id() {
    let mut store = ExpenseStore::new(vec![
        expense("a", 100, ExpenseCategory::Food, "2025-07-01"),
        expense("b", 200, ExpenseCategory::Food, "2025-07-02"),
        expense("c", 300, ExpenseCategory::Food, "2025-07-03"),
    ]);
    store.delete_by_id("b");
    let ids: Vec<&str> = store.expenses().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[test]
fn deleting_unknown_id_changes_nothing_but_still_emits() {
    let mut store = ExpenseStore::with_sample_data(NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
    let before = store.expenses().to_vec();
    let seen = recorder(&mut store);
    store.delete_by_id("non-existent-id");
    assert_eq!(store.expenses(), &before[..]);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[1].as_slice(), &before[..]);
}

#[test]
fn unsubscribed_listener_stops_receiving() {
    let mut store = ExpenseStore::default();
    let count = Rc::new(RefCell::new(0));
    let c = Rc::clone(&count);
    let id = store.subscribe(move |_| *c.borrow_mut() += 1);
    store.add(expense("1", 100, ExpenseCategory::Food, "2025-07-01"));
    assert!(store.unsubscribe(id));
    store.add(expense("2", 100, ExpenseCategory::Food, "2025-07-01"));
    assert_eq!(*count.borrow(), 2);
    assert!(!store.unsubscribe(id));
}

#[test]
fn totals_are_exact_and_additive() {
    assert_eq!(total_of(&[]), Decimal::ZERO);

    let mut store = ExpenseStore::default();
    store.replace_all(vec![
        expense("1", 2550, ExpenseCategory::Food, "2025-07-14"),
        expense("2", 7450, ExpenseCategory::Transportation, "2025-07-14"),
    ]);
    assert_eq!(store.total(), Decimal::new(10000, 2));

    let before = store.total();
    let x = expense("3", 3000, ExpenseCategory::Food, "2025-07-14");
    store.add(x.clone());
    assert_eq!(store.total(), before + x.amount);
}

#[test]
fn total_follows_every_emission() {
    let mut store = ExpenseStore::new(vec![expense("1", 5000, ExpenseCategory::Food, "2025-07-14")]);
    let totals = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&totals);
    store.subscribe(move |s| sink.borrow_mut().push(total_of(s)));
    store.add(expense("2", 3000, ExpenseCategory::Transportation, "2025-07-14"));
    assert_eq!(
        *totals.borrow(),
        vec![Decimal::new(5000, 2), Decimal::new(8000, 2)]
    );
}

#[test]
fn add_delete_sequence_keeps_ids_unique() {
    let mut store = ExpenseStore::default();
    for i in 0..20 {
        store.add(expense(&format!("id-{i}"), 100 + i, ExpenseCategory::Other, "2025-07-01"));
    }
    for i in (0..20).step_by(3) {
        store.delete_by_id(&format!("id-{i}"));
    }
    let mut ids: Vec<&str> = store.expenses().iter().map(|e| e.id.as_str()).collect();
    let n = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), n);
    assert_eq!(n, 20 - 7);
    assert!(store.get("id-3").is_none());
    assert!(store.get("id-4").is_some());
}

#[test]
fn total_of_clamps_instead_of_overflowing() {
    let mut a = expense("1", 0, ExpenseCategory::Housing, "2025-07-14");
    a.amount = Decimal::MAX;
    let mut b = expense("2", 0, ExpenseCategory::Other, "2025-07-14");
    b.amount = Decimal::MAX;
    assert_eq!(total_of(&[a.clone(), b.clone()]), Decimal::MAX);

    let mut store = ExpenseStore::default();
    store.replace_all(vec![a, b]);
    assert_eq!(store.total(), Decimal::MAX);
}
