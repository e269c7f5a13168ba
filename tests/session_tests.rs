// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expensetrack::confirm::FixedAnswer;
use expensetrack::models::{Expense, ExpenseCategory, NewExpense};
use expensetrack::service::{BackendError, ExpenseBackend, MockExpenseService};
use expensetrack::session::{DeleteOutcome, Route, Session, SubmitOutcome};
use expensetrack::store::ExpenseStore;
use expensetrack::validation::Field;
use rust_decimal::Decimal;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, 14).unwrap()
}

fn session_with(backend: Box<dyn ExpenseBackend>, confirm: bool) -> Session {
    Session::new(
        ExpenseStore::with_sample_data(today()),
        backend,
        Box::new(FixedAnswer(confirm)),
        5,
        today(),
    )
}

fn fast_mock() -> Box<dyn ExpenseBackend> {
    Box::new(MockExpenseService::new(Duration::ZERO))
}

/// Backend that refuses deletes and counts calls.
struct Refusing {
    calls: Rc<Cell<usize>>,
}

impl ExpenseBackend for Refusing {
    fn create_expense(&self, _draft: NewExpense) -> Result<Expense, BackendError> {
        self.calls.set(self.calls.get() + 1);
        Err(BackendError::Rejected("no".into()))
    }

    fn delete_expense(&self, _id: &str) -> Result<bool, BackendError> {
        self.calls.set(self.calls.get() + 1);
        Ok(false)
    }
}

fn fill_valid(session: &mut Session) {
    let form = session.form_mut();
    form.set_value(Field::Amount, "120.50");
    form.set_value(Field::Category, "Food");
    form.set_value(Field::Note, "Lunch at restaurant");
}

#[test]
fn views_are_populated_on_start() {
    let session = session_with(fast_mock(), true);
    assert_eq!(session.list().count(), 10);
    assert_eq!(session.dashboard().total(), session.store().total());
    assert_eq!(session.dashboard().recent().len(), 5);
}

#[test]
fn successful_submit_adds_to_store_and_moves_to_list() {
    let mut session = session_with(fast_mock(), true);
    session.navigate("add");
    fill_valid(&mut session);
    let created = match session.submit_expense() {
        SubmitOutcome::Created(e) => e,
        other => panic!("expected created, got {:?}", other),
    };
    assert!(!created.id.is_empty());
    assert_eq!(session.store().expenses()[0], created);
    assert_eq!(session.store().len(), 11);
    assert_eq!(session.list().expenses()[0].id, created.id);
    assert_eq!(session.route(), Route::List);
    assert!(!session.form().is_submitting());
    assert_eq!(session.form().field(Field::Amount).value, "");
}

#[test]
fn created_ids_are_unique() {
    let mut session = session_with(fast_mock(), true);
    for _ in 0..3 {
        fill_valid(&mut session);
        assert!(matches!(session.submit_expense(), SubmitOutcome::Created(_)));
    }
    let mut ids: Vec<String> = session.store().expenses().iter().map(|e| e.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 13);
}

#[test]
fn invalid_submit_does_not_call_backend() {
    let calls = Rc::new(Cell::new(0));
    let mut session = session_with(Box::new(Refusing { calls: Rc::clone(&calls) }), true);
    match session.submit_expense() {
        SubmitOutcome::Invalid(errors) => {
            assert!(errors.contains(&(Field::Amount, "Amount is required".to_string())));
            assert!(errors.contains(&(Field::Category, "Category is required".to_string())));
        }
        other => panic!("expected invalid, got {:?}", other),
    }
    assert_eq!(calls.get(), 0);
    assert_eq!(session.store().len(), 10);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut session = session_with(fast_mock(), true);
    fill_valid(&mut session);
    session.form_mut().begin_submit().unwrap();
    assert!(matches!(session.submit_expense(), SubmitOutcome::Busy));
    assert_eq!(session.store().len(), 10);
}

#[test]
fn failed_create_resets_flag_and_leaves_store() {
    let calls = Rc::new(Cell::new(0));
    let mut session = session_with(Box::new(Refusing { calls: Rc::clone(&calls) }), true);
    let before = session.store().expenses().to_vec();
    fill_valid(&mut session);
    assert!(matches!(session.submit_expense(), SubmitOutcome::Failed(_)));
    assert_eq!(session.store().expenses(), &before[..]);
    assert!(!session.form().is_submitting());
    // Retry is allowed and reaches the backend again.
    assert!(matches!(session.submit_expense(), SubmitOutcome::Failed(_)));
    assert_eq!(calls.get(), 2);
}

#[test]
fn failing_mock_reports_unavailable() {
    let mut session = session_with(Box::new(MockExpenseService::failing(Duration::ZERO)), true);
    fill_valid(&mut session);
    match session.submit_expense() {
        SubmitOutcome::Failed(BackendError::Unavailable(_)) => {}
        other => panic!("expected unavailable, got {:?}", other),
    }
    assert!(matches!(
        session.delete_expense("1").unwrap(),
        DeleteOutcome::Failed(_)
    ));
    assert!(session.store().get("1").is_some());
}

#[test]
fn confirmed_delete_updates_store_and_views() {
    let mut session = session_with(fast_mock(), true);
    let total_before = session.dashboard().total();
    let amount = session.store().get("3").unwrap().amount;
    assert!(matches!(session.delete_expense("3").unwrap(), DeleteOutcome::Deleted));
    assert!(session.store().get("3").is_none());
    assert_eq!(session.list().count(), 9);
    assert_eq!(session.dashboard().total(), total_before - amount);
    assert!(session
        .dashboard()
        .categories()
        .iter()
        .all(|c| c.category != ExpenseCategory::Housing));
}

#[test]
fn cancelled_delete_keeps_expense() {
    let calls = Rc::new(Cell::new(0));
    let mut session = session_with(Box::new(Refusing { calls: Rc::clone(&calls) }), false);
    assert!(matches!(session.delete_expense("1").unwrap(), DeleteOutcome::Cancelled));
    assert_eq!(calls.get(), 0);
    assert_eq!(session.store().len(), 10);
}

#[test]
fn declined_delete_keeps_expense() {
    let calls = Rc::new(Cell::new(0));
    let mut session = session_with(Box::new(Refusing { calls: Rc::clone(&calls) }), true);
    assert!(matches!(session.delete_expense("1").unwrap(), DeleteOutcome::Declined));
    assert_eq!(session.store().len(), 10);
}

#[test]
fn routes_fall_back_to_list() {
    assert_eq!(Route::resolve("add"), Route::Add);
    assert_eq!(Route::resolve("/expenses/dashboard"), Route::Dashboard);
    assert_eq!(Route::resolve("/expenses/list"), Route::List);
    assert_eq!(Route::resolve("somewhere/else"), Route::List);
    assert_eq!(Route::resolve(""), Route::Dashboard);
}

#[test]
fn total_expense_scenario() {
    let mut session = session_with(fast_mock(), true);
    session.store_mut().replace_all(Vec::new());
    assert_eq!(session.dashboard().total(), Decimal::ZERO);
    assert!(session.dashboard().categories().is_empty());
    assert_eq!(session.list().count(), 0);
}

#[test]
fn oversized_amount_is_rejected_before_the_store() {
    let mut session = session_with(fast_mock(), true);
    session.navigate("add");
    let form = session.form_mut();
    form.set_value(Field::Amount, "1000000000000000000000000000");
    form.set_value(Field::Category, "Food");
    match session.submit_expense() {
        SubmitOutcome::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].0, Field::Amount);
        }
        other => panic!("expected invalid outcome, got {:?}", other),
    }
    assert_eq!(session.store().len(), 10);
}
