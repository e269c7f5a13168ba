// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Backend the store talks to when expenses are created or deleted.

use crate::models::{Expense, NewExpense};
use chrono::Utc;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("expense service unavailable: {0}")]
    Unavailable(String),
    #[error("expense service rejected the request: {0}")]
    Rejected(String),
}

pub trait ExpenseBackend {
    /// Persists `draft` and returns the full record with `id` and `created_at` assigned.
    fn create_expense(&self, draft: NewExpense) -> Result<Expense, BackendError>;

    /// Whether the backend removed the expense.
    fn delete_expense(&self, id: &str) -> Result<bool, BackendError>;
}

/// Stand-in backend: assigns a v4 UUID and the current time after a fixed
/// delay. Nothing is kept.
#[derive(Debug, Clone)]
pub struct MockExpenseService {
    delay: Duration,
    fail: bool,
}

impl Default for MockExpenseService {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

impl MockExpenseService {
    pub fn new(delay: Duration) -> Self {
        Self { delay, fail: false }
    }

    /// Every call fails with [`BackendError::Unavailable`].
    pub fn failing(delay: Duration) -> Self {
        Self { delay, fail: true }
    }

    fn round_trip(&self, op: &str) -> Result<(), BackendError> {
        if !self.delay.is_zero() {
            debug!(op, delay_ms = self.delay.as_millis() as u64, "simulating network delay");
            thread::sleep(self.delay);
        }
        if self.fail {
            return Err(BackendError::Unavailable(format!("{op} failed")));
        }
        Ok(())
    }
}

impl ExpenseBackend for MockExpenseService {
    fn create_expense(&self, draft: NewExpense) -> Result<Expense, BackendError> {
        self.round_trip("create")?;
        Ok(draft.into_expense(Uuid::new_v4().to_string(), Utc::now()))
    }

    fn delete_expense(&self, _id: &str) -> Result<bool, BackendError> {
        self.round_trip("delete")?;
        Ok(true)
    }
}
