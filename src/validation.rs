// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Add-expense form: field rules, touched/dirty tracking and the submit guard.
//!
//! Rules are plain functions from the raw text to a set of [`FieldError`]s.
//! The set is ordered by priority, so the first element is the message shown
//! for the field.

use crate::models::{ExpenseCategory, NewExpense};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const NOTE_MAX_LEN: usize = 500;
/// Largest whole amount a single expense may carry.
pub const AMOUNT_MAX: i64 = 1_000_000_000_000;

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+(\.\d{1,2})?$").unwrap_or_else(|e| panic!("amount pattern: {e}"))
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Amount,
    Category,
    Date,
    Note,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Amount, Field::Category, Field::Date, Field::Note];
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Amount => "Amount",
            Field::Category => "Category",
            Field::Date => "Date",
            Field::Note => "Note",
        })
    }
}

/// Variant order is display priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),
    #[error("Amount must be greater than 0")]
    NotPositive,
    #[error("Please enter a valid amount (e.g., 12.34)")]
    AmountPattern,
    #[error("Amount cannot exceed {max}")]
    TooLarge { max: i64 },
    #[error("Please enter a valid date (YYYY-MM-DD)")]
    DatePattern,
    #[error("Note cannot exceed {max} characters")]
    TooLong { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<(Field, String)>),
}

pub fn validate_amount(value: &str) -> BTreeSet<FieldError> {
    let mut errors = BTreeSet::new();
    if value.is_empty() {
        errors.insert(FieldError::Required(Field::Amount));
        return errors;
    }
    let pattern_ok = AMOUNT_RE.is_match(value);
    // Only numeric input is range-checked; anything else is left to the pattern.
    match Decimal::from_str(value.trim()) {
        Ok(n) if n < Decimal::new(1, 2) => {
            errors.insert(FieldError::NotPositive);
        }
        Ok(n) if n > Decimal::from(AMOUNT_MAX) => {
            errors.insert(FieldError::TooLarge { max: AMOUNT_MAX });
        }
        Ok(_) => {}
        // Digits the pattern accepts but Decimal cannot hold.
        Err(_) if pattern_ok => {
            errors.insert(FieldError::TooLarge { max: AMOUNT_MAX });
        }
        Err(_) => {}
    }
    if !pattern_ok {
        errors.insert(FieldError::AmountPattern);
    }
    errors
}

pub fn validate_category(value: &str) -> BTreeSet<FieldError> {
    let mut errors = BTreeSet::new();
    if value.is_empty() || ExpenseCategory::from_str(value).is_err() {
        errors.insert(FieldError::Required(Field::Category));
    }
    errors
}

pub fn validate_date(value: &str) -> BTreeSet<FieldError> {
    let mut errors = BTreeSet::new();
    if value.is_empty() {
        errors.insert(FieldError::Required(Field::Date));
    } else if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        errors.insert(FieldError::DatePattern);
    }
    errors
}

pub fn validate_note(value: &str) -> BTreeSet<FieldError> {
    let mut errors = BTreeSet::new();
    if value.chars().count() > NOTE_MAX_LEN {
        errors.insert(FieldError::TooLong { max: NOTE_MAX_LEN });
    }
    errors
}

pub fn validate(field: Field, value: &str) -> BTreeSet<FieldError> {
    match field {
        Field::Amount => validate_amount(value),
        Field::Category => validate_category(value),
        Field::Date => validate_date(value),
        Field::Note => validate_note(value),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub dirty: bool,
    pub errors: BTreeSet<FieldError>,
}

impl FieldState {
    fn new(field: Field, value: String) -> Self {
        let errors = validate(field, &value);
        Self {
            value,
            touched: false,
            dirty: false,
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The highest-priority message, once the user has interacted with the field.
    pub fn visible_error(&self) -> Option<String> {
        if self.touched || self.dirty {
            self.errors.first().map(|e| e.to_string())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseForm {
    amount: FieldState,
    category: FieldState,
    date: FieldState,
    note: FieldState,
    submitting: bool,
}

impl ExpenseForm {
    /// Empty form with the date prefilled to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            amount: FieldState::new(Field::Amount, String::new()),
            category: FieldState::new(Field::Category, String::new()),
            date: FieldState::new(Field::Date, today.format("%Y-%m-%d").to_string()),
            note: FieldState::new(Field::Note, String::new()),
            submitting: false,
        }
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Amount => &self.amount,
            Field::Category => &self.category,
            Field::Date => &self.date,
            Field::Note => &self.note,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Amount => &mut self.amount,
            Field::Category => &mut self.category,
            Field::Date => &mut self.date,
            Field::Note => &mut self.note,
        }
    }

    /// User edit: marks the field dirty and re-runs its rules.
    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        let state = self.field_mut(field);
        state.value = value.into();
        state.dirty = true;
        state.errors = validate(field, &state.value);
    }

    pub fn touch(&mut self, field: Field) {
        self.field_mut(field).touched = true;
    }

    pub fn mark_all_touched(&mut self) {
        for f in Field::ALL {
            self.touch(f);
        }
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|f| self.field(*f).is_valid())
    }

    pub fn is_field_invalid(&self, field: Field) -> bool {
        self.field_error(field).is_some()
    }

    pub fn field_error(&self, field: Field) -> Option<String> {
        self.field(field).visible_error()
    }

    /// Every message currently on display, in field order.
    pub fn visible_errors(&self) -> Vec<(Field, String)> {
        Field::ALL
            .iter()
            .filter_map(|f| self.field_error(*f).map(|msg| (*f, msg)))
            .collect()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Opens a submission and returns the draft to send.
    ///
    /// Fails with [`SubmitError::InFlight`] while a previous submission is
    /// open. An invalid form has all its fields marked touched and yields
    /// [`SubmitError::Invalid`] with the messages now visible.
    pub fn begin_submit(&mut self) -> Result<NewExpense, SubmitError> {
        if self.submitting {
            return Err(SubmitError::InFlight);
        }
        let Some(draft) = self.draft() else {
            self.mark_all_touched();
            return Err(SubmitError::Invalid(self.visible_errors()));
        };
        self.submitting = true;
        Ok(draft)
    }

    /// Closes the open submission, whatever its outcome.
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }

    fn draft(&self) -> Option<NewExpense> {
        if !self.is_valid() {
            return None;
        }
        let amount = Decimal::from_str(&self.amount.value).ok()?;
        let category = ExpenseCategory::from_str(&self.category.value).ok()?;
        let date = NaiveDate::parse_from_str(&self.date.value, "%Y-%m-%d").ok()?;
        let note = Some(self.note.value.clone()).filter(|n| !n.is_empty());
        Some(NewExpense {
            amount,
            category,
            date,
            note,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_priority_follows_variant_order() {
        let errs = validate_amount("-10");
        assert_eq!(errs.first(), Some(&FieldError::NotPositive));
        assert!(errs.contains(&FieldError::AmountPattern));
    }

    #[test]
    fn amount_pattern_rejects_three_decimals() {
        assert!(validate_amount("12.345").contains(&FieldError::AmountPattern));
        assert!(validate_amount("12.34").is_empty());
        assert!(validate_amount("12").is_empty());
        assert!(validate_amount("12.").contains(&FieldError::AmountPattern));
    }

    #[test]
    fn amount_beyond_decimal_range_is_too_large() {
        let errs = validate_amount("99999999999999999999999999999");
        assert_eq!(errs.first(), Some(&FieldError::TooLarge { max: AMOUNT_MAX }));
        assert!(!errs.contains(&FieldError::AmountPattern));
    }
}
