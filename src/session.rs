// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! One running instance of the app: the store, the views derived from it,
//! the add form, and the backend round-trips that mutate the store.

use crate::aggregation::DashboardView;
use crate::config::Settings;
use crate::confirm::{Confirm, ConfirmationRequest};
use crate::filter::{ExpenseListView, FilterCriteria};
use crate::models::Expense;
use crate::service::{BackendError, ExpenseBackend, MockExpenseService};
use crate::store::ExpenseStore;
use crate::validation::{ExpenseForm, Field, SubmitError};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Add,
    List,
    Dashboard,
}

impl Route {
    /// Unknown paths land on the list.
    pub fn resolve(path: &str) -> Route {
        match path.trim().trim_start_matches('/').trim_start_matches("expenses/") {
            "add" => Route::Add,
            "dashboard" | "" | "expenses" => Route::Dashboard,
            _ => Route::List,
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Created(Expense),
    Invalid(Vec<(Field, String)>),
    /// A submission was already open; nothing happened.
    Busy,
    Failed(BackendError),
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    /// The backend answered but did not delete.
    Declined,
    Failed(BackendError),
}

pub struct Session {
    store: ExpenseStore,
    list: Rc<RefCell<ExpenseListView>>,
    dashboard: Rc<RefCell<DashboardView>>,
    form: ExpenseForm,
    backend: Box<dyn ExpenseBackend>,
    confirm: Box<dyn Confirm>,
    route: Route,
    today: NaiveDate,
    currency: String,
}

impl Session {
    pub fn new(
        store: ExpenseStore,
        backend: Box<dyn ExpenseBackend>,
        confirm: Box<dyn Confirm>,
        recent_limit: usize,
        today: NaiveDate,
    ) -> Self {
        let mut store = store;
        let list = Rc::new(RefCell::new(ExpenseListView::new()));
        let dashboard = Rc::new(RefCell::new(DashboardView::new(recent_limit)));

        let list_sub = Rc::clone(&list);
        store.subscribe(move |snapshot| list_sub.borrow_mut().on_expenses(snapshot));
        let dash_sub = Rc::clone(&dashboard);
        store.subscribe(move |snapshot| dash_sub.borrow_mut().on_expenses(snapshot));

        Self {
            store,
            list,
            dashboard,
            form: ExpenseForm::new(today),
            backend,
            confirm,
            route: Route::Dashboard,
            today,
            currency: "USD".to_string(),
        }
    }

    pub fn from_settings(settings: &Settings, confirm: Box<dyn Confirm>) -> Self {
        let today = Local::now().date_naive();
        let store = if settings.sample_data {
            ExpenseStore::with_sample_data(today)
        } else {
            ExpenseStore::default()
        };
        let backend = if settings.fail_requests {
            MockExpenseService::failing(settings.mock_delay())
        } else {
            MockExpenseService::new(settings.mock_delay())
        };
        let mut session = Self::new(
            store,
            Box::new(backend),
            confirm,
            settings.recent_limit,
            today,
        );
        session.currency = settings.currency.clone();
        session
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ExpenseStore {
        &mut self.store
    }

    pub fn list(&self) -> Ref<'_, ExpenseListView> {
        self.list.borrow()
    }

    pub fn dashboard(&self) -> Ref<'_, DashboardView> {
        self.dashboard.borrow()
    }

    pub fn dashboard_mut(&self) -> RefMut<'_, DashboardView> {
        self.dashboard.borrow_mut()
    }

    pub fn form(&self) -> &ExpenseForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ExpenseForm {
        &mut self.form
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn navigate(&mut self, path: &str) -> Route {
        self.route = Route::resolve(path);
        if self.route == Route::Add {
            self.form = ExpenseForm::new(self.today);
        }
        self.route
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.list.borrow_mut().set_criteria(criteria);
    }

    pub fn clear_filters(&mut self) {
        self.list.borrow_mut().clear_filters();
    }

    /// Sends the add form to the backend. The store only changes once the
    /// backend has returned the created record.
    pub fn submit_expense(&mut self) -> SubmitOutcome {
        let draft = match self.form.begin_submit() {
            Ok(draft) => draft,
            Err(SubmitError::InFlight) => return SubmitOutcome::Busy,
            Err(SubmitError::Invalid(errors)) => return SubmitOutcome::Invalid(errors),
        };
        let result = self.backend.create_expense(draft);
        self.form.finish_submit();
        match result {
            Ok(expense) => {
                info!(id = %expense.id, amount = %expense.amount, category = %expense.category, "expense added");
                self.store.add(expense.clone());
                self.form = ExpenseForm::new(self.today);
                self.route = Route::List;
                SubmitOutcome::Created(expense)
            }
            Err(err) => {
                error!(error = %err, "Error adding expense");
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Asks for confirmation, then deletes through the backend.
    pub fn delete_expense(&mut self, id: &str) -> Result<DeleteOutcome> {
        if !self
            .confirm
            .confirm(&ConfirmationRequest::delete_expense())?
        {
            return Ok(DeleteOutcome::Cancelled);
        }
        Ok(self.delete_confirmed(id))
    }

    /// Deletes through the backend without asking.
    pub fn delete_confirmed(&mut self, id: &str) -> DeleteOutcome {
        match self.backend.delete_expense(id) {
            Ok(true) => {
                self.store.delete_by_id(id);
                info!(id, "expense deleted");
                DeleteOutcome::Deleted
            }
            Ok(false) => {
                warn!(id, "backend declined to delete expense");
                DeleteOutcome::Declined
            }
            Err(err) => {
                error!(id, error = %err, "Error deleting expense");
                DeleteOutcome::Failed(err)
            }
        }
    }
}
