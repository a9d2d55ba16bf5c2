//! Keeps local state in step with the remote customer collection.
//!
//! Each user operation is a pure function on [`AppState`] that returns the
//! [`Command`]s to run; each finished request comes back as a
//! [`Completion`] and is folded into state by [`AppState::apply`], which may
//! ask for more commands (every successful mutation re-fetches the list).

use serde_json::Value;
use tracing::{debug, info};

use super::{AppState, Focus, FormMode, Notice};
use crate::customer::{Customer, CustomerForm, FormField};
use crate::error::ApiError;

pub const MSG_NOT_ARRAY: &str = "API response is not an array.";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch customers.";
pub const MSG_ADDED: &str = "Customer added successfully.";
pub const MSG_ADD_FAILED: &str = "Error adding customer.";
pub const MSG_UPDATED: &str = "Customer updated successfully.";
pub const MSG_UPDATE_FAILED: &str = "Error updating customer.";
pub const MSG_DELETE_FAILED: &str = "Error deleting customer.";
pub const MSG_NOT_FOUND: &str = "Customer not found.";

/// Correlation id of one dispatched request. Issued in increasing order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// A network operation for the worker to run.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    FetchAll,
    Create(Value),
    Update(Value),
    Delete(i64),
    Get(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::FetchAll => "list",
            Command::Create(_) => "create",
            Command::Update(_) => "update",
            Command::Delete(_) => "delete",
            Command::Get(_) => "get",
        }
    }
}

/// Result of running a [`Command`].
#[derive(Debug)]
pub enum Outcome {
    Listed(Result<Vec<Customer>, ApiError>),
    Created(Result<(), ApiError>),
    Updated(Result<(), ApiError>),
    Deleted(Result<String, ApiError>),
    Fetched(Result<Customer, ApiError>),
}

impl Outcome {
    pub fn failure(&self) -> Option<&ApiError> {
        match self {
            Outcome::Listed(r) => r.as_ref().err(),
            Outcome::Created(r) | Outcome::Updated(r) => r.as_ref().err(),
            Outcome::Deleted(r) => r.as_ref().err(),
            Outcome::Fetched(r) => r.as_ref().err(),
        }
    }
}

#[derive(Debug)]
pub struct Completion {
    pub request: RequestId,
    pub outcome: Outcome,
}

impl AppState {
    /// Commands issued once when the screen is first shown.
    pub fn mount(&self) -> Vec<Command> {
        vec![Command::FetchAll]
    }

    /// Submit the form: create in [`FormMode::Create`], update in [`FormMode::Edit`].
    pub fn submit_form(&self) -> Command {
        let payload = self.form.to_payload();
        match self.form_mode {
            FormMode::Create => Command::Create(payload),
            FormMode::Edit => Command::Update(payload),
        }
    }

    /// Load the row at `index` into the form and switch to edit mode.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        let Some(customer) = self.customers.get(index) else {
            return false;
        };
        let id = customer.id.map(|n| n.to_string()).unwrap_or_default();
        self.form = CustomerForm::from_customer(customer);
        self.form_mode = FormMode::Edit;
        self.form_field = FormField::Id;
        self.notice = Some(Notice::info(format!("Editing customer with ID {id}")));
        debug!(id = %id, "entered edit mode");
        true
    }

    /// Clear the form and go back to create mode. Never touches the network.
    pub fn reset_form(&mut self) {
        self.form = CustomerForm::default();
        self.form_mode = FormMode::Create;
        self.form_field = FormField::Id;
    }

    /// Delete the highlighted row.
    pub fn delete_selected(&mut self) -> Option<Command> {
        let customer = self.selected_customer()?;
        match customer.id {
            Some(id) => Some(Command::Delete(id)),
            None => {
                self.notice = Some(Notice::error(MSG_DELETE_FAILED));
                None
            }
        }
    }

    /// Look up the id typed into the lookup panel.
    pub fn lookup(&self) -> Command {
        Command::Get(self.lookup_input.clone())
    }

    /// Fold a finished request into state.
    pub fn apply(&mut self, done: Completion) -> Vec<Command> {
        let Completion { request, outcome } = done;
        let mut cmds = Vec::new();

        match outcome {
            Outcome::Listed(result) => {
                if self.last_list_request.is_some_and(|last| request < last) {
                    debug!(request = request.0, "dropping stale customer list");
                    return cmds;
                }
                self.last_list_request = Some(request);
                match result {
                    Ok(list) => {
                        info!(request = request.0, count = list.len(), "customer list refreshed");
                        self.customers = list;
                    }
                    Err(ApiError::NotAnArray) => {
                        self.customers.clear();
                        self.notice = Some(Notice::error(MSG_NOT_ARRAY));
                    }
                    Err(_) => {
                        self.customers.clear();
                        self.notice = Some(Notice::error(MSG_FETCH_FAILED));
                    }
                }
                self.clamp_selection();
            }
            Outcome::Created(Ok(())) => {
                self.notice = Some(Notice::info(MSG_ADDED));
                cmds.push(Command::FetchAll);
                self.reset_form();
            }
            Outcome::Created(Err(_)) => {
                self.notice = Some(Notice::error(MSG_ADD_FAILED));
            }
            Outcome::Updated(Ok(())) => {
                self.notice = Some(Notice::info(MSG_UPDATED));
                cmds.push(Command::FetchAll);
                self.reset_form();
            }
            Outcome::Updated(Err(_)) => {
                self.notice = Some(Notice::error(MSG_UPDATE_FAILED));
            }
            Outcome::Deleted(Ok(text)) => {
                self.notice = Some(Notice::info(text));
                cmds.push(Command::FetchAll);
            }
            Outcome::Deleted(Err(_)) => {
                self.notice = Some(Notice::error(MSG_DELETE_FAILED));
            }
            Outcome::Fetched(Ok(customer)) => {
                self.fetched = Some(customer);
                self.notice = None;
            }
            Outcome::Fetched(Err(_)) => {
                self.fetched = None;
                self.notice = Some(Notice::error(MSG_NOT_FOUND));
            }
        }

        cmds
    }

    fn clamp_selection(&mut self) {
        if self.customers.is_empty() {
            self.selected_index = 0;
        } else if self.selected_index >= self.customers.len() {
            self.selected_index = self.customers.len() - 1;
        }
    }

    /// Leave edit mode without saving and hand focus back to the table.
    pub fn cancel_edit(&mut self) {
        let was_editing = self.form_mode == FormMode::Edit;
        self.reset_form();
        if was_editing {
            self.focus = Focus::Table;
        }
    }
}
