//! User action dialog: add a user, or review/disable an existing one.
//!
//! The dialog owns the form values and the role toggle. Open/closed state
//! lives in the [`DialogSession`] passed into each action; persistence goes
//! through the [`UserGateway`].

use thiserror::Error;

use crate::gateway::pending::{Mutation, PendingMutations};
use crate::gateway::{GatewayError, UserGateway};
use crate::models::user::{NewUser, Role, UserRecord};
use crate::session::{ActionKind, DialogSession};
use crate::validation::{self, Field, FieldErrors, UserForm};

pub use crate::validation::MAX_INPUT_LEN;

/// Mutations that lock the dialog's buttons.
const LOCKING: [Mutation; 2] = [Mutation::AddUser, Mutation::DisableUser];

/// Dialog action errors.
#[derive(Debug, Error)]
pub enum DialogError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Another user action is still in progress")]
    Busy,

    #[error("Dialog is not open")]
    Closed,

    #[error("No user is being edited")]
    NotEditing,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result of a confirmed submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Add mode: the user was created and the dialog closed.
    Created(UserRecord),
    /// Edit mode: the dialog closed without touching the backend.
    Dismissed,
}

/// Observer for whether the dialog's buttons accept input.
#[derive(Debug, Clone)]
pub struct DialogControls {
    pending: PendingMutations,
}

impl DialogControls {
    /// False while an add or disable call is in flight.
    pub fn enabled(&self) -> bool {
        !self.pending.any_pending(&LOCKING)
    }
}

#[derive(Debug)]
pub struct UserActionDialog {
    gateway: UserGateway,
    form: UserForm,
    selected_role: Role,
    errors: FieldErrors,
}

impl UserActionDialog {
    pub fn new(gateway: UserGateway) -> Self {
        Self {
            gateway,
            form: UserForm::default(),
            selected_role: Role::Staff,
            errors: FieldErrors::new(),
        }
    }

    /// Seed the form from the session that was just opened.
    ///
    /// Edit pre-fills the profile fields and the role from the target; Add
    /// starts blank as an employee.
    pub fn prepare(&mut self, session: &DialogSession) {
        self.errors = FieldErrors::new();
        match session.target() {
            Some(user) if session.action_kind() == ActionKind::Edit => {
                self.form = UserForm {
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                    username: user.username.clone(),
                    email: user.email.clone(),
                    ..UserForm::default()
                };
                self.selected_role = user.role();
            }
            _ => {
                self.form = UserForm::default();
                self.selected_role = Role::Staff;
            }
        }
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    /// Set an input, truncated to [`MAX_INPUT_LEN`] characters.
    pub fn set_field(&mut self, field: Field, value: &str) {
        *self.form.get_mut(field) = value.chars().take(MAX_INPUT_LEN).collect();
    }

    /// Set several inputs at once, refusing any value over [`MAX_INPUT_LEN`].
    ///
    /// On rejection no field changes and the errors are kept for display.
    pub fn fill_fields(&mut self, values: &[(Field, &str)]) -> Result<(), DialogError> {
        if let Err(errors) = validation::validate_lengths(values) {
            self.errors = errors.clone();
            return Err(DialogError::Validation(errors));
        }
        for (field, value) in values {
            *self.form.get_mut(*field) = (*value).to_string();
        }
        Ok(())
    }

    pub fn selected_role(&self) -> Role {
        self.selected_role
    }

    pub fn select_role(&mut self, role: Role) {
        self.selected_role = role;
    }

    /// Role the edited user currently holds, for emphasis next to the toggle.
    pub fn original_role(&self, session: &DialogSession) -> Option<Role> {
        session.target().map(UserRecord::role)
    }

    /// Errors from the last rejected submit.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn controls(&self) -> DialogControls {
        DialogControls {
            pending: self.gateway.pending().clone(),
        }
    }

    pub fn controls_enabled(&self) -> bool {
        self.controls().enabled()
    }

    /// Clear inputs and errors. The role toggle returns to employee.
    pub fn reset(&mut self) {
        self.form = UserForm::default();
        self.selected_role = Role::Staff;
        self.errors = FieldErrors::new();
    }

    fn ensure_ready(&self, session: &DialogSession) -> Result<(), DialogError> {
        if !session.is_open() {
            return Err(DialogError::Closed);
        }
        if !self.controls_enabled() {
            return Err(DialogError::Busy);
        }
        Ok(())
    }

    /// Confirm button.
    ///
    /// Add validates, creates the user, then resets and closes. Failures keep
    /// the dialog open with its inputs. Edit only closes the dialog.
    pub async fn submit(
        &mut self,
        session: &mut DialogSession,
    ) -> Result<SubmitOutcome, DialogError> {
        self.ensure_ready(session)?;

        match session.action_kind() {
            ActionKind::Add => {
                if let Err(errors) = validation::validate_new_user(&self.form) {
                    self.errors = errors.clone();
                    return Err(DialogError::Validation(errors));
                }
                self.errors = FieldErrors::new();

                let new_user = NewUser {
                    email: self.form.email.clone(),
                    username: self.form.username.clone(),
                    password: self.form.password.clone(),
                    first_name: self.form.first_name.clone(),
                    last_name: self.form.last_name.clone(),
                    role: self.selected_role,
                };
                let created = self.gateway.add_user(&new_user).await?;
                self.reset();
                session.close();
                Ok(SubmitOutcome::Created(created))
            }
            ActionKind::Edit => {
                session.close();
                Ok(SubmitOutcome::Dismissed)
            }
        }
    }

    /// Disable button (Edit only). Sends the target's original fields.
    pub async fn disable(&mut self, session: &mut DialogSession) -> Result<UserRecord, DialogError> {
        self.ensure_ready(session)?;
        let target = session.target().cloned().ok_or(DialogError::NotEditing)?;

        let disabled = self.gateway.disable_user(&target).await?;
        self.reset();
        session.close();
        Ok(disabled)
    }

    /// Set the edited user's password from the password inputs. The dialog
    /// stays open.
    pub async fn change_password(
        &mut self,
        session: &DialogSession,
    ) -> Result<UserRecord, DialogError> {
        self.ensure_ready(session)?;
        let target_id = session
            .target()
            .map(|u| u.id.clone())
            .ok_or(DialogError::NotEditing)?;

        if let Err(errors) =
            validation::validate_password_change(&self.form.password, &self.form.confirm_password)
        {
            self.errors = errors.clone();
            return Err(DialogError::Validation(errors));
        }
        self.errors = FieldErrors::new();

        let updated = self
            .gateway
            .change_password(&target_id, &self.form.password)
            .await?;
        self.form.password.clear();
        self.form.confirm_password.clear();
        Ok(updated)
    }

    /// Cancel button.
    pub fn cancel(&mut self, session: &mut DialogSession) -> Result<(), DialogError> {
        if !self.controls_enabled() {
            return Err(DialogError::Busy);
        }
        session.close();
        Ok(())
    }
}
