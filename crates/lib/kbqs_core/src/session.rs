//! Dialog session context.
//!
//! Tracks whether the user action dialog is open, in which mode, and for
//! which record. Opening and closing are single transitions, so the target
//! can never outlive an Edit session or leak into an Add session.

use crate::models::user::UserRecord;

/// What the dialog was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionKind {
    #[default]
    Add,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum State {
    #[default]
    Closed,
    OpenAdd,
    OpenEdit(UserRecord),
}

/// Session state shared by the directory page, its cards and the dialog.
#[derive(Debug, Clone, Default)]
pub struct DialogSession {
    state: State,
}

impl DialogSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog.
    ///
    /// `target` is kept only for [`ActionKind::Edit`]; opening in Add mode
    /// drops any target passed in.
    pub fn open(&mut self, kind: ActionKind, target: Option<UserRecord>) {
        self.state = match (kind, target) {
            (ActionKind::Edit, Some(user)) => State::OpenEdit(user),
            (ActionKind::Edit, None) => {
                tracing::warn!("edit requested without a target user, opening in add mode");
                State::OpenAdd
            }
            (ActionKind::Add, _) => State::OpenAdd,
        };
    }

    /// Close the dialog and forget the target.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    pub fn is_open(&self) -> bool {
        self.state != State::Closed
    }

    /// Mode of the current (or most recent) session.
    pub fn action_kind(&self) -> ActionKind {
        match self.state {
            State::OpenEdit(_) => ActionKind::Edit,
            _ => ActionKind::Add,
        }
    }

    /// Record being edited, present only while open in Edit mode.
    pub fn target(&self) -> Option<&UserRecord> {
        match &self.state {
            State::OpenEdit(user) => Some(user),
            _ => None,
        }
    }
}
