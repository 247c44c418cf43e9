//! User card: one directory entry's summary.

use crate::models::user::{Role, UserRecord};

/// Display summary of a single user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCard {
    user: UserRecord,
}

impl UserCard {
    pub fn new(user: UserRecord) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    pub fn id(&self) -> &str {
        &self.user.id
    }

    pub fn display_name(&self) -> String {
        self.user.full_name()
    }

    /// Avatar fallback: first character of the first name.
    pub fn initial(&self) -> Option<char> {
        self.user.first_name.chars().next()
    }

    pub fn role(&self) -> Role {
        self.user.role()
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    /// Single-line rendering: `Ana Cruz <ana@example.com> [Staff] (u1)`.
    pub fn summary_line(&self) -> String {
        format!(
            "{} <{}> [{}] ({})",
            self.display_name(),
            self.email(),
            self.role().card_label(),
            self.id()
        )
    }
}

impl From<&UserRecord> for UserCard {
    fn from(user: &UserRecord) -> Self {
        Self::new(user.clone())
    }
}
