//! User management page: directory list, "Add Employee" and card "Edit".

use crate::card::UserCard;
use crate::dialog::UserActionDialog;
use crate::gateway::UserGateway;
use crate::models::user::UserRecord;
use crate::session::{ActionKind, DialogSession};

/// What the page body shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    Loading,
    /// Fetch failed; the error's message, verbatim. There is no retry.
    Error(String),
    Ready(Vec<UserCard>),
}

/// Composes the directory fetch, the card list and the action dialog.
#[derive(Debug)]
pub struct UserDirectoryPage {
    gateway: UserGateway,
    session: DialogSession,
    dialog: UserActionDialog,
    view: PageView,
}

impl UserDirectoryPage {
    pub fn new(gateway: UserGateway) -> Self {
        let dialog = UserActionDialog::new(gateway.clone());
        Self {
            gateway,
            session: DialogSession::new(),
            dialog,
            view: PageView::Loading,
        }
    }

    /// Fetch (or reuse) the user list and rebuild the view.
    pub async fn load(&mut self) -> &PageView {
        self.view = match self.gateway.fetch_users().await {
            Ok(users) => PageView::Ready(users.iter().map(UserCard::from).collect()),
            Err(e) => PageView::Error(e.to_string()),
        };
        &self.view
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    /// "Add Employee" button.
    pub fn request_add(&mut self) {
        self.session.open(ActionKind::Add, None);
        self.dialog.prepare(&self.session);
    }

    /// A card's "Edit" button.
    pub fn request_edit(&mut self, user: &UserRecord) {
        self.session.open(ActionKind::Edit, Some(user.clone()));
        self.dialog.prepare(&self.session);
    }

    /// Look up a card by user id in the current view.
    pub fn card(&self, id: &str) -> Option<&UserCard> {
        match &self.view {
            PageView::Ready(cards) => cards.iter().find(|c| c.id() == id),
            _ => None,
        }
    }

    pub fn session(&self) -> &DialogSession {
        &self.session
    }

    /// The dialog together with the session it acts on.
    pub fn dialog_mut(&mut self) -> (&mut UserActionDialog, &mut DialogSession) {
        (&mut self.dialog, &mut self.session)
    }

    pub fn dialog(&self) -> &UserActionDialog {
        &self.dialog
    }
}
