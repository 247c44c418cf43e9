//! # kbqs_core
//!
//! Headless core of the kiosk admin console's user management: the REST
//! gateway with its list cache, the dialog session, the user action dialog,
//! and the directory page that ties them together.

pub mod card;
pub mod config;
pub mod dialog;
pub mod directory;
pub mod gateway;
pub mod models;
pub mod nav;
pub mod picker;
pub mod session;
pub mod validation;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
