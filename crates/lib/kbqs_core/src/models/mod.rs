//! Domain models.
//!
//! These mirror the backend's JSON (camelCase on the wire) and carry the
//! typed role/status views used throughout the console.

pub mod user;
