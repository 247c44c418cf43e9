use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("{}", .0)]
    Config(#[from] kbqs_core::config::ConfigError),

    #[error("{}", .0)]
    Gateway(#[from] kbqs_core::gateway::GatewayError),

    #[error("Validation failed: {}", .0)]
    Validation(kbqs_core::validation::FieldErrors),

    #[error("{}", .0)]
    Dialog(#[from] kbqs_core::dialog::DialogError),
}
