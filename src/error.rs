use thiserror::Error;

// Errors raised by the address book itself.
// The command layer decides how each one is shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Phone {0} already exists")]
    DuplicatePhone(String),

    #[error("Birthday {0} has been added earlier")]
    DuplicateBirthday(String),
}
