use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] eyre::Report),
}

pub type SlotResult<T> = Result<T, SlotError>;
