//! Error types for salon-slots operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SalonError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Slot unavailable: {date} at {time}")]
    SlotUnavailable { date: String, time: String },

    #[error("Schedule source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, SalonError>;
