//! Error types for the assistant collaborators.

use thiserror::Error;

use crate::amount::Amount;
use crate::booking::BookingId;
use crate::payment::Stage;

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("failed to encode or decode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history line {line} is not a turn: {content}")]
    HistoryLine { line: usize, content: String },

    #[error("'{text}' is not an amount of money")]
    InvalidAmount { text: String },

    #[error("command is missing its '{field}' field")]
    MissingField { field: &'static str },

    #[error("'{text}' is not a booking id")]
    InvalidBookingId { text: String },

    #[error("booking {id} does not exist")]
    UnknownBooking { id: BookingId },

    #[error("booking {id} does not belong to '{username}'")]
    NotOwner { id: BookingId, username: String },

    #[error("booking {id} is already cancelled")]
    AlreadyCancelled { id: BookingId },

    #[error("payment of {offered} exceeds the {outstanding} outstanding on booking {id}")]
    Overpayment {
        id: BookingId,
        outstanding: Amount,
        offered: Amount,
    },

    #[error("amount paid {paid} exceeds the price {total}")]
    ExceedsPrice { total: Amount, paid: Amount },

    #[error("a {stage} of {total} needs at least {required}, got {paid}")]
    InsufficientPayment {
        stage: Stage,
        total: Amount,
        required: Amount,
        paid: Amount,
    },

    #[error("no reference data named '{dataset}'")]
    UnknownDataset { dataset: String },
}
