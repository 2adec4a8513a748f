//! Structured requests the assistant may attach to a reply.

use abpl_lang::CommandTree;
use abpl_lang::shape::{BookingShape, InquiryShape, PaymentShape, ShapeId};
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::booking::{BookingId, BookingRecord};
use crate::error::AssistantError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionRequest {
    #[default]
    NoAction,
    FetchReferenceData {
        dataset: String,
    },
    PersistBooking(BookingRecord),
    CancelBooking {
        username: String,
        booking_id: BookingId,
    },
    ApplyPayment {
        booking_id: BookingId,
        amount: Amount,
    },
}

impl ActionRequest {
    pub fn is_no_action(&self) -> bool {
        matches!(self, ActionRequest::NoAction)
    }
}

/// The request a command asks for directly, if any.
///
/// Bookings need a price, which only the assistant knows, so they map to
/// [`ActionRequest::NoAction`] here.
impl TryFrom<&CommandTree> for ActionRequest {
    type Error = AssistantError;

    fn try_from(tree: &CommandTree) -> Result<Self, Self::Error> {
        let text = |field: &'static str| {
            tree.text(field)
                .ok_or(AssistantError::MissingField { field })
        };

        Ok(match tree.shape() {
            ShapeId::Booking(BookingShape::Cancellation) => ActionRequest::CancelBooking {
                username: text("username")?.to_string(),
                booking_id: text("booking_id")?.parse()?,
            },
            ShapeId::Payment(PaymentShape::Instalment) => ActionRequest::ApplyPayment {
                booking_id: text("booking_id")?.parse()?,
                amount: text("amount")?.parse()?,
            },
            ShapeId::Inquiry(InquiryShape::Fare) => ActionRequest::FetchReferenceData {
                dataset: "fares".to_string(),
            },
            _ => ActionRequest::NoAction,
        })
    }
}

/// A reply from the assistant: text for the user plus at most one action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub message: String,
    #[serde(default)]
    pub action: ActionRequest,
}

impl AssistantReply {
    pub fn new(message: impl Into<String>, action: ActionRequest) -> Self {
        AssistantReply {
            message: message.into(),
            action,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, AssistantError> {
        Ok(serde_json::from_str(text.trim())?)
    }

    pub fn to_json(&self) -> Result<String, AssistantError> {
        Ok(serde_json::to_string(self)?)
    }
}
