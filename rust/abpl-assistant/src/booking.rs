//! Where confirmed bookings and their payments are kept.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amount::Amount;
use crate::error::AssistantError;
use crate::payment::{PaymentPolicy, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(u64);

impl BookingId {
    pub fn new(id: u64) -> Self {
        BookingId(id)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = AssistantError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.trim()
            .parse()
            .map(BookingId)
            .map_err(|_| AssistantError::InvalidBookingId {
                text: text.to_string(),
            })
    }
}

/// What the assistant asks to have saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub username: String,
    pub total_price: Amount,
    pub amount_paid: Amount,
    /// The provider or product booked, e.g. "Knutsford Express".
    pub booking_type: String,
    #[serde(default)]
    pub stage: Stage,
}

impl BookingRecord {
    pub fn outstanding(&self) -> Amount {
        self.total_price.saturating_sub(self.amount_paid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Booking {
    pub id: BookingId,
    pub record: BookingRecord,
    pub cancelled: bool,
}

pub trait BookingStore {
    fn persist(&self, record: BookingRecord) -> Result<BookingId, AssistantError>;

    /// Cancel a booking owned by `username`.
    fn cancel(&self, username: &str, id: BookingId) -> Result<(), AssistantError>;

    /// Add `amount` to what has been paid and return the balance still owed.
    fn apply_payment(&self, id: BookingId, amount: Amount) -> Result<Amount, AssistantError>;

    fn get(&self, id: BookingId) -> Option<Booking>;
}

#[derive(Debug, Default)]
struct Ledger {
    last_id: u64,
    bookings: BTreeMap<BookingId, Booking>,
}

/// A [`BookingStore`] held in memory. Clones share the same bookings.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    policy: PaymentPolicy,
    ledger: Arc<Mutex<Ledger>>,
}

impl MemoryBookingStore {
    pub fn new(policy: PaymentPolicy) -> Self {
        MemoryBookingStore {
            policy,
            ledger: Arc::default(),
        }
    }

    pub fn bookings_for(&self, username: &str) -> Vec<Booking> {
        self.ledger
            .lock()
            .bookings
            .values()
            .filter(|booking| booking.record.username == username)
            .cloned()
            .collect()
    }
}

impl BookingStore for MemoryBookingStore {
    fn persist(&self, record: BookingRecord) -> Result<BookingId, AssistantError> {
        self.policy
            .check(record.stage, record.total_price, record.amount_paid)?;
        if record.amount_paid > record.total_price {
            return Err(AssistantError::ExceedsPrice {
                total: record.total_price,
                paid: record.amount_paid,
            });
        }

        let mut ledger = self.ledger.lock();
        ledger.last_id += 1;
        let id = BookingId(ledger.last_id);
        debug!(%id, username = %record.username, "persisting booking");
        ledger.bookings.insert(
            id,
            Booking {
                id,
                record,
                cancelled: false,
            },
        );
        Ok(id)
    }

    fn cancel(&self, username: &str, id: BookingId) -> Result<(), AssistantError> {
        let mut ledger = self.ledger.lock();
        let booking = ledger
            .bookings
            .get_mut(&id)
            .ok_or(AssistantError::UnknownBooking { id })?;

        if booking.record.username != username {
            return Err(AssistantError::NotOwner {
                id,
                username: username.to_string(),
            });
        }
        if booking.cancelled {
            return Err(AssistantError::AlreadyCancelled { id });
        }
        booking.cancelled = true;
        debug!(%id, username, "cancelled booking");
        Ok(())
    }

    fn apply_payment(&self, id: BookingId, amount: Amount) -> Result<Amount, AssistantError> {
        let mut ledger = self.ledger.lock();
        let booking = ledger
            .bookings
            .get_mut(&id)
            .ok_or(AssistantError::UnknownBooking { id })?;

        if booking.cancelled {
            return Err(AssistantError::AlreadyCancelled { id });
        }
        let outstanding = booking.record.outstanding();
        if amount > outstanding {
            return Err(AssistantError::Overpayment {
                id,
                outstanding,
                offered: amount,
            });
        }

        booking.record.amount_paid = booking.record.amount_paid.saturating_add(amount);
        if booking.record.outstanding() == Amount::ZERO {
            booking.record.stage = Stage::Confirmation;
        }
        Ok(booking.record.outstanding())
    }

    fn get(&self, id: BookingId) -> Option<Booking> {
        self.ledger.lock().bookings.get(&id).cloned()
    }
}
