//! Collaborators around the ABPL interpreter.
//!
//! The interpreter only decides whether a sentence is well formed. Everything
//! that happens afterwards goes through the contracts in this crate: the
//! [`TurnLog`] transcript, the [`AssistantReply`] an [`Assistant`] produces,
//! and the [`Dispatcher`] that executes the reply's [`ActionRequest`] against
//! a [`BookingStore`] and a [`FareSource`].
//!
//! ```rust
//! use abpl_assistant::{CommandAssistant, Dispatcher, FareTable, MemoryBookingStore, TurnLog};
//! use abpl_lang::Interpreter;
//!
//! let assistant = CommandAssistant::new(Interpreter::english().unwrap());
//! let dispatcher = Dispatcher::new(MemoryBookingStore::default(), FareTable::new());
//!
//! let exchange = dispatcher
//!     .converse(&assistant, &TurnLog::new(), "List Bookings for rob_jam1.")
//!     .unwrap();
//! assert_eq!(exchange.log.len(), 2);
//! ```

pub mod action;
pub mod amount;
pub mod assistant;
pub mod booking;
pub mod dispatch;
pub mod error;
pub mod fare;
pub mod history;
pub mod payment;

pub use action::{ActionRequest, AssistantReply};
pub use amount::Amount;
pub use assistant::{Assistant, CommandAssistant};
pub use booking::{Booking, BookingId, BookingRecord, BookingStore, MemoryBookingStore};
pub use dispatch::{Dispatched, Dispatcher, Exchange};
pub use error::AssistantError;
pub use fare::{FareRecord, FareSource, FareTable};
pub use history::{Role, Turn, TurnLog};
pub use payment::{PaymentPolicy, Stage};
