//! Carrying out the assistant's requests.

use std::fmt;

use tracing::{debug, info};

use crate::action::{ActionRequest, AssistantReply};
use crate::amount::Amount;
use crate::assistant::Assistant;
use crate::booking::{BookingId, BookingStore};
use crate::error::AssistantError;
use crate::fare::FareSource;
use crate::history::{Turn, TurnLog};

/// What executing one [`ActionRequest`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Nothing,
    ReferenceData(String),
    Persisted(BookingId),
    Cancelled(BookingId),
    PaymentApplied {
        booking_id: BookingId,
        outstanding: Amount,
    },
}

impl fmt::Display for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatched::Nothing => write!(f, "nothing to do"),
            Dispatched::ReferenceData(document) => write!(f, "reference data:\n{document}"),
            Dispatched::Persisted(id) => write!(f, "booking {id} saved"),
            Dispatched::Cancelled(id) => write!(f, "booking {id} cancelled"),
            Dispatched::PaymentApplied {
                booking_id,
                outstanding,
            } => write!(
                f,
                "payment applied to booking {booking_id}, {outstanding} outstanding"
            ),
        }
    }
}

/// One user sentence, the assistant's answer, and its effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub reply: AssistantReply,
    pub dispatched: Dispatched,
    pub log: TurnLog,
}

#[derive(Debug, Clone)]
pub struct Dispatcher<S, F> {
    store: S,
    fares: F,
}

impl<S: BookingStore, F: FareSource> Dispatcher<S, F> {
    pub fn new(store: S, fares: F) -> Self {
        Dispatcher { store, fares }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fares(&self) -> &F {
        &self.fares
    }

    /// Execute `request`, returning its effect and `log` extended with a
    /// summary turn. A request that does nothing leaves the log as it was.
    pub fn execute(
        &self,
        log: &TurnLog,
        request: &ActionRequest,
    ) -> Result<(Dispatched, TurnLog), AssistantError> {
        let dispatched = match request {
            ActionRequest::NoAction => return Ok((Dispatched::Nothing, log.clone())),
            ActionRequest::FetchReferenceData { dataset } => {
                Dispatched::ReferenceData(self.fares.document(dataset)?)
            }
            ActionRequest::PersistBooking(record) => {
                Dispatched::Persisted(self.store.persist(record.clone())?)
            }
            ActionRequest::CancelBooking {
                username,
                booking_id,
            } => {
                self.store.cancel(username, *booking_id)?;
                Dispatched::Cancelled(*booking_id)
            }
            ActionRequest::ApplyPayment { booking_id, amount } => Dispatched::PaymentApplied {
                booking_id: *booking_id,
                outstanding: self.store.apply_payment(*booking_id, *amount)?,
            },
        };

        info!(%dispatched, "dispatched action");
        let log = log.push(Turn::model(dispatched.to_string()));
        Ok((dispatched, log))
    }

    /// Add `sentence` to the log, ask `assistant` for a reply and execute
    /// whatever it requests.
    pub fn converse<A: Assistant>(
        &self,
        assistant: &A,
        log: &TurnLog,
        sentence: &str,
    ) -> Result<Exchange, AssistantError> {
        let log = log.push(Turn::user(sentence));
        let reply = assistant.reply(&log)?;
        debug!(action = ?reply.action, "assistant replied");

        let log = log.push(Turn::model(reply.message.clone()));
        let (dispatched, log) = self.execute(&log, &reply.action)?;
        Ok(Exchange {
            reply,
            dispatched,
            log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingRecord, MemoryBookingStore};
    use crate::fare::{FareRecord, FareTable};
    use crate::history::Role;
    use crate::payment::Stage;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn dispatcher() -> Dispatcher<MemoryBookingStore, FareTable> {
        let mut fares = FareTable::new();
        fares.insert(
            "1",
            FareRecord::new("Kingston to Negril", "Standard")
                .with_fare("Adult", Amount::from_dollars(30)),
        );
        Dispatcher::new(MemoryBookingStore::default(), fares)
    }

    fn persist(username: &str) -> ActionRequest {
        ActionRequest::PersistBooking(BookingRecord {
            username: username.to_string(),
            total_price: Amount::from_dollars(2000),
            amount_paid: Amount::from_dollars(1200),
            booking_type: "AC Hotel".to_string(),
            stage: Stage::Reservation,
        })
    }

    #[test]
    fn no_action_keeps_the_log() -> TestResult {
        let log = TurnLog::new().push(Turn::user("hi"));
        let (dispatched, after) = dispatcher().execute(&log, &ActionRequest::NoAction)?;

        assert_eq!(dispatched, Dispatched::Nothing);
        assert_eq!(after, log);
        Ok(())
    }

    #[test]
    fn persist_then_pay_then_cancel() -> TestResult {
        let dispatcher = dispatcher();
        let log = TurnLog::new();

        let (dispatched, log) = dispatcher.execute(&log, &persist("rob_jam1"))?;
        let id = BookingId::new(1);
        assert_eq!(dispatched, Dispatched::Persisted(id));

        let pay = ActionRequest::ApplyPayment {
            booking_id: id,
            amount: Amount::from_dollars(500),
        };
        let (dispatched, log) = dispatcher.execute(&log, &pay)?;
        assert_eq!(
            dispatched,
            Dispatched::PaymentApplied {
                booking_id: id,
                outstanding: Amount::from_dollars(300)
            }
        );

        let cancel = ActionRequest::CancelBooking {
            username: "rob_jam1".to_string(),
            booking_id: id,
        };
        let (_, log) = dispatcher.execute(&log, &cancel)?;

        let summaries: Vec<&str> = log.turns().iter().map(|turn| turn.content.as_str()).collect();
        assert_eq!(
            summaries,
            vec![
                "booking 1 saved",
                "payment applied to booking 1, $300.00 outstanding",
                "booking 1 cancelled",
            ]
        );
        assert!(log.turns().iter().all(|turn| turn.role == Role::Model));
        Ok(())
    }

    #[test]
    fn reference_data_lands_in_the_log() -> TestResult {
        let request = ActionRequest::FetchReferenceData {
            dataset: "fares".to_string(),
        };
        let (dispatched, log) = dispatcher().execute(&TurnLog::new(), &request)?;

        let Dispatched::ReferenceData(document) = dispatched else {
            panic!("expected reference data, got {dispatched:?}");
        };
        assert!(document.contains("Kingston to Negril"));
        assert!(log.last().ok_or("empty log")?.content.contains(&document));
        Ok(())
    }

    #[test]
    fn failures_leave_the_log_alone() {
        let log = TurnLog::new().push(Turn::user("cancel"));
        let cancel = ActionRequest::CancelBooking {
            username: "rob_jam1".to_string(),
            booking_id: BookingId::new(7),
        };

        let result = dispatcher().execute(&log, &cancel);
        assert!(matches!(result, Err(AssistantError::UnknownBooking { .. })));
        assert_eq!(log.len(), 1);
    }
}
