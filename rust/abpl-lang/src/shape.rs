//! Sentence shapes: the admissible token sequences of each command.
//!
//! Every shape is an explicit identifier with an ordered slot list. A slot
//! names the field a token fills in the command tree and the token kind it
//! must have. Two shapes are told apart by their whole kind sequence, never by
//! length alone, and [`crate::grammar::Grammar::new`] refuses a table in which
//! two shapes declare the same sequence.

use std::fmt;

use serde::Serialize;

use crate::token::TokenKind;

/// One position in a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub name: &'static str,
    pub kind: TokenKind,
}

const fn slot(name: &'static str, kind: TokenKind) -> Slot {
    Slot { name, kind }
}

mod slots {
    use super::{Slot, slot};
    use crate::token::TokenKind::*;

    pub const ACTION: Slot = slot("action", ActionKeyword);
    pub const RESOURCE: Slot = slot("resource", Resource);
    pub const MARKER: Slot = slot("marker", LocationMarker);
    pub const CONTEXT: Slot = slot("context", ContextKeyword);
    pub const DEPARTURE: Slot = slot("departure", Departure);
    pub const ARRIVAL: Slot = slot("arrival", Arrival);
    pub const LOCATION: Slot = slot("location", Location);
    pub const SERVICE: Slot = slot("service", Service);
    pub const USERNAME: Slot = slot("username", Username);
    pub const START_DATE: Slot = slot("start_date", StartDate);
    pub const END_DATE: Slot = slot("end_date", EndDate);
    pub const DATE: Slot = slot("date", Date);
    pub const TIME: Slot = slot("time", Time);
    pub const RETURN_TIME: Slot = slot("return_time", Time);
    pub const CONNECTIVE: Slot = slot("connective", ConnectiveWord);
    pub const CONDITIONS: Slot = slot("conditions", Conditions);
    pub const BUDGET: Slot = slot("budget", Money);
    pub const AMOUNT: Slot = slot("amount", Money);
    pub const ARTICLE: Slot = slot("article", ArticleConjunction);
    pub const PASSENGERS: Slot = slot("passengers", Number);
    pub const PASSENGER_TYPE: Slot = slot("passenger_type", PassengerType);
    pub const SEATS: Slot = slot("seats", Number);
    pub const TICKET_TYPE: Slot = slot("ticket_type", TicketType);
    pub const BOOKING_ID: Slot = slot("booking_id", Number);
    pub const LIST: Slot = slot("list", ListKeyword);
    pub const RENT: Slot = slot("rent", RentKeyword);
    pub const INQUIRY: Slot = slot("inquiry", InquiryKeyword);
    pub const CONFIRM: Slot = slot("confirm", ConfirmKeyword);
    pub const PAYMENT_TYPE: Slot = slot("payment_type", PaymentType);
    pub const SYMBOL: Slot = slot("symbol", Symbol);
}

use slots::*;

/// The six command variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    Booking,
    List,
    Payment,
    Inquiry,
    Rent,
    Confirm,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Booking => "Booking",
            CommandKind::List => "List",
            CommandKind::Payment => "Payment",
            CommandKind::Inquiry => "Inquiry",
            CommandKind::Rent => "Rent",
            CommandKind::Confirm => "Confirm",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingShape {
    /// Book a ticket from Jamaica to USA.
    RouteOutbound,
    /// Book a ticket to USA from Jamaica.
    RouteInbound,
    /// Book a Flight to Miami from Kingston that cost less than $500.
    RouteWithBudget,
    /// Book a ticket to USA from Jamaica and a Room from March 10, 2025 to
    /// March 15, 2025.
    RouteWithStay,
    /// Book a Knutsford Express Ticket from Kingston to Montego Bay on March
    /// 3, 2025 at 10:00 AM for rob_jam1.
    ServiceTrip,
    /// Book a Ticket from Kingston to Ocho Rios on March 3, 2025 at 9:00 AM
    /// Returning on March 7, 2025 at 17:30.
    ReturnTrip,
    /// Book a Room at AC Hotel from March 10, 2025 to March 15, 2025 for
    /// Joy_Reynolds.
    StayAtService,
    /// Book a Ticket from Kingston on March 3, 2025 to Negril on March 5,
    /// 2025.
    DatedRoute,
    /// Book a Room in Negril from March 10, 2025 to March 15, 2025 for
    /// Joy_Reynolds.
    StayInLocation,
    /// Book a Knutsford Express Ticket from Kingston to Negril on March 3,
    /// 2025 at 8:00 AM for 2 Adults.
    PassengerTrip,
    /// Book 2 Seats on March 3, 2025.
    SeatCount,
    /// Book 2 Economy Seats on March 3, 2025.
    TypedSeatCount,
    /// Cancel a Booking 12 for rob_jam1.
    Cancellation,
}

impl BookingShape {
    pub const ALL: [BookingShape; 13] = [
        BookingShape::RouteOutbound,
        BookingShape::RouteInbound,
        BookingShape::RouteWithBudget,
        BookingShape::RouteWithStay,
        BookingShape::ServiceTrip,
        BookingShape::ReturnTrip,
        BookingShape::StayAtService,
        BookingShape::DatedRoute,
        BookingShape::StayInLocation,
        BookingShape::PassengerTrip,
        BookingShape::SeatCount,
        BookingShape::TypedSeatCount,
        BookingShape::Cancellation,
    ];

    pub fn slots(self) -> &'static [Slot] {
        match self {
            BookingShape::RouteOutbound => {
                &[ACTION, RESOURCE, MARKER, DEPARTURE, MARKER, ARRIVAL, SYMBOL]
            }
            BookingShape::RouteInbound => {
                &[ACTION, RESOURCE, MARKER, ARRIVAL, MARKER, DEPARTURE, SYMBOL]
            }
            BookingShape::RouteWithBudget => &[
                ACTION, RESOURCE, MARKER, ARRIVAL, MARKER, DEPARTURE, CONNECTIVE, CONTEXT,
                CONDITIONS, BUDGET, SYMBOL,
            ],
            BookingShape::RouteWithStay => &[
                ACTION, RESOURCE, MARKER, ARRIVAL, MARKER, DEPARTURE, ARTICLE, ARTICLE,
                RESOURCE, MARKER, START_DATE, MARKER, END_DATE, SYMBOL,
            ],
            BookingShape::ServiceTrip => &[
                ACTION, SERVICE, RESOURCE, MARKER, DEPARTURE, MARKER, ARRIVAL, CONTEXT,
                START_DATE, MARKER, TIME, CONTEXT, USERNAME, SYMBOL,
            ],
            BookingShape::ReturnTrip => &[
                ACTION, RESOURCE, MARKER, DEPARTURE, MARKER, ARRIVAL, CONTEXT, START_DATE,
                MARKER, TIME, CONTEXT, CONTEXT, END_DATE, MARKER, RETURN_TIME, SYMBOL,
            ],
            BookingShape::StayAtService => &[
                ACTION, RESOURCE, MARKER, SERVICE, MARKER, START_DATE, MARKER, END_DATE,
                CONTEXT, USERNAME, SYMBOL,
            ],
            BookingShape::DatedRoute => &[
                ACTION, RESOURCE, MARKER, DEPARTURE, CONTEXT, START_DATE, MARKER, ARRIVAL,
                CONTEXT, DATE, SYMBOL,
            ],
            BookingShape::StayInLocation => &[
                ACTION, RESOURCE, MARKER, LOCATION, MARKER, START_DATE, MARKER, END_DATE,
                CONTEXT, USERNAME, SYMBOL,
            ],
            BookingShape::PassengerTrip => &[
                ACTION, SERVICE, RESOURCE, MARKER, DEPARTURE, MARKER, ARRIVAL, CONTEXT,
                START_DATE, MARKER, TIME, CONTEXT, PASSENGERS, PASSENGER_TYPE, SYMBOL,
            ],
            BookingShape::SeatCount => &[ACTION, SEATS, RESOURCE, CONTEXT, DATE, SYMBOL],
            BookingShape::TypedSeatCount => {
                &[ACTION, SEATS, TICKET_TYPE, RESOURCE, CONTEXT, DATE, SYMBOL]
            }
            BookingShape::Cancellation => {
                &[ACTION, RESOURCE, BOOKING_ID, CONTEXT, USERNAME, SYMBOL]
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListShape {
    /// List Flights from Kingston to Miami.
    Route,
    /// List all Rental Cars in Kingston.
    Rentals,
    /// List Knutsford Express Schedule.
    Schedule,
    /// List Knutsford Express Schedule from Kingston to Negril.
    ScheduleRoute,
    /// List Bookings for rob_jam1.
    UserBookings,
}

impl ListShape {
    pub const ALL: [ListShape; 5] = [
        ListShape::Route,
        ListShape::Rentals,
        ListShape::Schedule,
        ListShape::ScheduleRoute,
        ListShape::UserBookings,
    ];

    pub fn slots(self) -> &'static [Slot] {
        match self {
            ListShape::Route => &[LIST, RESOURCE, MARKER, DEPARTURE, MARKER, ARRIVAL, SYMBOL],
            ListShape::Rentals => &[LIST, CONTEXT, RENT, RESOURCE, MARKER, LOCATION, SYMBOL],
            ListShape::Schedule => &[LIST, SERVICE, CONTEXT, SYMBOL],
            ListShape::ScheduleRoute => {
                &[LIST, SERVICE, CONTEXT, MARKER, DEPARTURE, MARKER, ARRIVAL, SYMBOL]
            }
            ListShape::UserBookings => &[LIST, RESOURCE, CONTEXT, USERNAME, SYMBOL],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentShape {
    /// Pay Tickets for Knutsford Express for rob_jam1.
    ServiceFee,
    /// Credit card.
    Method,
    /// Pay $50 for Booking 12.
    Instalment,
}

impl PaymentShape {
    pub const ALL: [PaymentShape; 3] = [
        PaymentShape::ServiceFee,
        PaymentShape::Method,
        PaymentShape::Instalment,
    ];

    pub fn slots(self) -> &'static [Slot] {
        match self {
            PaymentShape::ServiceFee => {
                &[ACTION, RESOURCE, CONTEXT, SERVICE, CONTEXT, USERNAME, SYMBOL]
            }
            PaymentShape::Method => &[PAYMENT_TYPE, SYMBOL],
            PaymentShape::Instalment => &[ACTION, AMOUNT, CONTEXT, RESOURCE, BOOKING_ID, SYMBOL],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryShape {
    /// How many tickets are there from USA to Jamaica.
    Availability,
    /// What is the cost for Knutsford Express from Kingston to Negril on
    /// March 3, 2025.
    Fare,
}

impl InquiryShape {
    pub const ALL: [InquiryShape; 2] = [InquiryShape::Availability, InquiryShape::Fare];

    pub fn slots(self) -> &'static [Slot] {
        match self {
            InquiryShape::Availability => {
                &[INQUIRY, RESOURCE, CONTEXT, MARKER, DEPARTURE, MARKER, ARRIVAL, SYMBOL]
            }
            InquiryShape::Fare => &[
                INQUIRY, CONTEXT, CONTEXT, SERVICE, MARKER, DEPARTURE, MARKER, ARRIVAL, CONTEXT,
                DATE, SYMBOL,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RentShape {
    /// Rent a Car in Kingston from March 10, 2025 to March 15, 2025 for
    /// Joy_Reynolds.
    Stay,
}

impl RentShape {
    pub const ALL: [RentShape; 1] = [RentShape::Stay];

    pub fn slots(self) -> &'static [Slot] {
        match self {
            RentShape::Stay => &[
                RENT, RESOURCE, MARKER, LOCATION, MARKER, START_DATE, MARKER, END_DATE, CONTEXT,
                USERNAME, SYMBOL,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmShape {
    /// Confirm AC Hotel Check-in for Joy_Reynolds.
    Service,
}

impl ConfirmShape {
    pub const ALL: [ConfirmShape; 1] = [ConfirmShape::Service];

    pub fn slots(self) -> &'static [Slot] {
        match self {
            ConfirmShape::Service => &[CONFIRM, SERVICE, ACTION, CONTEXT, USERNAME, SYMBOL],
        }
    }
}

/// A shape of any command variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "command", content = "shape", rename_all = "snake_case")]
pub enum ShapeId {
    Booking(BookingShape),
    List(ListShape),
    Payment(PaymentShape),
    Inquiry(InquiryShape),
    Rent(RentShape),
    Confirm(ConfirmShape),
}

impl ShapeId {
    /// Every declared shape, grouped by command.
    pub fn all() -> Vec<ShapeId> {
        let mut shapes = Vec::new();
        shapes.extend(BookingShape::ALL.map(ShapeId::Booking));
        shapes.extend(ListShape::ALL.map(ShapeId::List));
        shapes.extend(PaymentShape::ALL.map(ShapeId::Payment));
        shapes.extend(InquiryShape::ALL.map(ShapeId::Inquiry));
        shapes.extend(RentShape::ALL.map(ShapeId::Rent));
        shapes.extend(ConfirmShape::ALL.map(ShapeId::Confirm));
        shapes
    }

    pub fn slots(self) -> &'static [Slot] {
        match self {
            ShapeId::Booking(shape) => shape.slots(),
            ShapeId::List(shape) => shape.slots(),
            ShapeId::Payment(shape) => shape.slots(),
            ShapeId::Inquiry(shape) => shape.slots(),
            ShapeId::Rent(shape) => shape.slots(),
            ShapeId::Confirm(shape) => shape.slots(),
        }
    }

    pub fn command(self) -> CommandKind {
        match self {
            ShapeId::Booking(_) => CommandKind::Booking,
            ShapeId::List(_) => CommandKind::List,
            ShapeId::Payment(_) => CommandKind::Payment,
            ShapeId::Inquiry(_) => CommandKind::Inquiry,
            ShapeId::Rent(_) => CommandKind::Rent,
            ShapeId::Confirm(_) => CommandKind::Confirm,
        }
    }

    pub fn arity(self) -> usize {
        self.slots().len()
    }

    /// The token kinds this shape accepts, in order.
    pub fn kinds(self) -> impl Iterator<Item = TokenKind> {
        self.slots().iter().map(|slot| slot.kind)
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeId::Booking(shape) => write!(f, "Booking::{shape:?}"),
            ShapeId::List(shape) => write!(f, "List::{shape:?}"),
            ShapeId::Payment(shape) => write!(f, "Payment::{shape:?}"),
            ShapeId::Inquiry(shape) => write!(f, "Inquiry::{shape:?}"),
            ShapeId::Rent(shape) => write!(f, "Rent::{shape:?}"),
            ShapeId::Confirm(shape) => write!(f, "Confirm::{shape:?}"),
        }
    }
}
