use abpl_lang::error::{SemanticError, SyntaxError};
use abpl_lang::shape::{
    BookingShape, ConfirmShape, InquiryShape, ListShape, PaymentShape, RentShape, ShapeId,
};
use abpl_lang::validate::validate;
use abpl_lang::{Interpreter, Outcome, Rejection, RejectionKind, TokenKind};
use pretty_assertions::assert_eq;
use testresult::TestResult;

fn interpreter() -> Interpreter {
    Interpreter::english().unwrap()
}

fn accept(sentence: &str) -> abpl_lang::CommandTree {
    match interpreter().interpret(sentence) {
        Outcome::Accepted(tree) => tree,
        Outcome::Rejected(rejection) => panic!("{sentence:?} rejected: {rejection}"),
    }
}

fn reject(sentence: &str) -> Rejection {
    match interpreter().interpret(sentence) {
        Outcome::Accepted(tree) => panic!("{sentence:?} accepted as {}", tree.shape()),
        Outcome::Rejected(rejection) => rejection,
    }
}

#[test_log::test]
fn route_with_arrival_first() {
    let tree = accept("Book a ticket to USA from Jamaica.");
    assert_eq!(tree.shape(), ShapeId::Booking(BookingShape::RouteInbound));
    assert_eq!(
        tree.pairs(),
        vec![
            ("action", "Book a"),
            ("resource", "ticket"),
            ("marker", "to"),
            ("arrival", "USA"),
            ("marker", "from"),
            ("departure", "Jamaica"),
            ("symbol", "."),
        ]
    );
}

#[test_log::test]
fn hotel_stay_for_a_user() {
    let tree = accept(
        "Book a Room at AC Hotel from March 10, 2025 to March 15, 2025 for Joy_Reynolds.",
    );
    assert_eq!(tree.shape(), ShapeId::Booking(BookingShape::StayAtService));
    assert_eq!(tree.text("service"), Some("AC Hotel"));
    assert_eq!(tree.text("start_date"), Some("March 10, 2025"));
    assert_eq!(tree.text("end_date"), Some("March 15, 2025"));
    assert_eq!(tree.text("username"), Some("Joy_Reynolds"));
}

#[test_log::test]
fn hotel_stay_ending_before_it_starts() {
    let sentence =
        "Book a Room at AC Hotel from March 10, 2025 to March 5, 2025 for Joy_Reynolds.";
    let rejection = reject(sentence);
    assert_eq!(rejection.kind(), RejectionKind::Semantic);
    assert!(rejection.to_string().starts_with("end date precedes start date"));
    assert_eq!(Some(rejection.position()), sentence.find("March 5, 2025"));
}

#[test_log::test]
fn reservation_of_a_reservation_is_not_a_sentence() {
    let rejection = reject("Reserve a Reservation.");
    assert_eq!(
        rejection,
        Rejection::Syntax(SyntaxError::UnexpectedToken {
            kind: TokenKind::Symbol,
            text: ".".into(),
            position: 21,
        })
    );
}

#[test_log::test]
fn missing_terminal_symbol_is_unexpected_end() {
    let rejection = reject("Book a ticket to USA from Jamaica");
    assert_eq!(
        rejection,
        Rejection::Syntax(SyntaxError::UnexpectedEnd { position: 33 })
    );
}

#[test_log::test]
fn every_declared_shape_has_a_sentence() {
    let cases = [
        (
            "Book a ticket from Jamaica to USA.",
            ShapeId::Booking(BookingShape::RouteOutbound),
        ),
        (
            "Book a ticket to USA from Jamaica.",
            ShapeId::Booking(BookingShape::RouteInbound),
        ),
        (
            "Book a Flight to Miami from Kingston that cost less than $500.",
            ShapeId::Booking(BookingShape::RouteWithBudget),
        ),
        (
            "Book a ticket to USA from Jamaica and a Room from March 10, 2025 to March 15, 2025.",
            ShapeId::Booking(BookingShape::RouteWithStay),
        ),
        (
            "Book a Knutsford Express Ticket from Kingston to Montego Bay on March 3, 2025 at 10:00 AM for rob_jam1.",
            ShapeId::Booking(BookingShape::ServiceTrip),
        ),
        (
            "Book a Ticket from Kingston to Ocho Rios on March 3, 2025 at 9:00 AM Returning on March 7, 2025 at 17:30.",
            ShapeId::Booking(BookingShape::ReturnTrip),
        ),
        (
            "Book a Room at AC Hotel from March 10, 2025 to March 15, 2025 for Joy_Reynolds.",
            ShapeId::Booking(BookingShape::StayAtService),
        ),
        (
            "Book a Ticket from Kingston on March 3, 2025 to Negril on March 5, 2025.",
            ShapeId::Booking(BookingShape::DatedRoute),
        ),
        (
            "Book a Room in Negril from March 10, 2025 to March 15, 2025 for Joy_Reynolds.",
            ShapeId::Booking(BookingShape::StayInLocation),
        ),
        (
            "Book a Knutsford Express Ticket from Kingston to Negril on March 3, 2025 at 8:00 AM for 2 Adults.",
            ShapeId::Booking(BookingShape::PassengerTrip),
        ),
        (
            "Book 2 Seats on March 3, 2025.",
            ShapeId::Booking(BookingShape::SeatCount),
        ),
        (
            "Book 2 Economy Seats on March 3, 2025.",
            ShapeId::Booking(BookingShape::TypedSeatCount),
        ),
        (
            "Cancel a Booking 12 for rob_jam1.",
            ShapeId::Booking(BookingShape::Cancellation),
        ),
        (
            "List Flights from Kingston to Miami.",
            ShapeId::List(ListShape::Route),
        ),
        (
            "List all Rental Cars in Kingston.",
            ShapeId::List(ListShape::Rentals),
        ),
        (
            "List Knutsford Express Schedule.",
            ShapeId::List(ListShape::Schedule),
        ),
        (
            "List Knutsford Express Schedule from Kingston to Negril.",
            ShapeId::List(ListShape::ScheduleRoute),
        ),
        (
            "List Bookings for rob_jam1.",
            ShapeId::List(ListShape::UserBookings),
        ),
        (
            "Pay Tickets for Knutsford Express for rob_jam1.",
            ShapeId::Payment(PaymentShape::ServiceFee),
        ),
        ("Credit card.", ShapeId::Payment(PaymentShape::Method)),
        (
            "Pay $50 for Booking 12.",
            ShapeId::Payment(PaymentShape::Instalment),
        ),
        (
            "How many tickets are there from USA to Jamaica.",
            ShapeId::Inquiry(InquiryShape::Availability),
        ),
        (
            "What is the cost for Knutsford Express from Kingston to Negril on March 3, 2025.",
            ShapeId::Inquiry(InquiryShape::Fare),
        ),
        (
            "Rent a Car in Kingston from March 10, 2025 to March 15, 2025 for Joy_Reynolds.",
            ShapeId::Rent(RentShape::Stay),
        ),
        (
            "Confirm AC Hotel Check-in for Joy_Reynolds.",
            ShapeId::Confirm(ConfirmShape::Service),
        ),
    ];

    for (sentence, shape) in &cases {
        assert_eq!(accept(sentence).shape(), *shape, "{sentence}");
    }

    let covered: Vec<ShapeId> = cases.iter().map(|(_, shape)| *shape).collect();
    for shape in ShapeId::all() {
        assert!(covered.contains(&shape), "no sentence for {shape}");
    }
}

#[test_log::test]
fn return_trip_fields() {
    let tree = accept(
        "Book a Ticket from Kingston to Ocho Rios on March 3, 2025 at 9:00 AM Returning on March 7, 2025 at 17:30.",
    );
    assert_eq!(tree.text("arrival"), Some("Ocho Rios"));
    assert_eq!(tree.text("time"), Some("9:00 AM"));
    assert_eq!(tree.text("end_date"), Some("March 7, 2025"));
    assert_eq!(tree.text("return_time"), Some("17:30"));
}

#[test_log::test]
fn keywords_are_case_insensitive() {
    let tree = accept("book a TICKET TO usa FROM jamaica.");
    assert_eq!(tree.shape(), ShapeId::Booking(BookingShape::RouteInbound));
    assert_eq!(tree.text("action"), Some("book a"));
}

#[test_log::test]
fn newlines_separate_words_only() {
    let tree = accept("List Flights\nfrom Kingston\nto Miami.");
    assert_eq!(tree.text("arrival"), Some("Miami"));
}

fn trip_at(time: &str) -> Outcome {
    interpreter().interpret(&format!(
        "Book a Knutsford Express Ticket from Kingston to Montego Bay on March 3, 2025 at {time} for rob_jam1."
    ))
}

#[test_log::test]
fn clock_times() {
    assert!(trip_at("1:00 PM").is_accepted());
    assert!(trip_at("12:45 am").is_accepted());
    assert!(trip_at("23:59").is_accepted());
    assert!(trip_at("0:00").is_accepted());

    for time in ["13:00 PM", "24:00", "9:75"] {
        match trip_at(time) {
            Outcome::Rejected(Rejection::Semantic(SemanticError::InvalidTime { value, .. })) => {
                assert_eq!(value, time)
            }
            other => panic!("{time}: expected invalid time, got {other:?}"),
        }
    }
}

fn stay(start: &str, end: &str) -> Outcome {
    interpreter().interpret(&format!(
        "Rent a Car in Kingston from {start} to {end} for Joy_Reynolds."
    ))
}

#[test_log::test]
fn date_ranges_must_move_forward() {
    assert!(stay("March 10, 2025", "March 11, 2025").is_accepted());
    assert!(stay("Dec 31, 2024", "Jan 1, 2025").is_accepted());

    for (start, end) in [
        ("March 10, 2025", "March 10, 2025"),
        ("March 10, 2025", "March 9, 2025"),
        ("Jan 1, 2026", "Dec 31, 2025"),
    ] {
        let rejection = stay(start, end).into_result().unwrap_err();
        assert!(
            matches!(rejection, Rejection::Semantic(SemanticError::DateOrder { .. })),
            "{start} → {end}: {rejection}"
        );
    }
}

#[test_log::test]
fn impossible_dates_are_semantic_errors() {
    let rejection = stay("February 30, 2025", "March 2, 2025")
        .into_result()
        .unwrap_err();
    assert_eq!(
        rejection,
        Rejection::Semantic(SemanticError::InvalidDate {
            field: "start_date",
            value: "February 30, 2025".into(),
            position: 28,
        })
    );
}

#[test_log::test]
fn misspelled_month_is_a_semantic_error() {
    let rejection = stay("Marchh 10, 2025", "March 12, 2025")
        .into_result()
        .unwrap_err();
    assert_eq!(rejection.kind(), RejectionKind::Semantic);
}

#[test_log::test]
fn every_lexical_error_is_reported() {
    let rejection = reject("Book a ticket # to USA from @ Jamaica.");
    match rejection {
        Rejection::Lexical(errors) => {
            let found: Vec<(char, usize)> = errors
                .iter()
                .map(|error| (error.character, error.position))
                .collect();
            assert_eq!(found, vec![('#', 14), ('@', 28)]);
        }
        other => panic!("expected lexical rejection, got {other}"),
    }
}

fn lexical_errors(sentence: &str) -> Vec<(char, usize)> {
    match reject(sentence) {
        Rejection::Lexical(errors) => errors
            .iter()
            .map(|error| (error.character, error.position))
            .collect(),
        other => panic!("expected lexical rejection, got {other}"),
    }
}

#[test_log::test]
fn stray_character_after_a_place_is_the_only_error() {
    assert_eq!(lexical_errors("Book a ticket from Kingston# to USA."), vec![('#', 27)]);
    assert_eq!(lexical_errors("Book a ticket to USA from Jamaica!."), vec![('!', 33)]);
}

#[test_log::test]
fn misspelled_word_is_one_error() {
    assert_eq!(lexical_errors("Cancel a Booking 12 for Joy Reynolds."), vec![('R', 28)]);
}

#[test]
fn long_runs_of_stray_characters_are_each_reported() {
    let sentence = format!("Book a ticket from Kingston{} to USA.", "#".repeat(5000));
    let expected: Vec<(char, usize)> = (27..5027).map(|position| ('#', position)).collect();
    assert_eq!(lexical_errors(&sentence), expected);
}

#[test]
fn long_misspelled_text_is_scanned_once() {
    let sentence = format!("Book a ticket from{}.", " Kingst0n_".repeat(2000));
    assert_eq!(lexical_errors(&sentence).len(), 2000);
}

#[test_log::test]
fn place_with_digits_after_to_reads_as_a_date() {
    let rejection = reject("Book a ticket from Kingston to Route 66.");
    assert_eq!(
        rejection,
        Rejection::Syntax(SyntaxError::UnexpectedToken {
            kind: TokenKind::EndDate,
            text: "Route 66".into(),
            position: 31,
        })
    );
}

#[test_log::test]
fn validation_is_repeatable() -> TestResult {
    let tree = interpreter()
        .parse("Book a Room in Negril from March 10, 2025 to March 15, 2025 for Joy_Reynolds.")?;
    let first = validate(&tree);
    let second = validate(&tree);
    assert_eq!(first, second);
    assert_eq!(first, Ok(()));

    let reversed = interpreter()
        .parse("Book a Room in Negril from March 15, 2025 to March 10, 2025 for Joy_Reynolds.")?;
    assert_eq!(validate(&reversed), validate(&reversed));
    assert!(validate(&reversed).is_err());
    Ok(())
}

#[test_log::test]
fn accepted_outcome_serializes_to_json() -> TestResult {
    let outcome = interpreter().interpret("Pay $50 for Booking 12.");
    let json = serde_json::to_value(&outcome)?;
    assert_eq!(json["outcome"], "accepted");
    assert_eq!(json["value"]["command"], "payment");
    assert_eq!(json["value"]["shape"], "instalment");
    assert_eq!(json["value"]["fields"][1]["token"]["text"], "$50");
    Ok(())
}

#[test_log::test]
fn one_interpreter_serves_many_threads() {
    let interpreter = &interpreter();
    let sentences = [
        "List Flights from Kingston to Miami.",
        "Credit card.",
        "Confirm AC Hotel Check-in for Joy_Reynolds.",
        "How many tickets are there from USA to Jamaica.",
    ];
    std::thread::scope(|scope| {
        let handles: Vec<_> = sentences
            .iter()
            .map(|sentence| scope.spawn(move || interpreter.interpret(sentence).is_accepted()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().ok(), Some(true));
        }
    });
}
