//! Word lists for the fixed-vocabulary token categories.
//!
//! The classifier tries categories in the order they appear in the
//! vocabulary, and the first category that matches at a scan position wins.
//! Reordering the lists therefore changes how a sentence is tokenized: "Book a"
//! must be an action before "a" can be an article, and "Rental" must be a rent
//! keyword before anything else gets to look at it.
//!
//! ```rust
//! use abpl_lang::token::TokenKind;
//! use abpl_lang::vocabulary::Vocabulary;
//!
//! let vocabulary = Vocabulary::english();
//! assert!(vocabulary.words(TokenKind::LocationMarker).contains(&"from".to_string()));
//! ```

use crate::error::VocabularyError;
use crate::token::TokenKind;

/// The words of one keyword category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    pub kind: TokenKind,
    pub words: Vec<String>,
}

/// Ordered keyword categories used by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    lists: Vec<WordList>,
}

impl Vocabulary {
    /// An empty vocabulary. Only literal categories (money, times, dates,
    /// numbers, symbols) and free-text spans will be recognized.
    pub fn empty() -> Self {
        Vocabulary { lists: Vec::new() }
    }

    /// The standard English travel-booking vocabulary.
    pub fn english() -> Self {
        let mut vocabulary = Vocabulary::empty();
        vocabulary.insert(
            TokenKind::ActionKeyword,
            [
                "Book a",
                "Book",
                "Reserve a",
                "Cancel a",
                "Duration of",
                "Check-in",
                "Check-out",
                "Cancellation",
                "Payment",
                "Pay",
            ],
        );
        vocabulary.insert(
            TokenKind::InquiryKeyword,
            ["How many", "How much", "What is the"],
        );
        vocabulary.insert(TokenKind::ConfirmKeyword, ["Confirm"]);
        vocabulary.insert(TokenKind::RentKeyword, ["Rent a", "Rental", "Rent"]);
        vocabulary.insert(TokenKind::ListKeyword, ["List"]);
        vocabulary.insert(
            TokenKind::PaymentType,
            ["credit card", "debit card", "bank transfer"],
        );
        vocabulary.insert(
            TokenKind::TicketType,
            [
                "Premium Economy",
                "Economy",
                "Business Class",
                "First Class",
                "One Way",
                "Round Trip",
            ],
        );
        vocabulary.insert(
            TokenKind::PassengerType,
            [
                "Adults", "Adult", "Children", "Child", "Seniors", "Senior", "Students",
                "Student", "Infants", "Infant",
            ],
        );
        vocabulary.insert(
            TokenKind::Conditions,
            ["less than", "more than", "equal to", "greater than", "if", "then"],
        );
        vocabulary.insert(
            TokenKind::Resource,
            [
                "Reservations",
                "Reservation",
                "Tickets",
                "Ticket",
                "Flights",
                "Flight",
                "Rooms",
                "Room",
                "Hotels",
                "Hotel",
                "Cars",
                "Car",
                "Seats",
                "Seat",
                "Bookings",
                "Booking",
            ],
        );
        vocabulary.insert(
            TokenKind::ContextKeyword,
            ["are there", "Returning", "Schedule", "cost", "all", "on", "for"],
        );
        vocabulary.insert(TokenKind::LocationMarker, ["from", "to", "in", "at"]);
        vocabulary.insert(TokenKind::ConnectiveWord, ["that"]);
        vocabulary.insert(TokenKind::ArticleConjunction, ["a", "an", "and"]);
        vocabulary
    }

    /// Append words to a category. A category seen for the first time is
    /// placed after every existing category.
    pub fn insert<I, S>(&mut self, kind: TokenKind, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words.into_iter().map(Into::into);
        match self.lists.iter_mut().find(|list| list.kind == kind) {
            Some(list) => list.words.extend(words),
            None => self.lists.push(WordList {
                kind,
                words: words.collect(),
            }),
        }
    }

    /// Builder form of [`Vocabulary::insert`].
    pub fn with<I, S>(mut self, kind: TokenKind, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(kind, words);
        self
    }

    pub fn words(&self, kind: TokenKind) -> &[String] {
        self.lists
            .iter()
            .find(|list| list.kind == kind)
            .map(|list| list.words.as_slice())
            .unwrap_or(&[])
    }

    /// Categories in matching order.
    pub fn lists(&self) -> &[WordList] {
        &self.lists
    }

    /// Reject categories that cannot be keyword categories, and empty words.
    pub fn check(&self) -> Result<(), VocabularyError> {
        for list in &self.lists {
            if !list.kind.is_keyword() {
                return Err(VocabularyError::NotAKeyword { kind: list.kind });
            }
            if list.words.iter().any(|word| word.trim().is_empty()) {
                return Err(VocabularyError::EmptyWord { kind: list.kind });
            }
        }
        Ok(())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::english()
    }
}
