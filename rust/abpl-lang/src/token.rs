//! Tokens produced by the lexical classifier.
//!
//! A token never normalizes its text: `text` is the exact slice of the input
//! that was consumed, and `position` is its byte offset, so a token can always
//! be located again in the sentence it came from.

use std::fmt;

use serde::Serialize;

/// A single classified slice of an input sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What the classifier decided this slice is.
    pub kind: TokenKind,
    /// The input text exactly as written.
    pub text: String,
    /// Byte offset of the first character of `text` in the input.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            position,
        }
    }

    /// Byte offset one past the last character of the token.
    pub fn end(&self) -> usize {
        self.position + self.text.len()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' at {}", self.kind, self.text, self.position)
    }
}

/// The closed set of token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// "Book a", "Reserve a", "Cancel a", "Pay", "Check-in", ...
    ActionKeyword,
    ListKeyword,
    /// "on", "for", "all", "cost", "are there", "Returning", "Schedule".
    ContextKeyword,
    /// "from", "to", "in", "at".
    LocationMarker,
    ConnectiveWord,
    /// A date that is neither the start nor the end of a range.
    Date,
    StartDate,
    EndDate,
    Number,
    /// The terminal period run, a comma or a colon.
    Symbol,
    Money,
    Resource,
    Conditions,
    Time,
    Username,
    Departure,
    Arrival,
    Location,
    /// A provider name such as "Knutsford Express" or "AC Hotel".
    Service,
    ArticleConjunction,
    PaymentType,
    TicketType,
    PassengerType,
    RentKeyword,
    InquiryKeyword,
    ConfirmKeyword,
}

impl TokenKind {
    /// Kinds whose tokens come from a fixed word list.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::ActionKeyword
                | TokenKind::ListKeyword
                | TokenKind::ContextKeyword
                | TokenKind::LocationMarker
                | TokenKind::ConnectiveWord
                | TokenKind::Resource
                | TokenKind::Conditions
                | TokenKind::ArticleConjunction
                | TokenKind::PaymentType
                | TokenKind::TicketType
                | TokenKind::PassengerType
                | TokenKind::RentKeyword
                | TokenKind::InquiryKeyword
                | TokenKind::ConfirmKeyword
        )
    }

    /// Kinds whose extent is decided by the surrounding tokens.
    pub fn is_span(self) -> bool {
        matches!(
            self,
            TokenKind::Departure
                | TokenKind::Arrival
                | TokenKind::Location
                | TokenKind::Service
                | TokenKind::Username
        )
    }

    pub fn is_date(self) -> bool {
        matches!(
            self,
            TokenKind::Date | TokenKind::StartDate | TokenKind::EndDate
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::ActionKeyword => "ACTION_KEYWORD",
            TokenKind::ListKeyword => "LIST_KEYWORD",
            TokenKind::ContextKeyword => "CONTEXT_KEYWORD",
            TokenKind::LocationMarker => "LOCATION_MARKER",
            TokenKind::ConnectiveWord => "CONNECTIVE_WORD",
            TokenKind::Date => "DATE",
            TokenKind::StartDate => "START_DATE",
            TokenKind::EndDate => "END_DATE",
            TokenKind::Number => "NUMBER",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Money => "MONEY",
            TokenKind::Resource => "RESOURCE",
            TokenKind::Conditions => "CONDITIONS",
            TokenKind::Time => "TIME",
            TokenKind::Username => "USERNAME",
            TokenKind::Departure => "DEPARTURE",
            TokenKind::Arrival => "ARRIVAL",
            TokenKind::Location => "LOCATION",
            TokenKind::Service => "SERVICE",
            TokenKind::ArticleConjunction => "ARTICLE_CONJUNCTION",
            TokenKind::PaymentType => "PAYMENT_TYPE",
            TokenKind::TicketType => "TICKET_TYPE",
            TokenKind::PassengerType => "PASSENGER_TYPE",
            TokenKind::RentKeyword => "RENT_KEYWORD",
            TokenKind::InquiryKeyword => "INQUIRY_KEYWORD",
            TokenKind::ConfirmKeyword => "CONFIRM_KEYWORD",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_end_is_byte_offset_past_text() {
        let token = Token::new(TokenKind::Arrival, "USA", 17);
        assert_eq!(token.end(), 20);
    }

    #[test]
    fn kinds_display_in_screaming_case() {
        assert_eq!(TokenKind::StartDate.to_string(), "START_DATE");
        assert_eq!(TokenKind::ArticleConjunction.to_string(), "ARTICLE_CONJUNCTION");
    }

    #[test]
    fn kind_families_are_disjoint() {
        for kind in [
            TokenKind::LocationMarker,
            TokenKind::Departure,
            TokenKind::EndDate,
            TokenKind::Money,
        ] {
            let families = [kind.is_keyword(), kind.is_span(), kind.is_date()];
            assert!(families.iter().filter(|member| **member).count() <= 1);
        }
    }

    #[test]
    fn kinds_serialize_like_they_display() {
        let json = serde_json::to_string(&TokenKind::PassengerType).unwrap();
        assert_eq!(json, "\"PASSENGER_TYPE\"");
    }
}
