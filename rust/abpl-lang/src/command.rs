//! The command tree produced by the grammar.

use serde::Serialize;

use crate::shape::{
    BookingShape, CommandKind, ConfirmShape, InquiryShape, ListShape, PaymentShape, RentShape,
    ShapeId,
};
use crate::token::Token;

/// A token paired with the name of the slot it filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub token: Token,
}

/// One recognized sentence of a particular command variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command<S> {
    pub shape: S,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandTree {
    Booking(Command<BookingShape>),
    List(Command<ListShape>),
    Payment(Command<PaymentShape>),
    Inquiry(Command<InquiryShape>),
    Rent(Command<RentShape>),
    Confirm(Command<ConfirmShape>),
}

impl CommandTree {
    /// Pair `tokens` with the slots of `shape`.
    ///
    /// The caller has already checked that the token kinds match the shape.
    pub(crate) fn assemble(shape: ShapeId, tokens: Vec<Token>) -> Self {
        let fields = shape
            .slots()
            .iter()
            .zip(tokens)
            .map(|(slot, token)| Field {
                name: slot.name,
                token,
            })
            .collect();

        match shape {
            ShapeId::Booking(shape) => CommandTree::Booking(Command { shape, fields }),
            ShapeId::List(shape) => CommandTree::List(Command { shape, fields }),
            ShapeId::Payment(shape) => CommandTree::Payment(Command { shape, fields }),
            ShapeId::Inquiry(shape) => CommandTree::Inquiry(Command { shape, fields }),
            ShapeId::Rent(shape) => CommandTree::Rent(Command { shape, fields }),
            ShapeId::Confirm(shape) => CommandTree::Confirm(Command { shape, fields }),
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.shape().command()
    }

    pub fn shape(&self) -> ShapeId {
        match self {
            CommandTree::Booking(command) => ShapeId::Booking(command.shape),
            CommandTree::List(command) => ShapeId::List(command.shape),
            CommandTree::Payment(command) => ShapeId::Payment(command.shape),
            CommandTree::Inquiry(command) => ShapeId::Inquiry(command.shape),
            CommandTree::Rent(command) => ShapeId::Rent(command.shape),
            CommandTree::Confirm(command) => ShapeId::Confirm(command.shape),
        }
    }

    pub fn fields(&self) -> &[Field] {
        match self {
            CommandTree::Booking(command) => &command.fields,
            CommandTree::List(command) => &command.fields,
            CommandTree::Payment(command) => &command.fields,
            CommandTree::Inquiry(command) => &command.fields,
            CommandTree::Rent(command) => &command.fields,
            CommandTree::Confirm(command) => &command.fields,
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.fields().iter().map(|field| &field.token)
    }

    /// The first field with the given name.
    pub fn field(&self, name: &str) -> Option<&Token> {
        self.fields()
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.token)
    }

    /// Text of the first field with the given name.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).map(|token| token.text.as_str())
    }

    /// `(name, text)` pairs in sentence order.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        self.fields()
            .iter()
            .map(|field| (field.name, field.token.text.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;

    fn cancellation() -> CommandTree {
        CommandTree::assemble(
            ShapeId::Booking(BookingShape::Cancellation),
            vec![
                Token::new(TokenKind::ActionKeyword, "Cancel a", 0),
                Token::new(TokenKind::Resource, "Booking", 9),
                Token::new(TokenKind::Number, "12", 17),
                Token::new(TokenKind::ContextKeyword, "for", 20),
                Token::new(TokenKind::Username, "rob_jam1", 24),
                Token::new(TokenKind::Symbol, ".", 32),
            ],
        )
    }

    #[test]
    fn assemble_names_each_token_after_its_slot() {
        let tree = cancellation();
        assert_eq!(tree.kind(), CommandKind::Booking);
        assert_eq!(
            tree.pairs(),
            vec![
                ("action", "Cancel a"),
                ("resource", "Booking"),
                ("booking_id", "12"),
                ("context", "for"),
                ("username", "rob_jam1"),
                ("symbol", "."),
            ]
        );
        assert_eq!(tree.text("booking_id"), Some("12"));
        assert_eq!(tree.text("service"), None);
    }

    #[test]
    fn tree_serializes_with_command_tag() {
        let json = serde_json::to_value(cancellation()).unwrap();
        assert_eq!(json["command"], "booking");
        assert_eq!(json["shape"], "cancellation");
        assert_eq!(json["fields"][4]["name"], "username");
        assert_eq!(json["fields"][4]["token"]["kind"], "USERNAME");
    }
}
