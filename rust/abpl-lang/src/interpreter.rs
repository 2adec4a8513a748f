//! The interpreter pipeline, from raw sentence to outcome.
//!
//! ```text
//! sentence → Lexer (tokens, lexical errors)
//!   → Grammar (command tree | syntax error)
//!     → validate (accepted tree | semantic error)
//! ```
//!
//! Each stage only runs when the previous one succeeded completely. The
//! interpreter owns nothing but compiled, immutable tables, so one instance
//! can serve any number of threads.

use serde::Serialize;
use tracing::debug;

use crate::command::CommandTree;
use crate::error::{BuildError, Rejection};
use crate::grammar::Grammar;
use crate::lexer::{Lexer, Lexicon, tokenize};
use crate::shape::ShapeId;
use crate::token::Token;
use crate::validate::validate;
use crate::vocabulary::Vocabulary;

/// The result of interpreting one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    Accepted(CommandTree),
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn into_result(self) -> Result<CommandTree, Rejection> {
        match self {
            Outcome::Accepted(tree) => Ok(tree),
            Outcome::Rejected(rejection) => Err(rejection),
        }
    }
}

impl From<Result<CommandTree, Rejection>> for Outcome {
    fn from(result: Result<CommandTree, Rejection>) -> Self {
        match result {
            Ok(tree) => Outcome::Accepted(tree),
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Interpreter {
    lexicon: Lexicon,
    grammar: Grammar,
}

impl Interpreter {
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::default()
    }

    /// An interpreter with the English vocabulary and every declared shape.
    pub fn english() -> Result<Self, BuildError> {
        Interpreter::builder().build()
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// A fresh lexer over `input`. Calling this again restarts scanning.
    pub fn lex<'a>(&'a self, input: &'a str) -> Lexer<'a> {
        Lexer::new(&self.lexicon, input)
    }

    /// All tokens of `input`, or every lexical error if there was any.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, Rejection> {
        let (tokens, errors) = tokenize(&self.lexicon, input);
        if errors.is_empty() {
            Ok(tokens)
        } else {
            Err(Rejection::Lexical(errors))
        }
    }

    /// Lex and parse `input` without semantic checks.
    pub fn parse(&self, input: &str) -> Result<CommandTree, Rejection> {
        let tokens = self.tokenize(input)?;
        Ok(self.grammar.parse(tokens)?)
    }

    /// Run the whole pipeline.
    pub fn interpret(&self, input: &str) -> Outcome {
        let result = self.parse(input).and_then(|tree| {
            validate(&tree)?;
            Ok(tree)
        });

        match &result {
            Ok(tree) => debug!(shape = %tree.shape(), "sentence accepted"),
            Err(rejection) => debug!(
                kind = %rejection.kind(),
                position = rejection.position(),
                %rejection,
                "sentence rejected"
            ),
        }

        result.into()
    }
}

#[derive(Debug, Default)]
pub struct InterpreterBuilder {
    vocabulary: Option<Vocabulary>,
    shapes: Option<Vec<ShapeId>>,
}

impl InterpreterBuilder {
    /// Replace the default English vocabulary.
    pub fn vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = Some(vocabulary);
        self
    }

    /// Restrict the grammar to `shapes`.
    pub fn shapes(mut self, shapes: impl IntoIterator<Item = ShapeId>) -> Self {
        self.shapes = Some(shapes.into_iter().collect());
        self
    }

    pub fn build(self) -> Result<Interpreter, BuildError> {
        let vocabulary = self.vocabulary.unwrap_or_default();
        let lexicon = Lexicon::compile(&vocabulary)?;
        let grammar = match self.shapes {
            Some(shapes) => Grammar::new(shapes)?,
            None => Grammar::standard()?,
        };
        Ok(Interpreter { lexicon, grammar })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GrammarError, RejectionKind};
    use crate::shape::{BookingShape, PaymentShape};
    use crate::token::TokenKind;

    fn interpreter() -> Interpreter {
        Interpreter::english().unwrap()
    }

    #[test]
    fn interpreter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Interpreter>();
    }

    #[test]
    fn lexical_errors_reject_before_parsing() {
        let outcome = interpreter().interpret("Book a ticket # to USA from Jamaica.");
        match outcome {
            Outcome::Rejected(rejection) => {
                assert_eq!(rejection.kind(), RejectionKind::Lexical);
                assert_eq!(rejection.position(), 14);
            }
            Outcome::Accepted(tree) => panic!("unexpectedly accepted {tree:?}"),
        }
    }

    #[test]
    fn parse_skips_semantic_checks() {
        let tree = interpreter()
            .parse("Book a Room at AC Hotel from March 10, 2025 to March 5, 2025 for ann.")
            .unwrap();
        assert_eq!(tree.shape(), ShapeId::Booking(BookingShape::StayAtService));
    }

    #[test]
    fn restricted_grammar_only_knows_its_shapes() {
        let interpreter = Interpreter::builder()
            .shapes([ShapeId::Payment(PaymentShape::Method)])
            .build()
            .unwrap();
        assert!(interpreter.interpret("Debit card.").is_accepted());
        assert!(!interpreter.interpret("Book a ticket to USA from Jamaica.").is_accepted());
    }

    #[test]
    fn builder_reports_ambiguous_shapes() {
        let shape = ShapeId::Payment(PaymentShape::Method);
        let result = Interpreter::builder().shapes([shape, shape]).build();
        assert!(matches!(
            result,
            Err(BuildError::Grammar(GrammarError::AmbiguousShape { .. }))
        ));
    }

    #[test]
    fn custom_vocabulary_extends_resources() {
        let vocabulary = Vocabulary::english().with(TokenKind::Resource, ["Bus"]);
        let interpreter = Interpreter::builder().vocabulary(vocabulary).build().unwrap();
        let tree = interpreter
            .interpret("Book a Bus from Kingston to Negril.")
            .into_result()
            .unwrap();
        assert_eq!(tree.text("resource"), Some("Bus"));
    }
}
