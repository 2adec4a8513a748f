//! # ABPL: Accommodation & Booking Phrase Language
//!
//! An interpreter for short, English-like travel commands such as
//! "Book a ticket to USA from Jamaica." or "Reserve a Room at AC Hotel from
//! March 10, 2025 to March 15, 2025 for Joy_Reynolds.".
//!
//! ## Core Ideas
//!
//! - **First match wins**: the lexer tries token categories in a fixed
//!   order, and keyword lists come before everything else.
//! - **Free text is anchored**: place names, provider names, usernames and
//!   dates are recognized by the keywords around them, not by their content.
//! - **Shapes are explicit**: every admissible sentence is a named shape with
//!   an exact token-kind sequence; no two shapes may share a sequence.
//! - **All or nothing**: a sentence is either accepted as one command tree or
//!   rejected with a lexical, syntactic or semantic error and a position.
//!
//! ## Architecture
//!
//! ```text
//! Input → Lexer (vocabulary + spans) → Grammar (shapes)
//!   → Validator (dates, times, ordering) → Outcome
//! ```
//!
//! ```rust
//! use abpl_lang::interpreter::{Interpreter, Outcome};
//!
//! let interpreter = Interpreter::english().unwrap();
//! let outcome = interpreter.interpret("Book a ticket to USA from Jamaica.");
//! let Outcome::Accepted(tree) = outcome else { panic!("rejected") };
//! assert_eq!(tree.text("arrival"), Some("USA"));
//! ```

pub mod token;
pub mod vocabulary;
pub mod lexer;
mod span;
pub mod shape;
pub mod command;
pub mod grammar;
pub mod validate;
pub mod interpreter;
pub mod error;

pub use command::CommandTree;
pub use error::{Rejection, RejectionKind};
pub use interpreter::{Interpreter, Outcome};
pub use token::{Token, TokenKind};
