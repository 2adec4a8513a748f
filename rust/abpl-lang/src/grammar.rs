//! Reduction of a token sequence to a command tree.
//!
//! Shapes are indexed by arity and then compared kind by kind, so a sentence
//! is only ever checked against shapes of its own length. When nothing
//! matches, the error points at the first token where the longest matching
//! shape prefix breaks off, or at the end of input when the sentence is a
//! proper prefix of some shape.

use std::collections::HashMap;

use tracing::debug;

use crate::command::CommandTree;
use crate::error::{GrammarError, SyntaxError};
use crate::shape::ShapeId;
use crate::token::{Token, TokenKind};

/// A validated table of shapes.
#[derive(Debug, Clone)]
pub struct Grammar {
    shapes: Vec<ShapeId>,
    by_arity: HashMap<usize, Vec<ShapeId>>,
}

impl Grammar {
    /// Build a grammar from `shapes`. Fails if two shapes declare the same
    /// token-kind sequence.
    pub fn new(shapes: impl IntoIterator<Item = ShapeId>) -> Result<Self, GrammarError> {
        let shapes: Vec<ShapeId> = shapes.into_iter().collect();
        if shapes.is_empty() {
            return Err(GrammarError::Empty);
        }

        let mut seen: HashMap<Vec<TokenKind>, ShapeId> = HashMap::new();
        let mut by_arity: HashMap<usize, Vec<ShapeId>> = HashMap::new();
        for shape in &shapes {
            let sequence: Vec<TokenKind> = shape.kinds().collect();
            if let Some(first) = seen.insert(sequence, *shape) {
                return Err(GrammarError::AmbiguousShape {
                    first,
                    second: *shape,
                });
            }
            by_arity.entry(shape.arity()).or_default().push(*shape);
        }

        Ok(Grammar { shapes, by_arity })
    }

    /// The grammar with every declared shape.
    pub fn standard() -> Result<Self, GrammarError> {
        Grammar::new(ShapeId::all())
    }

    pub fn shapes(&self) -> &[ShapeId] {
        &self.shapes
    }

    /// The shape whose kind sequence is exactly `kinds`.
    pub fn recognize(&self, kinds: &[TokenKind]) -> Option<ShapeId> {
        self.by_arity
            .get(&kinds.len())?
            .iter()
            .copied()
            .find(|shape| shape.kinds().eq(kinds.iter().copied()))
    }

    pub fn parse(&self, tokens: Vec<Token>) -> Result<CommandTree, SyntaxError> {
        let kinds: Vec<TokenKind> = tokens.iter().map(|token| token.kind).collect();

        match self.recognize(&kinds) {
            Some(shape) => {
                debug!(%shape, "matched shape");
                Ok(CommandTree::assemble(shape, tokens))
            }
            None => Err(self.diagnose(&tokens)),
        }
    }

    /// Explain why no shape matched `tokens`.
    fn diagnose(&self, tokens: &[Token]) -> SyntaxError {
        let longest = self
            .shapes
            .iter()
            .map(|shape| {
                shape
                    .kinds()
                    .zip(tokens)
                    .take_while(|(kind, token)| *kind == token.kind)
                    .count()
            })
            .max()
            .unwrap_or(0);

        match tokens.get(longest) {
            Some(token) => SyntaxError::UnexpectedToken {
                kind: token.kind,
                text: token.text.clone(),
                position: token.position,
            },
            None => SyntaxError::UnexpectedEnd {
                position: tokens.last().map_or(0, Token::end),
            },
        }
    }
}
