//! Context-anchored extraction of free-text fields.
//!
//! Place names, provider names, usernames and loosely written dates have no
//! vocabulary of their own. They are recognized only by the fixed token just
//! before them (the anchor) and the fixed token that ends them (the stop):
//!
//! ```text
//! Book a Room at [AC Hotel] from ...          SERVICE   at   → from
//! Book a ticket to [USA] from [Jamaica].      ARRIVAL   to   → from
//!                                             DEPARTURE from → terminal
//! ... for [Joy_Reynolds].                     USERNAME  for  → first non-word char
//! ```
//!
//! Rules are tried in order and the first one producing a non-empty span
//! wins. Spans only start at a word start. A span runs until its first stop
//! at a word start, and never past a character its content class does not
//! allow. A span that may end the sentence also ends at a stray character no
//! category recognizes, which is then reported on its own.

use crate::lexer::{Lexicon, Recent, is_word_char, normalize, starts_word};
use crate::token::TokenKind;

/// The two most recent tokens before the scan position.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpanContext<'a> {
    pub previous: Option<&'a Recent>,
    pub before_previous: Option<&'a Recent>,
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Word(&'static str),
    /// `word` not immediately preceded by `not_after`.
    WordNotAfter(&'static str, &'static str),
    /// `word` immediately preceded by `after`.
    WordAfter(&'static str, &'static str),
    /// An action keyword whose last word is the article "a".
    ActionWithArticle,
    Kind(TokenKind),
}

impl Anchor {
    fn holds(self, context: SpanContext<'_>) -> bool {
        let Some(previous) = context.previous else {
            return false;
        };
        let before_is = |word: &str| context.before_previous.is_some_and(|recent| recent.is(word));
        match self {
            Anchor::Word(word) => previous.is(word),
            Anchor::WordNotAfter(word, not_after) => previous.is(word) && !before_is(not_after),
            Anchor::WordAfter(word, after) => previous.is(word) && before_is(after),
            Anchor::ActionWithArticle => {
                previous.kind == TokenKind::ActionKeyword
                    && previous.text.split_whitespace().last() == Some("a")
            }
            Anchor::Kind(kind) => previous.kind == kind,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Stop {
    Word(&'static str),
    Kind(TokenKind),
    Terminal,
}

#[derive(Debug, Clone, Copy)]
enum Content {
    /// Names of places and providers.
    Name,
    /// A date that did not match the literal date shape; must contain a digit.
    Date,
    Username,
}

impl Content {
    fn allows(self, character: char) -> bool {
        match self {
            Content::Name => {
                character.is_alphanumeric()
                    || character.is_whitespace()
                    || matches!(character, '\'' | '-' | '&')
            }
            Content::Date => {
                character.is_alphanumeric()
                    || character.is_whitespace()
                    || matches!(character, ',' | '/' | '-')
            }
            Content::Username => character.is_ascii_alphanumeric() || character == '_',
        }
    }

    /// A date span is at most three words, and every word after the first
    /// carries a digit: "Marchh 10, 2025" or "2025-03-10", never
    /// "Ocho Rios on March 3, 2025".
    fn accepts(self, span: &str) -> bool {
        match self {
            Content::Date => {
                let has_digit = |word: &str| word.chars().any(|c| c.is_ascii_digit());
                let words: Vec<&str> = span.split_whitespace().collect();
                words.len() <= 3
                    && has_digit(span)
                    && words.iter().skip(1).all(|word| has_digit(word))
            }
            Content::Name | Content::Username => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SpanRule {
    kind: TokenKind,
    anchor: Anchor,
    content: Content,
    /// The span must end at one of these. An empty list ends the span at the
    /// first character outside its content class.
    stops: &'static [Stop],
}

const RULES: &[SpanRule] = &[
    SpanRule {
        kind: TokenKind::StartDate,
        anchor: Anchor::Word("from"),
        content: Content::Date,
        stops: &[Stop::Word("to"), Stop::Word("at")],
    },
    SpanRule {
        kind: TokenKind::StartDate,
        anchor: Anchor::WordNotAfter("on", "returning"),
        content: Content::Date,
        stops: &[Stop::Word("to"), Stop::Word("at")],
    },
    SpanRule {
        kind: TokenKind::EndDate,
        anchor: Anchor::Word("to"),
        content: Content::Date,
        stops: &[Stop::Word("for"), Stop::Word("at"), Stop::Terminal],
    },
    SpanRule {
        kind: TokenKind::EndDate,
        anchor: Anchor::WordAfter("on", "returning"),
        content: Content::Date,
        stops: &[Stop::Word("at")],
    },
    SpanRule {
        kind: TokenKind::Date,
        anchor: Anchor::Word("on"),
        content: Content::Date,
        stops: &[Stop::Terminal],
    },
    SpanRule {
        kind: TokenKind::Service,
        anchor: Anchor::ActionWithArticle,
        content: Content::Name,
        stops: &[Stop::Kind(TokenKind::Resource)],
    },
    SpanRule {
        kind: TokenKind::Service,
        anchor: Anchor::Kind(TokenKind::ConfirmKeyword),
        content: Content::Name,
        stops: &[Stop::Kind(TokenKind::ActionKeyword)],
    },
    SpanRule {
        kind: TokenKind::Service,
        anchor: Anchor::Kind(TokenKind::ListKeyword),
        content: Content::Name,
        stops: &[Stop::Kind(TokenKind::ContextKeyword)],
    },
    SpanRule {
        kind: TokenKind::Service,
        anchor: Anchor::Word("for"),
        content: Content::Name,
        stops: &[Stop::Word("for"), Stop::Word("from")],
    },
    SpanRule {
        kind: TokenKind::Service,
        anchor: Anchor::Word("at"),
        content: Content::Name,
        stops: &[Stop::Word("from")],
    },
    SpanRule {
        kind: TokenKind::Username,
        anchor: Anchor::Word("for"),
        content: Content::Username,
        stops: &[],
    },
    SpanRule {
        kind: TokenKind::Departure,
        anchor: Anchor::Word("from"),
        content: Content::Name,
        stops: &[
            Stop::Word("to"),
            Stop::Kind(TokenKind::ConnectiveWord),
            Stop::Word("and"),
            Stop::Terminal,
            Stop::Kind(TokenKind::ActionKeyword),
            Stop::Kind(TokenKind::ContextKeyword),
        ],
    },
    SpanRule {
        kind: TokenKind::Arrival,
        anchor: Anchor::Word("to"),
        content: Content::Name,
        stops: &[
            Stop::Word("from"),
            Stop::Terminal,
            Stop::Kind(TokenKind::ActionKeyword),
            Stop::Kind(TokenKind::ContextKeyword),
        ],
    },
    SpanRule {
        kind: TokenKind::Location,
        anchor: Anchor::Word("in"),
        content: Content::Name,
        stops: &[
            Stop::Kind(TokenKind::ActionKeyword),
            Stop::Kind(TokenKind::ContextKeyword),
            Stop::Kind(TokenKind::LocationMarker),
            Stop::Terminal,
        ],
    },
];

impl SpanRule {
    /// End of the span starting at `start`, if this rule produces one.
    fn extract(&self, lexicon: &Lexicon, input: &str, start: usize) -> Option<usize> {
        let rest = &input[start..];
        let limit = rest
            .char_indices()
            .find(|(_, character)| !self.content.allows(*character))
            .map_or(input.len(), |(offset, _)| start + offset);

        let end = if self.stops.is_empty() {
            limit
        } else {
            match self.find_stop(lexicon, input, start, limit) {
                Some(end) => end,
                None if self.ends_sentence() && is_stray(lexicon, input, limit) => limit,
                None => return None,
            }
        };

        let span = input[start..end].trim_end();
        (!span.is_empty() && self.content.accepts(span)).then_some(start + span.len())
    }

    fn ends_sentence(&self) -> bool {
        self.stops.iter().any(|stop| matches!(stop, Stop::Terminal))
    }

    /// Position of the first stop after `start`, scanning word starts up to
    /// `limit`. A terminal stop is checked at `limit` itself.
    fn find_stop(&self, lexicon: &Lexicon, input: &str, start: usize, limit: usize) -> Option<usize> {
        let word_starts = input[start..limit]
            .char_indices()
            .skip(1)
            .map(|(offset, _)| start + offset)
            .filter(|position| {
                starts_word(input, *position)
                    && input[..*position]
                        .chars()
                        .next_back()
                        .is_some_and(char::is_whitespace)
            });

        for position in word_starts {
            if let Some((kind, end)) = lexicon.fixed_at(input, position) {
                let word = normalize(&input[position..end]);
                if self.stops.iter().any(|stop| match stop {
                    Stop::Word(expected) => word == *expected,
                    Stop::Kind(expected) => kind == *expected,
                    Stop::Terminal => false,
                }) {
                    return Some(position);
                }
            }
        }

        (self.ends_sentence() && lexicon.is_terminal(input, limit)).then_some(limit)
    }
}

/// The character at `position` is punctuation that starts no token.
fn is_stray(lexicon: &Lexicon, input: &str, position: usize) -> bool {
    input[position..]
        .chars()
        .next()
        .is_some_and(|character| !is_word_char(character) && !character.is_whitespace())
        && lexicon.fixed_at(input, position).is_none()
}

/// Try each span rule at `start`. Returns the span kind and its end.
pub(crate) fn extract(
    lexicon: &Lexicon,
    input: &str,
    start: usize,
    context: SpanContext<'_>,
) -> Option<(TokenKind, usize)> {
    if !starts_word(input, start) {
        return None;
    }
    RULES
        .iter()
        .filter(|rule| rule.anchor.holds(context))
        .find_map(|rule| {
            rule.extract(lexicon, input, start)
                .map(|end| (rule.kind, end))
        })
}
