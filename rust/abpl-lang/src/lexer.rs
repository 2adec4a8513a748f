//! The lexical classifier.
//!
//! At every scan position the categories are tried in a fixed order and the
//! first one that matches wins:
//!
//! ```text
//! keyword lists (vocabulary order)
//!   → money → time → date literal → number → symbol
//!     → context-anchored spans (see `span`)
//!       → lexical error, skip one character
//! ```
//!
//! Keyword matching is case-insensitive and only happens at word starts;
//! a keyword must also end on a word boundary, so "Pay" never matches the
//! front of "Payment" and "a" never matches the front of "AC".

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{LexicalError, VocabularyError};
use crate::span::{self, SpanContext};
use crate::token::{Token, TokenKind};
use crate::vocabulary::Vocabulary;

const MONEY: &str = r"^\$\d+(?:\.\d+)?";
const TIME: &str = r"(?i)^\d{1,2}:\d{2}(?:[ \t]*[ap]m)?\b";
const DATE: &str = concat!(
    r"(?i)^(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?",
    r"|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)",
    r"\s+\d{1,2},?\s+\d{4}\b"
);
const NUMBER: &str = r"^\d+";
const SYMBOL: &str = r"^(?:\.+\s*$|,|:)";
const TERMINAL: &str = r"^\.+\s*$";

/// A vocabulary compiled into matchers, shared by every [`Lexer`].
#[derive(Debug, Clone)]
pub struct Lexicon {
    keywords: Vec<(TokenKind, Regex)>,
    literals: Vec<(TokenKind, Regex)>,
    terminal: Regex,
}

impl Lexicon {
    pub fn compile(vocabulary: &Vocabulary) -> Result<Self, VocabularyError> {
        vocabulary.check()?;

        let mut keywords = Vec::with_capacity(vocabulary.lists().len());
        for list in vocabulary.lists() {
            let mut words: Vec<&str> = list.words.iter().map(|word| word.trim()).collect();
            // Regex alternation is leftmost-first, so longer words go first.
            words.sort_by_key(|word| std::cmp::Reverse(word.len()));
            let alternatives = words
                .iter()
                .map(|word| {
                    word.split_whitespace()
                        .map(regex::escape)
                        .collect::<Vec<_>>()
                        .join(r"\s+")
                })
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)^(?:{alternatives})\b");
            keywords.push((list.kind, compile(list.kind, &pattern)?));
        }

        let literals = vec![
            (TokenKind::Money, compile(TokenKind::Money, MONEY)?),
            (TokenKind::Time, compile(TokenKind::Time, TIME)?),
            (TokenKind::Date, compile(TokenKind::Date, DATE)?),
            (TokenKind::Number, compile(TokenKind::Number, NUMBER)?),
            (TokenKind::Symbol, compile(TokenKind::Symbol, SYMBOL)?),
        ];

        Ok(Lexicon {
            keywords,
            literals,
            terminal: compile(TokenKind::Symbol, TERMINAL)?,
        })
    }

    /// The fixed category matching at `position`, with the end of the match.
    ///
    /// Date literals are reported as [`TokenKind::Date`]; the lexer decides
    /// afterwards whether they start or end a range.
    pub fn fixed_at(&self, input: &str, position: usize) -> Option<(TokenKind, usize)> {
        let rest = input.get(position..)?;
        if rest.is_empty() {
            return None;
        }

        if starts_word(input, position) {
            for (kind, pattern) in &self.keywords {
                if let Some(found) = pattern.find(rest) {
                    return Some((*kind, position + found.end()));
                }
            }
        }

        // The terminal pattern reaches the end of input; its trailing
        // whitespace is not part of the token.
        self.literals.iter().find_map(|(kind, pattern)| {
            pattern
                .find(rest)
                .map(|found| (*kind, position + found.as_str().trim_end().len()))
        })
    }

    /// Whether only the terminal symbol (or nothing) remains at `position`.
    pub fn is_terminal(&self, input: &str, position: usize) -> bool {
        match input.get(position..) {
            Some(rest) => {
                let rest = rest.trim_start();
                rest.is_empty() || self.terminal.is_match(rest)
            }
            None => false,
        }
    }
}

fn compile(kind: TokenKind, pattern: &str) -> Result<Regex, VocabularyError> {
    Regex::new(pattern).map_err(|source| VocabularyError::Pattern { kind, source })
}

pub(crate) fn is_word_char(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}

/// No word character immediately precedes `position`.
pub(crate) fn starts_word(input: &str, position: usize) -> bool {
    input[..position]
        .chars()
        .next_back()
        .is_none_or(|previous| !is_word_char(previous))
}

/// A recently emitted token, lowercased, kept as context for anchoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Recent {
    pub kind: TokenKind,
    pub text: String,
}

impl Recent {
    pub fn is(&self, word: &str) -> bool {
        self.text == word
    }
}

/// An iterator over the tokens of one sentence.
///
/// Unrecognized characters are yielded as errors and skipped one at a time,
/// so a single pass reports every lexical error in the sentence. A word that
/// starts with an unrecognized character is reported once, at that
/// character, and skipped whole. Cloning a
/// lexer snapshots its position; scanning the clone does not affect the
/// original.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    lexicon: &'a Lexicon,
    input: &'a str,
    cursor: usize,
    previous: Option<Recent>,
    before_previous: Option<Recent>,
}

impl<'a> Lexer<'a> {
    pub fn new(lexicon: &'a Lexicon, input: &'a str) -> Self {
        Lexer {
            lexicon,
            input,
            cursor: 0,
            previous: None,
            before_previous: None,
        }
    }

    /// Byte offset of the next character to be scanned.
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.cursor..];
        self.cursor += rest.len() - rest.trim_start().len();
    }

    fn skip_word(&mut self) {
        let rest = &self.input[self.cursor..];
        self.cursor += rest
            .char_indices()
            .find(|(_, character)| !is_word_char(*character))
            .map_or(rest.len(), |(offset, _)| offset);
    }

    fn context(&self) -> SpanContext<'_> {
        SpanContext {
            previous: self.previous.as_ref(),
            before_previous: self.before_previous.as_ref(),
        }
    }

    /// Decide whether a date literal ending at `end` starts or ends a range.
    fn date_kind(&self, end: usize) -> TokenKind {
        let previous = self.previous.as_ref();
        let after = |words: &[&str]| {
            previous.is_some_and(|recent| words.iter().any(|word| recent.is(word)))
        };
        let returning = self
            .before_previous
            .as_ref()
            .is_some_and(|recent| recent.is("returning"));
        let followed_by = |words: &[&str]| {
            next_word(self.lexicon, self.input, end)
                .is_some_and(|next| words.contains(&next.as_str()))
        };

        if after(&["on"]) && returning && followed_by(&["at"]) {
            TokenKind::EndDate
        } else if after(&["from", "on"]) && followed_by(&["to", "at"]) {
            TokenKind::StartDate
        } else if after(&["to"])
            && (followed_by(&["for", "at"]) || self.lexicon.is_terminal(self.input, end))
        {
            TokenKind::EndDate
        } else {
            TokenKind::Date
        }
    }

    fn emit(&mut self, kind: TokenKind, end: usize) -> Token {
        let token = Token::new(kind, &self.input[self.cursor..end], self.cursor);
        self.cursor = end;
        self.before_previous = self.previous.take();
        self.previous = Some(Recent {
            kind,
            text: normalize(&token.text),
        });
        trace!(kind = %token.kind, text = %token.text, position = token.position, "token");
        token
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let character = self.input[self.cursor..].chars().next()?;

        if let Some((kind, end)) = self.lexicon.fixed_at(self.input, self.cursor) {
            let kind = if kind == TokenKind::Date {
                self.date_kind(end)
            } else {
                kind
            };
            return Some(Ok(self.emit(kind, end)));
        }

        if let Some((kind, end)) =
            span::extract(self.lexicon, self.input, self.cursor, self.context())
        {
            return Some(Ok(self.emit(kind, end)));
        }

        let error = LexicalError {
            character,
            position: self.cursor,
        };
        debug!(%character, position = self.cursor, "unrecognized character");
        self.cursor += character.len_utf8();
        if is_word_char(character) {
            // The rest of the word cannot start a token, and the anchor no
            // longer precedes what follows.
            self.skip_word();
            self.previous = None;
            self.before_previous = None;
        }
        Some(Err(error))
    }
}

/// Lowercase and collapse internal whitespace.
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The normalized fixed token following `position`, if there is one.
pub(crate) fn next_word(lexicon: &Lexicon, input: &str, position: usize) -> Option<String> {
    let rest = input.get(position..)?;
    let start = position + (rest.len() - rest.trim_start().len());
    let (_, end) = lexicon.fixed_at(input, start)?;
    Some(normalize(&input[start..end]))
}

/// Tokenize a whole sentence, collecting tokens and lexical errors separately.
pub fn tokenize(lexicon: &Lexicon, input: &str) -> (Vec<Token>, Vec<LexicalError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for item in Lexer::new(lexicon, input) {
        match item {
            Ok(token) => tokens.push(token),
            Err(error) => errors.push(error),
        }
    }
    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lexicon() -> Lexicon {
        Lexicon::compile(&Vocabulary::english()).unwrap()
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        let (tokens, errors) = tokenize(&lexicon(), input);
        assert!(errors.is_empty(), "unexpected lexical errors: {errors:?}");
        tokens.into_iter().map(|token| token.kind).collect()
    }

    #[test]
    fn keywords_match_case_insensitively() {
        let (tokens, _) = tokenize(&lexicon(), "BOOK A TICKET");
        assert_eq!(tokens[0], Token::new(TokenKind::ActionKeyword, "BOOK A", 0));
        assert_eq!(tokens[1], Token::new(TokenKind::Resource, "TICKET", 7));
    }

    #[test]
    fn longer_keywords_win_within_a_category() {
        let (tokens, _) = tokenize(&lexicon(), "Payment Pay");
        assert_eq!(tokens[0].text, "Payment");
        assert_eq!(tokens[1].text, "Pay");
    }

    #[test]
    fn keywords_do_not_match_inside_words() {
        let (tokens, _) = tokenize(&lexicon(), "Book a Room at AC Hotel from");
        let service = tokens.iter().find(|token| token.kind == TokenKind::Service);
        assert_eq!(service.map(|token| token.text.as_str()), Some("AC Hotel"));
    }

    #[test]
    fn literal_categories() {
        use TokenKind::*;
        assert_eq!(kinds("$50.25 10:30 PM 42 ,:"), vec![Money, Time, Number, Symbol, Symbol]);
    }

    #[test]
    fn terminal_symbol_swallows_trailing_periods() {
        let (tokens, _) = tokenize(&lexicon(), "Credit card...  ");
        assert_eq!(tokens[1], Token::new(TokenKind::Symbol, "...", 11));
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn newlines_are_whitespace() {
        use TokenKind::*;
        assert_eq!(
            kinds("Book a ticket\nto USA\r\nfrom Jamaica."),
            vec![
                ActionKeyword,
                Resource,
                LocationMarker,
                Arrival,
                LocationMarker,
                Departure,
                Symbol
            ]
        );
    }

    #[test]
    fn dates_take_their_kind_from_context() {
        use TokenKind::*;
        let kinds = kinds("from March 10, 2025 to March 15, 2025 for");
        assert_eq!(kinds, vec![LocationMarker, StartDate, LocationMarker, EndDate, ContextKeyword]);
    }

    #[test]
    fn returning_date_ends_the_range() {
        let (tokens, _) = tokenize(&lexicon(), "Returning on March 7, 2025 at 17:30.");
        assert_eq!(tokens[2].kind, TokenKind::EndDate);
        assert_eq!(tokens[2].text, "March 7, 2025");
    }

    #[test]
    fn unanchored_date_is_plain() {
        let (tokens, _) = tokenize(&lexicon(), "on March 3, 2025.");
        assert_eq!(tokens[1].kind, TokenKind::Date);
    }

    #[test]
    fn unrecognized_characters_are_reported_and_skipped() {
        let (tokens, errors) = tokenize(&lexicon(), "Book # a ticket @");
        assert_eq!(
            errors,
            vec![
                LexicalError {
                    character: '#',
                    position: 5
                },
                LexicalError {
                    character: '@',
                    position: 16
                },
            ]
        );
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn unrecognized_word_is_reported_once() {
        let (tokens, errors) = tokenize(&lexicon(), "Cancel a Booking 12 for Joy Reynolds.");
        assert_eq!(
            errors,
            vec![LexicalError {
                character: 'R',
                position: 28
            }]
        );
        assert_eq!(tokens.last().map(|token| token.text.as_str()), Some("."));
    }

    #[test]
    fn unrecognized_word_drops_its_anchor() {
        let (tokens, errors) = tokenize(&lexicon(), "from Kingst0n_ Bay");
        let positions: Vec<usize> = errors.iter().map(|error| error.position).collect();
        assert_eq!(positions, vec![5, 15]);
        assert!(tokens.iter().all(|token| token.kind != TokenKind::Departure));
    }

    #[test]
    fn lexer_can_be_restarted_from_a_snapshot() {
        let lexicon = lexicon();
        let mut lexer = Lexer::new(&lexicon, "List Flights from Kingston to Miami.");
        lexer.next();
        let snapshot = lexer.clone();
        let rest: Vec<_> = lexer.collect();
        let again: Vec<_> = snapshot.collect();
        assert_eq!(rest, again);
    }

    #[test]
    fn token_text_is_the_input_slice() {
        let input = "Rent a Car in Kingston from March 10, 2025 to March 15, 2025 for Joy_Reynolds.";
        let (tokens, _) = tokenize(&lexicon(), input);
        for token in tokens {
            assert_eq!(&input[token.position..token.end()], token.text);
        }
    }
}
