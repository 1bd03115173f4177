//! # Grammar Matcher
//!
//! A message grammar is an ordered list of [`FieldSpec`] descriptors, one per
//! wire field, compiled once into a [`Grammar`] and reused for every incoming
//! message. Matching walks the descriptors left to right and collects the
//! substring of every capturing field; any field that fails to match rejects
//! the whole message.

use nom::{
    Parser,
    bytes::complete::{tag, take_while1, take_while_m_n},
    character::complete::{char, digit1, one_of},
    combinator::recognize,
};

use crate::captures::Captures;

/// Upper bound on the number of captures a single grammar may declare.
///
/// Captures for one message are collected into a bounded, allocation-free
/// vector; [`Grammar::compile`] rejects grammars that declare more.
pub const MAX_CAPTURES: usize = 32;

/// One element of a message grammar, in wire order.
///
/// Everything except [`FieldSpec::Literal`] and [`FieldSpec::Skip`] produces a
/// capture. Variable-length fields rely on the literal that follows them to
/// know where to stop, so a grammar must place a `Literal` directly after
/// every `Number`, `Decimal` or `Run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    /// Fixed text that must appear verbatim, usually a delimiter.
    Literal(&'static str),
    /// Exactly this many ASCII digits, never more, even when more digits
    /// follow. Subsequent fields depend on fixed offsets.
    Digits(u8),
    /// One or more ASCII digits, variable length.
    Number,
    /// An unsigned fixed-point token: digits, a dot, digits.
    Decimal,
    /// A single character drawn from a fixed alphabet. Any other character
    /// fails the whole message, not just this field.
    OneOf(&'static str),
    /// One or more characters drawn from a fixed alphabet, matched greedily.
    Run(&'static str),
    /// A field the wire carries but the message consumer never uses: it must
    /// match like the inner descriptor, but produces no capture.
    Skip(&'static FieldSpec),
}

impl FieldSpec {
    fn matches<'a>(&self, i: &'a str) -> nom::IResult<&'a str, Option<&'a str>> {
        match *self {
            FieldSpec::Literal(text) => tag(text).map(|_| None).parse(i),
            FieldSpec::Digits(count) => {
                let count = count as usize;
                take_while_m_n(count, count, |c: char| c.is_ascii_digit())
                    .map(Some)
                    .parse(i)
            }
            FieldSpec::Number => digit1.map(Some).parse(i),
            FieldSpec::Decimal => recognize((digit1, char('.'), digit1)).map(Some).parse(i),
            FieldSpec::OneOf(alphabet) => recognize(one_of(alphabet)).map(Some).parse(i),
            FieldSpec::Run(alphabet) => take_while1(|c| alphabet.contains(c)).map(Some).parse(i),
            FieldSpec::Skip(inner) => inner.matches(i).map(|(rest, _)| (rest, None)),
        }
    }

    fn captures(&self) -> bool {
        !matches!(self, FieldSpec::Literal(_) | FieldSpec::Skip(_))
    }

    fn is_variable(&self) -> bool {
        match self {
            FieldSpec::Number | FieldSpec::Decimal | FieldSpec::Run(_) => true,
            FieldSpec::Skip(inner) => inner.is_variable(),
            _ => false,
        }
    }
}

/// A compiled message grammar.
///
/// Compiled once at startup, immutable thereafter, and reusable across
/// threads and messages.
///
/// # Examples
///
/// ```rust
/// use disha_parser::{FieldSpec, Grammar};
///
/// const FIELDS: &[FieldSpec] = &[
///     FieldSpec::Literal(">"),
///     FieldSpec::Digits(2),
///     FieldSpec::Literal(";"),
///     FieldSpec::Number,
///     FieldSpec::Literal("<"),
/// ];
///
/// let grammar = Grammar::compile(FIELDS);
///
/// let mut captures = grammar.captures(">42;1234<").unwrap();
/// assert_eq!(captures.next_str(), Ok("42"));
/// assert_eq!(captures.next_str(), Ok("1234"));
///
/// assert!(grammar.captures(">4;1234<").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Grammar {
    fields: &'static [FieldSpec],
    capture_count: usize,
}

impl Grammar {
    /// Compiles a field descriptor list into a matcher.
    ///
    /// # Panics
    ///
    /// An ambiguous descriptor list is a bug in the grammar, not a runtime
    /// condition, so compilation asserts that the grammar declares at most
    /// [`MAX_CAPTURES`] captures and that every variable-length field is
    /// anchored by a literal directly after it.
    pub fn compile(fields: &'static [FieldSpec]) -> Self {
        let capture_count = fields.iter().filter(|f| f.captures()).count();
        assert!(capture_count <= MAX_CAPTURES);

        for pair in fields.windows(2) {
            debug_assert!(
                !pair[0].is_variable() || matches!(pair[1], FieldSpec::Literal(_)),
                "variable-length field without a literal anchor: {:?}",
                pair[0],
            );
        }
        if let Some(last) = fields.last() {
            debug_assert!(!last.is_variable(), "unanchored trailing field: {last:?}");
        }

        Grammar {
            fields,
            capture_count,
        }
    }

    /// The number of captures a successful match produces.
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    /// Matches one complete message against the grammar.
    ///
    /// Returns the ordered captures, or `None` when the text does not conform
    /// to the message shape. The whole input must be consumed; trailing bytes
    /// reject the message. A non-match is the expected outcome for malformed
    /// or foreign input and carries no further diagnostics.
    pub fn captures<'a>(&self, input: &'a str) -> Option<Captures<'a>> {
        if !input.is_ascii() {
            return None;
        }

        let mut items = heapless::Vec::new();
        let mut rest = input;
        for field in self.fields {
            let (next, capture) = field.matches(rest).ok()?;
            if let Some(capture) = capture {
                items.push(capture).ok()?;
            }
            rest = next;
        }

        if !rest.is_empty() {
            return None;
        }

        Some(Captures::new(items))
    }
}
