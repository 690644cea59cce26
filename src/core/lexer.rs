//! Single-line span lexer.
//!
//! Splits one physical line into spans tagged as identifiers, string
//! literals, character literals, or anything else. Concatenating the span
//! texts always reproduces the input line byte for byte.
//!
//! Lines are raw bytes: sources are expected to be UTF-8, but invalid
//! sequences are kept as `Other` text instead of failing the line.

/// Classification of a span of source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A letter or `_` followed by letters, digits, or `_`.
    Identifier,
    /// `"` up to the next `"`, no escape handling.
    StringLiteral,
    /// `'` up to the next `'`, no escape handling.
    CharLiteral,
    /// Whitespace, punctuation, numbers, unterminated quotes and bytes
    /// that are not valid UTF-8.
    Other,
}

/// A classified slice of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: SpanKind,
    pub text: &'a [u8],
}

impl<'a> Span<'a> {
    /// The span as text. Always `Some` for identifiers.
    pub fn as_str(&self) -> Option<&'a str> {
        std::str::from_utf8(self.text).ok()
    }

    /// Contents of a string or character literal without its quotes.
    pub fn literal_contents(&self) -> Option<&'a [u8]> {
        match self.kind {
            SpanKind::StringLiteral | SpanKind::CharLiteral => {
                Some(&self.text[1..self.text.len() - 1])
            }
            _ => None,
        }
    }
}

/// Iterator over the spans of a single line.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Lexer { src: line, pos: 0 }
    }

    fn take(&mut self, len: usize, kind: SpanKind) -> Span<'a> {
        let text = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Span { kind, text }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let rest = &self.src[self.pos..];
        let (first, width) = decode(rest)?;

        match first {
            Some(quote @ ('"' | '\'')) => {
                let kind = if quote == '"' {
                    SpanKind::StringLiteral
                } else {
                    SpanKind::CharLiteral
                };
                match rest[1..].iter().position(|&b| b == quote as u8) {
                    Some(end) => Some(self.take(end + 2, kind)),
                    // Unterminated: the quote is plain text.
                    None => Some(self.take(1, SpanKind::Other)),
                }
            }
            Some(c) if c.is_alphabetic() || c == '_' => {
                let len = run_len(rest, is_ident_continue);
                Some(self.take(len, SpanKind::Identifier))
            }
            Some(c) if c.is_numeric() => {
                // Numbers swallow trailing letters (`0xff`, `1e9`) so they are never looked up.
                let len = run_len(rest, is_ident_continue);
                Some(self.take(len, SpanKind::Other))
            }
            _ => {
                let len = width
                    + run_len(&rest[width..], |c| {
                        !(c == '"' || c == '\'' || is_ident_continue(c))
                    });
                Some(self.take(len, SpanKind::Other))
            }
        }
    }
}

/// Decode the first character of `s`.
///
/// Returns `None` at the end of input, and `Some((None, n))` when the
/// first `n` bytes are not valid UTF-8.
fn decode(s: &[u8]) -> Option<(Option<char>, usize)> {
    let chunk = s.utf8_chunks().next()?;
    match chunk.valid().chars().next() {
        Some(c) => Some((Some(c), c.len_utf8())),
        None => Some((None, chunk.invalid().len())),
    }
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte length of the leading run of `s` made of characters satisfying
/// `pred`. Invalid UTF-8 counts as satisfying `pred` only when the run is
/// not an identifier-like run.
fn run_len(s: &[u8], pred: impl Fn(char) -> bool) -> usize {
    let takes_invalid = !pred('a');
    let mut len = 0;
    while let Some((c, width)) = decode(&s[len..]) {
        let keep = match c {
            Some(c) => pred(c),
            None => takes_invalid,
        };
        if !keep {
            break;
        }
        len += width;
    }
    len
}
