//! Per-line keyword substitution.

use crate::core::keywords::KeywordTable;
use crate::core::lexer::{Lexer, SpanKind};
use crate::core::syntax::package_decl;

/// Translates single lines using a [`KeywordTable`].
///
/// Only identifier spans are looked up; string and character literals are
/// copied through untouched. Lines are independent: no state is carried
/// from one call to the next.
#[derive(Debug, Clone, Copy)]
pub struct LineTranslator<'t> {
    table: &'t KeywordTable,
}

impl<'t> LineTranslator<'t> {
    pub fn new(table: &'t KeywordTable) -> Self {
        LineTranslator { table }
    }

    /// Translate one line. The result carries no line terminator.
    pub fn translate_line(&self, line: &str) -> String {
        let mut out = Vec::with_capacity(line.len() + 16);
        self.translate_into(line.as_bytes(), &mut out);
        // Only valid UTF-8 is ever substituted in, so valid input stays valid.
        String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
    }

    /// Translate one raw line, appending the result to `out`.
    ///
    /// Bytes that are not valid UTF-8 are copied through unchanged.
    pub fn translate_into(&self, line: &[u8], out: &mut Vec<u8>) {
        // A leading `pacote <name>` is rewritten before lexing so the
        // declaration keyword is canonical whatever the table says.
        let rest = match package_decl(line) {
            Some(decl) => {
                out.extend_from_slice(&line[..decl.keyword.start]);
                out.extend_from_slice(self.table.package_keyword().as_bytes());
                &line[decl.keyword.end..]
            }
            None => line,
        };

        for span in Lexer::new(rest) {
            let text = match span.kind {
                SpanKind::Identifier => span
                    .as_str()
                    .and_then(|ident| self.table.translate(ident))
                    .map(str::as_bytes)
                    .unwrap_or(span.text),
                SpanKind::StringLiteral | SpanKind::CharLiteral | SpanKind::Other => span.text,
            };
            out.extend_from_slice(text);
        }
    }
}
