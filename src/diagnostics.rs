// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Recoverable-error reporting.
//!
//! Lexical and doc-comment errors never abort a parse; each one is
//! reported once to an [`ErrorSink`] collaborator and
//! simultaneously embedded in the output as an `ERROR` token or an
//! `ERRONEOUS` doctree node. The core never counts, thresholds, or
//! reacts to what the sink does with a report.

use std::fmt;

/// A stable diagnostic identifier, never a rendered message:
/// localisation is explicitly out of scope.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DiagnosticCode(pub &'static str);

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Lexer diagnostics.
pub mod lex {
    use super::DiagnosticCode;

    pub const UNSUPPORTED_BINARY_LIT: DiagnosticCode = DiagnosticCode("unsupported.binary.lit");
    pub const ILLEGAL_UNDERSCORE: DiagnosticCode = DiagnosticCode("illegal.underscore");
    pub const ILLEGAL_DOT: DiagnosticCode = DiagnosticCode("illegal.dot");
    pub const UNCLOSED_COMMENT: DiagnosticCode = DiagnosticCode("unclosed.comment");
    pub const EMPTY_CHAR_LIT: DiagnosticCode = DiagnosticCode("empty.char.lit");
    pub const ILLEGAL_LINE_END_IN_CHAR_LIT: DiagnosticCode =
        DiagnosticCode("illegal.line.end.in.char.lit");
    pub const UNCLOSED_CHAR_LIT: DiagnosticCode = DiagnosticCode("unclosed.char.lit");
    pub const UNCLOSED_STR_LIT: DiagnosticCode = DiagnosticCode("unclosed.str.lit");
    pub const ILLEGAL_ESC_CHAR: DiagnosticCode = DiagnosticCode("illegal.esc.char");
    pub const INVALID_BINARY_NUMBER: DiagnosticCode = DiagnosticCode("invalid.binary.number");
    pub const INVALID_HEX_NUMBER: DiagnosticCode = DiagnosticCode("invalid.hex.number");
    pub const MALFORMED_FP_LIT: DiagnosticCode = DiagnosticCode("malformed.fp.lit");
    pub const UNSUPPORTED_UNDERSCORE_LIT: DiagnosticCode =
        DiagnosticCode("unsupported.underscore.lit");
    pub const ILLEGAL_CHAR: DiagnosticCode = DiagnosticCode("illegal.char");
}

/// Doc-comment-parser diagnostics.
pub mod doc {
    use super::DiagnosticCode;

    pub const BAD_ENTITY: DiagnosticCode = DiagnosticCode("dc.bad.entity");
    pub const MISSING_SEMICOLON: DiagnosticCode = DiagnosticCode("dc.missing.semicolon");
    pub const BAD_GT: DiagnosticCode = DiagnosticCode("dc.bad.gt");
    pub const MALFORMED_HTML: DiagnosticCode = DiagnosticCode("dc.malformed.html");
    pub const NO_TAG_NAME: DiagnosticCode = DiagnosticCode("dc.no.tag.name");
    pub const BAD_INLINE_TAG: DiagnosticCode = DiagnosticCode("dc.bad.inline.tag");
    pub const UNTERMINATED_INLINE_TAG: DiagnosticCode =
        DiagnosticCode("dc.unterminated.inline.tag");
    pub const UNTERMINATED_SIGNATURE: DiagnosticCode =
        DiagnosticCode("dc.unterminated.signature");
    pub const UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode("dc.unterminated.string");
    pub const REF_BAD_PARENS: DiagnosticCode = DiagnosticCode("dc.ref.bad.parens");
    pub const REF_UNEXPECTED_INPUT: DiagnosticCode = DiagnosticCode("dc.ref.unexpected.input");
    pub const REF_SYNTAX_ERROR: DiagnosticCode = DiagnosticCode("dc.ref.syntax.error");
    pub const IDENTIFIER_EXPECTED: DiagnosticCode = DiagnosticCode("dc.identifier.expected");
    pub const GT_EXPECTED: DiagnosticCode = DiagnosticCode("dc.gt.expected");
    pub const UNEXPECTED_CONTENT: DiagnosticCode = DiagnosticCode("dc.unexpected.content");
    pub const NO_CONTENT: DiagnosticCode = DiagnosticCode("dc.no.content");
}

/// One reported diagnostic: a position, a stable code, and positional
/// arguments (e.g. the offending character) for a downstream message
/// formatter to fill in. The core never formats a message itself.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub pos: u32,
    pub code: DiagnosticCode,
    pub args: Vec<String>,
}

/// Collaborator that accepts recoverable diagnostics and decides
/// locally whether to log, count, or ignore them. The core never
/// terminates on an error reported here.
pub trait ErrorSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Discards every diagnostic. Useful for callers that only care about
/// the embedded `ERROR`/`ERRONEOUS` markers in the output.
#[derive(Default)]
pub struct NullErrorSink;

impl ErrorSink for NullErrorSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Forwards every diagnostic to the `log` facade at `warn!`, the way a
/// caller that just wants visibility during development would wire
/// things up. Not a substitute for a real diagnostic renderer.
#[derive(Default)]
pub struct LoggingErrorSink;

impl ErrorSink for LoggingErrorSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!(
            "{} at {}{}",
            diagnostic.code,
            diagnostic.pos,
            if diagnostic.args.is_empty() {
                String::new()
            } else {
                format!(" ({})", diagnostic.args.join(", "))
            }
        );
    }
}

/// Accumulates every diagnostic in order, for tests and for callers
/// that want to batch-process them after a parse completes.
#[derive(Default)]
pub struct CollectingErrorSink(pub Vec<Diagnostic>);

impl ErrorSink for CollectingErrorSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }
}
