// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Java lexical analyzer.
//!
//! [`JavaTokenizer`] runs a [`UnicodeReader`] over one compilation
//! unit's source text and emits [`Token`]s one at a time through
//! [`JavaTokenizer::read_token`]. An external Java parser (out of
//! scope here) drives it through the [`Lexer`] trait, which adds
//! single-token lookahead and the `split()` operation generics parsing
//! needs to break `>>`/`>>>`/`>>=`/`>>>=` back into individual `>`
//! tokens.

pub mod number;

use std::collections::VecDeque;

use crate::diagnostics::{lex, Diagnostic, DiagnosticCode, ErrorSink};
use crate::error::{ContractError, Result};
use crate::macros::time;
use crate::names::Names;
use crate::token::{
    is_java_identifier_start, lookup_kind, Payload, Radix, Token, TokenKind,
};
use crate::util::linemap::LineMap;
use crate::util::reader::{Scratch, UnicodeReader, EOI};
use number::{is_digit, is_octal_digit};

/// Reserved for the test harness to start the tokenizer somewhere other
/// than its ordinary entry state. No production code path reads this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitialState {
    /// Resume as though a `/` has just been consumed — exercises the
    /// comment/operator disambiguation in isolation.
    AfterSlash,
}

/// Tokenizer options, with an impl for `Default`.
#[derive(Clone, Debug)]
pub struct JavaTokenizerOpts {
    /// Accept `0b`/`0B` binary integer literals? Default: true.
    pub binary_literals_enabled: bool,
    /// Accept `_` digit separators in numeric literals? Default: true.
    pub underscores_in_literals_enabled: bool,
    /// Include the offending lexeme text in diagnostic arguments, at
    /// some performance penalty? Default: false.
    pub exact_errors: bool,
    /// Keep a record of how long `read_token` spent per call, logged at
    /// `trace!` on every call. Default: false.
    pub profile: bool,
    /// Only the test runner should use a non-`None` value.
    pub initial_state: Option<InitialState>,
}

impl Default for JavaTokenizerOpts {
    fn default() -> JavaTokenizerOpts {
        JavaTokenizerOpts {
            binary_literals_enabled: true,
            underscores_in_literals_enabled: true,
            exact_errors: false,
            profile: false,
            initial_state: None,
        }
    }
}

/// The raw text of one `/** ... */` comment the tokenizer scanned,
/// handed to [`crate::docparser::DocCommentParser`] by the caller.
/// `text` is the content between `/**` and the closing `*/`, with
/// neither delimiter nor leading-`*` column markers stripped yet —
/// that is the caller's job (`crate::docparser::strip_doc_comment`).
#[derive(Clone, Debug)]
pub struct DocComment {
    pub start: u32,
    pub end: u32,
    pub text: String,
}

/// Callers interact with the tokenizer through this surface:
/// single-token lookahead, the token just consumed, and the
/// `>>`/`>>>`/`>>=`/`>>>=` splitting operation generics parsing needs.
pub trait Lexer {
    /// Consume and return the next token. After EOF, keeps returning
    /// `EOF` tokens forever.
    fn next_token(&mut self) -> Token;
    /// The token last returned by `next_token`.
    fn token(&self) -> &Token;
    /// Peek `lookahead` tokens ahead without consuming; `token_at(0)`
    /// is equivalent to `token()`.
    fn token_at(&mut self, lookahead: usize) -> Result<&Token>;
    /// The token before `token()`, if any has been consumed yet.
    fn prev_token(&self) -> Option<&Token>;
    /// Split the current token's leading `>` off a multi-character `>`
    /// operator (`>>`, `>>>`, `>>=`, `>>>=`), returning the `>` and
    /// leaving the remainder to be returned by the next `next_token()`.
    fn split(&mut self) -> Result<Token>;
    fn err_pos(&self) -> u32;
    fn set_err_pos(&mut self, pos: u32);
    /// Lazily built line-position index.
    fn line_map(&self) -> &LineMap;
}

/// Table-driven multi-character operator recognition: greedily extends
/// the current lexeme one character at a time as long as intern+lookup
/// yields a valid `TokenKind`. `/`-leading operators are excluded:
/// `scan_slash` handles `/`, `/=`, and comment-vs-division
/// disambiguation on its own.
static OPERATORS: phf::Map<&'static str, TokenKind> = phf::phf_map! {
    "->" => TokenKind::Arrow,
    "::" => TokenKind::ColonColon,
    "=" => TokenKind::Eq,
    "==" => TokenKind::EqEq,
    "!" => TokenKind::Bang,
    "!=" => TokenKind::BangEq,
    "<" => TokenKind::Lt,
    "<=" => TokenKind::LtEq,
    ">" => TokenKind::Gt,
    ">=" => TokenKind::GtEq,
    "&&" => TokenKind::AmpAmp,
    "||" => TokenKind::PipePipe,
    "+" => TokenKind::Plus,
    "++" => TokenKind::PlusPlus,
    "+=" => TokenKind::PlusEq,
    "-" => TokenKind::Minus,
    "--" => TokenKind::MinusMinus,
    "-=" => TokenKind::MinusEq,
    "*" => TokenKind::Star,
    "*=" => TokenKind::StarEq,
    "%" => TokenKind::Percent,
    "%=" => TokenKind::PercentEq,
    "&" => TokenKind::Amp,
    "&=" => TokenKind::AmpEq,
    "|" => TokenKind::Pipe,
    "|=" => TokenKind::PipeEq,
    "^" => TokenKind::Caret,
    "^=" => TokenKind::CaretEq,
    "~" => TokenKind::Tilde,
    "<<" => TokenKind::LtLt,
    "<<=" => TokenKind::LtLtEq,
    ">>" => TokenKind::GtGt,
    ">>=" => TokenKind::GtGtEq,
    ">>>" => TokenKind::GtGtGt,
    ">>>=" => TokenKind::GtGtGtEq,
    ":" => TokenKind::Colon,
    "?" => TokenKind::Question,
    "@" => TokenKind::At,
};

/// The Java tokenizer. One instance covers one compilation unit's
/// source text, borrowing the [`Names`] table and [`ErrorSink`] owned
/// by the caller's `Context`.
pub struct JavaTokenizer<'a, E: ErrorSink> {
    opts: JavaTokenizerOpts,
    reader: UnicodeReader,
    scratch: Scratch,
    names: &'a mut Names,
    sink: &'a mut E,
    line_map: std::cell::OnceCell<LineMap>,
    src: String,

    err_pos: u32,
    prev: Option<Token>,
    current: Option<Token>,
    lookahead_buf: VecDeque<Token>,
    split_remainder: Option<Token>,
    pending_doc_comments: Vec<DocComment>,
}

impl<'a, E: ErrorSink> JavaTokenizer<'a, E> {
    pub fn new(src: &str, names: &'a mut Names, sink: &'a mut E, opts: JavaTokenizerOpts) -> Self {
        JavaTokenizer {
            reader: UnicodeReader::new(src),
            scratch: Scratch::new(),
            names,
            sink,
            line_map: std::cell::OnceCell::new(),
            src: src.to_owned(),
            opts,
            err_pos: 0,
            prev: None,
            current: None,
            lookahead_buf: VecDeque::new(),
            split_remainder: None,
            pending_doc_comments: Vec::new(),
        }
    }

    /// Drain the javadoc comments scanned since the last call, in
    /// source order. A caller building an AST feeds each one's `text`
    /// to `docparser::strip_doc_comment` then `DocCommentParser::parse`.
    pub fn take_doc_comments(&mut self) -> Vec<DocComment> {
        std::mem::take(&mut self.pending_doc_comments)
    }

    fn report(&mut self, pos: u32, code: DiagnosticCode, args: Vec<String>) {
        self.err_pos = pos;
        self.sink.report(Diagnostic { pos, code, args });
    }

    fn report_simple(&mut self, pos: u32, code: DiagnosticCode) {
        self.report(pos, code, Vec::new());
    }

    /// Scan and return the next raw token from the reader (no
    /// lookahead buffering, no `split()` interaction).
    pub fn read_token(&mut self) -> Token {
        if self.opts.profile {
            let (tok, dt) = time!(self.read_token_inner());
            log::trace!("token {:?} [{}, {}) in {}ns", tok.kind, tok.start, tok.end, dt);
            tok
        } else {
            let tok = self.read_token_inner();
            log::trace!("token {:?} [{}, {})", tok.kind, tok.start, tok.end);
            tok
        }
    }

    fn read_token_inner(&mut self) -> Token {
        loop {
            self.scratch.clear();
            let start = self.reader.bp();
            let c = self.reader.ch();

            if self.reader.is_eoi() {
                return Token::default_kind(TokenKind::Eof, start, start);
            }

            match c {
                ' ' | '\t' | '\u{000C}' => {
                    self.reader.scan_char();
                    continue;
                }
                '\n' => {
                    self.reader.scan_char();
                    continue;
                }
                '\r' => {
                    self.reader.scan_char();
                    if self.reader.ch() == '\n' {
                        self.reader.scan_char();
                    }
                    continue;
                }
                '0' => return self.scan_zero(start),
                '1'..='9' => {
                    self.scan_digit_run(Radix::Decimal);
                    return self.finish_number(start, Radix::Decimal);
                }
                '.' => return self.scan_dot(start),
                ',' => return self.single(start, TokenKind::Comma),
                ';' => return self.single(start, TokenKind::Semi),
                '(' => return self.single(start, TokenKind::LParen),
                ')' => return self.single(start, TokenKind::RParen),
                '{' => return self.single(start, TokenKind::LBrace),
                '}' => return self.single(start, TokenKind::RBrace),
                '[' => return self.single(start, TokenKind::LBracket),
                ']' => return self.single(start, TokenKind::RBracket),
                '/' => {
                    if let Some(tok) = self.scan_slash(start) {
                        return tok;
                    }
                    continue; // consumed a comment; scan the next real token
                }
                '\'' => return self.scan_char_lit(start),
                '"' => return self.scan_string_lit(start),
                '!' | '%' | '&' | '*' | '?' | '+' | '-' | ':' | '<' | '=' | '>' | '^' | '|'
                | '~' | '@' => return self.scan_operator(start),
                _ if is_java_identifier_start(c) => return self.scan_ident(start),
                _ => {
                    self.report(start, lex::ILLEGAL_CHAR, vec![c.to_string()]);
                    self.reader.scan_char();
                    return Token::default_kind(TokenKind::Error, start, self.reader.bp());
                }
            }
        }
    }

    fn single(&mut self, start: u32, kind: TokenKind) -> Token {
        self.reader.scan_char();
        Token::default_kind(kind, start, self.reader.bp())
    }

    // --- Identifiers & keywords ------------------------------------------

    fn scan_ident(&mut self, start: u32) -> Token {
        loop {
            let c = self.reader.ch();
            if crate::token::is_java_identifier_part(c) {
                self.scratch.put_char(c);
                self.reader.scan_char();
            } else {
                break;
            }
        }
        let spelling = self.scratch.chars();
        let kind = lookup_kind(&spelling);
        let name = self.scratch.name(self.names);
        Token::new(kind, start, self.reader.bp(), Payload::Name(name))
    }

    // --- Numeric literals --------------------------------------------

    fn scan_zero(&mut self, start: u32) -> Token {
        self.reader.scan_char(); // consume '0'
        match self.reader.ch() {
            'x' | 'X' => {
                self.reader.scan_char();
                self.scan_digit_run(Radix::Hex);
                if self.scratch.is_empty() && self.reader.ch() != '.' {
                    self.report_simple(start, lex::INVALID_HEX_NUMBER);
                    return Token::default_kind(TokenKind::Error, start, self.reader.bp());
                }
                self.finish_number(start, Radix::Hex)
            }
            'b' | 'B' => {
                if !self.opts.binary_literals_enabled {
                    self.report_simple(start, lex::UNSUPPORTED_BINARY_LIT);
                }
                self.reader.scan_char();
                self.scan_digit_run(Radix::Binary);
                if self.scratch.is_empty() {
                    self.report_simple(start, lex::INVALID_BINARY_NUMBER);
                    return Token::default_kind(TokenKind::Error, start, self.reader.bp());
                }
                self.finish_number(start, Radix::Binary)
            }
            '.' | 'e' | 'E' | 'f' | 'F' | 'd' | 'D' => {
                self.scratch.put_char('0');
                self.finish_number(start, Radix::Decimal)
            }
            '0'..='9' | '_' => {
                self.scratch.put_char('0');
                self.scan_digit_run(Radix::Octal);
                self.finish_number(start, Radix::Octal)
            }
            _ => {
                self.scratch.put_char('0');
                Token::new(
                    TokenKind::IntLiteral,
                    start,
                    self.reader.bp(),
                    Payload::Numeric {
                        text: self.scratch.chars(),
                        radix: Radix::Decimal,
                    },
                )
            }
        }
    }

    /// Consume a run of digits (in `radix`) and interior underscores,
    /// appending the decoded digits (underscores stripped) to the
    /// scratch buffer. Reports `illegal.underscore`/
    /// `unsupported.underscore.lit` once per run.
    fn scan_digit_run(&mut self, radix: Radix) {
        let run_start = self.reader.bp();
        let mut run = String::new();
        loop {
            let c = self.reader.ch();
            if is_digit(c, radix) || c == '_' {
                run.push(c);
                self.reader.scan_char();
            } else {
                break;
            }
        }
        if run.contains('_') {
            if !self.opts.underscores_in_literals_enabled {
                self.report_simple(run_start, lex::UNSUPPORTED_UNDERSCORE_LIT);
            }
            if run.starts_with('_') || run.ends_with('_') || run.contains("__") {
                self.report_simple(run_start, lex::ILLEGAL_UNDERSCORE);
            }
        }
        for c in run.chars() {
            if c != '_' {
                self.scratch.put_char(c);
            }
        }
    }

    /// Consume an optional fraction/exponent and a type suffix, then
    /// build the final numeric `Token`. `radix` is the radix of the
    /// digits already in scratch; may be promoted `Octal -> Decimal`
    /// if a fraction/exponent proves the literal was decimal all along
    /// (a bare `0` may extend into a decimal/float literal).
    fn finish_number(&mut self, start: u32, mut radix: Radix) -> Token {
        let mut is_float = false;
        if radix != Radix::Binary {
            if self.reader.ch() == '.' {
                is_float = true;
                self.scratch.put_char('.');
                self.reader.scan_char();
                self.scan_digit_run(if radix == Radix::Hex {
                    Radix::Hex
                } else {
                    Radix::Decimal
                });
            }
            let saw_exponent = match radix {
                Radix::Hex => matches!(self.reader.ch(), 'p' | 'P'),
                _ => matches!(self.reader.ch(), 'e' | 'E'),
            };
            if saw_exponent {
                is_float = true;
                self.scratch.put_char(self.reader.ch());
                self.reader.scan_char();
                if matches!(self.reader.ch(), '+' | '-') {
                    self.scratch.put_char(self.reader.ch());
                    self.reader.scan_char();
                }
                self.scan_digit_run(Radix::Decimal);
            } else if radix == Radix::Hex && is_float {
                // Hex fractions require a binary exponent (JLS §3.10.2).
                self.report_simple(self.reader.bp(), lex::MALFORMED_FP_LIT);
            }
            if is_float && radix == Radix::Octal {
                radix = Radix::Decimal;
            }
        }

        let kind = match self.reader.ch() {
            'f' | 'F' => {
                self.scratch.put_char(self.reader.ch());
                self.reader.scan_char();
                is_float = true;
                TokenKind::FloatLiteral
            }
            'd' | 'D' => {
                self.scratch.put_char(self.reader.ch());
                self.reader.scan_char();
                is_float = true;
                TokenKind::DoubleLiteral
            }
            'l' | 'L' if !is_float => {
                self.scratch.put_char(self.reader.ch());
                self.reader.scan_char();
                TokenKind::LongLiteral
            }
            _ if is_float => TokenKind::DoubleLiteral,
            _ => TokenKind::IntLiteral,
        };

        Token::new(
            kind,
            start,
            self.reader.bp(),
            Payload::Numeric {
                text: self.scratch.chars(),
                radix,
            },
        )
    }

    // --- `.` / `...` / fractional literal --------------------------------

    fn scan_dot(&mut self, start: u32) -> Token {
        self.reader.scan_char(); // past the first '.'
        if self.reader.ch().is_ascii_digit() {
            self.scratch.put_char('0');
            self.scratch.put_char('.');
            self.scan_digit_run(Radix::Decimal);
            return self.finish_number(start, Radix::Decimal);
        }
        if self.reader.ch() == '.' && self.reader.peek_char() == '.' {
            self.reader.scan_char();
            self.reader.scan_char();
            return Token::default_kind(TokenKind::Ellipsis, start, self.reader.bp());
        }
        Token::default_kind(TokenKind::Dot, start, self.reader.bp())
    }

    // --- `/`: comments vs. division --------------------------------------

    /// Returns `Some(token)` for `/`/`/=`, or `None` after consuming a
    /// comment (the caller should loop around to scan the next token).
    fn scan_slash(&mut self, start: u32) -> Option<Token> {
        self.reader.scan_char(); // past '/'
        match self.reader.ch() {
            '/' => {
                while !matches!(self.reader.ch(), '\n' | '\r') && !self.reader.is_eoi() {
                    self.reader.scan_comment_char();
                }
                None
            }
            '*' => {
                self.reader.scan_char(); // past '*'
                let is_javadoc = self.reader.ch() == '*' && self.reader.peek_char() != '/';
                if self.reader.ch() == '*' {
                    self.reader.scan_char();
                }
                let body_start = self.reader.bp();
                let mut closed = false;
                loop {
                    if self.reader.is_eoi() {
                        self.report_simple(start, lex::UNCLOSED_COMMENT);
                        break;
                    }
                    if self.reader.ch() == '*' && self.reader.peek_char() == '/' {
                        self.reader.scan_comment_char();
                        self.reader.scan_comment_char();
                        closed = true;
                        break;
                    }
                    self.scratch.put_char(self.reader.ch());
                    self.reader.scan_comment_char();
                }
                if is_javadoc {
                    let body_end = if closed {
                        self.reader.bp().saturating_sub(2)
                    } else {
                        self.reader.bp()
                    };
                    self.pending_doc_comments.push(DocComment {
                        start: body_start,
                        end: body_end,
                        text: self.scratch.chars(),
                    });
                }
                None
            }
            '=' => {
                self.reader.scan_char();
                Some(Token::default_kind(TokenKind::SlashEq, start, self.reader.bp()))
            }
            _ => Some(Token::default_kind(TokenKind::Slash, start, self.reader.bp())),
        }
    }

    // --- Character literals ----------------------------------------------

    fn scan_char_lit(&mut self, start: u32) -> Token {
        self.reader.scan_char(); // past opening '
        if self.reader.ch() == '\'' {
            self.report_simple(start, lex::EMPTY_CHAR_LIT);
            self.reader.scan_char();
            return Token::default_kind(TokenKind::Error, start, self.reader.bp());
        }

        if self.reader.ch() == '\\' {
            if let Some(c) = self.scan_escape() {
                self.scratch.put_char(c);
            }
        } else {
            self.scratch.put_char(self.reader.ch());
            self.reader.scan_char();
        }

        match self.reader.ch() {
            '\'' => {
                self.reader.scan_char();
            }
            '\n' | '\r' => {
                self.report_simple(start, lex::ILLEGAL_LINE_END_IN_CHAR_LIT);
                return Token::default_kind(TokenKind::Error, start, self.reader.bp());
            }
            _ if self.reader.is_eoi() => {
                self.report_simple(start, lex::UNCLOSED_CHAR_LIT);
                return Token::default_kind(TokenKind::Error, start, self.reader.bp());
            }
            _ => {
                self.report_simple(start, lex::UNCLOSED_CHAR_LIT);
                while !matches!(self.reader.ch(), '\'' | '\n' | '\r') && !self.reader.is_eoi() {
                    self.reader.scan_char();
                }
                if self.reader.ch() == '\'' {
                    self.reader.scan_char();
                }
                return Token::default_kind(TokenKind::Error, start, self.reader.bp());
            }
        }

        Token::new(
            TokenKind::CharLiteral,
            start,
            self.reader.bp(),
            Payload::Numeric {
                text: self.scratch.chars(),
                radix: Radix::Decimal,
            },
        )
    }

    fn scan_escape(&mut self) -> Option<char> {
        self.reader.scan_char(); // past '\'
        match self.reader.ch() {
            'b' => {
                self.reader.scan_char();
                Some('\u{0008}')
            }
            't' => {
                self.reader.scan_char();
                Some('\t')
            }
            'n' => {
                self.reader.scan_char();
                Some('\n')
            }
            'f' => {
                self.reader.scan_char();
                Some('\u{000C}')
            }
            'r' => {
                self.reader.scan_char();
                Some('\r')
            }
            '\'' => {
                self.reader.scan_char();
                Some('\'')
            }
            '"' => {
                self.reader.scan_char();
                Some('"')
            }
            '\\' => {
                self.reader.scan_char();
                Some('\\')
            }
            '0'..='7' => {
                let first = self.reader.ch();
                let max_digits = if ('0'..='3').contains(&first) { 3 } else { 2 };
                let mut value = first.to_digit(8).unwrap();
                self.reader.scan_char();
                let mut n = 1;
                while n < max_digits && is_octal_digit(self.reader.ch()) {
                    value = value * 8 + self.reader.ch().to_digit(8).unwrap();
                    self.reader.scan_char();
                    n += 1;
                }
                Some(char::from_u32(value).unwrap_or('\u{FFFD}'))
            }
            other => {
                let pos = self.reader.bp();
                self.report(pos, lex::ILLEGAL_ESC_CHAR, vec![other.to_string()]);
                self.reader.scan_char();
                None
            }
        }
    }

    // --- String literals --------------------------------------------------

    fn scan_string_lit(&mut self, start: u32) -> Token {
        self.reader.scan_char(); // past opening "
        loop {
            match self.reader.ch() {
                '"' => {
                    self.reader.scan_char();
                    break;
                }
                '\\' => {
                    if let Some(c) = self.scan_escape() {
                        self.scratch.put_char(c);
                    }
                }
                '\n' | '\r' => {
                    self.report_simple(start, lex::UNCLOSED_STR_LIT);
                    return Token::default_kind(TokenKind::Error, start, self.reader.bp());
                }
                _ if self.reader.is_eoi() => {
                    self.report_simple(start, lex::UNCLOSED_STR_LIT);
                    return Token::default_kind(TokenKind::Error, start, self.reader.bp());
                }
                c => {
                    self.scratch.put_char(c);
                    self.reader.scan_char();
                }
            }
        }
        Token::new(
            TokenKind::StringLiteral,
            start,
            self.reader.bp(),
            Payload::Str(self.scratch.chars()),
        )
    }

    // --- Operators ---------------------------------------------------------

    fn scan_operator(&mut self, start: u32) -> Token {
        let mut lexeme = String::new();
        lexeme.push(self.reader.ch());
        self.reader.scan_char();
        loop {
            let mut candidate = lexeme.clone();
            candidate.push(self.reader.ch());
            if OPERATORS.contains_key(candidate.as_str()) {
                lexeme = candidate;
                self.reader.scan_char();
            } else {
                break;
            }
        }
        let kind = OPERATORS.get(lexeme.as_str()).copied().unwrap_or_else(|| {
            debug_assert!(false, "scan_operator built an unrecognised lexeme {lexeme:?}");
            TokenKind::Error
        });
        Token::default_kind(kind, start, self.reader.bp())
    }
}

impl<'a, E: ErrorSink> Lexer for JavaTokenizer<'a, E> {
    fn next_token(&mut self) -> Token {
        let tok = if let Some(tok) = self.split_remainder.take() {
            tok
        } else if let Some(tok) = self.lookahead_buf.pop_front() {
            tok
        } else {
            self.read_token()
        };
        self.prev = self.current.replace(tok.clone());
        tok
    }

    fn token(&self) -> &Token {
        self.current.as_ref().unwrap_or(CURRENT_EOF.get_or_init())
    }

    fn token_at(&mut self, lookahead: usize) -> Result<&Token> {
        if lookahead == 0 {
            return Ok(self.token());
        }
        while self.lookahead_buf.len() < lookahead {
            let tok = self.read_token();
            let is_eof = tok.kind == TokenKind::Eof;
            self.lookahead_buf.push_back(tok);
            if is_eof {
                break;
            }
        }
        self.lookahead_buf
            .get(lookahead - 1)
            .ok_or(ContractError::LookaheadOutOfRange {
                requested: lookahead,
                available: self.lookahead_buf.len(),
            })
    }

    fn prev_token(&self) -> Option<&Token> {
        self.prev.as_ref()
    }

    fn split(&mut self) -> Result<Token> {
        let cur = self.current.clone().ok_or(ContractError::NotSplittable)?;
        let (rest_kind,) = match cur.kind {
            TokenKind::GtGt => (TokenKind::Gt,),
            TokenKind::GtGtGt => (TokenKind::GtGt,),
            TokenKind::GtEq => (TokenKind::Eq,),
            TokenKind::GtGtEq => (TokenKind::GtEq,),
            TokenKind::GtGtGtEq => (TokenKind::GtGtEq,),
            _ => return Err(ContractError::NotSplittable),
        };
        let first = Token::default_kind(TokenKind::Gt, cur.start, cur.start + 1);
        let rest = Token::default_kind(rest_kind, cur.start + 1, cur.end);
        self.split_remainder = Some(rest);
        self.prev = self.current.replace(first.clone());
        Ok(first)
    }

    fn err_pos(&self) -> u32 {
        self.err_pos
    }

    fn set_err_pos(&mut self, pos: u32) {
        self.err_pos = pos;
    }

    fn line_map(&self) -> &LineMap {
        self.line_map.get_or_init(|| LineMap::new(&self.src))
    }
}

/// A process-wide `EOF` sentinel so [`Lexer::token`] can return `&Token`
/// before `next_token()` has ever been called, without allocating a
/// fresh one per call.
struct LazyEof(std::sync::OnceLock<Token>);
impl LazyEof {
    fn get_or_init(&self) -> &Token {
        self.0.get_or_init(|| Token::default_kind(TokenKind::Eof, 0, 0))
    }
}
static CURRENT_EOF: LazyEof = LazyEof(std::sync::OnceLock::new());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingErrorSink;

    fn tokenize(src: &str) -> (Vec<Token>, Names, CollectingErrorSink) {
        let mut names = Names::new();
        let mut sink = CollectingErrorSink::default();
        let mut toks = Vec::new();
        {
            let mut tz = JavaTokenizer::new(src, &mut names, &mut sink, JavaTokenizerOpts::default());
            loop {
                let t = tz.read_token();
                let is_eof = t.kind == TokenKind::Eof;
                toks.push(t);
                if is_eof {
                    break;
                }
            }
        }
        (toks, names, sink)
    }

    #[test]
    fn e1_empty_input_is_single_eof() {
        let (toks, _, _) = tokenize("");
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Eof);
        assert_eq!((toks[0].start, toks[0].end), (0, 0));
    }

    #[test]
    fn e2_keyword_vs_identifier() {
        let (toks, names, _) = tokenize("classy class");
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0].kind, TokenKind::Identifier);
        assert_eq!((toks[0].start, toks[0].end), (0, 6));
        assert_eq!(names.as_str(toks[0].name().unwrap()), "classy");
        assert_eq!(toks[1].kind, TokenKind::Class);
        assert_eq!((toks[1].start, toks[1].end), (7, 12));
        assert_eq!(toks[2].kind, TokenKind::Eof);
    }

    #[test]
    fn e3_operator_split() {
        let mut names = Names::new();
        let mut sink = CollectingErrorSink::default();
        let mut tz = JavaTokenizer::new(">>=", &mut names, &mut sink, JavaTokenizerOpts::default());
        let first = tz.next_token();
        assert_eq!(first.kind, TokenKind::GtGtEq);
        let gt = tz.split().unwrap();
        assert_eq!(gt.kind, TokenKind::Gt);
        assert_eq!((gt.start, gt.end), (0, 1));
        let rest = tz.next_token();
        assert_eq!(rest.kind, TokenKind::GtEq);
        assert_eq!((rest.start, rest.end), (1, 3));
    }

    #[test]
    fn e4_hex_float_with_underscore() {
        let (toks, _, _) = tokenize("0x1_F.2p3f");
        assert_eq!(toks[0].kind, TokenKind::FloatLiteral);
        let (text, radix) = toks[0].numeric_value().unwrap();
        assert_eq!(text, "1F.2p3f");
        assert_eq!(radix, Radix::Hex);
    }

    #[test]
    fn decimal_long_literal() {
        let (toks, _, _) = tokenize("123L");
        assert_eq!(toks[0].kind, TokenKind::LongLiteral);
        assert_eq!(toks[0].numeric_value().unwrap().0, "123L");
    }

    #[test]
    fn binary_literal_with_underscore() {
        let (toks, _, _) = tokenize("0b1010_1010");
        assert_eq!(toks[0].kind, TokenKind::IntLiteral);
        assert_eq!(toks[0].numeric_value().unwrap(), ("10101010", Radix::Binary));
    }

    #[test]
    fn octal_literal() {
        let (toks, _, _) = tokenize("0755");
        assert_eq!(toks[0].kind, TokenKind::IntLiteral);
        assert_eq!(toks[0].numeric_value().unwrap(), ("0755", Radix::Octal));
    }

    #[test]
    fn leading_zero_decimal_float() {
        let (toks, _, _) = tokenize("0.5");
        assert_eq!(toks[0].kind, TokenKind::DoubleLiteral);
        assert_eq!(toks[0].numeric_value().unwrap(), ("0.5", Radix::Decimal));
    }

    #[test]
    fn fractional_literal_leading_dot() {
        let (toks, _, _) = tokenize(".25f");
        assert_eq!(toks[0].kind, TokenKind::FloatLiteral);
        assert_eq!(toks[0].numeric_value().unwrap(), ("0.25f", Radix::Decimal));
    }

    #[test]
    fn ellipsis_vs_dot() {
        let (toks, _, _) = tokenize("a...b.c");
        assert_eq!(toks[1].kind, TokenKind::Ellipsis);
        assert_eq!(toks[3].kind, TokenKind::Dot);
    }

    #[test]
    fn string_literal_with_escapes() {
        let (toks, _, _) = tokenize(r#""a\tb!""#);
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].string_value().unwrap(), "a\tb!");
    }

    #[test]
    fn char_literal_octal_escape() {
        let (toks, _, _) = tokenize(r"'\101'");
        assert_eq!(toks[0].kind, TokenKind::CharLiteral);
        assert_eq!(toks[0].numeric_value().unwrap().0, "A");
    }

    #[test]
    fn empty_char_literal_reports_error() {
        let (toks, _, sink) = tokenize("''");
        assert_eq!(toks[0].kind, TokenKind::Error);
        assert_eq!(sink.0[0].code, lex::EMPTY_CHAR_LIT);
    }

    #[test]
    fn unclosed_string_reports_error() {
        let (toks, _, sink) = tokenize("\"abc");
        assert_eq!(toks[0].kind, TokenKind::Error);
        assert_eq!(sink.0[0].code, lex::UNCLOSED_STR_LIT);
    }

    #[test]
    fn unclosed_block_comment_reports_error() {
        let (toks, _, sink) = tokenize("/* never closes");
        assert_eq!(toks[0].kind, TokenKind::Eof);
        assert_eq!(sink.0[0].code, lex::UNCLOSED_COMMENT);
    }

    #[test]
    fn hex_literal_with_no_digits_reports_error() {
        let (toks, _, sink) = tokenize("0x;");
        assert_eq!(toks[0].kind, TokenKind::Error);
        assert_eq!(sink.0[0].code, lex::INVALID_HEX_NUMBER);
    }

    #[test]
    fn binary_literal_with_no_digits_reports_error() {
        let (toks, _, sink) = tokenize("0b;");
        assert_eq!(toks[0].kind, TokenKind::Error);
        assert_eq!(sink.0[0].code, lex::INVALID_BINARY_NUMBER);
    }

    #[test]
    fn line_comment_then_token() {
        let (toks, _, _) = tokenize("// comment\nclass");
        assert_eq!(toks[0].kind, TokenKind::Class);
    }

    #[test]
    fn javadoc_comment_is_captured() {
        let mut names = Names::new();
        let mut sink = CollectingErrorSink::default();
        let mut tz = JavaTokenizer::new(
            "/** Hello */ class C {}",
            &mut names,
            &mut sink,
            JavaTokenizerOpts::default(),
        );
        let _ = tz.next_token();
        let docs = tz.take_doc_comments();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, " Hello ");
    }

    #[test]
    fn ordinary_block_comment_is_not_javadoc() {
        let mut names = Names::new();
        let mut sink = CollectingErrorSink::default();
        let mut tz = JavaTokenizer::new("/* not doc */ class C {}", &mut names, &mut sink, JavaTokenizerOpts::default());
        let _ = tz.next_token();
        assert!(tz.take_doc_comments().is_empty());
    }

    #[test]
    fn keyword_vs_identifier_closure_property() {
        // Every keyword must round-trip through lookup_kind, and
        // near-miss spellings must stay plain identifiers.
        for (&spelling, &kind) in crate::token::KEYWORDS.entries() {
            let (toks, _, _) = tokenize(spelling);
            assert_eq!(toks[0].kind, kind);
        }
        for spelling in ["classy", "_abstract", "whilex", "Public"] {
            let (toks, _, _) = tokenize(spelling);
            assert_eq!(toks[0].kind, TokenKind::Identifier);
        }
    }

    #[test]
    fn tokenization_round_trip_positions() {
        // Every token's [start, end) span slices back to its own spelling.
        let src = "class Foo { int x = 1 + 2; }";
        let (toks, _, _) = tokenize(src);
        for t in &toks {
            if t.kind == TokenKind::Eof {
                continue;
            }
            let spelling = &src[t.start as usize..t.end as usize];
            if let Some(expected) = t.kind.spelling() {
                assert_eq!(spelling, expected);
            }
        }
    }

    #[test]
    fn unicode_escape_idempotence() {
        // A unicode-escaped spelling tokenizes identically to its plain form.
        let (plain, _, _) = tokenize("class");
        let (escaped, _, _) = tokenize("\\u0063lass");
        assert_eq!(plain[0].kind, escaped[0].kind);
    }

    #[test]
    fn lookahead_peeks_without_consuming() {
        let mut names = Names::new();
        let mut sink = CollectingErrorSink::default();
        let mut tz = JavaTokenizer::new("a b c", &mut names, &mut sink, JavaTokenizerOpts::default());
        let first = tz.next_token();
        assert_eq!(first.kind, TokenKind::Identifier);
        let ahead = tz.token_at(1).unwrap().clone();
        assert_eq!(ahead.kind, TokenKind::Identifier);
        let second = tz.next_token();
        assert_eq!(second.start, ahead.start);
    }

    #[test]
    fn lookahead_out_of_range_is_contract_error() {
        let mut names = Names::new();
        let mut sink = CollectingErrorSink::default();
        let mut tz = JavaTokenizer::new("a", &mut names, &mut sink, JavaTokenizerOpts::default());
        let _ = tz.next_token();
        assert!(tz.token_at(5).is_err());
    }
}
