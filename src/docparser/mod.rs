// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The doc-comment parser: turns the raw text of one `/** ... */`
//! comment into a [`crate::doctree::DocTree::DocComment`].
//!
//! A hand-written character-cursor scanner in the same style as
//! [`crate::tokenizer::JavaTokenizer`]'s state-machine scanning: a doc
//! comment is a few hundred characters read once, not a streamed byte
//! source, so this parser owns a `Vec<char>` cursor the same way
//! `JavaTokenizer` owns its [`crate::util::reader::UnicodeReader`] —
//! same idiom, smaller input.

pub mod reference;
pub mod tags;

use crate::diagnostics::{doc, Diagnostic, ErrorSink};
use crate::doctree::visitor::first_sentence;
use crate::doctree::{AttributeValueKind, DocTree, DocTreeFactory};
use reference::parse_reference;
use tags::{lookup as lookup_tag, TagKind};

/// Knobs for [`DocCommentParser`], mirroring
/// [`crate::tokenizer::JavaTokenizerOpts`]'s plain-struct-with-`Default`
/// configuration style.
#[derive(Clone, Debug)]
pub struct DocParserOpts {
    /// Accept `:` in an HTML tag or attribute name (namespaced custom
    /// elements, e.g. `<x:foo>`)? Default: true. javac itself is
    /// lenient here; turning this off makes `:` end the name early,
    /// which then usually trips `dc.malformed.html`.
    pub allow_colon_in_name: bool,
}

impl Default for DocParserOpts {
    fn default() -> DocParserOpts {
        DocParserOpts {
            allow_colon_in_name: true,
        }
    }
}

/// Strip the `/**`/`*/` delimiters' leading-`*` column markers from a
/// raw comment body. Leading `*` column markers are removed before
/// tag parsing begins.
///
/// `text` is [`crate::tokenizer::DocComment::text`] — already without
/// the `/**`/`*/` delimiters themselves, but with every subsequent
/// line's leading whitespace-then-`*`-then-one-space intact, the way
/// the raw source looks. The first line is trimmed of leading
/// whitespace only (there is no `*` to strip on the line the `/**`
/// itself started).
pub fn strip_doc_comment(text: &str) -> String {
    let mut lines = text.split('\n');
    let mut out = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        out.push_str(first.trim_start());
    }
    for line in lines {
        out.push('\n');
        let trimmed = line.trim_start();
        match trimmed.strip_prefix('*') {
            Some(rest) => out.push_str(rest.strip_prefix(' ').unwrap_or(rest)),
            None => out.push_str(trimmed),
        }
    }
    out
}

/// Parses one stripped doc-comment body into a [`DocTree::DocComment`].
/// Never fails: anything it cannot make sense of becomes an
/// `ERRONEOUS` node embedded in place, alongside a report to `sink` —
/// the same recoverable-error contract as the tokenizer.
pub struct DocCommentParser<'a, E: ErrorSink> {
    chars: Vec<char>,
    pos: usize,
    /// True until a non-whitespace character is read since the last
    /// line terminator (or since the start of input). Only used to
    /// decide whether a `@` introduces a block tag: a block tag begins
    /// at the first non-whitespace position of a line.
    line_start: bool,
    opts: &'a DocParserOpts,
    sink: &'a mut E,
    factory: DocTreeFactory,
}

const EOI: char = '\0';

impl<'a, E: ErrorSink> DocCommentParser<'a, E> {
    pub fn new(text: &str, opts: &'a DocParserOpts, sink: &'a mut E) -> DocCommentParser<'a, E> {
        DocCommentParser {
            chars: text.chars().collect(),
            pos: 0,
            line_start: true,
            opts,
            sink,
            factory: DocTreeFactory::new(),
        }
    }

    /// Parse `text` (already run through [`strip_doc_comment`]) into
    /// its `DocTree::DocComment`.
    pub fn parse(text: &str, opts: &'a DocParserOpts, sink: &'a mut E) -> DocTree {
        let mut p = DocCommentParser::new(text, opts, sink);
        p.parse_comment()
    }

    fn ch(&self) -> char {
        self.chars.get(self.pos).copied().unwrap_or(EOI)
    }

    fn peek(&self) -> char {
        self.chars.get(self.pos + 1).copied().unwrap_or(EOI)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn bump(&mut self) {
        match self.ch() {
            '\n' => {
                self.pos += 1;
                self.line_start = true;
            }
            ' ' | '\t' | '\r' => {
                self.pos += 1;
            }
            EOI => {}
            _ => {
                self.pos += 1;
                self.line_start = false;
            }
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    fn skip_inline_whitespace(&mut self) {
        while matches!(self.ch(), ' ' | '\t' | '\n' | '\r') {
            self.bump();
        }
    }

    fn report(&mut self, pos: usize, code: crate::diagnostics::DiagnosticCode) {
        self.sink.report(Diagnostic {
            pos: pos as u32,
            code,
            args: Vec::new(),
        });
    }

    fn erroneous(&mut self, start: usize, code: crate::diagnostics::DiagnosticCode) -> DocTree {
        self.report(start, code);
        let text = self.slice(start, self.pos);
        self.factory.at(start as u32).new_erroneous_tree(self.pos as u32, text, code.0)
    }

    fn is_tag_name_char(c: char) -> bool {
        c.is_alphanumeric() || c == '-' || c == '_'
    }

    fn is_name_char(&self, c: char) -> bool {
        Self::is_tag_name_char(c) || (self.opts.allow_colon_in_name && c == ':')
    }

    // ---- top-level structure -------------------------------------

    fn parse_comment(&mut self) -> DocTree {
        let body = self.scan_content(true, false);
        let block_tags = self.block_tags();
        let end = self.pos as u32;
        let (first_sentence, body) = first_sentence(&body);
        self.factory
            .at(0)
            .new_doc_comment_tree(end, first_sentence, body, block_tags)
    }

    fn block_tags(&mut self) -> Vec<DocTree> {
        let mut out = Vec::new();
        while !self.is_eof() && self.ch() == '@' {
            out.push(self.block_tag());
        }
        out
    }

    /// Shared content scanner for both "top of comment" and "inside a
    /// block tag's description" (`stop_at_line_at`), and for inline-tag
    /// bodies/labels (`stop_at_rbrace`). Unifies what would otherwise
    /// be three separate loops (block content, inline content,
    /// description scanning): they differ only in their stop
    /// condition, so one scanner with two stop flags plays the role of
    /// all three, the way [`crate::tokenizer`] uses one `read_token`
    /// loop for every lexical context instead of one function per
    /// token kind.
    fn scan_content(&mut self, stop_at_line_at: bool, stop_at_rbrace: bool) -> Vec<DocTree> {
        let mut out = Vec::new();
        let mut text_start: Option<usize> = None;
        let mut brace_depth = 0i32;
        loop {
            if self.is_eof() {
                break;
            }
            if stop_at_line_at && self.line_start && self.ch() == '@' {
                break;
            }
            if stop_at_rbrace && self.ch() == '}' && brace_depth == 0 {
                break;
            }
            match self.ch() {
                '&' => {
                    self.flush_text(&mut out, &mut text_start);
                    let node = self.entity();
                    out.push(node);
                }
                '<' => {
                    self.flush_text(&mut out, &mut text_start);
                    let node = self.html();
                    out.push(node);
                }
                '>' => {
                    self.flush_text(&mut out, &mut text_start);
                    let start = self.pos;
                    self.bump();
                    self.report(start, doc::BAD_GT);
                    out.push(self.factory.at(start as u32).new_text_tree(self.pos as u32, ">"));
                }
                '{' if self.peek() == '@' => {
                    self.flush_text(&mut out, &mut text_start);
                    let node = self.inline_tag();
                    out.push(node);
                }
                '{' => {
                    if text_start.is_none() {
                        text_start = Some(self.pos);
                    }
                    if stop_at_rbrace {
                        brace_depth += 1;
                    }
                    self.bump();
                }
                '}' if stop_at_rbrace => {
                    // brace_depth == 0 already handled by the stop check above
                    if text_start.is_none() {
                        text_start = Some(self.pos);
                    }
                    brace_depth -= 1;
                    self.bump();
                }
                _ => {
                    if text_start.is_none() {
                        text_start = Some(self.pos);
                    }
                    self.bump();
                }
            }
        }
        self.flush_text(&mut out, &mut text_start);
        out
    }

    fn flush_text(&mut self, out: &mut Vec<DocTree>, text_start: &mut Option<usize>) {
        if let Some(start) = text_start.take() {
            if start < self.pos {
                let text = self.slice(start, self.pos);
                out.push(self.factory.at(start as u32).new_text_tree(self.pos as u32, text));
            }
        }
    }

    // ---- entities and HTML ----------------------------------------

    fn entity(&mut self) -> DocTree {
        let start = self.pos;
        self.bump(); // '&'
        let mut name = String::new();
        if self.ch() == '#' {
            name.push('#');
            self.bump();
            if matches!(self.ch(), 'x' | 'X') {
                name.push(self.ch());
                self.bump();
                while self.ch().is_ascii_hexdigit() {
                    name.push(self.ch());
                    self.bump();
                }
            } else {
                while self.ch().is_ascii_digit() {
                    name.push(self.ch());
                    self.bump();
                }
            }
        } else {
            while self.ch().is_alphanumeric() {
                name.push(self.ch());
                self.bump();
            }
        }
        if name.is_empty() || name == "#" {
            return self.erroneous(start, doc::BAD_ENTITY);
        }
        if self.ch() == ';' {
            self.bump();
            self.factory.at(start as u32).new_entity_tree(self.pos as u32, name)
        } else {
            self.erroneous(start, doc::MISSING_SEMICOLON)
        }
    }

    fn html(&mut self) -> DocTree {
        let start = self.pos;
        self.bump(); // '<'
        if self.ch() == '!' && self.peek() == '-' && self.chars.get(self.pos + 2) == Some(&'-') {
            return self.html_comment(start);
        }
        let is_end = self.ch() == '/';
        if is_end {
            self.bump();
        }
        let name_start = self.pos;
        while self.is_name_char(self.ch()) {
            self.bump();
        }
        let name = self.slice(name_start, self.pos);
        if name.is_empty() {
            return self.erroneous(start, doc::MALFORMED_HTML);
        }
        if is_end {
            self.skip_inline_whitespace();
            if self.ch() == '>' {
                self.bump();
                self.factory.at(start as u32).new_end_element_tree(self.pos as u32, name)
            } else {
                self.erroneous(start, doc::MALFORMED_HTML)
            }
        } else {
            let mut attrs = Vec::new();
            loop {
                self.skip_inline_whitespace();
                if self.ch() == '/' && self.peek() == '>' {
                    self.bump();
                    self.bump();
                    return self
                        .factory
                        .at(start as u32)
                        .new_start_element_tree(self.pos as u32, name, attrs, true);
                }
                if self.ch() == '>' {
                    self.bump();
                    return self
                        .factory
                        .at(start as u32)
                        .new_start_element_tree(self.pos as u32, name, attrs, false);
                }
                if self.is_eof() || self.ch() == '<' {
                    return self.erroneous(start, doc::MALFORMED_HTML);
                }
                let before = self.pos;
                attrs.push(self.attribute());
                if self.pos == before {
                    // `attribute()` could not form a name or an `=`value
                    // (e.g. a stray `"`/`'`/`/` in attribute position) and
                    // consumed nothing; resync on the junk character so
                    // the loop always makes forward progress.
                    self.report(self.pos, doc::MALFORMED_HTML);
                    self.bump();
                }
            }
        }
    }

    fn html_comment(&mut self, start: usize) -> DocTree {
        self.bump(); // '!'
        self.bump(); // '-'
        self.bump(); // '-'
        let text_start = self.pos;
        loop {
            if self.is_eof() {
                return self.erroneous(start, doc::MALFORMED_HTML);
            }
            if self.ch() == '-' && self.peek() == '-' && self.chars.get(self.pos + 2) == Some(&'>')
            {
                break;
            }
            self.bump();
        }
        let text = self.slice(text_start, self.pos);
        self.bump();
        self.bump();
        self.bump();
        self.factory.at(start as u32).new_comment_tree(self.pos as u32, text)
    }

    fn attribute(&mut self) -> DocTree {
        let start = self.pos;
        let name_start = self.pos;
        while self.is_name_char(self.ch()) {
            self.bump();
        }
        let name = self.slice(name_start, self.pos);
        self.skip_inline_whitespace();
        if self.ch() == '=' {
            self.bump();
            self.skip_inline_whitespace();
            match self.ch() {
                '"' => self.quoted_attribute_value(start, name, '"', AttributeValueKind::Double),
                '\'' => self.quoted_attribute_value(start, name, '\'', AttributeValueKind::Single),
                _ => {
                    let value_start = self.pos;
                    while !self.is_eof()
                        && !self.ch().is_whitespace()
                        && self.ch() != '>'
                        && !(self.ch() == '/' && self.peek() == '>')
                    {
                        self.bump();
                    }
                    let text = self.slice(value_start, self.pos);
                    let value = vec![self
                        .factory
                        .at(value_start as u32)
                        .new_text_tree(self.pos as u32, text)];
                    self.factory.at(start as u32).new_attribute_tree(
                        self.pos as u32,
                        name,
                        AttributeValueKind::Unquoted,
                        value,
                    )
                }
            }
        } else {
            self.factory
                .at(start as u32)
                .new_attribute_tree(self.pos as u32, name, AttributeValueKind::Empty, Vec::new())
        }
    }

    fn quoted_attribute_value(
        &mut self,
        start: usize,
        name: String,
        quote: char,
        kind: AttributeValueKind,
    ) -> DocTree {
        self.bump(); // opening quote
        let value_start = self.pos;
        while !self.is_eof() && self.ch() != quote && self.ch() != '\n' {
            self.bump();
        }
        let text = self.slice(value_start, self.pos);
        if self.ch() == quote {
            self.bump();
        }
        let value = vec![self
            .factory
            .at(value_start as u32)
            .new_text_tree(self.pos as u32, text)];
        self.factory
            .at(start as u32)
            .new_attribute_tree(self.pos as u32, name, kind, value)
    }

    // ---- inline tags ------------------------------------------------

    fn inline_tag(&mut self) -> DocTree {
        let start = self.pos;
        self.bump(); // '{'
        self.bump(); // '@'
        let name_start = self.pos;
        while Self::is_tag_name_char(self.ch()) {
            self.bump();
        }
        let name = self.slice(name_start, self.pos);
        if name.is_empty() {
            return self.erroneous(start, doc::NO_TAG_NAME);
        }

        let spec = lookup_tag(&name).filter(|s| s.kind == TagKind::Inline);
        match spec.map(|_| name.as_str()) {
            Some("code") => self.finish_verbatim_inline(start, name, true),
            Some("literal") => self.finish_verbatim_inline(start, name, false),
            Some("docRoot") => self.finish_empty_inline(start, |f, end| f.new_doc_root_tree(end)),
            Some("inheritDoc") => {
                self.finish_empty_inline(start, |f, end| f.new_inherit_doc_tree(end))
            }
            Some("index") => self.finish_index(start),
            Some("link") => self.finish_link(start, false),
            Some("linkplain") => self.finish_link(start, true),
            Some("value") => self.finish_value(start),
            _ => self.finish_unknown_inline(start, name),
        }
    }

    fn finish_verbatim_inline(&mut self, start: usize, name: String, is_code: bool) -> DocTree {
        if self.ch() == ' ' {
            self.bump();
        }
        let content_start = self.pos;
        let mut depth = 0i32;
        loop {
            if self.is_eof() {
                return self.erroneous(start, doc::UNTERMINATED_INLINE_TAG);
            }
            match self.ch() {
                '{' => {
                    depth += 1;
                    self.bump();
                }
                '}' => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                }
                _ => self.bump(),
            }
        }
        let text = self.slice(content_start, self.pos);
        let text_node = self
            .factory
            .at(content_start as u32)
            .new_text_tree(self.pos as u32, text);
        self.bump(); // '}'
        let end = self.pos as u32;
        if is_code {
            self.factory.at(start as u32).new_code_tree(end, text_node)
        } else {
            let _ = &name;
            self.factory.at(start as u32).new_literal_tree(end, text_node)
        }
    }

    fn finish_empty_inline(
        &mut self,
        start: usize,
        build: impl FnOnce(&crate::doctree::At<'_>, u32) -> DocTree,
    ) -> DocTree {
        self.skip_inline_whitespace();
        if self.ch() == '}' {
            self.bump();
            let at = self.factory.at(start as u32);
            build(&at, self.pos as u32)
        } else {
            self.erroneous(start, doc::UNEXPECTED_CONTENT)
        }
    }

    fn finish_index(&mut self, start: usize) -> DocTree {
        self.skip_inline_whitespace();
        let term = if self.ch() == '"' {
            let qs = self.pos;
            self.bump();
            let ts = self.pos;
            while !self.is_eof() && self.ch() != '"' {
                self.bump();
            }
            let text = self.slice(ts, self.pos);
            if self.ch() == '"' {
                self.bump();
            } else {
                return self.erroneous(qs, doc::UNTERMINATED_STRING);
            }
            self.factory.at(qs as u32).new_text_tree(self.pos as u32, text)
        } else {
            let ts = self.pos;
            while !self.is_eof() && !self.ch().is_whitespace() && self.ch() != '}' {
                self.bump();
            }
            if self.pos == ts {
                return self.erroneous(start, doc::NO_CONTENT);
            }
            let text = self.slice(ts, self.pos);
            self.factory.at(ts as u32).new_text_tree(self.pos as u32, text)
        };
        self.skip_inline_whitespace();
        let description = self.scan_content(false, true);
        if self.ch() == '}' {
            self.bump();
            self.factory
                .at(start as u32)
                .new_index_tree(self.pos as u32, term, description)
        } else {
            self.erroneous(start, doc::UNTERMINATED_INLINE_TAG)
        }
    }

    /// Reads a reference signature up to the first whitespace or `}`
    /// not nested inside `(...)`/`<...>` (inline context). The second
    /// element is `true` when input ran out with an unclosed `(`/`<`
    /// still open — a genuinely unterminated signature, distinct from
    /// one whose parens are present but mismatched.
    fn capture_inline_signature(&mut self) -> (String, bool) {
        let start = self.pos;
        let mut depth = 0i32;
        loop {
            if self.is_eof() {
                break;
            }
            let c = self.ch();
            if depth == 0 && (c == '}' || c.is_whitespace()) {
                break;
            }
            match c {
                '(' | '<' => depth += 1,
                ')' | '>' => depth = (depth - 1).max(0),
                _ => {}
            }
            self.bump();
        }
        (self.slice(start, self.pos), self.is_eof() && depth > 0)
    }

    /// As [`Self::reference_tree`], but reports `dc.unterminated.signature`
    /// directly when `unterminated` (input ran out with an open paren/
    /// angle bracket) rather than letting the embedded type parser
    /// produce a less specific `dc.ref.bad.parens`.
    fn reference_tree_checked(
        &mut self,
        start: usize,
        signature: &str,
        unterminated: bool,
        allow_member: bool,
    ) -> DocTree {
        if unterminated {
            return self.erroneous(start, doc::UNTERMINATED_SIGNATURE);
        }
        self.reference_tree(start, signature, allow_member)
    }

    fn reference_tree(&mut self, start: usize, signature: &str, allow_member: bool) -> DocTree {
        match parse_reference(signature, allow_member) {
            Ok(parts) => self.factory.at(start as u32).new_reference_tree(
                self.pos as u32,
                signature,
                parts.qualifier,
                parts.member_name,
                parts.param_types,
            ),
            Err(code) => {
                self.report(start, crate::diagnostics::DiagnosticCode(code));
                self.factory
                    .at(start as u32)
                    .new_erroneous_tree(self.pos as u32, signature, code)
            }
        }
    }

    fn finish_link(&mut self, start: usize, plain: bool) -> DocTree {
        self.skip_inline_whitespace();
        let sig_start = self.pos;
        let (signature, unterminated) = self.capture_inline_signature();
        if signature.is_empty() {
            return self.erroneous(start, doc::NO_CONTENT);
        }
        let reference = self.reference_tree_checked(sig_start, &signature, unterminated, true);
        self.skip_inline_whitespace();
        let label = self.scan_content(false, true);
        if self.ch() == '}' {
            self.bump();
            let end = self.pos as u32;
            if plain {
                self.factory.at(start as u32).new_link_plain_tree(end, reference, label)
            } else {
                self.factory.at(start as u32).new_link_tree(end, reference, label)
            }
        } else {
            self.erroneous(start, doc::UNTERMINATED_INLINE_TAG)
        }
    }

    fn finish_value(&mut self, start: usize) -> DocTree {
        self.skip_inline_whitespace();
        if self.ch() == '}' {
            self.bump();
            // `{@value}` with no signature refers to the enclosing
            // field; that binding is the caller's job, not the
            // parser's — name resolution stays out of this component.
            let reference = self
                .factory
                .at(self.pos as u32)
                .new_reference_tree(self.pos as u32, "", None, None, None);
            return self.factory.at(start as u32).new_value_tree(self.pos as u32, reference);
        }
        let sig_start = self.pos;
        let (signature, unterminated) = self.capture_inline_signature();
        let reference = self.reference_tree_checked(sig_start, &signature, unterminated, true);
        self.skip_inline_whitespace();
        if self.ch() == '}' {
            self.bump();
            self.factory.at(start as u32).new_value_tree(self.pos as u32, reference)
        } else {
            self.erroneous(start, doc::UNTERMINATED_INLINE_TAG)
        }
    }

    fn finish_unknown_inline(&mut self, start: usize, name: String) -> DocTree {
        let content = self.scan_content(false, true);
        if self.ch() == '}' {
            self.bump();
            self.factory
                .at(start as u32)
                .new_unknown_inline_tag_tree(self.pos as u32, name, content)
        } else {
            self.erroneous(start, doc::UNTERMINATED_INLINE_TAG)
        }
    }

    // ---- block tags ---------------------------------------------------

    /// Block-context signature capture: up to the first unbalanced
    /// whitespace outside `(...)`/`<...>`. See
    /// [`Self::capture_inline_signature`] for the second element.
    fn capture_block_signature(&mut self) -> (String, bool) {
        let start = self.pos;
        let mut depth = 0i32;
        loop {
            if self.is_eof() {
                break;
            }
            let c = self.ch();
            if depth == 0 && c.is_whitespace() {
                break;
            }
            match c {
                '(' | '<' => depth += 1,
                ')' | '>' => depth = (depth - 1).max(0),
                _ => {}
            }
            self.bump();
        }
        (self.slice(start, self.pos), self.is_eof() && depth > 0)
    }

    fn block_tag(&mut self) -> DocTree {
        let start = self.pos;
        self.bump(); // '@'
        let name_start = self.pos;
        while Self::is_tag_name_char(self.ch()) {
            self.bump();
        }
        let name = self.slice(name_start, self.pos);
        if name.is_empty() {
            // consume the rest of the line so we don't loop forever on
            // a bare '@'.
            while !self.is_eof() && self.ch() != '\n' {
                self.bump();
            }
            return self.erroneous(start, doc::NO_TAG_NAME);
        }
        self.skip_inline_whitespace();

        let spec = lookup_tag(&name).filter(|s| s.kind == TagKind::Block);
        match spec.map(|_| name.as_str()) {
            Some("author") => self.finish_description_only(start, |f, end, d| f.new_author_tree(end, d)),
            Some("deprecated") => {
                self.finish_description_only(start, |f, end, d| f.new_deprecated_tree(end, d))
            }
            Some("hidden") => self.finish_description_only(start, |f, end, d| f.new_hidden_tree(end, d)),
            Some("return") => self.finish_description_only(start, |f, end, d| f.new_return_tree(end, d)),
            Some("serial") => self.finish_description_only(start, |f, end, d| f.new_serial_tree(end, d)),
            Some("serialData") => {
                self.finish_description_only(start, |f, end, d| f.new_serial_data_tree(end, d))
            }
            Some("since") => self.finish_description_only(start, |f, end, d| f.new_since_tree(end, d)),
            Some("version") => self.finish_description_only(start, |f, end, d| f.new_version_tree(end, d)),
            Some("see") => self.finish_see(start),
            Some("param") => self.finish_param(start),
            Some("throws") => self.finish_throws_like(start, false),
            Some("exception") => self.finish_throws_like(start, true),
            Some("provides") => self.finish_provides_uses(start, false),
            Some("uses") => self.finish_provides_uses(start, true),
            Some("serialField") => self.finish_serial_field(start),
            _ => {
                let content = self.block_content();
                self.factory
                    .at(start as u32)
                    .new_unknown_block_tag_tree(self.pos as u32, name, content)
            }
        }
    }

    fn block_content(&mut self) -> Vec<DocTree> {
        self.scan_content(true, false)
    }

    fn finish_description_only(
        &mut self,
        start: usize,
        build: impl FnOnce(&crate::doctree::At<'_>, u32, Vec<DocTree>) -> DocTree,
    ) -> DocTree {
        let description = self.block_content();
        let at = self.factory.at(start as u32);
        build(&at, self.pos as u32, description)
    }

    fn finish_see(&mut self, start: usize) -> DocTree {
        if self.ch() == '"' {
            let qs = self.pos;
            self.bump();
            let ts = self.pos;
            while !self.is_eof() && self.ch() != '"' && self.ch() != '\n' {
                self.bump();
            }
            let text = self.slice(ts, self.pos);
            if self.ch() == '"' {
                self.bump();
            } else {
                return self.erroneous(qs, doc::UNTERMINATED_STRING);
            }
            let node = self.factory.at(qs as u32).new_text_tree(self.pos as u32, text);
            return self.factory.at(start as u32).new_see_tree(self.pos as u32, vec![node]);
        }
        if self.ch() == '<' {
            // An HTML link as the whole @see body; javac folds it into
            // the description same as any other inline content.
            let description = self.block_content();
            return self.factory.at(start as u32).new_see_tree(self.pos as u32, description);
        }
        let sig_start = self.pos;
        let (signature, unterminated) = self.capture_block_signature();
        if signature.is_empty() {
            return self.erroneous(start, doc::NO_CONTENT);
        }
        let reference = self.reference_tree_checked(sig_start, &signature, unterminated, true);
        self.skip_inline_whitespace();
        let mut description = self.block_content();
        let mut out = vec![reference];
        out.append(&mut description);
        self.factory.at(start as u32).new_see_tree(self.pos as u32, out)
    }

    fn finish_param(&mut self, start: usize) -> DocTree {
        self.skip_inline_whitespace();
        let is_type_parameter = self.ch() == '<';
        if is_type_parameter {
            self.bump();
        }
        let id_start = self.pos;
        while self.ch().is_alphanumeric() || self.ch() == '_' || self.ch() == '$' {
            self.bump();
        }
        let id_text = self.slice(id_start, self.pos);
        if id_text.is_empty() {
            return self.erroneous(start, doc::IDENTIFIER_EXPECTED);
        }
        if is_type_parameter {
            if self.ch() == '>' {
                self.bump();
            } else {
                return self.erroneous(start, doc::GT_EXPECTED);
            }
        }
        let name_node = self
            .factory
            .at(id_start as u32)
            .new_identifier_tree(self.pos as u32, id_text);
        self.skip_inline_whitespace();
        let description = self.block_content();
        self.factory.at(start as u32).new_param_tree(
            self.pos as u32,
            is_type_parameter,
            name_node,
            description,
        )
    }

    fn finish_throws_like(&mut self, start: usize, is_exception: bool) -> DocTree {
        let sig_start = self.pos;
        let (signature, unterminated) = self.capture_block_signature();
        if signature.is_empty() {
            return self.erroneous(start, doc::NO_CONTENT);
        }
        let reference = self.reference_tree_checked(sig_start, &signature, unterminated, false);
        self.skip_inline_whitespace();
        let description = self.block_content();
        if is_exception {
            self.factory
                .at(start as u32)
                .new_exception_tree(self.pos as u32, reference, description)
        } else {
            self.factory
                .at(start as u32)
                .new_throws_tree(self.pos as u32, reference, description)
        }
    }

    fn finish_provides_uses(&mut self, start: usize, is_uses: bool) -> DocTree {
        let sig_start = self.pos;
        let (signature, unterminated) = self.capture_block_signature();
        if signature.is_empty() {
            return self.erroneous(start, doc::NO_CONTENT);
        }
        let reference = self.reference_tree_checked(sig_start, &signature, unterminated, true);
        self.skip_inline_whitespace();
        let description = self.block_content();
        if is_uses {
            self.factory
                .at(start as u32)
                .new_uses_tree(self.pos as u32, reference, description)
        } else {
            self.factory
                .at(start as u32)
                .new_provides_tree(self.pos as u32, reference, description)
        }
    }

    fn finish_serial_field(&mut self, start: usize) -> DocTree {
        self.skip_inline_whitespace();
        let id_start = self.pos;
        while self.ch().is_alphanumeric() || self.ch() == '_' || self.ch() == '$' {
            self.bump();
        }
        let id_text = self.slice(id_start, self.pos);
        if id_text.is_empty() {
            return self.erroneous(start, doc::IDENTIFIER_EXPECTED);
        }
        let name_node = self
            .factory
            .at(id_start as u32)
            .new_identifier_tree(self.pos as u32, id_text);
        self.skip_inline_whitespace();
        let type_start = self.pos;
        let (type_sig, unterminated) = self.capture_block_signature();
        if type_sig.is_empty() {
            return self.erroneous(start, doc::NO_CONTENT);
        }
        if unterminated {
            return self.erroneous(type_start, doc::UNTERMINATED_SIGNATURE);
        }
        let type_node = match parse_reference(&type_sig, false) {
            Ok(parts) => self.factory.at(type_start as u32).new_reference_tree(
                self.pos as u32,
                &type_sig,
                parts.qualifier,
                parts.member_name,
                parts.param_types,
            ),
            Err(code) => {
                self.report(type_start, crate::diagnostics::DiagnosticCode(code));
                self.factory
                    .at(type_start as u32)
                    .new_erroneous_tree(self.pos as u32, type_sig, code)
            }
        };
        self.skip_inline_whitespace();
        let description = self.block_content();
        self.factory.at(start as u32).new_serial_field_tree(
            self.pos as u32,
            name_node,
            type_node,
            description,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingErrorSink, NullErrorSink};

    fn parse(text: &str) -> DocTree {
        let opts = DocParserOpts::default();
        let mut sink = NullErrorSink;
        DocCommentParser::parse(text, &opts, &mut sink)
    }

    #[test]
    fn strips_leading_star_column() {
        let raw = " Hello.\n * World.\n ";
        assert_eq!(strip_doc_comment(raw), " Hello.\nWorld.\n");
    }

    #[test]
    fn plain_text_becomes_first_sentence() {
        let tree = parse("Frobnicates the given widget.");
        match tree {
            DocTree::DocComment { first_sentence, body, block_tags, .. } => {
                assert_eq!(first_sentence.len(), 1);
                assert!(body.is_empty());
                assert!(block_tags.is_empty());
            }
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn parses_param_and_return_tags() {
        let tree = parse("Summary.\n\n@param x the input\n@return the output");
        match tree {
            DocTree::DocComment { block_tags, .. } => {
                assert_eq!(block_tags.len(), 2);
                match &block_tags[0] {
                    DocTree::Param { is_type_parameter, name, .. } => {
                        assert!(!is_type_parameter);
                        match name.as_ref() {
                            DocTree::Identifier { name, .. } => assert_eq!(name, "x"),
                            _ => panic!("expected identifier"),
                        }
                    }
                    _ => panic!("expected param tree"),
                }
                assert!(matches!(block_tags[1], DocTree::Return { .. }));
            }
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn parses_throws_reference() {
        let tree = parse("Summary.\n@throws java.io.IOException if it fails");
        match tree {
            DocTree::DocComment { block_tags, .. } => match &block_tags[0] {
                DocTree::Throws { reference, .. } => match reference.as_ref() {
                    DocTree::Reference { qualifier, .. } => {
                        assert_eq!(qualifier.as_ref().unwrap().to_string(), "java.io.IOException");
                    }
                    _ => panic!("expected reference"),
                },
                _ => panic!("expected throws tree"),
            },
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn parses_inline_link_and_code() {
        let tree = parse("See {@link java.util.List#add(Object)} or {@code foo()}.");
        match tree {
            DocTree::DocComment { first_sentence, .. } => {
                let has_link = first_sentence.iter().any(|t| matches!(t, DocTree::Link { .. }));
                let has_code = first_sentence.iter().any(|t| matches!(t, DocTree::Code { .. }));
                assert!(has_link);
                assert!(has_code);
            }
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn html_start_and_end_elements_round_trip() {
        let tree = parse("A <b>bold</b> word.");
        match tree {
            DocTree::DocComment { first_sentence, .. } => {
                let has_start = first_sentence
                    .iter()
                    .any(|t| matches!(t, DocTree::StartElement { name, .. } if name == "b"));
                let has_end = first_sentence
                    .iter()
                    .any(|t| matches!(t, DocTree::EndElement { name, .. } if name == "b"));
                assert!(has_start);
                assert!(has_end);
            }
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn entity_reference_is_parsed() {
        let tree = parse("Uses &amp; and &#169;.");
        match tree {
            DocTree::DocComment { first_sentence, .. } => {
                let names: Vec<&str> = first_sentence
                    .iter()
                    .filter_map(|t| match t {
                        DocTree::Entity { name, .. } => Some(name.as_str()),
                        _ => None,
                    })
                    .collect();
                assert_eq!(names, vec!["amp", "#169"]);
            }
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn unterminated_entity_is_erroneous() {
        let mut errs = CollectingErrorSink::default();
        let opts = DocParserOpts::default();
        let tree = DocCommentParser::parse("Bad &amp no semicolon.", &opts, &mut errs);
        match tree {
            DocTree::DocComment { first_sentence, .. } => {
                assert!(first_sentence.iter().any(|t| t.is_erroneous()));
            }
            _ => panic!("expected DocComment"),
        }
        assert!(!errs.0.is_empty());
    }

    #[test]
    fn unknown_block_tag_is_kept() {
        let tree = parse("Summary.\n@weird content here");
        match tree {
            DocTree::DocComment { block_tags, .. } => match &block_tags[0] {
                DocTree::UnknownBlockTag { name, .. } => assert_eq!(name, "weird"),
                _ => panic!("expected unknown block tag"),
            },
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn unknown_inline_tag_is_kept() {
        let tree = parse("See {@foo bar}.");
        match tree {
            DocTree::DocComment { first_sentence, .. } => {
                assert!(first_sentence
                    .iter()
                    .any(|t| matches!(t, DocTree::UnknownInlineTag { name, .. } if name == "foo")));
            }
            _ => panic!("expected DocComment"),
        }
    }

    #[test]
    fn unterminated_quoted_index_term_is_erroneous() {
        let mut errs = CollectingErrorSink::default();
        let opts = DocParserOpts::default();
        let tree = DocCommentParser::parse("See {@index \"unclosed term}.", &opts, &mut errs);
        match tree {
            DocTree::DocComment { first_sentence, .. } => {
                assert!(first_sentence.iter().any(|t| t.is_erroneous()));
            }
            _ => panic!("expected DocComment"),
        }
        assert!(errs.0.iter().any(|d| d.code == doc::UNTERMINATED_STRING));
    }

    #[test]
    fn unterminated_link_signature_is_erroneous() {
        let mut errs = CollectingErrorSink::default();
        let opts = DocParserOpts::default();
        let tree = DocCommentParser::parse("See {@link java.util.List#add(Object}.", &opts, &mut errs);
        match tree {
            DocTree::DocComment { first_sentence, .. } => {
                assert!(first_sentence.iter().any(|t| matches!(t, DocTree::Link { reference, .. } if reference.is_erroneous())));
            }
            _ => panic!("expected DocComment"),
        }
        assert!(errs.0.iter().any(|d| d.code == doc::UNTERMINATED_SIGNATURE));
    }

    #[test]
    fn balanced_braces_in_code_are_literal() {
        let tree = parse("{@code if (x) { y(); } }");
        match tree {
            DocTree::DocComment { first_sentence, .. } => match &first_sentence[0] {
                DocTree::Code { text, .. } => match text.as_ref() {
                    DocTree::Text { text, .. } => assert!(text.contains("y();")),
                    _ => panic!("expected text"),
                },
                _ => panic!("expected code tree"),
            },
            _ => panic!("expected DocComment"),
        }
    }
}
