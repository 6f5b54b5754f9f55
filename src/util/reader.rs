// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A positioned character cursor over Java source, transparently
//! resolving `\uXXXX` escapes.
//!
//! This cursor decodes eagerly into a `Vec<char>` rather than
//! streaming buffers: Unicode-escape resolution needs unbounded
//! lookahead/rewind within a single logical position, which a
//! queue-of-buffers design does not support as directly. A `char`
//! already represents a full Unicode scalar value, so supplementary
//! code points never appear as a surrogate pair in `buf`; see
//! [`UnicodeReader::peek_surrogates`].

use crate::names::{Name, Names};

/// Sentinel appended past the logical end of every buffer so code paths
/// can probe one character past the end without a bounds check.
pub const EOI: char = '\u{1A}';

pub struct UnicodeReader {
    buf: Vec<char>,
    /// Index of `ch` within `buf`.
    bp: usize,
    /// Current (already-decoded) logical character.
    ch: char,
    /// Position at which a `\uXXXX` escape was last expanded, so a
    /// rescan of the same position never double-expands it.
    unicode_conversion_bp: isize,
}

impl UnicodeReader {
    pub fn new(src: &str) -> UnicodeReader {
        let mut buf: Vec<char> = src.chars().collect();
        buf.push(EOI);
        let ch = buf[0];
        let mut reader = UnicodeReader {
            buf,
            bp: 0,
            ch,
            unicode_conversion_bp: -1,
        };
        if reader.ch == '\\' {
            reader.convert_unicode();
        }
        reader
    }

    /// The character the cursor currently sits on.
    pub fn ch(&self) -> char {
        self.ch
    }

    /// Offset of `ch` in the logical (post-escape-decoding count of
    /// positions visited) source; for diagnostics this is close enough
    /// to a raw offset that downstream line-mapping remains useful,
    /// and it is exactly the offset the tokenizer uses for token spans.
    pub fn bp(&self) -> u32 {
        self.bp as u32
    }

    /// Number of characters in the buffer, sentinel included.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    fn convert_unicode(&mut self) {
        if self.bp as isize == self.unicode_conversion_bp {
            // Already expanded here; a literal backslash survives.
            return;
        }
        let mut lookahead = self.bp + 1;
        while lookahead < self.buf.len() && self.buf[lookahead] == 'u' {
            lookahead += 1;
        }
        if lookahead == self.bp + 1 {
            return; // no `u` following: not an escape.
        }
        if lookahead + 4 > self.buf.len() {
            return; // incomplete: leave ch == '\\', cursor unchanged.
        }
        let mut value: u32 = 0;
        for &digit in &self.buf[lookahead..lookahead + 4] {
            match digit.to_digit(16) {
                Some(d) => value = value * 16 + d,
                None => return, // illegal hex digit: leave ch == '\\', cursor unchanged.
            }
        }
        self.bp = lookahead + 3;
        self.ch = char::from_u32(value).unwrap_or('\u{FFFD}');
        self.unicode_conversion_bp = self.bp as isize;
    }

    /// Advance one logical character, resolving a pending `\uXXXX`
    /// escape into a single character.
    pub fn scan_char(&mut self) {
        if self.bp + 1 >= self.buf.len() {
            self.bp = self.buf.len() - 1;
            self.ch = EOI;
            return;
        }
        self.bp += 1;
        self.ch = self.buf[self.bp];
        if self.ch == '\\' {
            self.convert_unicode();
        }
    }

    /// Like [`UnicodeReader::scan_char`], but a literal `\` never kicks
    /// off escape processing.
    pub fn scan_comment_char(&mut self) {
        if self.bp + 1 >= self.buf.len() {
            self.bp = self.buf.len() - 1;
            self.ch = EOI;
            return;
        }
        self.bp += 1;
        self.ch = self.buf[self.bp];
    }

    /// The next character without consuming it.
    pub fn peek_char(&self) -> char {
        self.buf.get(self.bp + 1).copied().unwrap_or(EOI)
    }

    /// The code point formed by the next two characters if they are a
    /// high/low surrogate pair, without consuming them. A `char`
    /// already denotes a full Unicode scalar value in this
    /// implementation, so a lone surrogate can never occur in `buf`;
    /// this simply reports `peek_char` and exists so callers written
    /// against the UTF-16-oriented original contract keep working
    /// unchanged.
    pub fn peek_surrogates(&self) -> char {
        self.peek_char()
    }

    pub fn is_eoi(&self) -> bool {
        self.ch == EOI && self.bp + 1 == self.buf.len()
    }
}

/// Scratch buffer for accumulating decoded literal text (identifiers,
/// string/char contents, numeric lexemes) across repeated `put_char`
/// calls, reset at the start of every token.
#[derive(Default)]
pub struct Scratch {
    sbuf: String,
}

impl Scratch {
    pub fn new() -> Scratch {
        Scratch::default()
    }

    pub fn clear(&mut self) {
        self.sbuf.clear();
    }

    pub fn put_char(&mut self, c: char) {
        self.sbuf.push(c);
    }

    /// Intern the scratch contents as a `Name`.
    pub fn name(&self, names: &mut Names) -> Name {
        names.intern(&self.sbuf)
    }

    /// Snapshot the scratch contents as an owned string.
    pub fn chars(&self) -> String {
        self.sbuf.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.sbuf
    }

    pub fn len(&self) -> usize {
        self.sbuf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sbuf.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_plain_ascii() {
        let mut r = UnicodeReader::new("ab");
        assert_eq!(r.ch(), 'a');
        r.scan_char();
        assert_eq!(r.ch(), 'b');
        r.scan_char();
        assert_eq!(r.ch(), EOI);
    }

    #[test]
    fn expands_unicode_escape_once() {
        // "a" is 'a'.
        let mut r = UnicodeReader::new("\\u0061b");
        assert_eq!(r.ch(), 'a');
        r.scan_char();
        assert_eq!(r.ch(), 'b');
    }

    #[test]
    fn expands_multiple_u_prefix() {
        let mut r = UnicodeReader::new("\\uu0061");
        assert_eq!(r.ch(), 'a');
    }

    #[test]
    fn leaves_incomplete_escape_as_backslash() {
        let mut r = UnicodeReader::new("\\u00");
        assert_eq!(r.ch(), '\\');
    }

    #[test]
    fn leaves_illegal_hex_as_backslash() {
        let mut r = UnicodeReader::new("\\u00zz");
        assert_eq!(r.ch(), '\\');
    }

    #[test]
    fn scratch_round_trips() {
        let mut names = Names::new();
        let mut s = Scratch::new();
        s.put_char('h');
        s.put_char('i');
        assert_eq!(s.chars(), "hi");
        let n = s.name(&mut names);
        assert_eq!(names.as_str(n), "hi");
    }
}
