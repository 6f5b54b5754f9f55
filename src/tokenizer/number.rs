// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pure helpers for numeric-literal scanning, kept free of
//! reader/scratch state so they can be unit tested without a whole
//! tokenizer.

use crate::token::Radix;

/// Is `c` a legal digit in `radix`? Octal deliberately accepts decimal
/// digits too, so a run starting `0` can still turn out to be a
/// fractional/exponent literal once `.`/`e` is seen (`finish_number`
/// promotes the radix to `Decimal` when that happens). A digit run that
/// stays octal and contains `8`/`9` is not otherwise rejected; an
/// integer literal such as `018` is accepted as Octal with that literal
/// (non-decoding) digit text.
pub fn is_digit(c: char, radix: Radix) -> bool {
    match radix {
        Radix::Binary => c == '0' || c == '1',
        Radix::Octal => c.is_ascii_digit(),
        Radix::Decimal => c.is_ascii_digit(),
        Radix::Hex => c.is_ascii_hexdigit(),
    }
}

pub fn is_octal_digit(c: char) -> bool {
    ('0'..='7').contains(&c)
}

pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}
