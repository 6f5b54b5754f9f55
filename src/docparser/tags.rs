// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tag-parser dispatch table: which tag names are recognised,
//! whether each is a block or inline tag, and whether its content
//! model retains whitespace (`{@code}`/`{@literal}`; whitespace
//! handling is per-tag).
//!
//! A lookup keyed on the current tag name rather than a hard-coded
//! if/else chain. The actual per-tag *grammar* lives in
//! [`super::DocCommentParser`] — a `phf::Map` of closures would need
//! each closure to borrow the parser mutably with a distinct content
//! model, which doesn't fit a flat value table any better than a
//! `match`; this table exists for the parts that *are* uniform data
//! (kind, whitespace policy), leaving the per-tag behaviour out of the
//! table entirely.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TagKind {
    Block,
    Inline,
}

#[derive(Clone, Copy, Debug)]
pub struct TagSpec {
    pub kind: TagKind,
    /// `{@code}`/`{@literal}` keep their content verbatim, including
    /// whitespace that would otherwise be collapsed.
    pub retain_whitespace: bool,
}

pub static TAG_TABLE: phf::Map<&'static str, TagSpec> = phf::phf_map! {
    "author" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "deprecated" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "hidden" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "return" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "serial" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "serialData" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "since" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "version" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "param" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "exception" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "throws" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "provides" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "uses" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "see" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "serialField" => TagSpec { kind: TagKind::Block, retain_whitespace: false },
    "code" => TagSpec { kind: TagKind::Inline, retain_whitespace: true },
    "literal" => TagSpec { kind: TagKind::Inline, retain_whitespace: true },
    "docRoot" => TagSpec { kind: TagKind::Inline, retain_whitespace: false },
    "inheritDoc" => TagSpec { kind: TagKind::Inline, retain_whitespace: false },
    "index" => TagSpec { kind: TagKind::Inline, retain_whitespace: false },
    "link" => TagSpec { kind: TagKind::Inline, retain_whitespace: false },
    "linkplain" => TagSpec { kind: TagKind::Inline, retain_whitespace: false },
    "value" => TagSpec { kind: TagKind::Inline, retain_whitespace: false },
};

pub fn lookup(name: &str) -> Option<&'static TagSpec> {
    TAG_TABLE.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_and_literal_retain_whitespace() {
        assert!(lookup("code").unwrap().retain_whitespace);
        assert!(lookup("literal").unwrap().retain_whitespace);
        assert!(!lookup("link").unwrap().retain_whitespace);
    }

    #[test]
    fn unknown_tag_is_absent() {
        assert!(lookup("bogus").is_none());
    }
}
