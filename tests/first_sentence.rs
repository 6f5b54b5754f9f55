// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! First-sentence splitting laws, exercised through the public parser
//! entry point rather than the internal `visitor::first_sentence`
//! helper directly.

use javafront::diagnostics::NullErrorSink;
use javafront::docparser::{DocCommentParser, DocParserOpts};
use javafront::doctree::DocTree;

fn split(src: &str) -> (String, String) {
    let opts = DocParserOpts::default();
    let mut sink = NullErrorSink;
    let tree = DocCommentParser::parse(src, &opts, &mut sink);
    match tree {
        DocTree::DocComment { first_sentence, body, .. } => {
            (render(&first_sentence), render(&body))
        }
        _ => panic!("expected DocComment"),
    }
}

fn render(nodes: &[DocTree]) -> String {
    let mut out = String::new();
    for n in nodes {
        if let DocTree::Text { text, .. } = n {
            out.push_str(text);
        }
    }
    out
}

#[test]
fn dot_space_breaks_the_sentence() {
    let (first, rest) = split("Brief summary. More detail follows.");
    assert_eq!(first, "Brief summary.");
    assert_eq!(rest, " More detail follows.");
}

#[test]
fn no_break_keeps_whole_body_as_first_sentence() {
    let (first, rest) = split("Just one sentence with no terminator");
    assert_eq!(first, "Just one sentence with no terminator");
    assert!(rest.is_empty());
}

#[test]
fn trailing_whitespace_trimmed_from_first_sentence() {
    let (first, _) = split("Leading.   \nSecond line.");
    assert_eq!(first, "Leading.");
}

/// "`firstSentence(body) ++ restOfBody(body)` ... preserves every
/// non-whitespace character of `body`".
#[test]
fn concatenation_preserves_non_whitespace_characters() {
    let src = "One. Two. Three.";
    let (first, rest) = split(src);
    let reassembled: String = format!("{first}{rest}");
    let strip_ws = |s: &str| s.chars().filter(|c| !c.is_whitespace()).collect::<String>();
    assert_eq!(strip_ws(&reassembled), strip_ws(src));
}

/// A sentence-breaking HTML tag ends the first sentence even without a
/// dot-space break.
#[test]
fn paragraph_tag_breaks_the_sentence() {
    let (first, rest) = split("Intro text<p>Next paragraph.");
    assert_eq!(first, "Intro text");
    assert_eq!(rest, "Next paragraph.");
}

/// A sentence-breaking tag only counts anywhere except at position 0.
#[test]
fn sentence_breaking_tag_at_position_zero_does_not_split() {
    let (first, rest) = split("<p>Only paragraph.");
    assert_eq!(first, "Only paragraph.");
    assert!(rest.is_empty());
}
