// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parse a single `/** ... */` comment (delimiters included) from
//! standard input and print its doctree: parse, then print a derived
//! form of it, via `{:#?}` rather than re-serializing, since there is
//! no Javadoc pretty-printer in scope.

use std::io::{self, Read};

use javafront::diagnostics::LoggingErrorSink;
use javafront::docparser::{strip_doc_comment, DocCommentParser, DocParserOpts};

fn main() {
    let mut raw = String::new();
    io::stdin()
        .read_to_string(&mut raw)
        .expect("reading stdin failed");

    let inner = raw
        .trim()
        .strip_prefix("/**")
        .and_then(|s| s.strip_suffix("*/"))
        .unwrap_or(&raw);

    let stripped = strip_doc_comment(inner);
    let opts = DocParserOpts::default();
    let mut sink = LoggingErrorSink;
    let tree = DocCommentParser::parse(&stripped, &opts, &mut sink);
    println!("{tree:#?}");
}
