// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Read Java source from standard input and print every token on its
//! own line. A plain pull loop, suitable for profiling tools, since
//! the Java tokenizer is pull-based.

use std::io::{self, Read};

use javafront::diagnostics::LoggingErrorSink;
use javafront::names::Names;
use javafront::token::TokenKind;
use javafront::tokenizer::{JavaTokenizer, JavaTokenizerOpts};

fn main() {
    let mut src = String::new();
    io::stdin()
        .read_to_string(&mut src)
        .expect("reading stdin failed");

    let mut names = Names::new();
    let mut sink = LoggingErrorSink;
    let mut tz = JavaTokenizer::new(&src, &mut names, &mut sink, JavaTokenizerOpts::default());

    loop {
        let tok = tz.read_token();
        let is_eof = tok.kind == TokenKind::Eof;
        match tok.name() {
            Some(name) => println!("{:?} {:?} [{}, {})", tok.kind, names.as_str(name), tok.start, tok.end),
            None => println!("{:?} [{}, {})", tok.kind, tok.start, tok.end),
        }
        if is_eof {
            break;
        }
    }
}
