// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Explicit per-job service bundle.
//!
//! Bundles the collaborators one parse job needs into a plain struct
//! owning each by value, constructed once at the start of the job.
//! A `Context` is tied to one logical compilation/parse job and is
//! used by one thread at a time; there is no dynamic lookup at
//! runtime — every collaborator is a named field.

use crate::diagnostics::{CollectingErrorSink, NullErrorSink};
use crate::docparser::DocParserOpts;
use crate::names::Names;
use crate::tokenizer::JavaTokenizerOpts;

/// Owns the collaborators one parse job needs: the name table, and the
/// two components' options structs. An external caller's `Lexer`/
/// `DocCommentParser` instances borrow `names` (and, for the
/// tokenizer, the caller's own `ErrorSink`) from a `Context` for the
/// duration of the job; the `Context` itself holds no tokenizer or
/// parser instance, since those are per-compilation-unit while a
/// `Context` may in principle span several (left to the caller).
pub struct Context {
    pub names: Names,
    pub tokenizer_opts: JavaTokenizerOpts,
    pub doc_parser_opts: DocParserOpts,
}

impl Context {
    pub fn new() -> Context {
        Context {
            names: Names::new(),
            tokenizer_opts: JavaTokenizerOpts::default(),
            doc_parser_opts: DocParserOpts::default(),
        }
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

/// Convenience bundle for callers who want the core's default sinks
/// (log-everything during development, or collect-everything for
/// tests) instead of writing their own `ErrorSink`.
pub fn null_sink() -> NullErrorSink {
    NullErrorSink
}

pub fn collecting_sink() -> CollectingErrorSink {
    CollectingErrorSink::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_constructs_empty_name_table() {
        let ctx = Context::new();
        assert!(ctx.names.is_empty());
    }
}
