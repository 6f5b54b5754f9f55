// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Caller-contract violations.
//!
//! Everything lexical or doc-comment-shaped recovers locally (see
//! [`crate::diagnostics`]); the only errors this crate raises to its
//! caller are misuse of the API surface itself.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContractError>;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("lookahead index {requested} exceeds the buffered token window (have {available})")]
    LookaheadOutOfRange { requested: usize, available: usize },

    #[error("split() called on a token that is not a splittable multi-character operator")]
    NotSplittable,
}
