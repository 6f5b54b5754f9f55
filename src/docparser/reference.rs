// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reference/parameter sub-parser.
//!
//! A reference signature (`pkg.Cls#member(int,String...)`) is first
//! split into `qualifier#member(params)` by plain text scanning, then
//! the qualifier and each parameter type are parsed as Java type
//! expressions by tokenising the detached text through
//! [`crate::tokenizer::JavaTokenizer`] — a small embedded instance of
//! the main tokenizer, generalised here to a tiny recursive-descent
//! walk over that token stream rather than the full expression
//! grammar, since only type syntax is needed.

use crate::diagnostics::NullErrorSink;
use crate::doctree::TypeExpr;
use crate::names::Names;
use crate::tokenizer::{JavaTokenizer, JavaTokenizerOpts};
use crate::token::{Token, TokenKind};

/// The three fields of a parsed reference, handed back to the doc
/// parser to build a `DocTree::Reference`: `qualifier`, `member_name`,
/// `param_types`.
pub struct RefParts {
    pub qualifier: Option<TypeExpr>,
    pub member_name: Option<String>,
    pub param_types: Option<Vec<TypeExpr>>,
}

/// Parse `signature` (already captured by the caller's balanced-paren
/// scan) into its qualifier/member/params.
///
/// `allow_member` mirrors the tag dispatch table (`@throws`/`@exception`
/// pass `false`: the signature names a type, never `Type#member`;
/// `@link`/`@see`/`@provides`/`@uses`/`@value` pass `true`).
///
/// ## Open-question resolution: when is `qualifier == null`?
///
/// javac's own invariant text reads as self-contradictory taken
/// literally ("qualifier == null iff the signature begins with `#` or
/// contains no `#`-prefixed member" would make a bare `Foo` reference's
/// qualifier null, which is not how `{@link Foo}` behaves). This
/// parser implements the behavior actually exercised by `{@link}`/
/// `{@see}` in practice and pinned by `tests/doc_parser.rs`: qualifier
/// is `None` exactly when the signature begins with `#` (i.e. the
/// qualifier-text before `#` is empty); a signature with no `#` at all
/// is a qualifier-only (type or field) reference with `member_name =
/// None`. See `DESIGN.md`.
pub fn parse_reference(signature: &str, allow_member: bool) -> Result<RefParts, &'static str> {
    let text = signature.trim();
    if text.is_empty() {
        return Err("dc.ref.syntax.error");
    }

    if !allow_member {
        if text.contains('#') {
            return Err("dc.ref.syntax.error");
        }
        let qualifier = parse_type_text(text)?;
        return Ok(RefParts {
            qualifier: Some(qualifier),
            member_name: None,
            param_types: None,
        });
    }

    match text.find('#') {
        None => {
            if text.contains('(') {
                return Err("dc.ref.syntax.error");
            }
            let qualifier = parse_type_text(text)?;
            Ok(RefParts {
                qualifier: Some(qualifier),
                member_name: None,
                param_types: None,
            })
        }
        Some(hash_idx) => {
            let qualifier_text = text[..hash_idx].trim();
            let member_part = text[hash_idx + 1..].trim();

            let qualifier = if qualifier_text.is_empty() {
                None
            } else {
                Some(parse_type_text(qualifier_text)?)
            };

            let (member_name, param_types) = match member_part.find('(') {
                None => {
                    if member_part.is_empty() {
                        return Err("dc.ref.syntax.error");
                    }
                    (member_part.to_string(), None)
                }
                Some(paren_idx) => {
                    let name = member_part[..paren_idx].trim();
                    if name.is_empty() {
                        return Err("dc.ref.syntax.error");
                    }
                    let after_paren = &member_part[paren_idx + 1..];
                    let close = find_matching_close(after_paren).ok_or("dc.ref.bad.parens")?;
                    if after_paren[close + 1..].trim_start().len() > 0 {
                        return Err("dc.ref.bad.parens");
                    }
                    let interior = after_paren[..close].trim();
                    let params = if interior.is_empty() {
                        Vec::new()
                    } else {
                        parse_param_list(interior)?
                    };
                    (name.to_string(), Some(params))
                }
            };

            Ok(RefParts {
                qualifier,
                member_name: Some(member_name),
                param_types,
            })
        }
    }
}

/// Index, within `after_paren`, of the `)` that closes the `(` the
/// caller already consumed. `None` if unbalanced.
fn find_matching_close(after_paren: &str) -> Option<usize> {
    let mut depth = 0i32;
    for (i, c) in after_paren.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// Split `interior` on top-level commas (depth-aware over `<>`/`[]`)
/// and parse each piece as a type expression, folding a trailing `...`
/// on the last piece into one extra array dimension.
fn parse_param_list(interior: &str) -> Result<Vec<TypeExpr>, &'static str> {
    let pieces = split_top_level_commas(interior);
    let last = pieces.len().saturating_sub(1);
    let mut out = Vec::with_capacity(pieces.len());
    for (i, piece) in pieces.iter().enumerate() {
        let piece = piece.trim();
        if piece.is_empty() {
            return Err("dc.ref.unexpected.input");
        }
        if i == last && piece.ends_with("...") {
            let mut t = parse_type_text(piece[..piece.len() - 3].trim_end())?;
            t.array_dims += 1;
            out.push(t);
        } else {
            out.push(parse_type_text(piece)?);
        }
    }
    Ok(out)
}

fn split_top_level_commas(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                out.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(&s[start..]);
    out
}

/// Tokenise `text` through a detached [`JavaTokenizer`] and parse a
/// single type expression from the resulting tokens.
fn parse_type_text(text: &str) -> Result<TypeExpr, &'static str> {
    let mut names = Names::new();
    let mut sink = NullErrorSink;
    let mut tokens = Vec::new();
    {
        let mut tz = JavaTokenizer::new(text, &mut names, &mut sink, JavaTokenizerOpts::default());
        loop {
            let t = tz.read_token();
            if t.kind == TokenKind::Eof {
                break;
            }
            tokens.push(t);
        }
    }
    if tokens.is_empty() {
        return Err("dc.ref.unexpected.input");
    }
    let mut p = TypeParser {
        tokens,
        pos: 0,
        names: &names,
    };
    let ty = p.parse_type()?;
    if p.pos != p.tokens.len() {
        return Err("dc.ref.unexpected.input");
    }
    Ok(ty)
}

struct TypeParser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    names: &'a Names,
}

impl<'a> TypeParser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&Token> {
        let t = self.tokens.get(self.pos);
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_type(&mut self) -> Result<TypeExpr, &'static str> {
        let name = self.parse_qualified_name()?;
        let mut type_args = Vec::new();
        if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Lt)) {
            type_args = self.parse_type_args()?;
        }
        let mut array_dims = 0u32;
        loop {
            if matches!(self.peek().map(|t| t.kind), Some(TokenKind::LBracket)) {
                self.bump();
                match self.bump().map(|t| t.kind) {
                    Some(TokenKind::RBracket) => array_dims += 1,
                    _ => return Err("dc.ref.unexpected.input"),
                }
            } else if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Ellipsis)) {
                self.bump();
                array_dims += 1;
                break;
            } else {
                break;
            }
        }
        Ok(TypeExpr {
            name,
            type_args,
            array_dims,
        })
    }

    fn parse_qualified_name(&mut self) -> Result<String, &'static str> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(t) if t.kind.tag() == crate::token::Tag::Named => {
                    let spelling = match t.name() {
                        Some(n) => self.names.as_str(n).to_string(),
                        None => t.kind.spelling().unwrap_or_default().to_string(),
                    };
                    out.push_str(&spelling);
                }
                _ => return Err("dc.ref.syntax.error"),
            }
            if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Dot)) {
                self.bump();
                out.push('.');
                continue;
            }
            break;
        }
        Ok(out)
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeExpr>, &'static str> {
        self.bump(); // '<'
        let mut args = Vec::new();
        if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Gt)) {
            self.bump();
            return Ok(args);
        }
        loop {
            if matches!(self.peek().map(|t| t.kind), Some(TokenKind::Question)) {
                self.bump();
                args.push(TypeExpr::simple("?"));
            } else {
                args.push(self.parse_type()?);
            }
            match self.peek().map(|t| t.kind) {
                Some(TokenKind::Comma) => {
                    self.bump();
                    continue;
                }
                Some(TokenKind::Gt) => {
                    self.bump();
                    break;
                }
                _ => return Err("dc.gt.expected"),
            }
        }
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_qualifier_no_member() {
        let r = parse_reference("java.util.List", true).unwrap();
        assert_eq!(r.qualifier.unwrap().to_string(), "java.util.List");
        assert!(r.member_name.is_none());
    }

    #[test]
    fn member_in_current_class() {
        let r = parse_reference("#foo", true).unwrap();
        assert!(r.qualifier.is_none());
        assert_eq!(r.member_name.unwrap(), "foo");
    }

    #[test]
    fn qualifier_and_method_with_params() {
        let r = parse_reference("java.util.List#add(Object)", true).unwrap();
        assert_eq!(r.qualifier.unwrap().to_string(), "java.util.List");
        assert_eq!(r.member_name.unwrap(), "add");
        let params = r.param_types.unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].to_string(), "Object");
    }

    #[test]
    fn no_arg_method() {
        let r = parse_reference("#close()", true).unwrap();
        assert_eq!(r.param_types.unwrap().len(), 0);
    }

    #[test]
    fn varargs_param_normalised_to_array() {
        let r = parse_reference("#format(String,Object...)", true).unwrap();
        let params = r.param_types.unwrap();
        assert_eq!(params[1].array_dims, 1);
        assert_eq!(params[1].name, "Object");
    }

    #[test]
    fn array_param() {
        let r = parse_reference("#sort(int[])", true).unwrap();
        let params = r.param_types.unwrap();
        assert_eq!(params[0].array_dims, 1);
    }

    #[test]
    fn generic_qualifier() {
        let r = parse_reference("java.util.List<String>", true).unwrap();
        let q = r.qualifier.unwrap();
        assert_eq!(q.type_args.len(), 1);
        assert_eq!(q.type_args[0].name, "String");
    }

    #[test]
    fn trailing_text_after_parens_is_bad_parens() {
        let err = parse_reference("#foo(int) extra", true).unwrap_err();
        assert_eq!(err, "dc.ref.bad.parens");
    }

    #[test]
    fn exception_type_disallows_member() {
        let r = parse_reference("java.io.IOException", false).unwrap();
        assert_eq!(r.qualifier.unwrap().to_string(), "java.io.IOException");
        assert!(r.member_name.is_none());
    }
}
