// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Visitor scaffolding over [`DocTree`].
//!
//! A trait with a default method per node kind, driven by a match on
//! the node, in place of double-dispatch `accept`: a tagged-sum
//! `DocTree` plus a pattern-match driven visitor; shared-behaviour
//! scanners compose by calling a generic `walk(tree, &mut self)` that
//! visits each child list in textual order — [`DocScanner::scan`] is
//! exactly that generic walk, implemented once instead of once per
//! node kind.

use super::DocTree;

/// One `visit_xxx` method per doctree variant: a generic pre-order
/// visitor with one visit-method per `DocTree` variant. Every method
/// defaults to [`DocVisitor::default_action`]; override only the ones
/// a particular visitor cares about.
pub trait DocVisitor<R, Env> {
    fn default_action(&mut self, node: &DocTree, env: &mut Env) -> R;

    /// Dispatches to the variant-specific method for `node`.
    fn visit(&mut self, node: &DocTree, env: &mut Env) -> R {
        match node {
            DocTree::Text { .. } => self.visit_text(node, env),
            DocTree::Entity { .. } => self.visit_entity(node, env),
            DocTree::Comment { .. } => self.visit_comment(node, env),
            DocTree::StartElement { .. } => self.visit_start_element(node, env),
            DocTree::EndElement { .. } => self.visit_end_element(node, env),
            DocTree::Attribute { .. } => self.visit_attribute(node, env),
            DocTree::Identifier { .. } => self.visit_identifier(node, env),
            DocTree::Reference { .. } => self.visit_reference(node, env),
            DocTree::DocRoot { .. } => self.visit_doc_root(node, env),
            DocTree::InheritDoc { .. } => self.visit_inherit_doc(node, env),
            DocTree::Link { .. } => self.visit_link(node, env),
            DocTree::LinkPlain { .. } => self.visit_link_plain(node, env),
            DocTree::Literal { .. } => self.visit_literal(node, env),
            DocTree::Code { .. } => self.visit_code(node, env),
            DocTree::Value { .. } => self.visit_value(node, env),
            DocTree::Index { .. } => self.visit_index(node, env),
            DocTree::Param { .. } => self.visit_param(node, env),
            DocTree::Return { .. } => self.visit_return(node, env),
            DocTree::Deprecated { .. } => self.visit_deprecated(node, env),
            DocTree::Since { .. } => self.visit_since(node, env),
            DocTree::Version { .. } => self.visit_version(node, env),
            DocTree::Author { .. } => self.visit_author(node, env),
            DocTree::Hidden { .. } => self.visit_hidden(node, env),
            DocTree::Serial { .. } => self.visit_serial(node, env),
            DocTree::SerialData { .. } => self.visit_serial_data(node, env),
            DocTree::See { .. } => self.visit_see(node, env),
            DocTree::Throws { .. } => self.visit_throws(node, env),
            DocTree::Exception { .. } => self.visit_exception(node, env),
            DocTree::SerialField { .. } => self.visit_serial_field(node, env),
            DocTree::Provides { .. } => self.visit_provides(node, env),
            DocTree::Uses { .. } => self.visit_uses(node, env),
            DocTree::UnknownBlockTag { .. } => self.visit_unknown_block_tag(node, env),
            DocTree::UnknownInlineTag { .. } => self.visit_unknown_inline_tag(node, env),
            DocTree::Erroneous { .. } => self.visit_erroneous(node, env),
            DocTree::DocComment { .. } => self.visit_doc_comment(node, env),
        }
    }

    /// Visit every element of `nodes` in order, returning the last
    /// result.
    fn visit_all(&mut self, nodes: &[DocTree], env: &mut Env) -> Option<R> {
        let mut last = None;
        for node in nodes {
            last = Some(self.visit(node, env));
        }
        last
    }

    fn visit_text(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_entity(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_comment(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_start_element(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_end_element(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_attribute(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_identifier(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_reference(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_doc_root(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_inherit_doc(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_link(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_link_plain(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_literal(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_code(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_value(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_index(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_param(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_return(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_deprecated(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_since(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_version(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_author(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_hidden(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_serial(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_serial_data(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_see(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_throws(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_exception(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_serial_field(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_provides(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_uses(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_unknown_block_tag(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_unknown_inline_tag(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_erroneous(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
    fn visit_doc_comment(&mut self, node: &DocTree, env: &mut Env) -> R {
        self.default_action(node, env)
    }
}

/// Every direct `DocTree` child of `node`, in textual (left-to-right)
/// order.
pub fn children(node: &DocTree) -> Vec<&DocTree> {
    use DocTree::*;
    match node {
        Text { .. } | Entity { .. } | Comment { .. } | EndElement { .. } | Identifier { .. }
        | Reference { .. } | DocRoot { .. } | InheritDoc { .. } | UnknownBlockTag { .. }
        | UnknownInlineTag { .. } | Erroneous { .. } => Vec::new(),
        StartElement { attrs, .. } => attrs.iter().collect(),
        Attribute { value, .. } => value.iter().collect(),
        Link { reference, label, .. } | LinkPlain { reference, label, .. } => {
            let mut v = vec![reference.as_ref()];
            v.extend(label.iter());
            v
        }
        Literal { text, .. } | Code { text, .. } => vec![text.as_ref()],
        Value { reference, .. } => vec![reference.as_ref()],
        Index { term, description, .. } => {
            let mut v = vec![term.as_ref()];
            v.extend(description.iter());
            v
        }
        Param { name, description, .. } => {
            let mut v = vec![name.as_ref()];
            v.extend(description.iter());
            v
        }
        Return { description }
        | Deprecated { description, .. }
        | Since { description, .. }
        | Version { description, .. }
        | Author { description, .. }
        | Hidden { description, .. }
        | Serial { description, .. }
        | SerialData { description, .. }
        | See { description, .. } => description.iter().collect(),
        Throws { reference, description, .. }
        | Exception { reference, description, .. }
        | Provides { reference, description, .. }
        | Uses { reference, description, .. } => {
            let mut v = vec![reference.as_ref()];
            v.extend(description.iter());
            v
        }
        SerialField { name, field_type, description, .. } => {
            vec![name.as_ref(), field_type.as_ref()]
                .into_iter()
                .chain(description.iter())
                .collect()
        }
        UnknownBlockTag { content, .. } | UnknownInlineTag { content, .. } => content.iter().collect(),
        DocComment { first_sentence, body, block_tags, .. } => first_sentence
            .iter()
            .chain(body.iter())
            .chain(block_tags.iter())
            .collect(),
    }
}

/// Recursive pre-order scanner: visits a node, then folds over every
/// child subtree via [`children`], combining results with
/// [`DocScanner::reduce`]. The generic `scan` method below is one
/// `walk(tree, &mut self)`, replacing a hand-written override of all
/// thirty-odd `visit_xxx` methods per scanner.
pub trait DocScanner<R, Env>: DocVisitor<R, Env> {
    /// Combine this node's result with the folded result of its
    /// children so far. Default keeps only the node's own result.
    fn reduce(&mut self, r1: R, r2: R) -> R {
        let _ = r2;
        r1
    }

    fn scan(&mut self, node: &DocTree, env: &mut Env) -> R {
        let here = self.visit(node, env);
        children(node)
            .into_iter()
            .fold(here, |acc, child| {
                let child_result = self.scan(child, env);
                self.reduce(acc, child_result)
            })
    }

    fn scan_all(&mut self, nodes: &[DocTree], env: &mut Env) -> Option<R> {
        let mut acc: Option<R> = None;
        for node in nodes {
            let r = self.scan(node, env);
            acc = Some(match acc {
                Some(prev) => self.reduce(prev, r),
                None => r,
            });
        }
        acc
    }
}

const SENTENCE_BREAKER_TAGS: [&str; 8] = ["h1", "h2", "h3", "h4", "h5", "h6", "pre", "p"];

fn is_sentence_breaker(name: &str) -> bool {
    SENTENCE_BREAKER_TAGS.contains(&name.to_ascii_lowercase().as_str())
}

/// Char offset, within `text`, of the whitespace character immediately
/// following the first `.` that is followed by whitespace — the
/// default dot-space break. `None` if no such break exists in `text`.
/// Counted in `char`s, not bytes: every position elsewhere in this
/// crate (`Span`, `UnicodeReader::bp`) is a char index, and `text` may
/// contain multi-byte characters before the break point.
fn find_dot_space_break(text: &str) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if c == '.' {
            if let Some(&next) = chars.get(i + 1) {
                if matches!(next, ' ' | '\t' | '\n' | '\r' | '\u{000C}') {
                    return Some(i + 1);
                }
            }
        }
    }
    None
}

/// Split `body` into `(first_sentence, rest)`. No locale-aware break
/// iterator is wired up: a break is recognised only when it lies
/// strictly inside the current text run; this crate has no i18n
/// collaborator, so the default dot-space/sentence-breaker-tag/
/// end-of-input rule is always the one applied — see `DESIGN.md`.
pub fn first_sentence(body: &[DocTree]) -> (Vec<DocTree>, Vec<DocTree>) {
    for (i, node) in body.iter().enumerate() {
        match node {
            DocTree::Text { span, text } => {
                if let Some(break_at) = find_dot_space_break(text) {
                    let chars: Vec<char> = text.chars().collect();
                    let first_part: String = chars[..break_at].iter().collect::<String>().trim_end().to_string();
                    let rest_part: String = chars[break_at..].iter().collect();

                    let mut first: Vec<DocTree> = body[..i].to_vec();
                    if !first_part.is_empty() {
                        let end = span.start + first_part.chars().count() as u32;
                        first.push(DocTree::Text {
                            span: super::Span::new(span.start, end),
                            text: first_part,
                        });
                    }

                    let mut rest: Vec<DocTree> = Vec::new();
                    if !rest_part.is_empty() {
                        rest.push(DocTree::Text {
                            span: super::Span::new(span.start + break_at as u32, span.end),
                            text: rest_part,
                        });
                    }
                    rest.extend(body[i + 1..].iter().cloned());
                    return (first, rest);
                }
            }
            DocTree::StartElement { name, .. } | DocTree::EndElement { name, .. }
                if i > 0 && is_sentence_breaker(name) =>
            {
                return (body[..i].to_vec(), body[i..].to_vec());
            }
            _ => {}
        }
    }
    (body.to_vec(), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doctree::Span;

    fn text(start: u32, s: &str) -> DocTree {
        DocTree::Text {
            span: Span::new(start, start + s.len() as u32),
            text: s.to_string(),
        }
    }

    #[test]
    fn splits_at_dot_space() {
        let body = vec![text(0, "Brief. More.")];
        let (first, rest) = first_sentence(&body);
        assert_eq!(first.len(), 1);
        match &first[0] {
            DocTree::Text { text, .. } => assert_eq!(text, "Brief."),
            _ => panic!("expected text"),
        }
        assert_eq!(rest.len(), 1);
        match &rest[0] {
            DocTree::Text { text, .. } => assert_eq!(text, " More."),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn splits_at_dot_space_with_multi_byte_text() {
        // "café" is 4 chars but 5 bytes; the break must land after the
        // following period without panicking on a non-boundary byte index.
        let body = vec![text(0, "café is nice. More.")];
        let (first, rest) = first_sentence(&body);
        match &first[0] {
            DocTree::Text { text, span } => {
                assert_eq!(text, "café is nice.");
                assert_eq!(span.end, span.start + "café is nice.".chars().count() as u32);
            }
            _ => panic!("expected text"),
        }
        match &rest[0] {
            DocTree::Text { text, .. } => assert_eq!(text, " More."),
            _ => panic!("expected text"),
        }
    }

    #[test]
    fn no_break_keeps_everything_in_first_sentence() {
        let body = vec![text(0, "No terminator here")];
        let (first, rest) = first_sentence(&body);
        assert_eq!(first.len(), 1);
        assert!(rest.is_empty());
    }

    #[test]
    fn breaks_before_sentence_breaking_tag() {
        let body = vec![
            text(0, "Intro"),
            DocTree::StartElement {
                span: Span::new(5, 9),
                name: "p".to_string(),
                attrs: Vec::new(),
                self_closing: false,
            },
            text(9, "More"),
        ];
        let (first, rest) = first_sentence(&body);
        assert_eq!(first.len(), 1);
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn scanner_counts_nodes_via_generic_walk() {
        struct Counter;
        impl DocVisitor<u32, ()> for Counter {
            fn default_action(&mut self, _node: &DocTree, _env: &mut ()) -> u32 {
                1
            }
        }
        impl DocScanner<u32, ()> for Counter {
            fn reduce(&mut self, r1: u32, r2: u32) -> u32 {
                r1 + r2
            }
        }

        let doc = DocTree::DocComment {
            span: Span::new(0, 10),
            first_sentence: vec![text(0, "Brief.")],
            body: Vec::new(),
            block_tags: vec![DocTree::Return {
                span: Span::new(7, 10),
                description: vec![text(7, "x")],
            }],
        };
        let mut counter = Counter;
        let total = counter.scan(&doc, &mut ());
        // doc_comment + text + return + text == 4
        assert_eq!(total, 4);
    }
}
