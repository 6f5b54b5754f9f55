// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The doctree data model: the closed tagged sum a doc comment parses
//! into, plus the factory that mediates construction.
//!
//! One enum per closed vocabulary of node kinds, no `Rc<RefCell<_>>`
//! sharing: a doc-comment tree is an owned DAG handed out once, not a
//! live, mutable DOM.

pub mod visitor;

use std::fmt;

/// Half-open character span, relative to the start of the doc
/// comment's own text (not the enclosing source file). Every variant
/// carries one, used to re-situate diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Span {
        Span { start, end }
    }
}

/// A parsed Java type expression, as it appears inside a reference
/// signature (`pkg.Cls<T>[]`): a dotted name, zero or more type
/// arguments, and an array rank. `...` on the last formal parameter of
/// a signature is folded into `array_dims` rather than kept as its own
/// flag: `...` is normalised to `[]` for the last parameter.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TypeExpr {
    pub name: String,
    pub type_args: Vec<TypeExpr>,
    pub array_dims: u32,
}

impl TypeExpr {
    pub fn simple(name: impl Into<String>) -> TypeExpr {
        TypeExpr {
            name: name.into(),
            type_args: Vec::new(),
            array_dims: 0,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

/// An HTML attribute's value quoting style.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AttributeValueKind {
    Empty,
    Unquoted,
    Single,
    Double,
}

/// The closed doctree vocabulary. One variant per node kind; every
/// variant's first field is its [`Span`].
#[derive(Clone, PartialEq, Debug)]
pub enum DocTree {
    Text {
        span: Span,
        text: String,
    },
    /// HTML entity between `&` and `;`, numeric forms included
    /// (`&#123;`, `&#xAF;`) — `name` keeps the raw form as written,
    /// e.g. `"nbsp"`, `"#123"`, `"#xAF"`.
    Entity {
        span: Span,
        name: String,
    },
    Comment {
        span: Span,
        text: String,
    },
    StartElement {
        span: Span,
        name: String,
        attrs: Vec<DocTree>,
        self_closing: bool,
    },
    EndElement {
        span: Span,
        name: String,
    },
    Attribute {
        span: Span,
        name: String,
        value_kind: AttributeValueKind,
        value: Vec<DocTree>,
    },
    Identifier {
        span: Span,
        name: String,
    },
    Reference {
        span: Span,
        signature: String,
        qualifier: Option<TypeExpr>,
        member_name: Option<String>,
        param_types: Option<Vec<TypeExpr>>,
    },
    DocRoot {
        span: Span,
    },
    InheritDoc {
        span: Span,
    },
    Link {
        span: Span,
        reference: Box<DocTree>,
        label: Vec<DocTree>,
    },
    LinkPlain {
        span: Span,
        reference: Box<DocTree>,
        label: Vec<DocTree>,
    },
    Literal {
        span: Span,
        text: Box<DocTree>,
    },
    Code {
        span: Span,
        text: Box<DocTree>,
    },
    Value {
        span: Span,
        reference: Box<DocTree>,
    },
    Index {
        span: Span,
        term: Box<DocTree>,
        description: Vec<DocTree>,
    },
    Param {
        span: Span,
        is_type_parameter: bool,
        name: Box<DocTree>,
        description: Vec<DocTree>,
    },
    Return {
        span: Span,
        description: Vec<DocTree>,
    },
    Deprecated {
        span: Span,
        description: Vec<DocTree>,
    },
    Since {
        span: Span,
        description: Vec<DocTree>,
    },
    Version {
        span: Span,
        description: Vec<DocTree>,
    },
    Author {
        span: Span,
        description: Vec<DocTree>,
    },
    Hidden {
        span: Span,
        description: Vec<DocTree>,
    },
    Serial {
        span: Span,
        description: Vec<DocTree>,
    },
    SerialData {
        span: Span,
        description: Vec<DocTree>,
    },
    See {
        span: Span,
        description: Vec<DocTree>,
    },
    Throws {
        span: Span,
        reference: Box<DocTree>,
        description: Vec<DocTree>,
    },
    Exception {
        span: Span,
        reference: Box<DocTree>,
        description: Vec<DocTree>,
    },
    SerialField {
        span: Span,
        name: Box<DocTree>,
        field_type: Box<DocTree>,
        description: Vec<DocTree>,
    },
    Provides {
        span: Span,
        reference: Box<DocTree>,
        description: Vec<DocTree>,
    },
    Uses {
        span: Span,
        reference: Box<DocTree>,
        description: Vec<DocTree>,
    },
    UnknownBlockTag {
        span: Span,
        name: String,
        content: Vec<DocTree>,
    },
    UnknownInlineTag {
        span: Span,
        name: String,
        content: Vec<DocTree>,
    },
    Erroneous {
        span: Span,
        text: String,
        diagnostic: &'static str,
    },
    DocComment {
        span: Span,
        first_sentence: Vec<DocTree>,
        body: Vec<DocTree>,
        block_tags: Vec<DocTree>,
    },
}

impl DocTree {
    /// Every variant's span, without having to match on the kind first.
    pub fn span(&self) -> Span {
        use DocTree::*;
        match self {
            Text { span, .. }
            | Entity { span, .. }
            | Comment { span, .. }
            | StartElement { span, .. }
            | EndElement { span, .. }
            | Attribute { span, .. }
            | Identifier { span, .. }
            | Reference { span, .. }
            | DocRoot { span }
            | InheritDoc { span }
            | Link { span, .. }
            | LinkPlain { span, .. }
            | Literal { span, .. }
            | Code { span, .. }
            | Value { span, .. }
            | Index { span, .. }
            | Param { span, .. }
            | Return { span, .. }
            | Deprecated { span, .. }
            | Since { span, .. }
            | Version { span, .. }
            | Author { span, .. }
            | Hidden { span, .. }
            | Serial { span, .. }
            | SerialData { span, .. }
            | See { span, .. }
            | Throws { span, .. }
            | Exception { span, .. }
            | SerialField { span, .. }
            | Provides { span, .. }
            | Uses { span, .. }
            | UnknownBlockTag { span, .. }
            | UnknownInlineTag { span, .. }
            | Erroneous { span, .. }
            | DocComment { span, .. } => *span,
        }
    }

    pub fn is_erroneous(&self) -> bool {
        matches!(self, DocTree::Erroneous { .. })
    }
}

/// Mediates doctree construction, recording the "current position" as
/// an explicit argument rather than hidden mutable factory state,
/// avoiding state that must be saved/restored around recursive calls.
/// `factory.at(start)` returns a short-lived [`At`] builder carrying
/// that position explicitly; every `new_xxx_tree` call on it takes the
/// node's end offset and any kind-specific fields.
#[derive(Default)]
pub struct DocTreeFactory;

impl DocTreeFactory {
    pub fn new() -> DocTreeFactory {
        DocTreeFactory
    }

    pub fn at(&self, start: u32) -> At<'_> {
        At {
            start,
            _factory: self,
        }
    }

    /// Split `body` into a leading first sentence and the remainder.
    /// Delegates to [`visitor::first_sentence`] so both the parser and
    /// the visitor scaffolding share one implementation.
    pub fn get_first_sentence(&self, body: &[DocTree]) -> (Vec<DocTree>, Vec<DocTree>) {
        visitor::first_sentence(body)
    }
}

/// Short-lived builder returned by [`DocTreeFactory::at`]. Every
/// `new_xxx_tree` method spans `[start, end)`.
pub struct At<'a> {
    start: u32,
    _factory: &'a DocTreeFactory,
}

impl<'a> At<'a> {
    fn span(&self, end: u32) -> Span {
        Span::new(self.start, end)
    }

    pub fn new_text_tree(&self, end: u32, text: impl Into<String>) -> DocTree {
        DocTree::Text {
            span: self.span(end),
            text: text.into(),
        }
    }

    pub fn new_entity_tree(&self, end: u32, name: impl Into<String>) -> DocTree {
        DocTree::Entity {
            span: self.span(end),
            name: name.into(),
        }
    }

    pub fn new_comment_tree(&self, end: u32, text: impl Into<String>) -> DocTree {
        DocTree::Comment {
            span: self.span(end),
            text: text.into(),
        }
    }

    pub fn new_start_element_tree(
        &self,
        end: u32,
        name: impl Into<String>,
        attrs: Vec<DocTree>,
        self_closing: bool,
    ) -> DocTree {
        DocTree::StartElement {
            span: self.span(end),
            name: name.into(),
            attrs,
            self_closing,
        }
    }

    pub fn new_end_element_tree(&self, end: u32, name: impl Into<String>) -> DocTree {
        DocTree::EndElement {
            span: self.span(end),
            name: name.into(),
        }
    }

    pub fn new_attribute_tree(
        &self,
        end: u32,
        name: impl Into<String>,
        value_kind: AttributeValueKind,
        value: Vec<DocTree>,
    ) -> DocTree {
        DocTree::Attribute {
            span: self.span(end),
            name: name.into(),
            value_kind,
            value,
        }
    }

    pub fn new_identifier_tree(&self, end: u32, name: impl Into<String>) -> DocTree {
        DocTree::Identifier {
            span: self.span(end),
            name: name.into(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_reference_tree(
        &self,
        end: u32,
        signature: impl Into<String>,
        qualifier: Option<TypeExpr>,
        member_name: Option<String>,
        param_types: Option<Vec<TypeExpr>>,
    ) -> DocTree {
        DocTree::Reference {
            span: self.span(end),
            signature: signature.into(),
            qualifier,
            member_name,
            param_types,
        }
    }

    pub fn new_doc_root_tree(&self, end: u32) -> DocTree {
        DocTree::DocRoot { span: self.span(end) }
    }

    pub fn new_inherit_doc_tree(&self, end: u32) -> DocTree {
        DocTree::InheritDoc { span: self.span(end) }
    }

    pub fn new_link_tree(&self, end: u32, reference: DocTree, label: Vec<DocTree>) -> DocTree {
        DocTree::Link {
            span: self.span(end),
            reference: Box::new(reference),
            label,
        }
    }

    pub fn new_link_plain_tree(
        &self,
        end: u32,
        reference: DocTree,
        label: Vec<DocTree>,
    ) -> DocTree {
        DocTree::LinkPlain {
            span: self.span(end),
            reference: Box::new(reference),
            label,
        }
    }

    pub fn new_literal_tree(&self, end: u32, text: DocTree) -> DocTree {
        DocTree::Literal {
            span: self.span(end),
            text: Box::new(text),
        }
    }

    pub fn new_code_tree(&self, end: u32, text: DocTree) -> DocTree {
        DocTree::Code {
            span: self.span(end),
            text: Box::new(text),
        }
    }

    pub fn new_value_tree(&self, end: u32, reference: DocTree) -> DocTree {
        DocTree::Value {
            span: self.span(end),
            reference: Box::new(reference),
        }
    }

    pub fn new_index_tree(&self, end: u32, term: DocTree, description: Vec<DocTree>) -> DocTree {
        DocTree::Index {
            span: self.span(end),
            term: Box::new(term),
            description,
        }
    }

    pub fn new_param_tree(
        &self,
        end: u32,
        is_type_parameter: bool,
        name: DocTree,
        description: Vec<DocTree>,
    ) -> DocTree {
        DocTree::Param {
            span: self.span(end),
            is_type_parameter,
            name: Box::new(name),
            description,
        }
    }

    pub fn new_return_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::Return { span: self.span(end), description }
    }

    pub fn new_deprecated_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::Deprecated { span: self.span(end), description }
    }

    pub fn new_since_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::Since { span: self.span(end), description }
    }

    pub fn new_version_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::Version { span: self.span(end), description }
    }

    pub fn new_author_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::Author { span: self.span(end), description }
    }

    pub fn new_hidden_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::Hidden { span: self.span(end), description }
    }

    pub fn new_serial_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::Serial { span: self.span(end), description }
    }

    pub fn new_serial_data_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::SerialData { span: self.span(end), description }
    }

    pub fn new_see_tree(&self, end: u32, description: Vec<DocTree>) -> DocTree {
        DocTree::See { span: self.span(end), description }
    }

    pub fn new_throws_tree(&self, end: u32, reference: DocTree, description: Vec<DocTree>) -> DocTree {
        DocTree::Throws {
            span: self.span(end),
            reference: Box::new(reference),
            description,
        }
    }

    pub fn new_exception_tree(
        &self,
        end: u32,
        reference: DocTree,
        description: Vec<DocTree>,
    ) -> DocTree {
        DocTree::Exception {
            span: self.span(end),
            reference: Box::new(reference),
            description,
        }
    }

    pub fn new_serial_field_tree(
        &self,
        end: u32,
        name: DocTree,
        field_type: DocTree,
        description: Vec<DocTree>,
    ) -> DocTree {
        DocTree::SerialField {
            span: self.span(end),
            name: Box::new(name),
            field_type: Box::new(field_type),
            description,
        }
    }

    pub fn new_provides_tree(
        &self,
        end: u32,
        reference: DocTree,
        description: Vec<DocTree>,
    ) -> DocTree {
        DocTree::Provides {
            span: self.span(end),
            reference: Box::new(reference),
            description,
        }
    }

    pub fn new_uses_tree(&self, end: u32, reference: DocTree, description: Vec<DocTree>) -> DocTree {
        DocTree::Uses {
            span: self.span(end),
            reference: Box::new(reference),
            description,
        }
    }

    pub fn new_unknown_block_tag_tree(
        &self,
        end: u32,
        name: impl Into<String>,
        content: Vec<DocTree>,
    ) -> DocTree {
        DocTree::UnknownBlockTag {
            span: self.span(end),
            name: name.into(),
            content,
        }
    }

    pub fn new_unknown_inline_tag_tree(
        &self,
        end: u32,
        name: impl Into<String>,
        content: Vec<DocTree>,
    ) -> DocTree {
        DocTree::UnknownInlineTag {
            span: self.span(end),
            name: name.into(),
            content,
        }
    }

    pub fn new_erroneous_tree(
        &self,
        end: u32,
        text: impl Into<String>,
        diagnostic: &'static str,
    ) -> DocTree {
        DocTree::Erroneous {
            span: self.span(end),
            text: text.into(),
            diagnostic,
        }
    }

    pub fn new_doc_comment_tree(
        &self,
        end: u32,
        first_sentence: Vec<DocTree>,
        body: Vec<DocTree>,
        block_tags: Vec<DocTree>,
    ) -> DocTree {
        DocTree::DocComment {
            span: self.span(end),
            first_sentence,
            body,
            block_tags,
        }
    }
}
