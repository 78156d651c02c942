//! Template engine.
//!
//! A small handlebars-style language, evaluated in three stages:
//!
//! 1. [`lexer`] splits source text into literal text and `{{ }}` tags;
//! 2. [`parser`] builds a tree of text, expression, `each` and `if` nodes;
//! 3. [`render`] interprets the tree against a [`RenderContext`].
//!
//! | Syntax                            | Renders                                       |
//! |-----------------------------------|-----------------------------------------------|
//! | `{{key}}`, `{{a.b}}`              | context value, empty when absent              |
//! | `{{#each list}} … {{/each}}`      | body once per element, `this` bound to it     |
//! | `{{#if this.field}} … {{/if}}`    | body when the value is truthy                 |
//! | `{{this}}`, `{{this.field}}`      | current loop element or one of its fields     |
//! | `{{formatDate arg}}`              | `January 5, 2024` or `Invalid Date`           |
//! | `{{truncate arg N}}`              | first N characters, then `...`                |
//! | `{{decodeHtml arg}}`              | `&lt; &gt; &amp; &quot; &#39;` decoded        |
//! | `{{lookup object key}}`           | `object[key]`                                 |
//!
//! [`render`](fn@render) and [`Template::parse_lenient`] never fail: malformed
//! markup is kept as literal text. [`Template::parse`] reports it instead.

pub mod helpers;
mod lexer;
mod parser;
mod render;

use std::str::FromStr;

use crate::domain::{entities::RenderContext, error::DomainError};

pub use parser::{Arg, Expr, Node, Path, PathScope};
pub use render::{RenderOptions, TruncateMode};

use parser::Mode;

/// A parsed template, ready to be rendered any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse, rejecting unbalanced blocks, unterminated tags and unknown
    /// helpers.
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        parser::parse(source, Mode::Strict).map(|nodes| Self { nodes })
    }

    /// Parse without failing; malformed markup becomes literal text.
    pub fn parse_lenient(source: &str) -> Self {
        let nodes = parser::parse(source, Mode::Lenient).unwrap_or_default();
        Self { nodes }
    }

    pub fn render(&self, ctx: &RenderContext) -> String {
        self.render_with(ctx, RenderOptions::default())
    }

    pub fn render_with(&self, ctx: &RenderContext, options: RenderOptions) -> String {
        render::render_nodes(&self.nodes, ctx, options)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

impl FromStr for Template {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Render `template` against `ctx`. Total: never fails, never panics.
pub fn render(template: &str, ctx: &RenderContext) -> String {
    Template::parse_lenient(template).render(ctx)
}
