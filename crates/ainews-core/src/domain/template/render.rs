//! Tree interpreter.
//!
//! Walks the nodes produced by the parser against a [`RenderContext`].
//! Evaluation never fails: anything that does not resolve renders as empty
//! text.

use std::borrow::Cow;

use crate::domain::entities::{RenderContext, Value};

use super::helpers::{decode_html, format_date, truncate};
use super::parser::{Arg, Expr, Node, Path, PathScope};

/// How `{{truncate this.description N}}` markers behave inside a loop body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TruncateMode {
    /// Every marker renders its own truncation where it stands.
    #[default]
    PerMarker,
    /// The first marker in the loop body sets a length for every plain
    /// `{{this.description}}` in that body and the markers themselves render
    /// nothing. Matches pages produced by older template sets.
    FirstMarkerGovernsDescription,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub truncate_mode: TruncateMode,
}

impl RenderOptions {
    pub fn legacy() -> Self {
        Self {
            truncate_mode: TruncateMode::FirstMarkerGovernsDescription,
        }
    }
}

pub(crate) fn render_nodes(nodes: &[Node], ctx: &RenderContext, options: RenderOptions) -> String {
    let scope = Scope {
        root: ctx,
        this: None,
        description_limit: None,
        options,
    };
    let mut out = String::new();
    scope.render_into(nodes, &mut out);
    out
}

/// Bindings visible at one point of the tree: the root context and the
/// innermost loop element.
#[derive(Clone, Copy)]
struct Scope<'a> {
    root: &'a RenderContext,
    this: Option<&'a Value>,
    description_limit: Option<usize>,
    options: RenderOptions,
}

impl<'a> Scope<'a> {
    fn render_into(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Expr(expr) => out.push_str(&self.eval(expr)),
                Node::If { condition, body } => {
                    if self.resolve(condition).is_some_and(|v| v.is_truthy()) {
                        self.render_into(body, out);
                    }
                }
                Node::Each { target, body } => self.render_each(target, body, out),
            }
        }
    }

    fn render_each(&self, target: &Path, body: &[Node], out: &mut String) {
        let Some(value) = self.resolve(target) else {
            return;
        };
        let Some(elements) = value.as_sequence() else {
            return;
        };

        let description_limit = match self.options.truncate_mode {
            TruncateMode::PerMarker => None,
            TruncateMode::FirstMarkerGovernsDescription => first_description_limit(body),
        };

        for element in elements {
            let inner = Scope {
                root: self.root,
                this: Some(element),
                description_limit,
                options: self.options,
            };
            inner.render_into(body, out);
        }
    }

    fn eval(&self, expr: &Expr) -> String {
        match expr {
            Expr::Ref(path) => {
                let text = self.resolve(path).map(|v| v.to_string()).unwrap_or_default();
                match self.description_limit {
                    Some(limit) if path.is_this_field("description") && !text.is_empty() => {
                        truncate(&text, limit)
                    }
                    _ => text,
                }
            }
            Expr::FormatDate(arg) => format_date(&self.arg_text(arg)),
            Expr::Truncate { arg, length } => {
                if self.description_limit.is_some() && is_description(arg) {
                    String::new()
                } else {
                    truncate(&self.arg_text(arg), *length)
                }
            }
            Expr::DecodeHtml(arg) => decode_html(&self.arg_text(arg)),
            Expr::Lookup { object, key } => {
                let key = self.arg_text(key);
                self.arg_value(object)
                    .and_then(|obj| obj.get(&key).map(|v| v.to_string()))
                    .unwrap_or_default()
            }
            Expr::Unknown(raw) => self
                .root
                .get(raw)
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }

    /// Value of a helper argument. Bare root words that are not bound fall
    /// back to their own text, so `{{formatDate 2024-01-05}}` works.
    fn arg_value(&self, arg: &Arg) -> Option<Cow<'a, Value>> {
        match arg {
            Arg::Quoted(text) => Some(Cow::Owned(Value::Text(text.clone()))),
            Arg::Path(path) => self.resolve(path).or_else(|| match path.scope {
                PathScope::Root => Some(Cow::Owned(Value::Text(path.raw.clone()))),
                PathScope::This => None,
            }),
        }
    }

    fn arg_text(&self, arg: &Arg) -> String {
        self.arg_value(arg).map(|v| v.to_string()).unwrap_or_default()
    }

    fn resolve(&self, path: &Path) -> Option<Cow<'a, Value>> {
        let (start, rest): (Cow<'a, Value>, &[String]) = match path.scope {
            PathScope::This => (Cow::Borrowed(self.this?), &path.segments),
            PathScope::Root => {
                if let Some(value) = self.root.get(&path.raw) {
                    return Some(Cow::Borrowed(value));
                }
                let (first, rest) = path.segments.split_first()?;
                (Cow::Borrowed(self.root.get(first)?), rest)
            }
        };

        rest.iter().try_fold(start, |current, segment| match current {
            Cow::Borrowed(value) => value.get(segment),
            Cow::Owned(value) => value.get(segment).map(|v| Cow::Owned(v.into_owned())),
        })
    }
}

fn is_description(arg: &Arg) -> bool {
    matches!(arg, Arg::Path(path) if path.is_this_field("description"))
}

/// Length of the first `{{truncate this.description N}}` anywhere in `nodes`,
/// nested blocks included.
fn first_description_limit(nodes: &[Node]) -> Option<usize> {
    nodes.iter().find_map(|node| match node {
        Node::Expr(Expr::Truncate { arg, length }) if is_description(arg) => Some(*length),
        Node::Each { body, .. } | Node::If { body, .. } => first_description_limit(body),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewsItem;
    use crate::domain::template::parser::{Mode, parse};

    fn render(src: &str, ctx: &RenderContext) -> String {
        render_nodes(&parse(src, Mode::Lenient).unwrap(), ctx, RenderOptions::default())
    }

    fn render_legacy(src: &str, ctx: &RenderContext) -> String {
        render_nodes(&parse(src, Mode::Lenient).unwrap(), ctx, RenderOptions::legacy())
    }

    fn one_item(description: &str) -> RenderContext {
        RenderContext::new().with(
            "news",
            vec![NewsItem::new("T", "https://x", "S").with_description(description)],
        )
    }

    #[test]
    fn root_reference_prefers_exact_key() {
        let ctx = RenderContext::new()
            .with("a.b", "exact")
            .with("c", serde_json::json!({"d": "nested"}));
        assert_eq!(render("{{a.b}}|{{c.d}}", &ctx), "exact|nested");
    }

    #[test]
    fn this_outside_loop_is_empty() {
        assert_eq!(render("[{{this.title}}]", &RenderContext::new()), "[]");
    }

    #[test]
    fn each_over_non_sequence_is_empty() {
        let ctx = RenderContext::new().with("news", "not a list");
        assert_eq!(render("a{{#each news}}x{{/each}}b", &ctx), "ab");
        assert_eq!(render("a{{#each missing}}x{{/each}}b", &ctx), "ab");
    }

    #[test]
    fn per_marker_truncation() {
        let ctx = one_item("abcdefghij");
        assert_eq!(
            render(
                "{{#each news}}{{truncate this.description 3}}|{{truncate this.description 5}}|{{this.description}}{{/each}}",
                &ctx
            ),
            "abc...|abcde...|abcdefghij"
        );
    }

    #[test]
    fn legacy_first_marker_governs_plain_description() {
        let ctx = one_item("abcdefghij");
        assert_eq!(
            render_legacy(
                "{{#each news}}[{{truncate this.description 3}}][{{this.description}}]{{#if this.title}}[{{this.description}}]{{/if}}[{{truncate this.description 5}}]{{/each}}",
                &ctx
            ),
            "[][abc...][abc...][]"
        );
    }

    #[test]
    fn legacy_mode_without_marker_leaves_description_alone() {
        let ctx = one_item("abcdefghij");
        assert_eq!(
            render_legacy("{{#each news}}{{this.description}}{{/each}}", &ctx),
            "abcdefghij"
        );
    }

    #[test]
    fn lookup_with_loop_element_as_key() {
        let ctx = RenderContext::try_from(serde_json::json!({
            "dates": ["2024-01-06", "2024-01-05"],
            "counts": {"2024-01-05": 7, "2024-01-06": 2}
        }))
        .unwrap();
        assert_eq!(
            render("{{#each dates}}{{this}}={{lookup counts this}};{{/each}}", &ctx),
            "2024-01-06=2;2024-01-05=7;"
        );
    }

    #[test]
    fn lookup_literal_word_key() {
        let ctx = RenderContext::try_from(serde_json::json!({"counts": {"2024-01-05": 7}}))
            .unwrap();
        assert_eq!(render("{{lookup counts 2024-01-05}}", &ctx), "7");
        assert_eq!(render("{{lookup missing 2024-01-05}}", &ctx), "");
    }

    #[test]
    fn format_date_prefers_bound_value() {
        let ctx = RenderContext::new().with("day", "2024-01-05");
        assert_eq!(render("{{formatDate day}}", &ctx), "January 5, 2024");
        assert_eq!(
            render("{{formatDate 2023-12-31}}", &ctx),
            "December 31, 2023"
        );
        assert_eq!(render("{{formatDate nope}}", &ctx), "Invalid Date");
    }

    #[test]
    fn missing_this_date_is_invalid() {
        let ctx = RenderContext::new().with("news", vec![NewsItem::new("T", "L", "S")]);
        assert_eq!(
            render("{{#each news}}{{formatDate this.pubDate}}{{/each}}", &ctx),
            "Invalid Date"
        );
    }

    #[test]
    fn unknown_expression_uses_literal_key() {
        let ctx = RenderContext::new().with("shout title", "odd");
        assert_eq!(render("{{shout title}}|{{other thing}}", &ctx), "odd|");
    }

    #[test]
    fn substituted_values_are_not_reprocessed() {
        let ctx = RenderContext::new().with("x", "{{y}}").with("y", "no");
        assert_eq!(render("{{x}}", &ctx), "{{y}}");
    }
}
