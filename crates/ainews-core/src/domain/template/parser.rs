//! Recursive-descent parser from tokens to a node tree.
//!
//! Two modes share one walk:
//! - **strict** fails on the first unbalanced block, unterminated tag or
//!   unknown helper;
//! - **lenient** never fails: whatever cannot be matched is emitted as literal
//!   text, and everything else keeps working around it.
//!
//! Blocks nested deeper than [`MAX_DEPTH`] are an error in strict mode and
//! literal text in lenient mode.

use crate::domain::error::DomainError;

use super::lexer::{Token, tokenize};

/// Deepest `{{#each}}`/`{{#if}}` nesting the parser accepts. Parsing and
/// rendering both recurse once per level.
pub(crate) const MAX_DEPTH: usize = 128;

/// One node of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Expr(Expr),
    Each { target: Path, body: Vec<Node> },
    If { condition: Path, body: Vec<Node> },
}

/// A substitution inside `{{ }}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `{{name}}`, `{{this.title}}`
    Ref(Path),
    /// `{{formatDate this.pubDate}}`
    FormatDate(Arg),
    /// `{{truncate this.description 200}}`
    Truncate { arg: Arg, length: usize },
    /// `{{decodeHtml this.description}}`
    DecodeHtml(Arg),
    /// `{{lookup counts day}}`
    Lookup { object: Arg, key: Arg },
    /// Anything else; resolved as a literal top-level key.
    Unknown(String),
}

/// A helper argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// `"2024-01-05"` or `'2024-01-05'`
    Quoted(String),
    /// A bare word, resolved as a path.
    Path(Path),
}

/// A dotted reference, rooted either at the context or at the loop element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub raw: String,
    pub scope: PathScope,
    pub segments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathScope {
    Root,
    This,
}

impl Path {
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split('.').map(str::to_owned);
        let first = parts.next().unwrap_or_default();
        if first == "this" {
            Self {
                raw: raw.to_owned(),
                scope: PathScope::This,
                segments: parts.collect(),
            }
        } else {
            Self {
                raw: raw.to_owned(),
                scope: PathScope::Root,
                segments: std::iter::once(first).chain(parts).collect(),
            }
        }
    }

    /// `this.<field>` with exactly one segment.
    pub fn is_this_field(&self, field: &str) -> bool {
        self.scope == PathScope::This && self.segments.len() == 1 && self.segments[0] == field
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Strict,
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Each,
    If,
}

impl BlockKind {
    fn name(self) -> &'static str {
        match self {
            Self::Each => "each",
            Self::If => "if",
        }
    }
}

/// Why a sequence of nodes ended.
enum Stop {
    Eof,
    Close(BlockKind),
}

pub(crate) fn parse(src: &str, mode: Mode) -> Result<Vec<Node>, DomainError> {
    let tokens = tokenize(src);
    let mut parser = Parser {
        tokens,
        pos: 0,
        mode,
        open: Vec::new(),
    };
    let (nodes, _) = parser.sequence()?;
    Ok(nodes)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    mode: Mode,
    /// Kinds of the blocks currently open, innermost last.
    open: Vec<BlockKind>,
}

impl<'a> Parser<'a> {
    fn sequence(&mut self) -> Result<(Vec<Node>, Stop), DomainError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.get(self.pos).cloned() {
            self.pos += 1;
            match token {
                Token::Text(text) => nodes.push(Node::Text(text.to_owned())),
                Token::Unterminated { raw, line } => {
                    self.recover(line, "unterminated '{{' tag")?;
                    nodes.push(Node::Text(raw.to_owned()));
                }
                Token::Tag { raw, inner, line } => {
                    if let Some(rest) = inner.strip_prefix('#') {
                        match self.block(raw, rest, line, &mut nodes)? {
                            Some(stop) => return Ok((nodes, stop)),
                            None => continue,
                        }
                    } else if let Some(rest) = inner.strip_prefix('/') {
                        let kind = match rest.trim() {
                            "each" => Some(BlockKind::Each),
                            "if" => Some(BlockKind::If),
                            _ => None,
                        };
                        match kind {
                            Some(kind) if self.open.contains(&kind) => {
                                return Ok((nodes, Stop::Close(kind)));
                            }
                            _ => {
                                self.recover(line, &format!("unexpected '{raw}'"))?;
                                nodes.push(Node::Text(raw.to_owned()));
                            }
                        }
                    } else {
                        nodes.push(self.expression(raw, inner, line)?);
                    }
                }
            }
        }

        Ok((nodes, Stop::Eof))
    }

    /// Parse an opened block. Returns `Some(stop)` when an enclosing block's
    /// close tag (or end of input) ended this block early and the caller must
    /// unwind too.
    fn block(
        &mut self,
        raw: &str,
        header: &str,
        line: usize,
        nodes: &mut Vec<Node>,
    ) -> Result<Option<Stop>, DomainError> {
        let mut words = header.split_whitespace();
        let kind = match words.next() {
            Some("each") => BlockKind::Each,
            Some("if") => BlockKind::If,
            _ => {
                self.recover(line, &format!("unknown block '{raw}'"))?;
                nodes.push(Node::Text(raw.to_owned()));
                return Ok(None);
            }
        };
        let target = match (words.next(), words.next()) {
            (Some(target), None) => Path::parse(target),
            _ => {
                self.recover(
                    line,
                    &format!("'{{{{#{}}}}}' takes exactly one argument", kind.name()),
                )?;
                nodes.push(Node::Text(raw.to_owned()));
                return Ok(None);
            }
        };

        if self.open.len() >= MAX_DEPTH {
            self.recover(
                line,
                &format!("'{raw}' nests blocks deeper than {MAX_DEPTH} levels"),
            )?;
            nodes.push(Node::Text(raw.to_owned()));
            return Ok(None);
        }

        self.open.push(kind);
        let result = self.sequence();
        self.open.pop();
        let (body, stop) = result?;

        match stop {
            Stop::Close(closed) if closed == kind => {
                nodes.push(match kind {
                    BlockKind::Each => Node::Each { target, body },
                    BlockKind::If => Node::If {
                        condition: target,
                        body,
                    },
                });
                Ok(None)
            }
            other => {
                self.recover(line, &format!("'{raw}' is never closed"))?;
                nodes.push(Node::Text(raw.to_owned()));
                nodes.extend(body);
                Ok(Some(other))
            }
        }
    }

    fn expression(&mut self, raw: &str, inner: &str, line: usize) -> Result<Node, DomainError> {
        let words = split_words(inner);
        let expr = match words.as_slice() {
            [word] if !is_quoted(word) => Some(Expr::Ref(Path::parse(word))),
            [helper, rest @ ..] if *helper == "formatDate" && !rest.is_empty() => {
                Some(Expr::FormatDate(if rest.len() == 1 {
                    arg(rest[0])
                } else {
                    Arg::Quoted(rest.join(" "))
                }))
            }
            ["truncate", target, length] => length.parse().ok().map(|length| Expr::Truncate {
                arg: arg(target),
                length,
            }),
            ["decodeHtml", target] => Some(Expr::DecodeHtml(arg(target))),
            ["lookup", object, key] => Some(Expr::Lookup {
                object: arg(object),
                key: arg(key),
            }),
            _ => None,
        };

        match expr {
            Some(expr) => Ok(Node::Expr(expr)),
            None => {
                self.recover(
                    line,
                    &format!("unknown helper or malformed expression '{raw}'"),
                )?;
                Ok(Node::Expr(Expr::Unknown(inner.to_owned())))
            }
        }
    }

    /// Fail in strict mode; carry on in lenient mode.
    fn recover(&self, line: usize, message: &str) -> Result<(), DomainError> {
        match self.mode {
            Mode::Strict => Err(DomainError::TemplateSyntax {
                line,
                message: message.to_owned(),
            }),
            Mode::Lenient => Ok(()),
        }
    }
}

fn is_quoted(word: &str) -> bool {
    word.len() >= 2
        && ((word.starts_with('"') && word.ends_with('"'))
            || (word.starts_with('\'') && word.ends_with('\'')))
}

fn arg(word: &str) -> Arg {
    if is_quoted(word) {
        Arg::Quoted(word[1..word.len() - 1].to_owned())
    } else {
        Arg::Path(Path::parse(word))
    }
}

/// Whitespace-separated words; quoted words keep their quotes and may
/// contain spaces.
fn split_words(input: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let end = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => rest[1..].find(q).map(|i| i + 2),
            _ => None,
        }
        .unwrap_or_else(|| rest.find(char::is_whitespace).unwrap_or(rest.len()));

        words.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    words
}
