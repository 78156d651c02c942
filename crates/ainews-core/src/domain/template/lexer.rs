//! Splits template source into literal text and `{{ ... }}` tags.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Literal text, copied to the output as-is.
    Text(&'a str),
    /// A complete tag. `inner` is the trimmed text between the braces.
    Tag {
        raw: &'a str,
        inner: &'a str,
        line: usize,
    },
    /// `{{` with no closing `}}` before the end of input.
    Unterminated { raw: &'a str, line: usize },
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

pub(crate) fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut line = 1;

    while let Some(offset) = src[pos..].find(OPEN) {
        let open = pos + offset;
        if open > pos {
            tokens.push(Token::Text(&src[pos..open]));
        }
        line += src[pos..open].matches('\n').count();

        let body_start = open + OPEN.len();
        let Some(close_offset) = src[body_start..].find(CLOSE) else {
            tokens.push(Token::Unterminated {
                raw: &src[open..],
                line,
            });
            return tokens;
        };

        let end = body_start + close_offset + CLOSE.len();
        let raw = &src[open..end];
        let inner = src[body_start..body_start + close_offset].trim();

        // `{{}}`, `{{ }}` and brace soup stay literal.
        if inner.is_empty() || inner.contains(['{', '}']) {
            tokens.push(Token::Text(raw));
        } else {
            tokens.push(Token::Tag { raw, inner, line });
        }

        line += raw.matches('\n').count();
        pos = end;
    }

    if pos < src.len() {
        tokens.push(Token::Text(&src[pos..]));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(tokenize("<p>hi</p>"), vec![Token::Text("<p>hi</p>")]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn tags_are_trimmed_and_numbered() {
        let tokens = tokenize("a\n{{ title }}\nb{{#each news}}");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a\n"),
                Token::Tag {
                    raw: "{{ title }}",
                    inner: "title",
                    line: 2
                },
                Token::Text("\nb"),
                Token::Tag {
                    raw: "{{#each news}}",
                    inner: "#each news",
                    line: 3
                },
            ]
        );
    }

    #[test]
    fn empty_and_braced_tags_stay_literal() {
        assert_eq!(
            tokenize("{{}}x{{ {a} }}"),
            vec![
                Token::Text("{{}}"),
                Token::Text("x"),
                Token::Text("{{ {a} }}")
            ]
        );
    }

    #[test]
    fn unterminated_tag_is_reported() {
        assert_eq!(
            tokenize("ok {{title"),
            vec![
                Token::Text("ok "),
                Token::Unterminated {
                    raw: "{{title",
                    line: 1
                }
            ]
        );
    }
}
