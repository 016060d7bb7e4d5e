//! Fragment token streams.
//!
//! An element subtree is flattened into a linear sequence of tokens so that
//! it can be cut at arbitrary points in document order. A cut can leave
//! openers without closers (at the end of a prefix) or closers without
//! openers (at the start of a suffix); [`balance`] removes those so every
//! fragment serializes to self-contained markup.

use crate::tags;
use crate::tree::{self, Element, Node};

/// One unit of a flattened subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Close(String),
    /// An element without a closing tag (`br`, `img`, ...).
    Void {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// Character data, escaped on output.
    Text(String),
    /// Character data inside `script`/`style`/`iframe`, written verbatim.
    Raw(String),
}

impl Token {
    /// The opening token of an element, without its children.
    #[must_use]
    pub fn open(el: &Element) -> Self {
        Self::Open {
            tag: el.tag.clone(),
            attrs: el.attrs.clone(),
        }
    }

    /// The closing token of an element.
    #[must_use]
    pub fn close(el: &Element) -> Self {
        Self::Close(el.tag.clone())
    }
}

/// Flatten an element and its descendants.
#[must_use]
pub fn tokens_of(el: &Element) -> Vec<Token> {
    let mut out = Vec::new();
    push_element(el, &mut out);
    out
}

/// Append the tokens of `el` to `out`.
pub fn push_element(el: &Element, out: &mut Vec<Token>) {
    if tags::is_void_element(&el.tag) {
        out.push(Token::Void {
            tag: el.tag.clone(),
            attrs: el.attrs.clone(),
        });
        return;
    }

    out.push(Token::open(el));
    let raw = tags::is_raw_text_element(&el.tag);
    for child in &el.children {
        match child {
            Node::Element(inner) => push_element(inner, out),
            Node::Text(t) if raw => out.push(Token::Raw(t.clone())),
            Node::Text(t) => out.push(Token::Text(t.clone())),
        }
    }
    out.push(Token::close(el));
}

/// Drop every opener and closer that has no partner within `tokens`.
///
/// Openers are pushed on a stack and popped by the closer with the same
/// tag. A closer that does not match the top of the stack is dropped, and
/// so is every opener still on the stack at the end. Text, raw text and
/// void tokens always pass through untouched.
#[must_use]
pub fn balance(tokens: Vec<Token>) -> Vec<Token> {
    let mut keep = vec![true; tokens.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Open { .. } => stack.push(i),
            Token::Close(tag) => {
                let matches_top = stack
                    .last()
                    .is_some_and(|&j| matches!(&tokens[j], Token::Open { tag: open, .. } if open == tag));
                if matches_top {
                    stack.pop();
                } else {
                    keep[i] = false;
                }
            }
            Token::Void { .. } | Token::Text(_) | Token::Raw(_) => {}
        }
    }
    for orphan in stack {
        keep[orphan] = false;
    }

    tokens
        .into_iter()
        .zip(keep)
        .filter_map(|(token, kept)| kept.then_some(token))
        .collect()
}

/// Whether a token run carries anything worth displaying: text other than
/// HTML whitespace, embedded media, or a void element other than a
/// separator such as `br`. Script and style bodies do not count.
#[must_use]
pub fn has_content(tokens: &[Token]) -> bool {
    tokens.iter().any(|token| match token {
        Token::Text(t) => !tree::is_blank(t),
        Token::Void { tag, .. } => !tags::is_separator_element(tag),
        Token::Open { tag, .. } => tags::is_embedded_content(tag),
        Token::Close(_) | Token::Raw(_) => false,
    })
}

/// Serialize tokens to markup.
#[must_use]
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Open { tag, attrs } | Token::Void { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');
            }
            Token::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            Token::Text(t) => out.push_str(&escape_text(t)),
            Token::Raw(t) => out.push_str(t),
        }
    }
    out
}

/// Serialize an element and its descendants.
#[must_use]
pub fn outer_html(el: &Element) -> String {
    render(&tokens_of(el))
}

fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(tag: &str) -> Token {
        Token::Open {
            tag: tag.to_string(),
            attrs: vec![],
        }
    }

    fn close(tag: &str) -> Token {
        Token::Close(tag.to_string())
    }

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    fn element(tag: &str, children: Vec<Node>) -> Element {
        Element {
            tag: tag.to_string(),
            attrs: vec![],
            children,
        }
    }

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let el = Element {
            tag: "a".to_string(),
            attrs: vec![("title".to_string(), r#"say "hi" & go"#.to_string())],
            children: vec![Node::Text("5 < 6 & 7 > 3".to_string())],
        };
        assert_eq!(
            outer_html(&el),
            r#"<a title="say &quot;hi&quot; &amp; go">5 &lt; 6 &amp; 7 &gt; 3</a>"#
        );
    }

    #[test]
    fn test_render_keeps_script_text_verbatim() {
        let el = element("script", vec![Node::Text("if (a < b && c) {}".to_string())]);
        assert_eq!(outer_html(&el), "<script>if (a < b && c) {}</script>");
    }

    #[test]
    fn test_render_void_elements_have_no_close_tag() {
        let el = element(
            "p",
            vec![
                Node::Text("a".to_string()),
                Node::Element(element("br", vec![])),
                Node::Text("b".to_string()),
            ],
        );
        assert_eq!(outer_html(&el), "<p>a<br>b</p>");
    }

    #[test]
    fn test_balance_drops_trailing_orphan_opener() {
        let tokens = vec![text("x"), open("em"), text("y"), close("em"), open("span"), text("A")];
        let balanced = balance(tokens);
        assert_eq!(render(&balanced), "x<em>y</em>A");
    }

    #[test]
    fn test_balance_drops_leading_orphan_closer() {
        let tokens = vec![text("B"), close("span"), text(" tail "), open("b"), text("z"), close("b")];
        let balanced = balance(tokens);
        assert_eq!(render(&balanced), "B tail <b>z</b>");
    }

    #[test]
    fn test_balance_keeps_balanced_input_unchanged() {
        let tokens = vec![open("ul"), open("li"), text("1"), close("li"), close("ul")];
        assert_eq!(balance(tokens.clone()), tokens);
    }

    #[test]
    fn test_balance_never_touches_text() {
        let tokens = vec![close("a"), close("b"), text("keep"), open("c"), open("d")];
        assert_eq!(balance(tokens), vec![text("keep")]);
    }

    #[test]
    fn test_has_content() {
        assert!(!has_content(&[open("p"), text("  \n"), close("p")]));
        assert!(!has_content(&[Token::Void {
            tag: "br".to_string(),
            attrs: vec![]
        }]));
        assert!(has_content(&[Token::Void {
            tag: "img".to_string(),
            attrs: vec![("src".to_string(), "x.png".to_string())]
        }]));
        assert!(has_content(&[text(" a ")]));
        assert!(has_content(&[open("p"), text("\u{a0}"), close("p")]));
        assert!(has_content(&[open("iframe"), close("iframe")]));
        assert!(!has_content(&[
            open("script"),
            Token::Raw("track()".to_string()),
            close("script")
        ]));
    }
}
