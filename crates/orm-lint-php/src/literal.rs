//! Lowering of attribute argument expressions to literal values.

use orm_lint_core::model::{ArgValue, Literal};
use tree_sitter::Node;

/// Child kinds allowed inside a double-quoted string without interpolation.
const PLAIN_STRING_PARTS: &[&str] = &["string_content", "string_value", "escape_sequence"];

/// Lowers an argument expression node.
///
/// Anything that is not a plain literal or a bare name is `Unresolved`.
pub fn lower_value(node: Node<'_>, src: &[u8]) -> ArgValue {
    let text = node.utf8_text(src).unwrap_or("");

    let literal = match node.kind() {
        "string" => unquote(text).map(|body| Literal::Str(unescape_single(body))),
        "encapsed_string" if is_plain(node) => {
            unquote(text).map(|body| Literal::Str(unescape_double(body)))
        }
        "integer" | "float" => Some(Literal::Number(text.to_string())),
        "boolean" => Some(Literal::Bool(text.eq_ignore_ascii_case("true"))),
        "null" => Some(Literal::Null),
        "name" => Some(Literal::Ident(text.to_string())),
        _ => None,
    };

    literal.map_or(ArgValue::Unresolved, ArgValue::Literal)
}

fn is_plain(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let plain = node
        .named_children(&mut cursor)
        .all(|child| PLAIN_STRING_PARTS.contains(&child.kind()));
    plain
}

/// Strips the quotes (and an optional binary `b` prefix) from a string token.
fn unquote(text: &str) -> Option<&str> {
    let text = text
        .strip_prefix(['b', 'B'])
        .filter(|rest| rest.starts_with(['\'', '"']))
        .unwrap_or(text);
    let quote = text.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    text.strip_prefix(quote)?.strip_suffix(quote)
}

/// Single-quoted strings only recognize `\\` and `\'`.
fn unescape_single(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if next == '\\' || next == '\'' {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

/// Handles the common double-quoted escapes; unknown ones stay verbatim.
fn unescape_double(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let replacement = match chars.peek() {
            Some('n') => Some('\n'),
            Some('t') => Some('\t'),
            Some('r') => Some('\r'),
            Some('v') => Some('\u{0B}'),
            Some('e') => Some('\u{1B}'),
            Some('f') => Some('\u{0C}'),
            Some('0') => Some('\0'),
            Some('\\') => Some('\\'),
            Some('$') => Some('$'),
            Some('"') => Some('"'),
            _ => None,
        };
        match replacement {
            Some(r) => {
                out.push(r);
                chars.next();
            }
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'IDENTITY'"), Some("IDENTITY"));
        assert_eq!(unquote("\"text\""), Some("text"));
        assert_eq!(unquote("b'raw'"), Some("raw"));
        assert_eq!(unquote("''"), Some(""));
        assert_eq!(unquote("bare"), None);
    }

    #[test]
    fn test_unescape_single() {
        assert_eq!(unescape_single(r"it\'s"), "it's");
        assert_eq!(unescape_single(r"a\\b"), r"a\b");
        assert_eq!(unescape_single(r"a\nb"), r"a\nb");
    }

    #[test]
    fn test_unescape_double() {
        assert_eq!(unescape_double(r"a\nb"), "a\nb");
        assert_eq!(unescape_double(r#"say \"hi\""#), "say \"hi\"");
        assert_eq!(unescape_double(r"cost \$5"), "cost $5");
        assert_eq!(unescape_double(r"\q"), r"\q");
    }
}
