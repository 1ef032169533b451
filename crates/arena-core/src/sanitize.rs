//! HTML sanitizing for user-supplied text.
//!
//! A small whitelist of inline tags survives; every other tag is escaped so it
//! renders as literal text. Stray `<`, `>` and `&` are escaped too, except
//! `&` that already starts a well-formed entity. Attribute values on kept
//! tags are decoded before they are checked and written back fully escaped.

use crate::{ArenaError, Result};

const ALLOWED_TAGS: &[&str] = &[
    "a",
    "abbr",
    "acronym",
    "b",
    "blockquote",
    "code",
    "em",
    "i",
    "li",
    "ol",
    "strong",
    "ul",
];

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "mailto"];

fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "title"],
        "abbr" | "acronym" => &["title"],
        _ => &[],
    }
}

/// Sanitize `input` for storage and later display as HTML.
///
/// Allowed tags come out balanced: an unmatched closing tag is dropped, a
/// closing tag closes anything opened inside it, and whatever is still open at
/// the end is closed.
pub fn clean(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut open: Vec<String> = Vec::new();
    let mut rest = input;

    while let Some(pos) = rest.find(['<', '>', '&']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        match tail.as_bytes()[0] {
            b'<' => match parse_tag(tail) {
                Some((tag, consumed)) => {
                    emit_balanced(tag, &mut open, &mut out);
                    rest = &tail[consumed..];
                }
                None => {
                    out.push_str("&lt;");
                    rest = &tail[1..];
                }
            },
            b'>' => {
                out.push_str("&gt;");
                rest = &tail[1..];
            }
            _ => match entity_len(tail) {
                Some(len) => {
                    out.push_str(&tail[..len]);
                    rest = &tail[len..];
                }
                None => {
                    out.push_str("&amp;");
                    rest = &tail[1..];
                }
            },
        }
    }

    out.push_str(rest);
    while let Some(name) = open.pop() {
        push_closing(&name, &mut out);
    }
    out
}

/// Sanitize `input` and reject it if nothing but whitespace is left.
/// `field` names the input in the error message.
pub fn clean_required(field: &str, input: &str) -> Result<String> {
    let cleaned = clean(input);
    if cleaned.trim().is_empty() {
        return Err(ArenaError::validation(format!("{field} must not be empty")));
    }
    Ok(cleaned)
}

struct Tag {
    name: String,
    closing: bool,
    /// Lowercased names and decoded values.
    attributes: Vec<(String, String)>,
}

impl Tag {
    fn render_opening(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_attribute(value, out);
            out.push('"');
        }
        out.push('>');
    }
}

fn emit_balanced(tag: Tag, open: &mut Vec<String>, out: &mut String) {
    if !tag.closing {
        tag.render_opening(out);
        open.push(tag.name);
        return;
    }

    let Some(depth) = open.iter().rposition(|name| *name == tag.name) else {
        return;
    };
    for name in open.drain(depth..).rev() {
        push_closing(&name, out);
    }
}

fn push_closing(name: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

/// Parse a whitelisted tag at the start of `tail`. Returns the tag and the
/// number of bytes it spans, or `None` if the markup must be escaped.
fn parse_tag(tail: &str) -> Option<(Tag, usize)> {
    let end = tag_end(tail)?;
    let inner = &tail[1..end];

    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };

    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    if name_len == 0 {
        return None;
    }
    let name = body[..name_len].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return None;
    }

    let remainder = &body[name_len..];
    if !remainder.is_empty() && !remainder.starts_with(|c: char| c.is_whitespace() || c == '/') {
        return None;
    }

    let attributes = if closing {
        if !remainder.trim().is_empty() {
            return None;
        }
        Vec::new()
    } else {
        let remainder = remainder.trim_end().trim_end_matches('/');
        parse_attributes(remainder)
            .into_iter()
            .filter_map(|(attr, raw)| {
                let attr = attr.to_ascii_lowercase();
                let value = decode_entities(raw);
                keep_attribute(&name, &attr, &value).then_some((attr, value))
            })
            .collect()
    };

    Some((
        Tag {
            name,
            closing,
            attributes,
        },
        end + 1,
    ))
}

/// Byte index of the `>` closing the tag that opens `tail`, skipping any `>`
/// inside quoted attribute values.
fn tag_end(tail: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in tail.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '<') => return None,
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_attributes(mut s: &str) -> Vec<(&str, &str)> {
    let mut attributes = Vec::new();

    loop {
        s = s.trim_start();
        let name_len = s
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(s.len());
        if name_len == 0 {
            break;
        }
        let name = &s[..name_len];
        s = s[name_len..].trim_start();

        let Some(after_eq) = s.strip_prefix('=') else {
            attributes.push((name, ""));
            continue;
        };
        s = after_eq.trim_start();

        let value = match s.chars().next() {
            Some(q @ ('"' | '\'')) => {
                let body = &s[1..];
                let close = body.find(q).unwrap_or(body.len());
                s = body.get(close + 1..).unwrap_or("");
                &body[..close]
            }
            _ => {
                let len = s.find(char::is_whitespace).unwrap_or(s.len());
                let value = &s[..len];
                s = &s[len..];
                value
            }
        };
        attributes.push((name, value));
    }

    attributes
}

fn keep_attribute(tag: &str, attr: &str, value: &str) -> bool {
    if !allowed_attributes(tag).contains(&attr) {
        return false;
    }
    attr != "href" || safe_href(value)
}

/// `value` must already be decoded. Relative URLs pass; absolute ones need a
/// whitelisted scheme.
fn safe_href(value: &str) -> bool {
    // URL parsers drop tabs and newlines anywhere and trim controls and spaces.
    let url: String = value
        .chars()
        .filter(|c| !matches!(*c, '\t' | '\n' | '\r'))
        .collect();
    let url = url.trim_matches(|c: char| c <= ' ');

    let Some(colon) = url.find(':') else {
        return true;
    };
    let scheme = &url[..colon];
    let is_scheme = scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme {
        return true;
    }
    ALLOWED_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
}

/// Escape a decoded attribute value. Every `&` is escaped, so a browser
/// decodes the output back to exactly `value`.
fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_reference(tail) {
            Some((c, len)) => {
                out.push(c);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the character reference at the start of `tail`, returning the
/// character and the bytes it spans. Numeric references may omit the `;`,
/// as browsers accept them that way.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    let body = tail.strip_prefix('&')?;

    if let Some(num) = body.strip_prefix('#') {
        let (digits, radix, prefix) = match num.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, 2),
            None => (num, 10, 1),
        };
        let len = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        if len == 0 {
            return None;
        }
        let c = u32::from_str_radix(&digits[..len], radix)
            .ok()
            .and_then(char::from_u32)
            .filter(|c| *c != '\0')
            .unwrap_or('\u{FFFD}');
        let semi = usize::from(digits[len..].starts_with(';'));
        return Some((c, 1 + prefix + len + semi));
    }

    let semi = body.find(';')?;
    let c = match &body[..semi] {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "colon" => ':',
        "Tab" => '\t',
        "NewLine" => '\n',
        "sol" => '/',
        "num" => '#',
        "quest" => '?',
        "period" => '.',
        "lpar" => '(',
        "rpar" => ')',
        "excl" => '!',
        "semi" => ';',
        "commat" => '@',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some((c, semi + 2))
}

/// Length of the character reference at the start of `tail`, `;` included.
fn entity_len(tail: &str) -> Option<usize> {
    let body = tail.strip_prefix('&')?;
    let semi = body.find(';')?;
    let name = &body[..semi];
    if name.is_empty() || name.len() > 32 {
        return None;
    }

    let valid = if let Some(num) = name.strip_prefix('#') {
        match num.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !num.is_empty() && num.chars().all(|c| c.is_ascii_digit()),
        }
    } else {
        name.starts_with(|c: char| c.is_ascii_alphabetic())
            && name.chars().all(|c| c.is_ascii_alphanumeric())
    };

    valid.then_some(semi + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(clean("Hello, world"), "Hello, world");
        assert_eq!(clean("O'Brien"), "O'Brien");
    }

    #[test]
    fn disallowed_tags_are_escaped() {
        assert_eq!(
            clean("<script>alert('x')</script>"),
            "&lt;script&gt;alert('x')&lt;/script&gt;"
        );
    }

    #[test]
    fn allowed_tags_survive() {
        assert_eq!(clean("<b>bold</b> and <EM>em</EM>"), "<b>bold</b> and <em>em</em>");
    }

    #[test]
    fn disallowed_attributes_are_dropped() {
        assert_eq!(clean(r#"<b onclick="evil()">x</b>"#), "<b>x</b>");
        assert_eq!(
            clean(r#"<a href='https://example.com' onmouseover=x title=hi>link</a>"#),
            r#"<a href="https://example.com" title="hi">link</a>"#
        );
    }

    #[test]
    fn javascript_hrefs_are_dropped() {
        assert_eq!(clean(r#"<a href="javascript:alert(1)">x</a>"#), "<a>x</a>");
        assert_eq!(clean(r#"<a href="/posts?page=2">x</a>"#), r#"<a href="/posts?page=2">x</a>"#);
    }

    #[test]
    fn encoded_schemes_are_decoded_before_checking() {
        for href in [
            "javascript&#58;alert(1)",
            "javascript&#58alert(1)",
            "javascript&#x3A;alert(1)",
            "javascript&colon;alert(1)",
            "java&#9;script:alert(1)",
            "&#106;avascript:alert(1)",
            " JavaScript:alert(1)",
        ] {
            let out = clean(&format!(r#"<a href="{href}">x</a>"#));
            assert_eq!(out, "<a>x</a>", "href {href:?} survived");
        }
    }

    #[test]
    fn entities_in_safe_hrefs_are_normalized() {
        assert_eq!(
            clean(r#"<a href="/search?a=1&amp;b=2">x</a>"#),
            r#"<a href="/search?a=1&amp;b=2">x</a>"#
        );
        assert_eq!(
            clean(r#"<a href="https&#58;//example.com">x</a>"#),
            r#"<a href="https://example.com">x</a>"#
        );
        assert_eq!(
            clean(r#"<abbr title="&lt;b&gt;">x</abbr>"#),
            r#"<abbr title="&lt;b&gt;">x</abbr>"#
        );
    }

    #[test]
    fn unclosed_tags_are_closed() {
        assert_eq!(clean("<b>bold forever"), "<b>bold forever</b>");
        assert_eq!(clean("<ul><li>one"), "<ul><li>one</li></ul>");
    }

    #[test]
    fn unmatched_closing_tags_are_dropped() {
        assert_eq!(clean("</b></a>"), "");
        assert_eq!(clean("x</em>y"), "xy");
    }

    #[test]
    fn misnested_tags_close_inner_first() {
        assert_eq!(clean("<b><i>x</b>y</i>"), "<b><i>x</i></b>y");
    }

    #[test]
    fn quoted_gt_does_not_end_the_tag() {
        assert_eq!(clean(r#"<a title="a>b">x</a>"#), r#"<a title="a&gt;b">x</a>"#);
    }

    #[test]
    fn stray_brackets_and_ampersands_are_escaped() {
        assert_eq!(clean("1 < 2 & 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
        assert_eq!(clean("<<b>>"), "&lt;<b>&gt;</b>");
    }

    #[test]
    fn existing_entities_are_kept() {
        assert_eq!(clean("fish &amp; chips &#39; &#x27;"), "fish &amp; chips &#39; &#x27;");
        assert_eq!(clean("&nope"), "&amp;nope");
    }

    #[test]
    fn unterminated_tag_is_escaped() {
        assert_eq!(clean("<b"), "&lt;b");
        assert_eq!(clean(r#"<a title="open>"#), r#"&lt;a title="open&gt;"#);
    }

    #[test]
    fn prefix_of_allowed_tag_is_not_allowed() {
        assert_eq!(clean("<bold>x</bold>"), "&lt;bold&gt;x&lt;/bold&gt;");
    }

    #[test]
    fn clean_required_rejects_blank_input() {
        assert!(matches!(
            clean_required("name", "   "),
            Err(ArenaError::Validation { .. })
        ));
        assert_eq!(clean_required("name", "Alice").unwrap(), "Alice");
    }
}
