//! JSX lowering to classic `React.createElement` calls.
//!
//! `<div id="a">hi {name}</div>` prints as
//! `React.createElement("div", { id: "a" }, "hi ", name)`. Host tags
//! (lowercase, dashed or namespaced) become strings, component tags stay
//! expressions, and fragments use `React.Fragment`.

use tsz_parser::{NodeData, NodeIndex};
use tsz_scanner::SyntaxKind;
use tsz_scanner::char_codes::is_identifier_text;

use super::Printer;
use super::quote_string;

const JSX_FACTORY: &str = "React.createElement";
const JSX_FRAGMENT_FACTORY: &str = "React.Fragment";
/// The binding the factory reads, kept alive through import elision.
pub(crate) const JSX_FACTORY_ROOT: &str = "React";

impl<'a> Printer<'a> {
    pub(super) fn emit_jsx_element(&mut self, opening: NodeIndex, children: &[NodeIndex]) {
        let arena = self.arena;
        if let Some(NodeData::JsxOpeningElement {
            tag_name,
            attributes,
            ..
        }) = arena.data(opening)
        {
            self.emit_jsx_call(Some(*tag_name), attributes, children);
        }
    }

    /// `React.createElement(tag, props, ...children)`; `tag_name` is `None`
    /// for a fragment.
    pub(super) fn emit_jsx_call(
        &mut self,
        tag_name: Option<NodeIndex>,
        attributes: &[NodeIndex],
        children: &[NodeIndex],
    ) {
        self.write(JSX_FACTORY);
        self.write("(");
        match tag_name {
            Some(tag_name) => self.emit_jsx_tag_name(tag_name),
            None => self.write(JSX_FRAGMENT_FACTORY),
        }
        self.write(", ");
        self.emit_jsx_props(attributes);
        self.emit_jsx_children(children);
        self.write(")");
    }

    fn emit_jsx_tag_name(&mut self, tag_name: NodeIndex) {
        if self.arena.is_intrinsic_jsx_tag(tag_name) {
            let text = self.arena.jsx_tag_name_text(tag_name);
            self.write(&quote_string(&text));
        } else {
            self.emit(tag_name);
        }
    }

    fn emit_jsx_props(&mut self, attributes: &[NodeIndex]) {
        if attributes.is_empty() {
            self.write("null");
            return;
        }
        let arena = self.arena;
        self.write("{ ");
        for (i, &attribute) in attributes.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match arena.data(attribute) {
                Some(NodeData::JsxSpreadAttribute { expression }) => {
                    self.write("...");
                    self.emit(*expression);
                }
                Some(NodeData::JsxAttribute { name, initializer }) => {
                    let key = arena.jsx_tag_name_text(*name);
                    if is_identifier_text(&key) {
                        self.write(&key);
                    } else {
                        self.write(&quote_string(&key));
                    }
                    self.write(": ");
                    self.emit_jsx_attribute_value(*initializer);
                }
                _ => {}
            }
        }
        self.write(" }");
    }

    fn emit_jsx_attribute_value(&mut self, initializer: NodeIndex) {
        match self.arena.data(initializer) {
            None => self.write("true"),
            Some(NodeData::Literal {
                kind: SyntaxKind::StringLiteral,
                text,
            }) => self.write(&quote_string(&decode_entities(text))),
            Some(NodeData::JsxExpression { expression, .. }) if expression.is_none() => {
                self.write("true")
            }
            Some(NodeData::JsxExpression { expression, .. }) => self.emit(*expression),
            Some(_) => self.emit(initializer),
        }
    }

    fn emit_jsx_children(&mut self, children: &[NodeIndex]) {
        let arena = self.arena;
        for &child in children {
            match arena.data(child) {
                Some(NodeData::JsxText { text }) => {
                    if let Some(value) = jsx_text_value(text) {
                        self.write(", ");
                        self.write(&quote_string(&value));
                    }
                }
                Some(NodeData::JsxExpression {
                    dot_dot_dot,
                    expression,
                }) => {
                    if expression.is_none() {
                        continue;
                    }
                    self.write(", ");
                    if *dot_dot_dot {
                        self.write("...");
                    }
                    self.emit(*expression);
                }
                _ => {
                    self.write(", ");
                    self.emit(child);
                }
            }
        }
    }
}

/// The string a JSX text child contributes, or `None` when it is only
/// formatting whitespace. Lines are trimmed where they meet a line break,
/// blank lines dropped, and the rest joined with single spaces.
fn jsx_text_value(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw.split('\n').map(|line| line.trim_end_matches('\r')).collect();
    let last = lines.len() - 1;
    let parts: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| match (i == 0, i == last) {
            (true, true) => *line,
            (true, false) => line.trim_end(),
            (false, true) => line.trim_start(),
            (false, false) => line.trim(),
        })
        .filter(|line| !line.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(decode_entities(&parts.join(" ")))
}

/// Decode HTML character references (`&amp;`, `&#123;`, `&#x7B;`). Unknown
/// references are left as written.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let decoded = after
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&after[..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &after[end + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "hellip" => '\u{2026}',
        "mdash" => '\u{2014}',
        "ndash" => '\u{2013}',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsx_text_single_line_keeps_spaces() {
        assert_eq!(jsx_text_value(" hi ").as_deref(), Some(" hi "));
    }

    #[test]
    fn test_jsx_text_multi_line_is_collapsed() {
        assert_eq!(
            jsx_text_value("\n    Hello\n    world  \n  ").as_deref(),
            Some("Hello world")
        );
        assert_eq!(jsx_text_value("\n   \n  "), None);
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&#65;&#x42;"), "AB");
        assert_eq!(decode_entities("&unknown; &"), "&unknown; &");
    }
}
