//! Element trees for structured property values.
//!
//! Serialization matches the element-tree writer the client data was produced with:
//! attributes in insertion order, empty elements written as `<tag />`, and every
//! non-ASCII character emitted as a decimal character reference.

use std::fmt::Write;

/// One markup element with its text, children and trailing text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
    /// Text following the closing tag, inside the parent
    pub tail: Option<String>,
}

impl XmlElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = Some(tail.into());
        self
    }

    /// Render this element, its subtree and its tail as ASCII markup
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        push_escaped(out, &self.tag, Escape::Name);
        for (name, value) in &self.attributes {
            out.push(' ');
            push_escaped(out, name, Escape::Name);
            out.push_str("=\"");
            push_escaped(out, value, Escape::Attribute);
            out.push('"');
        }

        let has_text = self.text.as_deref().is_some_and(|t| !t.is_empty());
        if has_text || !self.children.is_empty() {
            out.push('>');
            if let Some(text) = &self.text {
                push_escaped(out, text, Escape::Text);
            }
            for child in &self.children {
                child.write_markup(out);
            }
            out.push_str("</");
            push_escaped(out, &self.tag, Escape::Name);
            out.push('>');
        } else {
            out.push_str(" />");
        }

        if let Some(tail) = &self.tail {
            push_escaped(out, tail, Escape::Text);
        }
    }
}

#[derive(Clone, Copy)]
enum Escape {
    Name,
    Text,
    Attribute,
}

fn push_escaped(out: &mut String, value: &str, mode: Escape) {
    for c in value.chars() {
        match (c, mode) {
            ('&', Escape::Text | Escape::Attribute) => out.push_str("&amp;"),
            ('<', Escape::Text | Escape::Attribute) => out.push_str("&lt;"),
            ('>', Escape::Text | Escape::Attribute) => out.push_str("&gt;"),
            ('"', Escape::Attribute) => out.push_str("&quot;"),
            ('\r', Escape::Attribute) => out.push_str("&#13;"),
            ('\n', Escape::Attribute) => out.push_str("&#10;"),
            ('\t', Escape::Attribute) => out.push_str("&#09;"),
            (c, _) if c.is_ascii() => out.push(c),
            (c, _) => {
                let _ = write!(out, "&#{};", u32::from(c));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element_self_closes() {
        assert_eq!(XmlElement::new("obj").to_markup(), "<obj />");
        assert_eq!(
            XmlElement::new("obj").with_attribute("v", "1").to_markup(),
            "<obj v=\"1\" />"
        );
    }

    #[test]
    fn test_empty_text_still_self_closes() {
        assert_eq!(XmlElement::new("obj").with_text("").to_markup(), "<obj />");
        assert_eq!(XmlElement::new("obj").with_text(" ").to_markup(), "<obj> </obj>");
    }

    #[test]
    fn test_nested_elements_keep_order() {
        let doc = XmlElement::new("obj")
            .with_attribute("v", "1")
            .with_child(XmlElement::new("mf").with_attribute("hc", "4"))
            .with_child(XmlElement::new("char").with_text("x").with_tail("\n"));
        assert_eq!(
            doc.to_markup(),
            "<obj v=\"1\"><mf hc=\"4\" /><char>x</char>\n</obj>"
        );
    }

    #[test]
    fn test_escaping_rules() {
        let doc = XmlElement::new("n")
            .with_attribute("a", "\"<&>\"\n")
            .with_text("a<b & \"c\" \u{e9}");
        assert_eq!(
            doc.to_markup(),
            "<n a=\"&quot;&lt;&amp;&gt;&quot;&#10;\">a&lt;b &amp; \"c\" &#233;</n>"
        );
    }
}
