use super::DocumentMode;
use super::node::{Content, Link, read};
use quick_xml::escape::{escape, partial_escape};

const HTML_VOID_ELEMENTS: [&str; 16] = [
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

pub(crate) fn write_node(out: &mut String, link: &Link, mode: DocumentMode) {
    let data = read(link);
    match &data.content {
        Content::Document => {
            for child in &data.children {
                write_node(out, child, mode);
            }
        }
        Content::Text(text) => out.push_str(&partial_escape(text.as_str())),
        Content::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Content::Instruction { target, value } => {
            out.push_str("<?");
            out.push_str(target);
            if let Some(value) = value {
                out.push(' ');
                out.push_str(value);
            }
            out.push_str("?>");
        }
        Content::Element {
            prefix,
            local_name,
            attributes,
            ..
        } => {
            let name = match prefix {
                Some(prefix) => format!("{}:{}", prefix, local_name),
                None => local_name.clone(),
            };
            out.push('<');
            out.push_str(&name);
            for attr in attributes {
                out.push(' ');
                out.push_str(&attr.qualified_name());
                out.push_str("=\"");
                out.push_str(&escape(attr.value.as_str()));
                out.push('"');
            }
            if data.children.is_empty() {
                match mode {
                    DocumentMode::Xml => {
                        out.push_str("/>");
                        return;
                    }
                    DocumentMode::Html
                        if prefix.is_none()
                            && HTML_VOID_ELEMENTS.contains(&local_name.to_ascii_lowercase().as_str()) =>
                    {
                        out.push('>');
                        return;
                    }
                    DocumentMode::Html => {}
                }
            }
            out.push('>');
            for child in &data.children {
                write_node(out, child, mode);
            }
            out.push_str("</");
            out.push_str(&name);
            out.push('>');
        }
    }
}
