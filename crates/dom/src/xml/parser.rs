use super::node::{Content, XmlNode};
use crate::error::DomError;
use crate::namespace::Attribute;
use quick_xml::escape::escape;
use roxmltree::NodeType;

const WRAPPER: &str = "zpt-fragment";
const XML_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// Prefixes bound for every parse so templates need not declare them.
const IMPLICIT_NAMESPACES: [(&str, &str); 2] = [
    ("tal", "http://xml.zope.org/namespaces/tal"),
    ("metal", "http://xml.zope.org/namespaces/metal"),
];

/// Splits off the XML declaration and doctype, which cannot appear inside the
/// wrapper element used for parsing.
pub(crate) fn split_preamble(text: &str) -> (&str, &str) {
    let mut consumed = 0;
    loop {
        let rest = &text[consumed..];
        let trimmed = rest.trim_start();
        let end = if trimmed.starts_with("<?xml") {
            trimmed.find("?>").map(|i| i + 2)
        } else if trimmed
            .get(..9)
            .is_some_and(|head| head.eq_ignore_ascii_case("<!doctype"))
        {
            doctype_end(trimmed)
        } else {
            None
        };
        match end {
            Some(end) => consumed += rest.len() - trimmed.len() + end,
            None => break,
        }
    }
    text.split_at(consumed)
}

fn doctype_end(doctype: &str) -> Option<usize> {
    let close = doctype.find('>')?;
    match doctype.find('[') {
        Some(open) if open < close => doctype.find("]>").map(|i| i + 2),
        _ => Some(close + 1),
    }
}

/// Parses `markup` as element content with the given namespace declarations in scope.
pub(crate) fn parse_fragment(
    markup: &str,
    declarations: &[Attribute],
) -> Result<Vec<XmlNode>, DomError> {
    let mut source = format!("<{}", WRAPPER);
    for declaration in declarations {
        source.push_str(&format!(
            " {}=\"{}\"",
            declaration.qualified_name(),
            escape(declaration.value.as_str())
        ));
    }
    for (prefix, uri) in IMPLICIT_NAMESPACES {
        let bound = declarations
            .iter()
            .any(|d| d.prefix.as_deref() == Some("xmlns") && d.local_name == prefix);
        if !bound {
            source.push_str(&format!(" xmlns:{}=\"{}\"", prefix, uri));
        }
    }
    source.push('>');
    source.push_str(markup);
    source.push_str(&format!("</{}>", WRAPPER));

    let doc = roxmltree::Document::parse(&source)?;
    log::trace!("Parsed fragment of {} bytes", markup.len());
    Ok(doc
        .root_element()
        .children()
        .filter_map(|child| convert(child, &source))
        .collect())
}

fn convert(node: roxmltree::Node<'_, '_>, source: &str) -> Option<XmlNode> {
    let content = match node.node_type() {
        NodeType::Element => element_content(node, source),
        NodeType::Text => Content::Text(node.text().unwrap_or_default().to_string()),
        NodeType::Comment => Content::Comment(node.text().unwrap_or_default().to_string()),
        NodeType::PI => {
            let pi = node.pi()?;
            Content::Instruction {
                target: pi.target.to_string(),
                value: pi.value.map(str::to_string),
            }
        }
        NodeType::Root => return None,
    };
    let converted = XmlNode::from_content(content);
    for child in node.children() {
        if let Some(child) = convert(child, source) {
            converted.push_child(child);
        }
    }
    Some(converted)
}

fn element_content(node: roxmltree::Node<'_, '_>, source: &str) -> Content {
    let tag = node.tag_name();
    let start_tag = source.get(node.range().start..).unwrap_or_default();
    let raw_names = raw_attribute_names(start_tag);
    let raw_names = (raw_names.len() == node.attributes().count()).then_some(raw_names);
    let mut attributes = declared_here(node);
    for (i, attr) in node.attributes().enumerate() {
        let prefix = match (&raw_names, attr.namespace()) {
            (_, None) => None,
            (Some(names), Some(_)) => names[i].split_once(':').map(|(p, _)| p.to_string()),
            (None, Some(uri)) => attribute_prefix(node, uri),
        };
        attributes.push(Attribute {
            prefix,
            local_name: attr.name().to_string(),
            namespace_uri: attr.namespace().map(str::to_string),
            value: attr.value().to_string(),
        });
    }
    Content::Element {
        prefix: element_prefix(start_tag),
        local_name: tag.name().to_string(),
        namespace_uri: tag.namespace().map(str::to_string),
        attributes,
    }
}

/// Qualified attribute names of a start tag in source order, declarations excluded.
fn raw_attribute_names(start_tag: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let Some(mut rest) = start_tag.strip_prefix('<') else {
        return names;
    };
    let name_end = rest
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(rest.len());
    rest = &rest[name_end..];
    loop {
        rest = rest.trim_start();
        if rest.is_empty() || rest.starts_with('>') || rest.starts_with('/') {
            break;
        }
        let Some(eq) = rest.find('=') else {
            break;
        };
        let name = rest[..eq].trim();
        rest = rest[eq + 1..].trim_start();
        let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') else {
            break;
        };
        let Some(close) = rest[1..].find(quote) else {
            break;
        };
        rest = &rest[close + 2..];
        if name != "xmlns" && !name.starts_with("xmlns:") {
            names.push(name);
        }
    }
    names
}

/// Reads the prefix straight from the start tag; a URI may be bound to several prefixes.
fn element_prefix(start_tag: &str) -> Option<String> {
    let tag = start_tag.strip_prefix('<')?;
    let end = tag
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(tag.len());
    tag[..end]
        .split_once(':')
        .map(|(prefix, _)| prefix.to_string())
}

fn attribute_prefix(node: roxmltree::Node<'_, '_>, uri: &str) -> Option<String> {
    if uri == XML_URI {
        return Some("xml".to_string());
    }
    node.namespaces()
        .find(|ns| ns.name().is_some() && ns.uri() == uri)
        .and_then(|ns| ns.name())
        .map(str::to_string)
}

/// Namespace declarations introduced on this element rather than inherited.
fn declared_here(node: roxmltree::Node<'_, '_>) -> Vec<Attribute> {
    let inherited: Vec<(Option<&str>, &str)> = node
        .parent_element()
        .map(|parent| parent.namespaces().map(|ns| (ns.name(), ns.uri())).collect())
        .unwrap_or_default();
    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| !inherited.contains(&(ns.name(), ns.uri())))
        .map(|ns| match ns.name() {
            Some(name) => Attribute {
                prefix: Some("xmlns".to_string()),
                local_name: name.to_string(),
                namespace_uri: None,
                value: ns.uri().to_string(),
            },
            None => Attribute::new("xmlns", ns.uri()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::DocumentMode;

    #[test]
    fn preamble_is_split_off() {
        let (pre, body) = split_preamble("<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<html/>");
        assert_eq!(pre, "<?xml version=\"1.0\"?>\n<!DOCTYPE html>");
        assert_eq!(body, "\n<html/>");
        assert_eq!(split_preamble("<p/>"), ("", "<p/>"));
    }

    #[test]
    fn attribute_names_come_from_the_start_tag() {
        assert_eq!(
            raw_attribute_names("<a xmlns:m=\"u\" m:x='1>2' b = \"q\"/><c d=\"e\"/>"),
            vec!["m:x", "b"]
        );
        assert_eq!(element_prefix("<tal:block>"), Some("tal".to_string()));
        assert_eq!(element_prefix("<p>"), None);
    }

    #[test]
    fn explicit_declarations_are_kept() {
        let nodes = parse_fragment(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:x=\"urn:x\"><x:a/></svg>",
            &[],
        )
        .unwrap();
        let markup = nodes[0].to_markup(DocumentMode::Xml);
        assert!(markup.starts_with("<svg "));
        assert!(markup.contains("xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(markup.contains("xmlns:x=\"urn:x\""));
        assert!(markup.ends_with("><x:a/></svg>"));
        assert!(!markup.contains("xmlns:tal"));
    }
}
