//! Parsing of TAL attribute values.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, none_of},
    combinator::value,
    multi::{fold_many0, separated_list0},
};
use regex::Regex;
use std::sync::LazyLock;
use zpt_template_core::RenderError;

static VARIABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:(local|global)\s+)?(\S+)\s+(.+)$")
        .expect("BUG: invalid VARIABLE_RE regex literal")
});

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:([^\s:]+):)?([^\s:]+)\s+(.+)$")
        .expect("BUG: invalid ATTRIBUTE_RE regex literal")
});

static REPEAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(\S+)\s+(.+)$").expect("BUG: invalid REPEAT_RE regex literal")
});

static NODE_EXPRESSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:(text|structure)\s+)?(.*)$")
        .expect("BUG: invalid NODE_EXPRESSION_RE regex literal")
});

// --- Semicolon lists ---

fn item(input: &str) -> IResult<&str, String> {
    fold_many0(
        alt((value(';', tag(";;")), none_of(";"))),
        String::new,
        |mut acc, c| {
            acc.push(c);
            acc
        },
    )
    .parse(input)
}

fn items(input: &str) -> IResult<&str, Vec<String>> {
    separated_list0(char(';'), item).parse(input)
}

/// Splits a `;`-separated attribute value into trimmed, non-empty items.
/// `;;` stands for a literal `;` inside an item.
pub fn get_definitions(value: &str) -> Vec<String> {
    let parsed = match items(value) {
        Ok((_, parsed)) => parsed,
        Err(_) => vec![value.to_string()],
    };
    parsed
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn invalid(attribute: &str, value: &str) -> RenderError {
    RenderError::InvalidAttribute {
        attribute: attribute.to_string(),
        value: value.to_string(),
    }
}

// --- tal:define ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefinitionScope {
    #[default]
    Local,
    Global,
}

/// One `scope? name expression` entry of `tal:define`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub scope: DefinitionScope,
    pub name: String,
    pub expression: String,
}

impl VariableDefinition {
    pub fn parse(item: &str) -> Result<Self, RenderError> {
        let captures = VARIABLE_RE
            .captures(item)
            .ok_or_else(|| invalid("tal:define", item))?;
        let scope = match captures.get(1).map(|m| m.as_str()) {
            Some("global") => DefinitionScope::Global,
            _ => DefinitionScope::Local,
        };
        Ok(Self {
            scope,
            name: captures[2].to_string(),
            expression: captures[3].to_string(),
        })
    }

    pub fn parse_all(value: &str) -> Result<Vec<Self>, RenderError> {
        get_definitions(value).iter().map(|item| Self::parse(item)).collect()
    }
}

// --- tal:attributes ---

/// One `prefix:name expression` entry of `tal:attributes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    pub prefix: Option<String>,
    pub name: String,
    pub expression: String,
}

impl AttributeDefinition {
    pub fn parse(item: &str) -> Result<Self, RenderError> {
        let captures = ATTRIBUTE_RE
            .captures(item)
            .ok_or_else(|| invalid("tal:attributes", item))?;
        Ok(Self {
            prefix: captures.get(1).map(|m| m.as_str().to_string()),
            name: captures[2].to_string(),
            expression: captures[3].to_string(),
        })
    }

    pub fn parse_all(value: &str) -> Result<Vec<Self>, RenderError> {
        get_definitions(value).iter().map(|item| Self::parse(item)).collect()
    }
}

// --- tal:repeat ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatDefinition {
    pub name: String,
    pub expression: String,
}

impl RepeatDefinition {
    pub fn parse(value: &str) -> Result<Self, RenderError> {
        let captures = REPEAT_RE
            .captures(value.trim())
            .ok_or_else(|| invalid("tal:repeat", value))?;
        Ok(Self {
            name: captures[1].to_string(),
            expression: captures[2].to_string(),
        })
    }
}

// --- content, replace and on-error ---

/// Whether an expression's value is inserted as escaped text or parsed markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InsertionMode {
    #[default]
    Text,
    Structure,
}

/// `(text|structure)? expression`, as accepted by content, replace and on-error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeExpression {
    pub mode: InsertionMode,
    pub expression: String,
}

impl NodeExpression {
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        match NODE_EXPRESSION_RE.captures(value) {
            Some(captures) => Self {
                mode: match captures.get(1).map(|m| m.as_str()) {
                    Some("structure") => InsertionMode::Structure,
                    _ => InsertionMode::Text,
                },
                expression: captures[2].to_string(),
            },
            None => Self {
                mode: InsertionMode::Text,
                expression: value.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_single_semicolons() {
        assert_eq!(get_definitions("class foo;style bar"), vec!["class foo", "style bar"]);
        assert_eq!(get_definitions(" a x ; ; b y ;"), vec!["a x", "b y"]);
        assert!(get_definitions("").is_empty());
    }

    #[test]
    fn doubled_semicolons_are_literal() {
        assert_eq!(get_definitions("x string:a;;b"), vec!["x string:a;b"]);
        assert_eq!(get_definitions("a;;;b"), vec!["a;", "b"]);
        assert_eq!(get_definitions("x string:;;;;"), vec!["x string:;;"]);
    }

    #[test]
    fn variable_definitions() {
        let defs = VariableDefinition::parse_all("a 1; global b a;local c string:x y").unwrap();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].scope, DefinitionScope::Local);
        assert_eq!((defs[0].name.as_str(), defs[0].expression.as_str()), ("a", "1"));
        assert_eq!(defs[1].scope, DefinitionScope::Global);
        assert_eq!(defs[1].name, "b");
        assert_eq!(defs[2].scope, DefinitionScope::Local);
        assert_eq!(defs[2].expression, "string:x y");
    }

    #[test]
    fn at_most_one_scope_keyword() {
        let def = VariableDefinition::parse("global local x").unwrap();
        assert_eq!(def.scope, DefinitionScope::Global);
        assert_eq!(def.name, "local");
        assert_eq!(def.expression, "x");
        assert!(VariableDefinition::parse("lonely").is_err());
    }

    #[test]
    fn attribute_definitions() {
        let defs = AttributeDefinition::parse_all("href here/url; xml:lang string:en").unwrap();
        assert_eq!(defs[0].prefix, None);
        assert_eq!(defs[0].name, "href");
        assert_eq!(defs[1].prefix.as_deref(), Some("xml"));
        assert_eq!(defs[1].name, "lang");
        assert_eq!(defs[1].expression, "string:en");
        assert!(AttributeDefinition::parse_all("href").is_err());
    }

    #[test]
    fn repeat_and_node_expressions() {
        let repeat = RepeatDefinition::parse(" item  here/items ").unwrap();
        assert_eq!(repeat.name, "item");
        assert_eq!(repeat.expression, "here/items");
        assert!(RepeatDefinition::parse("items").is_err());

        let structure = NodeExpression::parse("structure here/html");
        assert_eq!(structure.mode, InsertionMode::Structure);
        assert_eq!(structure.expression, "here/html");
        let text = NodeExpression::parse("text string:a");
        assert_eq!(text.mode, InsertionMode::Text);
        assert_eq!(text.expression, "string:a");
        assert_eq!(NodeExpression::parse("textual").expression, "textual");
    }
}
