use crate::error::TalesError;
use std::fmt;

/// A TALES expression: `prefix:content`, or bare content for the default evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    text: String,
    prefix: Option<String>,
    content: String,
}

fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphanumeric())
}

impl Expression {
    /// Splits off a leading `prefix:` made of ASCII letters and digits. Anything
    /// else is unprefixed content.
    pub fn new(text: &str) -> Self {
        let text = text.trim_start();
        match text.split_once(':') {
            Some((prefix, content)) if is_valid_prefix(prefix) => Self {
                text: text.to_string(),
                prefix: Some(prefix.to_string()),
                content: content.to_string(),
            },
            _ => Self {
                text: text.to_string(),
                prefix: None,
                content: text.to_string(),
            },
        }
    }

    pub fn with_prefix(prefix: &str, content: &str) -> Result<Self, TalesError> {
        if !is_valid_prefix(prefix) {
            return Err(TalesError::ParseFailure(prefix.to_string()));
        }
        Ok(Self {
            text: format!("{}:{}", prefix, content),
            prefix: Some(prefix.to_string()),
            content: content.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The content re-read as an expression of its own, as `not:` and
    /// `structure:` do.
    pub fn sub_expression(&self) -> Expression {
        Expression::new(&self.content)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
