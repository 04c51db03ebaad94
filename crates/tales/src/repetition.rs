use crate::value::{HostObject, PathHandler, Value};
use std::any::Any;
use zpt_dom::NodeRef;

/// Positional metadata for one item of a `tal:repeat`, reachable as
/// `repeat/<name>/...`.
#[derive(Debug, Clone)]
pub struct RepetitionInfo {
    name: String,
    index: usize,
    count: usize,
    value: Value,
    node: NodeRef,
}

impl RepetitionInfo {
    pub fn new(name: &str, index: usize, count: usize, value: Value, node: NodeRef) -> Self {
        Self {
            name: name.to_string(),
            index,
            count,
            value,
            node,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn node(&self) -> &NodeRef {
        &self.node
    }

    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn is_even(&self) -> bool {
        self.index % 2 == 0
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    pub fn is_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_end(&self) -> bool {
        self.index + 1 == self.count
    }

    /// Spreadsheet-style letters: a..z, aa..az, ba...
    pub fn letter(&self) -> String {
        let mut remaining = self.index + 1;
        let mut letters = Vec::new();
        while remaining > 0 {
            let offset = (remaining - 1) % 26;
            letters.push(char::from(b'a' + offset as u8));
            remaining = (remaining - 1) / 26;
        }
        letters.iter().rev().collect()
    }

    pub fn upper_letter(&self) -> String {
        self.letter().to_uppercase()
    }

    pub fn roman(&self) -> String {
        to_roman(self.number())
    }

    pub fn upper_roman(&self) -> String {
        self.roman().to_uppercase()
    }
}

fn to_roman(mut number: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    let mut out = String::new();
    for (amount, numeral) in NUMERALS {
        while number >= amount {
            out.push_str(numeral);
            number -= amount;
        }
    }
    out
}

impl PathHandler for RepetitionInfo {
    fn try_get(&self, name: &str) -> Option<Value> {
        let value = match name {
            "index" => Value::from(self.index),
            "number" => Value::from(self.number()),
            "even" => Value::Bool(self.is_even()),
            "odd" => Value::Bool(self.is_odd()),
            "start" => Value::Bool(self.is_start()),
            "end" => Value::Bool(self.is_end()),
            "length" => Value::from(self.count),
            "letter" => Value::String(self.letter()),
            "Letter" => Value::String(self.upper_letter()),
            "roman" => Value::String(self.roman()),
            "Roman" => Value::String(self.upper_roman()),
            "item" => self.value.clone(),
            _ => return None,
        };
        Some(value)
    }
}

impl HostObject for RepetitionInfo {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn path_handler(&self) -> Option<&dyn PathHandler> {
        Some(self)
    }

    fn to_text(&self) -> String {
        format!("repeat/{} ({} of {})", self.name, self.number(), self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zpt_dom::{DocumentMode, XmlDocument};

    fn info(index: usize, count: usize) -> RepetitionInfo {
        let doc = XmlDocument::parse("<li/>", DocumentMode::Xml).unwrap();
        RepetitionInfo::new("item", index, count, Value::Int(index as i64), doc.root())
    }

    #[test]
    fn derived_positions() {
        let first = info(0, 3);
        let last = info(2, 3);
        assert_eq!(first.number(), 1);
        assert!(first.is_start() && !first.is_end() && first.is_even());
        assert!(last.is_end() && !last.is_start() && last.is_even());
        assert!(info(1, 3).is_odd());
        assert_eq!(last.try_get("length"), Some(Value::Int(3)));
        assert_eq!(last.try_get("item"), Some(Value::Int(2)));
        assert_eq!(last.try_get("unknown"), None);
    }

    #[test]
    fn letters_and_numerals() {
        assert_eq!(info(0, 30).letter(), "a");
        assert_eq!(info(25, 30).letter(), "z");
        assert_eq!(info(26, 30).letter(), "aa");
        assert_eq!(info(27, 30).upper_letter(), "AB");
        assert_eq!(info(3, 30).roman(), "iv");
        assert_eq!(info(13, 30).upper_roman(), "XIV");
    }
}
