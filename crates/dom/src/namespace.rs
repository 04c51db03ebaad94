use std::fmt;

/// A namespace as seen by the template vocabulary: a conventional prefix and,
/// where the markup declares one, the namespace URI.
///
/// Membership is decided by URI when both sides carry one, otherwise by prefix.
/// This lets `tal:content` work in HTML documents that never declare the TAL
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Namespace {
    pub prefix: Option<String>,
    pub uri: Option<String>,
}

impl Namespace {
    pub fn new(prefix: &str, uri: &str) -> Self {
        Self {
            prefix: Some(prefix.to_string()),
            uri: Some(uri.to_string()),
        }
    }

    /// The "no namespace" namespace of plain, unprefixed attributes.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, prefix: Option<&str>, uri: Option<&str>) -> bool {
        match (uri, self.uri.as_deref()) {
            (Some(candidate), Some(own)) => candidate == own,
            _ => prefix == self.prefix.as_deref(),
        }
    }
}

/// Identifies one recognised attribute: namespace plus local name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSpec {
    pub namespace: Namespace,
    pub name: String,
}

impl AttributeSpec {
    pub fn new(namespace: Namespace, name: &str) -> Self {
        Self {
            namespace,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for AttributeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub prefix: Option<String>,
    pub local_name: String,
    pub namespace_uri: Option<String>,
    pub value: String,
}

impl Attribute {
    pub fn new(local_name: &str, value: &str) -> Self {
        Self {
            prefix: None,
            local_name: local_name.to_string(),
            namespace_uri: None,
            value: value.to_string(),
        }
    }

    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local_name),
            None => self.local_name.clone(),
        }
    }

    pub fn is_in_namespace(&self, namespace: &Namespace) -> bool {
        !self.is_namespace_declaration()
            && namespace.contains(self.prefix.as_deref(), self.namespace_uri.as_deref())
    }

    pub fn matches(&self, spec: &AttributeSpec) -> bool {
        self.local_name == spec.name && self.is_in_namespace(&spec.namespace)
    }

    pub fn is_namespace_declaration(&self) -> bool {
        match self.prefix.as_deref() {
            Some(prefix) => prefix == "xmlns",
            None => self.local_name == "xmlns",
        }
    }

    /// True for an `xmlns`/`xmlns:p` attribute that binds `namespace`.
    pub fn declares(&self, namespace: &Namespace) -> bool {
        if !self.is_namespace_declaration() {
            return false;
        }
        let binds_uri = namespace.uri.as_deref() == Some(self.value.as_str());
        let binds_prefix =
            self.prefix.is_some() && namespace.prefix.as_deref() == Some(self.local_name.as_str());
        binds_uri || binds_prefix
    }
}
