//! Composite paths: `|`-separated alternatives of `/`-separated parts.

mod parser;

/// One `/`-separated segment. An interpolated part (`${expr}`) names its
/// child by the string value of `expr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPart {
    name: String,
    interpolated: bool,
}

impl PathPart {
    pub fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interpolated: false,
        }
    }

    pub fn interpolated(name: &str) -> Self {
        Self {
            name: name.to_string(),
            interpolated: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_interpolated(&self) -> bool {
        self.interpolated
    }
}

/// One alternative of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComponent {
    parts: Vec<PathPart>,
}

impl PathComponent {
    pub fn parts(&self) -> &[PathPart] {
        &self.parts
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    text: String,
    components: Vec<PathComponent>,
}

impl Path {
    /// Never fails: malformed paths only surface when evaluated.
    pub fn create(text: &str) -> Self {
        parser::parse_path(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn components(&self) -> &[PathComponent] {
        &self.components
    }

    pub fn walker(&self) -> PathWalker<'_> {
        PathWalker::new(self)
    }
}

/// Forward-only cursor over a [`Path`]. Starts before the first component;
/// [`PathWalker::reset`] returns there so alternatives can be retried without
/// re-parsing.
#[derive(Debug, Clone)]
pub struct PathWalker<'a> {
    path: &'a Path,
    component: Option<usize>,
    part: Option<usize>,
}

impl<'a> PathWalker<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            component: None,
            part: None,
        }
    }

    /// Moves to the next alternative, positioned before its first part.
    pub fn next_component(&mut self) -> bool {
        let next = self.component.map_or(0, |i| i + 1);
        if next < self.path.components.len() {
            self.component = Some(next);
            self.part = None;
            true
        } else {
            false
        }
    }

    pub fn next_part(&mut self) -> bool {
        let Some(component) = self.current_component() else {
            return false;
        };
        let next = self.part.map_or(0, |i| i + 1);
        if next < component.parts.len() {
            self.part = Some(next);
            true
        } else {
            false
        }
    }

    pub fn current_component(&self) -> Option<&'a PathComponent> {
        self.component.and_then(|i| self.path.components.get(i))
    }

    pub fn current(&self) -> Option<&'a PathPart> {
        let component = self.current_component()?;
        self.part.and_then(|i| component.parts.get(i))
    }

    pub fn reset(&mut self) {
        self.component = None;
        self.part = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(component: &PathComponent) -> Vec<(&str, bool)> {
        component
            .parts()
            .iter()
            .map(|p| (p.name(), p.is_interpolated()))
            .collect()
    }

    #[test]
    fn splits_alternatives_and_parts() {
        let path = Path::create("a/b | c/d/e");
        assert_eq!(path.components().len(), 2);
        assert_eq!(names(&path.components()[0]), vec![("a", false), ("b", false)]);
        assert_eq!(
            names(&path.components()[1]),
            vec![("c", false), ("d", false), ("e", false)]
        );
    }

    #[test]
    fn recognises_interpolated_parts() {
        let path = Path::create("here/${key/name}/x");
        assert_eq!(
            names(&path.components()[0]),
            vec![("here", false), ("key/name", true), ("x", false)]
        );
    }

    #[test]
    fn partial_interpolation_is_plain() {
        let path = Path::create("a/${b}c|${d");
        assert_eq!(names(&path.components()[0]), vec![("a", false), ("${b}c", false)]);
        assert_eq!(names(&path.components()[1]), vec![("${d", false)]);
    }

    #[test]
    fn malformed_paths_still_parse() {
        let path = Path::create("a//|");
        assert_eq!(path.components().len(), 2);
        assert_eq!(names(&path.components()[0]), vec![("a", false), ("", false), ("", false)]);
        assert_eq!(names(&path.components()[1]), vec![("", false)]);
    }

    #[test]
    fn walker_moves_forward_and_resets() {
        let path = Path::create("a/b|c");
        let mut walker = path.walker();
        assert!(walker.current().is_none());
        assert!(walker.next_component());
        assert!(walker.next_part());
        assert_eq!(walker.current().map(PathPart::name), Some("a"));
        assert!(walker.next_part());
        assert_eq!(walker.current().map(PathPart::name), Some("b"));
        assert!(!walker.next_part());
        assert!(walker.next_component());
        assert!(walker.next_part());
        assert_eq!(walker.current().map(PathPart::name), Some("c"));
        assert!(!walker.next_component());
        walker.reset();
        assert!(walker.next_component());
        assert!(walker.next_part());
        assert_eq!(walker.current().map(PathPart::name), Some("a"));
    }
}
