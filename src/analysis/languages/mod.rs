//! Language-specific extraction strategies.
//!
//! Dispatch is a closed enum: every language label maps to exactly one
//! [`Strategy`], with [`Strategy::Generic`] as the default arm. Python is
//! parsed with tree-sitter (when the `tree-sitter` feature is enabled); all
//! other strategies are regex families over the raw text.

mod generic;
mod java;
mod javascript;
#[cfg(feature = "tree-sitter")]
mod python;

use std::collections::HashSet;

use super::{Element, ElementKind, Extraction};

/// Extraction strategy for a language family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Syntax-tree extraction with nesting awareness.
    Python,
    /// ES module / CommonJS patterns plus UI component detection.
    JavaScript,
    /// Package, import, class and method signature patterns.
    Java,
    /// Language-neutral pattern families.
    Generic,
}

impl Strategy {
    /// Pick the strategy for a classifier label.
    pub fn for_language(language: &str) -> Self {
        match language {
            "Python" => Strategy::Python,
            "JavaScript" | "TypeScript" | "React JSX" | "React TSX" => Strategy::JavaScript,
            "Java" => Strategy::Java,
            _ => Strategy::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Python => "python",
            Strategy::JavaScript => "javascript",
            Strategy::Java => "java",
            Strategy::Generic => "generic",
        }
    }

    /// Run this strategy over decoded file content.
    pub fn extract(self, content: &str) -> Extraction {
        match self {
            Strategy::Python => extract_python(content),
            Strategy::JavaScript => Extraction::complete(javascript::extract(content)),
            Strategy::Java => Extraction::complete(java::extract(content)),
            Strategy::Generic => Extraction::complete(generic::extract(content)),
        }
    }
}

/// Extract elements for a language label.
pub fn extract(language: &str, content: &str) -> Extraction {
    Strategy::for_language(language).extract(content)
}

#[cfg(feature = "tree-sitter")]
fn extract_python(content: &str) -> Extraction {
    match python::extract(content) {
        Ok(python::Outcome::Elements(elements)) => Extraction::complete(elements),
        Ok(python::Outcome::SyntaxError) => {
            tracing::debug!("python source has syntax errors, using pattern extraction");
            Extraction::complete(generic::extract(content))
        }
        Err(e) => {
            tracing::warn!(error = %e, "python parser unavailable, using pattern extraction");
            Extraction::partial(generic::extract(content))
        }
    }
}

#[cfg(not(feature = "tree-sitter"))]
fn extract_python(content: &str) -> Extraction {
    Extraction::complete(generic::extract(content))
}

/// Element list that keeps the first element for each (kind, name) pair.
#[derive(Debug, Default)]
pub(crate) struct ElementSet {
    elements: Vec<Element>,
    seen: HashSet<(ElementKind, String)>,
}

impl ElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element unless one with the same kind and name exists.
    pub fn insert(&mut self, element: Element) -> bool {
        if !self.seen.insert((element.kind, element.name.clone())) {
            return false;
        }
        self.elements.push(element);
        true
    }

    pub fn contains(&self, kind: ElementKind, name: &str) -> bool {
        self.seen.contains(&(kind, name.to_string()))
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(Strategy::for_language("Python"), Strategy::Python);
        assert_eq!(Strategy::for_language("TypeScript"), Strategy::JavaScript);
        assert_eq!(Strategy::for_language("React TSX"), Strategy::JavaScript);
        assert_eq!(Strategy::for_language("Java"), Strategy::Java);
        assert_eq!(Strategy::for_language("Go"), Strategy::Generic);
        assert_eq!(Strategy::for_language("Unknown"), Strategy::Generic);
    }

    #[test]
    fn test_element_set_first_wins() {
        let mut set = ElementSet::new();
        assert!(set.insert(Element::new(ElementKind::Function, "run", 3)));
        assert!(!set.insert(Element::new(ElementKind::Function, "run", 9)));
        assert!(set.insert(Element::new(ElementKind::Variable, "run", 9)));

        assert!(set.contains(ElementKind::Function, "run"));
        assert_eq!(set.count(ElementKind::Function), 1);
        let elements = set.into_elements();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].line, 3);
    }

    #[test]
    fn test_extract_is_sorted_by_line() {
        let content = "func b() {}\nimport \"fmt\"\nstruct S {}\n";
        let extraction = extract("Go", content);
        let lines: Vec<_> = extraction.elements.iter().map(|e| e.line).collect();
        let mut sorted = lines.clone();
        sorted.sort();
        assert_eq!(lines, sorted);
    }
}
