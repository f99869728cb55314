//! Element and per-file result structures produced by extraction.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of code element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Import,
    Class,
    Function,
    Method,
    Variable,
    Package,
    /// UI framework component (React function or class component).
    Component,
}

impl ElementKind {
    /// Convert to a string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Import => "import",
            ElementKind::Class => "class",
            ElementKind::Function => "function",
            ElementKind::Method => "method",
            ElementKind::Variable => "variable",
            ElementKind::Package => "package",
            ElementKind::Component => "component",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recognized code construct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    pub name: String,
    /// Line where the construct was first detected (1-indexed, 0 = undetermined).
    pub line: usize,
    /// Superclass names (Python classes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bases: Option<Vec<String>>,
    /// Superclass name (C-family, JavaScript and Java classes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Implemented interface names (Java classes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implements: Option<Vec<String>>,
    /// Directly declared method names (class kind only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<String>>,
    /// Parameter names (function kind only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<String>>,
}

impl Element {
    /// Create an element with no optional attributes.
    pub fn new(kind: ElementKind, name: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            line,
            bases: None,
            extends: None,
            implements: None,
            methods: None,
            params: None,
        }
    }

    pub fn with_bases(mut self, bases: Vec<String>) -> Self {
        self.bases = Some(bases);
        self
    }

    pub fn with_extends(mut self, extends: Option<String>) -> Self {
        self.extends = extends;
        self
    }

    pub fn with_implements(mut self, implements: Vec<String>) -> Self {
        self.implements = Some(implements);
        self
    }

    pub fn with_methods(mut self, methods: Vec<String>) -> Self {
        self.methods = Some(methods);
        self
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = Some(params);
        self
    }
}

/// Stable sort by line; elements on the same line keep discovery order.
pub fn sort_elements(elements: &mut [Element]) {
    elements.sort_by_key(|e| e.line);
}

/// How far extraction got for a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionStatus {
    /// The language's own strategy (or its designed fallback) produced the elements.
    #[default]
    Complete,
    /// The strategy failed unexpectedly and pattern matching filled in.
    Partial,
    /// Nothing could be extracted.
    Failed,
}

/// Output of a single extraction strategy run.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub elements: Vec<Element>,
    pub status: ExtractionStatus,
}

impl Extraction {
    pub fn complete(mut elements: Vec<Element>) -> Self {
        sort_elements(&mut elements);
        Self {
            elements,
            status: ExtractionStatus::Complete,
        }
    }

    pub fn partial(mut elements: Vec<Element>) -> Self {
        sort_elements(&mut elements);
        Self {
            elements,
            status: ExtractionStatus::Partial,
        }
    }

    pub fn failed() -> Self {
        Self {
            elements: Vec::new(),
            status: ExtractionStatus::Failed,
        }
    }
}

/// The complete structural result for one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Project-relative path.
    pub path: String,
    /// Language label, or "Unknown".
    pub language: String,
    pub size_bytes: usize,
    pub line_count: usize,
    pub comment_count: usize,
    /// comment_count / line_count, clamped to [0, 1] and rounded to 2 decimals.
    pub comment_ratio: f64,
    pub elements: Vec<Element>,
    pub imports: Vec<String>,
    pub classes: Vec<String>,
    pub functions: Vec<String>,
    pub summary: String,
}

impl FileAnalysis {
    /// Names of all elements of the given kind, in element order.
    pub fn names_of(&self, kind: ElementKind) -> Vec<String> {
        project_names(&self.elements, kind)
    }

    /// Count elements of the given kind.
    pub fn count_of(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }

    /// Find an element by kind and name.
    pub fn find(&self, kind: ElementKind, name: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }
}

pub(crate) fn project_names(elements: &[Element], kind: ElementKind) -> Vec<String> {
    elements
        .iter()
        .filter(|e| e.kind == kind)
        .map(|e| e.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_stable_within_line() {
        let mut elements = vec![
            Element::new(ElementKind::Function, "later", 9),
            Element::new(ElementKind::Import, "first", 2),
            Element::new(ElementKind::Import, "second", 2),
            Element::new(ElementKind::Variable, "unknown", 0),
        ];
        sort_elements(&mut elements);

        let names: Vec<_> = elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["unknown", "first", "second", "later"]);
    }

    #[test]
    fn test_element_serializes_without_absent_attributes() {
        let import = Element::new(ElementKind::Import, "os", 1);
        let json = serde_json::to_value(&import).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "import", "name": "os", "line": 1})
        );

        let class = Element::new(ElementKind::Class, "Person", 3).with_methods(vec![]);
        let json = serde_json::to_value(&class).unwrap();
        assert_eq!(json["methods"], serde_json::json!([]));
        assert!(json.get("bases").is_none());
    }
}
