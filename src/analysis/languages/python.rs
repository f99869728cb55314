//! Python extraction using tree-sitter.
//!
//! The tree is walked top-down with an explicit scope stack instead of a
//! parent map: entering a class or function body pushes a scope, leaving it
//! pops. "Is this def a method?" becomes "is the innermost scope a class?".

use std::collections::HashSet;

use anyhow::anyhow;
use tree_sitter::{Language, Node, Parser};

use crate::analysis::{Element, ElementKind};

/// Result of a successful parse.
#[derive(Debug)]
pub enum Outcome {
    /// The source parsed cleanly; elements are in discovery order.
    Elements(Vec<Element>),
    /// The tree contains syntax errors; callers fall back to patterns.
    SyntaxError,
}

pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Parse `content` and collect its elements.
    pub fn extract(&self, content: &str) -> anyhow::Result<Outcome> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| anyhow!("tree-sitter returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Ok(Outcome::SyntaxError);
        }

        let mut walker = Walker::new(content.as_bytes());
        walker.visit(root);
        Ok(Outcome::Elements(walker.elements))
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and extract with a fresh parser.
pub fn extract(content: &str) -> anyhow::Result<Outcome> {
    PythonExtractor::new().extract(content)
}

#[derive(Debug, Clone, Copy)]
enum Scope {
    /// Class body; holds the index of the class element.
    Class(usize),
    Function,
}

struct Walker<'a> {
    source: &'a [u8],
    elements: Vec<Element>,
    scopes: Vec<Scope>,
    variables: HashSet<String>,
}

impl<'a> Walker<'a> {
    fn new(source: &'a [u8]) -> Self {
        Self {
            source,
            elements: Vec::new(),
            scopes: Vec::new(),
            variables: HashSet::new(),
        }
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn visit(&mut self, node: Node) {
        match node.kind() {
            "import_statement" => self.import(node),
            "import_from_statement" | "future_import_statement" => self.import_from(node),
            "class_definition" => self.class(node),
            "function_definition" => self.function(node),
            "module" => self.visit_module(node),
            "block" | "decorated_definition" | "if_statement" | "elif_clause"
            | "else_clause" | "for_statement" | "while_statement" | "try_statement"
            | "except_clause" | "except_group_clause" | "finally_clause" | "with_statement"
            | "match_statement" | "case_clause" => self.visit_children(node),
            _ => {}
        }
    }

    /// Variables come only from statements directly under the module.
    fn visit_module(&mut self, module: Node) {
        let mut cursor = module.walk();
        for child in module.named_children(&mut cursor) {
            if child.kind() == "expression_statement" {
                self.assignments(child);
            } else {
                self.visit(child);
            }
        }
    }

    fn visit_children(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.visit(child);
        }
    }

    fn line(node: Node) -> usize {
        node.start_position().row + 1
    }

    /// `import a.b as c, d` reports `a.b` and `d`.
    fn import(&mut self, node: Node) {
        let line = Self::line(node);
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            let module = self.imported_name(name);
            if !module.is_empty() {
                self.elements
                    .push(Element::new(ElementKind::Import, module, line));
            }
        }
    }

    /// `from m import x, y` reports `from m import x` and `from m import y`.
    fn import_from(&mut self, node: Node) {
        let line = Self::line(node);
        let module = match node.child_by_field_name("module_name") {
            Some(m) => self.text(m),
            None => "__future__",
        };

        let mut names = Vec::new();
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            names.push(self.imported_name(name));
        }
        let mut cursor = node.walk();
        if node
            .named_children(&mut cursor)
            .any(|c| c.kind() == "wildcard_import")
        {
            names.push("*");
        }

        for name in names.into_iter().filter(|n| !n.is_empty()) {
            self.elements.push(Element::new(
                ElementKind::Import,
                format!("from {} import {}", module, name),
                line,
            ));
        }
    }

    /// Name of a `dotted_name`, or the original name of an `aliased_import`.
    fn imported_name(&self, node: Node) -> &'a str {
        if node.kind() == "aliased_import" {
            return node
                .child_by_field_name("name")
                .map(|n| self.text(n))
                .unwrap_or("");
        }
        self.text(node)
    }

    fn class(&mut self, node: Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };

        let mut bases = Vec::new();
        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            let mut cursor = superclasses.walk();
            for base in superclasses.named_children(&mut cursor) {
                if base.kind() == "identifier" {
                    bases.push(self.text(base).to_string());
                }
            }
        }

        let index = self.elements.len();
        self.elements.push(
            Element::new(ElementKind::Class, self.text(name), Self::line(node))
                .with_bases(bases)
                .with_methods(Vec::new()),
        );

        if let Some(body) = node.child_by_field_name("body") {
            self.scopes.push(Scope::Class(index));
            self.visit(body);
            self.scopes.pop();
        }
    }

    fn function(&mut self, node: Node) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name);

        match self.scopes.last().copied() {
            Some(Scope::Class(index)) => {
                if let Some(methods) = self.elements[index].methods.as_mut() {
                    methods.push(name.to_string());
                }
            }
            Some(Scope::Function) => {}
            None => {
                let params = node
                    .child_by_field_name("parameters")
                    .map(|p| self.parameter_names(p))
                    .unwrap_or_default();
                self.elements.push(
                    Element::new(ElementKind::Function, name, Self::line(node))
                        .with_params(params),
                );
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            self.scopes.push(Scope::Function);
            self.visit(body);
            self.scopes.pop();
        }
    }

    /// Named parameters; `*args`, `**kwargs` and bare separators are skipped.
    fn parameter_names(&self, parameters: Node) -> Vec<String> {
        let mut names = Vec::new();
        let mut cursor = parameters.walk();
        for param in parameters.named_children(&mut cursor) {
            let ident = match param.kind() {
                "identifier" => Some(param),
                "default_parameter" | "typed_default_parameter" => {
                    param.child_by_field_name("name")
                }
                // first child is the identifier, or a splat pattern
                "typed_parameter" => param.named_child(0),
                _ => None,
            };
            if let Some(ident) = ident.filter(|n| n.kind() == "identifier") {
                names.push(self.text(ident).to_string());
            }
        }
        names
    }

    fn assignments(&mut self, statement: Node) {
        let mut cursor = statement.walk();
        let assignments: Vec<Node> = statement
            .named_children(&mut cursor)
            .filter(|c| c.kind() == "assignment")
            .collect();
        for assignment in assignments {
            self.assignment(assignment);
        }
    }

    /// `a = b = 1` is nested as `a = (b = 1)`; both targets are reported.
    fn assignment(&mut self, node: Node) {
        // annotated assignments carry a type field
        if node.child_by_field_name("type").is_some() {
            return;
        }
        if let Some(left) = node.child_by_field_name("left") {
            if left.kind() == "identifier" {
                let name = self.text(left);
                if self.variables.insert(name.to_string()) {
                    self.elements
                        .push(Element::new(ElementKind::Variable, name, Self::line(left)));
                }
            }
        }
        if let Some(right) = node.child_by_field_name("right") {
            if right.kind() == "assignment" {
                self.assignment(right);
            }
        }
    }
}
