//! JavaScript / TypeScript extraction.
//!
//! Covers ES module imports, side-effect imports and CommonJS `require`,
//! classes with `extends`, the shared function family, and React-style
//! components.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::{generic, ElementSet};
use crate::analysis::lines::{find_line, match_literal};
use crate::analysis::{Element, ElementKind};

lazy_static! {
    /// Import forms; group 1 is the module specifier.
    static ref IMPORTS: Vec<Regex> = vec![
        // import x from 'm' / import { a, b } from 'm' / import * as ns from 'm'
        Regex::new(r#"(?m)^[ \t]*import\s+(?:type\s+)?(?:[\w$]+\s*,\s*)?(?:\{[^}]*\}|[\w$]+|\*\s+as\s+[\w$]+)\s+from\s+['"]([^'"]+)['"]"#).unwrap(),
        // import 'm'
        Regex::new(r#"(?m)^[ \t]*import\s+['"]([^'"]+)['"]"#).unwrap(),
        // const x = require('m')
        Regex::new(r#"(?:const|let|var)\s+(?:[\w$]+|\{[^}]*\})\s*=\s*require\(\s*['"]([^'"]+)['"]\s*\)"#).unwrap(),
    ];

    static ref CLASS: Regex = Regex::new(
        r"(?m)^[ \t]*(?:export\s+)?(?:default\s+)?(?:abstract\s+)?class\s+([\w$]+)(?:\s*<[^>{\n]*>)?(?:\s+extends\s+([\w$.]+))?"
    ).unwrap();

    /// PascalCase components; group 1 is the component name.
    static ref COMPONENTS: Vec<Regex> = vec![
        // const Card = (props) => / const Card = props => / const Card = memo(
        Regex::new(r"(?m)^[ \t]*(?:export\s+(?:default\s+)?)?(?:const|let|var)\s+([A-Z][\w$]*)\s*(?::\s*[\w.<>, ]+)?=\s*(?:(?:React\.)?(?:memo|forwardRef)\(|(?:async\s+)?(?:\([^)]*\)|[\w$]+)\s*=>)").unwrap(),
        // class Card extends React.Component
        Regex::new(r"(?m)^[ \t]*(?:export\s+(?:default\s+)?)?class\s+([A-Z][\w$]*)\s+extends\s+(?:React\.)?(?:Pure)?Component\b").unwrap(),
    ];
}

/// Extract imports, classes, functions and components.
pub fn extract(content: &str) -> Vec<Element> {
    let mut set = ElementSet::new();

    for pattern in IMPORTS.iter() {
        for caps in pattern.captures_iter(content) {
            let module = &caps[1];
            let line = find_line(content, quoted_specifier(content, &caps));
            set.insert(Element::new(ElementKind::Import, module, line));
        }
    }

    for caps in CLASS.captures_iter(content) {
        let name = &caps[1];
        let line = find_line(content, &format!("class {}", name));
        let extends = caps.get(2).map(|m| m.as_str().to_string());
        set.insert(Element::new(ElementKind::Class, name, line).with_extends(extends));
    }

    generic::extract_functions(content, &mut set);

    for pattern in COMPONENTS.iter() {
        for caps in pattern.captures_iter(content) {
            let name = &caps[1];
            if set.contains(ElementKind::Class, name) || set.contains(ElementKind::Function, name) {
                continue;
            }
            let line = find_line(content, match_literal(&caps[0]));
            set.insert(Element::new(ElementKind::Component, name, line));
        }
    }

    set.into_elements()
}

/// The module specifier together with its surrounding quotes.
fn quoted_specifier<'a>(content: &'a str, caps: &Captures<'a>) -> &'a str {
    match caps.get(1) {
        // quotes are single ASCII bytes on either side of the capture
        Some(m) if m.start() > 0 && m.end() < content.len() => &content[m.start() - 1..m.end() + 1],
        Some(m) => m.as_str(),
        None => "",
    }
}
