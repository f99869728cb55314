//! Java extraction: package, imports, type declarations and method signatures.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::ElementSet;
use crate::analysis::lines::{find_line, match_literal};
use crate::analysis::{Element, ElementKind};

lazy_static! {
    static ref PACKAGE: Regex = Regex::new(r"(?m)^[ \t]*package\s+([\w.]+)\s*;").unwrap();

    static ref IMPORT: Regex = Regex::new(
        r"(?m)^[ \t]*import\s+(?:static\s+)?([\w.]+(?:\.\*)?)\s*;"
    ).unwrap();

    /// class/interface/enum/record with optional annotations, generics,
    /// record header, extends list and implements list.
    static ref TYPE_DECL: Regex = Regex::new(
        r"(?m)^[ \t]*(?:@[\w.]+(?:\([^)]*\))?\s+)*(?:(?:public|protected|private|abstract|static|final|sealed|non-sealed|strictfp)\s+)*(class|interface|enum|record)\s+(\w+)(?:\s*<[^>{]*>)?(?:\s*\([^)]*\))?(?:\s+extends\s+([\w.]+(?:<[^>{]*>)?(?:\s*,\s*[\w.]+(?:<[^>{]*>)?)*))?(?:\s+implements\s+([^{]+))?"
    ).unwrap();

    /// Method signature; group 1 is the return type, group 2 the name.
    static ref METHOD: Regex = Regex::new(
        r"(?m)^[ \t]*(?:@[\w.]+(?:\([^)]*\))?\s+)*(?:(?:public|private|protected|static|final|abstract|synchronized|native|default|strictfp)\s+)*(?:<[^>]+>\s+)?([\w.$]+(?:<[^>]*>)?(?:\[\])*)\s+(\w+)\s*\("
    ).unwrap();
}

/// Words that can precede `name(` on a line without declaring a method.
const NON_TYPE_WORDS: &[&str] = &[
    "return", "new", "throw", "else", "case", "do", "yield", "assert", "package", "import",
    "class", "interface", "enum", "record", "extends", "implements", "public", "private",
    "protected", "static", "final", "abstract", "synchronized", "native", "default",
];

const CONTROL_WORDS: &[&str] = &[
    "if", "for", "while", "switch", "catch", "synchronized", "try", "return", "new", "super",
    "this",
];

/// Extract Java structure.
pub fn extract(content: &str) -> Vec<Element> {
    let mut set = ElementSet::new();

    if let Some(caps) = PACKAGE.captures(content) {
        let line = find_line(content, match_literal(&caps[0]));
        set.insert(Element::new(ElementKind::Package, &caps[1], line));
    }

    for caps in IMPORT.captures_iter(content) {
        let line = find_line(content, match_literal(&caps[0]));
        set.insert(Element::new(ElementKind::Import, &caps[1], line));
    }

    for caps in TYPE_DECL.captures_iter(content) {
        let name = &caps[2];
        let line = find_line(content, &format!("{} {}", &caps[1], name));
        let parents = caps
            .get(3)
            .map(|m| split_type_list(m.as_str()))
            .unwrap_or_default();
        let mut implements: Vec<String> = caps
            .get(4)
            .map(|m| split_type_list(m.as_str()))
            .unwrap_or_default();

        // an interface extends other interfaces, so they read as contracts
        let extends = if &caps[1] == "interface" {
            let mut contracts = parents;
            contracts.append(&mut implements);
            implements = contracts;
            None
        } else {
            parents
                .first()
                .map(|t| t.split('<').next().unwrap_or(t).trim().to_string())
        };

        let mut element = Element::new(ElementKind::Class, name, line).with_extends(extends);
        if !implements.is_empty() {
            element = element.with_implements(implements);
        }
        set.insert(element);
    }

    for caps in METHOD.captures_iter(content) {
        let return_type = &caps[1];
        let name = &caps[2];
        if NON_TYPE_WORDS.contains(&return_type) || CONTROL_WORDS.contains(&name) {
            continue;
        }
        let line = find_line(content, signature_literal(content, &caps));
        set.insert(Element::new(ElementKind::Method, name, line));
    }

    set.into_elements()
}

/// `Type name(` of a method match, without leading annotations or modifiers.
fn signature_literal<'a>(content: &'a str, caps: &Captures<'a>) -> &'a str {
    match (caps.get(0), caps.get(1)) {
        (Some(all), Some(ty)) => match_literal(&content[ty.start()..all.end()]),
        _ => "",
    }
}

/// Split `A, B<T, U>, C` at top-level commas.
fn split_type_list(list: &str) -> Vec<String> {
    let mut types = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in list.chars() {
        match ch {
            '<' => {
                depth += 1;
                current.push(ch);
            }
            '>' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => {
                types.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    types.push(current);

    types
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"package com.example.service;

import java.util.List;
import java.util.*;
import static org.junit.Assert.assertEquals;

public class UserService extends BaseService implements Service, Comparable<UserService> {
    private final List<User> users;

    public UserService(List<User> users) {
        this.users = users;
    }

    public List<User> findAll() {
        if (users.isEmpty()) {
            return new ArrayList<>();
        }
        return users;
    }

    private static int count(String[] args) {
        for (String a : args) {
            process(a);
        }
        return args.length;
    }
}

interface Service {
    void start();
}
"#;

    #[test]
    fn test_package_and_imports() {
        let elements = extract(SOURCE);
        let package = elements
            .iter()
            .find(|e| e.kind == ElementKind::Package)
            .unwrap();
        assert_eq!(package.name, "com.example.service");
        assert_eq!(package.line, 1);

        let imports: Vec<_> = elements
            .iter()
            .filter(|e| e.kind == ElementKind::Import)
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            imports,
            vec!["java.util.List", "java.util.*", "org.junit.Assert.assertEquals"]
        );
    }

    #[test]
    fn test_class_with_extends_and_implements() {
        let elements = extract(SOURCE);
        let class = elements.iter().find(|e| e.name == "UserService").unwrap();
        assert_eq!(class.kind, ElementKind::Class);
        assert_eq!(class.line, 7);
        assert_eq!(class.extends.as_deref(), Some("BaseService"));
        assert_eq!(
            class.implements.as_deref(),
            Some(&["Service".to_string(), "Comparable<UserService>".to_string()][..])
        );

        let service = elements
            .iter()
            .find(|e| e.name == "Service" && e.kind == ElementKind::Class)
            .unwrap();
        assert_eq!(service.implements, None);
    }

    #[test]
    fn test_methods_skip_statements() {
        let elements = extract(SOURCE);
        let methods: Vec<_> = elements
            .iter()
            .filter(|e| e.kind == ElementKind::Method)
            .map(|e| (e.name.as_str(), e.line))
            .collect();
        assert_eq!(methods, vec![("findAll", 14), ("count", 21), ("start", 30)]);
    }

    #[test]
    fn test_enum_and_record() {
        let content = "public enum Color { RED }\nrecord Point(int x, int y) implements Shape {}\n";
        let elements = extract(content);
        let names: Vec<_> = elements.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Color", "Point"]);
        assert_eq!(elements[1].implements.as_deref(), Some(&["Shape".to_string()][..]));
    }

    #[test]
    fn test_annotated_methods() {
        let content = r#"public class Task implements Runnable {
    @Override
    public void run() {}

    @Override public String toString() { return "task"; }

    @SuppressWarnings("unchecked") @Deprecated
    List<String> names() { return null; }
}
"#;
        let elements = extract(content);
        let methods: Vec<_> = elements
            .iter()
            .filter(|e| e.kind == ElementKind::Method)
            .map(|e| (e.name.as_str(), e.line))
            .collect();
        assert_eq!(methods, vec![("run", 3), ("toString", 5), ("names", 8)]);
    }

    #[test]
    fn test_interface_extends_list() {
        let content = "@FunctionalInterface\npublic interface Store<T> extends Reader<T>, Writer {\n}\nclass Cache extends Base<String> implements Store<String> {}\n";
        let elements = extract(content);

        let store = elements.iter().find(|e| e.name == "Store").unwrap();
        assert_eq!(store.line, 2);
        assert_eq!(store.extends, None);
        assert_eq!(
            store.implements.as_deref(),
            Some(&["Reader<T>".to_string(), "Writer".to_string()][..])
        );

        let cache = elements.iter().find(|e| e.name == "Cache").unwrap();
        assert_eq!(cache.extends.as_deref(), Some("Base"));
        assert_eq!(
            cache.implements.as_deref(),
            Some(&["Store<String>".to_string()][..])
        );
    }

    #[test]
    fn test_split_type_list() {
        assert_eq!(
            split_type_list(" Map<K, V>, Runnable "),
            vec!["Map<K, V>", "Runnable"]
        );
    }
}
