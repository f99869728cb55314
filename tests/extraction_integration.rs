//! Integration tests for per-file extraction.
//!
//! These tests run `analyze_file` against the fixtures in
//! `testdata/sample_project` and check elements, lines and summaries.

use std::path::PathBuf;

use codeinventory::{analyze_file, Element, ElementKind, FileAnalysis};

fn fixture(rel: &str) -> FileAnalysis {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata/sample_project")
        .join(rel);
    let content = std::fs::read_to_string(&path).expect("fixture should be readable");
    analyze_file(rel, &content)
}

fn element<'a>(file: &'a FileAnalysis, kind: ElementKind, name: &str) -> &'a Element {
    file.find(kind, name)
        .unwrap_or_else(|| panic!("{} has no {} named {:?}", file.path, kind, name))
}

fn assert_sorted(file: &FileAnalysis) {
    assert!(
        file.elements.windows(2).all(|w| w[0].line <= w[1].line),
        "elements of {} are not sorted by line",
        file.path
    );
}

// =============================================================================
// Python
// =============================================================================

#[test]
#[cfg(feature = "tree-sitter")]
fn test_python_models() {
    let file = fixture("app/models.py");
    assert_sorted(&file);

    assert_eq!(file.language, "Python");
    assert_eq!(file.line_count, 32);
    assert_eq!(file.comment_count, 2);
    assert_eq!(file.comment_ratio, 0.06);
    assert_eq!(
        file.imports,
        vec![
            "json",
            "from dataclasses import dataclass",
            "from dataclasses import field"
        ]
    );
    assert_eq!(file.classes, vec!["User", "Admin"]);
    assert_eq!(file.functions, vec!["load_users"]);

    let user = element(&file, ElementKind::Class, "User");
    assert_eq!(user.line, 9);
    assert_eq!(user.bases, Some(Vec::new()));
    assert_eq!(
        user.methods.as_deref(),
        Some(&["to_json".to_string(), "is_admin".to_string()][..])
    );

    let admin = element(&file, ElementKind::Class, "Admin");
    assert_eq!(admin.bases.as_deref(), Some(&["User".to_string()][..]));
    assert_eq!(admin.methods.as_deref(), Some(&["grant".to_string()][..]));

    let load = element(&file, ElementKind::Function, "load_users");
    assert_eq!(load.line, 26);
    assert_eq!(
        load.params.as_deref(),
        Some(&["path".to_string(), "strict".to_string()][..])
    );

    // nested helper and methods are never top-level functions
    assert!(file.find(ElementKind::Function, "parse").is_none());
    assert!(file.find(ElementKind::Function, "grant").is_none());

    let role = element(&file, ElementKind::Variable, "DEFAULT_ROLE");
    assert_eq!(role.line, 5);
    assert!(file.find(ElementKind::Variable, "name").is_none());

    assert_eq!(
        file.summary,
        "Python file containing 3 imports, 2 classes, 1 functions with 32 lines with some documentation (6% comments)"
    );
}

#[test]
#[cfg(feature = "tree-sitter")]
fn test_python_main() {
    let file = fixture("app/main.py");
    assert_eq!(
        file.imports,
        vec![
            "json",
            "sys",
            "from app.models import Admin",
            "from app.models import load_users"
        ]
    );
    assert_eq!(file.functions, vec!["main"]);
    assert_eq!(element(&file, ElementKind::Variable, "VERBOSE").line, 6);
    assert_eq!(
        element(&file, ElementKind::Function, "main").params.as_deref(),
        Some(&["argv".to_string()][..])
    );
}

#[test]
fn test_python_syntax_error_uses_patterns() {
    let file = fixture("app/broken.py");
    assert_sorted(&file);

    assert_eq!(file.imports, vec!["import os"]);
    assert_eq!(file.classes, vec!["Leftover"]);
    assert_eq!(file.functions, vec!["broken"]);
    assert_eq!(element(&file, ElementKind::Class, "Leftover").line, 6);
    assert!(!file.summary.contains("partially"));
}

// =============================================================================
// JavaScript / TypeScript
// =============================================================================

#[test]
fn test_jsx_components() {
    let file = fixture("web/components.jsx");
    assert_sorted(&file);

    assert_eq!(file.language, "React JSX");
    assert_eq!(file.imports, vec!["react", "./styles.css"]);
    assert_eq!(file.classes, vec!["Dashboard"]);
    assert_eq!(file.functions, vec!["formatLabel"]);
    assert_eq!(file.names_of(ElementKind::Component), vec!["Counter"]);

    let dashboard = element(&file, ElementKind::Class, "Dashboard");
    assert_eq!(dashboard.extends.as_deref(), Some("React.Component"));
    assert_eq!(dashboard.line, 9);
    assert_eq!(element(&file, ElementKind::Component, "Counter").line, 4);

    assert_eq!(
        file.summary,
        "React JSX file containing 2 imports, 1 classes, 1 functions, 1 components with 17 lines"
    );
}

#[test]
fn test_typescript_module() {
    let file = fixture("web/api.ts");
    assert_eq!(file.language, "TypeScript");
    assert_eq!(file.imports, vec!["axios", "qs"]);
    assert_eq!(file.functions, vec!["fetchUsers", "toIds"]);
    assert_eq!(element(&file, ElementKind::Import, "qs").line, 2);
    assert_eq!(element(&file, ElementKind::Function, "toIds").line, 9);
}

// =============================================================================
// Java
// =============================================================================

#[test]
fn test_java_service() {
    let file = fixture("java/UserService.java");
    assert_sorted(&file);

    assert_eq!(element(&file, ElementKind::Package, "com.example.users").line, 1);
    assert_eq!(file.imports, vec!["java.util.ArrayList", "java.util.List"]);

    let class = element(&file, ElementKind::Class, "UserService");
    assert_eq!(class.line, 9);
    assert_eq!(class.extends.as_deref(), Some("BaseService"));
    assert_eq!(class.implements.as_deref(), Some(&["Service".to_string()][..]));

    assert_eq!(file.names_of(ElementKind::Method), vec!["add", "all"]);
    assert!(file.functions.is_empty());
    assert_eq!(file.comment_count, 3);
    assert_eq!(
        file.summary,
        "Java file containing 2 imports, 1 classes, 2 methods with 19 lines with some documentation (16% comments)"
    );
}

// =============================================================================
// Generic patterns
// =============================================================================

#[test]
fn test_go_generic() {
    let file = fixture("cmd/server.go");
    assert_sorted(&file);

    assert_eq!(file.language, "Go");
    assert_eq!(file.imports, vec!["import ("]);
    assert_eq!(file.functions, vec!["Start", "main"]);
    assert_eq!(element(&file, ElementKind::Function, "Start").line, 13);
    assert_eq!(file.comment_count, 1);
}

#[test]
fn test_markdown_has_no_elements() {
    let file = fixture("README.md");
    assert_eq!(file.language, "Markdown");
    assert!(file.elements.is_empty());
    assert_eq!(file.line_count, 3);
    assert!(file
        .summary
        .starts_with("Markdown file with no significant code elements with 3 lines"));
}

#[test]
fn test_adversarial_input_never_panics() {
    let inputs = [
        "",
        "\n\n\n",
        "class",
        "import",
        "def (",
        "function\u{0}(",
        "x = = =",
        "\u{FFFD}\u{FFFD} = 1",
        "class A extends",
        "const = () =>",
    ];
    for path in ["a.py", "a.js", "A.java", "a.go", "a.unknown"] {
        for input in inputs {
            let file = analyze_file(path, input);
            assert_eq!(file.path, path);
            assert!(!file.language.is_empty());
            assert!((0.0..=1.0).contains(&file.comment_ratio));
            assert_sorted(&file);
        }
    }
}
