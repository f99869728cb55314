//! Language-neutral pattern extraction.
//!
//! Used for every language without a dedicated strategy and as the fallback
//! for Python files that do not parse. The patterns have no notion of strings,
//! comments or nesting: a declaration inside a docstring is reported like any
//! other, and a construct matched by two families is reported by both.

use lazy_static::lazy_static;
use regex::Regex;

use super::ElementSet;
use crate::analysis::lines::{find_line, match_literal};
use crate::analysis::{Element, ElementKind};

/// Maximum number of distinct variables reported per file.
pub const MAX_VARIABLES: usize = 10;

lazy_static! {
    /// Leading-line import statements.
    static ref IMPORT: Regex = Regex::new(
        r"(?m)^[ \t]*(?:import|from|require|using|include|#include)\s+[^\s;]+"
    ).unwrap();

    /// Leading-line class/interface/struct declarations with an optional superclass.
    static ref CLASS: Regex = Regex::new(
        r"(?m)^[ \t]*(?:(?:export|default|public|private|protected|internal|abstract|final|sealed|static|partial|pub(?:\([^)]*\))?)\s+)*(class|interface|struct)\s+(\w+)(?:\s*<[^>{\n]*>)?(?:\s+extends\s+([\w.]+))?"
    ).unwrap();

    /// Function signatures, in priority order. Each pattern captures the name in group 1.
    static ref FUNCTION_FAMILY: Vec<Regex> = vec![
        // def/function/func/fn/sub/procedure/method NAME (Go receivers allowed)
        Regex::new(r"(?m)^[ \t]*(?:(?:pub(?:\([^)]*\))?|export|default|async|static|public|private|protected|local|unsafe|extern)\s+)*(?:def|function\*?|func|fn|sub|procedure|method)\s+(?:\([^)\n]*\)\s*)?(\w+)").unwrap(),
        // var/let/const NAME = function
        Regex::new(r"(?m)^[ \t]*(?:export\s+)?(?:var|let|const)\s+(\w+)\s*=\s*(?:async\s+)?function\b").unwrap(),
        // NAME = (...) =>
        Regex::new(r"(?m)^[ \t]*(?:export\s+)?(?:(?:var|let|const)\s+)?(\w+)\s*=\s*(?:async\s+)?\([^)]*\)\s*=>").unwrap(),
        // NAME: function
        Regex::new(r"(?m)^[ \t]*(\w+)\s*:\s*(?:async\s+)?function\b").unwrap(),
    ];

    /// Leading-line single-name assignment (not a comparison).
    static ref VARIABLE: Regex = Regex::new(r"(?m)^[ \t]*(\w+)[ \t]*=[^=]").unwrap();
}

/// Run the generic pattern families over `content`.
pub fn extract(content: &str) -> Vec<Element> {
    let mut set = ElementSet::new();

    for m in IMPORT.find_iter(content) {
        let statement = statement_line(content, m.start());
        if statement.is_empty() {
            continue;
        }
        let line = find_line(content, statement);
        set.insert(Element::new(ElementKind::Import, statement, line));
    }

    for caps in CLASS.captures_iter(content) {
        let keyword = &caps[1];
        let name = &caps[2];
        let line = find_line(content, &format!("{} {}", keyword, name));
        let extends = caps.get(3).map(|m| m.as_str().to_string());
        set.insert(Element::new(ElementKind::Class, name, line).with_extends(extends));
    }

    extract_functions(content, &mut set);

    for caps in VARIABLE.captures_iter(content) {
        if set.count(ElementKind::Variable) >= MAX_VARIABLES {
            break;
        }
        let name = &caps[1];
        let line = find_line(content, match_literal(&caps[0]));
        if line > 0 {
            set.insert(Element::new(ElementKind::Variable, name, line));
        }
    }

    set.into_elements()
}

/// Apply the function family; earlier patterns win for a given name.
pub(crate) fn extract_functions(content: &str, set: &mut ElementSet) {
    for pattern in FUNCTION_FAMILY.iter() {
        for caps in pattern.captures_iter(content) {
            let name = &caps[1];
            let line = find_line(content, match_literal(&caps[0]));
            set.insert(Element::new(ElementKind::Function, name, line));
        }
    }
}

/// The trimmed text of the line containing byte offset `pos`.
fn statement_line(content: &str, pos: usize) -> &str {
    // the match may start with blank indentation; skip to the keyword
    let rest = &content[pos..];
    let start = pos + (rest.len() - rest.trim_start().len());
    let end = content[start..]
        .find('\n')
        .map(|i| start + i)
        .unwrap_or(content.len());
    content[start..end].trim()
}
