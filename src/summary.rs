//! Project-wide aggregation of per-file analyses.
//!
//! [`summarize_project`] is a pure function of the file list's content: the
//! ranked lists break ties by ascending name, so shuffling the input never
//! changes the output.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::analysis::FileAnalysis;

/// Number of imports listed in [`ProjectSummary::common_imports`].
pub const TOP_IMPORTS: usize = 10;

/// Number of languages listed in [`ProjectSummary::main_languages`].
pub const TOP_LANGUAGES: usize = 3;

/// Element-count thresholds for the complexity sentence.
pub mod complexity {
    pub const LARGE: usize = 1000;
    pub const MEDIUM: usize = 500;
    pub const SMALL_TO_MEDIUM: usize = 100;
}

/// Narrative used when no files were analyzed.
pub const EMPTY_TEXT: &str = "No files were analyzed.";

/// An import string and how many times it occurs across the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFrequency {
    pub import: String,
    pub count: usize,
}

/// Aggregate over all files of one run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub file_count: usize,
    pub total_lines: usize,
    /// Language label -> number of files.
    pub languages: BTreeMap<String, usize>,
    /// Top languages formatted as "Lang (count), Lang (count)".
    pub main_languages: String,
    pub class_count: usize,
    pub function_count: usize,
    pub common_imports: Vec<ImportFrequency>,
    /// Number of elements of every kind across all files.
    pub total_elements: usize,
    pub text: String,
}

/// Aggregate per-file analyses into one summary.
pub fn summarize_project(files: &[FileAnalysis]) -> ProjectSummary {
    if files.is_empty() {
        return ProjectSummary {
            text: EMPTY_TEXT.to_string(),
            ..Default::default()
        };
    }

    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    let mut imports: HashMap<&str, usize> = HashMap::new();
    let mut summary = ProjectSummary {
        file_count: files.len(),
        ..Default::default()
    };

    for file in files {
        *languages.entry(file.language.clone()).or_insert(0) += 1;
        summary.total_lines += file.line_count;
        summary.class_count += file.classes.len();
        summary.function_count += file.functions.len();
        summary.total_elements += file.elements.len();
        for import in &file.imports {
            *imports.entry(import.as_str()).or_insert(0) += 1;
        }
    }

    summary.main_languages = top_n(languages.iter().map(|(k, v)| (k.as_str(), *v)), TOP_LANGUAGES)
        .into_iter()
        .map(|(lang, count)| format!("{} ({})", lang, count))
        .collect::<Vec<_>>()
        .join(", ");

    summary.common_imports = top_n(imports.into_iter(), TOP_IMPORTS)
        .into_iter()
        .map(|(import, count)| ImportFrequency {
            import: import.to_string(),
            count,
        })
        .collect();

    summary.languages = languages;
    summary.text = narrative(&summary);
    summary
}

/// Highest counts first; equal counts in ascending name order.
fn top_n<'a>(counts: impl Iterator<Item = (&'a str, usize)>, n: usize) -> Vec<(&'a str, usize)> {
    let mut ranked: Vec<_> = counts.collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(n);
    ranked
}

fn complexity_sentence(total_elements: usize) -> &'static str {
    if total_elements > complexity::LARGE {
        "This appears to be a large, complex project."
    } else if total_elements > complexity::MEDIUM {
        "This is a medium-sized project with moderate complexity."
    } else if total_elements > complexity::SMALL_TO_MEDIUM {
        "This is a small to medium-sized project."
    } else {
        "This is a small project with relatively simple structure."
    }
}

fn narrative(summary: &ProjectSummary) -> String {
    format!(
        "Project with {} files ({} lines of code) primarily written in {}. Contains {} classes and {} functions. {}",
        summary.file_count,
        summary.total_lines,
        summary.main_languages,
        summary.class_count,
        summary.function_count,
        complexity_sentence(summary.total_elements)
    )
}
