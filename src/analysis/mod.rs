//! Per-file structural analysis.
//!
//! Turns the decoded content of one file into a [`FileAnalysis`]:
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ path+content │────▶│ classify     │────▶│ Strategy     │
//! └──────────────┘     └──────────────┘     │ (py/js/java/ │
//!                                           │  generic)    │
//!                                           └──────┬───────┘
//!                                                  ▼
//!                      ┌──────────────┐     ┌──────────────┐
//!                      │ FileAnalysis │◀────│ metrics +    │
//!                      └──────────────┘     │ summary      │
//!                                           └──────────────┘
//! ```
//!
//! Analysis never fails: a strategy that panics is replaced by the generic
//! patterns, and if those panic too the file is reported with no elements.

mod facts;
pub mod languages;
pub mod lines;
pub mod metrics;

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

pub use facts::{
    sort_elements, Element, ElementKind, Extraction, ExtractionStatus, FileAnalysis,
};
pub use languages::Strategy;
pub use metrics::{file_summary, FileMetrics};

use crate::classify;
use facts::project_names;

/// Analyze one file's decoded content.
///
/// `path` is used for classification and copied into the result verbatim.
pub fn analyze_file(path: &str, content: &str) -> FileAnalysis {
    let language = classify::classify(Path::new(path));
    let extraction = extract_guarded(path, language, content);
    let metrics = FileMetrics::measure(content);
    let summary = file_summary(language, &extraction.elements, &metrics, extraction.status);

    let elements = extraction.elements;
    FileAnalysis {
        path: path.to_string(),
        language: language.to_string(),
        size_bytes: metrics.size_bytes,
        line_count: metrics.line_count,
        comment_count: metrics.comment_count,
        comment_ratio: metrics.comment_ratio,
        imports: project_names(&elements, ElementKind::Import),
        classes: project_names(&elements, ElementKind::Class),
        functions: project_names(&elements, ElementKind::Function),
        elements,
        summary,
    }
}

/// Analyze raw bytes, replacing invalid UTF-8 sequences with U+FFFD.
pub fn analyze_bytes(path: &str, bytes: &[u8]) -> FileAnalysis {
    let content = String::from_utf8_lossy(bytes);
    analyze_file(path, &content)
}

fn extract_guarded(path: &str, language: &str, content: &str) -> Extraction {
    extract_with(path, Strategy::for_language(language), content, Strategy::extract)
}

/// Run `run` for `strategy`, recovering from panics with the generic patterns.
fn extract_with<F>(path: &str, strategy: Strategy, content: &str, run: F) -> Extraction
where
    F: Fn(Strategy, &str) -> Extraction,
{
    let primary = panic::catch_unwind(AssertUnwindSafe(|| run(strategy, content)));
    if let Ok(extraction) = primary {
        return extraction;
    }

    if strategy == Strategy::Generic {
        tracing::warn!(path, "pattern extraction failed");
        return Extraction::failed();
    }

    tracing::warn!(
        path,
        strategy = strategy.as_str(),
        "extraction failed, using pattern extraction"
    );
    match panic::catch_unwind(AssertUnwindSafe(|| run(Strategy::Generic, content))) {
        Ok(fallback) => Extraction::partial(fallback.elements),
        Err(_) => {
            tracing::warn!(path, "pattern extraction failed");
            Extraction::failed()
        }
    }
}
