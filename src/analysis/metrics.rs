//! Per-file metrics and the templated file summary.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Element, ElementKind, ExtractionStatus};
use crate::classify::UNKNOWN;

lazy_static! {
    /// Lines that start a comment in any of the supported comment syntaxes.
    static ref COMMENT_LINE: Regex = Regex::new(r#"^\s*(?:#|//|/\*|\*|'''|""")"#).unwrap();
}

/// Ratio at or above which a file counts as well documented.
const WELL_DOCUMENTED_RATIO: f64 = 0.2;

/// Basic size and documentation metrics for one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileMetrics {
    pub size_bytes: usize,
    pub line_count: usize,
    pub comment_count: usize,
    pub comment_ratio: f64,
}

impl FileMetrics {
    /// Measure decoded file content.
    pub fn measure(content: &str) -> Self {
        let mut line_count = 0;
        let mut comment_count = 0;
        for line in content.lines() {
            line_count += 1;
            if COMMENT_LINE.is_match(line) {
                comment_count += 1;
            }
        }

        Self {
            size_bytes: content.len(),
            line_count,
            comment_count,
            comment_ratio: comment_ratio(comment_count, line_count),
        }
    }

    /// Comment ratio as a whole percentage.
    pub fn comment_percent(&self) -> u32 {
        (self.comment_ratio * 100.0).round() as u32
    }
}

/// comment_count / line_count clamped to [0, 1], rounded to 2 decimals with
/// exact halves going to the even neighbour (1/8 gives 0.12).
pub fn comment_ratio(comment_count: usize, line_count: usize) -> f64 {
    if line_count == 0 {
        return 0.0;
    }
    let ratio = (comment_count as f64 / line_count as f64).clamp(0.0, 1.0);
    (ratio * 100.0).round_ties_even() / 100.0
}

/// Build the one-line narrative summary for a file.
///
/// The output depends only on the arguments, so identical input always yields
/// the identical string.
pub fn file_summary(
    language: &str,
    elements: &[Element],
    metrics: &FileMetrics,
    status: ExtractionStatus,
) -> String {
    let subject = if language == UNKNOWN {
        "File".to_string()
    } else {
        format!("{} file", language)
    };

    if status == ExtractionStatus::Failed {
        return format!("{} that could not be analyzed", subject);
    }

    let mut parts = vec![subject];

    if elements.is_empty() {
        parts.push("with no significant code elements".to_string());
    } else {
        let counted = [
            (ElementKind::Import, "imports"),
            (ElementKind::Class, "classes"),
            (ElementKind::Function, "functions"),
            (ElementKind::Method, "methods"),
            (ElementKind::Component, "components"),
        ];
        let described: Vec<String> = counted
            .iter()
            .filter_map(|(kind, label)| {
                let n = elements.iter().filter(|e| e.kind == *kind).count();
                (n > 0).then(|| format!("{} {}", n, label))
            })
            .collect();
        if !described.is_empty() {
            parts.push(format!("containing {}", described.join(", ")));
        }
    }

    if metrics.line_count > 0 {
        parts.push(format!("with {} lines", metrics.line_count));
    }

    if metrics.comment_ratio >= WELL_DOCUMENTED_RATIO {
        parts.push(format!(
            "well-documented ({}% comments)",
            metrics.comment_percent()
        ));
    } else if metrics.comment_ratio > 0.0 {
        parts.push(format!(
            "with some documentation ({}% comments)",
            metrics.comment_percent()
        ));
    }

    if status == ExtractionStatus::Partial {
        parts.push("(partially analyzed)".to_string());
    }

    parts.join(" ")
}
