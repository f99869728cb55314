//! Output formatting for codeinventory results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: the `{"files": [...], "summary": {...}}` document

use std::io::Write;

use colored::*;

use crate::analysis::{ElementKind, FileAnalysis};
use crate::runner::ProjectRun;
use crate::summary::ProjectSummary;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pretty,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pretty" => Some(Format::Pretty),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Serialize a run as pretty-printed JSON.
pub fn render_json(run: &ProjectRun) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(run)?)
}

/// Write results in JSON format.
pub fn write_json<W: Write>(out: &mut W, run: &ProjectRun) -> anyhow::Result<()> {
    writeln!(out, "{}", render_json(run)?)?;
    Ok(())
}

/// Write results as colored text.
///
/// With `detailed`, every element of every file is listed.
pub fn write_pretty<W: Write>(
    out: &mut W,
    path: &str,
    run: &ProjectRun,
    detailed: bool,
) -> anyhow::Result<()> {
    // Header
    writeln!(out)?;
    writeln!(
        out,
        "  {} v{}",
        "codeinventory".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out)?;
    writeln!(out, "  {}{}", "Analyzing: ".dimmed(), path)?;
    writeln!(out)?;

    write_summary(out, &run.summary)?;

    if !run.files.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {} ({}):", "Files".bold(), run.files.len())?;
        writeln!(out)?;
        for file in &run.files {
            write_file(out, file, detailed)?;
        }
    }

    writeln!(out)?;
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &ProjectSummary) -> anyhow::Result<()> {
    writeln!(out, "  {}", summary.text)?;
    if summary.file_count == 0 {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "  {}", "Languages:".bold())?;
    let mut languages: Vec<_> = summary.languages.iter().collect();
    languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (language, count) in languages {
        let plural = if *count != 1 { "s" } else { "" };
        writeln!(out, "    {:<20} {:>5} file{}", language, count, plural)?;
    }

    if !summary.common_imports.is_empty() {
        writeln!(out)?;
        writeln!(out, "  {}", "Common imports:".bold())?;
        for import in &summary.common_imports {
            writeln!(out, "    {:>5}  {}", import.count, import.import.blue())?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "  {} {}  {} {}  {} {}  {} {}",
        "Lines:".dimmed(),
        summary.total_lines,
        "Classes:".dimmed(),
        summary.class_count,
        "Functions:".dimmed(),
        summary.function_count,
        "Elements:".dimmed(),
        summary.total_elements
    )?;
    Ok(())
}

fn write_file<W: Write>(out: &mut W, file: &FileAnalysis, detailed: bool) -> anyhow::Result<()> {
    writeln!(
        out,
        "    {}  {}",
        file.path.blue(),
        format!("[{}]", file.language).dimmed()
    )?;
    writeln!(out, "        {}", file.summary)?;

    if detailed {
        for element in &file.elements {
            let line = if element.line > 0 {
                format!(":{}", element.line)
            } else {
                String::new()
            };
            writeln!(
                out,
                "        {:<10} {}{}",
                kind_tag(element.kind),
                element.name,
                line.dimmed()
            )?;
        }
    }
    Ok(())
}

fn kind_tag(kind: ElementKind) -> ColoredString {
    match kind {
        ElementKind::Import | ElementKind::Package => kind.as_str().dimmed(),
        ElementKind::Class => kind.as_str().green(),
        ElementKind::Function | ElementKind::Method => kind.as_str().yellow(),
        ElementKind::Component => kind.as_str().magenta(),
        ElementKind::Variable => kind.as_str().normal(),
    }
}
