//! Language classification for source files.
//!
//! Classification runs three lookups in order and never fails:
//! 1. the primary extension table
//! 2. filename/lexer detection (well-known file names and secondary extensions)
//! 3. MIME guessing, accepting only `text/*`
//!
//! Anything left over is [`UNKNOWN`].

pub mod gate;

use std::path::Path;

use phf::phf_map;

pub use gate::{is_binary, is_text_bytes, SAMPLE_SIZE};

/// Label for files no lookup recognizes.
pub const UNKNOWN: &str = "Unknown";

/// Label for files recognized only through their `text/*` MIME type.
pub const PLAIN_TEXT: &str = "Text";

/// Primary extension table (lowercase, with the dot).
static CODE_EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    ".py" => "Python",
    ".js" => "JavaScript",
    ".jsx" => "React JSX",
    ".ts" => "TypeScript",
    ".tsx" => "React TSX",
    ".html" => "HTML",
    ".css" => "CSS",
    ".scss" => "SCSS",
    ".sass" => "Sass",
    ".less" => "Less",
    ".java" => "Java",
    ".c" => "C",
    ".cpp" => "C++",
    ".h" => "C/C++ Header",
    ".hpp" => "C++ Header",
    ".cs" => "C#",
    ".go" => "Go",
    ".rb" => "Ruby",
    ".php" => "PHP",
    ".swift" => "Swift",
    ".kt" => "Kotlin",
    ".rs" => "Rust",
    ".scala" => "Scala",
    ".sh" => "Shell",
    ".bash" => "Bash",
    ".sql" => "SQL",
    ".r" => "R",
    ".md" => "Markdown",
    ".json" => "JSON",
    ".yaml" => "YAML",
    ".yml" => "YAML",
    ".xml" => "XML",
    ".toml" => "TOML",
    ".dart" => "Dart",
    ".lua" => "Lua",
};

/// Lexer names for well-known file names without a telling extension.
static LEXER_FILENAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "makefile" => "Makefile",
    "gnumakefile" => "Makefile",
    "dockerfile" => "Docker",
    "containerfile" => "Docker",
    "cmakelists.txt" => "CMake",
    "gemfile" => "Ruby",
    "rakefile" => "Ruby",
    "podfile" => "Ruby",
    "vagrantfile" => "Ruby",
    "jenkinsfile" => "Groovy",
    "sconstruct" => "Python",
    "sconscript" => "Python",
    "build.bazel" => "Python",
    "workspace" => "Python",
    "pkgbuild" => "Bash",
    ".bashrc" => "Bash",
    ".bash_profile" => "Bash",
    ".profile" => "Bash",
    ".zshrc" => "Bash",
    ".vimrc" => "VimL",
    ".gitconfig" => "INI",
    ".editorconfig" => "INI",
    ".gitignore" => "Text only",
    ".dockerignore" => "Text only",
};

/// Lexer names for extensions outside the primary table.
static LEXER_EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    ".pyi" => "Python",
    ".pyw" => "Python",
    ".mjs" => "JavaScript",
    ".cjs" => "JavaScript",
    ".mts" => "TypeScript",
    ".cts" => "TypeScript",
    ".cc" => "C++",
    ".cxx" => "C++",
    ".hh" => "C++",
    ".hxx" => "C++",
    ".m" => "Objective-C",
    ".mm" => "Objective-C++",
    ".kts" => "Kotlin",
    ".groovy" => "Groovy",
    ".gradle" => "Groovy",
    ".pl" => "Perl",
    ".pm" => "Perl",
    ".ex" => "Elixir",
    ".exs" => "Elixir",
    ".erl" => "Erlang",
    ".hs" => "Haskell",
    ".ml" => "OCaml",
    ".fs" => "F#",
    ".clj" => "Clojure",
    ".vue" => "Vue",
    ".svelte" => "Svelte",
    ".zsh" => "Bash",
    ".fish" => "Fish",
    ".ps1" => "PowerShell",
    ".bat" => "Batchfile",
    ".ini" => "INI",
    ".cfg" => "INI",
    ".proto" => "Protocol Buffer",
    ".graphql" => "GraphQL",
    ".tf" => "Terraform",
    ".rst" => "reStructuredText",
    ".tex" => "TeX",
    ".vim" => "VimL",
    ".zig" => "Zig",
    ".nim" => "Nim",
    ".jl" => "Julia",
    ".v" => "Verilog",
    ".vhd" => "VHDL",
    ".asm" => "NASM",
    ".s" => "GAS",
    ".htm" => "HTML",
    ".svg" => "XML",
};

/// Lowercased extension including the leading dot, e.g. ".py".
fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Look up a language in the primary extension table only.
pub fn language_for_extension(path: &Path) -> Option<&'static str> {
    let ext = dotted_extension(path)?;
    CODE_EXTENSIONS.get(ext.as_str()).copied()
}

/// Lexer detection keyed by file name.
fn lexer_for_filename(path: &Path) -> Option<&'static str> {
    let name = path.file_name().and_then(|n| n.to_str())?.to_lowercase();
    if let Some(lang) = LEXER_FILENAMES.get(name.as_str()) {
        return Some(*lang);
    }
    let ext = dotted_extension(path)?;
    LEXER_EXTENSIONS.get(ext.as_str()).copied()
}

/// MIME guessing from the path; only `text/*` types are accepted.
fn text_mime(path: &Path) -> Option<&'static str> {
    let mime = mime_guess::from_path(path).first()?;
    (mime.type_() == mime_guess::mime::TEXT).then_some(PLAIN_TEXT)
}

/// Classify a file path into a language label.
///
/// Total and deterministic: always returns a label, [`UNKNOWN`] when nothing
/// matches.
pub fn classify(path: &Path) -> &'static str {
    language_for_extension(path)
        .or_else(|| lexer_for_filename(path))
        .or_else(|| text_mime(path))
        .unwrap_or(UNKNOWN)
}

/// Whether a file on disk should be analyzed: readable text with a known language.
pub fn is_code_file(path: &Path) -> bool {
    if !path.is_file() || is_binary(path) {
        return false;
    }
    classify(path) != UNKNOWN
}

/// Number of entries in the primary extension table.
pub fn known_extension_count() -> usize {
    CODE_EXTENSIONS.len()
}
