//! Line-level detection of package and import declarations.
//!
//! These detectors never translate anything; they only recognise the
//! localized `pacote` and `importa` forms that directory mode needs for
//! regrouping files and building the module manifest.

use std::ops::Range;
use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::core::keywords::{IMPORT_KEYWORD, PACKAGE_KEYWORD};
use crate::core::lexer::{Lexer, SpanKind};

static PACKAGE_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^\s*({})\s+([\p{{L}}_][\p{{L}}\p{{N}}_]*)",
        regex::escape(PACKAGE_KEYWORD)
    ))
    .expect("package declaration pattern is valid")
});

static IMPORT_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"^\s*{}\s+(?:(?:[\p{{L}}_][\p{{L}}\p{{N}}_]*|\.)\s+)?"((?-u:[^"])*)""#,
        regex::escape(IMPORT_KEYWORD)
    ))
    .expect("import pattern is valid")
});

static IMPORT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^\s*{}\s*\(", regex::escape(IMPORT_KEYWORD)))
        .expect("import block pattern is valid")
});

/// A `pacote <name>` declaration found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDecl<'a> {
    /// Byte range of the `pacote` keyword within the line.
    pub keyword: Range<usize>,
    /// Declared package name, exactly as written.
    pub name: &'a str,
}

/// Detect a package declaration, ignoring leading whitespace.
pub fn package_decl(line: &[u8]) -> Option<PackageDecl<'_>> {
    let caps = PACKAGE_DECL.captures(line)?;
    let keyword = caps.get(1)?.range();
    let name = std::str::from_utf8(caps.get(2)?.as_bytes()).ok()?;
    Some(PackageDecl { keyword, name })
}

/// Collects import paths line by line, including `importa ( ... )` blocks.
#[derive(Debug, Default)]
pub struct ImportScanner {
    in_block: bool,
}

impl ImportScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scanner is inside an unterminated import block.
    pub fn in_block(&self) -> bool {
        self.in_block
    }

    /// Return every import path declared on `line`. Paths that are not
    /// valid UTF-8 are ignored.
    pub fn scan_line<'a>(&mut self, line: &'a [u8]) -> Vec<&'a str> {
        if self.in_block {
            return self.scan_block(line);
        }

        if let Some(m) = IMPORT_BLOCK.find(line) {
            self.in_block = true;
            return self.scan_block(&line[m.end()..]);
        }

        IMPORT_SINGLE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .and_then(|m| import_path(m.as_bytes()))
            .into_iter()
            .collect()
    }

    fn scan_block<'a>(&mut self, text: &'a [u8]) -> Vec<&'a str> {
        let mut paths = Vec::new();
        for span in Lexer::new(text) {
            match span.kind {
                SpanKind::StringLiteral => {
                    if let Some(path) = span.literal_contents().and_then(import_path) {
                        paths.push(path);
                    }
                }
                SpanKind::Other => {
                    let comment = find(span.text, b"//");
                    let code = &span.text[..comment.unwrap_or(span.text.len())];
                    if code.contains(&b')') {
                        self.in_block = false;
                        break;
                    }
                    // The rest of the line is a comment.
                    if comment.is_some() {
                        break;
                    }
                }
                _ => {}
            }
        }
        paths
    }
}

fn import_path(raw: &[u8]) -> Option<&str> {
    std::str::from_utf8(raw).ok().filter(|path| !path.is_empty())
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(lines: &[&str]) -> Vec<String> {
        let mut scanner = ImportScanner::new();
        lines
            .iter()
            .flat_map(|line| scanner.scan_line(line.as_bytes()))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_package_decl() {
        let decl = package_decl(b"pacote util").unwrap();
        assert_eq!(decl.name, "util");
        assert_eq!(decl.keyword, 0..6);

        let decl = package_decl(b"  pacote principal // app").unwrap();
        assert_eq!(decl.name, "principal");
        assert_eq!(decl.keyword, 2..8);
    }

    #[test]
    fn test_package_decl_rejects_lookalikes() {
        assert!(package_decl(b"pacotes util").is_none());
        assert!(package_decl(b"pacote").is_none());
        assert!(package_decl(b"x := pacote util").is_none());
        assert!(package_decl(b"// pacote util").is_none());
    }

    #[test]
    fn test_package_decl_with_invalid_utf8_after_name() {
        let decl = package_decl(b"pacote util // ol\xE1").unwrap();
        assert_eq!(decl.name, "util");
    }

    #[test]
    fn test_single_imports() {
        let mut scanner = ImportScanner::new();
        assert_eq!(scanner.scan_line(br#"importa "fmt""#), vec!["fmt"]);
        assert_eq!(
            scanner.scan_line(br#"importa cores "github.com/fatih/color""#),
            vec!["github.com/fatih/color"]
        );
        assert_eq!(scanner.scan_line(br#"importa . "math""#), vec!["math"]);
        assert!(scanner.scan_line(br#"imprime("importa \"x\"")"#).is_empty());
        assert!(scanner.scan_line(b"importa \"x\xFF\"").is_empty());
        assert!(!scanner.in_block());
    }

    #[test]
    fn test_import_block() {
        let mut scanner = ImportScanner::new();
        assert!(scanner.scan_line(b"importa (").is_empty());
        assert!(scanner.in_block());
        assert_eq!(scanner.scan_line(b"\t\"fmt\""), vec!["fmt"]);
        assert_eq!(
            scanner.scan_line(b"\tyaml \"github.com/go-yaml/yaml\""),
            vec!["github.com/go-yaml/yaml"]
        );
        assert!(scanner.scan_line(b")").is_empty());
        assert!(!scanner.in_block());
        assert!(scanner.scan_line(b"\t\"os\"").is_empty());
    }

    #[test]
    fn test_import_block_on_one_line() {
        let mut scanner = ImportScanner::new();
        assert_eq!(
            scanner.scan_line(br#"importa ("fmt"; "github.com/x/y") "ignorado""#),
            vec!["fmt", "github.com/x/y"]
        );
        assert!(!scanner.in_block());
    }

    #[test]
    fn test_parenthesis_in_comment_keeps_block_open() {
        let imports = scan_all(&[
            "importa (",
            "\t\"fmt\" // saida (terminal)",
            "\t// \"comentado\" )",
            "\t\"github.com/x/y\"",
            ")",
            "\"depois\"",
        ]);
        assert_eq!(imports, vec!["fmt", "github.com/x/y"]);
    }

    #[test]
    fn test_block_closes_before_trailing_comment() {
        let mut scanner = ImportScanner::new();
        scanner.scan_line(b"importa (");
        assert!(scanner.scan_line(b") // fim (do bloco").is_empty());
        assert!(!scanner.in_block());
    }
}
