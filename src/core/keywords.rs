//! Localized keyword vocabulary.
//!
//! A [`KeywordTable`] maps a localized token (`se`, `retorna`, `verdadeiro`)
//! to the canonical Go spelling (`if`, `return`, `true`). The table is built
//! once and shared read-only by every translator.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

/// Localized spelling of the package-declaration keyword.
pub const PACKAGE_KEYWORD: &str = "pacote";

/// Localized spelling of the import keyword.
pub const IMPORT_KEYWORD: &str = "importa";

/// Brazilian Portuguese to Go entries.
const PT_BR_ENTRIES: &[(&str, &str)] = &[
    // Keywords
    ("quebra", "break"),
    ("caso", "case"),
    ("canal", "chan"),
    ("const", "const"),
    ("continua", "continue"),
    ("padrao", "default"),
    ("adia", "defer"),
    ("senao", "else"),
    ("atravessa", "fallthrough"),
    ("para", "for"),
    ("func", "func"),
    ("vai", "go"),
    ("vaipara", "goto"),
    ("se", "if"),
    ("importa", "import"),
    ("interface", "interface"),
    ("mapa", "map"),
    ("pacote", "package"),
    ("intervalo", "range"),
    ("retorna", "return"),
    ("seleciona", "select"),
    ("estrutura", "struct"),
    ("escolhe", "switch"),
    ("tipo", "type"),
    ("var", "var"),
    // Builtins
    ("principal", "main"),
    ("imprime", "print"),
    ("imprimeln", "println"),
    ("novo", "new"),
    ("cria", "make"),
    ("comprimento", "len"),
    ("capacidade", "cap"),
    ("anexa", "append"),
    ("copia", "copy"),
    ("deleta", "delete"),
    ("panico", "panic"),
    ("recupera", "recover"),
    // Predeclared values
    ("verdadeiro", "true"),
    ("falso", "false"),
    ("nulo", "nil"),
];

static PT_BR: LazyLock<KeywordTable> =
    LazyLock::new(|| KeywordTable::from_entries(PT_BR_ENTRIES.iter().copied()));

/// Immutable localized → canonical token mapping.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    entries: HashMap<String, String>,
}

impl KeywordTable {
    /// The process-wide pt-BR table.
    pub fn pt_br() -> &'static KeywordTable {
        &PT_BR
    }

    /// Build a table from `(source, target)` pairs.
    ///
    /// Keys must be unique. A repeated key keeps the last target.
    pub fn from_entries<I, S, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let mut map = HashMap::new();
        for (source, target) in entries {
            let previous = map.insert(source.into(), target.into());
            debug_assert!(previous.is_none(), "duplicate keyword entry");
        }
        KeywordTable { entries: map }
    }

    /// Look up the canonical spelling for a localized token.
    pub fn translate(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Canonical spelling of the package-declaration keyword.
    pub fn package_keyword(&self) -> &str {
        self.translate(PACKAGE_KEYWORD).unwrap_or("package")
    }

    /// Number of localized keywords in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by localized token.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect::<BTreeMap<_, _>>()
            .into_iter()
    }

    /// Canonical → localized mapping.
    ///
    /// Lossy when two localized tokens share a target; check
    /// [`is_injective`](Self::is_injective) before relying on a round trip.
    pub fn reverse(&self) -> KeywordTable {
        let mut map = HashMap::with_capacity(self.entries.len());
        for (source, target) in self.iter() {
            map.insert(target.to_string(), source.to_string());
        }
        KeywordTable { entries: map }
    }

    /// Whether every target token is produced by exactly one source token.
    pub fn is_injective(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.entries.len());
        self.entries.values().all(|target| seen.insert(target.as_str()))
    }
}
