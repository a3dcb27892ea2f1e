//! The rewrite-rule catalog.
//!
//! Conversion is a fold of the whole dump text through an ordered list of
//! pattern substitutions. Order is load-bearing: backticks are stripped
//! before type tokens are matched, the arity-specific enum patterns run
//! before the enum catch-all, and table options are removed before the
//! AUTO_INCREMENT rewrite.

use once_cell::sync::Lazy;
use regex::Regex;

/// Whether a rule deletes whole lines or rewrites matched substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The content of every matching line is removed; the newline survives
    /// as an empty line.
    Line,
    /// Only the matched substring is replaced.
    Occurrence,
}

/// One pattern substitution applied to the whole document.
pub struct Rule {
    pub name: &'static str,
    pub scope: Scope,
    regex: Regex,
    replacement: &'static str,
}

impl Rule {
    /// Delete the content of every line beginning with `prefix` (case-insensitive).
    fn drop_line(name: &'static str, prefix: &str) -> Self {
        Self {
            name,
            scope: Scope::Line,
            regex: Regex::new(&format!(r"(?mi)^{prefix}.*$")).unwrap(),
            replacement: "",
        }
    }

    /// Rewrite every occurrence of `pattern` with `replacement`.
    fn rewrite(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            scope: Scope::Occurrence,
            regex: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    /// Apply this rule once, returning the new text and the match count.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let hits = self.regex.find_iter(text).count();
        if hits == 0 {
            return (text.to_string(), 0);
        }
        (
            self.regex.replace_all(text, self.replacement).into_owned(),
            hits,
        )
    }
}

/// The catalog, in application order.
pub static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // Versioned conditional comments are executable MySQL-only statements.
        Rule::rewrite("conditional-comment", r"(?s)/\*!\d+.*?\*/;?", ""),
        // Session and database-selection statements with no PostgreSQL counterpart.
        Rule::drop_line("create-database", "CREATE DATABASE"),
        Rule::drop_line("use-database", "USE "),
        Rule::drop_line("sql-mode", "SET SQL_MODE"),
        Rule::drop_line("time-zone", "SET time_zone"),
        Rule::drop_line("old-character-set", "SET @OLD_CHARACTER_SET"),
        Rule::drop_line("set-names", "SET NAMES"),
        Rule::drop_line("lock-tables", "LOCK TABLES"),
        Rule::drop_line("unlock-tables", "UNLOCK TABLES"),
        // Identifier quoting. Runs before the type rules so their word
        // boundaries see bare identifiers.
        Rule::rewrite("backticks", r"`([^`]+)`", "${1}"),
        // Integer display widths carry no meaning in PostgreSQL.
        Rule::rewrite("int-width", r"(?i)\bint\(\d+\)", "INTEGER"),
        Rule::rewrite("bigint-width", r"(?i)\bbigint\(\d+\)", "BIGINT"),
        Rule::rewrite("smallint-width", r"(?i)\bsmallint\(\d+\)", "SMALLINT"),
        Rule::rewrite("tinyint-width", r"(?i)\btinyint\(\d+\)", "SMALLINT"),
        Rule::rewrite("mediumint-width", r"(?i)\bmediumint\(\d+\)", "INTEGER"),
        Rule::rewrite("varchar", r"(?i)\bvarchar\((\d+)\)", "VARCHAR(${1})"),
        Rule::rewrite("char", r"(?i)\bchar\((\d+)\)", "CHAR(${1})"),
        Rule::rewrite("text-width", r"(?i)\btext\(\d+\)", "TEXT"),
        // PostgreSQL has no inline ON UPDATE column trigger.
        Rule::rewrite("on-update-call", r"(?i)\s+ON UPDATE current_timestamp\(\)", ""),
        Rule::rewrite("on-update-bare", r"(?i)\s+ON UPDATE CURRENT_TIMESTAMP", ""),
        Rule::rewrite("current-timestamp", r"(?i)current_timestamp\(\)", "CURRENT_TIMESTAMP"),
        Rule::rewrite("now", r"(?i)\bNOW\(\)", "CURRENT_TIMESTAMP"),
        Rule::rewrite("datetime", r"(?i)\bdatetime\b", "TIMESTAMP"),
        // Inline enums degrade to plain varchars; real PostgreSQL enums need
        // CREATE TYPE. Arity-specific patterns first, catch-all last.
        Rule::rewrite("enum-1", r"(?i)enum\('[^']+'\)", "VARCHAR(50)"),
        Rule::rewrite("enum-2", r"(?i)enum\('[^']+','[^']+'\)", "VARCHAR(50)"),
        Rule::rewrite("enum-3", r"(?i)enum\('[^']+','[^']+','[^']+'\)", "VARCHAR(50)"),
        Rule::rewrite(
            "enum-4",
            r"(?i)enum\('[^']+','[^']+','[^']+','[^']+'\)",
            "VARCHAR(50)",
        ),
        Rule::rewrite("enum-any", r"(?i)enum\([^)]+\)", "VARCHAR(100)"),
        // Table options run to the statement terminator, which may sit on a
        // later line.
        Rule::rewrite("engine-innodb", r"(?i)ENGINE=InnoDB[^;]*", ""),
        Rule::rewrite("engine-myisam", r"(?i)ENGINE=MyISAM[^;]*", ""),
        Rule::rewrite("default-charset", r"(?i)DEFAULT CHARSET=[^;]*", ""),
        Rule::rewrite("collate", r"(?i)COLLATE=[^;]*", ""),
        Rule::rewrite("auto-increment", r"(?i)AUTO_INCREMENT", "SERIAL"),
        Rule::rewrite("longtext", r"(?i)\bLONGTEXT\b", "TEXT"),
        Rule::rewrite("mediumtext", r"(?i)\bMEDIUMTEXT\b", "TEXT"),
        Rule::rewrite("tinytext", r"(?i)\bTINYTEXT\b", "TEXT"),
        Rule::rewrite("start-transaction", r"(?i)START TRANSACTION", "BEGIN"),
    ]
});

/// Match count for a rule that fired.
#[derive(Debug, Clone)]
pub struct RuleHit {
    pub name: &'static str,
    pub count: usize,
}

/// Apply the full catalog in order. Pure; text without any match passes
/// through unchanged.
pub fn transform(text: &str) -> String {
    transform_with_report(text).0
}

/// Apply the full catalog, also reporting how often each rule fired.
pub fn transform_with_report(text: &str) -> (String, Vec<RuleHit>) {
    let mut doc = text.to_string();
    let mut hits = Vec::new();
    for rule in RULES.iter() {
        let (next, count) = rule.apply(&doc);
        doc = next;
        if count > 0 {
            hits.push(RuleHit {
                name: rule.name,
                count,
            });
        }
    }
    (doc, hits)
}
