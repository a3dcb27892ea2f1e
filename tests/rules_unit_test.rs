//! Rule-level tests for the rewrite catalog, driven through the public
//! `transform` interface.

use mysql2pg::convert::{transform, transform_with_report, Scope, RULES};

#[test]
fn test_use_line_deleted_adjacent_untouched() {
    let input = "SELECT 1;\nUSE dial_a_drink;\nSELECT 2;\n";
    let output = transform(input);

    assert!(!output.contains("dial_a_drink"));
    assert!(output.contains("SELECT 1;"));
    assert!(output.contains("SELECT 2;"));
    // Deleted line content, newline preserved as an empty line.
    assert_eq!(output, "SELECT 1;\n\nSELECT 2;\n");
}

#[test]
fn test_use_line_case_insensitive() {
    assert_eq!(transform("use shop;\n"), "\n");
    assert_eq!(transform("USE shop;\n"), "\n");
}

#[test]
fn test_all_session_lines_deleted() {
    let input = "\
CREATE DATABASE shop;
USE shop;
SET SQL_MODE = \"NO_AUTO_VALUE_ON_ZERO\";
SET time_zone = \"+00:00\";
SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT;
SET NAMES utf8mb4;
LOCK TABLES orders WRITE;
UNLOCK TABLES;
SELECT 1;
";
    let output = transform(input);

    assert!(!output.contains("CREATE DATABASE"));
    assert!(!output.to_uppercase().contains("USE SHOP"));
    assert!(!output.contains("SQL_MODE"));
    assert!(!output.contains("time_zone"));
    assert!(!output.contains("CHARACTER_SET_CLIENT"));
    assert!(!output.contains("NAMES"));
    assert!(!output.contains("LOCK TABLES"));
    assert!(output.contains("SELECT 1;"));
}

#[test]
fn test_backticks_stripped_content_preserved() {
    let input = "CREATE TABLE `order_items` (`order_id` int(11));";
    let output = transform(input);

    assert!(!output.contains('`'));
    assert!(output.contains("order_items"));
    assert!(output.contains("order_id"));
}

#[test]
fn test_integer_width_rules() {
    assert_eq!(transform("int(11)"), "INTEGER");
    assert_eq!(transform("INT(3)"), "INTEGER");
    assert_eq!(transform("bigint(20)"), "BIGINT");
    assert_eq!(transform("smallint(6)"), "SMALLINT");
    assert_eq!(transform("tinyint(1)"), "SMALLINT");
    assert_eq!(transform("mediumint(9)"), "INTEGER");
}

#[test]
fn test_string_width_rules() {
    // varchar and char keep their width, text drops it.
    assert_eq!(transform("varchar(255)"), "VARCHAR(255)");
    assert_eq!(transform("VARCHAR(40)"), "VARCHAR(40)");
    assert_eq!(transform("char(36)"), "CHAR(36)");
    assert_eq!(transform("text(500)"), "TEXT");
    assert_eq!(transform("name text"), "name text");
}

#[test]
fn test_trigger_clause_and_datetime() {
    let input = "`updated` datetime NOT NULL ON UPDATE CURRENT_TIMESTAMP";
    assert_eq!(transform(input), "updated TIMESTAMP NOT NULL");

    let input = "`updated` datetime DEFAULT current_timestamp() ON UPDATE current_timestamp()";
    assert_eq!(transform(input), "updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP");
}

#[test]
fn test_current_timestamp_call_normalized() {
    assert_eq!(transform("current_timestamp()"), "CURRENT_TIMESTAMP");
    assert_eq!(transform("CURRENT_TIMESTAMP()"), "CURRENT_TIMESTAMP");
    assert_eq!(transform("NOW()"), "CURRENT_TIMESTAMP");
    // Already-bare keyword is untouched.
    assert_eq!(transform("CURRENT_TIMESTAMP"), "CURRENT_TIMESTAMP");
}

#[test]
fn test_enum_degradation() {
    assert_eq!(transform("status enum('open')"), "status VARCHAR(50)");
    assert_eq!(transform("status enum('open','closed')"), "status VARCHAR(50)");
    assert_eq!(
        transform("status ENUM('a','b','c','d')"),
        "status VARCHAR(50)"
    );
    assert_eq!(
        transform("status enum('a','b','c','d','e','f')"),
        "status VARCHAR(100)"
    );
}

#[test]
fn test_table_options_stripped() {
    let input = "CREATE TABLE t (id int(11)) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;";
    let output = transform(input);

    assert!(!output.contains("ENGINE"));
    assert!(!output.contains("InnoDB"));
    assert!(!output.contains("CHARSET"));
    assert!(output.contains("CREATE TABLE t (id INTEGER)"));
    assert!(output.ends_with(';'));
}

#[test]
fn test_myisam_and_collate_stripped() {
    let output = transform("CREATE TABLE t (id int(11)) ENGINE=MyISAM COLLATE=utf8mb4_unicode_ci;");
    assert!(!output.contains("MyISAM"));
    assert!(!output.contains("COLLATE"));
}

#[test]
fn test_auto_increment_naive_replacement() {
    let output = transform("id int(11) NOT NULL AUTO_INCREMENT");
    assert_eq!(output, "id INTEGER NOT NULL SERIAL");

    // Documented naive behavior: the token is replaced anywhere, even in
    // plain text.
    assert_eq!(
        transform("-- the AUTO_INCREMENT counter"),
        "-- the SERIAL counter"
    );
}

#[test]
fn test_large_text_collapse() {
    assert_eq!(transform("body longtext"), "body TEXT");
    assert_eq!(transform("body MEDIUMTEXT"), "body TEXT");
    assert_eq!(transform("body TinyText"), "body TEXT");
}

#[test]
fn test_start_transaction_renamed() {
    assert_eq!(transform("START TRANSACTION;"), "BEGIN;");
    assert_eq!(transform("start transaction;"), "BEGIN;");
}

#[test]
fn test_conditional_comments_removed() {
    let input = "/*!40101 SET @OLD_CHARACTER_SET_CLIENT=@@CHARACTER_SET_CLIENT */;\n/*!40103 SET TIME_ZONE='+00:00' */;\nSELECT 1;\n";
    let output = transform(input);

    assert!(!output.contains("/*!"));
    assert!(!output.contains("40101"));
    assert!(output.contains("SELECT 1;"));
}

#[test]
fn test_no_match_is_noop() {
    let input = "SELECT id, name FROM customers WHERE id = 42;\n";
    assert_eq!(transform(input), input);
    assert_eq!(transform(""), "");
}

#[test]
fn test_second_pass_idempotent() {
    let input = "\
CREATE TABLE `orders` (
  `id` int(11) NOT NULL AUTO_INCREMENT,
  `status` enum('new','paid','shipped'),
  `placed_at` datetime DEFAULT current_timestamp(),
  `notes` longtext
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;
START TRANSACTION;
";
    let once = transform(input);
    let twice = transform(&once);

    // Dialect-neutral constructs survive a second pass unchanged.
    assert_eq!(twice, once);
    assert!(once.contains("INTEGER"));
    assert!(once.contains("SERIAL"));
    assert!(once.contains("TIMESTAMP"));
    assert!(once.contains("BEGIN;"));
}

#[test]
fn test_catalog_order_is_specific_before_general() {
    // The enum catch-all must come after the arity-specific patterns, and
    // backtick stripping before any type rule.
    let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();

    let backticks = names.iter().position(|n| *n == "backticks").unwrap();
    let int_width = names.iter().position(|n| *n == "int-width").unwrap();
    assert!(backticks < int_width);

    let enum_4 = names.iter().position(|n| *n == "enum-4").unwrap();
    let enum_any = names.iter().position(|n| *n == "enum-any").unwrap();
    assert!(enum_4 < enum_any);

    let engine = names.iter().position(|n| *n == "engine-innodb").unwrap();
    let auto_inc = names.iter().position(|n| *n == "auto-increment").unwrap();
    assert!(engine < auto_inc);
}

#[test]
fn test_line_rules_are_line_scoped() {
    for rule in RULES.iter() {
        match rule.name {
            "create-database" | "use-database" | "sql-mode" | "time-zone"
            | "old-character-set" | "set-names" | "lock-tables" | "unlock-tables" => {
                assert_eq!(rule.scope, Scope::Line, "rule {}", rule.name);
            }
            _ => assert_eq!(rule.scope, Scope::Occurrence, "rule {}", rule.name),
        }
    }
}

#[test]
fn test_report_counts_every_fired_rule() {
    let (_, hits) = transform_with_report("USE a;\nUSE b;\n`x` int(11)\n");

    let use_hits = hits.iter().find(|h| h.name == "use-database").unwrap();
    assert_eq!(use_hits.count, 2);
    let tick_hits = hits.iter().find(|h| h.name == "backticks").unwrap();
    assert_eq!(tick_hits.count, 1);
}
