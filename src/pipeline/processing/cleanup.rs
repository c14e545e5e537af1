//! Generic table cleanup: value repair plus column pruning.

use crate::app::ports::TableCleanerPort;
use crate::types::{Row, Table};

/// Placeholder values treated as absent data.
const JUNK_VALUES: [&str; 7] = ["n/a", "na", "null", "undefined", "none", "-", "--"];

/// Idempotent structural/value cleanup. Trims every value, blanks known-bad
/// placeholders, drops blank-named columns and columns that are blank in
/// every row. Runs twice per job: after row shaping and again after all
/// enrichment, since later stages introduce new columns needing the same
/// treatment.
pub struct DefaultTableCleaner;

impl DefaultTableCleaner {
    fn repair_value(value: &str) -> String {
        let trimmed = value.trim();
        if JUNK_VALUES.iter().any(|junk| trimmed.eq_ignore_ascii_case(junk)) {
            String::new()
        } else {
            trimmed.to_string()
        }
    }
}

impl TableCleanerPort for DefaultTableCleaner {
    fn clean(&self, table: Table) -> Result<Table, String> {
        let repaired: Table = table
            .into_iter()
            .map(|row| {
                Row::from_pairs(
                    row.iter()
                        .map(|(name, value)| (name, Self::repair_value(value))),
                )
            })
            .collect();

        // Columns worth keeping: named, and populated in at least one row.
        let mut kept_columns: Vec<String> = Vec::new();
        for row in &repaired {
            for (name, _) in row.iter() {
                if name.trim().is_empty() || kept_columns.iter().any(|c| c == name) {
                    continue;
                }
                if repaired.iter().any(|r| !r.get_trimmed(name).is_empty()) {
                    kept_columns.push(name.to_string());
                }
            }
        }

        let pruned: Table = repaired
            .into_iter()
            .map(|row| {
                Row::from_pairs(
                    row.iter()
                        .filter(|(name, _)| kept_columns.iter().any(|c| c == name))
                        .map(|(name, value)| (name, value.to_string())),
                )
            })
            .collect();

        Ok(pruned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::TableCleanerPort;

    #[test]
    fn trims_values_and_blanks_placeholders() {
        let table = vec![Row::from_pairs([
            ("email", "  a@x.com "),
            ("phone", "N/A"),
            ("title", "null"),
        ])];

        let cleaned = DefaultTableCleaner.clean(table).unwrap();
        assert_eq!(cleaned[0].get("email"), Some("a@x.com"));
        // phone/title held only placeholders, so the columns are pruned.
        assert!(!cleaned[0].has_column("phone"));
        assert!(!cleaned[0].has_column("title"));
    }

    #[test]
    fn keeps_column_populated_anywhere() {
        let table = vec![
            Row::from_pairs([("email", "a@x.com"), ("phone", "")]),
            Row::from_pairs([("email", "b@x.com"), ("phone", "555")]),
        ];

        let cleaned = DefaultTableCleaner.clean(table).unwrap();
        assert_eq!(cleaned[0].get("phone"), Some(""));
        assert_eq!(cleaned[1].get("phone"), Some("555"));
    }

    #[test]
    fn drops_blank_named_columns() {
        let table = vec![Row::from_pairs([("", "stray"), ("email", "a@x.com")])];
        let cleaned = DefaultTableCleaner.clean(table).unwrap();
        assert_eq!(cleaned[0].len(), 1);
        assert_eq!(cleaned[0].get("email"), Some("a@x.com"));
    }

    #[test]
    fn is_idempotent() {
        let table = vec![
            Row::from_pairs([("email", " a@x.com"), ("junk", "-"), ("name", "Ada ")]),
            Row::from_pairs([("email", "b@x.com"), ("junk", "--"), ("name", "")]),
        ];

        let once = DefaultTableCleaner.clean(table).unwrap();
        let twice = DefaultTableCleaner.clean(once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_table_stays_empty() {
        assert!(DefaultTableCleaner.clean(Table::new()).unwrap().is_empty());
    }
}
