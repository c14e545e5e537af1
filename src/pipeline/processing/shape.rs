//! Row shaping: canonical-field mapping for single-email layouts and
//! expansion of indexed multi-email layouts into one row per address.

use crate::app::ports::RowExpanderPort;
use crate::types::{columns, Row};

/// True when the schema row carries the indexed multi-email layout.
pub fn has_multi_email_layout(schema_row: &Row) -> bool {
    schema_row.has_column(columns::FIRST_EMAIL_SLOT)
}

/// Maps a row into the canonical field set while retaining every original
/// column. Canonical defaults are written first and the original columns are
/// replayed over them, so on a name collision the original value wins.
pub fn canonicalize_row(row: &Row) -> Row {
    let mut shaped = Row::new();
    shaped.set(columns::EMAIL, row.get(columns::EMAIL).unwrap_or(""));
    shaped.set(columns::FULL_NAME, first_populated(row, &["full_name", columns::FULL_NAME]));
    shaped.set(columns::FIRST_NAME, first_populated(row, &["first_name", columns::FIRST_NAME]));
    shaped.set(columns::LAST_NAME, first_populated(row, &["last_name", columns::LAST_NAME]));
    shaped.set(columns::TITLE, row.get(columns::TITLE).unwrap_or(""));
    shaped.set(columns::PHONE, row.get(columns::PHONE).unwrap_or(""));
    shaped.set(columns::WEBSITE, row.get(columns::WEBSITE).unwrap_or(""));

    for (name, value) in row.iter() {
        shaped.set(name, value);
    }
    shaped
}

fn first_populated(row: &Row, names: &[&str]) -> String {
    names
        .iter()
        .filter_map(|name| row.get(name))
        .find(|value| !value.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Expands one source row of a multi-column email layout (`email_1`,
/// `email_2`, ...) into one row per populated slot. The slot value becomes
/// the row's `email`, the slot columns are removed from the expansion and
/// everything else is carried verbatim. A row with no populated slot
/// expands to nothing.
pub struct DefaultRowExpander;

impl RowExpanderPort for DefaultRowExpander {
    fn expand(&self, row: &Row) -> Vec<Row> {
        let mut slots: Vec<(usize, String, String)> = row
            .iter()
            .filter_map(|(name, value)| {
                let index = name.strip_prefix("email_")?.parse::<usize>().ok()?;
                Some((index, name.to_string(), value.to_string()))
            })
            .collect();
        slots.sort_by_key(|(index, _, _)| *index);

        let mut expanded = Vec::new();
        for (_, _, value) in &slots {
            let email = value.trim();
            if email.is_empty() {
                continue;
            }
            let mut out = row.clone();
            for (_, name, _) in &slots {
                out.remove(name);
            }
            out.set(columns::EMAIL, email);
            expanded.push(out);
        }

        crate::observability::metrics::shape::rows_expanded(expanded.len());
        expanded
    }
}
