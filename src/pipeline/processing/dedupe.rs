use std::collections::HashSet;

use crate::types::{columns, Table};

/// Removes rows with a repeated normalized email, keeping the first
/// occurrence and preserving the relative order of survivors. Rows with a
/// blank or missing email are dropped. The kept row's email is rewritten to
/// its trimmed lowercase form so every surviving row carries the normalized
/// address.
pub fn dedupe_rows(table: Table) -> Table {
    let total = table.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept: Table = Vec::with_capacity(total);

    for mut row in table {
        let email = row.get_trimmed(columns::EMAIL).to_lowercase();
        if email.is_empty() || !seen.insert(email.clone()) {
            continue;
        }
        row.set(columns::EMAIL, email);
        kept.push(row);
    }

    crate::observability::metrics::dedupe::rows_kept(kept.len());
    crate::observability::metrics::dedupe::rows_dropped(total - kept.len());
    kept
}
