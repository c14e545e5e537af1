//! Alternate-contact assignment within organization groups.

use std::collections::HashMap;

use crate::app::ports::ContactAssignerPort;
use crate::pipeline::processing::enrich::email_domain;
use crate::types::{columns, Row, Table};

/// Groups rows by organization and gives every member of a multi-row group a
/// substitute contact drawn from the next member in table order, so each
/// row has a fallback when its primary contact turns out to be unusable.
pub struct DefaultContactAssigner;

/// Grouping key for one row: the cleaned website when present, else the
/// email domain. Rows without either stay ungrouped.
fn organization_key(row: &Row) -> String {
    let website = row.get_trimmed(columns::CLEANED_WEBSITE);
    if !website.is_empty() {
        return website.to_string();
    }
    email_domain(row.get_trimmed(columns::EMAIL))
}

fn display_name(row: &Row) -> String {
    let full = row.get_trimmed(columns::FULL_NAME);
    if !full.is_empty() {
        return full.to_string();
    }
    let first = row.get_trimmed(columns::FIRST_NAME);
    let last = row.get_trimmed(columns::LAST_NAME);
    format!("{} {}", first, last).trim().to_string()
}

impl ContactAssignerPort for DefaultContactAssigner {
    fn assign(&self, mut table: Table) -> Result<Table, String> {
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, row) in table.iter().enumerate() {
            let key = organization_key(row);
            if key.is_empty() {
                continue;
            }
            groups.entry(key).or_default().push(idx);
        }

        let mut assigned = 0usize;
        for members in groups.values() {
            if members.len() < 2 {
                continue;
            }
            for (pos, &idx) in members.iter().enumerate() {
                let donor = members[(pos + 1) % members.len()];
                let name = display_name(&table[donor]);
                let email = table[donor].get_trimmed(columns::EMAIL).to_string();
                let row = &mut table[idx];
                row.set(columns::ALTERNATE_CONTACT_NAME, name);
                row.set(columns::ALTERNATE_CONTACT_EMAIL, email);
                assigned += 1;
            }
        }

        crate::observability::metrics::contacts::alternates_assigned(assigned);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(email: &str, full_name: &str, website: &str) -> Row {
        Row::from_pairs([
            ("email", email),
            ("fullName", full_name),
            ("cleaned_website", website),
        ])
    }

    #[test]
    fn members_of_a_group_receive_each_other() {
        let table = vec![
            row("ada@acme.com", "Ada", "acme.com"),
            row("bob@acme.com", "Bob", "acme.com"),
            row("eve@other.io", "Eve", "other.io"),
        ];

        let assigned = DefaultContactAssigner.assign(table).unwrap();
        assert_eq!(assigned[0].get("alternate_contact_name"), Some("Bob"));
        assert_eq!(assigned[0].get("alternate_contact_email"), Some("bob@acme.com"));
        assert_eq!(assigned[1].get("alternate_contact_name"), Some("Ada"));
        // A lone member of its group gets no substitute.
        assert!(!assigned[2].has_column("alternate_contact_name"));
    }

    #[test]
    fn falls_back_to_email_domain_grouping() {
        let table = vec![
            row("ada@acme.com", "Ada", ""),
            row("bob@acme.com", "Bob", ""),
        ];

        let assigned = DefaultContactAssigner.assign(table).unwrap();
        assert_eq!(assigned[0].get("alternate_contact_email"), Some("bob@acme.com"));
        assert_eq!(assigned[1].get("alternate_contact_email"), Some("ada@acme.com"));
    }

    #[test]
    fn uses_first_and_last_name_when_full_name_missing() {
        let mut first = Row::from_pairs([
            ("email", "ada@acme.com"),
            ("firstName", "Ada"),
            ("lastName", "Lovelace"),
        ]);
        first.set("cleaned_website", "acme.com");
        let second = row("bob@acme.com", "", "acme.com");

        let assigned = DefaultContactAssigner.assign(vec![first, second]).unwrap();
        assert_eq!(assigned[1].get("alternate_contact_name"), Some("Ada Lovelace"));
    }
}
