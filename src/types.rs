use serde::ser::{Serialize, SerializeMap, Serializer};

/// Canonical column names used by the pipeline. Input tables may carry any
/// additional columns; those are preserved untouched through every stage.
pub mod columns {
    pub const EMAIL: &str = "email";
    pub const FULL_NAME: &str = "fullName";
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const TITLE: &str = "title";
    pub const PHONE: &str = "phone";
    pub const WEBSITE: &str = "website";
    pub const ORIGINAL_WEBSITE: &str = "original_website";
    pub const CLEANED_WEBSITE: &str = "cleaned_website";
    pub const MX_PROVIDER: &str = "mxProvider";
    pub const CLEANED_COMPANY_NAME: &str = "cleaned_company_name";
    pub const ALTERNATE_CONTACT_NAME: &str = "alternate_contact_name";
    pub const ALTERNATE_CONTACT_EMAIL: &str = "alternate_contact_email";

    /// First slot of the indexed multi-email layout (`email_1`, `email_2`, ...).
    pub const FIRST_EMAIL_SLOT: &str = "email_1";
}

/// One contact record: an insertion-ordered mapping from column name to
/// string value. Setting an existing column replaces the value in place so
/// the column order of the source file survives the pipeline; setting a new
/// column appends it at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Self::new();
        for (name, value) in pairs {
            row.set(&name.into(), value.into());
        }
        row
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a column with surrounding whitespace removed, empty string if
    /// the column is absent.
    pub fn get_trimmed(&self, name: &str) -> &str {
        self.get(name).map(str::trim).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.fields.iter().position(|(n, _)| n == name)?;
        Some(self.fields.remove(idx).1)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// An ordered sequence of rows. Row order is significant: deduplication keeps
/// the first occurrence and output order matches input order minus removals.
pub type Table = Vec<Row>;

/// A progress checkpoint reported on the job's side channel.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ProgressUpdate {
    /// Monotonically non-decreasing percentage in 0..=100.
    pub percent: u8,
    /// Human-readable stage label.
    pub stage: String,
}

impl ProgressUpdate {
    pub fn new(percent: u8, stage: impl Into<String>) -> Self {
        Self {
            percent,
            stage: stage.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place_and_appends_new() {
        let mut row = Row::from_pairs([("name", "Acme"), ("email", "a@x.com")]);
        row.set("name", "Acme Corp");
        row.set("phone", "555");

        let cols: Vec<&str> = row.columns().collect();
        assert_eq!(cols, vec!["name", "email", "phone"]);
        assert_eq!(row.get("name"), Some("Acme Corp"));
        assert_eq!(row.get("phone"), Some("555"));
    }

    #[test]
    fn get_trimmed_handles_missing_columns() {
        let row = Row::from_pairs([("email", "  a@x.com  ")]);
        assert_eq!(row.get_trimmed("email"), "a@x.com");
        assert_eq!(row.get_trimmed("missing"), "");
    }

    #[test]
    fn serializes_as_ordered_map() {
        let row = Row::from_pairs([("b", "2"), ("a", "1")]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"b":"2","a":"1"}"#);
    }
}
