//! Company-name canonicalization.
//!
//! A deterministic, pure rewrite of a raw company-name string into a
//! display-ready form. The rules form an ordered table applied strictly
//! top to bottom; reordering them changes the output.

use once_cell::sync::Lazy;
use regex::Regex;

/// Legal-entity designations stripped from the end of a name, in priority
/// order. Only the first designation matching the end of the name is removed.
const LEGAL_DESIGNATIONS: [&str; 22] = [
    "ltd",
    "llc",
    "l.l.c",
    "gmbh",
    "pvt",
    "private",
    "limited",
    "inc",
    "corporation",
    "corp",
    "co",
    "company",
    "group",
    "holdings",
    "holding",
    "solutions",
    "services",
    "technologies",
    "technology",
    "tech",
    "international",
    "intl",
];

static PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[^\]]*\]").unwrap());
static BRACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[^}]*\}").unwrap());
static MARK_GLYPHS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[®™©]").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").unwrap());
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static HYPHEN_SPACING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());
static TITLECASED_POSSESSIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"'S\b").unwrap());

/// One end-anchored pattern per designation: a leading space, the
/// designation, an optional period, optional trailing whitespace.
static DESIGNATION_SUFFIXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    LEGAL_DESIGNATIONS
        .iter()
        .map(|d| Regex::new(&format!(r"(?i) {}\.?\s*$", regex::escape(d))).unwrap())
        .collect()
});

/// Canonicalizes a raw company-name string into a cleaned display name.
/// Returns an empty string when nothing survives. Idempotent.
pub fn clean_company_name(name: &str) -> String {
    // Rule 1: empty or whitespace-only input produces an empty result.
    if name.trim().is_empty() {
        return String::new();
    }

    // Rule 2: trim and lowercase.
    let lowered = name.trim().to_lowercase();

    // Rule 3: keep only the text before the first separator.
    let mut cleaned = lowered
        .split(['.', ',', '|'])
        .next()
        .unwrap_or("")
        .trim()
        .to_string();

    // Rule 4: remove bracketed substrings together with their delimiters.
    cleaned = PARENS.replace_all(&cleaned, "").into_owned();
    cleaned = BRACKETS.replace_all(&cleaned, "").into_owned();
    cleaned = BRACES.replace_all(&cleaned, "").into_owned();

    // Rule 5: strip the first trailing legal designation that matches.
    for suffix in DESIGNATION_SUFFIXES.iter() {
        if suffix.is_match(&cleaned) {
            cleaned = suffix.replace(&cleaned, "").into_owned();
            break;
        }
    }

    // Rule 6: remove registered/trademark/copyright glyphs.
    cleaned = MARK_GLYPHS.replace_all(&cleaned, "").into_owned();

    // Rule 7: flatten remaining punctuation into single spaces and
    // normalize spacing around hyphens.
    cleaned = NON_WORD.replace_all(&cleaned, " ").into_owned();
    cleaned = WHITESPACE_RUNS.replace_all(&cleaned, " ").into_owned();
    cleaned = HYPHEN_SPACING.replace_all(&cleaned, "-").into_owned();
    let trimmed = cleaned.trim();

    // Rule 8: title-case each whitespace-separated word.
    let titled = trimmed
        .split(' ')
        .map(upper_first)
        .collect::<Vec<_>>()
        .join(" ");

    // Rule 9: repair possessives mangled by title-casing.
    TITLECASED_POSSESSIVE.replace_all(&titled, "'s").into_owned()
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_inputs() {
        assert_eq!(clean_company_name(""), "");
        assert_eq!(clean_company_name("   "), "");
        assert_eq!(clean_company_name("\t\n"), "");
    }

    #[test]
    fn strips_brackets_and_designation() {
        assert_eq!(clean_company_name("Foo (Test) Ltd."), "Foo");
        assert_eq!(clean_company_name("Bar [legacy] LLC"), "Bar");
        assert_eq!(clean_company_name("Baz {eu} GmbH"), "Baz");
    }

    #[test]
    fn truncates_at_first_separator() {
        assert_eq!(clean_company_name("Acme Inc., formerly Ajax"), "Acme");
        assert_eq!(clean_company_name("Acme | EMEA"), "Acme");
        assert_eq!(clean_company_name("Acme. The original"), "Acme");
    }

    #[test]
    fn strips_only_the_first_matching_designation() {
        // "ltd" precedes "co" in the list, so it alone is removed.
        assert_eq!(clean_company_name("acme co ltd"), "Acme Co");
        assert_eq!(clean_company_name("northwind holdings"), "Northwind");
    }

    #[test]
    fn removes_mark_glyphs_and_punctuation() {
        assert_eq!(clean_company_name("ACME\u{ae} technologies"), "Acme");
        assert_eq!(clean_company_name("Foo & Bar"), "Foo Bar");
    }

    #[test]
    fn normalizes_hyphen_spacing() {
        assert_eq!(clean_company_name("north - west partners"), "North-west Partners");
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(clean_company_name("bob's burgers llc"), "Bob S Burgers");
        assert_eq!(clean_company_name("blue  sky media"), "Blue Sky Media");
    }

    #[test]
    fn is_idempotent() {
        for raw in [
            "Foo (Test) Ltd.",
            "north - west partners",
            "ACME\u{ae} technologies",
            "Blue Sky Media",
            "",
        ] {
            let once = clean_company_name(raw);
            assert_eq!(clean_company_name(&once), once, "not idempotent for {:?}", raw);
        }
    }
}
