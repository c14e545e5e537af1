//! CSV ingest and export for contact tables.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::types::{Row, Table};

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Picks the delimiter whose count in the header line is highest. Ties and
/// delimiter-free headers fall back to the comma.
pub fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in DELIMITER_CANDIDATES {
        let count = header.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Parses CSV text into a table, one row per record, columns in header
/// order. Records shorter than the header get empty values for the missing
/// columns; values beyond the header are ignored.
pub fn parse_table(text: &str) -> Result<Table> {
    if text.trim().is_empty() {
        return Ok(Table::new());
    }

    let delimiter = detect_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    debug!(
        delimiter = %(delimiter as char),
        columns = headers.len(),
        "parsed csv header"
    );

    let mut table = Table::new();
    for record in reader.records() {
        let record = record?;
        let row = Row::from_pairs(
            headers
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), record.get(i).unwrap_or("").to_string())),
        );
        table.push(row);
    }
    Ok(table)
}

/// Serializes a table back to comma-delimited CSV. The header is the union
/// of all row columns in first-seen order; rows missing a column emit an
/// empty value there. An empty table serializes to an empty string.
pub fn table_to_csv(table: &Table) -> Result<String> {
    if table.is_empty() {
        return Ok(String::new());
    }

    let mut headers: Vec<String> = Vec::new();
    for row in table {
        for name in row.columns() {
            if !headers.iter().any(|h| h == name) {
                headers.push(name.to_string());
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in table {
        let record: Vec<&str> = headers
            .iter()
            .map(|name| row.get(name).unwrap_or(""))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn read_table(path: &Path) -> Result<Table> {
    let text = fs::read_to_string(path)?;
    parse_table(&text)
}

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let csv = table_to_csv(table)?;
    fs::write(path, csv)?;
    Ok(())
}
