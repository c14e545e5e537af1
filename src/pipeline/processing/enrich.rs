//! Mail-provider enrichment.
//!
//! Partitions the deduplicated table into fixed-size batches and resolves
//! each row's email domain to a provider classification through a job-scoped
//! cache. Batches run strictly sequentially; within one batch the
//! not-yet-cached domains fan out concurrently, which bounds in-flight
//! classifier calls to the batch width.

use std::collections::HashMap;

use futures::future::join_all;
use tracing::debug;

use crate::app::ports::{DomainClassifierPort, ProgressPort};
use crate::error::{ProcessorError, Result};
use crate::types::{columns, ProgressUpdate, Table};

/// Rows per batch; also the upper bound on concurrent classifier calls.
pub const BATCH_SIZE: usize = 10;

/// Job-scoped memo of lowercase email domain to provider classification.
/// Append-only for the duration of one job and discarded with it; never
/// shared across jobs.
#[derive(Debug, Default)]
pub struct DomainCache {
    entries: HashMap<String, String>,
}

impl DomainCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, domain: &str) -> Option<&str> {
        self.entries.get(domain).map(String::as_str)
    }

    /// First write wins; a domain is never reclassified within a job.
    pub fn insert(&mut self, domain: String, provider: String) {
        self.entries.entry(domain).or_insert(provider);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Derives the lookup domain from an email address: the substring after the
/// first `@`, lowercased. An address without `@` yields an empty domain.
pub fn email_domain(email: &str) -> String {
    email.split('@').nth(1).unwrap_or("").to_ascii_lowercase()
}

pub struct EnrichmentBatcher<'a> {
    classifier: &'a dyn DomainClassifierPort,
    batch_size: usize,
}

impl<'a> EnrichmentBatcher<'a> {
    pub fn new(classifier: &'a dyn DomainClassifierPort) -> Self {
        Self {
            classifier,
            batch_size: BATCH_SIZE,
        }
    }

    pub fn with_batch_size(classifier: &'a dyn DomainClassifierPort, batch_size: usize) -> Self {
        Self {
            classifier,
            batch_size: batch_size.max(1),
        }
    }

    /// Assigns `mxProvider` to every row, batch by batch. A batch completes
    /// only when every lookup in it has finished; one failed lookup fails
    /// the whole job. Progress after each batch is
    /// `50 + (batchStart / totalRows) * 30`, floored.
    pub async fn enrich(&self, table: &mut Table, progress: &dyn ProgressPort) -> Result<()> {
        let total = table.len();
        if total == 0 {
            return Ok(());
        }

        let mut cache = DomainCache::new();
        let mut processed = 0usize;

        for (batch_index, batch) in table.chunks_mut(self.batch_size).enumerate() {
            let batch_start = batch_index * self.batch_size;
            let domains: Vec<String> = batch
                .iter()
                .map(|row| email_domain(row.get_trimmed(columns::EMAIL)))
                .collect();

            // One classifier call per unique domain not yet cached.
            let mut misses: Vec<String> = Vec::new();
            for domain in &domains {
                if cache.get(domain).is_some() || misses.iter().any(|d| d == domain) {
                    crate::observability::metrics::enrich::cache_hit();
                } else {
                    crate::observability::metrics::enrich::cache_miss();
                    misses.push(domain.clone());
                }
            }

            debug!(
                "enrich: batch {} rows={} lookups={}",
                batch_index,
                batch.len(),
                misses.len()
            );

            let lookups = misses.iter().map(|domain| self.classifier.classify(domain));
            let results = join_all(lookups).await;
            for (domain, result) in misses.into_iter().zip(results) {
                match result {
                    Ok(provider) => cache.insert(domain, provider),
                    Err(cause) => {
                        crate::observability::metrics::enrich::lookup_error();
                        return Err(ProcessorError::Stage(format!(
                            "MX lookup for '{}' failed: {}",
                            domain, cause
                        )));
                    }
                }
            }

            for (row, domain) in batch.iter_mut().zip(&domains) {
                let provider = cache.get(domain).unwrap_or("").to_string();
                row.set(columns::MX_PROVIDER, provider);
            }

            processed += batch.len();
            crate::observability::metrics::enrich::batch_processed();

            let percent = (50 + batch_start * 30 / total) as u8;
            progress.report(ProgressUpdate::new(
                percent,
                format!("Processing MX records ({}/{})...", processed, total),
            ));
        }

        Ok(())
    }
}
