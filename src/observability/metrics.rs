//! Simple metrics module for the contact refinery pipeline.
//!
//! Provides a straightforward API for recording metrics using the standard
//! Prometheus naming conventions. Metrics are recorded through the `metrics`
//! facade; installing an exporter is up to the embedding application.

use std::fmt;

/// Enum representing all metric names used in the system.
/// This eliminates magic strings and provides compile-time safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Pipeline job metrics
    PipelineJobsStarted,
    PipelineJobsCompleted,
    PipelineJobsFailed,
    PipelineRowsIn,
    PipelineRowsOut,
    PipelineJobDuration,

    // Row shaping metrics
    ShapeRowsExpanded,

    // Dedupe metrics
    DedupeRowsKept,
    DedupeRowsDropped,

    // Enrichment metrics
    EnrichBatchesProcessed,
    EnrichCacheHits,
    EnrichCacheMisses,
    EnrichLookupErrors,

    // Alternate contact metrics
    ContactsAlternatesAssigned,

    // Name normalization metrics
    NormalizeNamesCleaned,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::PipelineJobsStarted => "refinery_pipeline_jobs_started_total",
            MetricName::PipelineJobsCompleted => "refinery_pipeline_jobs_completed_total",
            MetricName::PipelineJobsFailed => "refinery_pipeline_jobs_failed_total",
            MetricName::PipelineRowsIn => "refinery_pipeline_rows_in_total",
            MetricName::PipelineRowsOut => "refinery_pipeline_rows_out_total",
            MetricName::PipelineJobDuration => "refinery_pipeline_job_duration_seconds",
            MetricName::ShapeRowsExpanded => "refinery_shape_rows_expanded_total",
            MetricName::DedupeRowsKept => "refinery_dedupe_rows_kept_total",
            MetricName::DedupeRowsDropped => "refinery_dedupe_rows_dropped_total",
            MetricName::EnrichBatchesProcessed => "refinery_enrich_batches_processed_total",
            MetricName::EnrichCacheHits => "refinery_enrich_cache_hits_total",
            MetricName::EnrichCacheMisses => "refinery_enrich_cache_misses_total",
            MetricName::EnrichLookupErrors => "refinery_enrich_lookup_errors_total",
            MetricName::ContactsAlternatesAssigned => "refinery_contacts_alternates_assigned_total",
            MetricName::NormalizeNamesCleaned => "refinery_normalize_names_cleaned_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod pipeline {
    use super::MetricName;

    /// Record a job starting, with its input row count
    pub fn job_started(rows_in: usize) {
        ::metrics::counter!(MetricName::PipelineJobsStarted.as_str()).increment(1);
        ::metrics::counter!(MetricName::PipelineRowsIn.as_str()).increment(rows_in as u64);
    }

    /// Record a successful job, with its output row count
    pub fn job_completed(rows_out: usize) {
        ::metrics::counter!(MetricName::PipelineJobsCompleted.as_str()).increment(1);
        ::metrics::counter!(MetricName::PipelineRowsOut.as_str()).increment(rows_out as u64);
    }

    /// Record a failed job
    pub fn job_failed() {
        ::metrics::counter!(MetricName::PipelineJobsFailed.as_str()).increment(1);
    }

    /// Record total job duration
    pub fn job_duration(secs: f64) {
        ::metrics::histogram!(MetricName::PipelineJobDuration.as_str()).record(secs);
    }
}

pub mod shape {
    use super::MetricName;

    /// Record rows produced by multi-email expansion
    pub fn rows_expanded(count: usize) {
        ::metrics::counter!(MetricName::ShapeRowsExpanded.as_str()).increment(count as u64);
    }
}

pub mod dedupe {
    use super::MetricName;

    pub fn rows_kept(count: usize) {
        ::metrics::counter!(MetricName::DedupeRowsKept.as_str()).increment(count as u64);
    }

    pub fn rows_dropped(count: usize) {
        ::metrics::counter!(MetricName::DedupeRowsDropped.as_str()).increment(count as u64);
    }
}

pub mod enrich {
    use super::MetricName;

    pub fn batch_processed() {
        ::metrics::counter!(MetricName::EnrichBatchesProcessed.as_str()).increment(1);
    }

    pub fn cache_hit() {
        ::metrics::counter!(MetricName::EnrichCacheHits.as_str()).increment(1);
    }

    pub fn cache_miss() {
        ::metrics::counter!(MetricName::EnrichCacheMisses.as_str()).increment(1);
    }

    pub fn lookup_error() {
        ::metrics::counter!(MetricName::EnrichLookupErrors.as_str()).increment(1);
    }
}

pub mod contacts {
    use super::MetricName;

    pub fn alternates_assigned(count: usize) {
        ::metrics::counter!(MetricName::ContactsAlternatesAssigned.as_str())
            .increment(count as u64);
    }
}

pub mod normalize {
    use super::MetricName;

    pub fn names_cleaned(count: usize) {
        ::metrics::counter!(MetricName::NormalizeNamesCleaned.as_str()).increment(count as u64);
    }
}
