//! The pipeline orchestrator: sequences every cleaning/enrichment stage over
//! one table and reports progress at fixed checkpoints.

use std::time::Instant;

use tracing::info;

use crate::app::ports::{
    ContactAssignerPort, DomainClassifierPort, ProgressPort, RowExpanderPort, TableCleanerPort,
};
use crate::error::{ProcessorError, Result};
use crate::pipeline::processing::cleanup::DefaultTableCleaner;
use crate::pipeline::processing::contacts::DefaultContactAssigner;
use crate::pipeline::processing::dedupe::dedupe_rows;
use crate::pipeline::processing::enrich::EnrichmentBatcher;
use crate::pipeline::processing::normalize::{clean_company_name, clean_domain, find_website_column};
use crate::pipeline::processing::shape::{canonicalize_row, has_multi_email_layout, DefaultRowExpander};
use crate::types::{columns, ProgressUpdate, Table};

pub struct ProcessUseCase {
    expander: Box<dyn RowExpanderPort>,
    cleaner: Box<dyn TableCleanerPort>,
    classifier: Box<dyn DomainClassifierPort>,
    assigner: Box<dyn ContactAssignerPort>,
}

impl ProcessUseCase {
    pub fn new(
        expander: Box<dyn RowExpanderPort>,
        cleaner: Box<dyn TableCleanerPort>,
        classifier: Box<dyn DomainClassifierPort>,
        assigner: Box<dyn ContactAssignerPort>,
    ) -> Self {
        Self {
            expander,
            cleaner,
            classifier,
            assigner,
        }
    }

    /// Create a use case with the default collaborators, leaving only the
    /// domain classifier to the caller.
    pub fn with_default_collaborators(classifier: Box<dyn DomainClassifierPort>) -> Self {
        Self::new(
            Box::new(DefaultRowExpander),
            Box::new(DefaultTableCleaner),
            classifier,
            Box::new(DefaultContactAssigner),
        )
    }

    /// Runs the whole pipeline over `table`. Input validation failures are
    /// raised before any progress is reported; any later failure aborts the
    /// job with no partial result.
    pub async fn run(
        &self,
        table: Table,
        company_column: &str,
        progress: &dyn ProgressPort,
    ) -> Result<Table> {
        if table.is_empty() {
            return Err(ProcessorError::InvalidInput);
        }
        if !table[0].has_column(company_column) {
            return Err(ProcessorError::MissingCompanyColumn(company_column.to_string()));
        }

        let started = Instant::now();
        crate::observability::metrics::pipeline::job_started(table.len());

        let outcome = self.run_stages(table, company_column, progress).await;

        crate::observability::metrics::pipeline::job_duration(started.elapsed().as_secs_f64());
        match &outcome {
            Ok(rows) => crate::observability::metrics::pipeline::job_completed(rows.len()),
            Err(_) => crate::observability::metrics::pipeline::job_failed(),
        }
        outcome
    }

    async fn run_stages(
        &self,
        table: Table,
        company_column: &str,
        progress: &dyn ProgressPort,
    ) -> Result<Table> {
        progress.report(ProgressUpdate::new(10, "Analyzing CSV structure..."));
        let headers: Vec<String> = table[0].columns().map(str::to_string).collect();
        let website_column = find_website_column(&headers);
        let multi_email = has_multi_email_layout(&table[0]);

        let mut rows: Table = if multi_email {
            table.iter().flat_map(|row| self.expander.expand(row)).collect()
        } else {
            table.iter().map(canonicalize_row).collect()
        };
        info!(
            "shape: {} rows after {} layout shaping",
            rows.len(),
            if multi_email { "multi-email" } else { "single-email" }
        );

        progress.report(ProgressUpdate::new(30, "Cleaning data..."));
        rows = self.cleaner.clean(rows).map_err(ProcessorError::Stage)?;

        if let Some(column) = &website_column {
            for row in &mut rows {
                let original = row.get(column).unwrap_or("").to_string();
                let cleaned = clean_domain(&original).unwrap_or_default();
                row.set(columns::ORIGINAL_WEBSITE, original);
                row.set(columns::CLEANED_WEBSITE, cleaned);
            }
        }

        progress.report(ProgressUpdate::new(40, "Removing duplicates..."));
        rows = dedupe_rows(rows);

        progress.report(ProgressUpdate::new(50, "Processing MX records..."));
        EnrichmentBatcher::new(self.classifier.as_ref())
            .enrich(&mut rows, progress)
            .await?;

        progress.report(ProgressUpdate::new(80, "Assigning alternate contacts..."));
        rows = self.assigner.assign(rows).map_err(ProcessorError::Stage)?;

        progress.report(ProgressUpdate::new(90, "Cleaning company names..."));
        for row in &mut rows {
            let cleaned = clean_company_name(row.get(company_column).unwrap_or(""));
            row.set(columns::CLEANED_COMPANY_NAME, cleaned);
        }
        crate::observability::metrics::normalize::names_cleaned(rows.len());

        rows = self.cleaner.clean(rows).map_err(ProcessorError::Stage)?;

        progress.report(ProgressUpdate::new(100, "Finalizing..."));
        Ok(rows)
    }
}
