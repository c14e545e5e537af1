use async_trait::async_trait;

use crate::types::{ProgressUpdate, Row, Table};

/// Classifies an email domain by its mail-routing provider. Called at most
/// once per unique domain per job; must be safe to call concurrently for
/// distinct domains within a batch.
#[async_trait]
pub trait DomainClassifierPort: Send + Sync {
    async fn classify(&self, domain: &str) -> Result<String, String>;
}

/// Expands one source row of a multi-column email layout into one row per
/// populated email slot.
pub trait RowExpanderPort: Send + Sync {
    fn expand(&self, row: &Row) -> Vec<Row>;
}

/// Idempotent structural/value cleanup over the whole table. Invoked twice:
/// after row shaping and again after all enrichment.
pub trait TableCleanerPort: Send + Sync {
    fn clean(&self, table: Table) -> Result<Table, String>;
}

/// Groups rows by organization and fills in substitute contact fields.
pub trait ContactAssignerPort: Send + Sync {
    fn assign(&self, table: Table) -> Result<Table, String>;
}

/// Side channel for progress checkpoints. Reporting must not fail the job.
pub trait ProgressPort: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}
