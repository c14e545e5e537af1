//! Background job plumbing: runs one processing job on a spawned task and
//! streams its lifecycle to the caller over a channel.

use chrono::Utc;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use uuid::Uuid;

use crate::app::process_use_case::ProcessUseCase;
use crate::infra::progress::ChannelProgress;
use crate::types::{ProgressUpdate, Table};

/// One message on a job's event stream. Every job emits zero or more
/// `Progress` events followed by exactly one terminal `Complete` or `Error`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProcessorEvent {
    Progress(ProgressUpdate),
    Complete { table: Table },
    Error { message: String },
}

/// Handle to a running job: its id, event stream and task handle.
pub struct JobHandle {
    pub job_id: Uuid,
    events: mpsc::UnboundedReceiver<ProcessorEvent>,
    join: JoinHandle<()>,
}

impl JobHandle {
    /// Next event from the job, or `None` once the stream is closed after
    /// the terminal event.
    pub async fn next_event(&mut self) -> Option<ProcessorEvent> {
        self.events.recv().await
    }

    pub fn abort(&self) {
        self.join.abort();
    }
}

/// Spawns one processing job. The returned handle outlives the call; the
/// job keeps running whether or not the caller polls it.
pub fn spawn_job(use_case: ProcessUseCase, table: Table, company_column: String) -> JobHandle {
    let job_id = Uuid::new_v4();
    let (sender, events) = mpsc::unbounded_channel();

    let progress = ChannelProgress::new(sender.clone());
    let join = tokio::spawn(async move {
        let started = Utc::now();
        info!(%job_id, rows = table.len(), "processing job started");

        let event = match use_case.run(table, &company_column, &progress).await {
            Ok(rows) => {
                let elapsed = Utc::now().signed_duration_since(started);
                info!(
                    %job_id,
                    rows = rows.len(),
                    elapsed_ms = elapsed.num_milliseconds(),
                    "processing job completed"
                );
                ProcessorEvent::Complete { table: rows }
            }
            Err(err) => {
                error!(%job_id, error = %err, "processing job failed");
                ProcessorEvent::Error {
                    message: err.to_string(),
                }
            }
        };
        // The caller may have dropped the receiver; the job still finishes.
        let _ = sender.send(event);
    });

    JobHandle {
        job_id,
        events,
        join,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::DomainClassifierPort;
    use crate::types::Row;
    use async_trait::async_trait;

    struct FixedClassifier(&'static str);

    #[async_trait]
    impl DomainClassifierPort for FixedClassifier {
        async fn classify(&self, _domain: &str) -> Result<String, String> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenClassifier;

    #[async_trait]
    impl DomainClassifierPort for BrokenClassifier {
        async fn classify(&self, _domain: &str) -> Result<String, String> {
            Err("no route to resolver".to_string())
        }
    }

    #[tokio::test]
    async fn job_streams_progress_then_complete() {
        let use_case = ProcessUseCase::with_default_collaborators(Box::new(FixedClassifier("google")));
        let table = vec![Row::from_pairs([("email", "a@x.com"), ("company", "Acme Inc.")])];

        let mut handle = spawn_job(use_case, table, "company".to_string());

        let mut saw_progress = false;
        loop {
            match handle.next_event().await {
                Some(ProcessorEvent::Progress(update)) => {
                    assert!(update.percent <= 100);
                    saw_progress = true;
                }
                Some(ProcessorEvent::Complete { table }) => {
                    assert_eq!(table.len(), 1);
                    assert_eq!(table[0].get("mxProvider"), Some("google"));
                    break;
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert!(saw_progress);
        assert!(handle.next_event().await.is_none());
    }

    #[tokio::test]
    async fn failed_job_ends_with_error_event() {
        let use_case = ProcessUseCase::with_default_collaborators(Box::new(BrokenClassifier));
        let table = vec![Row::from_pairs([("email", "a@x.com"), ("company", "Acme")])];

        let mut handle = spawn_job(use_case, table, "company".to_string());

        let mut terminal = None;
        while let Some(event) = handle.next_event().await {
            match event {
                ProcessorEvent::Progress(_) => {}
                other => {
                    terminal = Some(other);
                }
            }
        }
        match terminal {
            Some(ProcessorEvent::Error { message }) => {
                assert!(message.contains("no route to resolver"), "{}", message);
            }
            other => panic!("expected error event, got {:?}", other),
        }
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let event = ProcessorEvent::Progress(ProgressUpdate::new(50, "Processing MX records..."));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "progress");
        assert_eq!(json["percent"], 50);

        let done = ProcessorEvent::Complete { table: Table::new() };
        let json = serde_json::to_value(&done).unwrap();
        assert_eq!(json["type"], "complete");
    }
}
