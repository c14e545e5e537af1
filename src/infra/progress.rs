//! Progress sinks.

use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::app::ports::ProgressPort;
use crate::pipeline::tasks::ProcessorEvent;
use crate::types::ProgressUpdate;

/// Forwards every checkpoint onto a job's event channel.
pub struct ChannelProgress {
    sender: UnboundedSender<ProcessorEvent>,
}

impl ChannelProgress {
    pub fn new(sender: UnboundedSender<ProcessorEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressPort for ChannelProgress {
    fn report(&self, update: ProgressUpdate) {
        // A dropped receiver means nobody is listening anymore; the job
        // itself is unaffected.
        let _ = self.sender.send(ProcessorEvent::Progress(update));
    }
}

/// Logs checkpoints through tracing. Used where no caller consumes events.
pub struct TracingProgress;

impl ProgressPort for TracingProgress {
    fn report(&self, update: ProgressUpdate) {
        info!(percent = update.percent, stage = %update.stage, "progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn channel_progress_forwards_updates() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let progress = ChannelProgress::new(sender);

        progress.report(ProgressUpdate::new(10, "Analyzing CSV structure..."));

        match receiver.recv().await {
            Some(ProcessorEvent::Progress(update)) => {
                assert_eq!(update.percent, 10);
                assert_eq!(update.stage, "Analyzing CSV structure...");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (sender, receiver) = mpsc::unbounded_channel();
        drop(receiver);
        ChannelProgress::new(sender).report(ProgressUpdate::new(30, "Cleaning data..."));
    }
}
