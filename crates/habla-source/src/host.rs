use crate::registry::SourceRegistry;
use crate::source_trait::TranscriptSource;
use habla_core::{RecognitionResult, SourceError};
use tokio::sync::mpsc;

struct PendingSource {
    id: String,
    source: Box<dyn TranscriptSource>,
}

/// Owns running transcript sources and merges their output into one stream,
/// stamping each result with its source id.
pub struct SourceHost {
    pending: Vec<PendingSource>,
    result_tx: Option<mpsc::UnboundedSender<RecognitionResult>>,
    result_rx: Option<mpsc::UnboundedReceiver<RecognitionResult>>,
    task_handles: Vec<tokio::task::JoinHandle<()>>,
}

impl SourceHost {
    pub fn new() -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            pending: Vec::new(),
            result_tx: Some(result_tx),
            result_rx: Some(result_rx),
            task_handles: Vec::new(),
        }
    }

    pub fn take_result_receiver(&mut self) -> Option<mpsc::UnboundedReceiver<RecognitionResult>> {
        self.result_rx.take()
    }

    pub async fn add_source(
        &mut self,
        id: &str,
        plugin_name: &str,
        config: toml::Value,
        registry: &SourceRegistry,
    ) -> Result<(), SourceError> {
        let mut source = registry.create(plugin_name)?;
        source.initialize(config).await?;
        self.pending.push(PendingSource {
            id: id.to_string(),
            source,
        });
        Ok(())
    }

    pub fn start(&mut self) {
        // Give each task its own sender and drop ours, so the merged stream
        // closes once every source is exhausted.
        let result_tx = self
            .result_tx
            .take()
            .expect("start() called but sources already started");
        let pending = std::mem::take(&mut self.pending);
        for PendingSource { id, source } in pending {
            let shared_tx = result_tx.clone();

            let handle = tokio::spawn(async move {
                let (inner_tx, mut inner_rx) = mpsc::unbounded_channel();
                let run_id = id.clone();
                let run_handle = tokio::spawn(async move {
                    if let Err(e) = source.run(inner_tx).await {
                        tracing::error!(source_id = %run_id, "source run error: {e}");
                    }
                    let _ = source.shutdown().await;
                });

                loop {
                    tokio::select! {
                        maybe_result = inner_rx.recv() => {
                            match maybe_result {
                                Some(mut result) => {
                                    result.source_id = id.clone();
                                    if shared_tx.send(result).is_err() {
                                        break;
                                    }
                                }
                                None => break,
                            }
                        }
                        // Downstream receiver dropped; stop even if the
                        // source is blocked waiting for input.
                        _ = shared_tx.closed() => break,
                    }
                }

                run_handle.abort();
                let _ = run_handle.await;
                tracing::debug!(source_id = %id, "source finished");
            });
            self.task_handles.push(handle);
        }
    }

    pub async fn shutdown(&mut self) {
        let handles = std::mem::take(&mut self.task_handles);
        for handle in handles {
            let _ = handle.await;
        }
    }
}

impl Default for SourceHost {
    fn default() -> Self {
        Self::new()
    }
}
