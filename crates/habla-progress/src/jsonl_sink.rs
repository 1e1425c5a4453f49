use crate::sink_trait::ProgressSink;
use async_trait::async_trait;
use habla_core::{DrillEvent, SinkError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Appends one JSON object per drill event to a file.
pub struct JsonlSink {
    output_path: Mutex<Option<PathBuf>>,
    record_count: AtomicUsize,
}

impl JsonlSink {
    pub fn new() -> Self {
        Self {
            output_path: Mutex::new(None),
            record_count: AtomicUsize::new(0),
        }
    }

    pub fn record_count(&self) -> usize {
        self.record_count.load(Ordering::Relaxed)
    }
}

impl Default for JsonlSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressSink for JsonlSink {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), SinkError> {
        let path = config
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| SinkError::InitializationFailed("missing 'path' in config".to_string()))?;
        *self.output_path.lock().unwrap() = Some(PathBuf::from(path));
        Ok(())
    }

    async fn record(&self, event: &DrillEvent) -> Result<(), SinkError> {
        let guard = self.output_path.lock().unwrap();
        let path = guard
            .as_ref()
            .ok_or_else(|| SinkError::RecordFailed("not initialized".to_string()))?;

        let line = serde_json::to_string(event)
            .map_err(|e| SinkError::RecordFailed(e.to_string()))?;

        use std::io::Write;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| SinkError::RecordFailed(e.to_string()))?;

        writeln!(file, "{line}").map_err(|e| SinkError::RecordFailed(e.to_string()))?;

        self.record_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn is_healthy(&self) -> bool {
        self.output_path.lock().unwrap().is_some()
    }

    async fn shutdown(&self) -> Result<(), SinkError> {
        Ok(())
    }
}
