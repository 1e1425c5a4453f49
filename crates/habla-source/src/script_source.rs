use crate::source_trait::TranscriptSource;
use async_trait::async_trait;
use habla_core::{RecognitionResult, SourceError};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Replays utterances from a text file, one per line.
///
/// Fields are `|`-separated: the first is the transcript, any following
/// fields are alternative hypotheses. Blank lines are skipped. Every line is
/// emitted as a final result.
pub struct ScriptSource {
    path: Mutex<Option<PathBuf>>,
    emit_count: AtomicUsize,
}

impl ScriptSource {
    pub fn new() -> Self {
        Self {
            path: Mutex::new(None),
            emit_count: AtomicUsize::new(0),
        }
    }

    pub fn emit_count(&self) -> usize {
        self.emit_count.load(Ordering::Relaxed)
    }
}

impl Default for ScriptSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for ScriptSource {
    fn name(&self) -> &str {
        "script"
    }

    async fn initialize(&mut self, config: toml::Value) -> Result<(), SourceError> {
        let path = config
            .get("path")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                SourceError::InitializationFailed("missing 'path' in config".to_string())
            })?;
        *self.path.lock().unwrap() = Some(PathBuf::from(path));
        Ok(())
    }

    async fn run(
        &self,
        sender: mpsc::UnboundedSender<RecognitionResult>,
    ) -> Result<(), SourceError> {
        let path = self
            .path
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| SourceError::ReadFailed("not initialized".to_string()))?;

        let content = std::fs::read_to_string(&path)
            .map_err(|e| SourceError::ReadFailed(format!("{}: {e}", path.display())))?;

        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split('|').map(str::trim);
            let transcript = fields.next().unwrap_or_default().to_string();
            let alternatives: Vec<String> = fields.map(str::to_string).collect();

            let result = RecognitionResult {
                transcript,
                alternatives,
                source_id: String::new(),
                timestamp: index as f64,
                is_final: true,
            };
            if sender.send(result).is_err() {
                // Receiver gone, stop replaying.
                break;
            }
            self.emit_count.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), SourceError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_config(path: &str) -> toml::Value {
        toml::Value::Table({
            let mut t = toml::map::Map::new();
            t.insert("path".to_string(), toml::Value::String(path.to_string()));
            t
        })
    }

    #[test]
    fn test_script_source_name() {
        assert_eq!(ScriptSource::new().name(), "script");
    }

    #[tokio::test]
    async fn test_script_source_initialize_missing_path_fails() {
        let mut source = ScriptSource::new();
        let result = source.initialize(toml::Value::Table(Default::default())).await;
        match result {
            Err(SourceError::InitializationFailed(msg)) => assert!(msg.contains("path")),
            _ => panic!("expected InitializationFailed"),
        }
    }

    #[tokio::test]
    async fn test_script_source_run_before_initialize_fails() {
        let source = ScriptSource::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        match source.run(tx).await {
            Err(SourceError::ReadFailed(_)) => {}
            _ => panic!("expected ReadFailed"),
        }
    }

    #[tokio::test]
    async fn test_script_source_emits_lines() {
        let dir = std::env::temp_dir().join("habla_script_source_lines");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("script.txt");
        std::fs::write(&path, "perro\n\nel gato | gato\n").unwrap();

        let mut source = ScriptSource::new();
        source
            .initialize(path_config(&path.to_string_lossy()))
            .await
            .unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        source.run(tx).await.unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.transcript, "perro");
        assert!(first.alternatives.is_empty());
        assert!(first.is_final);

        let second = rx.recv().await.unwrap();
        assert_eq!(second.transcript, "el gato");
        assert_eq!(second.alternatives, vec!["gato".to_string()]);

        assert!(rx.recv().await.is_none());
        assert_eq!(source.emit_count(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_script_source_missing_file_errors() {
        let mut source = ScriptSource::new();
        source
            .initialize(path_config("/nonexistent/script.txt"))
            .await
            .unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        match source.run(tx).await {
            Err(SourceError::ReadFailed(msg)) => assert!(msg.contains("script.txt")),
            _ => panic!("expected ReadFailed"),
        }
    }

    #[test]
    fn test_script_source_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScriptSource>();
    }
}
