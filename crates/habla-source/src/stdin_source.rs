use crate::source_trait::TranscriptSource;
use async_trait::async_trait;
use habla_core::{RecognitionResult, SourceError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Reads typed answers from standard input, one utterance per line.
///
/// Stands in for a live speech recognizer during terminal drills; ends at
/// EOF. Lines are emitted as final results with no alternatives.
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdinSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptSource for StdinSource {
    fn name(&self) -> &str {
        "stdin"
    }

    async fn initialize(&mut self, _config: toml::Value) -> Result<(), SourceError> {
        Ok(())
    }

    async fn run(
        &self,
        sender: mpsc::UnboundedSender<RecognitionResult>,
    ) -> Result<(), SourceError> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut index = 0u64;
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let result = RecognitionResult {
                        transcript: line,
                        alternatives: Vec::new(),
                        source_id: String::new(),
                        timestamp: index as f64,
                        is_final: true,
                    };
                    index += 1;
                    if sender.send(result).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => return Err(SourceError::ReadFailed(e.to_string())),
            }
        }
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), SourceError> {
        Ok(())
    }
}
