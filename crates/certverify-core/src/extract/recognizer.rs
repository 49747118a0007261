//! Text recognizers (document bytes → text).

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::ExtractionError;

/// Turns document bytes into text.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, document: &[u8]) -> Result<String, ExtractionError>;

    fn name(&self) -> &'static str;
}

/// Recognizer for documents that already are text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TextRecognizer;

#[async_trait]
impl TextRecognizer for Utf8TextRecognizer {
    async fn recognize(&self, document: &[u8]) -> Result<String, ExtractionError> {
        std::str::from_utf8(document)
            .map(String::from)
            .map_err(|e| ExtractionError::InvalidEncoding {
                message: e.to_string(),
            })
    }

    fn name(&self) -> &'static str {
        "utf8"
    }
}

/// Recognizer backed by an external OCR program.
///
/// The document is written to the program's stdin and the recognized text is
/// read from its stdout, e.g. `tesseract stdin stdout`.
#[derive(Debug, Clone)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl TextRecognizer for CommandRecognizer {
    async fn recognize(&self, document: &[u8]) -> Result<String, ExtractionError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExtractionError::Recognizer {
                message: format!("failed to spawn {}: {}", self.program, e),
            })?;

        let mut stdin = child.stdin.take().ok_or_else(|| ExtractionError::Recognizer {
            message: "recognizer stdin unavailable".to_string(),
        })?;
        let payload = document.to_vec();
        let writer = tokio::spawn(async move {
            let result = stdin.write_all(&payload).await;
            drop(stdin);
            result
        });

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ExtractionError::Timeout {
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| ExtractionError::Recognizer {
                message: format!("failed to wait for {}: {}", self.program, e),
            })?;

        match writer.await {
            Ok(Ok(())) => {}
            // The program may stop reading once it has seen enough input.
            Ok(Err(e)) => debug!(error = %e, "recognizer closed stdin early"),
            Err(e) => warn!(error = %e, "recognizer stdin writer panicked"),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractionError::Recognizer {
                message: format!(
                    "{} exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.chars().take(200).collect::<String>()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "command"
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn command_output_becomes_text() {
        let recognizer = CommandRecognizer::new("cat");
        let text = recognizer.recognize(b"Score: 88\n").await.unwrap();
        assert_eq!(text, "Score: 88\n");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error() {
        let recognizer = CommandRecognizer::new("sh").with_args(["-c", "echo boom >&2; exit 3"]);
        let err = recognizer.recognize(b"anything").await.unwrap_err();
        match err {
            ExtractionError::Recognizer { message } => assert!(message.contains("boom")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_program_is_an_error() {
        let recognizer = CommandRecognizer::new("certverify-no-such-ocr-binary");
        let err = recognizer.recognize(b"anything").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Recognizer { .. }));
    }

    #[tokio::test]
    async fn slow_program_times_out() {
        let recognizer = CommandRecognizer::new("sleep")
            .with_args(["5"])
            .with_timeout(Duration::from_millis(100));
        let err = recognizer.recognize(b"anything").await.unwrap_err();
        assert!(matches!(err, ExtractionError::Timeout { .. }));
    }
}
