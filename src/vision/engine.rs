//! External OCR engine invocation.

use super::{render_json, ByteStream, Recognizer};
use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// Recognizer that shells out to the configured OCR engine.
///
/// The path overload passes the image path as the final argument; the stream
/// and bytes overloads pipe the image into the engine's stdin. The engine
/// prints its JSON result to stdout.
#[derive(Debug)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    /// Language hint, reserved for future use.
    #[allow(dead_code)]
    lang: Option<String>,
}

impl CommandRecognizer {
    pub fn new(config: &Config, lang: Option<String>) -> Result<Self> {
        let mut parts = shell_words::split(&config.engine)
            .map_err(|e| Error::Config(format!("invalid engine command: {}", e)))?;
        if parts.is_empty() {
            return Err(Error::Config("engine command is empty".to_string()));
        }

        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
            lang,
        })
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }

    async fn finish(child: Child, indented: bool) -> Result<String> {
        let output = child.wait_with_output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Engine(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        render_json(&stdout, indented)
    }
}

#[async_trait]
impl Recognizer for CommandRecognizer {
    async fn recognize_path(&self, path: &Path, indented: bool) -> Result<String> {
        let mut cmd = self.command();
        cmd.arg(path);
        cmd.stdin(Stdio::null());

        tracing::debug!(program = %self.program, path = %path.display(), "spawning OCR engine");
        let child = cmd.spawn()?;
        Self::finish(child, indented).await
    }

    async fn recognize_stream(&self, mut stream: ByteStream, indented: bool) -> Result<String> {
        let mut cmd = self.command();
        cmd.stdin(Stdio::piped());

        tracing::debug!(program = %self.program, "spawning OCR engine for streamed input");
        let mut child = cmd.spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Engine("engine stdin unavailable".to_string()))?;
        // Feed stdin while the output pipes are drained, or an engine that
        // emits more than a pipe buffer before reading its input blocks both
        // sides forever. An engine that stops reading early is judged by its
        // exit status, not by the resulting broken pipe.
        let feeder = tokio::spawn(async move {
            let _ = tokio::io::copy(&mut stream, &mut stdin).await;
            let _ = stdin.shutdown().await;
        });

        let result = Self::finish(child, indented).await;
        let _ = feeder.await;
        result
    }

    async fn recognize_bytes(&self, bytes: &[u8], indented: bool) -> Result<String> {
        let mut cmd = self.command();
        cmd.stdin(Stdio::piped());

        tracing::debug!(program = %self.program, len = bytes.len(), "spawning OCR engine for byte buffer");
        let mut child = cmd.spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Engine("engine stdin unavailable".to_string()))?;
        let payload = bytes.to_vec();
        let feeder = tokio::spawn(async move {
            let _ = stdin.write_all(&payload).await;
            let _ = stdin.shutdown().await;
        });

        let result = Self::finish(child, indented).await;
        let _ = feeder.await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(engine: &str) -> Config {
        Config {
            engine: engine.to_string(),
        }
    }

    #[test]
    fn test_engine_command_is_split() {
        let recognizer =
            CommandRecognizer::new(&config("ocr-engine --format json"), None).unwrap();
        assert_eq!(recognizer.program, "ocr-engine");
        assert_eq!(recognizer.args, vec!["--format".to_string(), "json".to_string()]);
    }

    #[test]
    fn test_empty_engine_command_is_rejected() {
        let err = CommandRecognizer::new(&config("  "), None).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[tokio::test]
    async fn test_bytes_round_trip_through_cat() {
        // `cat` echoes the piped payload, standing in for a real engine
        let recognizer = CommandRecognizer::new(&config("cat"), None).unwrap();
        let out = recognizer
            .recognize_bytes(b"{\"text\":\"abc\"}", false)
            .await
            .unwrap();
        assert_eq!(out, "{\"text\":\"abc\"}");
    }

    #[tokio::test]
    async fn test_stream_is_piped_to_engine_stdin() {
        let recognizer = CommandRecognizer::new(&config("cat"), None).unwrap();
        let stream: ByteStream = Box::new(std::io::Cursor::new(b"{\"text\":\"abc\"}".to_vec()));
        let out = recognizer.recognize_stream(stream, false).await.unwrap();
        assert_eq!(out, "{\"text\":\"abc\"}");
    }

    #[tokio::test]
    async fn test_chatty_engine_and_large_payload_do_not_deadlock() {
        // The engine floods stderr past the pipe buffer before touching its
        // stdin; with a 1 MiB payload both pipes must move concurrently.
        let engine =
            r#"sh -c 'head -c 262144 /dev/zero | tr "\0" x >&2; cat > /dev/null; echo {}'"#;
        let recognizer = CommandRecognizer::new(&config(engine), None).unwrap();

        let payload = vec![b'a'; 1 << 20];
        let out = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            recognizer.recognize_bytes(&payload, false),
        )
        .await
        .expect("engine call did not complete")
        .unwrap();

        assert_eq!(out, "{}");
    }

    #[tokio::test]
    async fn test_missing_engine_is_an_unhandled_error() {
        let recognizer =
            CommandRecognizer::new(&config("definitely-not-an-ocr-engine-9f3a"), None).unwrap();
        let err = recognizer.recognize_bytes(b"img", false).await.unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
