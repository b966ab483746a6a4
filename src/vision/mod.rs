//! Recognition collaborator seam.
//!
//! The actual OCR happens in an external engine process; this module defines
//! the trait the dispatcher talks to and the JSON rendering shared by
//! implementations.

pub mod engine;

pub use engine::CommandRecognizer;

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncRead;

/// Byte stream handed to the streaming overload.
pub type ByteStream = Box<dyn AsyncRead + Send + Unpin>;

/// The external recognition collaborator: image in, JSON text out.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Recognize an image file; the implementation opens the path itself.
    async fn recognize_path(&self, path: &Path, indented: bool) -> Result<String>;

    /// Recognize image bytes arriving as a stream.
    async fn recognize_stream(&self, stream: ByteStream, indented: bool) -> Result<String>;

    /// Recognize an in-memory image buffer.
    async fn recognize_bytes(&self, bytes: &[u8], indented: bool) -> Result<String>;
}

/// Normalize an engine response into a JSON string, compact or indented.
pub fn render_json(response: &str, indented: bool) -> Result<String> {
    let payload = extract_json(response);
    let value: serde_json::Value = serde_json::from_str(&payload)
        .map_err(|e| Error::Engine(format!("engine returned invalid JSON: {}", e)))?;

    let rendered = if indented {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };

    Ok(rendered)
}

/// Extract JSON from an engine response (handles markdown code blocks).
fn extract_json(response: &str) -> String {
    let response = response.trim();

    if response.starts_with("```") {
        if let Some(end) = response.rfind("```") {
            let start = response.find('\n').map(|i| i + 1).unwrap_or(0);
            if start < end {
                return response[start..end].trim().to_string();
            }
        }
    }

    response.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_compact() {
        let out = render_json("{ \"lines\": [],  \"text\": \"abc\" }", false).unwrap();
        assert_eq!(out, "{\"lines\":[],\"text\":\"abc\"}");
    }

    #[test]
    fn test_render_indented() {
        let out = render_json("{\"text\":\"abc\"}", true).unwrap();
        assert!(out.contains('\n'));
        assert!(out.contains("  \"text\": \"abc\""));
    }

    #[test]
    fn test_render_strips_code_fences() {
        let response = "```json\n{\"text\":\"abc\"}\n```";
        assert_eq!(render_json(response, false).unwrap(), "{\"text\":\"abc\"}");
    }

    #[test]
    fn test_render_rejects_non_json() {
        let err = render_json("segmentation fault", false).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("invalid JSON"));
    }
}
