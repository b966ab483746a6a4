//! Dispatch: materialize the image payload, invoke the recognizer, emit the result.

use crate::cli::{InputSource, Request};
use crate::error::{Error, Result};
use crate::output::write_result;
use crate::vision::Recognizer;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Run one resolved invocation end to end.
///
/// `stdin` is whatever the process has on standard input; it is only read in
/// the stdin-backed modes.
pub async fn execute(
    request: &Request,
    recognizer: &dyn Recognizer,
    mut stdin: impl AsyncRead + Send + Unpin + 'static,
) -> Result<()> {
    let json = match &request.source {
        InputSource::File(path) => {
            tracing::debug!(path = %path.display(), "recognizing from file");
            recognizer.recognize_path(path, request.pretty).await?
        }
        InputSource::StdinImage => {
            tracing::debug!("recognizing from stdin byte stream");
            recognizer
                .recognize_stream(Box::new(stdin), request.pretty)
                .await?
        }
        InputSource::Base64Literal(text) => {
            let bytes = decode_base64(text)?;
            recognizer.recognize_bytes(&bytes, request.pretty).await?
        }
        InputSource::StdinBase64 => {
            let mut text = String::new();
            stdin.read_to_string(&mut text).await?;
            let bytes = decode_base64(&text)?;
            recognizer.recognize_bytes(&bytes, request.pretty).await?
        }
    };

    write_result(request.out_file.as_deref(), &json).await
}

/// Trim surrounding whitespace and decode a standard base64 payload.
fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::Base64Decode("empty base64 string".to_string()));
    }

    STANDARD
        .decode(trimmed)
        .map_err(|e| Error::Base64Decode(e.to_string()))
}
