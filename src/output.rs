//! Result routing: stdout or a named file.

use crate::error::Result;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Write the recognition result. A named file is fully replaced with exactly
/// the result text; stdout gets the text followed by a single newline.
pub async fn write_result(out_file: Option<&Path>, text: &str) -> Result<()> {
    match out_file {
        Some(path) => {
            tracing::debug!(path = %path.display(), "writing result to file");
            tokio::fs::write(path, text).await?;
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}
