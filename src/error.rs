//! Error types for foundry-ocr

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing image path.")]
    MissingImagePath,

    #[error("Missing base64 string after --base64.")]
    MissingBase64Value,

    #[error("When using --stdin --base64, do not also pass a file path.")]
    ConflictingInput,

    #[error("Base64 decode failed: {0}")]
    Base64Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("OCR engine error: {0}")]
    Engine(String),
}

impl Error {
    /// Process exit code for this failure: 2 for argument/usage errors,
    /// 3 for base64 decode failures, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingImagePath | Error::MissingBase64Value | Error::ConflictingInput => 2,
            Error::Base64Decode(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
