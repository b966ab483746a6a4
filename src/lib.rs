//! Foundry OCR front end
//!
//! Resolves where the image bytes come from (file path, stdin, base64
//! literal, base64 over stdin), hands them to the external OCR engine and
//! routes the JSON result to stdout or a file.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod vision;
