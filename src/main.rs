//! foundry-ocr - OCR front end backed by an external recognition engine
//!
//! Reads an image from a file, stdin, or a base64 payload and prints the
//! engine's structured JSON result.

use foundry_ocr::cli::{self, Resolution};
use foundry_ocr::commands;
use foundry_ocr::config::Config;
use foundry_ocr::error::Error;
use foundry_ocr::vision::CommandRecognizer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(run(args).await);
}

async fn run(args: Vec<String>) -> i32 {
    let request = match cli::resolve(&args) {
        Ok(Resolution::Usage) => {
            eprint!("{}", cli::USAGE);
            return 0;
        }
        Ok(Resolution::Run(request)) => request,
        Err(e) => {
            eprintln!("{}", e);
            if matches!(e, Error::MissingImagePath) {
                eprint!("{}", cli::USAGE);
            }
            return e.exit_code();
        }
    };

    let recognizer = match Config::load()
        .and_then(|config| CommandRecognizer::new(&config, request.lang.clone()))
    {
        Ok(recognizer) => recognizer,
        Err(e) => {
            eprintln!("{}", e);
            return e.exit_code();
        }
    };

    match commands::execute(&request, &recognizer, tokio::io::stdin()).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}
