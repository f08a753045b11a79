//! File logging example
//!
//! Loads logger settings from JSON and writes to the console and to a file.
//! The file copy is rendered without colour codes.
//!
//! Run with: cargo run --example file_logging

use rust_rich_logger::prelude::*;

const SETTINGS: &str = r#"{
    "min_level": "debug",
    "renderer": {
        "timestamp_format": "Iso8601",
        "level_styles": {
            "debug": "dim",
            "info": "bold blue",
            "warning": "reverse yellow",
            "error": "bold white on red",
            "critical": "blink bold red"
        },
        "highlight_rules": [
            { "name": "item", "pattern": "\\bitem \\d+/\\d+\\b", "style": "underline cyan" }
        ]
    }
}"#;

fn main() -> Result<()> {
    println!("=== Rust Rich Logger - File Logging Example ===\n");

    let settings = LoggerSettings::from_json(SETTINGS)?;

    let console = Logger::from_settings(&settings)?;
    let file = Logger::builder()
        .settings(&settings)?
        .colors(false)
        .sink(WriterSink::append_file("application.log")?)
        .build();

    println!("1. Logging to both console and file:");
    for logger in [&console, &file] {
        logger.info("Application started");
        logger.debug("Loading configuration...");
        logger.warning("Using default settings for some options");
        logger.error("Failed to load optional plugin");
    }

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        for logger in [&console, &file] {
            logger.bind("worker", i % 2).info(format!("Processing item {}/5", i));
        }
    }

    file.flush()?;
    console.flush()?;

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the uncoloured output");

    Ok(())
}
