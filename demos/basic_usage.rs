//! Basic logger usage example
//!
//! Demonstrates the default console layout, levels, markup, highlighting and
//! bound fields.
//!
//! Run with: cargo run --example basic_usage

use rust_rich_logger::prelude::*;
use rust_rich_logger::{info, join_message};

fn main() -> Result<()> {
    println!("=== Rust Rich Logger - Basic Usage Example ===\n");

    let mut logger = Logger::builder().min_level(LogLevel::Debug).build();

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warning("This is a warning message");
    logger.error("This is an error message");
    logger.critical("This is a critical message");

    println!("\n2. Markup and automatic highlighting:");
    logger.info("[bold green]ready[/bold green] :rocket: listening on 0.0.0.0:8080");
    logger.info("cache hit ratio 0.93, fallback=None, strict=true");
    logger.warn("config file /etc/app/config.json not found, see https://example.com/docs");
    info!(logger, "escaped \\[bold] stays literal, [INFO] too, {} items", 3);

    println!("\n3. Bound fields:");
    let request = logger
        .bind("request_id", "6f1c8e52-3b0a-4c55-9d1e-2f7a8b9c0d11")
        .bind("peer", "192.168.1.20");
    request.info("request accepted");
    request.error(join_message(["upstream", "timed", "out"], " "));

    println!("\n4. Threshold:");
    logger.set_min_level(LogLevel::Warning);
    logger.info("Info message (hidden)");
    logger.warning("Warning message (visible)");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
