//! Binary crate for the `clouds` terminal client.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Driving the weather session lifecycle
//! - Human-friendly output formatting

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
