//! Binary crate for the `multiweather` HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging and configuration setup
//! - The HTTP front end over `multiweather-core`

use clap::Parser;

mod cli;
mod handlers;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
