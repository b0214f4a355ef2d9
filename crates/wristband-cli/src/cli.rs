//! Command line interface.

use crate::render::{self, Rendered};
use clap::{Parser, Subcommand};
use wristband_client::{RallyClient, RallyError};

/// Talk to the wristband rally server.
#[derive(Debug, Parser)]
#[command(name = "wristband", version, about)]
pub struct Cli {
    /// Rally server base URL (overrides API__BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register an email address against a wristband
    Email { tag_id: String, email: String },

    /// Register a newly dispensed wristband
    Register { tag_id: String },

    /// Record a flag collected at a station
    Flag { tag_id: String, station: u32 },

    /// Show rally statistics
    Stats,
}

impl Command {
    /// Issue the request for this command and render the reply.
    pub async fn run(&self, client: &RallyClient) -> Result<Rendered, RallyError> {
        match self {
            Command::Email { tag_id, email } => {
                let result = client.register_email(tag_id, email).await?;
                Ok(render::registration(&result))
            }
            Command::Register { tag_id } => {
                let ack = client.register_tag(tag_id).await?;
                Ok(render::acknowledgement("Tag registration", &ack))
            }
            Command::Flag { tag_id, station } => {
                let ack = client.collect_flag(tag_id, *station).await?;
                Ok(render::acknowledgement("Flag collection", &ack))
            }
            Command::Stats => {
                let stats = client.stats().await?;
                Ok(render::stats(&stats))
            }
        }
    }
}
