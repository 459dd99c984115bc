#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod adf;
mod atlassian;
mod error;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Jira issues and comments for LLM coding agents, with markdown converted to Atlassian Document Format"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "JIRAMCP_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Jira issue and comment operations
    Jira(crate::atlassian::jira::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),

    /// Convert between markdown and Atlassian Document Format
    ADF(crate::adf::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Jira(sub_app) => crate::atlassian::jira::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
        SubCommands::ADF(sub_app) => crate::adf::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
