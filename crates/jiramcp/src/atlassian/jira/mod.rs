pub mod comment;
pub mod issue;

use crate::atlassian::{JiraClient, JiraConfig};
use crate::prelude::{eprintln, *};

/// Jira module app - root command
#[derive(Debug, clap::Parser)]
#[command(name = "jira")]
#[command(about = "Jira issue and comment operations")]
pub struct App {
    /// Jira site URL (overrides ATLASSIAN_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Jira API token (overrides ATLASSIAN_API_TOKEN)
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Jira commands
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Get detailed information about an issue
    #[clap(name = "get")]
    Get(issue::GetOptions),

    /// Create a new issue
    #[clap(name = "create")]
    Create(issue::CreateOptions),

    /// Create a child issue under a parent issue
    #[clap(name = "create-child")]
    CreateChild(issue::CreateChildOptions),

    /// Update an issue's summary or description
    #[clap(name = "update")]
    Update(issue::UpdateOptions),

    /// Delete an issue
    #[clap(name = "delete")]
    Delete(issue::DeleteOptions),

    /// List the issue types of a project
    #[clap(name = "issue-types")]
    IssueTypes(issue::IssueTypesOptions),

    /// Manage comments on an issue
    #[command(subcommand)]
    Comment(comment::CommentCommands),
}

/// Run Jira commands
pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = JiraConfig::from_env()?.with_overrides(app.base_url, app.api_token);

    if global.verbose {
        eprintln!("Using Jira site {}", config.base_url);
    }

    let client = JiraClient::new(&config)?;

    match app.command {
        Commands::Get(options) => issue::get_handler(&client, options).await,
        Commands::Create(options) => issue::create_handler(&client, options).await,
        Commands::CreateChild(options) => issue::create_child_handler(&client, options).await,
        Commands::Update(options) => issue::update_handler(&client, options).await,
        Commands::Delete(options) => issue::delete_handler(&client, options).await,
        Commands::IssueTypes(options) => issue::issue_types_handler(&client, options).await,
        Commands::Comment(cmd) => comment::handler(&client, cmd).await,
    }
}
