//! Jira issue operations: get, create, create child, update, delete, issue types

use clap::Args;
use jiramcp_core::atlassian::jira::{
    build_create_payload, build_update_payload, issue_query_params, transform_issue_response,
    IssueOutput, JiraCreatedIssue, JiraIssueResponse, JiraIssueTypeDetails, JiraProjectResponse,
    DEFAULT_CHILD_ISSUE_TYPE,
};
use reqwest::Method;
use serde::Deserialize;

use crate::atlassian::{issue_path, JiraClient};
use crate::prelude::{println, *};

/// Get detailed information about a Jira issue
#[derive(Args, Debug, Clone, Deserialize)]
pub struct GetOptions {
    /// Issue key (e.g., "PROJ-123")
    pub issue_key: String,

    /// Comma-separated fields to retrieve (all fields when omitted)
    #[arg(long)]
    pub fields: Option<String>,

    /// Comma-separated fields to expand (defaults to transitions,changelog,subtasks,description)
    #[arg(long)]
    pub expand: Option<String>,

    /// Output as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,
}

/// Create a new Jira issue
#[derive(Args, Debug, Clone, Deserialize)]
pub struct CreateOptions {
    /// Summary/title of the issue
    pub summary: String,

    /// Project key (e.g., "PROJ")
    #[arg(long)]
    pub project_key: String,

    /// Description in markdown
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub description: String,

    /// Issue type (e.g., Bug, Task, Story, Epic)
    #[arg(long, default_value = "Task")]
    pub issue_type: String,

    /// Output as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,
}

/// Create a child issue under an existing issue
#[derive(Args, Debug, Clone, Deserialize)]
pub struct CreateChildOptions {
    /// Parent issue key (e.g., "PROJ-123")
    pub parent_issue_key: String,

    /// Summary/title of the child issue
    pub summary: String,

    /// Description in markdown
    #[arg(long, default_value = "")]
    #[serde(default)]
    pub description: String,

    /// Issue type of the child issue
    #[arg(long, default_value = DEFAULT_CHILD_ISSUE_TYPE)]
    #[serde(
        default = "default_child_issue_type",
        deserialize_with = "blank_as_child_issue_type"
    )]
    pub issue_type: String,

    /// Output as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,
}

fn default_child_issue_type() -> String {
    DEFAULT_CHILD_ISSUE_TYPE.to_string()
}

/// Agents send `""` or `null` for "no preference"; both mean the default type
fn blank_as_child_issue_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|issue_type| !issue_type.trim().is_empty())
        .unwrap_or_else(default_child_issue_type))
}

/// Update the summary and/or description of a Jira issue
#[derive(Args, Debug, Clone, Deserialize)]
pub struct UpdateOptions {
    /// Issue key (e.g., "PROJ-123")
    pub issue_key: String,

    /// New summary
    #[arg(long)]
    pub summary: Option<String>,

    /// New description in markdown
    #[arg(long)]
    pub description: Option<String>,
}

/// Delete a Jira issue
#[derive(Args, Debug, Clone, Deserialize)]
pub struct DeleteOptions {
    /// Issue key (e.g., "PROJ-123")
    pub issue_key: String,
}

/// List the issue types available in a project
#[derive(Args, Debug, Clone, Deserialize)]
pub struct IssueTypesOptions {
    /// Project key (e.g., "PROJ")
    pub project_key: String,

    /// Output as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,
}

/// Fetch an issue and transform it into the output model
pub async fn get_issue_data(client: &JiraClient, options: &GetOptions) -> Result<IssueOutput> {
    let query = issue_query_params(options.fields.as_deref(), options.expand.as_deref());

    let issue: JiraIssueResponse = client
        .get(
            &issue_path(&options.issue_key),
            &query,
            &format!("fetch Jira issue {}", options.issue_key),
        )
        .await?;

    Ok(transform_issue_response(issue))
}

/// Create an issue from a markdown description
pub async fn create_issue_data(
    client: &JiraClient,
    options: &CreateOptions,
) -> Result<JiraCreatedIssue> {
    let payload = build_create_payload(
        &options.project_key,
        &options.summary,
        &options.description,
        &options.issue_type,
        None,
    )
    .map_err(Error::from)?;

    client
        .send_json(Method::POST, "/rest/api/3/issue", &payload, "create issue")
        .await
}

/// Create a child issue in the parent's project
///
/// The parent is fetched first to resolve its project key.
pub async fn create_child_issue_data(
    client: &JiraClient,
    options: &CreateChildOptions,
) -> Result<JiraCreatedIssue> {
    let parent: JiraIssueResponse = client
        .get(
            &issue_path(&options.parent_issue_key),
            &[("fields".to_string(), "project".to_string())],
            &format!("fetch parent issue {}", options.parent_issue_key),
        )
        .await?;

    let project_key = parent
        .fields
        .project
        .map(|project| project.key)
        .ok_or_else(|| {
            eyre!(
                "Parent issue {} has no project",
                options.parent_issue_key
            )
        })?;

    log::debug!(
        "creating child of {} in project {}",
        options.parent_issue_key,
        project_key
    );

    let payload = build_create_payload(
        &project_key,
        &options.summary,
        &options.description,
        &options.issue_type,
        Some(&options.parent_issue_key),
    )
    .map_err(Error::from)?;

    client
        .send_json(Method::POST, "/rest/api/3/issue", &payload, "create child issue")
        .await
}

/// Update the given fields of an issue; omitted fields are left untouched
pub async fn update_issue_data(client: &JiraClient, options: &UpdateOptions) -> Result<()> {
    let payload = build_update_payload(options.summary.as_deref(), options.description.as_deref())
        .map_err(Error::from)?;

    client
        .send_empty(
            Method::PUT,
            &issue_path(&options.issue_key),
            &[],
            Some(&payload),
            &format!("update issue {}", options.issue_key),
        )
        .await
}

/// Delete an issue. Issues that still have subtasks are rejected by Jira.
pub async fn delete_issue_data(client: &JiraClient, options: &DeleteOptions) -> Result<()> {
    client
        .send_empty(
            Method::DELETE,
            &issue_path(&options.issue_key),
            &[("deleteSubtasks".to_string(), "false".to_string())],
            None,
            &format!("delete issue {}", options.issue_key),
        )
        .await
}

/// List the issue types of a project
pub async fn list_issue_types_data(
    client: &JiraClient,
    options: &IssueTypesOptions,
) -> Result<Vec<JiraIssueTypeDetails>> {
    let project: JiraProjectResponse = client
        .get(
            &format!(
                "/rest/api/3/project/{}",
                urlencoding::encode(&options.project_key)
            ),
            &[],
            &format!("fetch project {}", options.project_key),
        )
        .await?;

    Ok(project.issue_types)
}

/// Handle the get command
pub async fn get_handler(client: &JiraClient, options: GetOptions) -> Result<()> {
    let issue = get_issue_data(client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&issue)?);
    } else {
        display_issue(&issue);
    }

    Ok(())
}

/// Handle the create command
pub async fn create_handler(client: &JiraClient, options: CreateOptions) -> Result<()> {
    let created = create_issue_data(client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        display_created(&created, None);
    }

    Ok(())
}

/// Handle the create-child command
pub async fn create_child_handler(client: &JiraClient, options: CreateChildOptions) -> Result<()> {
    let created = create_child_issue_data(client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&created)?);
    } else {
        display_created(&created, Some(&options.parent_issue_key));
    }

    Ok(())
}

/// Handle the update command
pub async fn update_handler(client: &JiraClient, options: UpdateOptions) -> Result<()> {
    update_issue_data(client, &options).await?;

    print_success(format!("Issue {} updated", options.issue_key));

    Ok(())
}

/// Handle the delete command
pub async fn delete_handler(client: &JiraClient, options: DeleteOptions) -> Result<()> {
    delete_issue_data(client, &options).await?;

    print_success(format!("Issue {} deleted", options.issue_key));

    Ok(())
}

/// Handle the issue-types command
pub async fn issue_types_handler(client: &JiraClient, options: IssueTypesOptions) -> Result<()> {
    let issue_types = list_issue_types_data(client, &options).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&issue_types)?);
        return Ok(());
    }

    if issue_types.is_empty() {
        println!("{}", "No issue types found for this project.".yellow());
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        "Name".bold().cyan(),
        "Subtask".bold().cyan(),
        "Description".bold().cyan()
    ]);

    for issue_type in &issue_types {
        let subtask = if issue_type.subtask {
            "yes".green().to_string()
        } else {
            "no".bright_black().to_string()
        };
        table.add_row(prettytable::row![
            issue_type.id.bright_black(),
            issue_type.name.bright_white(),
            subtask,
            issue_type.description.as_deref().unwrap_or_default()
        ]);
    }

    table.printstd();

    Ok(())
}

/// Display an issue's details as a formatted CLI table
fn display_issue(issue: &IssueOutput) {
    std::println!(
        "\n{} - {}\n",
        issue.key.bold().cyan(),
        issue.summary.bright_white()
    );

    let mut table = new_table();

    if let Some(status) = &issue.status {
        table.add_row(prettytable::row![
            "Status".bold().cyan(),
            status.green().to_string()
        ]);
    }

    if let Some(issue_type) = &issue.issue_type {
        table.add_row(prettytable::row![
            "Type".bold().cyan(),
            issue_type.bright_blue().to_string()
        ]);
    }

    if let Some(priority) = &issue.priority {
        table.add_row(prettytable::row![
            "Priority".bold().cyan(),
            priority.bright_yellow().to_string()
        ]);
    }

    let assignee = match &issue.assignee {
        Some(assignee) => assignee.bright_magenta().to_string(),
        None => "Unassigned".bright_black().to_string(),
    };
    table.add_row(prettytable::row!["Assignee".bold().cyan(), assignee]);

    if let Some(reporter) = &issue.reporter {
        table.add_row(prettytable::row![
            "Reporter".bold().cyan(),
            reporter.bright_magenta().to_string()
        ]);
    }

    if let Some(parent) = &issue.parent {
        table.add_row(prettytable::row![
            "Parent".bold().cyan(),
            parent.key.bright_white().to_string()
        ]);
    }

    if let Some(created) = &issue.created {
        table.add_row(prettytable::row![
            "Created".bold().cyan(),
            created.bright_black().to_string()
        ]);
    }

    if let Some(updated) = &issue.updated {
        table.add_row(prettytable::row![
            "Updated".bold().cyan(),
            updated.bright_black().to_string()
        ]);
    }

    table.printstd();

    if !issue.labels.is_empty() {
        std::println!(
            "\n{}: {}",
            "Labels".bold().cyan(),
            issue.labels.join(", ").bright_green()
        );
    }

    if let Some(description) = &issue.description {
        std::println!("\n{}:", "Description".bold().cyan());
        std::println!("{}\n", description);
    }

    if !issue.subtasks.is_empty() {
        std::println!("\n{}", "Subtasks:".bold().cyan());
        for subtask in &issue.subtasks {
            std::println!(
                "  {} {} {}",
                subtask.key.bright_white(),
                subtask.summary.as_deref().unwrap_or_default(),
                subtask
                    .status
                    .as_deref()
                    .map(|s| format!("[{s}]"))
                    .unwrap_or_default()
                    .green()
            );
        }
    }

    if !issue.transitions.is_empty() {
        std::println!("\n{}", "Available Transitions:".bold().cyan());
        for transition in &issue.transitions {
            std::println!(
                "  {} {}",
                transition.id.bright_black(),
                transition.name.bright_white()
            );
        }
    }
}

fn display_created(created: &JiraCreatedIssue, parent_key: Option<&str>) {
    print_success(format!("Created {}", created.key));

    let mut table = new_table();
    table.add_row(prettytable::row!["ID".bold().cyan(), created.id]);
    table.add_row(prettytable::row!["URL".bold().cyan(), created.self_url]);
    if let Some(parent) = parent_key {
        table.add_row(prettytable::row!["Parent".bold().cyan(), parent]);
    }
    table.printstd();
}
