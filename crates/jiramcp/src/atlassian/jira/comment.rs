//! Jira comment operations

use clap::{Args, Subcommand};
use jiramcp_core::atlassian::jira::{
    build_comment_payload, transform_comment, CommentOutput, JiraComment, JiraCommentsResponse,
    COMMENTS_PAGE_SIZE,
};
use reqwest::Method;
use serde::Deserialize;

use crate::atlassian::{issue_path, JiraClient};
use crate::prelude::{println, *};

/// Comment commands
#[derive(Debug, Subcommand)]
pub enum CommentCommands {
    /// Add a markdown comment to an issue
    #[clap(name = "add")]
    Add(AddCommentOptions),

    /// List the comments of an issue
    #[clap(name = "list")]
    List(ListCommentsOptions),

    /// Replace the body of a comment
    #[clap(name = "update")]
    Update(UpdateCommentOptions),

    /// Delete a comment
    #[clap(name = "delete")]
    Delete(DeleteCommentOptions),
}

#[derive(Args, Debug, Clone, Deserialize)]
pub struct AddCommentOptions {
    /// Issue key (e.g., "PROJ-123")
    pub issue_key: String,

    /// Comment text in markdown
    pub comment: String,

    /// Output as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Deserialize)]
pub struct ListCommentsOptions {
    /// Issue key (e.g., "PROJ-123")
    pub issue_key: String,

    /// Output as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Deserialize)]
pub struct UpdateCommentOptions {
    /// Issue key (e.g., "PROJ-123")
    pub issue_key: String,

    /// Comment ID
    pub comment_id: String,

    /// New comment text in markdown
    pub comment: String,

    /// Output as JSON
    #[arg(long)]
    #[serde(default)]
    pub json: bool,
}

#[derive(Args, Debug, Clone, Deserialize)]
pub struct DeleteCommentOptions {
    /// Issue key (e.g., "PROJ-123")
    pub issue_key: String,

    /// Comment ID
    pub comment_id: String,
}

fn comment_path(issue_key: &str, comment_id: &str) -> String {
    format!(
        "{}/comment/{}",
        issue_path(issue_key),
        urlencoding::encode(comment_id)
    )
}

/// Add a comment, converting the markdown body to ADF
pub async fn add_comment_data(
    client: &JiraClient,
    options: &AddCommentOptions,
) -> Result<CommentOutput> {
    let payload = build_comment_payload(&options.comment).map_err(Error::from)?;

    let comment: JiraComment = client
        .send_json(
            Method::POST,
            &format!("{}/comment", issue_path(&options.issue_key)),
            &payload,
            &format!("add comment to {}", options.issue_key),
        )
        .await?;

    Ok(transform_comment(comment))
}

/// Fetch the first page of comments of an issue
pub async fn get_comments_data(
    client: &JiraClient,
    options: &ListCommentsOptions,
) -> Result<Vec<CommentOutput>> {
    let response: JiraCommentsResponse = client
        .get(
            &format!("{}/comment", issue_path(&options.issue_key)),
            &[
                ("startAt".to_string(), "0".to_string()),
                ("maxResults".to_string(), COMMENTS_PAGE_SIZE.to_string()),
            ],
            &format!("fetch comments of {}", options.issue_key),
        )
        .await?;

    if let Some(total) = response.total {
        log::debug!(
            "{} has {} comments, fetched {}",
            options.issue_key,
            total,
            response.comments.len()
        );
    }

    Ok(response
        .comments
        .into_iter()
        .map(transform_comment)
        .collect())
}

/// Replace a comment's body
pub async fn update_comment_data(
    client: &JiraClient,
    options: &UpdateCommentOptions,
) -> Result<CommentOutput> {
    let payload = build_comment_payload(&options.comment).map_err(Error::from)?;

    let comment: JiraComment = client
        .send_json(
            Method::PUT,
            &comment_path(&options.issue_key, &options.comment_id),
            &payload,
            &format!("update comment {}", options.comment_id),
        )
        .await?;

    Ok(transform_comment(comment))
}

/// Delete a comment
pub async fn delete_comment_data(
    client: &JiraClient,
    options: &DeleteCommentOptions,
) -> Result<()> {
    client
        .send_empty(
            Method::DELETE,
            &comment_path(&options.issue_key, &options.comment_id),
            &[],
            None,
            &format!("delete comment {}", options.comment_id),
        )
        .await
}

/// Handle comment commands
pub async fn handler(client: &JiraClient, cmd: CommentCommands) -> Result<()> {
    match cmd {
        CommentCommands::Add(options) => {
            let comment = add_comment_data(client, &options).await?;
            display_saved(&comment, "added", options.json)
        }
        CommentCommands::List(options) => {
            let comments = get_comments_data(client, &options).await?;
            if options.json {
                println!("{}", serde_json::to_string_pretty(&comments)?);
            } else {
                display_comments(&comments);
            }
            Ok(())
        }
        CommentCommands::Update(options) => {
            let comment = update_comment_data(client, &options).await?;
            display_saved(&comment, "updated", options.json)
        }
        CommentCommands::Delete(options) => {
            delete_comment_data(client, &options).await?;
            print_success(format!("Comment {} deleted", options.comment_id));
            Ok(())
        }
    }
}

fn display_saved(comment: &CommentOutput, action: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(comment)?);
    } else {
        print_success(format!("Comment {} {action}", comment.id));
    }
    Ok(())
}

fn display_comments(comments: &[CommentOutput]) {
    if comments.is_empty() {
        std::println!("{}", "No comments found for this issue.".yellow());
        return;
    }

    for (index, comment) in comments.iter().enumerate() {
        std::println!(
            "{} {} {} {}",
            format!("{}.", index + 1).green(),
            format!("[{}]", comment.created).blue(),
            comment.author.bright_magenta(),
            format!("#{}", comment.id).bright_black()
        );
        for line in comment.body.lines() {
            std::println!("   {line}");
        }
        std::println!();
    }
}
