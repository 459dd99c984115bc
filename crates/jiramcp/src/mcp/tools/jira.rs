use jiramcp_core::atlassian::jira::{
    format_comments, format_created_issue, format_issue, format_issue_types, format_saved_comment,
};
use serde::de::DeserializeOwned;

use crate::atlassian::jira::{comment, issue};
use crate::atlassian::JiraClient;
use crate::prelude::{eprintln, *};

use super::{CallToolResult, Content, JsonRpcError};

fn parse_args<T: DeserializeOwned>(arguments: Option<serde_json::Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.unwrap_or(serde_json::Value::Null)).map_err(|e| JsonRpcError {
        code: -32602,
        message: format!("Invalid arguments: {e}"),
        data: None,
    })
}

/// Map a shell error to JSON-RPC; bad input is reported as invalid params
fn tool_error(err: color_eyre::eyre::Report) -> JsonRpcError {
    let code = match err.downcast_ref::<Error>() {
        Some(Error::InvalidInput(_)) => -32602,
        _ => -32603,
    };

    JsonRpcError {
        code,
        message: format!("Tool execution error: {err:#}"),
        data: None,
    }
}

fn text_result(text: String) -> Result<serde_json::Value, JsonRpcError> {
    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

fn client() -> Result<JiraClient, JsonRpcError> {
    JiraClient::from_env().map_err(tool_error)
}

fn trace(global: &crate::Global, tool: &str, detail: String) {
    log::debug!("{tool}: {detail}");
    if global.verbose {
        eprintln!("Calling {tool}: {detail}");
    }
}

/// Handle Jira get issue command via MCP
pub async fn handle_jira_get_issue(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: issue::GetOptions = parse_args(arguments)?;
    trace(
        global,
        "jira_get_issue",
        format!(
            "issue_key={}, fields={:?}, expand={:?}",
            options.issue_key, options.fields, options.expand
        ),
    );

    let issue = issue::get_issue_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format_issue(&issue))
}

/// Handle Jira create issue command via MCP
pub async fn handle_jira_create_issue(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: issue::CreateOptions = parse_args(arguments)?;
    trace(
        global,
        "jira_create_issue",
        format!(
            "project_key={}, summary={}, issue_type={}",
            options.project_key, options.summary, options.issue_type
        ),
    );

    let created = issue::create_issue_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format_created_issue(&created, None, &options.issue_type))
}

/// Handle Jira create child issue command via MCP
pub async fn handle_jira_create_child_issue(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: issue::CreateChildOptions = parse_args(arguments)?;
    trace(
        global,
        "jira_create_child_issue",
        format!(
            "parent_issue_key={}, summary={}, issue_type={}",
            options.parent_issue_key, options.summary, options.issue_type
        ),
    );

    let created = issue::create_child_issue_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format_created_issue(
        &created,
        Some(&options.parent_issue_key),
        &options.issue_type,
    ))
}

/// Handle Jira update issue command via MCP
pub async fn handle_jira_update_issue(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: issue::UpdateOptions = parse_args(arguments)?;
    trace(
        global,
        "jira_update_issue",
        format!(
            "issue_key={}, summary={:?}, description={}",
            options.issue_key,
            options.summary,
            options.description.is_some()
        ),
    );

    issue::update_issue_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result("Issue updated successfully!".to_string())
}

/// Handle Jira delete issue command via MCP
pub async fn handle_jira_delete_issue(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: issue::DeleteOptions = parse_args(arguments)?;
    trace(global, "jira_delete_issue", format!("issue_key={}", options.issue_key));

    issue::delete_issue_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format!("Issue {} deleted successfully!", options.issue_key))
}

/// Handle Jira list issue types command via MCP
pub async fn handle_jira_list_issue_types(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: issue::IssueTypesOptions = parse_args(arguments)?;
    trace(
        global,
        "jira_list_issue_types",
        format!("project_key={}", options.project_key),
    );

    let issue_types = issue::list_issue_types_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format_issue_types(&issue_types))
}

/// Handle Jira add comment command via MCP
pub async fn handle_jira_add_comment(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: comment::AddCommentOptions = parse_args(arguments)?;
    trace(global, "jira_add_comment", format!("issue_key={}", options.issue_key));

    let comment = comment::add_comment_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format_saved_comment("added", &comment))
}

/// Handle Jira get comments command via MCP
pub async fn handle_jira_get_comments(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: comment::ListCommentsOptions = parse_args(arguments)?;
    trace(global, "jira_get_comments", format!("issue_key={}", options.issue_key));

    let comments = comment::get_comments_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format_comments(&comments))
}

/// Handle Jira update comment command via MCP
pub async fn handle_jira_update_comment(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: comment::UpdateCommentOptions = parse_args(arguments)?;
    trace(
        global,
        "jira_update_comment",
        format!(
            "issue_key={}, comment_id={}",
            options.issue_key, options.comment_id
        ),
    );

    let comment = comment::update_comment_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format_saved_comment("updated", &comment))
}

/// Handle Jira delete comment command via MCP
pub async fn handle_jira_delete_comment(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let options: comment::DeleteCommentOptions = parse_args(arguments)?;
    trace(
        global,
        "jira_delete_comment",
        format!(
            "issue_key={}, comment_id={}",
            options.issue_key, options.comment_id
        ),
    );

    comment::delete_comment_data(&client()?, &options)
        .await
        .map_err(tool_error)?;

    text_result(format!(
        "Comment {} deleted successfully!",
        options.comment_id
    ))
}
