mod jira;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "jiramcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

fn issue_key_property() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": "The unique identifier of the Jira issue (e.g., KP-2, PROJ-123)"
    })
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "jira_get_issue".to_string(),
            description: "Retrieve detailed information about a specific Jira issue including its status, assignee, description, subtasks, and available transitions. Requires ATLASSIAN_BASE_URL, ATLASSIAN_EMAIL, and ATLASSIAN_API_TOKEN environment variables.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": issue_key_property(),
                    "fields": {
                        "type": "string",
                        "description": "Comma-separated list of fields to retrieve (e.g., 'summary,status,assignee'). If not specified, all fields are returned."
                    },
                    "expand": {
                        "type": "string",
                        "description": "Comma-separated list of fields to expand (e.g., 'transitions,changelog'). Default: 'transitions,changelog,subtasks,description'"
                    }
                },
                "required": ["issue_key"]
            }),
        },
        Tool {
            name: "jira_create_issue".to_string(),
            description: "Create a new Jira issue. The description is markdown and is converted to Atlassian Document Format. Returns the created issue's key, ID, and URL.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_key": {
                        "type": "string",
                        "description": "Project identifier where the issue will be created (e.g., KP, PROJ)"
                    },
                    "summary": {
                        "type": "string",
                        "description": "Brief title or headline of the issue"
                    },
                    "description": {
                        "type": "string",
                        "description": "Detailed explanation of the issue, in markdown"
                    },
                    "issue_type": {
                        "type": "string",
                        "description": "Type of issue to create (common types: Bug, Task, Subtask, Story, Epic)"
                    }
                },
                "required": ["project_key", "summary", "description", "issue_type"]
            }),
        },
        Tool {
            name: "jira_create_child_issue".to_string(),
            description: "Create a child issue (sub-task) linked to a parent issue, in the parent's project. Returns the created issue's key, ID, and URL.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "parent_issue_key": {
                        "type": "string",
                        "description": "The parent issue key to which this child issue will be linked (e.g., KP-2)"
                    },
                    "summary": {
                        "type": "string",
                        "description": "Brief title or headline of the child issue"
                    },
                    "description": {
                        "type": "string",
                        "description": "Detailed explanation of the child issue, in markdown"
                    },
                    "issue_type": {
                        "type": "string",
                        "description": "Type of child issue to create (default: 'Subtask')"
                    }
                },
                "required": ["parent_issue_key", "summary", "description"]
            }),
        },
        Tool {
            name: "jira_update_issue".to_string(),
            description: "Modify an existing Jira issue. Supports partial updates: only the given fields are changed. At least one of summary or description is required.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": issue_key_property(),
                    "summary": {
                        "type": "string",
                        "description": "New title for the issue (optional)"
                    },
                    "description": {
                        "type": "string",
                        "description": "New description for the issue, in markdown (optional)"
                    }
                },
                "required": ["issue_key"]
            }),
        },
        Tool {
            name: "jira_delete_issue".to_string(),
            description: "Delete a Jira issue permanently. This action cannot be undone. Issues with subtasks cannot be deleted.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": issue_key_property()
                },
                "required": ["issue_key"]
            }),
        },
        Tool {
            name: "jira_list_issue_types".to_string(),
            description: "List all issue types available in a Jira project with their IDs, names, descriptions, and other attributes.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "project_key": {
                        "type": "string",
                        "description": "Project identifier to list issue types for (e.g., KP, PROJ)"
                    }
                },
                "required": ["project_key"]
            }),
        },
        Tool {
            name: "jira_add_comment".to_string(),
            description: "Add a comment to a Jira issue. The comment is markdown and is converted to Atlassian Document Format.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": issue_key_property(),
                    "comment": {
                        "type": "string",
                        "description": "The comment text to add to the issue, in markdown"
                    }
                },
                "required": ["issue_key", "comment"]
            }),
        },
        Tool {
            name: "jira_get_comments".to_string(),
            description: "Retrieve the comments of a Jira issue (first 50), with author, timestamps, and body rendered as text.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": issue_key_property()
                },
                "required": ["issue_key"]
            }),
        },
        Tool {
            name: "jira_update_comment".to_string(),
            description: "Replace the body of an existing comment on a Jira issue. The comment is markdown and is converted to Atlassian Document Format.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": issue_key_property(),
                    "comment_id": {
                        "type": "string",
                        "description": "ID of the comment to update"
                    },
                    "comment": {
                        "type": "string",
                        "description": "The new comment text, in markdown"
                    }
                },
                "required": ["issue_key", "comment_id", "comment"]
            }),
        },
        Tool {
            name: "jira_delete_comment".to_string(),
            description: "Delete a comment from a Jira issue. This action cannot be undone.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "issue_key": issue_key_property(),
                    "comment_id": {
                        "type": "string",
                        "description": "ID of the comment to delete"
                    }
                },
                "required": ["issue_key", "comment_id"]
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result).map_err(|e| JsonRpcError {
        code: -32603,
        message: format!("Internal error: {e}"),
        data: None,
    })
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    match params.name.as_str() {
        "jira_get_issue" => jira::handle_jira_get_issue(params.arguments, global).await,
        "jira_create_issue" => jira::handle_jira_create_issue(params.arguments, global).await,
        "jira_create_child_issue" => {
            jira::handle_jira_create_child_issue(params.arguments, global).await
        }
        "jira_update_issue" => jira::handle_jira_update_issue(params.arguments, global).await,
        "jira_delete_issue" => jira::handle_jira_delete_issue(params.arguments, global).await,
        "jira_list_issue_types" => {
            jira::handle_jira_list_issue_types(params.arguments, global).await
        }
        "jira_add_comment" => jira::handle_jira_add_comment(params.arguments, global).await,
        "jira_get_comments" => jira::handle_jira_get_comments(params.arguments, global).await,
        "jira_update_comment" => jira::handle_jira_update_comment(params.arguments, global).await,
        "jira_delete_comment" => jira::handle_jira_delete_comment(params.arguments, global).await,
        _ => Err(JsonRpcError {
            code: -32602,
            message: format!("Unknown tool: {}", params.name),
            data: None,
        }),
    }
}
