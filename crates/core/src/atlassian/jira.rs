//! Transformation functions for Jira API requests and responses

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adf::{extract_description, markdown_to_adf};

/// Fields expanded on `get issue` when the caller does not choose any
pub const DEFAULT_EXPAND: &[&str] = &["transitions", "changelog", "subtasks", "description"];

/// Issue type used for child issues when none is given
pub const DEFAULT_CHILD_ISSUE_TYPE: &str = "Subtask";

/// Number of comments fetched by `get comments`
pub const COMMENTS_PAGE_SIZE: usize = 50;

/// Errors raised while building request payloads
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PayloadError {
    #[error("At least one field must be provided for update (summary or description)")]
    NothingToUpdate,

    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Jira user (assignee, reporter, comment author)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraUser {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,
}

impl JiraUser {
    /// Prefer displayName, fall back to emailAddress
    pub fn name(&self) -> Option<String> {
        self.display_name
            .clone()
            .or_else(|| self.email_address.clone())
    }
}

/// Jira status field
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraStatus {
    pub name: String,
}

/// Jira priority field
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraPriority {
    #[serde(default)]
    pub name: String,
}

/// Jira issue type field
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraIssueType {
    pub name: String,
}

/// Jira project field
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraProject {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Parent issue reference
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraParent {
    pub key: String,
    #[serde(default)]
    pub fields: Option<JiraLinkedFields>,
}

/// Subtask reference
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraSubtask {
    pub key: String,
    #[serde(default)]
    pub fields: Option<JiraLinkedFields>,
}

/// The few fields Jira embeds for parents and subtasks
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraLinkedFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<JiraStatus>,
}

/// Fields from a Jira issue
///
/// Everything is optional: callers may restrict the returned fields.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct JiraIssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<Value>, // Can be a string or ADF (Atlassian Document Format)
    #[serde(default)]
    pub status: Option<JiraStatus>,
    #[serde(default)]
    pub issuetype: Option<JiraIssueType>,
    #[serde(default)]
    pub priority: Option<JiraPriority>,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    #[serde(default)]
    pub reporter: Option<JiraUser>,
    #[serde(default)]
    pub project: Option<JiraProject>,
    #[serde(default)]
    pub parent: Option<JiraParent>,
    #[serde(default)]
    pub subtasks: Vec<JiraSubtask>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// Workflow transition available on an issue
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraTransition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub to: Option<JiraStatus>,
}

/// Jira issue response from `GET /rest/api/3/issue/{key}`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraIssueResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    #[serde(default)]
    pub fields: JiraIssueFields,
    #[serde(default)]
    pub transitions: Vec<JiraTransition>,
}

/// Response of `POST /rest/api/3/issue`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraCreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: String,
}

/// Comment on a Jira issue
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraComment {
    pub id: String,
    #[serde(default)]
    pub author: Option<JiraUser>,
    #[serde(default)]
    pub body: Option<Value>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
}

/// Response of `GET /rest/api/3/issue/{key}/comment`
#[derive(Debug, Deserialize, Clone)]
pub struct JiraCommentsResponse {
    #[serde(default)]
    pub comments: Vec<JiraComment>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Issue type scope (team-managed projects)
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraScope {
    #[serde(rename = "type")]
    pub scope_type: String,
}

/// Issue type details
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraIssueTypeDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subtask: bool,
    #[serde(rename = "iconUrl", default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub scope: Option<JiraScope>,
}

/// Response of `GET /rest/api/3/project/{key}`, reduced to its issue types
#[derive(Debug, Deserialize, Clone)]
pub struct JiraProjectResponse {
    pub key: String,
    #[serde(rename = "issueTypes", default)]
    pub issue_types: Vec<JiraIssueTypeDetails>,
}

/// Linked issue summary (parent or subtask)
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LinkedIssueOutput {
    pub key: String,
    pub summary: Option<String>,
    pub status: Option<String>,
}

/// Transition summary
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TransitionOutput {
    pub id: String,
    pub name: String,
    pub to_status: Option<String>,
}

/// Output structure for detailed issue information
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct IssueOutput {
    pub key: String,
    pub summary: String,
    pub status: Option<String>,
    pub issue_type: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<String>,
    pub reporter: Option<String>,
    pub project: Option<String>,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub labels: Vec<String>,
    pub parent: Option<LinkedIssueOutput>,
    pub description: Option<String>,
    pub subtasks: Vec<LinkedIssueOutput>,
    pub transitions: Vec<TransitionOutput>,
}

/// Output structure for a comment
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CommentOutput {
    pub id: String,
    pub author: String,
    pub created: String,
    pub updated: String,
    pub body: String,
}

fn linked_issue(key: String, fields: Option<JiraLinkedFields>) -> LinkedIssueOutput {
    let (summary, status) = match fields {
        Some(fields) => (fields.summary, fields.status.map(|s| s.name)),
        None => (None, None),
    };
    LinkedIssueOutput {
        key,
        summary,
        status,
    }
}

/// Convert a Jira issue response to the domain model
///
/// # Arguments
/// * `issue` - The raw issue response from the Jira API
///
/// # Returns
/// * `IssueOutput` - Cleaned issue with the description rendered to text
pub fn transform_issue_response(issue: JiraIssueResponse) -> IssueOutput {
    let fields = issue.fields;

    IssueOutput {
        key: issue.key,
        summary: fields.summary.unwrap_or_default(),
        status: fields.status.map(|s| s.name),
        issue_type: fields.issuetype.map(|t| t.name),
        priority: fields.priority.map(|p| p.name).filter(|n| !n.is_empty()),
        assignee: fields.assignee.as_ref().and_then(JiraUser::name),
        reporter: fields.reporter.as_ref().and_then(JiraUser::name),
        project: fields.project.map(|p| p.key),
        created: fields.created,
        updated: fields.updated,
        labels: fields.labels,
        parent: fields.parent.map(|p| linked_issue(p.key, p.fields)),
        description: extract_description(fields.description),
        subtasks: fields
            .subtasks
            .into_iter()
            .map(|s| linked_issue(s.key, s.fields))
            .collect(),
        transitions: issue
            .transitions
            .into_iter()
            .map(|t| TransitionOutput {
                id: t.id,
                name: t.name,
                to_status: t.to.map(|s| s.name),
            })
            .collect(),
    }
}

/// Convert a Jira comment to the domain model, rendering its ADF body
pub fn transform_comment(comment: JiraComment) -> CommentOutput {
    CommentOutput {
        id: comment.id,
        author: comment
            .author
            .as_ref()
            .and_then(JiraUser::name)
            .unwrap_or_else(|| "Unknown".to_string()),
        created: comment.created.unwrap_or_default(),
        updated: comment.updated.unwrap_or_default(),
        body: extract_description(comment.body).unwrap_or_default(),
    }
}

/// Format an issue as the text returned by the `get issue` tool
pub fn format_issue(issue: &IssueOutput) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: &str| out.push_str(&format!("{label}: {value}\n"));

    line("Key", &issue.key);
    line("Summary", &issue.summary);
    if let Some(status) = &issue.status {
        line("Status", status);
    }
    if let Some(issue_type) = &issue.issue_type {
        line("Type", issue_type);
    }
    if let Some(priority) = &issue.priority {
        line("Priority", priority);
    }
    line("Assignee", issue.assignee.as_deref().unwrap_or("Unassigned"));
    if let Some(reporter) = &issue.reporter {
        line("Reporter", reporter);
    }
    if let Some(project) = &issue.project {
        line("Project", project);
    }
    if let Some(created) = &issue.created {
        line("Created", created);
    }
    if let Some(updated) = &issue.updated {
        line("Updated", updated);
    }
    if let Some(parent) = &issue.parent {
        line("Parent", &format_linked_issue(parent));
    }
    if !issue.labels.is_empty() {
        line("Labels", &issue.labels.join(", "));
    }

    if let Some(description) = &issue.description {
        out.push_str(&format!("\nDescription:\n{description}\n"));
    }

    if !issue.subtasks.is_empty() {
        out.push_str("\nSubtasks:\n");
        for subtask in &issue.subtasks {
            out.push_str(&format!("- {}\n", format_linked_issue(subtask)));
        }
    }

    if !issue.transitions.is_empty() {
        out.push_str("\nAvailable Transitions:\n");
        for transition in &issue.transitions {
            match &transition.to_status {
                Some(to) => out.push_str(&format!(
                    "- {} (ID: {}) -> {}\n",
                    transition.name, transition.id, to
                )),
                None => out.push_str(&format!(
                    "- {} (ID: {})\n",
                    transition.name, transition.id
                )),
            }
        }
    }

    out
}

fn format_linked_issue(issue: &LinkedIssueOutput) -> String {
    let mut text = issue.key.clone();
    if let Some(summary) = &issue.summary {
        text.push_str(&format!(": {summary}"));
    }
    if let Some(status) = &issue.status {
        text.push_str(&format!(" [{status}]"));
    }
    text
}

/// Format the result of creating an issue
///
/// # Arguments
/// * `created` - The create response
/// * `parent_key` - Parent issue key, for child issues
/// * `issue_type` - Issue type that was requested
pub fn format_created_issue(
    created: &JiraCreatedIssue,
    parent_key: Option<&str>,
    issue_type: &str,
) -> String {
    match parent_key {
        None => format!(
            "Issue created successfully!\nKey: {}\nID: {}\nURL: {}",
            created.key, created.id, created.self_url
        ),
        Some(parent) => {
            let mut text = format!(
                "Child issue created successfully!\nKey: {}\nID: {}\nURL: {}\nParent: {}",
                created.key, created.id, created.self_url, parent
            );
            if issue_type == "Bug" {
                text.push_str("\n\nA bug should be linked to a Story or Task. Next step should be to create relationship between the bug and the story or task.");
            }
            text
        }
    }
}

/// Format comments as the text returned by the `get comments` tool
pub fn format_comments(comments: &[CommentOutput]) -> String {
    if comments.is_empty() {
        return "No comments found for this issue.".to_string();
    }

    comments
        .iter()
        .map(|c| {
            format!(
                "ID: {}\nAuthor: {}\nCreated: {}\nUpdated: {}\nBody:\n{}\n\n",
                c.id, c.author, c.created, c.updated, c.body
            )
        })
        .collect()
}

/// Format the result of adding or updating a comment
pub fn format_saved_comment(action: &str, comment: &CommentOutput) -> String {
    format!(
        "Comment {action} successfully!\nID: {}\nAuthor: {}\nCreated: {}",
        comment.id, comment.author, comment.created
    )
}

/// Format a project's issue types
pub fn format_issue_types(issue_types: &[JiraIssueTypeDetails]) -> String {
    if issue_types.is_empty() {
        return "No issue types found for this project.".to_string();
    }

    let mut out = String::from("Available Issue Types:\n\n");
    for issue_type in issue_types {
        let subtask = if issue_type.subtask {
            " (Subtask Type)"
        } else {
            ""
        };
        out.push_str(&format!(
            "ID: {}\nName: {}{}\n",
            issue_type.id, issue_type.name, subtask
        ));
        if let Some(description) = issue_type.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("Description: {description}\n"));
        }
        if let Some(icon_url) = issue_type.icon_url.as_deref().filter(|u| !u.is_empty()) {
            out.push_str(&format!("Icon URL: {icon_url}\n"));
        }
        if let Some(scope) = &issue_type.scope {
            out.push_str(&format!("Scope: {}\n", scope.scope_type));
        }
        out.push('\n');
    }
    out
}

/// Split a comma-separated parameter, ignoring spaces and empty entries
pub fn parse_list_param(value: Option<&str>) -> Option<Vec<String>> {
    let items: Vec<String> = value?
        .split(',')
        .map(|item| item.replace(' ', ""))
        .filter(|item| !item.is_empty())
        .collect();

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// Query parameters for `GET /rest/api/3/issue/{key}`
///
/// # Arguments
/// * `fields` - Comma-separated fields; all fields when absent
/// * `expand` - Comma-separated expansions; [`DEFAULT_EXPAND`] when absent
pub fn issue_query_params(fields: Option<&str>, expand: Option<&str>) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(fields) = parse_list_param(fields) {
        params.push(("fields".to_string(), fields.join(",")));
    }

    let expand = parse_list_param(expand)
        .unwrap_or_else(|| DEFAULT_EXPAND.iter().map(|e| e.to_string()).collect());
    params.push(("expand".to_string(), expand.join(",")));

    params
}

fn require(field: &'static str, value: &str) -> Result<(), PayloadError> {
    if value.trim().is_empty() {
        Err(PayloadError::EmptyField(field))
    } else {
        Ok(())
    }
}

/// Build the body of `POST /rest/api/3/issue`
///
/// The description is markdown and is converted to ADF.
pub fn build_create_payload(
    project_key: &str,
    summary: &str,
    description: &str,
    issue_type: &str,
    parent_key: Option<&str>,
) -> Result<Value, PayloadError> {
    require("project_key", project_key)?;
    require("summary", summary)?;
    require("issue_type", issue_type)?;

    let mut fields = json!({
        "summary": summary,
        "project": { "key": project_key },
        "description": markdown_to_adf(description),
        "issuetype": { "name": issue_type },
    });

    if let Some(parent) = parent_key {
        fields["parent"] = json!({ "key": parent });
    }

    Ok(json!({ "fields": fields }))
}

/// Build the body of `PUT /rest/api/3/issue/{key}`
///
/// Only non-empty fields are sent, so omitted fields keep their value.
pub fn build_update_payload(
    summary: Option<&str>,
    description: Option<&str>,
) -> Result<Value, PayloadError> {
    let mut fields = serde_json::Map::new();

    if let Some(summary) = summary.filter(|s| !s.is_empty()) {
        fields.insert("summary".to_string(), json!(summary));
    }
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        fields.insert(
            "description".to_string(),
            markdown_to_adf(description).to_value(),
        );
    }

    if fields.is_empty() {
        return Err(PayloadError::NothingToUpdate);
    }

    Ok(json!({ "fields": fields }))
}

/// Build the body of a comment create/update request
pub fn build_comment_payload(comment: &str) -> Result<Value, PayloadError> {
    require("comment", comment)?;
    Ok(json!({ "body": markdown_to_adf(comment) }))
}

/// Extract a readable message from a Jira error response body
///
/// Jira reports failures as `errorMessages` plus field-specific `errors`.
/// Falls back to the raw body when neither is present.
pub fn extract_error_message(body: &str) -> String {
    let Ok(error_json) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    let mut messages = Vec::new();

    if let Some(error_messages) = error_json.get("errorMessages").and_then(|em| em.as_array()) {
        for msg in error_messages {
            if let Some(text) = msg.as_str() {
                messages.push(text.to_string());
            }
        }
    }

    if let Some(errors) = error_json.get("errors").and_then(|e| e.as_object()) {
        for (field, error) in errors {
            if let Some(error_text) = error.as_str() {
                messages.push(format!("{field}: {error_text}"));
            }
        }
    }

    if messages.is_empty() {
        body.to_string()
    } else {
        messages.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>, email: Option<&str>) -> JiraUser {
        JiraUser {
            display_name: name.map(str::to_string),
            email_address: email.map(str::to_string),
            account_id: None,
        }
    }

    fn issue_fixture() -> JiraIssueResponse {
        serde_json::from_value(json!({
            "id": "10001",
            "key": "PROJ-123",
            "fields": {
                "summary": "Fix login",
                "description": {
                    "version": 1,
                    "type": "doc",
                    "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Steps to reproduce"}]}]
                },
                "status": {"name": "In Progress"},
                "issuetype": {"name": "Bug"},
                "priority": {"name": "High"},
                "assignee": {"displayName": "Jane Smith", "emailAddress": "jane@example.com"},
                "reporter": {"emailAddress": "ops@example.com"},
                "project": {"key": "PROJ", "name": "Project"},
                "parent": {"key": "PROJ-100", "fields": {"summary": "Auth epic", "status": {"name": "Open"}}},
                "subtasks": [{"key": "PROJ-124", "fields": {"summary": "Write test", "status": {"name": "Done"}}}],
                "labels": ["backend", "auth"],
                "created": "2024-01-01T10:00:00Z",
                "updated": "2024-01-02T10:00:00Z"
            },
            "transitions": [{"id": "31", "name": "Done", "to": {"name": "Done"}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_transform_issue_response_full() {
        // Arrange: A fully populated issue
        let issue = issue_fixture();

        // Act: Transform the issue
        let output = transform_issue_response(issue);

        // Assert: Every field is mapped
        assert_eq!(output.key, "PROJ-123");
        assert_eq!(output.summary, "Fix login");
        assert_eq!(output.status, Some("In Progress".to_string()));
        assert_eq!(output.issue_type, Some("Bug".to_string()));
        assert_eq!(output.priority, Some("High".to_string()));
        assert_eq!(output.assignee, Some("Jane Smith".to_string()));
        assert_eq!(output.reporter, Some("ops@example.com".to_string()));
        assert_eq!(output.project, Some("PROJ".to_string()));
        assert_eq!(output.labels, vec!["backend", "auth"]);
        assert_eq!(output.description, Some("Steps to reproduce".to_string()));
        assert_eq!(output.parent.as_ref().unwrap().key, "PROJ-100");
        assert_eq!(output.subtasks[0].status, Some("Done".to_string()));
        assert_eq!(output.transitions[0].to_status, Some("Done".to_string()));
    }

    #[test]
    fn test_transform_issue_response_restricted_fields() {
        // Arrange: Only the summary was requested
        let issue: JiraIssueResponse = serde_json::from_value(json!({
            "key": "PROJ-9",
            "fields": {"summary": "Only summary"}
        }))
        .unwrap();

        // Act: Transform the issue
        let output = transform_issue_response(issue);

        // Assert: Missing fields stay empty
        assert_eq!(output.summary, "Only summary");
        assert_eq!(output.status, None);
        assert_eq!(output.assignee, None);
        assert!(output.subtasks.is_empty());
        assert!(output.transitions.is_empty());
    }

    #[test]
    fn test_transform_issue_response_empty_priority() {
        let mut issue = issue_fixture();
        issue.fields.priority = Some(JiraPriority {
            name: "".to_string(),
        });

        let output = transform_issue_response(issue);

        assert_eq!(output.priority, None);
    }

    #[test]
    fn test_user_name_prefers_display_name() {
        assert_eq!(
            user(Some("Jane"), Some("jane@example.com")).name(),
            Some("Jane".to_string())
        );
        assert_eq!(
            user(None, Some("jane@example.com")).name(),
            Some("jane@example.com".to_string())
        );
        assert_eq!(user(None, None).name(), None);
    }

    #[test]
    fn test_format_issue() {
        let output = transform_issue_response(issue_fixture());

        let text = format_issue(&output);

        assert!(text.starts_with("Key: PROJ-123\nSummary: Fix login\nStatus: In Progress\n"));
        assert!(text.contains("Assignee: Jane Smith\n"));
        assert!(text.contains("Parent: PROJ-100: Auth epic [Open]\n"));
        assert!(text.contains("Labels: backend, auth\n"));
        assert!(text.contains("\nDescription:\nSteps to reproduce\n"));
        assert!(text.contains("\nSubtasks:\n- PROJ-124: Write test [Done]\n"));
        assert!(text.contains("\nAvailable Transitions:\n- Done (ID: 31) -> Done\n"));
    }

    #[test]
    fn test_format_issue_unassigned() {
        let mut output = transform_issue_response(issue_fixture());
        output.assignee = None;

        assert!(format_issue(&output).contains("Assignee: Unassigned\n"));
    }

    #[test]
    fn test_transform_comment_defaults() {
        // Arrange: A comment without author or body
        let comment = JiraComment {
            id: "7".to_string(),
            author: None,
            body: None,
            created: Some("2024-01-01T12:00:00Z".to_string()),
            updated: None,
        };

        // Act: Transform the comment
        let output = transform_comment(comment);

        // Assert: Author falls back to Unknown, body to empty
        assert_eq!(output.author, "Unknown");
        assert_eq!(output.body, "");
        assert_eq!(output.created, "2024-01-01T12:00:00Z");
    }

    #[test]
    fn test_format_comments() {
        let comments: JiraCommentsResponse = serde_json::from_value(json!({
            "comments": [{
                "id": "1",
                "author": {"displayName": "Alice"},
                "body": {"type": "doc", "version": 1, "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "Looks good"}]}
                ]},
                "created": "2024-01-01",
                "updated": "2024-01-02"
            }],
            "total": 1
        }))
        .unwrap();
        let outputs: Vec<CommentOutput> =
            comments.comments.into_iter().map(transform_comment).collect();

        let text = format_comments(&outputs);

        assert_eq!(
            text,
            "ID: 1\nAuthor: Alice\nCreated: 2024-01-01\nUpdated: 2024-01-02\nBody:\nLooks good\n\n"
        );
    }

    #[test]
    fn test_format_comments_empty() {
        assert_eq!(format_comments(&[]), "No comments found for this issue.");
    }

    #[test]
    fn test_format_created_issue() {
        let created = JiraCreatedIssue {
            id: "10002".to_string(),
            key: "PROJ-200".to_string(),
            self_url: "https://example.atlassian.net/rest/api/3/issue/10002".to_string(),
        };

        let plain = format_created_issue(&created, None, "Task");
        let child_bug = format_created_issue(&created, Some("PROJ-1"), "Bug");
        let child_task = format_created_issue(&created, Some("PROJ-1"), "Subtask");

        assert!(plain.starts_with("Issue created successfully!\nKey: PROJ-200\nID: 10002\n"));
        assert!(child_bug.contains("Parent: PROJ-1"));
        assert!(child_bug.contains("A bug should be linked to a Story or Task."));
        assert!(!child_task.contains("A bug should be linked"));
    }

    #[test]
    fn test_format_issue_types() {
        let types: JiraProjectResponse = serde_json::from_value(json!({
            "key": "PROJ",
            "issueTypes": [
                {"id": "1", "name": "Task", "description": "A task", "subtask": false, "iconUrl": "https://x/task.png"},
                {"id": "2", "name": "Subtask", "description": "", "subtask": true, "scope": {"type": "PROJECT"}}
            ]
        }))
        .unwrap();

        let text = format_issue_types(&types.issue_types);

        assert_eq!(
            text,
            "Available Issue Types:\n\nID: 1\nName: Task\nDescription: A task\nIcon URL: https://x/task.png\n\nID: 2\nName: Subtask (Subtask Type)\nScope: PROJECT\n\n"
        );
        assert_eq!(format_issue_types(&[]), "No issue types found for this project.");
    }

    #[test]
    fn test_issue_query_params() {
        assert_eq!(
            issue_query_params(None, None),
            vec![(
                "expand".to_string(),
                "transitions,changelog,subtasks,description".to_string()
            )]
        );
        assert_eq!(
            issue_query_params(Some("summary, status"), Some("changelog")),
            vec![
                ("fields".to_string(), "summary,status".to_string()),
                ("expand".to_string(), "changelog".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_list_param_ignores_blanks() {
        assert_eq!(parse_list_param(Some(" , ,")), None);
        assert_eq!(parse_list_param(None), None);
        assert_eq!(
            parse_list_param(Some("a,,b")),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_build_create_payload() {
        let payload =
            build_create_payload("PROJ", "Title", "Some **bold** text", "Task", None).unwrap();

        assert_eq!(payload["fields"]["project"]["key"], "PROJ");
        assert_eq!(payload["fields"]["issuetype"]["name"], "Task");
        assert_eq!(payload["fields"]["description"]["type"], "doc");
        assert_eq!(
            payload["fields"]["description"]["content"][0]["content"][1]["marks"][0]["type"],
            "strong"
        );
        assert!(payload["fields"].get("parent").is_none());
    }

    #[test]
    fn test_build_create_payload_with_parent() {
        let payload =
            build_create_payload("PROJ", "Child", "", "Subtask", Some("PROJ-1")).unwrap();

        assert_eq!(payload["fields"]["parent"]["key"], "PROJ-1");
        // An empty description still yields a valid document
        assert_eq!(
            payload["fields"]["description"]["content"],
            json!([{"type": "paragraph"}])
        );
    }

    #[test]
    fn test_build_create_payload_requires_summary() {
        assert_eq!(
            build_create_payload("PROJ", "  ", "body", "Task", None),
            Err(PayloadError::EmptyField("summary"))
        );
    }

    #[test]
    fn test_build_update_payload_partial() {
        let payload = build_update_payload(Some("New title"), Some("")).unwrap();

        assert_eq!(payload, json!({"fields": {"summary": "New title"}}));
    }

    #[test]
    fn test_build_update_payload_description_only() {
        let payload = build_update_payload(None, Some("# Plan")).unwrap();

        assert!(payload["fields"].get("summary").is_none());
        assert_eq!(payload["fields"]["description"]["content"][0]["type"], "heading");
    }

    #[test]
    fn test_build_update_payload_nothing_to_update() {
        assert_eq!(
            build_update_payload(None, Some("")),
            Err(PayloadError::NothingToUpdate)
        );
    }

    #[test]
    fn test_build_comment_payload() {
        let payload = build_comment_payload("Deployed to `staging`").unwrap();

        assert_eq!(payload["body"]["version"], 1);
        assert_eq!(payload["body"]["content"][0]["content"][1]["text"], "staging");
        assert_eq!(
            build_comment_payload(""),
            Err(PayloadError::EmptyField("comment"))
        );
    }

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"errorMessages":["Issue does not exist"],"errors":{"summary":"Summary is required"}}"#;

        assert_eq!(
            extract_error_message(body),
            "Issue does not exist\nsummary: Summary is required"
        );
        assert_eq!(extract_error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(extract_error_message("{}"), "{}");
    }
}
