#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0} environment variable not set")]
    MissingConfig(&'static str),

    #[error("Jira API error [{status}]: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<jiramcp_core::atlassian::jira::PayloadError> for Error {
    fn from(err: jiramcp_core::atlassian::jira::PayloadError) -> Self {
        Error::InvalidInput(err.to_string())
    }
}
