use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::prelude::*;

pub mod jira;

/// Jira configuration from environment variables
#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: String,
    pub email: String,
    pub api_token: String,
}

impl JiraConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: env_var("ATLASSIAN_BASE_URL")?,
            email: env_var("ATLASSIAN_EMAIL")?,
            api_token: env_var("ATLASSIAN_API_TOKEN")?,
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>, api_token: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(token) = api_token {
            self.api_token = token;
        }
        self
    }
}

fn env_var(name: &'static str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::MissingConfig(name).into())
}

/// Create an authenticated HTTP client with Basic Auth headers
pub fn create_jira_client(config: &JiraConfig) -> Result<reqwest::Client> {
    use base64::Engine;
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

    let auth_string = format!("{}:{}", config.email, config.api_token);
    let auth_encoded = base64::engine::general_purpose::STANDARD.encode(&auth_string);

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Basic {auth_encoded}"))
            .map_err(|e| eyre!("Invalid header value: {}", e))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {}", e))
}

/// Authenticated Jira REST client bound to a site
#[derive(Debug, Clone)]
pub struct JiraClient {
    base_url: String,
    http: reqwest::Client,
}

impl JiraClient {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http: create_jira_client(config)?,
        })
    }

    /// Client configured from `ATLASSIAN_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&JiraConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the successful response
    ///
    /// Non-2xx responses become [`Error::Api`] carrying the message parsed
    /// from the Jira error body.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
        action: &str,
    ) -> Result<reqwest::Response> {
        let url = self.url(path);
        log::debug!("{method} {url}");

        let mut request = self.http.request(method, &url).query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request to Jira: {}", e))?;

        let status = response.status();
        log::debug!("{url} responded {status}");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = jiramcp_core::atlassian::jira::extract_error_message(&body);
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
        .wrap_err(format!("Failed to {action}"))
    }

    /// GET a resource and deserialize the response
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        action: &str,
    ) -> Result<T> {
        self.send(Method::GET, path, query, None, action)
            .await?
            .json::<T>()
            .await
            .map_err(|e| eyre!("Failed to parse Jira response: {}", e))
    }

    /// Send a JSON body and deserialize the response
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &serde_json::Value,
        action: &str,
    ) -> Result<T> {
        self.send(method, path, &[], Some(body), action)
            .await?
            .json::<T>()
            .await
            .map_err(|e| eyre!("Failed to parse Jira response: {}", e))
    }

    /// Send a request whose response has no body (204 No Content)
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&serde_json::Value>,
        action: &str,
    ) -> Result<()> {
        self.send(method, path, query, body, action).await?;
        Ok(())
    }
}

/// Path of an issue resource, with the key URL-encoded
pub fn issue_path(issue_key: &str) -> String {
    format!("/rest/api/3/issue/{}", urlencoding::encode(issue_key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JiraConfig {
        JiraConfig {
            base_url: "https://example.atlassian.net".to_string(),
            email: "dev@example.com".to_string(),
            api_token: "secret".to_string(),
        }
    }

    #[test]
    fn test_with_overrides_replaces_given_values() {
        let config = config().with_overrides(Some("https://other.atlassian.net".to_string()), None);

        assert_eq!(config.base_url, "https://other.atlassian.net");
        assert_eq!(config.api_token, "secret");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let mut config = config();
        config.base_url.push('/');

        let client = JiraClient::new(&config).unwrap();

        assert_eq!(
            client.url("/rest/api/3/issue"),
            "https://example.atlassian.net/rest/api/3/issue"
        );
    }

    #[test]
    fn test_issue_path_encodes_key() {
        assert_eq!(issue_path("PROJ-1"), "/rest/api/3/issue/PROJ-1");
        assert_eq!(issue_path("a/b"), "/rest/api/3/issue/a%2Fb");
    }
}
