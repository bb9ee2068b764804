//! GitHub REST client

use crate::error::{Error, Result};
use crate::types::{Comment, Issue, PullRequest};
use async_trait::async_trait;
use regbot_core::types::GitHubConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Page size for list endpoints (GitHub's maximum)
const PER_PAGE: usize = 100;

const USER_AGENT: &str = concat!("regbot/", env!("CARGO_PKG_VERSION"));

/// Owner and name of the registry repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoInfo {
    pub owner: String,
    pub repo: String,
}

impl RepoInfo {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

/// Issue-tracking operations the resolver needs
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetch an issue by number
    async fn get_issue(&self, number: u64) -> Result<Issue>;

    /// List every comment of an issue, oldest first
    async fn list_comments(&self, number: u64) -> Result<Vec<Comment>>;

    /// List the repository's open pull requests
    async fn list_pull_requests(&self) -> Result<Vec<PullRequest>>;
}

/// [`IssueTracker`] backed by the GitHub REST API
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    repo: RepoInfo,
}

impl GitHubClient {
    /// Create a client for the configured repository
    ///
    /// `token` is sent as a bearer token when present.
    pub fn new(config: &GitHubConfig, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| Error::api(&config.api_url, 0, format!("Invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            repo: RepoInfo::new(&config.owner, &config.repo),
        })
    }

    pub fn repo(&self) -> &RepoInfo {
        &self.repo
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url, self.repo.owner, self.repo.repo, path
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::api(url, status.as_u16(), message));
        }

        Ok(response.json().await?)
    }

    /// Follow `page=` pagination until a short page is returned
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = format!(
                "{}{}per_page={}&page={}",
                self.repo_url(path),
                separator,
                PER_PAGE,
                page
            );
            let batch: Vec<T> = self.get_json(&url).await?;
            let done = batch.len() < PER_PAGE;
            items.extend(batch);
            if done {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn get_issue(&self, number: u64) -> Result<Issue> {
        self.get_json(&self.repo_url(&format!("issues/{}", number))).await
    }

    async fn list_comments(&self, number: u64) -> Result<Vec<Comment>> {
        self.get_all_pages(&format!("issues/{}/comments", number)).await
    }

    async fn list_pull_requests(&self) -> Result<Vec<PullRequest>> {
        self.get_all_pages("pulls?state=open").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> GitHubClient {
        let config = GitHubConfig {
            api_url: server.uri(),
            owner: "owner".to_string(),
            repo: "repo".to_string(),
        };
        GitHubClient::new(&config, token).unwrap()
    }

    #[tokio::test]
    async fn test_get_issue() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/issues/1"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 1,
                "title": "Bot: name",
                "body": "### 名称\n\nname",
                "user": {"login": "he0119", "id": 1, "type": "User"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let issue = client_for(&server, Some("secret")).get_issue(1).await.unwrap();
        assert_eq!(issue.number, 1);
        assert_eq!(issue.user.login, "he0119");
        assert_eq!(issue.body_text(), "### 名称\n\nname");
    }

    #[tokio::test]
    async fn test_null_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/issues/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 3,
                "title": "",
                "body": null,
                "user": {"login": "a", "id": 2}
            })))
            .mount(&server)
            .await;

        let issue = client_for(&server, None).get_issue(3).await.unwrap();
        assert_eq!(issue.body_text(), "");
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/issues/9"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let err = client_for(&server, None).get_issue(9).await.unwrap_err();
        match err {
            Error::Api {
                status, message, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not Found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_comments_paginates() {
        let server = MockServer::start().await;
        let full_page: Vec<_> = (0..PER_PAGE as u64)
            .map(|id| json!({"id": id, "body": format!("comment {}", id)}))
            .collect();
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/issues/1/comments"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_page))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/issues/1/comments"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": 1000, "body": "Plugin: test"}])),
            )
            .mount(&server)
            .await;

        let comments = client_for(&server, None).list_comments(1).await.unwrap();
        assert_eq!(comments.len(), PER_PAGE + 1);
        assert_eq!(comments.last().unwrap().body.as_deref(), Some("Plugin: test"));
    }

    #[tokio::test]
    async fn test_list_pull_requests() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/owner/repo/pulls"))
            .and(query_param("state", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "number": 10,
                    "title": "Bot: name",
                    "draft": false,
                    "labels": [{"name": "Bot"}, {"name": "Publish"}],
                    "head": {"ref": "publish/issue1", "sha": "abc"}
                }
            ])))
            .mount(&server)
            .await;

        let pulls = client_for(&server, None).list_pull_requests().await.unwrap();
        assert_eq!(pulls.len(), 1);
        assert_eq!(pulls[0].head.ref_name, "publish/issue1");
        assert_eq!(pulls[0].labels[1].name, "Publish");
    }
}
