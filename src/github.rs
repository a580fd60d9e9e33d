use anyhow::Result;
use reqwest::{Client, header};
use serde::de::DeserializeOwned;

use crate::error::MinerError;
use crate::types::{IssueState, RawCommit, RawIssue};

/// Page-wise access to a hosted repository. The fetch pipeline only depends
/// on this trait, so tests can substitute an in-memory double.
///
/// An empty page means the history is exhausted.
pub trait RepoApi {
    async fn commits_page(&self, repo: &str, page: usize) -> Result<Vec<RawCommit>, MinerError>;

    async fn issues_page(
        &self,
        repo: &str,
        state: IssueState,
        page: usize,
    ) -> Result<Vec<RawIssue>, MinerError>;
}

pub struct GitHubClient {
    client: Client,
    base: String,
    per_page: usize,
    verbose: bool,
}

impl GitHubClient {
    pub fn new(token: Option<&str>, base: &str, per_page: usize, verbose: bool) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("repo-miner/0.1"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(t) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {t}"))?,
            );
        }
        let client = Client::builder().default_headers(headers).build()?;
        Ok(GitHubClient {
            client,
            base: base.trim_end_matches('/').to_string(),
            per_page,
            verbose,
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        repo: &str,
        url: &str,
    ) -> Result<Vec<T>, MinerError> {
        if self.verbose {
            eprintln!("[VERBOSE] GET {url}");
        }
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MinerError::access(repo, e))?
            .error_for_status()
            .map_err(|e| MinerError::access(repo, e))?;
        resp.json::<Vec<T>>()
            .await
            .map_err(|e| MinerError::access(repo, e))
    }
}

impl RepoApi for GitHubClient {
    async fn commits_page(&self, repo: &str, page: usize) -> Result<Vec<RawCommit>, MinerError> {
        let url = format!(
            "{}/repos/{}/commits?per_page={}&page={}",
            self.base, repo, self.per_page, page
        );
        self.get_page(repo, &url).await
    }

    async fn issues_page(
        &self,
        repo: &str,
        state: IssueState,
        page: usize,
    ) -> Result<Vec<RawIssue>, MinerError> {
        let url = format!(
            "{}/repos/{}/issues?state={}&per_page={}&page={}",
            self.base,
            repo,
            state.as_query(),
            self.per_page,
            page
        );
        self.get_page(repo, &url).await
    }
}
