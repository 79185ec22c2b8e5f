//! Client for the repository hosting API.

use crate::error::RemoteError;
use crate::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shipwright_core::host::{RemoteRepo, RepoHost, RepoSpec};
use shipwright_core::ShipwrightError;

const ENDPOINT: &str = "forge";

pub struct ForgeClient {
    http: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl ForgeClient {
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Result<Self> {
        Ok(Self {
            http: crate::http_client()?,
            base_url: base_url.into(),
            token,
        })
    }

    /// Create a public repository: issues enabled, wiki and projects off.
    pub async fn create_repo(&self, name: &str, description: &str) -> Result<RemoteRepo> {
        let url = format!("{}/user/repos", self.base_url.trim_end_matches('/'));
        let payload = CreateRepoRequest {
            name,
            description,
            private: false,
            has_issues: true,
            has_projects: false,
            has_wiki: false,
        };

        tracing::debug!("creating repository {name}");
        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .header("accept", "application/vnd.github+json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                endpoint: ENDPOINT,
                status: status.as_u16(),
                body,
            });
        }

        let created: CreateRepoResponse = response.json().await?;
        Ok(RemoteRepo {
            web_url: created.html_url,
            clone_url: created.clone_url,
        })
    }
}

#[async_trait]
impl RepoHost for ForgeClient {
    async fn create_repository(&self, spec: &RepoSpec) -> shipwright_core::Result<RemoteRepo> {
        self.create_repo(&spec.name, &spec.description)
            .await
            .map_err(|e| ShipwrightError::RepoCreate(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    description: &'a str,
    private: bool,
    has_issues: bool,
    has_projects: bool,
    has_wiki: bool,
}

#[derive(Deserialize)]
struct CreateRepoResponse {
    html_url: String,
    clone_url: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
