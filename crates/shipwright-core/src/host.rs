use crate::error::Result;
use async_trait::async_trait;

/// Remote repository hosting: creates a new public repository and reports
/// where to browse it and where to push.
#[async_trait]
pub trait RepoHost: Send + Sync {
    async fn create_repository(&self, spec: &RepoSpec) -> Result<RemoteRepo>;
}

/// Request to create a repository. Visibility is always public, issues on,
/// wiki and projects off.
#[derive(Debug, Clone)]
pub struct RepoSpec {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct RemoteRepo {
    pub web_url: String,
    pub clone_url: String,
}
