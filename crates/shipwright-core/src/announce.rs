use crate::error::Result;
use async_trait::async_trait;

/// Posting board: submits one announcement and returns its post id.
///
/// Announcing is not transactional with publishing; a failed announcement
/// never rolls back an already-pushed repository.
#[async_trait]
pub trait Announcer: Send + Sync {
    async fn announce(&self, post: &Announcement) -> Result<PostReceipt>;
}

#[derive(Debug, Clone)]
pub struct Announcement {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct PostReceipt {
    pub post_id: String,
}
