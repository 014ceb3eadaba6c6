use async_trait::async_trait;

use crate::domain::{NewPost, NewUser, Post, PostDraft, User};
use crate::error::RepoError;

/// Generic repository trait shared by every entity store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Load every entity, in primary key order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    /// Find a user by login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Insert a user and return it with its assigned id.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Published posts, oldest publication first.
    async fn list_published(&self) -> Result<Vec<Post>, RepoError>;

    /// Insert a post and return it with its assigned id.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace title and text of an existing post and republish it.
    ///
    /// Returns [`RepoError::NotFound`] when no post has `id`.
    async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, RepoError>;
}
