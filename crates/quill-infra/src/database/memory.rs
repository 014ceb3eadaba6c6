//! In-memory repositories - used when no database is configured, and in tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quill_core::domain::{NewPost, NewUser, Post, PostDraft, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

/// Rows keyed by id, with ids handed out in increasing order.
///
/// Note: Data is lost on process restart.
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    async fn get(&self, id: i64) -> Option<T> {
        self.rows.read().await.get(&id).cloned()
    }

    async fn all(&self) -> Vec<T> {
        self.rows.read().await.values().cloned().collect()
    }
}

fn next_id<T>(rows: &BTreeMap<i64, T>) -> i64 {
    rows.keys().next_back().map_or(1, |last| last + 1)
}

/// In-memory user store.
pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.table.get(id).await)
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.table.all().await)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let rows = self.table.rows.read().await;
        Ok(rows.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let mut rows = self.table.rows.write().await;

        if rows.values().any(|u| u.username == new_user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                new_user.username
            )));
        }

        let user = User {
            id: next_id(&rows),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            is_staff: new_user.is_staff,
            is_superuser: new_user.is_superuser,
            created_at: Utc::now(),
        };
        rows.insert(user.id, user.clone());

        Ok(user)
    }
}

/// In-memory post store.
pub struct InMemoryPostRepository {
    table: Table<Post>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.table.get(id).await)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.table.all().await)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let now = Utc::now();
        let mut posts: Vec<Post> = self
            .table
            .all()
            .await
            .into_iter()
            .filter(|p| p.published_at <= now)
            .collect();
        posts.sort_by_key(|p| (p.published_at, p.id));

        Ok(posts)
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut rows = self.table.rows.write().await;
        let (title, text) = new_post.draft.into_parts();

        let post = Post {
            id: next_id(&rows),
            author_id: new_post.author_id,
            title,
            text,
            created_at: Utc::now(),
            published_at: new_post.published_at,
        };
        rows.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, RepoError> {
        let mut rows = self.table.rows.write().await;
        let post = rows.get_mut(&id).ok_or(RepoError::NotFound)?;

        let (title, text) = draft.into_parts();
        post.title = title;
        post.text = text;
        post.published_at = Utc::now();

        Ok(post.clone())
    }
}
