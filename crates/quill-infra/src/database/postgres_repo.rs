//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

use quill_core::domain::{NewPost, NewUser, Post, PostDraft, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, RepoError> {
        let model = user::ActiveModel {
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            is_staff: Set(new_user.is_staff),
            is_superuser: Set(new_user.is_superuser),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(user_id = model.id, "User inserted");
        Ok(model.into())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_published(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .filter(post::Column::PublishedAt.lte(Utc::now()))
            .order_by_asc(post::Column::PublishedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let (title, text) = new_post.draft.into_parts();

        let model = post::ActiveModel {
            author_id: Set(new_post.author_id),
            title: Set(title),
            text: Set(text),
            created_at: Set(Utc::now().into()),
            published_at: Set(new_post.published_at.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post inserted");
        Ok(model.into())
    }

    async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, RepoError> {
        let existing = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let (title, text) = draft.into_parts();
        let mut active = existing.into_active_model();
        active.title = Set(title);
        active.text = Set(text);
        active.published_at = Set(Utc::now().into());

        let model = active.update(&self.db).await.map_err(map_db_err)?;

        tracing::debug!(post_id = model.id, "Post updated");
        Ok(model.into())
    }
}
