//! Domain entities - the core business objects.

mod form;
mod post;
mod role;
mod user;

pub use form::{FieldError, FormErrors, Locale, PostForm, TITLE_MAX_CHARS};
pub use post::{NewPost, Post, PostDraft};
pub use role::Role;
pub use user::{NewUser, User};
