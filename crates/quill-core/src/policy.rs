//! Authorization gate - which roles may reach which pages.
//!
//! Reading posts is public. Writing them needs any logged-in account, and
//! that includes opening the new and edit forms: anonymous callers are sent
//! to the login page rather than shown a form they cannot submit.
//! The back-office is a separate tier: staff may open its landing page,
//! only administrators may manage records.

use crate::domain::Role;

/// Something a caller is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListPosts,
    ViewPost,
    NewPost,
    CreatePost,
    EditPost,
    UpdatePost,
    BackOfficeIndex,
    BackOfficePosts,
}

impl Action {
    pub fn is_back_office(&self) -> bool {
        matches!(self, Action::BackOfficeIndex | Action::BackOfficePosts)
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// The caller must log in first (or log in as someone else).
    LoginRequired,
    /// The caller is known and not permitted.
    Forbidden,
}

/// Decide whether `role` may perform `action`.
pub fn authorize(role: Role, action: Action) -> Decision {
    use Action::*;

    match (action, role) {
        (ListPosts | ViewPost, _) => Decision::Allow,

        (NewPost | CreatePost | EditPost | UpdatePost, Role::Anonymous) => Decision::LoginRequired,
        (NewPost | CreatePost | EditPost | UpdatePost, _) => Decision::Allow,

        (BackOfficeIndex, Role::Admin | Role::Staff) => Decision::Allow,
        (BackOfficePosts, Role::Admin) => Decision::Allow,
        (BackOfficePosts, Role::Staff) => Decision::Forbidden,
        (BackOfficeIndex | BackOfficePosts, Role::User | Role::Anonymous) => {
            Decision::LoginRequired
        }
    }
}
