//! Session cookies and the request viewer extractor.

use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};

use quill_core::domain::{Role, User};
use quill_core::ports::{BaseRepository, TokenClaims, UserRepository};
use quill_core::{Action, Decision, authorize};

use crate::config::SessionConfig;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// A logged-in caller.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: Role::from_claims(&claims.roles),
        }
    }
}

/// Whoever is making the request, logged in or not.
///
/// Extraction never fails: a missing, expired or forged session simply makes
/// the caller anonymous.
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<Identity>);

impl Viewer {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn role(&self) -> Role {
        self.0.as_ref().map_or(Role::Anonymous, |i| i.role)
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }

    /// Whether the gate would let this viewer perform `action`.
    pub fn can(&self, action: Action) -> bool {
        authorize(self.role(), action) == Decision::Allow
    }

    /// Run the authorization gate for a request.
    pub fn authorize(&self, action: Action, req: &HttpRequest) -> AppResult<()> {
        match authorize(self.role(), action) {
            Decision::Allow => Ok(()),
            Decision::LoginRequired => {
                tracing::debug!(
                    role = %self.role(),
                    ?action,
                    back_office = action.is_back_office(),
                    "Login required"
                );
                Err(AppError::LoginRequired {
                    next: requested_path(req),
                })
            }
            Decision::Forbidden => {
                tracing::warn!(
                    role = %self.role(),
                    ?action,
                    back_office = action.is_back_office(),
                    "Permission denied"
                );
                Err(AppError::Forbidden)
            }
        }
    }

    /// The logged-in identity, or a login redirect.
    pub fn require_identity(&self, req: &HttpRequest) -> AppResult<&Identity> {
        self.identity().ok_or_else(|| AppError::LoginRequired {
            next: requested_path(req),
        })
    }

    /// The account behind the session, reloaded from storage.
    ///
    /// A token that outlives its account is treated like no session at all.
    pub async fn require_user(
        &self,
        users: &dyn UserRepository,
        req: &HttpRequest,
    ) -> AppResult<User> {
        let identity = self.require_identity(req)?;

        match users.find_by_id(identity.user_id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!(user_id = identity.user_id, "Session for a missing user");
                Err(AppError::LoginRequired {
                    next: requested_path(req),
                })
            }
        }
    }
}

fn requested_path(req: &HttpRequest) -> String {
    match req.query_string() {
        "" => req.path().to_string(),
        query => format!("{}?{}", req.path(), query),
    }
}

fn session_token(req: &HttpRequest, config: &SessionConfig) -> Option<String> {
    if let Some(cookie) = req.cookie(&config.cookie_name) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Ok(Viewer::anonymous()));
        };

        let Some(token) = session_token(req, &state.session) else {
            return ready(Ok(Viewer::anonymous()));
        };

        match state.tokens.validate_token(&token) {
            Ok(claims) => ready(Ok(Viewer(Some(Identity::from(claims))))),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session token");
                ready(Ok(Viewer::anonymous()))
            }
        }
    }
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(config: &SessionConfig, token: String, max_age_secs: i64) -> Cookie<'static> {
    Cookie::build(config.cookie_name.clone(), token)
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Cookie that makes the browser drop the session.
pub fn removal_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::build(config.cookie_name.clone(), "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();
    cookie
}

/// Only same-site absolute paths are followed after login.
///
/// Browsers drop tabs and newlines from URLs, so a path holding any control
/// character could turn into `//host` once followed.
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(|c| c.is_control()) =>
        {
            path
        }
        _ => "/",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_next() {
        assert_eq!(safe_next(Some("/admin/")), "/admin/");
        assert_eq!(safe_next(Some("/post/1/edit/?x=1")), "/post/1/edit/?x=1");
        assert_eq!(safe_next(Some("https://evil.example/")), "/");
        assert_eq!(safe_next(Some("//evil.example/")), "/");
        assert_eq!(safe_next(Some("/\\evil.example")), "/");
        assert_eq!(safe_next(Some("/\t/evil.example")), "/");
        assert_eq!(safe_next(Some("/\n/x")), "/");
        assert_eq!(safe_next(Some("/post/1/\r\n")), "/");
        assert_eq!(safe_next(None), "/");
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie(&SessionConfig::default(), "token".to_string(), 3600);

        assert_eq!(cookie.name(), "sessionid");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_viewer_role() {
        assert_eq!(Viewer::anonymous().role(), Role::Anonymous);

        let staff = Viewer(Some(Identity {
            user_id: 2,
            username: "staff01".to_string(),
            role: Role::Staff,
        }));
        assert_eq!(staff.role(), Role::Staff);
        assert!(staff.can(Action::BackOfficeIndex));
        assert!(!staff.can(Action::BackOfficePosts));
    }
}
