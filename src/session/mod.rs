//! Cookie session lookup.
//!
//! A session is an opaque token stored in the `users.session_id` column and
//! echoed back by the client in a cookie. Resolution never touches the
//! request; it returns a value the handler receives as an argument.

mod extractors;

pub use extractors::SessionUser;

use axum_extra::extract::cookie::{Cookie, SameSite};
use tracing::debug;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::users::{repo::UserRepo, repo_types::User};

/// Outcome of looking up a session cookie.
#[derive(Debug)]
pub enum SessionLookup {
    /// No cookie on the request.
    Missing,
    /// A cookie was sent but no user owns it.
    Unknown,
    User(User),
}

pub async fn resolve(
    users: &dyn UserRepo,
    session_id: Option<&str>,
) -> anyhow::Result<SessionLookup> {
    let Some(session_id) = session_id.filter(|s| !s.is_empty()) else {
        return Ok(SessionLookup::Missing);
    };
    match users.find_by_session(session_id).await? {
        Some(user) => {
            debug!(user_id = %user.id, "session resolved");
            Ok(SessionLookup::User(user))
        }
        None => Ok(SessionLookup::Unknown),
    }
}

pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn session_cookie(config: &SessionConfig, session_id: String) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
        .max_age(time::Duration::days(config.ttl_days))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryUserRepo;
    use crate::users::repo_types::NewUser;

    fn session_config() -> SessionConfig {
        SessionConfig {
            cookie_name: "sessionId".into(),
            ttl_days: 7,
            secure: false,
        }
    }

    #[tokio::test]
    async fn missing_cookie_resolves_to_missing() {
        let repo = MemoryUserRepo::default();
        assert!(matches!(resolve(&repo, None).await.unwrap(), SessionLookup::Missing));
        assert!(matches!(resolve(&repo, Some("")).await.unwrap(), SessionLookup::Missing));
    }

    #[tokio::test]
    async fn unknown_cookie_resolves_to_unknown() {
        let repo = MemoryUserRepo::default();
        let lookup = resolve(&repo, Some("nobody")).await.unwrap();
        assert!(matches!(lookup, SessionLookup::Unknown));
    }

    #[tokio::test]
    async fn known_cookie_resolves_to_its_user() {
        let repo = MemoryUserRepo::default();
        let created = repo
            .create(
                NewUser {
                    name: "Ana".into(),
                    email: "ana@example.com".into(),
                },
                "tok-1",
            )
            .await
            .unwrap();

        match resolve(&repo, Some("tok-1")).await.unwrap() {
            SessionLookup::User(user) => assert_eq!(user.id, created.id),
            other => panic!("expected user, got {other:?}"),
        }
    }

    #[test]
    fn cookie_attributes() {
        let cookie = session_cookie(&session_config(), "abc".into());
        assert_eq!(cookie.name(), "sessionId");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(7)));
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(new_session_id(), new_session_id());
    }
}
