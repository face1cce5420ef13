use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::{resolve, SessionLookup};
use crate::{error::AppError, state::AppState, users::repo_types::User};

/// Resolves the session cookie, returning the logged-in user.
pub struct SessionUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(&state.config.session.cookie_name)
            .map(|c| c.value().to_owned());

        match resolve(state.users.as_ref(), session_id.as_deref()).await? {
            SessionLookup::User(user) => Ok(SessionUser(user)),
            SessionLookup::Missing => Err(AppError::Unauthorized(
                "You must have a session ID".into(),
            )),
            SessionLookup::Unknown => {
                warn!("session cookie does not match any user");
                Err(AppError::Unauthorized(
                    "You must be logged in to access this route".into(),
                ))
            }
        }
    }
}
