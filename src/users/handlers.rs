use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, instrument, warn};

use super::dto::{CreateUserRequest, UserResponse, UsersResponse};
use super::repo::CreateUserError;
use crate::{
    error::{AppError, AppResult},
    session::{self, SessionLookup, SessionUser},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register))
        .route("/users/me", get(get_me))
}

#[instrument(skip(state, jar, payload))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, CookieJar, Json<UserResponse>)> {
    let Json(payload) = payload?;
    let new_user = payload.validate()?;

    if state.users.find_by_email(&new_user.email).await?.is_some() {
        warn!(email = %new_user.email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    // Keep the caller's cookie unless it already belongs to someone.
    let cookie_name = &state.config.session.cookie_name;
    let presented = jar.get(cookie_name).map(|c| c.value().to_owned());
    let lookup = session::resolve(state.users.as_ref(), presented.as_deref()).await?;
    let mut session_id = match lookup {
        SessionLookup::Unknown => presented.unwrap_or_else(session::new_session_id),
        SessionLookup::Missing | SessionLookup::User(_) => session::new_session_id(),
    };

    let created = state.users.create(new_user.clone(), &session_id).await;
    let user = match created {
        Ok(user) => user,
        // Another registration claimed the presented cookie first.
        Err(CreateUserError::SessionTaken) => {
            warn!("presented session id was claimed concurrently; minting a new one");
            session_id = session::new_session_id();
            state
                .users
                .create(new_user, &session_id)
                .await
                .map_err(create_user_error)?
        }
        Err(e) => return Err(create_user_error(e)),
    };
    info!(user_id = %user.id, email = %user.email, "user registered");

    let jar = jar.add(session::session_cookie(&state.config.session, session_id));
    Ok((StatusCode::CREATED, jar, Json(UserResponse { user })))
}

fn create_user_error(e: CreateUserError) -> AppError {
    match e {
        CreateUserError::EmailTaken => AppError::Conflict("Email already registered".into()),
        CreateUserError::SessionTaken => {
            AppError::Conflict("Session already belongs to another user".into())
        }
        CreateUserError::Other(e) => AppError::Internal(e),
    }
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let users = state.users.list().await?;
    Ok(Json(UsersResponse { users }))
}

#[instrument(skip_all)]
pub async fn get_me(SessionUser(user): SessionUser) -> Json<UserResponse> {
    Json(UserResponse { user })
}
