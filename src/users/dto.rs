use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::repo_types::{NewUser, User};
use crate::error::AppError;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for `POST /users`. Fields are optional so a missing one
/// is reported by `validate` rather than by the JSON extractor.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, AppError> {
        let (name, email) = match (self.name, self.email) {
            (Some(name), Some(email)) => (name, email),
            _ => {
                return Err(AppError::BadRequest(
                    "Invalid request body, please provide name and email!".into(),
                ))
            }
        };

        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name must not be empty".into()));
        }

        let email = email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err(AppError::BadRequest("Invalid email".into()));
        }

        Ok(NewUser { name, email })
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}
