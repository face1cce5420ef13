//! In-memory repos used by unit and router tests.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo::MealRepo;
use crate::meals::repo_types::{Meal, MealChanges, MealOrder, NewMeal, Page};
use crate::users::repo::{CreateUserError, UserRepo};
use crate::users::repo_types::{NewUser, User};

#[derive(Default)]
pub struct MemoryUserRepo {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, user: NewUser, session_id: &str) -> Result<User, CreateUserError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(CreateUserError::EmailTaken);
        }
        if rows.iter().any(|u| u.session_id == session_id) {
            return Err(CreateUserError::SessionTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            session_id: session_id.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_session(&self, session_id: &str) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.session_id == session_id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }
}

/// Wraps a repo so lookups never see existing rows, as when two
/// registrations race between their reads and their inserts.
pub struct StaleReadUserRepo<R>(pub R);

#[async_trait]
impl<R: UserRepo> UserRepo for StaleReadUserRepo<R> {
    async fn create(&self, user: NewUser, session_id: &str) -> Result<User, CreateUserError> {
        self.0.create(user, session_id).await
    }

    async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
        Ok(None)
    }

    async fn find_by_session(&self, _session_id: &str) -> anyhow::Result<Option<User>> {
        Ok(None)
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        self.0.list().await
    }
}

/// Rows are kept in insertion order, which stands in for `created_at`.
#[derive(Default)]
pub struct MemoryMealRepo {
    rows: Mutex<Vec<Meal>>,
}

#[async_trait]
impl MealRepo for MemoryMealRepo {
    async fn insert(&self, user_id: Uuid, meal: NewMeal) -> anyhow::Result<Meal> {
        let meal = Meal {
            id: Uuid::new_v4(),
            user_id,
            name: meal.name,
            description: meal.description,
            date: meal.date,
            is_in_diet: meal.is_in_diet,
            created_at: OffsetDateTime::now_utc(),
        };
        self.rows.lock().unwrap().push(meal.clone());
        Ok(meal)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        order: MealOrder,
        page: Page,
    ) -> anyhow::Result<Vec<Meal>> {
        let rows = self.rows.lock().unwrap();
        let mut owned: Vec<Meal> = rows.iter().filter(|m| m.user_id == user_id).cloned().collect();
        if order == MealOrder::NewestFirst {
            owned.reverse();
        }
        let limit = page.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        Ok(owned
            .into_iter()
            .skip(page.offset as usize)
            .take(limit)
            .collect())
    }

    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|m| m.id == meal_id && m.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(meal) = rows
            .iter_mut()
            .find(|m| m.id == meal_id && m.user_id == user_id)
        else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            meal.name = name;
        }
        if let Some(description) = changes.description {
            meal.description = description;
        }
        if let Some(date) = changes.date {
            meal.date = date;
        }
        if let Some(is_in_diet) = changes.is_in_diet {
            meal.is_in_diet = is_in_diet;
        }
        Ok(Some(meal.clone()))
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| !(m.id == meal_id && m.user_id == user_id));
        Ok(rows.len() != before)
    }
}
