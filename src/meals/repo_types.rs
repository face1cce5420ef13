use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Meal record in the database.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub is_in_diet: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated input for a new meal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub description: String,
    pub date: OffsetDateTime,
    pub is_in_diet: bool,
}

/// Fields to overwrite on update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<OffsetDateTime>,
    pub is_in_diet: Option<bool>,
}

impl MealChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.is_in_diet.is_none()
    }
}

/// Insertion-time ordering of a user's meals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealOrder {
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<i64>, // None = no limit
    pub offset: i64,
}
