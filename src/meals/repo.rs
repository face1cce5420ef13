use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{Meal, MealChanges, MealOrder, NewMeal, Page};

/// Meal storage. Every call is scoped to the owning user.
#[async_trait]
pub trait MealRepo: Send + Sync {
    async fn insert(&self, user_id: Uuid, meal: NewMeal) -> anyhow::Result<Meal>;
    async fn list_by_user(
        &self,
        user_id: Uuid,
        order: MealOrder,
        page: Page,
    ) -> anyhow::Result<Vec<Meal>>;
    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>>;
    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>>;
    /// Returns `false` when no meal matched.
    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgMealRepo {
    db: PgPool,
}

impl PgMealRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealRepo for PgMealRepo {
    async fn insert(&self, user_id: Uuid, meal: NewMeal) -> anyhow::Result<Meal> {
        sqlx::query_as::<_, Meal>(
            r#"
            INSERT INTO meals (id, user_id, name, description, date, is_in_diet)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, name, description, date, is_in_diet, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&meal.name)
        .bind(&meal.description)
        .bind(meal.date)
        .bind(meal.is_in_diet)
        .fetch_one(&self.db)
        .await
        .context("insert meal")
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        order: MealOrder,
        page: Page,
    ) -> anyhow::Result<Vec<Meal>> {
        // LIMIT NULL means no limit in Postgres.
        let sql = match order {
            MealOrder::NewestFirst => {
                r#"
                SELECT id, user_id, name, description, date, is_in_diet, created_at
                FROM meals
                WHERE user_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2 OFFSET $3
                "#
            }
            MealOrder::OldestFirst => {
                r#"
                SELECT id, user_id, name, description, date, is_in_diet, created_at
                FROM meals
                WHERE user_id = $1
                ORDER BY created_at ASC, id ASC
                LIMIT $2 OFFSET $3
                "#
            }
        };

        sqlx::query_as::<_, Meal>(sql)
            .bind(user_id)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.db)
            .await
            .context("list meals by user")
    }

    async fn find(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<Option<Meal>> {
        sqlx::query_as::<_, Meal>(
            r#"
            SELECT id, user_id, name, description, date, is_in_diet, created_at
            FROM meals
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("find meal")
    }

    async fn update(
        &self,
        user_id: Uuid,
        meal_id: Uuid,
        changes: MealChanges,
    ) -> anyhow::Result<Option<Meal>> {
        sqlx::query_as::<_, Meal>(
            r#"
            UPDATE meals
               SET name        = COALESCE($3, name),
                   description = COALESCE($4, description),
                   date        = COALESCE($5, date),
                   is_in_diet  = COALESCE($6, is_in_diet)
             WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, description, date, is_in_diet, created_at
            "#,
        )
        .bind(meal_id)
        .bind(user_id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.date)
        .bind(changes.is_in_diet)
        .fetch_optional(&self.db)
        .await
        .context("update meal")
    }

    async fn delete(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM meals WHERE id = $1 AND user_id = $2")
            .bind(meal_id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete meal")?;
        Ok(res.rows_affected() > 0)
    }
}
