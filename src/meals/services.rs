use uuid::Uuid;

use super::repo::MealRepo;
use super::repo_types::{MealOrder, Page};
use super::summary::{summarize, Summary};

/// Summary over all of a user's meals.
///
/// Streaks follow insertion order, oldest first: `created_at` is the only
/// timestamp the server controls, while `date` is whatever the client sent.
pub async fn summary_for_user(meals: &dyn MealRepo, user_id: Uuid) -> anyhow::Result<Summary> {
    let all = meals
        .list_by_user(user_id, MealOrder::OldestFirst, Page::default())
        .await?;
    Ok(summarize(all.iter().map(|m| m.is_in_diet)))
}
