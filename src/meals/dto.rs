use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use super::repo_types::{Meal, MealChanges, NewMeal, Page};
use super::summary::Summary;
use crate::error::AppError;

/// Request body for `POST /meals`. Every field is required; they are
/// optional here so `validate` can name what is missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub is_in_diet: Option<bool>,
}

impl CreateMealRequest {
    pub fn validate(self) -> Result<NewMeal, AppError> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.description.is_none() {
            missing.push("description");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.is_in_diet.is_none() {
            missing.push("isInDiet");
        }

        match (self.name, self.description, self.date, self.is_in_diet) {
            (Some(name), Some(description), Some(date), Some(is_in_diet)) => Ok(NewMeal {
                name: parse_name(name)?,
                description,
                date: parse_date(&date)?,
                is_in_diet,
            }),
            _ => Err(AppError::BadRequest(format!(
                "Invalid request body, missing: {}",
                missing.join(", ")
            ))),
        }
    }
}

/// Request body for `PUT /meals/:id`; any non-empty subset of the fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub is_in_diet: Option<bool>,
}

impl UpdateMealRequest {
    pub fn validate(self) -> Result<MealChanges, AppError> {
        let changes = MealChanges {
            name: self.name.map(parse_name).transpose()?,
            description: self.description,
            date: self.date.as_deref().map(parse_date).transpose()?,
            is_in_diet: self.is_in_diet,
        };
        if changes.is_empty() {
            return Err(AppError::BadRequest(
                "Provide at least one of name, description, date, isInDiet".into(),
            ));
        }
        Ok(changes)
    }
}

fn parse_name(name: String) -> Result<String, AppError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".into()));
    }
    Ok(name)
}

fn parse_date(raw: &str) -> Result<OffsetDateTime, AppError> {
    OffsetDateTime::parse(raw.trim(), &Rfc3339)
        .map_err(|_| AppError::BadRequest("date must be an RFC 3339 timestamp".into()))
}

#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn validate(self) -> Result<Page, AppError> {
        if matches!(self.limit, Some(l) if l < 1) {
            return Err(AppError::BadRequest("limit must be at least 1".into()));
        }
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err(AppError::BadRequest("offset must not be negative".into()));
        }
        Ok(Page {
            limit: self.limit,
            offset,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Meal,
}

#[derive(Debug, Serialize)]
pub struct MealsResponse {
    pub meals: Vec<Meal>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Summary,
}
