use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo::FoodItem;

pub const CREATED_MESSAGE: &str = "food created successfully";
pub const FETCHED_MESSAGE: &str = "Food items fetched successfully";

#[derive(Debug, Serialize)]
pub struct CreateFoodResponse {
    pub message: &'static str,
    pub food: FoodItem,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodListResponse {
    pub message: &'static str,
    pub food_items: Vec<FoodItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub food_partner: Option<Uuid>,
}

/// The binary part of an upload.
#[derive(Debug)]
pub struct VideoUpload {
    pub body: Bytes,
    pub content_type: String,
}

/// Caller-supplied text fields of an upload.
#[derive(Debug, Default)]
pub struct FoodFields {
    pub name: Option<String>,
    pub description: Option<String>,
}
