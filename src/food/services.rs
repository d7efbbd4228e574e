use tracing::info;
use uuid::Uuid;

use super::dto::{FoodFields, VideoUpload};
use super::repo::{FoodFilter, FoodItem, NewFood};
use crate::{error::AppError, state::AppState};

/// Random object key, independent of anything the client sent.
pub fn new_upload_key() -> String {
    Uuid::new_v4().to_string()
}

/// Uploads the video, then records the food item pointing at it.
///
/// A failed insert leaves the uploaded object in place.
pub async fn create_food(
    st: &AppState,
    partner_id: Uuid,
    video: VideoUpload,
    fields: FoodFields,
) -> Result<FoodItem, AppError> {
    let key = new_upload_key();
    let size = video.body.len();

    let uploaded = st
        .storage
        .upload_file(video.body, &key, &video.content_type)
        .await
        .map_err(AppError::Storage)?;

    let food = st
        .foods
        .create(NewFood {
            name: fields.name,
            description: fields.description,
            video: uploaded.url,
            food_partner: partner_id,
        })
        .await
        .map_err(AppError::Database)?;

    info!(food_id = %food.id, %partner_id, key = %uploaded.key, size, "food created");
    Ok(food)
}

pub async fn list_foods(st: &AppState, filter: FoodFilter) -> Result<Vec<FoodItem>, AppError> {
    st.foods.find(filter).await.map_err(AppError::Database)
}
