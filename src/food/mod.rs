mod dto;
pub mod handlers;
mod repo;
pub mod services;

pub use dto::{CreateFoodResponse, FoodFields, FoodListResponse, VideoUpload};
pub use repo::{FoodFilter, FoodItem, FoodRepository, NewFood, PgFoodRepository};

use crate::state::AppState;
use axum::Router;

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    handlers::food_routes(max_upload_bytes)
}
