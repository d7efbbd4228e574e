use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::QueryRejection,
        DefaultBodyLimit, Multipart, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{
    CreateFoodResponse, FoodFields, FoodListResponse, ListQuery, VideoUpload, CREATED_MESSAGE,
    FETCHED_MESSAGE,
};
use super::repo::FoodFilter;
use super::services;
use crate::{
    auth::{AuthFoodPartner, AuthUser},
    error::AppError,
    state::AppState,
};

const VIDEO_FIELD: &str = "video";

pub fn food_routes(max_upload_bytes: usize) -> Router<AppState> {
    // Served with and without the trailing slash.
    Router::new()
        .route("/api/food", get(get_food_items).post(create_food))
        .route("/api/food/", get(get_food_items).post(create_food))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Multipart(e.body_text())
    }
}

/// Splits the form into the video part and the text fields. Unknown fields,
/// including any attempt to set `foodPartner`, are dropped.
async fn read_upload_form(
    mut mp: Multipart,
) -> Result<(Option<VideoUpload>, FoodFields), AppError> {
    let mut video = None;
    let mut fields = FoodFields::default();

    while let Some(field) = mp.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some(VIDEO_FIELD) => {
                if video.is_some() {
                    return Err(AppError::Multipart("more than one video part".into()));
                }
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".into());
                let body = field.bytes().await.map_err(multipart_error)?;
                video = Some(VideoUpload { body, content_type });
            }
            Some("name") => fields.name = Some(field.text().await.map_err(multipart_error)?),
            Some("description") => {
                fields.description = Some(field.text().await.map_err(multipart_error)?)
            }
            _ => {}
        }
    }

    Ok((video, fields))
}

/// POST /api/food/ (multipart: video, name, description)
#[instrument(skip(state, mp))]
pub async fn create_food(
    State(state): State<AppState>,
    AuthFoodPartner(partner_id): AuthFoodPartner,
    mp: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreateFoodResponse>), AppError> {
    let mp = mp.map_err(|e| AppError::Multipart(e.body_text()))?;
    let (video, fields) = read_upload_form(mp).await?;
    let video = video
        .filter(|v| !v.body.is_empty())
        .ok_or(AppError::MissingVideo)?;

    let food = services::create_food(&state, partner_id, video, fields).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateFoodResponse {
            message: CREATED_MESSAGE,
            food,
        }),
    ))
}

/// GET /api/food[?foodPartner=<uuid>]
#[instrument(skip(state, query))]
pub async fn get_food_items(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<FoodListResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::InvalidQuery(e.body_text()))?;
    let filter = FoodFilter {
        food_partner: query.food_partner,
    };

    let food_items = services::list_foods(&state, filter).await?;

    Ok(Json(FoodListResponse {
        message: FETCHED_MESSAGE,
        food_items,
    }))
}
