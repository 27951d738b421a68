//! Media routes.
//!
//! `GET/POST /media`, `GET/PUT/DELETE /media/{id}`. Uploads are multipart with
//! a `media_data` file part and a `media_description` text part.

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, Query, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    routing::get,
};
use bytes::Bytes;
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use memeshare_core::media::{Media, MediaPatch, MediaUpload};
use memeshare_shared::{AppError, error::detail, types::PageRequest};

/// Multipart part carrying the file.
pub const FILE_FIELD: &str = "media_data";
/// Multipart part carrying the description.
pub const DESCRIPTION_FIELD: &str = "media_description";

/// Creates the media routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/media", get(list_media).post(create_media))
        .route(
            "/media/{id}",
            get(get_media).put(update_media).delete(delete_media),
        )
}

fn media_id(path: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    path.map(|Path(id)| id)
        .map_err(|e| AppError::InvalidInput(e.body_text()).into())
}

fn malformed(err: &MultipartError) -> ApiError {
    AppError::Validation(err.body_text()).into()
}

/// GET `/media`
async fn list_media(
    State(state): State<AppState>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> ApiResult<Json<Vec<Media>>> {
    let Query(page) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let (skip, limit) = page.validate()?;

    let items = state
        .media
        .list(skip, limit)
        .await
        .map_err(|e| ApiError::from_media(e, detail::OBJECT_NOT_FOUND))?;
    Ok(Json(items))
}

/// GET `/media/{id}`
async fn get_media(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Media>> {
    let id = media_id(path)?;
    let media = state
        .media
        .get(id)
        .await
        .map_err(|e| ApiError::from_media(e, detail::OBJECT_NOT_FOUND))?;
    Ok(Json(media))
}

/// POST `/media`
async fn create_media(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Media>> {
    let mut multipart = multipart.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let mut file: Option<(String, Option<String>, Bytes)> = None;
    let mut description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| malformed(&e))? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_owned);
                let data = field.bytes().await.map_err(|e| malformed(&e))?;
                file = Some((file_name, content_type, data));
            }
            Some(DESCRIPTION_FIELD) => {
                description = Some(field.text().await.map_err(|e| malformed(&e))?);
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return Err(AppError::InvalidInput(format!("Field required: {FILE_FIELD}")).into());
    };
    let Some(description) = description else {
        return Err(AppError::InvalidInput(format!("Field required: {DESCRIPTION_FIELD}")).into());
    };

    let upload = MediaUpload {
        file_name,
        content_type,
        data,
        description,
    };

    let media = state
        .media
        .create(upload)
        .await
        .map_err(|e| ApiError::from_media(e, detail::OBJECT_NOT_FOUND))?;

    info!(id = media.id, url = %media.url, "Media uploaded");
    Ok(Json(media))
}

/// PUT `/media/{id}`
async fn update_media(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<MediaPatch>, JsonRejection>,
) -> ApiResult<Json<Media>> {
    let id = media_id(path)?;
    let Json(patch) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let media = state
        .media
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_media(e, detail::ENTRY_DOES_NOT_EXIST))?;
    Ok(Json(media))
}

/// DELETE `/media/{id}`
async fn delete_media(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Value>> {
    let id = media_id(path)?;
    state
        .media
        .delete(id)
        .await
        .map_err(|e| ApiError::from_media(e, detail::ENTRY_NOT_FOUND))?;
    Ok(Json(json!({ "message": detail::DELETED })))
}
