//! Public meme routes.
//!
//! Uploads are multipart with a `meme_data` file part and a
//! `meme_description` text part; they are re-encoded for the storage service.

use axum::{
    Json, Router,
    extract::{
        Multipart, Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::Response,
    routing::get,
};
use serde_json::Value;

use crate::GatewayState;
use crate::client::ForwardedFile;
use crate::forward::{Operation, detail_response};
use memeshare_shared::types::PageRequest;

/// Multipart part carrying the file.
pub const FILE_FIELD: &str = "meme_data";
/// Multipart part carrying the description.
pub const DESCRIPTION_FIELD: &str = "meme_description";

/// Creates the meme routes.
pub fn routes() -> Router<GatewayState> {
    Router::new()
        .route("/memes", get(list_memes).post(upload_meme))
        .route(
            "/memes/{id}",
            get(get_meme).put(update_meme).delete(delete_meme),
        )
}

fn unprocessable(detail: String) -> Response {
    detail_response(StatusCode::UNPROCESSABLE_ENTITY, detail)
}

/// GET `/memes`
async fn list_memes(
    State(state): State<GatewayState>,
    query: Result<Query<PageRequest>, QueryRejection>,
) -> Response {
    let page = match query {
        Ok(Query(page)) => page,
        Err(e) => return unprocessable(e.body_text()),
    };
    if let Err(e) = page.validate() {
        return unprocessable(e.detail().to_string());
    }

    Operation::List.respond(state.storage.list(page.skip, page.limit).await)
}

/// GET `/memes/{id}`
async fn get_meme(
    State(state): State<GatewayState>,
    path: Result<Path<i32>, PathRejection>,
) -> Response {
    match path {
        Ok(Path(id)) => Operation::Get.respond(state.storage.get(id).await),
        Err(e) => unprocessable(e.body_text()),
    }
}

/// POST `/memes`
async fn upload_meme(State(state): State<GatewayState>, mut multipart: Multipart) -> Response {
    let mut file: Option<ForwardedFile> = None;
    let mut description: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return detail_response(StatusCode::BAD_REQUEST, e.body_text()),
        };
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_owned);
                match field.bytes().await {
                    Ok(data) => {
                        file = Some(ForwardedFile {
                            file_name,
                            content_type,
                            data,
                        });
                    }
                    Err(e) => return detail_response(StatusCode::BAD_REQUEST, e.body_text()),
                }
            }
            Some(DESCRIPTION_FIELD) => match field.text().await {
                Ok(text) => description = Some(text),
                Err(e) => return detail_response(StatusCode::BAD_REQUEST, e.body_text()),
            },
            _ => {}
        }
    }

    let Some(file) = file else {
        return unprocessable(format!("Field required: {FILE_FIELD}"));
    };
    let Some(description) = description else {
        return unprocessable(format!("Field required: {DESCRIPTION_FIELD}"));
    };

    Operation::Create.respond(state.storage.create(&file, description).await)
}

/// PUT `/memes/{id}`
async fn update_meme(
    State(state): State<GatewayState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let id = match path {
        Ok(Path(id)) => id,
        Err(e) => return unprocessable(e.body_text()),
    };
    let body = match body {
        Ok(Json(body)) => body,
        Err(e) => return unprocessable(e.body_text()),
    };

    Operation::Update.respond(state.storage.update(id, &body).await)
}

/// DELETE `/memes/{id}`
async fn delete_meme(
    State(state): State<GatewayState>,
    path: Result<Path<i32>, PathRejection>,
) -> Response {
    match path {
        Ok(Path(id)) => Operation::Delete.respond(state.storage.delete(id).await),
        Err(e) => unprocessable(e.body_text()),
    }
}
