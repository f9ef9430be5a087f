use axum::extract::{rejection::QueryRejection, Query, State};
use mongodb::bson::{oid::ObjectId, Document};
use serde::Deserialize;
use utoipa::ToSchema;
use serde_json::Value;
use tracing::debug;

use crate::api::documents_to_api_values;
use crate::constants::{
    COMMENTS_COLLECTION, COMMENT_CREATED_MESSAGE, COMMENT_DELETED_MESSAGE,
    COMMENT_EDITED_MESSAGE, COMMENT_NOT_FOUND_MESSAGE, DOCUMENT_BODY_REQUIRED_MESSAGE,
    MOVIE_ID_REQUIRED_MESSAGE, REFERENCE_FIELD,
};
use crate::database::parse_object_id;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::resource::Resource;

/// The `comments` collection; every comment references a movie
pub struct Comments;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewComment {
    pub name: Option<String>,
    pub email: Option<String>,
    pub text: Option<String>,
    pub movie_id: Option<String>,
}

/// Editable comment fields; the movie reference is fixed at creation
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentsQuery {
    pub movie_id: Option<String>,
}

/// Movie reference that must be present and a well-formed ObjectId
pub fn require_reference(movie_id: Option<&str>) -> Result<ObjectId, ApiError> {
    match movie_id.map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(parse_object_id(raw)?),
        _ => Err(ApiError::BadRequest(MOVIE_ID_REQUIRED_MESSAGE)),
    }
}

fn insert_text_fields(
    document: &mut Document,
    name: Option<String>,
    email: Option<String>,
    text: Option<String>,
) {
    for (key, value) in [("name", name), ("email", email), ("text", text)] {
        if let Some(value) = value {
            document.insert(key, value);
        }
    }
}

impl Resource for Comments {
    const COLLECTION: &'static str = COMMENTS_COLLECTION;

    const CREATED_MESSAGE: &'static str = COMMENT_CREATED_MESSAGE;
    const NOT_FOUND_MESSAGE: &'static str = COMMENT_NOT_FOUND_MESSAGE;
    const UPDATED_MESSAGE: &'static str = COMMENT_EDITED_MESSAGE;
    const DELETED_MESSAGE: &'static str = COMMENT_DELETED_MESSAGE;

    type Create = NewComment;
    type Patch = CommentPatch;

    fn create_document(payload: NewComment) -> Result<Document, ApiError> {
        let movie_id = require_reference(payload.movie_id.as_deref())?;

        let mut document = Document::new();
        insert_text_fields(&mut document, payload.name, payload.email, payload.text);
        // Converted to an ObjectId and timestamped by the data layer on insert
        document.insert(REFERENCE_FIELD, movie_id.to_hex());
        Ok(document)
    }

    fn patch_document(payload: CommentPatch) -> Result<Document, ApiError> {
        let mut document = Document::new();
        insert_text_fields(&mut document, payload.name, payload.email, payload.text);
        if document.is_empty() {
            return Err(ApiError::BadRequest(DOCUMENT_BODY_REQUIRED_MESSAGE));
        }
        Ok(document)
    }
}

/// GET /api/movie/comments?movie_id=... - comments attached to one movie
pub async fn list_for_movie(
    State(state): State<AppState>,
    query: Result<Query<CommentsQuery>, QueryRejection>,
) -> ApiResult<Vec<Value>> {
    let movie_id = match &query {
        Ok(Query(query)) => query.movie_id.as_deref(),
        Err(rejection) => {
            debug!("Rejected query string: {}", rejection.body_text());
            None
        }
    };
    let movie_id = require_reference(movie_id)?;

    let comments = state.store.find_filtered(COMMENTS_COLLECTION, movie_id).await?;
    debug!("Found {} comments for movie {}", comments.len(), movie_id);
    Ok(ApiResponse::success(documents_to_api_values(comments)))
}
