use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use mongodb::bson::{oid::ObjectId, Document};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{document_to_api_value, documents_to_api_values};
use crate::constants::{INVALID_BODY_MESSAGE, INVALID_ID_MESSAGE};
use crate::database::{parse_object_id, InsertResult};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// A document collection served with the uniform CRUD contract.
///
/// Implementors name the collection, the client-facing messages and the
/// payload types; the generic handlers below do the rest.
pub trait Resource: Send + Sync + 'static {
    const COLLECTION: &'static str;

    const CREATED_MESSAGE: &'static str;
    const NOT_FOUND_MESSAGE: &'static str;
    const UPDATED_MESSAGE: &'static str;
    const DELETED_MESSAGE: &'static str;

    type Create: DeserializeOwned + Send + 'static;
    type Patch: DeserializeOwned + Send + 'static;

    /// Validate a creation payload into the document to insert
    fn create_document(payload: Self::Create) -> Result<Document, ApiError>;

    /// Validate an update payload into the fields to `$set`
    fn patch_document(payload: Self::Patch) -> Result<Document, ApiError>;
}

/// Path identifier that must be present and a well-formed ObjectId
pub fn require_id(id: Option<Path<String>>) -> Result<ObjectId, ApiError> {
    match id {
        Some(Path(raw)) if !raw.trim().is_empty() => Ok(parse_object_id(&raw)?),
        _ => Err(ApiError::BadRequest(INVALID_ID_MESSAGE)),
    }
}

pub fn require_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!("Rejected request body: {}", rejection.body_text());
            Err(ApiError::BadRequest(INVALID_BODY_MESSAGE))
        }
    }
}

/// GET collection - first documents of the collection
pub async fn list<R: Resource>(State(state): State<AppState>) -> ApiResult<Vec<Value>> {
    let documents = state.store.find_many(R::COLLECTION).await?;
    debug!("Listed {} documents from {}", documents.len(), R::COLLECTION);
    Ok(ApiResponse::success(documents_to_api_values(documents)))
}

/// GET by id
pub async fn show<R: Resource>(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> ApiResult<Value> {
    let id = require_id(id)?;

    match state.store.find_one(R::COLLECTION, id).await? {
        Some(document) => Ok(ApiResponse::success(document_to_api_value(document))),
        None => Err(ApiError::NotFound(R::NOT_FOUND_MESSAGE)),
    }
}

/// POST collection - insert one document
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<R::Create>, JsonRejection>,
) -> ApiResult<InsertResult> {
    let document = R::create_document(require_body(payload)?)?;

    let result = state.store.insert_one(R::COLLECTION, document).await?;
    info!("Created document {} in {}", result.inserted_id, R::COLLECTION);
    Ok(ApiResponse::created(R::CREATED_MESSAGE, result))
}

/// PUT by id - partial update of the supplied fields
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    id: Option<Path<String>>,
    payload: Result<Json<R::Patch>, JsonRejection>,
) -> ApiResult<()> {
    let id = require_id(id)?;
    let fields = R::patch_document(require_body(payload)?)?;

    let outcome = state.store.update_one(R::COLLECTION, id, fields).await?;
    if !outcome.found() {
        return Err(ApiError::NotFound(R::NOT_FOUND_MESSAGE));
    }
    debug!(
        "Updated document {} in {} (modified: {})",
        id, R::COLLECTION, outcome.modified
    );
    Ok(ApiResponse::ok(R::UPDATED_MESSAGE))
}

/// DELETE by id
pub async fn remove<R: Resource>(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> ApiResult<()> {
    let id = require_id(id)?;

    if !state.store.delete_one(R::COLLECTION, id).await? {
        return Err(ApiError::NotFound(R::NOT_FOUND_MESSAGE));
    }
    info!("Deleted document {} from {}", id, R::COLLECTION);
    Ok(ApiResponse::deleted(R::DELETED_MESSAGE))
}

/// Any verb a route does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
