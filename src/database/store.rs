use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, DateTime, Document};
use serde::Serialize;
use utoipa::ToSchema;

use crate::constants::{CREATED_AT_FIELD, REFERENCE_FIELD};
use crate::database::manager::DatabaseError;

/// Result of a successful insert, shaped like the driver's acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: String,
}

impl InsertResult {
    pub fn new(inserted_id: &Bson) -> Self {
        let inserted_id = match inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Counts reported by a single-document update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

impl UpdateOutcome {
    pub fn found(&self) -> bool {
        self.matched > 0
    }
}

/// Single-collection document operations used by every resource handler.
///
/// Absence is never an error: `find_one` yields `None`, `delete_one` yields
/// `false` and `update_one` reports `matched == 0`. Any other failure is
/// returned unchanged to the caller.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Up to `LIST_LIMIT` documents, unfiltered, in store order
    async fn find_many(&self, collection: &str) -> Result<Vec<Document>, DatabaseError>;

    /// Up to `LIST_LIMIT` documents whose reference field equals `reference_id`
    async fn find_filtered(
        &self,
        collection: &str,
        reference_id: ObjectId,
    ) -> Result<Vec<Document>, DatabaseError>;

    async fn find_one(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, DatabaseError>;

    /// Persist a document after [`prepare_insert`] has normalised it
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertResult, DatabaseError>;

    /// Merge `fields` into the matching document; other fields are untouched
    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateOutcome, DatabaseError>;

    /// Whether a document was actually removed
    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Short backend name for logs and health output
    fn backend(&self) -> &'static str;
}

/// Parse the external 24-hex form of an identifier
pub fn parse_object_id(raw: &str) -> Result<ObjectId, DatabaseError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| DatabaseError::InvalidId(raw.to_string()))
}

/// Documents carrying a reference get it converted to an ObjectId and are
/// stamped with a creation timestamp. Others pass through unchanged.
pub fn prepare_insert(mut document: Document) -> Result<Document, DatabaseError> {
    let reference = match document.get(REFERENCE_FIELD) {
        None | Some(Bson::Null) => return Ok(document),
        Some(Bson::ObjectId(oid)) => *oid,
        Some(Bson::String(raw)) => parse_object_id(raw)?,
        Some(other) => return Err(DatabaseError::InvalidId(other.to_string())),
    };

    document.insert(REFERENCE_FIELD, reference);
    document.insert(CREATED_AT_FIELD, DateTime::now());
    Ok(document)
}
