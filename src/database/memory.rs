use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use crate::constants::{ID_FIELD, LIST_LIMIT, REFERENCE_FIELD};
use crate::database::manager::DatabaseError;
use crate::database::store::{prepare_insert, DocumentStore, InsertResult, UpdateOutcome};

/// In-process document store keeping each collection in insertion order.
/// Used for local development without MongoDB and by the test suite.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn has_id(document: &Document, id: &ObjectId) -> bool {
    matches!(document.get(ID_FIELD), Some(Bson::ObjectId(oid)) if oid == id)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_many(&self, collection: &str) -> Result<Vec<Document>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().take(LIST_LIMIT as usize).cloned().collect::<Vec<_>>())
            .unwrap_or_default())
    }

    async fn find_filtered(
        &self,
        collection: &str,
        reference_id: ObjectId,
    ) -> Result<Vec<Document>, DatabaseError> {
        let collections = self.collections.read().await;
        let reference = Bson::ObjectId(reference_id);
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.get(REFERENCE_FIELD) == Some(&reference))
                    .take(LIST_LIMIT as usize)
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, DatabaseError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| has_id(doc, &id)).cloned()))
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertResult, DatabaseError> {
        let document = prepare_insert(document)?;

        // _id leads the document, as the server stores it
        let existing = match document.get(ID_FIELD) {
            Some(Bson::ObjectId(oid)) => Some(*oid),
            Some(other) => return Err(DatabaseError::InvalidId(other.to_string())),
            None => None,
        };
        let (id, document) = match existing {
            Some(oid) => (oid, document),
            None => {
                let oid = ObjectId::new();
                let mut with_id = Document::new();
                with_id.insert(ID_FIELD, oid);
                for (key, value) in document {
                    with_id.insert(key, value);
                }
                (oid, with_id)
            }
        };

        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|doc| has_id(doc, &id)) {
            return Err(DatabaseError::DuplicateKey(id.to_hex()));
        }
        docs.push(document);

        Ok(InsertResult::new(&Bson::ObjectId(id)))
    }

    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateOutcome, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(target) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| has_id(doc, &id)))
        else {
            return Ok(UpdateOutcome::default());
        };

        let mut modified = false;
        for (key, value) in fields {
            if target.get(&key) != Some(&value) {
                target.insert(key, value);
                modified = true;
            }
        }

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(modified),
        })
    }

    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<bool, DatabaseError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        match docs.iter().position(|doc| has_id(doc, &id)) {
            Some(index) => {
                docs.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
