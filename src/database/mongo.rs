use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::{Client, Collection, Database};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::constants::{LIST_LIMIT, REFERENCE_FIELD};
use crate::database::manager::DatabaseError;
use crate::database::store::{prepare_insert, DocumentStore, InsertResult, UpdateOutcome};

/// MongoDB-backed store. The client is created on first use and kept for the
/// lifetime of the process; the driver pools connections underneath it.
pub struct MongoStore {
    uri: String,
    database_name: String,
    database: OnceCell<Database>,
}

impl MongoStore {
    pub fn new(uri: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database_name: database_name.into(),
            database: OnceCell::new(),
        }
    }

    async fn database(&self) -> Result<&Database, DatabaseError> {
        self.database
            .get_or_try_init(|| async {
                let client = Client::with_uri_str(&self.uri).await?;
                info!("Created MongoDB client for database: {}", self.database_name);
                Ok::<_, DatabaseError>(client.database(&self.database_name))
            })
            .await
    }

    async fn collection(&self, name: &str) -> Result<Collection<Document>, DatabaseError> {
        Ok(self.database().await?.collection::<Document>(name))
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find_many(&self, collection: &str) -> Result<Vec<Document>, DatabaseError> {
        let cursor = self
            .collection(collection)
            .await?
            .find(doc! {})
            .limit(LIST_LIMIT)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_filtered(
        &self,
        collection: &str,
        reference_id: ObjectId,
    ) -> Result<Vec<Document>, DatabaseError> {
        let mut filter = Document::new();
        filter.insert(REFERENCE_FIELD, reference_id);

        let cursor = self
            .collection(collection)
            .await?
            .find(filter)
            .limit(LIST_LIMIT)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: ObjectId,
    ) -> Result<Option<Document>, DatabaseError> {
        Ok(self
            .collection(collection)
            .await?
            .find_one(doc! { "_id": id })
            .await?)
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<InsertResult, DatabaseError> {
        let document = prepare_insert(document)?;
        let result = self.collection(collection).await?.insert_one(document).await?;
        debug!("Inserted document {} into {}", result.inserted_id, collection);
        Ok(InsertResult::new(&result.inserted_id))
    }

    async fn update_one(
        &self,
        collection: &str,
        id: ObjectId,
        fields: Document,
    ) -> Result<UpdateOutcome, DatabaseError> {
        let result = self
            .collection(collection)
            .await?
            .update_one(doc! { "_id": id }, doc! { "$set": fields })
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: &str, id: ObjectId) -> Result<bool, DatabaseError> {
        let result = self
            .collection(collection)
            .await?
            .delete_one(doc! { "_id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.database().await?.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }
}
