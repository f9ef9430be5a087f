pub mod manager;
pub mod memory;
pub mod mongo;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager, SharedStore};
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{parse_object_id, DocumentStore, InsertResult, UpdateOutcome};
