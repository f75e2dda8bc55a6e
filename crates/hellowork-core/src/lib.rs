pub mod error;
pub mod parsed;
pub mod raw;
pub mod record;
pub mod store;

pub use error::FieldError;
pub use record::{InsertPayload, JobFields, JobStatus, StoredRecord, UiRecord};
pub use store::{JobStore, MemoryStore, StoreError};
