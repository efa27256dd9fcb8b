//! Label Store Gateway: thin CRUD over an opaque document store.
//!
//! No business logic lives here. The trait keeps the real document store
//! swappable; [`MemoryLabelStore`] is the in-process implementation and the
//! test double. Labels are immutable, so concurrent `put` calls for different
//! ids never need cross-label coordination.
pub mod memory;

pub use memory::MemoryLabelStore;

use async_trait::async_trait;
use labelforge_core::Label;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The id does not exist. Distinct from the store being unreachable.
    #[error("NOTFOUND/no label with id '{0}'")]
    NotFound(String),

    #[error("STORE/{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait LabelStore: Send + Sync {
    /// Insert or overwrite the document stored under the label's id.
    async fn put(&self, label: &Label) -> Result<(), StoreError>;

    async fn get(&self, label_id: &str) -> Result<Label, StoreError>;

    /// Every stored label, in no particular order.
    async fn list(&self) -> Result<Vec<Label>, StoreError>;

    /// Remove a label. Deleting an absent id yields [`StoreError::NotFound`],
    /// so a repeated delete is a clean miss rather than a crash.
    async fn delete(&self, label_id: &str) -> Result<(), StoreError>;
}
