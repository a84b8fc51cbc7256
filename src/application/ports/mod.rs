mod destination_store;
mod job_registry;
mod source_store;
mod transform_engine;

pub use destination_store::{DestinationStore, DestinationStoreError, StoreHints, StoredDocument};
pub use job_registry::{JobRegistry, RegistryError};
pub use source_store::{SourceMetadata, SourceStore, SourceStoreError};
pub use transform_engine::{NoopProgressSink, ProgressSink, TransformEngine, TransformError};
