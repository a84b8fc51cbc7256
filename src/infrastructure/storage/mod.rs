mod google_drive_store;
mod mock_store;
mod salesforce_store;
mod store_factory;

pub use google_drive_store::{DEFAULT_UPLOAD_URL, GoogleDriveStore, UploadProgress};
pub use mock_store::{MockDestinationStore, MockSourceStore, StoredCall};
pub use salesforce_store::{DEFAULT_API_VERSION, SalesforceStore};
pub use store_factory::{StoreFactory, StoreFactoryError, Stores};
