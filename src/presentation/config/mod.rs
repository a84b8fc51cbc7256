mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    DispatchSettings, EngineKind, GoogleDriveSettings, LoggingSettings, RegistrySettings,
    SalesforceSettings, ServerSettings, Settings, StoreProvider, StoreSettings, TransformSettings,
};
