use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{DispatchPolicy, SweepDelays};

use super::Environment;

const BYTES_PER_MB: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub dispatch: DispatchSettings,
    pub registry: RegistrySettings,
    pub transform: TransformSettings,
    pub stores: StoreSettings,
    pub salesforce: Option<SalesforceSettings>,
    pub google_drive: Option<GoogleDriveSettings>,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Defaults, then `appsettings.<env>` if present, then `APP_*`
    /// variables (`APP_SERVER__PORT=8080` sets `server.port`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("dispatch.async_threshold_mb", 20)?
            .set_default("dispatch.seconds_per_mb", 1.0)?
            .set_default("dispatch.request_budget_secs", 25)?
            .set_default("registry.completed_sweep_secs", 60 * 60)?
            .set_default("registry.failed_sweep_secs", 10 * 60)?
            .set_default("transform.engine", "ghostscript")?
            .set_default("transform.base_dpi", 150.0)?
            .set_default("transform.ghostscript_binary", "gs")?
            .set_default("stores.provider", "remote")?
            .set_default("logging.level", "info,docrelay=debug,tower_http=debug")?
            .set_default("logging.enable_json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{environment}"))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DispatchSettings {
    pub async_threshold_mb: u64,
    pub seconds_per_mb: f64,
    pub request_budget_secs: u64,
}

impl DispatchSettings {
    pub fn policy(&self) -> DispatchPolicy {
        DispatchPolicy::new(
            self.async_threshold_mb * BYTES_PER_MB,
            self.seconds_per_mb,
            Duration::from_secs(self.request_budget_secs),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    pub completed_sweep_secs: u64,
    pub failed_sweep_secs: u64,
}

impl RegistrySettings {
    pub fn sweep_delays(&self) -> SweepDelays {
        SweepDelays {
            completed: Duration::from_secs(self.completed_sweep_secs),
            failed: Duration::from_secs(self.failed_sweep_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    Ghostscript,
    Pdfium,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransformSettings {
    pub engine: EngineKind,
    pub base_dpi: f32,
    pub ghostscript_binary: String,
    pub pdfium_library_path: Option<String>,
    /// Parent directory for Ghostscript work files; the system temp dir
    /// when unset.
    pub temp_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    Remote,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub provider: StoreProvider,
}

#[derive(Clone, Deserialize)]
pub struct SalesforceSettings {
    pub instance_url: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_max_payload_mb")]
    pub max_payload_mb: u64,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl SalesforceSettings {
    pub fn max_payload_bytes(&self) -> u64 {
        self.max_payload_mb * BYTES_PER_MB
    }
}

impl std::fmt::Debug for SalesforceSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceSettings")
            .field("instance_url", &self.instance_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("max_payload_mb", &self.max_payload_mb)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .finish()
    }
}

#[derive(Clone, Deserialize)]
pub struct GoogleDriveSettings {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub token_url: Option<String>,
    pub upload_url: Option<String>,
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
}

impl std::fmt::Debug for GoogleDriveSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleDriveSettings")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

fn default_api_version() -> String {
    "v58.0".to_string()
}

fn default_max_payload_mb() -> u64 {
    50
}

fn default_fetch_timeout_secs() -> u64 {
    25
}

fn default_upload_timeout_secs() -> u64 {
    600
}
