use crate::errors::StoreError;
use crate::utils::path_utils::read_value_from_file;
use aws_sdk_s3::Client;
use std::path::PathBuf;

pub const DEFAULT_REGION: &str = "us-west-2";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Access key pair read from files on the command line
#[derive(Clone)]
pub struct StaticCredentials {
    pub key_id: String,
    pub secret_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field(
                "key_id",
                &format!("{}****", self.key_id.chars().take(4).collect::<String>()),
            )
            .field("secret_key", &"****")
            .finish()
    }
}

/// Files holding a static key pair, read when the client is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialFiles {
    pub key_id_path: PathBuf,
    pub secret_key_path: PathBuf,
}

impl CredentialFiles {
    /// # Errors
    ///
    /// Returns `StoreError::Credentials` if either file is unreadable or blank.
    pub fn load(&self) -> Result<StaticCredentials, StoreError> {
        Ok(StaticCredentials {
            key_id: read_value_from_file(&self.key_id_path).map_err(StoreError::Credentials)?,
            secret_key: read_value_from_file(&self.secret_key_path)
                .map_err(StoreError::Credentials)?,
        })
    }
}

/// Configuration for an S3-compatible storage client
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub region: String,
    /// Set for S3-compatible services (MinIO, R2, B2, ...); implies path-style addressing
    pub endpoint_url: Option<String>,
    pub profile: Option<String>,
    /// When absent the SDK default credential chain is used
    pub credential_files: Option<CredentialFiles>,
    /// SDK retry attempts per request
    pub max_attempts: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            endpoint_url: None,
            profile: None,
            credential_files: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// `ObjectStore` backed by the AWS SDK. Every call is driven to completion
/// on the store's own runtime.
pub struct S3ObjectStore {
    pub(crate) client: Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) region: String,
    pub(crate) custom_endpoint: bool,
    pub verbose: u8,
}
