use crate::errors::StoreError;
use crate::ports::{ObjectStore, StoreConnector};
use crate::s3::models::{CredentialFiles, S3ObjectStore, StorageConfig};
use crate::utils::log_utils;
use aws_config::retry::RetryConfig;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Region};

impl S3ObjectStore {
    /// Create a new S3 client from the provided config
    ///
    /// # Errors
    ///
    /// Returns an error if the tokio runtime cannot be created.
    pub fn new(config: &StorageConfig, verbose: u8) -> Result<Self, StoreError> {
        let credentials = config
            .credential_files
            .as_ref()
            .map(CredentialFiles::load)
            .transpose()?;

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| StoreError::Runtime(format!("Failed to create runtime: {e}")))?;

        if verbose >= 2 {
            log_utils::debug("Creating S3 client with these parameters:", verbose);
            log_utils::debug(&format!("Region: {}", config.region), verbose);
            log_utils::debug(
                &format!(
                    "Endpoint: {}",
                    config.endpoint_url.as_deref().unwrap_or("(aws default)")
                ),
                verbose,
            );
            log_utils::debug(
                &format!("Profile: {}", config.profile.as_deref().unwrap_or("(default)")),
                verbose,
            );
            if let Some(creds) = &credentials {
                log_utils::debug(&format!("Credentials: {creds:?}"), verbose);
            }
            log_utils::debug(&format!("Max attempts: {}", config.max_attempts), verbose);
        }

        let sdk_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(config.region.clone()))
                .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts));

            if let Some(profile) = &config.profile {
                loader = loader.profile_name(profile);
            }
            if let Some(endpoint) = &config.endpoint_url {
                loader = loader.endpoint_url(endpoint);
            }
            if let Some(creds) = &credentials {
                loader = loader.credentials_provider(Credentials::new(
                    creds.key_id.clone(),
                    creds.secret_key.clone(),
                    None, // No session token
                    None, // No expiry
                    "StaticFileCredentials",
                ));
            }

            loader.load().await
        });

        // Custom endpoints rarely support virtual-hosted buckets
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.endpoint_url.is_some())
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            runtime,
            region: config.region.clone(),
            custom_endpoint: config.endpoint_url.is_some(),
            verbose,
        })
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }
}

/// Builds an `S3ObjectStore` on demand.
pub struct S3Connector {
    config: StorageConfig,
    verbose: u8,
}

impl S3Connector {
    #[must_use]
    pub fn new(config: StorageConfig, verbose: u8) -> Self {
        Self { config, verbose }
    }
}

impl StoreConnector for S3Connector {
    fn connect(&self) -> Result<Box<dyn ObjectStore>, StoreError> {
        let store = S3ObjectStore::new(&self.config, self.verbose)?;
        log_utils::info(
            &format!("Connected to storage in region {}", store.region()),
            self.verbose,
        );
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s3::models::StaticCredentials;
    use std::fs;

    fn offline_config(dir: &std::path::Path) -> StorageConfig {
        let key_id_path = dir.join("key_id");
        let secret_key_path = dir.join("secret_key");
        fs::write(&key_id_path, "dummy-key\n").unwrap();
        fs::write(&secret_key_path, "dummy-secret\n").unwrap();
        StorageConfig {
            region: "us-east-1".to_string(),
            endpoint_url: Some("http://127.0.0.1:9".to_string()),
            profile: None,
            credential_files: Some(CredentialFiles {
                key_id_path,
                secret_key_path,
            }),
            max_attempts: 1,
        }
    }

    #[test]
    fn builds_client_without_network() {
        let dir = tempfile::tempdir().unwrap();
        let store = S3ObjectStore::new(&offline_config(dir.path()), 0).unwrap();
        assert_eq!(store.region(), "us-east-1");
        assert!(store.custom_endpoint);
    }

    #[test]
    fn connector_hands_out_a_store() {
        let dir = tempfile::tempdir().unwrap();
        let connector = S3Connector::new(offline_config(dir.path()), 0);
        assert!(connector.connect().is_ok());
    }

    #[test]
    fn unreadable_credentials_fail_client_creation() {
        let dir = tempfile::tempdir().unwrap();
        let config = offline_config(dir.path());
        fs::remove_file(dir.path().join("secret_key")).unwrap();
        let connector = S3Connector::new(config, 0);
        assert!(matches!(
            connector.connect(),
            Err(StoreError::Credentials(_))
        ));
    }

    #[test]
    fn credentials_debug_hides_secret() {
        let creds = StaticCredentials {
            key_id: "AKIAEXAMPLE".to_string(),
            secret_key: "supersecret".to_string(),
        };
        let shown = format!("{creds:?}");
        assert!(shown.contains("AKIA****"));
        assert!(!shown.contains("supersecret"));
    }
}
