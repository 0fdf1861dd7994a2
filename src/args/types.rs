use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::validators::validate;
use crate::lifecycle::{KeyMode, LifecycleOptions, WaitPolicy};
use crate::lifecycle::wait::DEFAULT_WAIT_MAX_ATTEMPTS;
use crate::s3::{CredentialFiles, DEFAULT_MAX_ATTEMPTS, DEFAULT_REGION, StorageConfig};
use crate::utils::path_utils::{check_parent_dir_writable, check_readable_file};

pub const DEFAULT_WAIT_INTERVAL_SECS: u64 = 5;

/// Round-trip a local file through an S3 bucket: create the bucket if needed,
/// upload, download a copy, then delete the object.
#[derive(Parser, Debug, Clone, serde::Serialize)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Bucket to use; created when it does not exist yet
    #[arg(value_name = "BUCKET_NAME")]
    pub bucket: String,

    /// Local file to upload. The copy is written next to it with a `.downloaded` suffix
    #[arg(value_name = "FILE_PATH")]
    pub file_path: PathBuf,

    /// Region of the storage service
    #[arg(long, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Endpoint of an S3-compatible service (MinIO, R2, B2, ...)
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Shared config profile to resolve credentials from
    #[arg(long)]
    pub profile: Option<String>,

    /// File containing the access key id (requires --secret-key-filepath)
    #[arg(
        long,
        value_name = "PATH",
        value_parser = check_readable_file,
        requires = "secret_key_filepath"
    )]
    pub access_key_id_filepath: Option<PathBuf>,

    /// File containing the secret access key (requires --access-key-id-filepath)
    #[arg(
        long,
        value_name = "PATH",
        value_parser = check_readable_file,
        requires = "access_key_id_filepath"
    )]
    pub secret_key_filepath: Option<PathBuf>,

    /// Attempts per request, including SDK retries
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Seconds between consistency checks after create/delete
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_WAIT_INTERVAL_SECS)]
    pub wait_interval_secs: u64,

    /// Consistency checks before giving up
    #[arg(long, value_name = "N", default_value_t = DEFAULT_WAIT_MAX_ATTEMPTS)]
    pub wait_max_attempts: u32,

    /// How the object key is derived from FILE_PATH
    #[arg(long, value_enum, default_value_t = KeyMode::Basename)]
    pub key_mode: KeyMode,

    /// Delete the bucket too once the object is gone
    #[arg(long)]
    pub delete_bucket: bool,

    /// Compare MD5 of the source and the downloaded copy
    #[arg(long)]
    pub verify: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "PATH", value_parser = check_parent_dir_writable)]
    pub summary_json: Option<PathBuf>,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Validate argument combinations clap cannot express
    ///
    /// # Errors
    ///
    /// Returns an error message describing the first invalid argument.
    pub fn validate(&self) -> Result<(), String> {
        validate(self)
    }

    /// Storage client settings derived from the arguments
    #[must_use]
    pub fn storage_config(&self) -> StorageConfig {
        let credential_files = match (&self.access_key_id_filepath, &self.secret_key_filepath) {
            (Some(key_id_path), Some(secret_key_path)) => Some(CredentialFiles {
                key_id_path: key_id_path.clone(),
                secret_key_path: secret_key_path.clone(),
            }),
            _ => None,
        };

        StorageConfig {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            profile: self.profile.clone(),
            credential_files,
            max_attempts: self.max_attempts,
        }
    }

    /// Lifecycle settings derived from the arguments
    #[must_use]
    pub fn lifecycle_options(&self) -> LifecycleOptions {
        LifecycleOptions {
            key_mode: self.key_mode,
            wait: WaitPolicy::new(
                Duration::from_secs(self.wait_interval_secs),
                self.wait_max_attempts,
            ),
            delete_bucket: self.delete_bucket,
            verify: self.verify,
        }
    }
}
