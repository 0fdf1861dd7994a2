pub mod bucket;
pub mod client;
pub mod models;
pub mod object;

// Re-export types for convenient access from other modules
pub use client::S3Connector;
pub use models::{
    CredentialFiles, DEFAULT_MAX_ATTEMPTS, DEFAULT_REGION, S3ObjectStore, StaticCredentials,
    StorageConfig,
};
