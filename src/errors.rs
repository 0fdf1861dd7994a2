use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by an `ObjectStore` or `StoreConnector` call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },

    #[error("gave up waiting after {attempts} attempts: {message}")]
    WaitTimedOut { attempts: u32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Credentials error: {0}")]
    Credentials(String),
}

impl StoreError {
    pub fn service(operation: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Service {
            operation,
            message: err.to_string(),
        }
    }
}

/// Terminal failure of a lifecycle run. Each variant names the step that failed.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("bucket name must not be empty")]
    InvalidBucket,

    #[error("Unable to open file {path:?}, {source}")]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to create storage client, {0}")]
    ClientInit(#[source] StoreError),

    #[error("Unable to list buckets, {0}")]
    RemoteQuery(#[source] StoreError),

    #[error("Unable to create bucket {bucket:?}, {source}")]
    Create {
        bucket: String,
        #[source]
        source: StoreError,
    },

    #[error("Error occurred while waiting for {what}, {source}")]
    ConsistencyTimeout {
        what: String,
        #[source]
        source: StoreError,
    },

    #[error("Unable to upload {key:?} to {bucket:?}, {source}")]
    Upload {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Unable to download item {key:?}, {source}")]
    Download {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Unable to delete object {key:?} from bucket {bucket:?}, {source}")]
    Delete {
        bucket: String,
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("Unable to delete bucket {bucket:?}, {source}")]
    DeleteBucket {
        bucket: String,
        #[source]
        source: StoreError,
    },

    #[error("Downloaded copy of {key:?} does not match the source (md5 {expected} != {actual})")]
    Verify {
        key: String,
        expected: String,
        actual: String,
    },
}

impl WorkflowError {
    pub(crate) fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.into(),
            source,
        }
    }
}
