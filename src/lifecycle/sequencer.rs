use std::fs::File;
use std::path::Path;

use crate::errors::WorkflowError;
use crate::lifecycle::key::{KeyMode, download_path, object_key};
use crate::lifecycle::state::{LifecycleState, Stage};
use crate::lifecycle::wait::WaitPolicy;
use crate::ports::{ObjectStore, StoreConnector};
use crate::report::{RunSummary, file_md5, timestamp};
use crate::utils::log_utils::Logger;

/// Knobs for a single run.
#[derive(Debug, Clone, Default)]
pub struct LifecycleOptions {
    pub key_mode: KeyMode,
    pub wait: WaitPolicy,
    /// Remove the bucket after the object is gone
    pub delete_bucket: bool,
    /// Compare MD5 of the source and the downloaded copy
    pub verify: bool,
}

/// Runs the ordered bucket/object workflow against whatever store the
/// connector hands out. Each step must succeed before the next is attempted;
/// the first failure ends the run without undoing earlier steps.
pub struct Lifecycle {
    connector: Box<dyn StoreConnector>,
    options: LifecycleOptions,
    logger: Logger,
    state: LifecycleState,
}

impl Lifecycle {
    #[must_use]
    pub fn new(
        connector: Box<dyn StoreConnector>,
        options: LifecycleOptions,
        logger: Logger,
    ) -> Self {
        Self {
            connector,
            options,
            logger,
            state: LifecycleState::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Execute the workflow for `file_path` against `bucket`.
    ///
    /// # Errors
    ///
    /// Returns the `WorkflowError` of the first step that fails. The state is
    /// left at `Failed(stage)` where `stage` is the last milestone reached.
    /// Every call starts over from `Running(Init)`.
    pub fn run(&mut self, bucket: &str, file_path: &Path) -> Result<RunSummary, WorkflowError> {
        if self.state.is_terminal() {
            self.logger
                .debug(&format!("Previous run ended as {:?}", self.state));
        }
        self.state = LifecycleState::default();

        let result = self.execute(bucket, file_path);
        if result.is_err() {
            self.state.fail();
            self.logger
                .debug(&format!("Stopped at stage: {}", self.state.stage()));
        }
        result
    }

    fn execute(&mut self, bucket: &str, file_path: &Path) -> Result<RunSummary, WorkflowError> {
        if bucket.is_empty() {
            return Err(WorkflowError::InvalidBucket);
        }
        let started = timestamp();
        let key = object_key(file_path, self.options.key_mode);

        let source =
            File::open(file_path).map_err(|e| WorkflowError::local_io(file_path, e))?;
        self.state.advance(Stage::FileOpened);
        self.logger
            .info(&format!("Opened {} (object key {key:?})", file_path.display()));

        let store = self.connector.connect().map_err(WorkflowError::ClientInit)?;
        self.state.advance(Stage::ClientReady);

        let buckets = store.list_buckets().map_err(WorkflowError::RemoteQuery)?;
        let bucket_exists = buckets.iter().any(|name| name == bucket);
        self.state.advance(Stage::BucketChecked);
        self.logger.debug(&format!(
            "Found {} buckets, {bucket:?} present: {bucket_exists}",
            buckets.len()
        ));

        if bucket_exists {
            self.logger
                .info(&format!("Bucket {bucket:?} already exists, skipping creation"));
        } else {
            self.create_bucket(store.as_ref(), bucket)?;
        }
        self.state.advance(Stage::BucketEnsured);

        let uploaded_bytes = store
            .put_object(bucket, &key, source)
            .map_err(|source| WorkflowError::Upload {
                bucket: bucket.to_string(),
                key: key.clone(),
                source,
            })?;
        self.state.advance(Stage::Uploaded);
        self.logger
            .normal(&format!("Successfully uploaded {key:?} to {bucket:?}"));
        self.logger.debug(&format!("Sent {uploaded_bytes} bytes"));

        let download_path = download_path(file_path);
        let downloaded_bytes = {
            let mut sink = File::create(&download_path)
                .map_err(|e| WorkflowError::local_io(&download_path, e))?;
            store
                .get_object(bucket, &key, &mut sink)
                .map_err(|source| WorkflowError::Download {
                    key: key.clone(),
                    source,
                })?
        };
        self.state.advance(Stage::Downloaded);
        self.logger.normal(&format!(
            "Downloaded {} {downloaded_bytes} bytes",
            download_path.display()
        ));

        let (source_md5, download_md5) = if self.options.verify {
            let expected =
                file_md5(file_path).map_err(|e| WorkflowError::local_io(file_path, e))?;
            let actual =
                file_md5(&download_path).map_err(|e| WorkflowError::local_io(&download_path, e))?;
            if expected != actual {
                return Err(WorkflowError::Verify {
                    key,
                    expected,
                    actual,
                });
            }
            self.logger.info(&format!("Verified md5 {actual}"));
            (Some(expected), Some(actual))
        } else {
            (None, None)
        };

        store
            .delete_object(bucket, &key)
            .map_err(|source| WorkflowError::Delete {
                bucket: bucket.to_string(),
                key: key.clone(),
                source,
            })?;
        store
            .wait_until_object_not_exists(bucket, &key, &self.options.wait)
            .map_err(|source| WorkflowError::ConsistencyTimeout {
                what: format!("object {key:?} to be deleted"),
                source,
            })?;
        self.state.advance(Stage::Deleted);
        self.logger.normal(&format!("Deleted {key}"));

        if self.options.delete_bucket {
            self.delete_bucket(store.as_ref(), bucket)?;
            self.state.advance(Stage::BucketDeleted);
        }

        self.logger.normal("DONE");
        self.state.advance(Stage::Done);

        Ok(RunSummary {
            bucket: bucket.to_string(),
            key,
            key_mode: self.options.key_mode,
            region: None,
            bucket_created: !bucket_exists,
            uploaded_bytes,
            download_path,
            downloaded_bytes,
            object_deleted: true,
            bucket_deleted: self.options.delete_bucket,
            source_md5,
            download_md5,
            started,
            finished: timestamp(),
        })
    }

    fn create_bucket(&self, store: &dyn ObjectStore, bucket: &str) -> Result<(), WorkflowError> {
        store
            .create_bucket(bucket)
            .map_err(|source| WorkflowError::Create {
                bucket: bucket.to_string(),
                source,
            })?;

        self.logger
            .normal(&format!("Waiting for bucket {bucket:?} to be created..."));
        store
            .wait_until_bucket_exists(bucket, &self.options.wait)
            .map_err(|source| WorkflowError::ConsistencyTimeout {
                what: format!("bucket {bucket:?} to be created"),
                source,
            })?;
        self.logger
            .normal(&format!("Bucket {bucket:?} successfully created"));
        Ok(())
    }

    fn delete_bucket(&self, store: &dyn ObjectStore, bucket: &str) -> Result<(), WorkflowError> {
        store
            .delete_bucket(bucket)
            .map_err(|source| WorkflowError::DeleteBucket {
                bucket: bucket.to_string(),
                source,
            })?;

        self.logger
            .normal(&format!("Waiting for bucket {bucket:?} to be deleted..."));
        store
            .wait_until_bucket_not_exists(bucket, &self.options.wait)
            .map_err(|source| WorkflowError::ConsistencyTimeout {
                what: format!("bucket {bucket:?} to be deleted"),
                source,
            })?;
        self.logger
            .normal(&format!("Bucket {bucket:?} successfully deleted"));
        Ok(())
    }
}
