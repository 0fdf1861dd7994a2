use crate::errors::StoreError;
use crate::lifecycle::wait::WaitPolicy;
use crate::s3::models::S3ObjectStore;
use crate::utils::log_utils;
use aws_sdk_s3::client::Waiters;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};

/// AWS rejects an explicit constraint for us-east-1 and requires one
/// everywhere else; S3-compatible endpoints generally ignore or reject it.
pub(crate) fn needs_location_constraint(region: &str, custom_endpoint: bool) -> bool {
    !custom_endpoint && region != "us-east-1"
}

impl S3ObjectStore {
    pub(crate) fn list_bucket_names(&self) -> Result<Vec<String>, StoreError> {
        self.runtime.block_on(async {
            let response = self
                .client
                .list_buckets()
                .send()
                .await
                .map_err(|e| StoreError::service("ListBuckets", DisplayErrorContext(&e)))?;

            let names: Vec<String> = response
                .buckets()
                .iter()
                .filter_map(|b| b.name().map(str::to_string))
                .collect();

            log_utils::debug(&format!("ListBuckets returned {} buckets", names.len()), self.verbose);
            Ok::<Vec<String>, StoreError>(names)
        })
    }

    pub(crate) fn create_bucket_in_region(&self, bucket: &str) -> Result<(), StoreError> {
        self.runtime.block_on(async {
            let mut request = self.client.create_bucket().bucket(bucket);

            if needs_location_constraint(&self.region, self.custom_endpoint) {
                log_utils::debug(
                    &format!("Using location constraint {}", self.region),
                    self.verbose,
                );
                let configuration = CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build();
                request = request.create_bucket_configuration(configuration);
            }

            request
                .send()
                .await
                .map_err(|e| StoreError::service("CreateBucket", DisplayErrorContext(&e)))?;
            Ok::<(), StoreError>(())
        })
    }

    pub(crate) fn head_bucket(&self, bucket: &str) -> Result<bool, StoreError> {
        self.runtime.block_on(async {
            match self.client.head_bucket().bucket(bucket).send().await {
                Ok(_) => Ok(true),
                Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
                Err(e) => Err(StoreError::service("HeadBucket", DisplayErrorContext(&e))),
            }
        })
    }

    pub(crate) fn remove_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.runtime.block_on(async {
            self.client
                .delete_bucket()
                .bucket(bucket)
                .send()
                .await
                .map_err(|e| StoreError::service("DeleteBucket", DisplayErrorContext(&e)))?;
            Ok::<(), StoreError>(())
        })
    }

    pub(crate) fn wait_bucket_exists(
        &self,
        bucket: &str,
        policy: &WaitPolicy,
    ) -> Result<(), StoreError> {
        log_utils::debug(
            &format!("Waiting up to {:?} for bucket {bucket:?}", policy.max_wait()),
            self.verbose,
        );
        self.runtime.block_on(async {
            self.client
                .wait_until_bucket_exists()
                .bucket(bucket)
                .wait(policy.max_wait())
                .await
                .map_err(|e| StoreError::WaitTimedOut {
                    attempts: policy.max_attempts,
                    message: DisplayErrorContext(&e).to_string(),
                })?;
            Ok::<(), StoreError>(())
        })
    }

    pub(crate) fn wait_bucket_gone(
        &self,
        bucket: &str,
        policy: &WaitPolicy,
    ) -> Result<(), StoreError> {
        self.runtime.block_on(async {
            self.client
                .wait_until_bucket_not_exists()
                .bucket(bucket)
                .wait(policy.max_wait())
                .await
                .map_err(|e| StoreError::WaitTimedOut {
                    attempts: policy.max_attempts,
                    message: DisplayErrorContext(&e).to_string(),
                })?;
            Ok::<(), StoreError>(())
        })
    }
}
