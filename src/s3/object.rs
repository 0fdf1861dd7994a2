use crate::errors::StoreError;
use crate::lifecycle::wait::WaitPolicy;
use crate::ports::ObjectStore;
use crate::s3::models::S3ObjectStore;
use crate::utils::log_utils;
use aws_sdk_s3::client::Waiters;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::fs::File;
use std::io::Write;

impl S3ObjectStore {
    fn upload(&self, bucket: &str, key: &str, body: File) -> Result<u64, StoreError> {
        let length = body.metadata()?.len();

        self.runtime.block_on(async {
            // Stream straight from the open handle - no loading into memory
            let stream = ByteStream::read_from()
                .file(tokio::fs::File::from_std(body))
                .build()
                .await
                .map_err(|e| StoreError::service("PutObject", e))?;

            let response = self
                .client
                .put_object()
                .bucket(bucket)
                .key(key)
                .body(stream)
                .send()
                .await
                .map_err(|e| StoreError::service("PutObject", DisplayErrorContext(&e)))?;

            log_utils::debug(
                &format!("PutObject {key:?}: {length} bytes, ETag {:?}", response.e_tag()),
                self.verbose,
            );
            Ok::<u64, StoreError>(length)
        })
    }

    fn download(&self, bucket: &str, key: &str, sink: &mut File) -> Result<u64, StoreError> {
        let written = self.runtime.block_on(async {
            let response = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| StoreError::service("GetObject", DisplayErrorContext(&e)))?;

            log_utils::debug(
                &format!(
                    "GetObject {key:?}: content length {:?}, ETag {:?}",
                    response.content_length(),
                    response.e_tag()
                ),
                self.verbose,
            );

            let mut body = response.body;
            let mut written = 0u64;
            while let Some(chunk) = body
                .try_next()
                .await
                .map_err(|e| StoreError::service("GetObject", e))?
            {
                sink.write_all(&chunk)?;
                written += chunk.len() as u64;
            }
            Ok::<u64, StoreError>(written)
        })?;

        sink.flush()?;
        Ok(written)
    }

    fn head_object(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        self.runtime.block_on(async {
            match self.client.head_object().bucket(bucket).key(key).send().await {
                Ok(_) => Ok(true),
                Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => Ok(false),
                Err(e) => Err(StoreError::service("HeadObject", DisplayErrorContext(&e))),
            }
        })
    }

    fn remove_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.runtime.block_on(async {
            self.client
                .delete_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await
                .map_err(|e| StoreError::service("DeleteObject", DisplayErrorContext(&e)))?;
            Ok::<(), StoreError>(())
        })
    }

    fn wait_object_gone(
        &self,
        bucket: &str,
        key: &str,
        policy: &WaitPolicy,
    ) -> Result<(), StoreError> {
        self.runtime.block_on(async {
            self.client
                .wait_until_object_not_exists()
                .bucket(bucket)
                .key(key)
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

impl ObjectStore for S3ObjectStore {
    fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        self.list_bucket_names()
    }

    fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.create_bucket_in_region(bucket)
    }

    fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        self.head_bucket(bucket)
    }

    fn put_object(&self, bucket: &str, key: &str, body: File) -> Result<u64, StoreError> {
        self.upload(bucket, key, body)
    }

    fn get_object(&self, bucket: &str, key: &str, sink: &mut File) -> Result<u64, StoreError> {
        self.download(bucket, key, sink)
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.remove_object(bucket, key)
    }

    fn object_exists(&self, bucket: &str, key: &str) -> Result<bool, StoreError> {
        self.head_object(bucket, key)
    }

    fn delete_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.remove_bucket(bucket)
    }

    fn wait_until_bucket_exists(&self, bucket: &str, policy: &WaitPolicy) -> Result<(), StoreError> {
        self.wait_bucket_exists(bucket, policy)
    }

    fn wait_until_object_not_exists(
        &self,
        bucket: &str,
        key: &str,
        policy: &WaitPolicy,
    ) -> Result<(), StoreError> {
        self.wait_object_gone(bucket, key, policy)
    }

    fn wait_until_bucket_not_exists(
        &self,
        bucket: &str,
        policy: &WaitPolicy,
    ) -> Result<(), StoreError> {
        self.wait_bucket_gone(bucket, policy)
    }
}
